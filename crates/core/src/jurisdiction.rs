//! Jurisdictions and their special-case copyright rules.
//!
//! A jurisdiction carries the standard "life + N years" term. Special
//! cases (corporate works, anonymous works, collaborative works,
//! government/crown copyright) are modelled as an ordered list of
//! [`CopyrightRule`]s per jurisdiction; the first rule whose condition
//! matches a work's authorship type wins.

use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_TERM_YEARS;
use crate::work::AuthorshipType;

pub type JurisdictionId = i64;

/// A legal jurisdiction with its own copyright term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jurisdiction {
    pub id: JurisdictionId,
    /// Display name, e.g. "United States".
    pub name: String,
    /// ISO country code or region code, e.g. "US", "GB", "EU".
    pub code: String,
    /// Standard term in years after the author's death.
    pub term_years_after_death: u32,
    /// Whether any special-case rules exist for this jurisdiction.
    /// When false, rule lookup is skipped entirely.
    pub has_special_rules: bool,
}

impl Jurisdiction {
    pub fn new(id: JurisdictionId, name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            code: code.into(),
            term_years_after_death: DEFAULT_TERM_YEARS,
            has_special_rules: false,
        }
    }
}

impl std::fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

// ── Special-case rules ──────────────────────────────────────────────

/// The class of works a special rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCondition {
    CorporateWorks,
    AnonymousWorks,
    CollaborativeWorks,
    GovernmentWorks,
}

impl RuleCondition {
    /// Structural match against a work's authorship type.
    pub fn matches(&self, authorship: AuthorshipType) -> bool {
        match self {
            RuleCondition::CorporateWorks => authorship == AuthorshipType::Corporate,
            RuleCondition::AnonymousWorks => authorship == AuthorshipType::Anonymous,
            RuleCondition::CollaborativeWorks => authorship == AuthorshipType::Collaborative,
            RuleCondition::GovernmentWorks => authorship == AuthorshipType::Government,
        }
    }
}

/// The date a special rule counts its term from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermBasis {
    /// The work's creation (or first publication) date.
    Creation,
    /// The death date of the last surviving co-author.
    LastAuthorDeath,
}

/// A jurisdiction-specific copyright rule.
///
/// Rules belong to exactly one jurisdiction and are evaluated in list
/// order; there is no priority beyond position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyrightRule {
    pub jurisdiction_id: JurisdictionId,
    pub condition: RuleCondition,
    pub basis: TermBasis,
    pub term_years: u32,
    #[serde(default)]
    pub description: String,
}

// ── Tests ───────────────────────────────────────────────────────────
