//! Works and authors.
//!
//! These records are built by external collaborators (scrapers,
//! enrichment passes, manual entry) and handed to the engine by
//! reference. The engine only reads them, except for the derived
//! cache fields on [`Work`] which the status updater refreshes.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::jurisdiction::Jurisdiction;
use crate::status::CopyrightStatus;

pub type WorkId = i64;
pub type AuthorId = i64;

// ── Authorship ──────────────────────────────────────────────────────

/// How a work was authored. Drives special-rule matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorshipType {
    /// One named natural person.
    Single,
    /// Multiple named co-authors (joint work).
    Collaborative,
    /// Anonymous or pseudonymous.
    Anonymous,
    /// Corporate work / work for hire.
    Corporate,
    /// Government or crown copyright.
    Government,
}

impl std::fmt::Display for AuthorshipType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthorshipType::Single => write!(f, "single"),
            AuthorshipType::Collaborative => write!(f, "collaborative"),
            AuthorshipType::Anonymous => write!(f, "anonymous"),
            AuthorshipType::Corporate => write!(f, "corporate"),
            AuthorshipType::Government => write!(f, "government"),
        }
    }
}

// ── Author ──────────────────────────────────────────────────────────

/// An author of one or more creative works.
///
/// Authors are shared between works (`Arc`), never owned by one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: Option<AuthorId>,
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    /// Unknown death date forces `Unknown` status under standard rules.
    pub death_date: Option<NaiveDate>,
    /// Jurisdiction code the author is affiliated with (e.g. "US").
    /// Drives primary-jurisdiction inference.
    pub nationality: Option<String>,
}

impl Author {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            birth_date: None,
            death_date: None,
            nationality: None,
        }
    }
}

impl std::fmt::Display for Author {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.birth_date, self.death_date) {
            (None, None) => write!(f, "{}", self.name),
            (birth, death) => {
                let fmt_year = |d: Option<NaiveDate>| {
                    d.map(|d| d.year().to_string())
                        .unwrap_or_else(|| "?".to_string())
                };
                write!(f, "{} ({}-{})", self.name, fmt_year(birth), fmt_year(death))
            }
        }
    }
}

// ── Work ────────────────────────────────────────────────────────────

/// A creative work.
///
/// `copyright_expiry_date`, `status` and `status_by_jurisdiction` are
/// derived caches: always recomputable from the other fields plus the
/// jurisdiction rules, but trusted when already populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Work {
    pub id: Option<WorkId>,
    pub title: String,
    pub authors: Vec<Arc<Author>>,
    pub authorship: AuthorshipType,
    pub creation_date: Option<NaiveDate>,
    pub publication_date: Option<NaiveDate>,
    pub primary_jurisdiction: Option<Arc<Jurisdiction>>,
    /// Derived: estimated expiry under the primary/global view.
    pub copyright_expiry_date: Option<NaiveDate>,
    /// Derived: primary/global status, `None` until computed.
    pub status: Option<CopyrightStatus>,
    /// Derived: jurisdiction code → status. Entries already present
    /// (e.g. from an enrichment pass) are treated as authoritative.
    #[serde(default)]
    pub status_by_jurisdiction: HashMap<String, CopyrightStatus>,
}

impl Work {
    pub fn new(title: impl Into<String>, authorship: AuthorshipType) -> Self {
        Self {
            id: None,
            title: title.into(),
            authors: Vec::new(),
            authorship,
            creation_date: None,
            publication_date: None,
            primary_jurisdiction: None,
            copyright_expiry_date: None,
            status: None,
            status_by_jurisdiction: HashMap::new(),
        }
    }

    /// The date creation-based terms count from: the creation date,
    /// falling back to the publication date when creation is unknown.
    pub fn reference_date(&self) -> Option<NaiveDate> {
        self.creation_date.or(self.publication_date)
    }

    /// Death date of the last surviving author.
    ///
    /// `Some` only when the work has at least one author and every
    /// author's death date is known; life-based terms cannot be
    /// reliably computed otherwise.
    pub fn latest_death_date(&self) -> Option<NaiveDate> {
        if self.authors.is_empty() {
            return None;
        }
        let mut latest: Option<NaiveDate> = None;
        for author in &self.authors {
            let death = author.death_date?;
            if latest.map_or(true, |d| death > d) {
                latest = Some(death);
            }
        }
        latest
    }
}

impl std::fmt::Display for Work {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let authors = if self.authors.is_empty() {
            "Unknown Author".to_string()
        } else {
            self.authors
                .iter()
                .map(|a| a.name.clone())
                .collect::<Vec<_>>()
                .join(", ")
        };
        let status = self.status.map(|s| s.as_str()).unwrap_or("Unknown");
        write!(f, "'{}' by {} [{}]", self.title, authors, status)
    }
}

// ── Tests ───────────────────────────────────────────────────────────
