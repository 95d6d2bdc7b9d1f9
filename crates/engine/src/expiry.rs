//! Expiry date calculation.
//!
//! Two paths, special rules first:
//! - **Special rules**: the resolved jurisdiction's ordered rule list,
//!   matched structurally against the work's authorship type. The
//!   first match is authoritative and the standard path is skipped.
//! - **Standard rule**: life of the last surviving author plus the
//!   jurisdiction's term (or the global default with no jurisdiction).
//!
//! All expiry dates align to December 31 of the expiry year, the
//! statutory "term runs to the end of the calendar year" convention.

use chrono::{Datelike, NaiveDate};
use tracing::{debug, info, warn};

use lapsed_core::config::DEFAULT_TERM_YEARS;
use lapsed_core::{Jurisdiction, Result, TermBasis, Work};

use crate::repository::CopyrightRepository;

/// December 31 of the given year; `None` only when the year falls
/// outside chrono's representable range.
fn end_of_year(year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 12, 31)
}

/// Estimated copyright expiry date for a work in a jurisdiction.
///
/// With no explicit jurisdiction the work's primary jurisdiction is
/// used; with neither, a jurisdiction-agnostic standard calculation.
/// Returns `Ok(None)` when the available data cannot support an
/// estimate (downstream this reads as `Unknown`).
pub fn calculate_expiry(
    repo: &dyn CopyrightRepository,
    work: &Work,
    jurisdiction: Option<&Jurisdiction>,
) -> Result<Option<NaiveDate>> {
    debug!("Calculating expiry for work: {}", work.title);

    let jurisdiction = jurisdiction.or(work.primary_jurisdiction.as_deref());

    if let Some(jurisdiction) = jurisdiction {
        if jurisdiction.has_special_rules {
            if let Some(expiry) = apply_special_rules(repo, work, jurisdiction)? {
                return Ok(Some(expiry));
            }
        }
    }

    Ok(calculate_standard_expiry(work, jurisdiction))
}

/// Walk a jurisdiction's ordered rule list; the first rule whose
/// condition matches the work's authorship type AND whose term basis
/// resolves to a date wins. A rule with an unresolvable basis (e.g. a
/// collaborative rule where some co-author death date is unknown) is
/// skipped, not an error.
pub fn apply_special_rules(
    repo: &dyn CopyrightRepository,
    work: &Work,
    jurisdiction: &Jurisdiction,
) -> Result<Option<NaiveDate>> {
    let rules = repo.rules_for_jurisdiction(jurisdiction.id)?;

    for rule in &rules {
        if !rule.condition.matches(work.authorship) {
            continue;
        }

        let base = match rule.basis {
            TermBasis::Creation => work.reference_date(),
            TermBasis::LastAuthorDeath => work.latest_death_date(),
        };
        let Some(base) = base else { continue };
        let Some(expiry) = end_of_year(base.year() + rule.term_years as i32) else {
            continue;
        };

        info!(
            "'{}' expires on {} in {} ({} + {} years)",
            work.title,
            expiry,
            jurisdiction.name,
            match rule.basis {
                TermBasis::Creation => "creation",
                TermBasis::LastAuthorDeath => "last author death",
            },
            rule.term_years
        );
        return Ok(Some(expiry));
    }

    Ok(None)
}

/// Standard "life + X years" calculation, end-of-year aligned.
///
/// The basis is the death date of the last surviving author; every
/// listed author's death date must be known. Works with no author
/// data get no standard estimate (creation-based terms exist only as
/// special rules).
pub fn calculate_standard_expiry(
    work: &Work,
    jurisdiction: Option<&Jurisdiction>,
) -> Option<NaiveDate> {
    let term_years = jurisdiction.map_or(DEFAULT_TERM_YEARS, |j| j.term_years_after_death);

    let Some(latest_death) = work.latest_death_date() else {
        warn!(
            "Cannot reliably calculate expiry for '{}': author death date(s) unknown",
            work.title
        );
        return None;
    };

    let expiry = end_of_year(latest_death.year() + term_years as i32)?;
    info!(
        "Estimated expiry for '{}' based on life + {} years{}: {}",
        work.title,
        term_years,
        jurisdiction.map_or(String::new(), |j| format!(" in {}", j.name)),
        expiry
    );
    Some(expiry)
}

// ── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use lapsed_core::{
        Author, AuthorshipType, CopyrightRule, CopyrightStatus, LapsedError, RuleCondition,
        WorkId,
    };

    use crate::repository::MemoryRepository;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn author_died(name: &str, year: i32) -> Arc<Author> {
        Arc::new(Author {
            death_date: Some(ymd(year, 3, 15)),
            ..Author::new(name)
        })
    }

    fn single_author_work(title: &str, death_year: i32) -> Work {
        let mut work = Work::new(title, AuthorshipType::Single);
        work.authors = vec![author_died("A. Writer", death_year)];
        work
    }

    fn us_with_corporate_rule(repo: &mut MemoryRepository) -> Arc<Jurisdiction> {
        let us = repo.add_jurisdiction(Jurisdiction {
            has_special_rules: true,
            ..Jurisdiction::new(1, "United States", "US")
        });
        repo.add_rule(CopyrightRule {
            jurisdiction_id: 1,
            condition: RuleCondition::CorporateWorks,
            basis: TermBasis::Creation,
            term_years: 95,
            description: "Corporate works / works for hire".to_string(),
        });
        us
    }

    #[test]
    fn standard_expiry_is_end_of_death_year_plus_term() {
        let work = single_author_work("Novel", 1950);
        let jurisdiction = Jurisdiction::new(1, "United States", "US");

        let expiry = calculate_standard_expiry(&work, Some(&jurisdiction));
        assert_eq!(expiry, Some(ymd(2020, 12, 31)));
    }

    #[test]
    fn standard_expiry_uses_default_term_without_jurisdiction() {
        let work = single_author_work("Novel", 1950);
        assert_eq!(
            calculate_standard_expiry(&work, None),
            Some(ymd(1950 + DEFAULT_TERM_YEARS as i32, 12, 31))
        );
    }

    #[test]
    fn standard_expiry_requires_every_death_date() {
        let mut work = single_author_work("Joint Novel", 1950);
        work.authorship = AuthorshipType::Collaborative;
        work.authors.push(Arc::new(Author::new("B. Writer")));
        work.creation_date = Some(ymd(1940, 1, 1));

        assert_eq!(calculate_standard_expiry(&work, None), None);
    }

    #[test]
    fn multi_author_standard_expiry_uses_latest_death() {
        let mut work = Work::new("Duet", AuthorshipType::Collaborative);
        work.authors = vec![author_died("A", 1960), author_died("B", 1970)];
        let jurisdiction = Jurisdiction::new(2, "European Union", "EU");

        assert_eq!(
            calculate_standard_expiry(&work, Some(&jurisdiction)),
            Some(ymd(2040, 12, 31))
        );
    }

    #[test]
    fn special_rule_overrides_standard_calculation() {
        let mut repo = MemoryRepository::new();
        let us = us_with_corporate_rule(&mut repo);

        let mut work = Work::new("Annual Report", AuthorshipType::Corporate);
        work.creation_date = Some(ymd(1925, 5, 1));

        let expiry = calculate_expiry(&repo, &work, Some(&us)).unwrap();
        assert_eq!(expiry, Some(ymd(2020, 12, 31)));
    }

    #[test]
    fn non_matching_condition_falls_through_to_standard() {
        let mut repo = MemoryRepository::new();
        let us = us_with_corporate_rule(&mut repo);

        let mut work = single_author_work("Novel", 1950);
        work.creation_date = Some(ymd(1930, 1, 1));

        // The corporate rule does not match a single-author work.
        let expiry = calculate_expiry(&repo, &work, Some(&us)).unwrap();
        assert_eq!(expiry, Some(ymd(2020, 12, 31)));
    }

    #[test]
    fn collaborative_rule_needs_every_death_date() {
        let mut repo = MemoryRepository::new();
        let eu = repo.add_jurisdiction(Jurisdiction {
            has_special_rules: true,
            ..Jurisdiction::new(2, "European Union", "EU")
        });
        repo.add_rule(CopyrightRule {
            jurisdiction_id: 2,
            condition: RuleCondition::CollaborativeWorks,
            basis: TermBasis::LastAuthorDeath,
            term_years: 70,
            description: String::new(),
        });

        let mut work = Work::new("Duet", AuthorshipType::Collaborative);
        work.authors = vec![author_died("A", 1960), Arc::new(Author::new("B"))];

        // Rule basis cannot resolve; no match, no standard basis either.
        assert_eq!(apply_special_rules(&repo, &work, &eu).unwrap(), None);
        assert_eq!(calculate_expiry(&repo, &work, Some(&eu)).unwrap(), None);
    }

    #[test]
    fn crown_copyright_counts_from_creation() {
        let mut repo = MemoryRepository::new();
        let gb = repo.add_jurisdiction(Jurisdiction {
            has_special_rules: true,
            ..Jurisdiction::new(3, "United Kingdom", "GB")
        });
        repo.add_rule(CopyrightRule {
            jurisdiction_id: 3,
            condition: RuleCondition::GovernmentWorks,
            basis: TermBasis::Creation,
            term_years: 50,
            description: "Crown copyright".to_string(),
        });

        let mut work = Work::new("Ordnance Survey", AuthorshipType::Government);
        work.creation_date = Some(ymd(1960, 7, 1));

        let expiry = calculate_expiry(&repo, &work, Some(&gb)).unwrap();
        assert_eq!(expiry, Some(ymd(2010, 12, 31)));
    }

    #[test]
    fn first_matching_rule_wins() {
        let mut repo = MemoryRepository::new();
        let us = repo.add_jurisdiction(Jurisdiction {
            has_special_rules: true,
            ..Jurisdiction::new(1, "United States", "US")
        });
        for term_years in [95, 120] {
            repo.add_rule(CopyrightRule {
                jurisdiction_id: 1,
                condition: RuleCondition::CorporateWorks,
                basis: TermBasis::Creation,
                term_years,
                description: String::new(),
            });
        }

        let mut work = Work::new("Catalogue", AuthorshipType::Corporate);
        work.creation_date = Some(ymd(1950, 1, 1));

        let expiry = apply_special_rules(&repo, &work, &us).unwrap();
        assert_eq!(expiry, Some(ymd(2045, 12, 31)));
    }

    #[test]
    fn falls_back_to_primary_jurisdiction() {
        let mut repo = MemoryRepository::new();
        let mut de = Jurisdiction::new(4, "Germany", "DE");
        de.term_years_after_death = 70;
        let de = repo.add_jurisdiction(de);

        let mut work = single_author_work("Roman", 1940);
        work.primary_jurisdiction = Some(de);

        let expiry = calculate_expiry(&repo, &work, None).unwrap();
        assert_eq!(expiry, Some(ymd(2010, 12, 31)));
    }

    // Repository that fails every call; used to prove the rule lookup
    // is skipped when the special-rules flag is off.
    struct FailingRepository;

    impl CopyrightRepository for FailingRepository {
        fn rules_for_jurisdiction(&self, _: i64) -> Result<Vec<CopyrightRule>> {
            Err(LapsedError::Repository("rules queried".to_string()))
        }
        fn all_jurisdictions(&self) -> Result<Vec<Arc<Jurisdiction>>> {
            Err(LapsedError::Repository("jurisdictions queried".to_string()))
        }
        fn all_works(&self) -> Result<Vec<Arc<Work>>> {
            Err(LapsedError::Repository("works queried".to_string()))
        }
        fn set_status_by_jurisdiction(
            &self,
            _: WorkId,
            _: &str,
            _: CopyrightStatus,
        ) -> Result<bool> {
            Err(LapsedError::Repository("status written".to_string()))
        }
    }

    #[test]
    fn special_rules_flag_off_skips_rule_lookup() {
        let work = single_author_work("Novel", 1950);
        let jurisdiction = Jurisdiction::new(1, "United States", "US");
        assert!(!jurisdiction.has_special_rules);

        // Would be Err if the lookup ever ran.
        let expiry = calculate_expiry(&FailingRepository, &work, Some(&jurisdiction)).unwrap();
        assert_eq!(expiry, Some(ymd(2020, 12, 31)));
    }

    #[test]
    fn repository_fault_propagates() {
        let mut work = Work::new("Report", AuthorshipType::Corporate);
        work.creation_date = Some(ymd(1950, 1, 1));
        let jurisdiction = Jurisdiction {
            has_special_rules: true,
            ..Jurisdiction::new(1, "United States", "US")
        };

        let err = calculate_expiry(&FailingRepository, &work, Some(&jurisdiction)).unwrap_err();
        assert!(matches!(err, LapsedError::Repository(_)));
    }
}
