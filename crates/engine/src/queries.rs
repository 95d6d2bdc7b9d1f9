//! Derived queries over works and jurisdictions.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::warn;

use lapsed_core::{CopyrightStatus, Jurisdiction, Result, Work};

use crate::expiry::calculate_expiry;
use crate::repository::CopyrightRepository;
use crate::status::determine_status;

/// Days until a work's copyright expires in a jurisdiction.
///
/// Returns `None` when no expiry can be estimated, when the work is
/// already public domain there as of `today`, or when the expiry lies
/// in the past. Pure: the work's cached expiry is read for the global
/// view but never written.
pub fn days_until_expiry(
    repo: &dyn CopyrightRepository,
    work: &Work,
    jurisdiction: Option<&Jurisdiction>,
    today: NaiveDate,
) -> Result<Option<i64>> {
    let expiry = match jurisdiction {
        Some(jurisdiction) => calculate_expiry(repo, work, Some(jurisdiction))?,
        None => match work.copyright_expiry_date {
            Some(cached) => Some(cached),
            None => calculate_expiry(repo, work, None)?,
        },
    };
    let Some(expiry) = expiry else {
        return Ok(None);
    };

    if determine_status(repo, work, jurisdiction, today)? == CopyrightStatus::PublicDomain {
        return Ok(None);
    }

    let days = (expiry - today).num_days();
    Ok(if days >= 0 { Some(days) } else { None })
}

/// All works with the given status in the named jurisdiction.
///
/// An unknown jurisdiction code yields an empty list, not an error.
pub fn works_by_status_in_jurisdiction(
    repo: &dyn CopyrightRepository,
    jurisdiction_code: &str,
    status: CopyrightStatus,
    today: NaiveDate,
) -> Result<Vec<Arc<Work>>> {
    let jurisdictions = repo.all_jurisdictions()?;
    let Some(jurisdiction) = jurisdictions.iter().find(|j| j.code == jurisdiction_code) else {
        warn!("Unknown jurisdiction code: {}", jurisdiction_code);
        return Ok(Vec::new());
    };

    let mut matching = Vec::new();
    for work in repo.all_works()? {
        if determine_status(repo, &work, Some(jurisdiction), today)? == status {
            matching.push(work);
        }
    }
    Ok(matching)
}

// ── Tests ───────────────────────────────────────────────────────────
