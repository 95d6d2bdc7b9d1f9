//! Status resolution and multi-jurisdiction aggregation.
//!
//! Resolution precedence, highest first:
//! 1. a pre-populated `status_by_jurisdiction` entry for the effective
//!    jurisdiction's code (authoritative cache, no date math);
//! 2. the pre-1875 conservative fallback (old enough to be public
//!    domain everywhere, regardless of author data quality);
//! 3. the fixed pre-1927 US public-domain cutoff;
//! 4. the expiry calculator compared against `today`.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use tracing::{debug, warn};

use lapsed_core::{CopyrightStatus, Jurisdiction, Result, Work, WorkId};

use crate::expiry::calculate_expiry;
use crate::repository::CopyrightRepository;

/// Works created before this year are conservatively assumed expired
/// in every jurisdiction.
const PUBLIC_DOMAIN_FALLBACK_YEAR: i32 = 1875;

/// Fixed US cutoff: works from before this year are public domain in
/// the US independent of life-based math.
const US_PUBLIC_DOMAIN_CUTOFF_YEAR: i32 = 1927;

/// Copyright status of a work in a jurisdiction as of `today`.
///
/// With no explicit jurisdiction the work's primary jurisdiction is
/// the effective one. Missing data resolves to
/// [`CopyrightStatus::Unknown`], never an error.
pub fn determine_status(
    repo: &dyn CopyrightRepository,
    work: &Work,
    jurisdiction: Option<&Jurisdiction>,
    today: NaiveDate,
) -> Result<CopyrightStatus> {
    let jurisdiction = jurisdiction.or(work.primary_jurisdiction.as_deref());

    // Already-determined statuses are authoritative; they bypass the
    // fallback cutoffs and all date math.
    if let Some(jurisdiction) = jurisdiction {
        if let Some(status) = work.status_by_jurisdiction.get(&jurisdiction.code) {
            debug!(
                "Using cached status for '{}' in {}: {}",
                work.title, jurisdiction.code, status
            );
            return Ok(*status);
        }
    }

    if let Some(reference) = work.reference_date() {
        if reference.year() < PUBLIC_DOMAIN_FALLBACK_YEAR {
            return Ok(CopyrightStatus::PublicDomain);
        }
        if reference.year() < US_PUBLIC_DOMAIN_CUTOFF_YEAR
            && jurisdiction.map_or(false, |j| j.code == "US")
        {
            return Ok(CopyrightStatus::PublicDomain);
        }
    }

    match calculate_expiry(repo, work, jurisdiction)? {
        None => Ok(CopyrightStatus::Unknown),
        Some(expiry) if expiry <= today => Ok(CopyrightStatus::PublicDomain),
        Some(_) => Ok(CopyrightStatus::Copyrighted),
    }
}

// ── Multi-jurisdiction aggregation ──────────────────────────────────

/// Status of a work in each of the supplied jurisdictions.
///
/// One resolver call per jurisdiction, one map entry per code; an
/// empty jurisdiction list yields an empty map. Performs no I/O;
/// persisting the result is the caller's job (see
/// [`persist_status_map`]).
pub fn calculate_multi_jurisdiction_status(
    repo: &dyn CopyrightRepository,
    work: &Work,
    jurisdictions: &[Arc<Jurisdiction>],
    today: NaiveDate,
) -> Result<HashMap<String, CopyrightStatus>> {
    let mut status_map = HashMap::with_capacity(jurisdictions.len());

    for jurisdiction in jurisdictions {
        let status = determine_status(repo, work, Some(jurisdiction), today)?;
        status_map.insert(jurisdiction.code.clone(), status);
    }

    Ok(status_map)
}

/// Forward an aggregated status map to the repository, one write per
/// jurisdiction code.
pub fn persist_status_map(
    repo: &dyn CopyrightRepository,
    work_id: WorkId,
    status_map: &HashMap<String, CopyrightStatus>,
) -> Result<()> {
    for (code, status) in status_map {
        if !repo.set_status_by_jurisdiction(work_id, code, *status)? {
            warn!(
                "Status write for work {} in {} was not applied",
                work_id, code
            );
        }
    }
    Ok(())
}

// ── Tests ───────────────────────────────────────────────────────────
