//! The status updater: refreshes a work's derived fields in place.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;

use lapsed_core::{Jurisdiction, Result, Work};

use crate::expiry::calculate_expiry;
use crate::repository::CopyrightRepository;
use crate::status::{calculate_multi_jurisdiction_status, determine_status};

/// Recompute a work's derived fields: primary jurisdiction (when not
/// already set), global expiry date, global status, and the full
/// status-by-jurisdiction map.
///
/// Each step writes only its own field, so partial completion leaves
/// earlier fields intact and the call is safe to retry. For a fixed
/// `today` the operation is idempotent: running it twice leaves the
/// work exactly as after the first run. Jurisdiction inference runs
/// first for that reason; the global view must already see the
/// inferred jurisdiction on the first pass.
pub fn update_work_status(
    repo: &dyn CopyrightRepository,
    work: &mut Work,
    today: NaiveDate,
) -> Result<()> {
    let jurisdictions = repo.all_jurisdictions()?;

    if work.primary_jurisdiction.is_none() {
        work.primary_jurisdiction = infer_primary_jurisdiction(work, &jurisdictions);
    }

    work.copyright_expiry_date = calculate_expiry(repo, work, None)?;
    work.status = Some(determine_status(repo, work, None, today)?);
    work.status_by_jurisdiction =
        calculate_multi_jurisdiction_status(repo, work, &jurisdictions, today)?;

    Ok(())
}

/// First jurisdiction whose code matches an author's nationality, in
/// author order.
fn infer_primary_jurisdiction(
    work: &Work,
    jurisdictions: &[Arc<Jurisdiction>],
) -> Option<Arc<Jurisdiction>> {
    for author in &work.authors {
        let Some(nationality) = author.nationality.as_deref() else {
            continue;
        };
        if let Some(jurisdiction) = jurisdictions.iter().find(|j| j.code == nationality) {
            debug!(
                "Inferred primary jurisdiction {} for '{}' from {}",
                jurisdiction.code, work.title, author.name
            );
            return Some(Arc::clone(jurisdiction));
        }
    }
    None
}

// ── Tests ───────────────────────────────────────────────────────────
