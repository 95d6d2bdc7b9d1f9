use std::env;

use chrono::{NaiveDate, Utc};

/// Default copyright term: life of the author + 70 years, the most
/// common standard term internationally. Used whenever no jurisdiction
/// context is available.
pub const DEFAULT_TERM_YEARS: u32 = 70;

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// The engine's "today".
///
/// Returns the current UTC date unless the simulation override
/// `LAPSED_CURRENT_DATE` (format `YYYY-MM-DD`) is set. This is the
/// default value callers thread into the time-sensitive engine calls;
/// the engine itself never reads the clock.
pub fn current_date() -> NaiveDate {
    if let Some(raw) = env_opt("LAPSED_CURRENT_DATE") {
        match NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
            Ok(date) => return date,
            Err(e) => {
                tracing::warn!("Ignoring invalid LAPSED_CURRENT_DATE '{}': {}", raw, e);
            }
        }
    }
    Utc::now().date_naive()
}
