//! The tri-state copyright status.
//!
//! Uncertainty is a first-class value: anything the engine cannot
//! derive from the available record data resolves to [`CopyrightStatus::Unknown`]
//! rather than an error.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Copyright status of a work in some jurisdiction.
///
/// Serializes to the display strings ("Public Domain", "Copyrighted",
/// "Unknown") so stored records keep the original wire form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CopyrightStatus {
    #[serde(rename = "Public Domain")]
    PublicDomain,
    Copyrighted,
    Unknown,
}

impl CopyrightStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CopyrightStatus::PublicDomain => "Public Domain",
            CopyrightStatus::Copyrighted => "Copyrighted",
            CopyrightStatus::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for CopyrightStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CopyrightStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Public Domain" => Ok(CopyrightStatus::PublicDomain),
            "Copyrighted" => Ok(CopyrightStatus::Copyrighted),
            "Unknown" => Ok(CopyrightStatus::Unknown),
            other => Err(format!("unknown copyright status: '{}'", other)),
        }
    }
}

// ── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_round_trips_through_from_str() {
        for status in [
            CopyrightStatus::PublicDomain,
            CopyrightStatus::Copyrighted,
            CopyrightStatus::Unknown,
        ] {
            assert_eq!(status.to_string().parse::<CopyrightStatus>(), Ok(status));
        }
    }

    #[test]
    fn from_str_rejects_unknown_values() {
        assert!("Expired".parse::<CopyrightStatus>().is_err());
    }
}
