//! Subscription plan tiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Subscription tier controlling the daily chat allowance.
///
/// Paid tiers are unlimited; only `Free` is metered. The quota table itself
/// lives in `haven-quota` so limits stay configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    Free,
    Plus,
    Premium,
}

impl Plan {
    /// Canonical lowercase name, matching the wire and profile encoding.
    pub fn as_str(self) -> &'static str {
        match self {
            Plan::Free => "free",
            Plan::Plus => "plus",
            Plan::Premium => "premium",
        }
    }

}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for unrecognized plan names.
#[derive(Debug, thiserror::Error)]
#[error("unknown plan: {0}")]
pub struct PlanParseError(pub String);

impl FromStr for Plan {
    type Err = PlanParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "free" => Ok(Plan::Free),
            "plus" => Ok(Plan::Plus),
            "premium" => Ok(Plan::Premium),
            other => Err(PlanParseError(other.to_string())),
        }
    }
}
