//! Catalog of review statuses reported by the homework API.
//!
//! [`ReviewStatus`] mirrors the three wire values the API sends in a work
//! item's `status` field, and maps each to the verdict shown to the user.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Review state of a single submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    /// The reviewer accepted the work.
    Approved,
    /// A reviewer picked the work up.
    Reviewing,
    /// The reviewer left remarks.
    Rejected,
}

impl ReviewStatus {
    pub const ALL: [ReviewStatus; 3] = [
        ReviewStatus::Approved,
        ReviewStatus::Reviewing,
        ReviewStatus::Rejected,
    ];

    /// Wire key as sent by the API.
    pub fn key(self) -> &'static str {
        match self {
            ReviewStatus::Approved => "approved",
            ReviewStatus::Reviewing => "reviewing",
            ReviewStatus::Rejected => "rejected",
        }
    }

    /// Human-readable verdict delivered to the user.
    pub fn verdict(self) -> &'static str {
        match self {
            ReviewStatus::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            ReviewStatus::Reviewing => "Работа взята на проверку ревьюером.",
            ReviewStatus::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ReviewStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.key() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// Verdict text for a wire key, or `None` if the key is not in the catalog.
pub fn lookup(key: &str) -> Option<&'static str> {
    key.parse::<ReviewStatus>().ok().map(ReviewStatus::verdict)
}
