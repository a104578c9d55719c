use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How the non-refundable amount is derived from the TPP, the deposit and
/// 20% of the package cost.
///
/// Each variant matches one released version of the calculator. They are kept
/// side by side because they do not agree: `Additive` ignores the deposit.
/// Whether that was intended is still an open product question.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PolicyVariant {
    /// TPP plus the deposit when it reaches 20% of the cost, otherwise TPP plus 20%.
    #[serde(alias = "1.01")]
    Threshold,
    /// TPP plus 20% of the cost, whatever the deposit.
    #[serde(alias = "1.3.3")]
    Additive,
    /// TPP plus the larger of deposit and 20%, reporting which one won.
    #[default]
    #[serde(alias = "1.3")]
    MaxWithReason,
}

impl PolicyVariant {
    pub const ALL: [PolicyVariant; 3] = [Self::Threshold, Self::Additive, Self::MaxWithReason];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Threshold => "threshold",
            Self::Additive => "additive",
            Self::MaxWithReason => "max-with-reason",
        }
    }

    /// Release of the calculator that shipped this policy.
    pub fn version(&self) -> &'static str {
        match self {
            Self::Threshold => "1.01",
            Self::Additive => "1.3.3",
            Self::MaxWithReason => "1.3",
        }
    }

    /// Accepts the policy name or the release tag, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL.into_iter().find(|policy| {
            s.eq_ignore_ascii_case(policy.as_str())
                || s.trim_start_matches(['v', 'V']) == policy.version()
        })
    }
}

impl fmt::Display for PolicyVariant {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known policy.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown policy '{0}' (expected threshold, additive or max-with-reason)")]
pub struct UnknownPolicyError(String);

impl FromStr for PolicyVariant {
    type Err = UnknownPolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownPolicyError(s.to_string()))
    }
}
