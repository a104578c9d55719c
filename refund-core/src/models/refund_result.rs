use std::fmt;

use chrono::{DateTime, Local};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::PolicyVariant;

/// Which amount set the non-refundable portion under the max-with-reason policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// The deposit was larger than 20% of the package cost.
    Deposit,
    /// 20% of the package cost was larger than the deposit.
    TwentyPercent,
    /// Both amounts were the same.
    Equal,
}

impl TieBreak {
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Deposit => "Deposit used",
            Self::TwentyPercent => "20% used",
            Self::Equal => "equal",
        }
    }
}

impl fmt::Display for TieBreak {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.reason())
    }
}

/// Outcome of a single refund computation.
///
/// The inputs are echoed back after cent rounding so a summary can be built
/// from the result alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefundResult {
    /// Policy the figures were computed under.
    pub policy: PolicyVariant,

    pub total_cost: Decimal,
    pub amount_paid: Decimal,
    pub tpp: Decimal,
    pub deposit: Decimal,

    /// 20% of the package cost, rounded to cents.
    pub twenty_percent: Decimal,

    /// Portion of the payment the provider keeps.
    pub non_refundable: Decimal,

    /// Amount owed back to the client, never below zero.
    pub refund_due: Decimal,

    /// Set only by [`PolicyVariant::MaxWithReason`].
    pub tie_break: Option<TieBreak>,

    /// True when nothing is owed back, so the caller can explain why.
    pub is_zero_refund: bool,
}

impl RefundResult {
    pub fn tie_break_reason(&self) -> Option<&'static str> {
        self.tie_break.as_ref().map(TieBreak::reason)
    }
}

/// A [`RefundResult`] stamped with the moment it was produced.
///
/// The timestamp is for display only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefundCalculation {
    #[serde(flatten)]
    pub result: RefundResult,
    pub calculated_at: DateTime<Local>,
}

impl RefundCalculation {
    pub fn stamp(result: RefundResult) -> Self {
        Self {
            result,
            calculated_at: Local::now(),
        }
    }
}
