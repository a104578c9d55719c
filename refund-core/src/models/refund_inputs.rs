use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One of the four amounts a refund is computed from, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmountField {
    TotalCost,
    AmountPaid,
    Tpp,
    Deposit,
}

impl AmountField {
    pub const ALL: [AmountField; 4] = [
        Self::TotalCost,
        Self::AmountPaid,
        Self::Tpp,
        Self::Deposit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::TotalCost => "Total Trip Booking Cost",
            Self::AmountPaid => "Amount Client Paid",
            Self::Tpp => "TPP Amount",
            Self::Deposit => "Deposit Amount",
        }
    }
}

impl fmt::Display for AmountField {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parsed refund inputs in dollars.
///
/// Values are not validated on construction; the engine rejects negatives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefundInputs {
    /// Cost of the occupancy packages, excluding any TPP.
    pub total_cost: Decimal,
    /// Amount the client has paid so far.
    pub amount_paid: Decimal,
    /// Total Trip Protection Plan cost.
    pub tpp: Decimal,
    /// Deposit from the client's payment plan.
    pub deposit: Decimal,
}

impl RefundInputs {
    pub fn new(
        total_cost: Decimal,
        amount_paid: Decimal,
        tpp: Decimal,
        deposit: Decimal,
    ) -> Self {
        Self {
            total_cost,
            amount_paid,
            tpp,
            deposit,
        }
    }

    pub fn get(
        &self,
        field: AmountField,
    ) -> Decimal {
        match field {
            AmountField::TotalCost => self.total_cost,
            AmountField::AmountPaid => self.amount_paid,
            AmountField::Tpp => self.tpp,
            AmountField::Deposit => self.deposit,
        }
    }
}

/// The four amounts exactly as typed, before parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRefundInputs {
    pub total_cost: String,
    pub amount_paid: String,
    pub tpp: String,
    pub deposit: String,
}

impl RawRefundInputs {
    pub fn new(
        total_cost: impl Into<String>,
        amount_paid: impl Into<String>,
        tpp: impl Into<String>,
        deposit: impl Into<String>,
    ) -> Self {
        Self {
            total_cost: total_cost.into(),
            amount_paid: amount_paid.into(),
            tpp: tpp.into(),
            deposit: deposit.into(),
        }
    }

    pub fn get(
        &self,
        field: AmountField,
    ) -> &str {
        match field {
            AmountField::TotalCost => &self.total_cost,
            AmountField::AmountPaid => &self.amount_paid,
            AmountField::Tpp => &self.tpp,
            AmountField::Deposit => &self.deposit,
        }
    }

    pub fn get_mut(
        &mut self,
        field: AmountField,
    ) -> &mut String {
        match field {
            AmountField::TotalCost => &mut self.total_cost,
            AmountField::AmountPaid => &mut self.amount_paid,
            AmountField::Tpp => &mut self.tpp,
            AmountField::Deposit => &mut self.deposit,
        }
    }
}
