//! Refund engine for travel-package cancellations.
//!
//! Given the package cost, the amount paid, the Trip Protection Plan (TPP)
//! cost and the deposit, the engine works out how much the provider keeps and
//! how much goes back to the client.
//!
//! # Calculation Steps
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Parse the four amounts (all required) |
//! | 2    | Reject any negative amount |
//! | 3    | Round each amount to cents (`MaxWithReason` only) |
//! | 4    | 20% of package cost |
//! | 5    | Non-refundable base, chosen by [`PolicyVariant`] |
//! | 6    | Non-refundable amount (step 5 rounded to cents) |
//! | 7    | Refund due (amount paid - step 6, minimum 0) |
//!
//! Steps 4, 6 and 7 are each rounded half-up to cents before the next step
//! uses them. A derived amount too large to carry cents is an overflow.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use refund_core::{PolicyVariant, RefundEngine, RefundInputs, TieBreak};
//!
//! let inputs = RefundInputs::new(dec!(1000), dec!(900), dec!(50), dec!(300));
//!
//! let engine = RefundEngine::new(PolicyVariant::MaxWithReason);
//! let result = engine.compute(&inputs).unwrap();
//!
//! assert_eq!(result.twenty_percent, dec!(200.00));
//! assert_eq!(result.non_refundable, dec!(350.00));
//! assert_eq!(result.refund_due, dec!(550.00));
//! assert_eq!(result.tie_break, Some(TieBreak::Deposit));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use crate::calculations::common::{max, non_negative, to_cents};
use crate::parse::parse_amount;
use crate::{
    AmountField, PolicyVariant, RawRefundInputs, RefundCalculation, RefundInputs, RefundResult,
    TieBreak,
};

/// Message shown for any input the engine refuses.
pub const INVALID_INPUT_MESSAGE: &str = "Please enter valid non-negative numeric values.";

/// Errors that can occur during a refund calculation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RefundError {
    /// A field was empty or not a number.
    #[error("{field} is not a valid number: '{input}'")]
    Parse { field: AmountField, input: String },

    /// A field parsed but was below zero.
    #[error("{field} cannot be negative: {value}")]
    Negative { field: AmountField, value: Decimal },

    /// An amount was too large for the decimal type.
    #[error("arithmetic overflow while computing {0}")]
    Overflow(&'static str),
}

impl RefundError {
    /// Parse and sign failures are the same thing to a user: bad input.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::Parse { .. } | Self::Negative { .. })
    }

    pub fn user_message(&self) -> String {
        if self.is_invalid_input() {
            INVALID_INPUT_MESSAGE.to_string()
        } else {
            format!("An unexpected error occurred: {self}")
        }
    }
}

/// Computes a refund under the given policy.
///
/// Shorthand for `RefundEngine::new(policy).compute(inputs)`.
pub fn compute(
    inputs: &RefundInputs,
    policy: PolicyVariant,
) -> Result<RefundResult, RefundError> {
    RefundEngine::new(policy).compute(inputs)
}

/// Calculator for refunds under one [`PolicyVariant`].
///
/// The engine holds no state between calls; computing twice with the same
/// inputs gives the same result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefundEngine {
    policy: PolicyVariant,
}

impl RefundEngine {
    pub fn new(policy: PolicyVariant) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> PolicyVariant {
        self.policy
    }

    /// Computes the refund for already-parsed amounts.
    ///
    /// # Errors
    ///
    /// Returns [`RefundError::Negative`] for the first negative amount in form
    /// order, or [`RefundError::Overflow`] if an intermediate sum does not fit
    /// in a [`Decimal`].
    pub fn compute(
        &self,
        inputs: &RefundInputs,
    ) -> Result<RefundResult, RefundError> {
        let inputs = self.validate(inputs)?;

        let twenty_percent = self.twenty_percent(inputs.total_cost)?;

        let (base, tie_break) =
            self.non_refundable_base(inputs.tpp, inputs.deposit, twenty_percent)?;
        let non_refundable =
            to_cents(base).ok_or(RefundError::Overflow("non-refundable amount"))?;

        let refund_due = self.refund_due(inputs.amount_paid, non_refundable)?;

        debug!(
            policy = %self.policy,
            %twenty_percent,
            %non_refundable,
            %refund_due,
            tie_break = ?tie_break,
            "refund computed"
        );

        Ok(RefundResult {
            policy: self.policy,
            total_cost: inputs.total_cost,
            amount_paid: inputs.amount_paid,
            tpp: inputs.tpp,
            deposit: inputs.deposit,
            twenty_percent,
            non_refundable,
            refund_due,
            tie_break,
            is_zero_refund: refund_due.is_zero(),
        })
    }

    /// Parses the four typed amounts and computes the refund.
    ///
    /// # Errors
    ///
    /// Returns [`RefundError::Parse`] for the first field that is empty or not
    /// numeric, then behaves as [`RefundEngine::compute`].
    pub fn compute_raw(
        &self,
        raw: &RawRefundInputs,
    ) -> Result<RefundResult, RefundError> {
        let inputs = Self::parse_inputs(raw)?;
        self.compute(&inputs)
    }

    /// Like [`RefundEngine::compute_raw`], stamping the result with the current time.
    pub fn calculate(
        &self,
        raw: &RawRefundInputs,
    ) -> Result<RefundCalculation, RefundError> {
        self.compute_raw(raw).map(RefundCalculation::stamp)
    }

    /// Parses all four fields, failing on the first bad one.
    pub fn parse_inputs(raw: &RawRefundInputs) -> Result<RefundInputs, RefundError> {
        Ok(RefundInputs {
            total_cost: parse_amount(AmountField::TotalCost, &raw.total_cost)?,
            amount_paid: parse_amount(AmountField::AmountPaid, &raw.amount_paid)?,
            tpp: parse_amount(AmountField::Tpp, &raw.tpp)?,
            deposit: parse_amount(AmountField::Deposit, &raw.deposit)?,
        })
    }

    /// Rejects negative amounts. Under `MaxWithReason` the amounts are then
    /// rounded to cents; the other policies compute with them as given.
    fn validate(
        &self,
        inputs: &RefundInputs,
    ) -> Result<RefundInputs, RefundError> {
        if let Some(field) = AmountField::ALL
            .into_iter()
            .find(|field| inputs.get(*field) < Decimal::ZERO)
        {
            let value = inputs.get(field);
            tracing::warn!(field = %field, %value, "negative amount rejected");
            return Err(RefundError::Negative { field, value });
        }

        if self.policy != PolicyVariant::MaxWithReason {
            return Ok(*inputs);
        }

        let cents = |field: AmountField| {
            to_cents(inputs.get(field)).ok_or(RefundError::Overflow(field.label()))
        };
        Ok(RefundInputs {
            total_cost: cents(AmountField::TotalCost)?,
            amount_paid: cents(AmountField::AmountPaid)?,
            tpp: cents(AmountField::Tpp)?,
            deposit: cents(AmountField::Deposit)?,
        })
    }

    /// Calculates 20% of the package cost.
    fn twenty_percent(
        &self,
        total_cost: Decimal,
    ) -> Result<Decimal, RefundError> {
        total_cost
            .checked_mul(Decimal::new(20, 2))
            .and_then(to_cents)
            .ok_or(RefundError::Overflow("20% of package cost"))
    }

    /// Calculates the unrounded non-refundable amount for the active policy.
    fn non_refundable_base(
        &self,
        tpp: Decimal,
        deposit: Decimal,
        twenty_percent: Decimal,
    ) -> Result<(Decimal, Option<TieBreak>), RefundError> {
        let (retained, tie_break) = match self.policy {
            PolicyVariant::Threshold => {
                if deposit >= twenty_percent {
                    (deposit, None)
                } else {
                    (twenty_percent, None)
                }
            }
            PolicyVariant::Additive => (twenty_percent, None),
            PolicyVariant::MaxWithReason => (
                max(deposit, twenty_percent),
                Some(self.tie_break(deposit, twenty_percent)),
            ),
        };

        tpp.checked_add(retained)
            .map(|base| (base, tie_break))
            .ok_or(RefundError::Overflow("non-refundable amount"))
    }

    /// Reports which of deposit and 20% is larger.
    fn tie_break(
        &self,
        deposit: Decimal,
        twenty_percent: Decimal,
    ) -> TieBreak {
        match deposit.cmp(&twenty_percent) {
            std::cmp::Ordering::Greater => TieBreak::Deposit,
            std::cmp::Ordering::Less => TieBreak::TwentyPercent,
            std::cmp::Ordering::Equal => TieBreak::Equal,
        }
    }

    /// Calculates the refund due (amount paid minus non-refundable, minimum 0).
    fn refund_due(
        &self,
        amount_paid: Decimal,
        non_refundable: Decimal,
    ) -> Result<Decimal, RefundError> {
        amount_paid
            .checked_sub(non_refundable)
            .and_then(|shortfall| to_cents(non_negative(shortfall)))
            .ok_or(RefundError::Overflow("refund due"))
    }
}
