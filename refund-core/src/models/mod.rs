mod policy_variant;
mod refund_inputs;
mod refund_result;

pub use policy_variant::{PolicyVariant, UnknownPolicyError};
pub use refund_inputs::{AmountField, RawRefundInputs, RefundInputs};
pub use refund_result::{RefundCalculation, RefundResult, TieBreak};
