pub mod calculations;
pub mod models;
pub mod parse;

pub use calculations::{RefundEngine, RefundError, compute};
pub use models::*;
