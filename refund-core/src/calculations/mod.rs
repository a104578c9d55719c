//! Refund calculation modules.
//!
//! This module provides the refund engine and the shared decimal helpers it
//! uses for currency arithmetic.

pub mod common;
pub mod engine;

pub use engine::{RefundEngine, RefundError, compute};
