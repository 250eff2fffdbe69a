//! Core data models for the Income Tax Engine.
//!
//! This module contains the input, result and audit models used
//! throughout the engine.

mod calculation_result;
mod tax_input;

pub use calculation_result::{
    AuditStep, AuditTrace, AuditWarning, RefundAssessment, TaxCalculationResult,
};
pub use tax_input::{MAX_AMOUNT, TaxCalculationInput};

pub(crate) use tax_input::check_amount;
