//! Calculation logic for the Income Tax Engine.
//!
//! This module contains the tax engine and its building blocks: the capped
//! retirement deduction, progressive bracket stacking, age rebates, medical
//! scheme fees tax credits, the refund assessment, and the audit narration
//! consumed by report generation.

mod brackets;
mod engine;
mod medical_credits;
mod narration;
mod rebates;
mod retirement_deduction;

pub use brackets::{BRACKET_TAX_CLAUSE, bracket_tax, marginal_rate};
pub use engine::{assess_refund, calculate, round_half_up};
pub use medical_credits::{
    MEDICAL_CREDITS_CLAUSE, dependant_medical_credit, medical_scheme_fees_credit,
    medical_tax_credits,
};
pub use narration::{calculation_warnings, narrate_audit_steps};
pub use rebates::{
    AgeRebates, REBATES_CLAUSE, SECONDARY_REBATE_AGE, TERTIARY_REBATE_AGE, age_rebates,
    tax_threshold,
};
pub use retirement_deduction::{
    RETIREMENT_DEDUCTION_CLAUSE, retirement_deduction, retirement_deduction_limit,
};
