//! Request types for the Income Tax Engine API.
//!
//! This module defines the JSON request structure for the `/calculate` endpoint.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::dependant_medical_credit;
use crate::config::TaxYearPolicy;
use crate::error::EngineResult;
use crate::models::TaxCalculationInput;

/// Request body for the `/calculate` endpoint.
///
/// Carries the taxpayer's figures as captured by the entry form or document
/// extraction, plus optional selectors for the tax year and PAYE withheld.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// Tax year label (e.g., "2025/26"). Takes precedence over `assessment_date`.
    #[serde(default)]
    pub tax_year: Option<String>,
    /// A date inside the tax year to use, when `tax_year` is absent.
    #[serde(default)]
    pub assessment_date: Option<NaiveDate>,
    /// Total annual gross remuneration.
    pub gross_income: Decimal,
    /// Retirement fund contributions.
    #[serde(default)]
    pub retirement_contrib: Decimal,
    /// Medical scheme contributions.
    #[serde(default)]
    pub medical_contrib: Decimal,
    /// Additional medical tax credits already computed by the caller.
    #[serde(default)]
    pub medical_credits: Decimal,
    /// Number of dependants on the taxpayer's medical scheme.
    #[serde(default)]
    pub medical_dependants: u32,
    /// UIF contributions.
    #[serde(default)]
    pub uif_contrib: Decimal,
    /// The taxpayer's age.
    pub age: i32,
    /// PAYE withheld according to the IRP5, used for the refund assessment.
    #[serde(default)]
    pub paye_withheld: Option<Decimal>,
}

impl CalculationRequest {
    /// Builds the engine input for `policy`.
    ///
    /// The figures are validated as submitted. Dependants are then converted
    /// into credits at the policy's rates and added to any credits the
    /// caller supplied.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidInput`](crate::error::EngineError::InvalidInput)
    /// for any submitted amount or age out of range.
    pub fn to_input(&self, policy: &TaxYearPolicy) -> EngineResult<TaxCalculationInput> {
        let submitted = TaxCalculationInput::new(self.gross_income, self.age)
            .with_retirement_contrib(self.retirement_contrib)
            .with_medical_contrib(self.medical_contrib)
            .with_medical_credits(self.medical_credits)
            .with_uif_contrib(self.uif_contrib);
        submitted.validate()?;

        let dependant_credits =
            dependant_medical_credit(&policy.medical_credits, self.medical_dependants);

        Ok(submitted.with_medical_credits(self.medical_credits + dependant_credits))
    }
}
