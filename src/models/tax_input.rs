//! Taxpayer input model.
//!
//! This module defines the [`TaxCalculationInput`] record produced by manual
//! entry forms, document extraction, or API callers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Largest amount, in Rand, accepted for any currency field.
///
/// Keeps every intermediate product of the calculation well inside
/// `Decimal`'s range.
pub const MAX_AMOUNT: i64 = 1_000_000_000_000;

/// Checks a currency amount lies in `0..=MAX_AMOUNT`.
pub(crate) fn check_amount(field: &str, value: Decimal) -> EngineResult<()> {
    if value < Decimal::ZERO {
        return Err(EngineError::InvalidInput {
            field: field.to_string(),
            message: format!("must not be negative, got {}", value),
        });
    }

    if value > Decimal::from(MAX_AMOUNT) {
        return Err(EngineError::InvalidInput {
            field: field.to_string(),
            message: format!("must not exceed {}, got {}", MAX_AMOUNT, value),
        });
    }

    Ok(())
}

/// A taxpayer's annual income and contributions for one tax year.
///
/// All currency amounts are in Rand. Contribution fields default to zero
/// when absent from serialized input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxCalculationInput {
    /// Total annual gross remuneration (IRP5 gross).
    pub gross_income: Decimal,
    /// Contributions to pension, provident and retirement annuity funds.
    #[serde(default)]
    pub retirement_contrib: Decimal,
    /// Contributions to a registered medical scheme.
    #[serde(default)]
    pub medical_contrib: Decimal,
    /// Additional medical tax credits supplied by the caller (dependants, excess expenses).
    #[serde(default)]
    pub medical_credits: Decimal,
    /// Unemployment Insurance Fund contributions.
    #[serde(default)]
    pub uif_contrib: Decimal,
    /// The taxpayer's age at the end of the tax year.
    pub age: i32,
}

impl TaxCalculationInput {
    /// Creates an input with the given gross income and age and no contributions.
    ///
    /// # Examples
    ///
    /// ```
    /// use tax_engine::models::TaxCalculationInput;
    /// use rust_decimal::Decimal;
    ///
    /// let input = TaxCalculationInput::new(Decimal::from(450_000), 42)
    ///     .with_retirement_contrib(Decimal::from(30_000));
    /// assert_eq!(input.medical_contrib, Decimal::ZERO);
    /// assert!(input.validate().is_ok());
    /// ```
    pub fn new(gross_income: Decimal, age: i32) -> Self {
        Self {
            gross_income,
            retirement_contrib: Decimal::ZERO,
            medical_contrib: Decimal::ZERO,
            medical_credits: Decimal::ZERO,
            uif_contrib: Decimal::ZERO,
            age,
        }
    }

    /// Sets the retirement fund contributions.
    pub fn with_retirement_contrib(mut self, amount: Decimal) -> Self {
        self.retirement_contrib = amount;
        self
    }

    /// Sets the medical scheme contributions.
    pub fn with_medical_contrib(mut self, amount: Decimal) -> Self {
        self.medical_contrib = amount;
        self
    }

    /// Sets the additional caller-supplied medical tax credits.
    pub fn with_medical_credits(mut self, amount: Decimal) -> Self {
        self.medical_credits = amount;
        self
    }

    /// Sets the UIF contributions.
    pub fn with_uif_contrib(mut self, amount: Decimal) -> Self {
        self.uif_contrib = amount;
        self
    }

    /// Checks every field is within its domain.
    ///
    /// Out-of-range values are reported, never clamped.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidInput`] naming the first amount that is
    /// negative or above [`MAX_AMOUNT`], or the age if it is negative.
    pub fn validate(&self) -> EngineResult<()> {
        let amounts = [
            ("gross_income", self.gross_income),
            ("retirement_contrib", self.retirement_contrib),
            ("medical_contrib", self.medical_contrib),
            ("medical_credits", self.medical_credits),
            ("uif_contrib", self.uif_contrib),
        ];

        for (field, value) in amounts {
            check_amount(field, value)?;
        }

        if self.age < 0 {
            return Err(EngineError::InvalidInput {
                field: "age".to_string(),
                message: format!("must not be negative, got {}", self.age),
            });
        }

        Ok(())
    }
}
