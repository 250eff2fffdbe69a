//! The income tax calculation.
//!
//! [`calculate`] maps one taxpayer's input and one tax-year policy to a
//! complete [`TaxCalculationResult`]. It is deterministic and holds no
//! state, so it may be called concurrently against a shared policy.

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use crate::config::TaxYearPolicy;
use crate::error::EngineResult;
use crate::models::{RefundAssessment, TaxCalculationInput, TaxCalculationResult, check_amount};

use super::brackets::{bracket_tax, marginal_rate};
use super::medical_credits::medical_tax_credits;
use super::rebates::age_rebates;
use super::retirement_deduction::retirement_deduction;

/// Rounds a decimal value to two decimal places using half-up rounding.
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Calculates income tax for one taxpayer under one tax-year policy.
///
/// # Algorithm
///
/// 1. Cap retirement contributions at `min(gross × rate_pct, cap)`.
/// 2. Taxable income is gross income less that deduction, floored at zero.
/// 3. Stack the brackets over taxable income.
/// 4. Subtract the age rebates and medical tax credits, flooring at zero.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`](crate::error::EngineError::InvalidInput)
/// when gross income or any contribution is negative or above
/// [`MAX_AMOUNT`](crate::models::MAX_AMOUNT), or the age is negative.
/// Nothing is clamped.
///
/// # Examples
///
/// ```no_run
/// use tax_engine::calculation::calculate;
/// use tax_engine::config::ConfigLoader;
/// use tax_engine::models::TaxCalculationInput;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/za")?;
/// let policy = loader.policy("2025/26")?;
///
/// let input = TaxCalculationInput::new(Decimal::from(850_000), 35)
///     .with_retirement_contrib(Decimal::from(100_000));
/// let result = calculate(&input, policy)?;
///
/// assert_eq!(result.taxable_income, Decimal::from(750_000));
/// assert_eq!(result.total_tax, Decimal::from(187_574));
/// # Ok::<(), tax_engine::error::EngineError>(())
/// ```
pub fn calculate(
    input: &TaxCalculationInput,
    policy: &TaxYearPolicy,
) -> EngineResult<TaxCalculationResult> {
    input.validate()?;

    let gross_income = input.gross_income;
    let deduction = retirement_deduction(gross_income, input.retirement_contrib, &policy.retirement);
    let taxable_income = (gross_income - deduction).max(Decimal::ZERO);

    let income_tax = bracket_tax(taxable_income, &policy.brackets);
    let rebates = age_rebates(input.age, &policy.rebates);
    let medical = medical_tax_credits(input.medical_credits, &policy.medical_credits);

    let total_tax = (income_tax - rebates.total() - medical).max(Decimal::ZERO);

    let effective_rate = if gross_income > Decimal::ZERO {
        round_half_up(total_tax / gross_income * Decimal::ONE_HUNDRED)
    } else {
        Decimal::ZERO
    };

    debug!(
        tax_year = %policy.tax_year,
        taxable_income = %taxable_income,
        income_tax = %income_tax,
        total_tax = %total_tax,
        "Calculated income tax"
    );

    Ok(TaxCalculationResult {
        tax_year: policy.tax_year.clone(),
        gross_income: gross_income.normalize(),
        retirement_deduction: deduction.normalize(),
        taxable_income: taxable_income.normalize(),
        income_tax: income_tax.normalize(),
        primary_rebate: rebates.primary.normalize(),
        secondary_rebate: rebates.secondary.normalize(),
        tertiary_rebate: rebates.tertiary.normalize(),
        total_rebates: rebates.total().normalize(),
        medical_tax_credits: medical.normalize(),
        total_tax: total_tax.normalize(),
        marginal_rate: marginal_rate(taxable_income, &policy.brackets),
        effective_rate: effective_rate.normalize(),
    })
}

/// Compares PAYE withheld against the engine's final liability.
///
/// Always uses `result.total_tax` so the assessment matches the figure
/// narrated in the audit trail.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`](crate::error::EngineError::InvalidInput)
/// when `paye_withheld` is negative or above the amount ceiling.
pub fn assess_refund(
    result: &TaxCalculationResult,
    paye_withheld: Decimal,
) -> EngineResult<RefundAssessment> {
    check_amount("paye_withheld", paye_withheld)?;

    let refund_or_owing = paye_withheld - result.total_tax;

    Ok(RefundAssessment {
        paye_withheld,
        total_tax: result.total_tax,
        refund_or_owing,
        is_refund: refund_or_owing > Decimal::ZERO,
    })
}
