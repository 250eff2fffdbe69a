//! Retirement contribution deduction.
//!
//! This module caps deductible retirement fund contributions as per
//! section 11F of the Income Tax Act: the lesser of a percentage of income
//! and an absolute annual cap.

use rust_decimal::Decimal;

use crate::config::RetirementDeduction;

/// The clause reference for the retirement deduction.
pub const RETIREMENT_DEDUCTION_CLAUSE: &str = "s11F";

/// Returns the most that may be deducted for the year.
///
/// `min(gross_income × rate_pct / 100, cap)`
///
/// # Examples
///
/// ```
/// use tax_engine::calculation::retirement_deduction_limit;
/// use tax_engine::config::RetirementDeduction;
/// use rust_decimal::Decimal;
///
/// let limits = RetirementDeduction {
///     rate_pct: Decimal::new(275, 1),
///     cap: Decimal::from(350_000),
/// };
///
/// assert_eq!(
///     retirement_deduction_limit(Decimal::from(850_000), &limits),
///     Decimal::from(233_750)
/// );
/// assert_eq!(
///     retirement_deduction_limit(Decimal::from(2_000_000), &limits),
///     Decimal::from(350_000)
/// );
/// ```
pub fn retirement_deduction_limit(gross_income: Decimal, limits: &RetirementDeduction) -> Decimal {
    let by_rate = gross_income * limits.rate_pct / Decimal::ONE_HUNDRED;
    by_rate.min(limits.cap)
}

/// Returns the deductible part of `contributions`.
///
/// Contributions above the limit are not deductible and are not carried
/// forward to later years.
pub fn retirement_deduction(
    gross_income: Decimal,
    contributions: Decimal,
    limits: &RetirementDeduction,
) -> Decimal {
    contributions.min(retirement_deduction_limit(gross_income, limits))
}
