//! Progressive bracket tax.
//!
//! This module applies a tax-year bracket table to taxable income. Each
//! bracket taxes only the slice of income that falls inside it, so moving
//! into a higher bracket never raises the tax on income below it.

use rust_decimal::Decimal;

use crate::config::TaxBracket;

/// The clause reference for the rates of normal tax.
pub const BRACKET_TAX_CLAUSE: &str = "s5(2)";

/// Computes tax on `taxable_income` by stacking brackets in ascending order.
///
/// Brackets are expected to be contiguous and start at zero, which
/// [`TaxYearPolicy::validate`](crate::config::TaxYearPolicy::validate) guarantees.
///
/// # Examples
///
/// ```
/// use tax_engine::calculation::bracket_tax;
/// use tax_engine::config::TaxBracket;
/// use rust_decimal::Decimal;
///
/// let brackets = vec![
///     TaxBracket {
///         lower_bound: Decimal::ZERO,
///         upper_bound: Some(Decimal::from(237_100)),
///         rate: Decimal::new(18, 2),
///     },
///     TaxBracket {
///         lower_bound: Decimal::from(237_100),
///         upper_bound: Some(Decimal::from(370_500)),
///         rate: Decimal::new(26, 2),
///     },
///     TaxBracket {
///         lower_bound: Decimal::from(370_500),
///         upper_bound: None,
///         rate: Decimal::new(31, 2),
///     },
/// ];
///
/// // 237100 × 0.18 + (300000 − 237100) × 0.26
/// assert_eq!(bracket_tax(Decimal::from(300_000), &brackets), Decimal::from(59_032));
/// ```
pub fn bracket_tax(taxable_income: Decimal, brackets: &[TaxBracket]) -> Decimal {
    let mut tax = Decimal::ZERO;

    for bracket in brackets {
        if taxable_income <= bracket.lower_bound {
            break;
        }

        let top = bracket
            .upper_bound
            .map_or(taxable_income, |upper| upper.min(taxable_income));
        tax += (top - bracket.lower_bound) * bracket.rate;
    }

    tax
}

/// Returns the rate of the bracket containing `taxable_income`, in percent.
///
/// Zero taxable income reports 100.
pub fn marginal_rate(taxable_income: Decimal, brackets: &[TaxBracket]) -> Decimal {
    if taxable_income.is_zero() {
        return Decimal::ONE_HUNDRED;
    }

    brackets
        .iter()
        .find(|b| b.reaches(taxable_income))
        .or_else(|| brackets.last())
        .map(|b| (b.rate * Decimal::ONE_HUNDRED).normalize())
        .unwrap_or(Decimal::ZERO)
}
