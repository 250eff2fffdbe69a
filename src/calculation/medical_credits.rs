//! Medical scheme fees tax credits.
//!
//! Credits under section 6A are fixed monthly amounts that reduce tax
//! directly. The engine always grants twelve months of the main-member
//! credit and adds whatever further credits the caller supplies;
//! [`dependant_medical_credit`] helps callers derive the dependants' share
//! from a head count.

use rust_decimal::Decimal;

use crate::config::MedicalCredits;

/// The clause reference for medical scheme fees tax credits.
pub const MEDICAL_CREDITS_CLAUSE: &str = "s6A";

const MONTHS_PER_YEAR: u32 = 12;

/// Returns the annual credit for the taxpayer's dependants.
///
/// The first dependant earns the first-dependant rate and every further
/// dependant the additional rate, each for twelve months.
///
/// # Examples
///
/// ```
/// use tax_engine::calculation::dependant_medical_credit;
/// use tax_engine::config::MedicalCredits;
/// use rust_decimal::Decimal;
///
/// let credits = MedicalCredits {
///     main_member: Decimal::from(364),
///     first_dependant: Decimal::from(364),
///     additional_dependant: Decimal::from(246),
/// };
///
/// // 364 × 12 + 2 × 246 × 12
/// assert_eq!(dependant_medical_credit(&credits, 3), Decimal::from(10_272));
/// ```
pub fn dependant_medical_credit(credits: &MedicalCredits, dependants: u32) -> Decimal {
    if dependants == 0 {
        return Decimal::ZERO;
    }

    let months = Decimal::from(MONTHS_PER_YEAR);
    let additional = Decimal::from(dependants - 1);
    (credits.first_dependant + credits.additional_dependant * additional) * months
}

/// Returns the full annual section 6A credit for a member with `dependants`.
pub fn medical_scheme_fees_credit(credits: &MedicalCredits, dependants: u32) -> Decimal {
    credits.main_member * Decimal::from(MONTHS_PER_YEAR)
        + dependant_medical_credit(credits, dependants)
}

/// Returns the medical tax credits applied by the engine.
///
/// Twelve months of the main-member credit plus `additional_credits`
/// exactly as supplied.
pub fn medical_tax_credits(additional_credits: Decimal, credits: &MedicalCredits) -> Decimal {
    medical_scheme_fees_credit(credits, 0) + additional_credits
}
