//! Age-based rebates.
//!
//! Rebates under section 6 of the Income Tax Act accumulate: every taxpayer
//! gets the primary rebate, taxpayers aged 65 and over add the secondary
//! rebate, and those aged 75 and over add the tertiary rebate as well.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::config::{Rebates, TaxYearPolicy};

/// The clause reference for rebates.
pub const REBATES_CLAUSE: &str = "s6(2)";

/// Age from which the secondary rebate applies.
pub const SECONDARY_REBATE_AGE: i32 = 65;

/// Age from which the tertiary rebate applies.
pub const TERTIARY_REBATE_AGE: i32 = 75;

/// The rebates applicable to one taxpayer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeRebates {
    /// Primary rebate.
    pub primary: Decimal,
    /// Secondary rebate, or zero.
    pub secondary: Decimal,
    /// Tertiary rebate, or zero.
    pub tertiary: Decimal,
}

impl AgeRebates {
    /// Returns the sum of all applicable tiers.
    pub fn total(&self) -> Decimal {
        self.primary + self.secondary + self.tertiary
    }
}

/// Selects the rebate tiers that apply at `age`.
///
/// # Examples
///
/// ```
/// use tax_engine::calculation::age_rebates;
/// use tax_engine::config::Rebates;
/// use rust_decimal::Decimal;
///
/// let rebates = Rebates {
///     primary: Decimal::from(17_235),
///     secondary: Decimal::from(9_444),
///     tertiary: Decimal::from(3_145),
/// };
///
/// assert_eq!(age_rebates(40, &rebates).total(), Decimal::from(17_235));
/// assert_eq!(age_rebates(70, &rebates).total(), Decimal::from(26_679));
/// assert_eq!(age_rebates(80, &rebates).total(), Decimal::from(29_824));
/// ```
pub fn age_rebates(age: i32, rebates: &Rebates) -> AgeRebates {
    AgeRebates {
        primary: rebates.primary,
        secondary: if age >= SECONDARY_REBATE_AGE {
            rebates.secondary
        } else {
            Decimal::ZERO
        },
        tertiary: if age >= TERTIARY_REBATE_AGE {
            rebates.tertiary
        } else {
            Decimal::ZERO
        },
    }
}

/// Returns the published SARS tax threshold for `age`.
///
/// This is the point where first-bracket tax equals the applicable
/// rebates, rounded half-up to cents. Medical tax credits are not counted,
/// matching the published figures. Returns `None` when the first bracket
/// has a zero rate, since no threshold exists then.
pub fn tax_threshold(policy: &TaxYearPolicy, age: i32) -> Option<Decimal> {
    let first_rate = policy.brackets.first()?.rate;
    if first_rate.is_zero() {
        return None;
    }

    let threshold = age_rebates(age, &policy.rebates).total() / first_rate;
    Some(threshold.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}
