//! Configuration types for tax-year policies.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files, along with the
//! load-time validation that guards every policy table.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Metadata about the tax jurisdiction.
///
/// Contains identifying information about the revenue authority whose
/// tables are loaded, and where the published figures come from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JurisdictionMetadata {
    /// The revenue authority code (e.g., "SARS").
    pub code: String,
    /// The human-readable name of the authority.
    pub name: String,
    /// ISO currency code of all monetary amounts (e.g., "ZAR").
    pub currency: String,
    /// URL to the official rate tables.
    pub source_url: String,
}

/// A single progressive tax bracket.
///
/// Income between `lower_bound` and `upper_bound` is taxed at `rate`.
/// The top bracket has no upper bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// The income at which this bracket starts.
    pub lower_bound: Decimal,
    /// The income at which this bracket ends, or `None` for the top bracket.
    #[serde(default)]
    pub upper_bound: Option<Decimal>,
    /// The rate applied to income inside this bracket, as a fraction (0.18 = 18%).
    pub rate: Decimal,
}

impl TaxBracket {
    /// Returns true if `income` falls at or below this bracket's upper bound.
    ///
    /// Callers walk brackets in ascending order, so the first bracket for
    /// which this holds is the one containing `income`.
    pub fn reaches(&self, income: Decimal) -> bool {
        self.upper_bound.is_none_or(|upper| income <= upper)
    }
}

/// Age-based rebates deducted from tax before credits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rebates {
    /// Rebate available to every natural person.
    pub primary: Decimal,
    /// Additional rebate from age 65.
    pub secondary: Decimal,
    /// Additional rebate from age 75.
    pub tertiary: Decimal,
}

/// Monthly medical scheme fees tax credits (section 6A).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicalCredits {
    /// Monthly credit for the main member.
    pub main_member: Decimal,
    /// Monthly credit for the first dependant.
    pub first_dependant: Decimal,
    /// Monthly credit for each additional dependant.
    pub additional_dependant: Decimal,
}

/// Limits on the deductibility of retirement fund contributions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetirementDeduction {
    /// Maximum deductible share of gross income, in percent (e.g., 27.5).
    pub rate_pct: Decimal,
    /// Absolute annual cap on the deduction.
    pub cap: Decimal,
}

/// The complete rate table for one tax year.
///
/// Policies are immutable once loaded. Every policy passes [`validate`]
/// before the engine is allowed to calculate with it.
///
/// [`validate`]: TaxYearPolicy::validate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxYearPolicy {
    /// The tax year label (e.g., "2025/26").
    pub tax_year: String,
    /// First day of the tax year.
    pub effective_from: NaiveDate,
    /// Last day of the tax year.
    pub effective_to: NaiveDate,
    /// Progressive brackets in ascending order.
    pub brackets: Vec<TaxBracket>,
    /// Age-based rebates.
    pub rebates: Rebates,
    /// Medical scheme fees tax credits.
    pub medical_credits: MedicalCredits,
    /// Retirement contribution deduction limits.
    pub retirement: RetirementDeduction,
}

impl TaxYearPolicy {
    /// Returns true if `date` falls inside this tax year.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.effective_from <= date && date <= self.effective_to
    }

    /// Checks that the brackets partition `[0, ∞)` and that every amount is in range.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::PolicyConfiguration`] describing the first
    /// problem found: an empty table, a first bracket not starting at zero,
    /// a gap or overlap between neighbours, a bounded top bracket, an
    /// unbounded inner bracket, a rate outside `[0, 1]`, a rate lower than
    /// the bracket below it, or a negative rebate, credit or cap.
    pub fn validate(&self) -> EngineResult<()> {
        if self.effective_to < self.effective_from {
            return Err(self.invalid(format!(
                "effective_to {} is before effective_from {}",
                self.effective_to, self.effective_from
            )));
        }

        let first = self
            .brackets
            .first()
            .ok_or_else(|| self.invalid("no tax brackets defined".to_string()))?;
        if first.lower_bound != Decimal::ZERO {
            return Err(self.invalid(format!(
                "first bracket starts at {} instead of 0",
                first.lower_bound
            )));
        }

        let last_index = self.brackets.len() - 1;
        for (index, bracket) in self.brackets.iter().enumerate() {
            if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
                return Err(self.invalid(format!(
                    "bracket {} rate {} is outside 0..=1",
                    index + 1,
                    bracket.rate
                )));
            }

            match bracket.upper_bound {
                Some(upper) if upper <= bracket.lower_bound => {
                    return Err(self.invalid(format!(
                        "bracket {} upper bound {} is not above its lower bound {}",
                        index + 1,
                        upper,
                        bracket.lower_bound
                    )));
                }
                Some(_) if index == last_index => {
                    return Err(self.invalid(
                        "top bracket must be unbounded".to_string(),
                    ));
                }
                None if index != last_index => {
                    return Err(self.invalid(format!(
                        "bracket {} is unbounded but is not the top bracket",
                        index + 1
                    )));
                }
                _ => {}
            }
        }

        for (index, pair) in self.brackets.windows(2).enumerate() {
            let (lower, upper) = (&pair[0], &pair[1]);
            // Inner brackets are bounded, checked above.
            let boundary = lower.upper_bound.unwrap_or(Decimal::MAX);

            if upper.lower_bound > boundary {
                return Err(self.invalid(format!(
                    "gap between bracket {} (ends {}) and bracket {} (starts {})",
                    index + 1,
                    boundary,
                    index + 2,
                    upper.lower_bound
                )));
            }
            if upper.lower_bound < boundary {
                return Err(self.invalid(format!(
                    "bracket {} (starts {}) overlaps bracket {} (ends {})",
                    index + 2,
                    upper.lower_bound,
                    index + 1,
                    boundary
                )));
            }
            if upper.rate < lower.rate {
                return Err(self.invalid(format!(
                    "bracket {} rate {} is lower than bracket {} rate {}",
                    index + 2,
                    upper.rate,
                    index + 1,
                    lower.rate
                )));
            }
        }

        let amounts = [
            ("rebates.primary", self.rebates.primary),
            ("rebates.secondary", self.rebates.secondary),
            ("rebates.tertiary", self.rebates.tertiary),
            ("medical_credits.main_member", self.medical_credits.main_member),
            (
                "medical_credits.first_dependant",
                self.medical_credits.first_dependant,
            ),
            (
                "medical_credits.additional_dependant",
                self.medical_credits.additional_dependant,
            ),
            ("retirement.cap", self.retirement.cap),
        ];
        if let Some((name, value)) = amounts.iter().find(|(_, value)| *value < Decimal::ZERO) {
            return Err(self.invalid(format!("{} must not be negative, got {}", name, value)));
        }

        if self.retirement.rate_pct < Decimal::ZERO
            || self.retirement.rate_pct > Decimal::ONE_HUNDRED
        {
            return Err(self.invalid(format!(
                "retirement.rate_pct {} is outside 0..=100",
                self.retirement.rate_pct
            )));
        }

        Ok(())
    }

    fn invalid(&self, message: String) -> EngineError {
        EngineError::PolicyConfiguration {
            tax_year: self.tax_year.clone(),
            message,
        }
    }
}

/// Tax-year files all live under one jurisdiction.
#[derive(Debug, Clone)]
pub struct TaxConfig {
    /// Jurisdiction metadata.
    metadata: JurisdictionMetadata,
    /// Policies by tax year (sorted oldest first).
    policies: Vec<TaxYearPolicy>,
}

impl TaxConfig {
    /// Creates a new TaxConfig, validating every policy.
    ///
    /// Policies are sorted by `effective_from`. An empty list, duplicate
    /// labels and overlapping tax years are rejected along with malformed tables.
    pub fn new(
        metadata: JurisdictionMetadata,
        policies: Vec<TaxYearPolicy>,
    ) -> EngineResult<Self> {
        if policies.is_empty() {
            return Err(EngineError::PolicyConfiguration {
                tax_year: metadata.code.clone(),
                message: "no tax year policies supplied".to_string(),
            });
        }

        let mut sorted = policies;
        sorted.sort_by(|a, b| a.effective_from.cmp(&b.effective_from));

        for policy in &sorted {
            policy.validate()?;
        }

        for pair in sorted.windows(2) {
            if pair[0].tax_year == pair[1].tax_year {
                return Err(EngineError::PolicyConfiguration {
                    tax_year: pair[1].tax_year.clone(),
                    message: "tax year defined more than once".to_string(),
                });
            }
            if pair[1].effective_from <= pair[0].effective_to {
                return Err(EngineError::PolicyConfiguration {
                    tax_year: pair[1].tax_year.clone(),
                    message: format!("overlaps tax year {}", pair[0].tax_year),
                });
            }
        }

        Ok(Self {
            metadata,
            policies: sorted,
        })
    }

    /// Returns the jurisdiction metadata.
    pub fn jurisdiction(&self) -> &JurisdictionMetadata {
        &self.metadata
    }

    /// Returns all policies, oldest first.
    pub fn policies(&self) -> &[TaxYearPolicy] {
        &self.policies
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn bracket(lower: &str, upper: Option<&str>, rate: &str) -> TaxBracket {
        TaxBracket {
            lower_bound: dec(lower),
            upper_bound: upper.map(dec),
            rate: dec(rate),
        }
    }

    /// The published 2025/26 table, used across the calculation tests.
    pub(crate) fn policy_2025_26() -> TaxYearPolicy {
        TaxYearPolicy {
            tax_year: "2025/26".to_string(),
            effective_from: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            effective_to: NaiveDate::from_ymd_opt(2026, 2, 28).unwrap(),
            brackets: vec![
                bracket("0", Some("237100"), "0.18"),
                bracket("237100", Some("370500"), "0.26"),
                bracket("370500", Some("512800"), "0.31"),
                bracket("512800", Some("673000"), "0.36"),
                bracket("673000", Some("857900"), "0.39"),
                bracket("857900", Some("1817000"), "0.41"),
                bracket("1817000", None, "0.45"),
            ],
            rebates: Rebates {
                primary: dec("17235"),
                secondary: dec("9444"),
                tertiary: dec("3145"),
            },
            medical_credits: MedicalCredits {
                main_member: dec("364"),
                first_dependant: dec("364"),
                additional_dependant: dec("246"),
            },
            retirement: RetirementDeduction {
                rate_pct: dec("27.5"),
                cap: dec("350000"),
            },
        }
    }

    fn metadata() -> JurisdictionMetadata {
        JurisdictionMetadata {
            code: "SARS".to_string(),
            name: "South African Revenue Service".to_string(),
            currency: "ZAR".to_string(),
            source_url: "https://example.com".to_string(),
        }
    }

    fn assert_policy_error(policy: &TaxYearPolicy, fragment: &str) {
        match policy.validate() {
            Err(EngineError::PolicyConfiguration { tax_year, message }) => {
                assert_eq!(tax_year, policy.tax_year);
                assert!(
                    message.contains(fragment),
                    "expected '{}' in '{}'",
                    fragment,
                    message
                );
            }
            other => panic!("Expected PolicyConfiguration error, got {:?}", other),
        }
    }

    #[test]
    fn test_published_policy_is_valid() {
        assert!(policy_2025_26().validate().is_ok());
    }

    #[test]
    fn test_empty_brackets_rejected() {
        let mut policy = policy_2025_26();
        policy.brackets.clear();
        assert_policy_error(&policy, "no tax brackets");
    }

    #[test]
    fn test_first_bracket_must_start_at_zero() {
        let mut policy = policy_2025_26();
        policy.brackets[0].lower_bound = dec("1");
        assert_policy_error(&policy, "instead of 0");
    }

    #[test]
    fn test_gap_between_brackets_rejected() {
        let mut policy = policy_2025_26();
        policy.brackets[1].lower_bound = dec("237101");
        assert_policy_error(&policy, "gap between bracket 1");
    }

    #[test]
    fn test_overlap_between_brackets_rejected() {
        let mut policy = policy_2025_26();
        policy.brackets[2].lower_bound = dec("300000");
        assert_policy_error(&policy, "overlaps bracket 2");
    }

    #[test]
    fn test_decreasing_rate_rejected() {
        let mut policy = policy_2025_26();
        policy.brackets[3].rate = dec("0.30");
        assert_policy_error(&policy, "lower than bracket 3");
    }

    #[test]
    fn test_bounded_top_bracket_rejected() {
        let mut policy = policy_2025_26();
        policy.brackets[6].upper_bound = Some(dec("5000000"));
        assert_policy_error(&policy, "top bracket must be unbounded");
    }

    #[test]
    fn test_unbounded_inner_bracket_rejected() {
        let mut policy = policy_2025_26();
        policy.brackets[2].upper_bound = None;
        assert_policy_error(&policy, "bracket 3 is unbounded");
    }

    #[test]
    fn test_inverted_bracket_rejected() {
        let mut policy = policy_2025_26();
        policy.brackets[0].upper_bound = Some(dec("0"));
        assert_policy_error(&policy, "not above its lower bound");
    }

    #[test]
    fn test_rate_above_one_rejected() {
        let mut policy = policy_2025_26();
        policy.brackets[6].rate = dec("1.45");
        assert_policy_error(&policy, "outside 0..=1");
    }

    #[test]
    fn test_negative_rebate_rejected() {
        let mut policy = policy_2025_26();
        policy.rebates.secondary = dec("-1");
        assert_policy_error(&policy, "rebates.secondary must not be negative");
    }

    #[test]
    fn test_retirement_rate_above_hundred_rejected() {
        let mut policy = policy_2025_26();
        policy.retirement.rate_pct = dec("127.5");
        assert_policy_error(&policy, "retirement.rate_pct");
    }

    #[test]
    fn test_inverted_tax_year_dates_rejected() {
        let mut policy = policy_2025_26();
        policy.effective_to = NaiveDate::from_ymd_opt(2024, 2, 28).unwrap();
        assert_policy_error(&policy, "is before effective_from");
    }

    #[test]
    fn test_bracket_reaches_is_inclusive_of_upper_bound() {
        let policy = policy_2025_26();
        assert!(policy.brackets[0].reaches(dec("237100")));
        assert!(!policy.brackets[0].reaches(dec("237100.01")));
        assert!(policy.brackets[6].reaches(dec("99999999")));
    }

    #[test]
    fn test_covers_includes_both_ends() {
        let policy = policy_2025_26();
        assert!(policy.covers(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()));
        assert!(policy.covers(NaiveDate::from_ymd_opt(2026, 2, 28).unwrap()));
        assert!(!policy.covers(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()));
    }

    #[test]
    fn test_tax_config_sorts_policies_by_start_date() {
        let later = policy_2025_26();
        let mut earlier = policy_2025_26();
        earlier.tax_year = "2024/25".to_string();
        earlier.effective_from = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        earlier.effective_to = NaiveDate::from_ymd_opt(2025, 2, 28).unwrap();

        let config = TaxConfig::new(metadata(), vec![later, earlier]).unwrap();

        assert_eq!(config.policies()[0].tax_year, "2024/25");
        assert_eq!(config.policies()[1].tax_year, "2025/26");
    }

    #[test]
    fn test_tax_config_rejects_duplicate_years() {
        let result = TaxConfig::new(metadata(), vec![policy_2025_26(), policy_2025_26()]);

        match result {
            Err(EngineError::PolicyConfiguration { message, .. }) => {
                assert!(message.contains("more than once"));
            }
            other => panic!("Expected PolicyConfiguration error, got {:?}", other),
        }
    }

    #[test]
    fn test_tax_config_rejects_overlapping_years() {
        let mut other = policy_2025_26();
        other.tax_year = "2026/27".to_string();
        other.effective_from = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        other.effective_to = NaiveDate::from_ymd_opt(2026, 12, 31).unwrap();

        let result = TaxConfig::new(metadata(), vec![policy_2025_26(), other]);

        match result {
            Err(EngineError::PolicyConfiguration { tax_year, message }) => {
                assert_eq!(tax_year, "2026/27");
                assert!(message.contains("overlaps tax year 2025/26"));
            }
            other => panic!("Expected PolicyConfiguration error, got {:?}", other),
        }
    }

    #[test]
    fn test_tax_config_rejects_empty_policy_list() {
        assert!(TaxConfig::new(metadata(), vec![]).is_err());
    }

    #[test]
    fn test_tax_config_rejects_invalid_policy() {
        let mut bad = policy_2025_26();
        bad.brackets[1].lower_bound = dec("240000");

        assert!(TaxConfig::new(metadata(), vec![bad]).is_err());
    }
}
