//! Calculation result models for the Income Tax Engine.
//!
//! This module contains the [`TaxCalculationResult`] type produced by the
//! engine, the [`RefundAssessment`] derived from it, and the audit trail
//! structures used to narrate a calculation for reporting.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The complete result of an income tax calculation.
///
/// Results carry no identifiers or timestamps, so two calculations over the
/// same input and policy serialize identically.
///
/// # Example
///
/// ```
/// use tax_engine::models::TaxCalculationResult;
/// use rust_decimal::Decimal;
///
/// let result = TaxCalculationResult {
///     tax_year: "2025/26".to_string(),
///     gross_income: Decimal::ZERO,
///     retirement_deduction: Decimal::ZERO,
///     taxable_income: Decimal::ZERO,
///     income_tax: Decimal::ZERO,
///     primary_rebate: Decimal::from(17_235),
///     secondary_rebate: Decimal::ZERO,
///     tertiary_rebate: Decimal::ZERO,
///     total_rebates: Decimal::from(17_235),
///     medical_tax_credits: Decimal::ZERO,
///     total_tax: Decimal::ZERO,
///     marginal_rate: Decimal::from(18),
///     effective_rate: Decimal::ZERO,
/// };
/// assert_eq!(result.total_tax, Decimal::ZERO);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxCalculationResult {
    /// The tax year whose policy was applied.
    pub tax_year: String,
    /// Gross income as supplied.
    pub gross_income: Decimal,
    /// The deductible part of retirement contributions after the cap.
    pub retirement_deduction: Decimal,
    /// Income subject to the bracket table.
    pub taxable_income: Decimal,
    /// Tax from the brackets before rebates and credits.
    pub income_tax: Decimal,
    /// Primary rebate.
    pub primary_rebate: Decimal,
    /// Secondary rebate (zero below age 65).
    pub secondary_rebate: Decimal,
    /// Tertiary rebate (zero below age 75).
    pub tertiary_rebate: Decimal,
    /// Sum of all applicable rebates.
    pub total_rebates: Decimal,
    /// Annual medical tax credits, including caller-supplied credits.
    pub medical_tax_credits: Decimal,
    /// Final liability, never negative.
    pub total_tax: Decimal,
    /// Rate of the bracket containing taxable income, in percent.
    pub marginal_rate: Decimal,
    /// Total tax as a percentage of gross income.
    pub effective_rate: Decimal,
}

/// The outcome of comparing PAYE already withheld against the final liability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefundAssessment {
    /// PAYE withheld by the employer during the year.
    pub paye_withheld: Decimal,
    /// The engine's final liability.
    pub total_tax: Decimal,
    /// `paye_withheld - total_tax`; positive means SARS owes the taxpayer.
    pub refund_or_owing: Decimal,
    /// True when `refund_or_owing` is positive.
    pub is_refund: bool,
}

/// A single step in the audit trace narrating a calculation.
///
/// Each step records the figure produced, the formula behind it and the
/// legislation it derives from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable label for this step.
    pub label: String,
    /// The formula, with the actual figures substituted.
    pub formula: String,
    /// The figure this step produced.
    pub result: Decimal,
    /// Reference to the Income Tax Act section for this rule.
    pub legal_ref: String,
    /// Human-readable explanation of the step.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings indicate inputs that were handled by policy (such as a capped
/// deduction) and may be worth showing to the taxpayer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
///
/// # Example
///
/// ```
/// use tax_engine::models::AuditTrace;
///
/// let trace = AuditTrace {
///     steps: vec![],
///     warnings: vec![],
///     duration_us: 42,
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sample_result() -> TaxCalculationResult {
        TaxCalculationResult {
            tax_year: "2025/26".to_string(),
            gross_income: dec("850000"),
            retirement_deduction: dec("100000"),
            taxable_income: dec("750000"),
            income_tax: dec("209177"),
            primary_rebate: dec("17235"),
            secondary_rebate: Decimal::ZERO,
            tertiary_rebate: Decimal::ZERO,
            total_rebates: dec("17235"),
            medical_tax_credits: dec("4368"),
            total_tax: dec("187574"),
            marginal_rate: dec("39"),
            effective_rate: dec("22.07"),
        }
    }

    #[test]
    fn test_result_serializes_decimals_as_strings() {
        let json = serde_json::to_value(sample_result()).unwrap();

        assert_eq!(json["taxable_income"], "750000");
        assert_eq!(json["total_tax"], "187574");
        assert_eq!(json["effective_rate"], "22.07");
    }

    #[test]
    fn test_result_round_trips_through_json() {
        let result = sample_result();
        let json = serde_json::to_string(&result).unwrap();
        let parsed: TaxCalculationResult = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, result);
    }

    #[test]
    fn test_audit_step_serialization() {
        let step = AuditStep {
            step_number: 1,
            rule_id: "gross_income".to_string(),
            label: "Gross Income".to_string(),
            formula: "R850000".to_string(),
            result: dec("850000"),
            legal_ref: "s1 'gross income'".to_string(),
            reasoning: "Gross remuneration as declared".to_string(),
        };

        let json = serde_json::to_value(&step).unwrap();
        assert_eq!(json["rule_id"], "gross_income");
        assert_eq!(json["result"], "850000");
    }

    #[test]
    fn test_refund_assessment_serialization() {
        let assessment = RefundAssessment {
            paye_withheld: dec("200000"),
            total_tax: dec("187574"),
            refund_or_owing: dec("12426"),
            is_refund: true,
        };

        let json = serde_json::to_value(&assessment).unwrap();
        assert_eq!(json["refund_or_owing"], "12426");
        assert_eq!(json["is_refund"], true);
    }
}
