//! Audit narration of a completed calculation.
//!
//! Report generation shows the taxpayer how their liability was reached.
//! The functions here only format figures already present in a
//! [`TaxCalculationResult`]; they never recompute tax.

use rust_decimal::Decimal;

use crate::config::TaxYearPolicy;
use crate::models::{AuditStep, AuditWarning, TaxCalculationInput, TaxCalculationResult};

use super::brackets::BRACKET_TAX_CLAUSE;
use super::medical_credits::MEDICAL_CREDITS_CLAUSE;
use super::rebates::REBATES_CLAUSE;
use super::retirement_deduction::RETIREMENT_DEDUCTION_CLAUSE;

fn format_rand(amount: Decimal) -> String {
    format!("R{}", amount.normalize())
}

fn step(
    step_number: u32,
    rule_id: &str,
    label: &str,
    formula: String,
    result: Decimal,
    legal_ref: &str,
    reasoning: String,
) -> AuditStep {
    AuditStep {
        step_number,
        rule_id: rule_id.to_string(),
        label: label.to_string(),
        formula,
        result,
        legal_ref: format!("Income Tax Act 58 of 1962, {}", legal_ref),
        reasoning,
    }
}

/// Produces the six ordered steps behind a result.
///
/// Steps run gross income, retirement deduction, taxable income, income
/// tax, rebates and credits, then final liability. Each carries a label,
/// the formula with figures substituted, the figure itself and the
/// section of the Act it comes from.
///
/// # Examples
///
/// ```no_run
/// use tax_engine::calculation::{calculate, narrate_audit_steps};
/// use tax_engine::config::ConfigLoader;
/// use tax_engine::models::TaxCalculationInput;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/za")?;
/// let policy = loader.policy("2025/26")?;
/// let input = TaxCalculationInput::new(Decimal::from(400_000), 30);
/// let result = calculate(&input, policy)?;
///
/// let steps = narrate_audit_steps(&input, &result, policy);
/// assert_eq!(steps.len(), 6);
/// assert_eq!(steps[5].result, result.total_tax);
/// # Ok::<(), tax_engine::error::EngineError>(())
/// ```
pub fn narrate_audit_steps(
    input: &TaxCalculationInput,
    result: &TaxCalculationResult,
    policy: &TaxYearPolicy,
) -> Vec<AuditStep> {
    let reductions = result.total_rebates + result.medical_tax_credits;

    vec![
        step(
            1,
            "gross_income",
            "Gross Income",
            format_rand(result.gross_income),
            result.gross_income,
            "s1 (definition of \"gross income\")",
            format!("Gross remuneration declared for tax year {}", result.tax_year),
        ),
        step(
            2,
            "retirement_deduction",
            "Retirement Fund Deduction",
            format!(
                "min({}, min({} × {}%, {}))",
                format_rand(input.retirement_contrib),
                format_rand(result.gross_income),
                policy.retirement.rate_pct.normalize(),
                format_rand(policy.retirement.cap)
            ),
            result.retirement_deduction,
            RETIREMENT_DEDUCTION_CLAUSE,
            if input.retirement_contrib > result.retirement_deduction {
                format!(
                    "Contributions of {} exceed the deductible limit; {} allowed",
                    format_rand(input.retirement_contrib),
                    format_rand(result.retirement_deduction)
                )
            } else {
                format!(
                    "Contributions of {} are fully deductible",
                    format_rand(result.retirement_deduction)
                )
            },
        ),
        step(
            3,
            "taxable_income",
            "Taxable Income",
            format!(
                "max(0, {} − {})",
                format_rand(result.gross_income),
                format_rand(result.retirement_deduction)
            ),
            result.taxable_income,
            "s1 (definition of \"taxable income\")",
            "Gross income less allowable deductions".to_string(),
        ),
        step(
            4,
            "income_tax",
            "Income Tax on Taxable Income",
            format!(
                "{} tax table applied to {}",
                result.tax_year,
                format_rand(result.taxable_income)
            ),
            result.income_tax,
            BRACKET_TAX_CLAUSE,
            format!(
                "Progressive brackets; last Rand taxed at the {}% marginal rate",
                result.marginal_rate
            ),
        ),
        step(
            5,
            "rebates_and_credits",
            "Rebates and Medical Tax Credits",
            format!(
                "{} + {} + {} + {}",
                format_rand(result.primary_rebate),
                format_rand(result.secondary_rebate),
                format_rand(result.tertiary_rebate),
                format_rand(result.medical_tax_credits)
            ),
            reductions,
            &format!("{}; {}", REBATES_CLAUSE, MEDICAL_CREDITS_CLAUSE),
            format!(
                "Primary, secondary and tertiary rebates for age {} plus medical tax credits",
                input.age
            ),
        ),
        step(
            6,
            "final_liability",
            "Final Tax Liability",
            format!(
                "max(0, {} − {})",
                format_rand(result.income_tax),
                format_rand(reductions)
            ),
            result.total_tax,
            "s5(1)",
            format!(
                "Tax payable of {} ({}% of gross income)",
                format_rand(result.total_tax),
                result.effective_rate
            ),
        ),
    ]
}

/// Flags inputs that policy handled silently, for display alongside the steps.
pub fn calculation_warnings(
    input: &TaxCalculationInput,
    result: &TaxCalculationResult,
) -> Vec<AuditWarning> {
    let mut warnings = Vec::new();

    if input.retirement_contrib > result.retirement_deduction {
        warnings.push(AuditWarning {
            code: "RETIREMENT_CAP_APPLIED".to_string(),
            message: format!(
                "{} of retirement contributions exceeds the deductible limit and is not carried forward",
                format_rand(input.retirement_contrib - result.retirement_deduction)
            ),
            severity: "medium".to_string(),
        });
    }

    if result.income_tax > Decimal::ZERO && result.total_tax.is_zero() {
        warnings.push(AuditWarning {
            code: "TAX_FULLY_OFFSET".to_string(),
            message: "Rebates and credits exceed income tax; the excess is not refundable"
                .to_string(),
            severity: "low".to_string(),
        });
    }

    if input.uif_contrib > Decimal::ZERO {
        warnings.push(AuditWarning {
            code: "UIF_NOT_DEDUCTIBLE".to_string(),
            message: format!(
                "UIF contributions of {} do not reduce taxable income",
                format_rand(input.uif_contrib)
            ),
            severity: "low".to_string(),
        });
    }

    warnings
}
