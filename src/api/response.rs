//! Response types for the Income Tax Engine API.
//!
//! This module defines the success payloads, the error response structures
//! and the mapping from engine errors to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculation::tax_threshold;
use crate::config::{MedicalCredits, Rebates, RetirementDeduction, TaxBracket, TaxYearPolicy};
use crate::error::EngineError;
use crate::models::{AuditTrace, RefundAssessment, TaxCalculationResult};

/// Body returned by a successful `/calculate` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationResponse {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The engine's result.
    pub result: TaxCalculationResult,
    /// Refund or amount owing, when PAYE withheld was supplied.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub assessment: Option<RefundAssessment>,
    /// Narrated calculation steps.
    pub audit_trace: AuditTrace,
}

/// One entry of the `/tax-years` listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxYearSummary {
    /// Tax year label.
    pub tax_year: String,
    /// First day of the tax year.
    pub effective_from: NaiveDate,
    /// Last day of the tax year.
    pub effective_to: NaiveDate,
    /// Bracket table.
    pub brackets: Vec<TaxBracket>,
    /// Rebate amounts.
    pub rebates: Rebates,
    /// Monthly medical credits.
    pub medical_credits: MedicalCredits,
    /// Retirement deduction limits.
    pub retirement: RetirementDeduction,
    /// Income below which a taxpayer under 65 pays no tax.
    pub tax_threshold: Option<Decimal>,
}

impl From<&TaxYearPolicy> for TaxYearSummary {
    fn from(policy: &TaxYearPolicy) -> Self {
        Self {
            tax_year: policy.tax_year.clone(),
            effective_from: policy.effective_from,
            effective_to: policy.effective_to,
            brackets: policy.brackets.clone(),
            rebates: policy.rebates.clone(),
            medical_credits: policy.medical_credits.clone(),
            retirement: policy.retirement.clone(),
            tax_threshold: tax_threshold(policy, 0),
        }
    }
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::PolicyConfiguration { tax_year, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "POLICY_ERROR",
                    format!("Invalid policy for tax year {}", tax_year),
                    message,
                ),
            },
            EngineError::TaxYearNotFound { tax_year } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "TAX_YEAR_NOT_FOUND",
                    format!("Tax year not found: {}", tax_year),
                    format!("The tax year '{}' is not loaded by this engine", tax_year),
                ),
            },
            EngineError::NoPolicyForDate { date } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "TAX_YEAR_NOT_FOUND",
                    format!("No tax year policy covers date {}", date),
                    "The assessment date falls outside every loaded tax year",
                ),
            },
            EngineError::InvalidInput { field, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_INPUT",
                    format!("Invalid input field '{}': {}", field, message),
                    "The calculation input contains out-of-range values",
                ),
            },
        }
    }
}
