//! HTTP request handlers for the Income Tax Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{assess_refund, calculate, calculation_warnings, narrate_audit_steps};
use crate::config::{ConfigLoader, TaxYearPolicy};
use crate::error::EngineResult;
use crate::models::AuditTrace;

use super::request::CalculationRequest;
use super::response::{ApiError, ApiErrorResponse, CalculationResponse, TaxYearSummary};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/tax-years", get(tax_years_handler))
        .with_state(state)
}

/// Handler for GET /tax-years.
///
/// Lists every loaded policy, oldest first.
async fn tax_years_handler(State(state): State<AppState>) -> impl IntoResponse {
    let summaries: Vec<TaxYearSummary> = state
        .policies()
        .iter()
        .map(TaxYearSummary::from)
        .collect();

    (StatusCode::OK, Json(summaries))
}

/// Handler for POST /calculate endpoint.
///
/// Accepts a taxpayer's figures and returns the tax result with its audit trail.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::validation_error(body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response();
        }
    };

    match perform_calculation(&request, state.config()) {
        Ok(response) => {
            info!(
                correlation_id = %correlation_id,
                tax_year = %response.result.tax_year,
                total_tax = %response.result.total_tax,
                duration_us = response.audit_trace.duration_us,
                "Calculation completed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(response),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Calculation failed"
            );
            let api_error: ApiErrorResponse = err.into();
            (
                api_error.status,
                [(header::CONTENT_TYPE, "application/json")],
                Json(api_error.error),
            )
                .into_response()
        }
    }
}

/// Picks the policy named by the request, falling back to the latest year.
fn select_policy<'a>(
    request: &CalculationRequest,
    config: &'a ConfigLoader,
) -> EngineResult<&'a TaxYearPolicy> {
    match (&request.tax_year, request.assessment_date) {
        (Some(tax_year), _) => config.policy(tax_year),
        (None, Some(date)) => config.policy_for_date(date),
        (None, None) => config.latest(),
    }
}

/// Runs the engine, the refund assessment and the narration for one request.
fn perform_calculation(
    request: &CalculationRequest,
    config: &ConfigLoader,
) -> EngineResult<CalculationResponse> {
    let start_time = Instant::now();

    let policy = select_policy(request, config)?;
    let input = request.to_input(policy)?;
    let result = calculate(&input, policy)?;

    let assessment = request
        .paye_withheld
        .map(|paye| assess_refund(&result, paye))
        .transpose()?;

    let steps = narrate_audit_steps(&input, &result, policy);
    let warnings = calculation_warnings(&input, &result);
    let duration_us = start_time.elapsed().as_micros() as u64;

    Ok(CalculationResponse {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        result,
        assessment,
        audit_trace: AuditTrace {
            steps,
            warnings,
            duration_us,
        },
    })
}
