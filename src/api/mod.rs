//! HTTP API module for the Income Tax Engine.
//!
//! This module provides the REST API endpoints for calculating income tax
//! and listing the tax years the engine has loaded.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::CalculationRequest;
pub use response::{ApiError, CalculationResponse, TaxYearSummary};
pub use state::AppState;
