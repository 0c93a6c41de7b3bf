//! HTTP API module for the Mix Bonus Engine.
//!
//! This module provides the REST API endpoints that compute bonuses, the
//! mix summary and the single-employee view from a posted report.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CalculationRequest, LookupRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
