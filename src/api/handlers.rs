//! HTTP request handlers for the Mix Bonus Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    calculate_roster, calculate_simple_bonus, calculate_team_mix, find_employee,
};
use crate::error::EngineError;
use crate::models::EmployeeAggregate;
use crate::report::{ensure_not_empty, parse_report, render_summary};

use super::request::{CalculationRequest, LookupRequest};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/summary", post(summary_handler))
        .route("/lookup", post(lookup_handler))
        .with_state(state)
}

/// Handler for POST /calculate endpoint.
///
/// Parses the report and returns every employee's bonus.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let employees = match parse_request_report(correlation_id, &request.report) {
        Ok(employees) => employees,
        Err(err) => return error_response(correlation_id, err),
    };

    let assignment = request.assignment(state.config().assignment());
    let result = calculate_roster(&employees, &assignment);

    info!(
        correlation_id = %correlation_id,
        calculation_id = %result.calculation_id,
        employees = result.results.len(),
        total_payout = %result.total_payout,
        duration_us = result.duration_us,
        "Calculation completed successfully"
    );
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(result),
    )
        .into_response()
}

/// Handler for POST /summary endpoint.
///
/// Returns the plain-text mix summary for the report.
async fn summary_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing summary request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let employees = match parse_request_report(correlation_id, &request.report) {
        Ok(employees) => employees,
        Err(err) => return error_response(correlation_id, err),
    };

    let assignment = request.assignment(state.config().assignment());
    let team_mix = calculate_team_mix(&employees, &assignment);
    let summary = render_summary(&employees, &assignment, &team_mix);

    info!(
        correlation_id = %correlation_id,
        employees = employees.len(),
        "Summary rendered"
    );
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        summary,
    )
        .into_response()
}

/// Handler for POST /lookup endpoint.
///
/// Returns the simple bonus view for one employee.
async fn lookup_handler(
    State(state): State<AppState>,
    payload: Result<Json<LookupRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing lookup request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    let lookup = parse_request_report(correlation_id, &request.report).and_then(|employees| {
        find_employee(&employees, &request.employee_id)
            .map(|employee| calculate_simple_bonus(employee, state.config().bonus_rules()))
    });

    match lookup {
        Ok(view) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %view.employee_id,
                total_bonus = %view.total_bonus,
                duration_us = start_time.elapsed().as_micros(),
                "Lookup completed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(view),
            )
                .into_response()
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Parses the report carried by a request, rejecting reports without employees.
fn parse_request_report(
    correlation_id: Uuid,
    report: &str,
) -> Result<Vec<EmployeeAggregate>, EngineError> {
    let employees = parse_report(report);
    ensure_not_empty(&employees)?;
    info!(
        correlation_id = %correlation_id,
        employees = employees.len(),
        "Report parsed"
    );
    Ok(employees)
}

fn error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request failed"
    );
    let api_error: ApiErrorResponse = err.into();
    (
        api_error.status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(api_error.error),
    )
        .into_response()
}

fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's detailed message.
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
    (
        StatusCode::BAD_REQUEST,
        [(header::CONTENT_TYPE, "application/json")],
        Json(error),
    )
        .into_response()
}
