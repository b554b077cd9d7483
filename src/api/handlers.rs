//! HTTP request handlers for the budget planner API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::generate_plan_text;

use super::request::{LegacyPlanRequest, PlanRequest};
use super::response::{ApiError, ApiErrorResponse, PlanResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/defaults", get(defaults_handler))
        .route("/plan", post(plan_handler))
        .route("/legacy/plan", post(legacy_plan_handler))
        .with_state(state)
}

/// Handler for GET /defaults.
///
/// Returns the baseline planning input that `/plan` merges onto.
async fn defaults_handler(State(state): State<AppState>) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Serving planning defaults");

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(state.config().defaults().clone()),
    )
}

/// Handler for POST /plan.
///
/// Merges the request onto the defaults and returns the resulting plan.
async fn plan_handler(
    State(state): State<AppState>,
    payload: Result<Json<PlanRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing plan request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_error(rejection, correlation_id).into_response(),
    };

    let input = match request.into_input(state.config()) {
        Ok(input) => input,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Plan input rejected"
            );
            return ApiErrorResponse::from(err).into_response();
        }
    };

    let start_time = Instant::now();
    let plan = state.planner().build_plan(&input);
    let duration_us = start_time.elapsed().as_micros() as u64;

    info!(
        correlation_id = %correlation_id,
        items = plan.items.len(),
        warnings = plan.audit_trace.warnings.len(),
        total_income = %plan.summary.total_income,
        remaining = %plan.summary.remaining,
        duration_us = duration_us,
        "Plan built successfully"
    );

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(PlanResponse::new(plan, duration_us)),
    )
        .into_response()
}

/// Handler for POST /legacy/plan.
///
/// Runs the percentage split and returns it as `category-amount-percent`
/// lines.
async fn legacy_plan_handler(
    payload: Result<Json<LegacyPlanRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing legacy plan request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_error(rejection, correlation_id).into_response(),
    };

    let input = match request.into_input() {
        Ok(input) => input,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Legacy input rejected"
            );
            return ApiErrorResponse::from(err).into_response();
        }
    };

    let text = generate_plan_text(&input);
    info!(
        correlation_id = %correlation_id,
        categories = input.budget_preference.len(),
        "Legacy plan generated"
    );

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        text,
    )
        .into_response()
}

/// Maps a JSON extraction failure to a 400 error.
fn rejection_error(rejection: JsonRejection, correlation_id: Uuid) -> ApiErrorResponse {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") || body_text.contains("invalid type") {
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
            warn!(correlation_id = %correlation_id, "Missing JSON content type");
            ApiError::missing_content_type()
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error)
}
