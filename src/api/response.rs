//! Response types for the budget planner API.
//!
//! This module defines the plan envelope returned by `/plan`, the error
//! response structures, and the mapping from [`EngineError`] to HTTP status.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::PlanResult;

/// Response body for the `/plan` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanResponse {
    /// Unique identifier for this plan.
    pub plan_id: Uuid,
    /// When the plan was built.
    pub timestamp: DateTime<Utc>,
    /// Version of the engine that built the plan.
    pub engine_version: String,
    /// The plan itself: items, summary and audit trace.
    #[serde(flatten)]
    pub plan: PlanResult,
    /// Time spent building the plan, in microseconds.
    pub duration_us: u64,
}

impl PlanResponse {
    /// Wraps a plan with a fresh id and the current time.
    pub fn new(plan: PlanResult, duration_us: u64) -> Self {
        Self {
            plan_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            plan,
            duration_us,
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

    /// Creates a missing content type error response.
    pub fn missing_content_type() -> Self {
        Self::new(
            "MISSING_CONTENT_TYPE",
            "Content-Type must be application/json",
        )
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response with the given body.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::InvalidAmount { value } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "INVALID_AMOUNT",
                    format!("Invalid amount: '{}'", value),
                    "Amounts must be decimal numbers",
                ),
            ),
            EngineError::ValidationError { message } => {
                ApiErrorResponse::bad_request(ApiError::validation_error(message))
            }
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
            EngineError::InvalidPercentTotal { total } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "INVALID_PERCENT_TOTAL",
                    format!("Category percentages must total 100, got {}", total),
                    "Adjust the budget preferences so they add up to 100%",
                ),
            ),
            EngineError::CalculationError { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CALCULATION_ERROR", "Calculation failed", message),
            },
        }
    }
}
