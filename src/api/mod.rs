//! HTTP API module for the budget planner.
//!
//! This module provides the REST endpoints: `GET /defaults`, `POST /plan`
//! and `POST /legacy/plan`.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{LegacyPlanRequest, PlanRequest};
pub use response::{ApiError, ApiErrorResponse, PlanResponse};
pub use state::AppState;
