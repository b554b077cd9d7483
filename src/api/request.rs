//! Request types for the budget planner API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::calculation::{LegacyInput, validate_percent_total};
use crate::config::ConfigLoader;
use crate::error::EngineResult;
use crate::models::PlanningInput;

/// Request body for the `/plan` endpoint.
///
/// Any subset of the [`PlanningInput`] top-level fields. Fields that are
/// present replace the configured defaults wholesale.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlanRequest {
    /// The caller's overrides.
    pub overrides: Value,
}

impl PlanRequest {
    /// Merges the overrides onto the configured defaults.
    pub fn into_input(self, config: &ConfigLoader) -> EngineResult<PlanningInput> {
        config.merge(&self.overrides)
    }
}

/// Request body for the `/legacy/plan` endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LegacyPlanRequest {
    /// The form contents.
    #[serde(flatten)]
    pub input: LegacyInput,
    /// Reject preferences that do not add up to exactly 100%.
    #[serde(default)]
    pub strict: bool,
}

impl LegacyPlanRequest {
    /// Returns the form contents, applying the 100% rule in strict mode.
    pub fn into_input(self) -> EngineResult<LegacyInput> {
        if self.strict {
            validate_percent_total(&self.input.budget_preference)?;
        }
        Ok(self.input)
    }
}
