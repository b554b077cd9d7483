//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type, which holds the baseline
//! planning input that caller overrides are merged onto.

use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::PlanningInput;

use super::defaults::{merge_onto, starter_input};

/// Name of the defaults file inside a configuration directory.
const DEFAULTS_FILE: &str = "defaults.yaml";

/// Loads and provides access to the baseline planning input.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// └── defaults.yaml   # A complete PlanningInput
/// ```
///
/// # Example
///
/// ```no_run
/// use budget_planner::config::ConfigLoader;
/// use serde_json::json;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// let input = loader.merge(&json!({"incomes": [{"name": "Job", "amount": 3000}]})).unwrap();
/// println!("{} variable categories", input.variables.len());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    defaults: PlanningInput,
}

impl ConfigLoader {
    /// Loads `defaults.yaml` from the specified directory.
    ///
    /// # Errors
    ///
    /// - [`EngineError::ConfigNotFound`] if the file cannot be read
    /// - [`EngineError::ConfigParseError`] if it is not valid YAML or not a
    ///   complete planning input
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let defaults_path = path.as_ref().join(DEFAULTS_FILE);
        let defaults = Self::load_yaml::<PlanningInput>(&defaults_path)?;

        info!(
            path = %defaults_path.display(),
            variables = defaults.variables.len(),
            "Loaded planning defaults"
        );

        Ok(Self { defaults })
    }

    /// Uses the built-in starter input as the baseline.
    pub fn builtin() -> Self {
        Self {
            defaults: starter_input(),
        }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the baseline planning input.
    pub fn defaults(&self) -> &PlanningInput {
        &self.defaults
    }

    /// Overlays `partial` on the baseline; see
    /// [`merge_with_defaults`](super::merge_with_defaults) for the rules.
    pub fn merge(&self, partial: &Value) -> EngineResult<PlanningInput> {
        merge_onto(&self.defaults, partial)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::builtin()
    }
}
