//! Application state for the budget planner API.

use std::sync::Arc;

use crate::calculation::Planner;
use crate::config::ConfigLoader;

/// Shared application state.
///
/// Holds the baseline planning input every request is merged onto, and the
/// planner that runs the allocation.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    planner: Planner,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
            planner: Planner::new(),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the planner.
    pub fn planner(&self) -> &Planner {
        &self.planner
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ConfigLoader::builtin())
    }
}
