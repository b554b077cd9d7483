//! Configuration loading and defaults for the budget planner.
//!
//! This module supplies the baseline planning input, either the built-in
//! starter input or one loaded from YAML, and merges partial caller input
//! onto it.
//!
//! # Example
//!
//! ```no_run
//! use budget_planner::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Default incomes: {}", config.defaults().incomes.len());
//! ```

mod defaults;
mod loader;

pub use defaults::{merge_with_defaults, starter_input};
pub use loader::ConfigLoader;
