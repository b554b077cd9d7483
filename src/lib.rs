//! Monthly budget planner.
//!
//! This crate turns incomes, fixed expenses and variable spending categories
//! into a deterministic allocation plan with an audit trace explaining every
//! step. It also carries a simpler percentage-split allocator with its own
//! text format, and an axum HTTP surface over both.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
