//! Core data models for the budget planner.
//!
//! This module contains the money type, the planning input handed to the
//! planner, and the plan it produces.

mod money;
mod plan_result;
mod planning_input;

pub use money::Money;
pub use plan_result::{
    AuditStep, AuditTrace, AuditWarning, ItemKind, PlanItem, PlanResult, PlanSummary,
    WarningSeverity,
};
pub use planning_input::{
    Constraints, FixedExpense, Income, PlanningInput, Preferences, VariableExpense,
};
