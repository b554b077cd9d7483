//! Calculation logic for the budget planner.
//!
//! This module contains the allocation pipeline run by [`Planner`]: totals,
//! fixed expenses, the savings target, variable floors and the capped
//! remainder pass, all sharing one [`RoundingPolicy`]. It also holds the
//! simpler percentage-split allocator and the `category-amount-percent` text
//! format it is exchanged in.

mod fixed_allocation;
mod percentage_split;
mod plan_text;
mod planner;
mod rounding;
mod savings_allocation;
mod totals;
mod variable_allocation;

pub use fixed_allocation::{FIXED_COSTS_EXCEED_INCOME, FixedAllocationResult, allocate_fixed};
pub use percentage_split::{
    CategoryBounds, CategoryShare, IncomePeriod, LegacyFixedCost, LegacyIncome, LegacyInput,
    PercentAllocation, allocate_by_percent, validate_percent_total,
};
pub use plan_text::{LegacyRecord, generate_plan_text, parse_plan_text, recompute_percentages};
pub use planner::Planner;
pub use rounding::RoundingPolicy;
pub use savings_allocation::{
    SAVINGS_CATEGORY, SAVINGS_TARGET_NOT_MET, SavingsAllocationResult, allocate_savings,
};
pub use totals::{TotalsResult, compute_totals};
pub use variable_allocation::{
    FLOOR_EXCEEDS_CAP, FLOOR_NOT_MET, VariableAllocationResult, allocate_variables, funding_order,
};
