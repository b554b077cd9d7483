//! Planning input models.
//!
//! A [`PlanningInput`] is assembled fresh for every planning request, usually
//! by merging caller overrides onto the defaults, and is only ever read by
//! the planner.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Money;

/// A source of income, normalized to a monthly amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Income {
    /// Display name, e.g. "Primary Job".
    pub name: String,
    /// Monthly net amount.
    pub amount: Money,
}

/// A recurring cost that is paid before anything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedExpense {
    /// Display name, e.g. "Rent".
    pub name: String,
    /// Monthly amount.
    pub amount: Money,
    /// Whether the expense is essential. Informational only.
    #[serde(default = "default_essential")]
    pub essential: bool,
}

fn default_essential() -> bool {
    true
}

/// A spending category that shares whatever is left after fixed costs and
/// savings.
///
/// Lower `priority` values are funded first. When both bounds are set,
/// `min_amount <= max_amount` is expected but not enforced; the cap wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableExpense {
    /// Category name, e.g. "Groceries".
    pub name: String,
    /// Floor funded before the remainder is distributed.
    #[serde(default)]
    pub min_amount: Option<Money>,
    /// Cap that allocations never exceed.
    #[serde(default)]
    pub max_amount: Option<Money>,
    /// Funding order; lower is funded first.
    #[serde(default = "default_priority")]
    pub priority: i32,
}

fn default_priority() -> i32 {
    100
}

impl VariableExpense {
    /// Creates an unbounded category at the default priority.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            min_amount: None,
            max_amount: None,
            priority: default_priority(),
        }
    }

    /// Sets the floor.
    pub fn with_min(mut self, min_amount: Money) -> Self {
        self.min_amount = Some(min_amount);
        self
    }

    /// Sets the cap.
    pub fn with_max(mut self, max_amount: Money) -> Self {
        self.max_amount = Some(max_amount);
        self
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

/// User preferences that steer the allocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    /// Fraction of total income to set aside as savings (e.g. 0.1 for 10%).
    #[serde(default = "default_savings_rate_min")]
    pub savings_rate_min: Decimal,
    /// Rounding step applied to every amount in the plan.
    #[serde(default = "default_round_to")]
    pub round_to: Money,
}

fn default_savings_rate_min() -> Decimal {
    Decimal::new(1, 1)
}

fn default_round_to() -> Money {
    Money::new(Decimal::new(100, 2))
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            savings_rate_min: default_savings_rate_min(),
            round_to: default_round_to(),
        }
    }
}

/// Global limits carried with the input.
///
/// The planner does not consume these yet; they pass through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constraints {
    /// Largest share of income that housing should take.
    #[serde(default = "default_max_housing_ratio")]
    pub max_housing_ratio: Decimal,
    /// Months of expenses to keep as an emergency fund.
    #[serde(default = "default_emergency_fund_months")]
    pub emergency_fund_months: Decimal,
}

fn default_max_housing_ratio() -> Decimal {
    Decimal::new(35, 2)
}

fn default_emergency_fund_months() -> Decimal {
    Decimal::from(3)
}

impl Default for Constraints {
    fn default() -> Self {
        Self {
            max_housing_ratio: default_max_housing_ratio(),
            emergency_fund_months: default_emergency_fund_months(),
        }
    }
}

/// Everything the planner needs for one run.
///
/// # Example
///
/// ```
/// use budget_planner::models::{FixedExpense, Income, Money, PlanningInput, VariableExpense};
///
/// let input = PlanningInput {
///     incomes: vec![Income { name: "Job".to_string(), amount: Money::from(3000) }],
///     fixed: vec![FixedExpense { name: "Rent".to_string(), amount: Money::from(1200), essential: true }],
///     variables: vec![VariableExpense::new("Groceries").with_min(Money::from(300))],
///     preferences: Default::default(),
///     constraints: Default::default(),
/// };
/// assert_eq!(input.variables[0].priority, 100);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanningInput {
    /// Income sources.
    pub incomes: Vec<Income>,
    /// Fixed expenses, funded in order.
    pub fixed: Vec<FixedExpense>,
    /// Variable spending categories.
    pub variables: Vec<VariableExpense>,
    /// Allocation preferences.
    #[serde(default)]
    pub preferences: Preferences,
    /// Passthrough constraints.
    #[serde(default)]
    pub constraints: Constraints,
}
