//! Built-in starter input and the shallow merge applied to caller overrides.

use serde_json::Value;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    Constraints, FixedExpense, Income, Money, PlanningInput, Preferences, VariableExpense,
};

/// The input a new user starts from.
///
/// One zero income, zero Rent and Utilities, and three variable categories:
/// Groceries (floor $200), Transportation (floor $100) and an unbounded
/// Entertainment. Preferences and constraints are their defaults.
pub fn starter_input() -> PlanningInput {
    PlanningInput {
        incomes: vec![Income {
            name: "Primary Job".to_string(),
            amount: Money::ZERO,
        }],
        fixed: vec![
            FixedExpense {
                name: "Rent".to_string(),
                amount: Money::ZERO,
                essential: true,
            },
            FixedExpense {
                name: "Utilities".to_string(),
                amount: Money::ZERO,
                essential: true,
            },
        ],
        variables: vec![
            VariableExpense::new("Groceries").with_min(Money::from(200)),
            VariableExpense::new("Transportation").with_min(Money::from(100)),
            VariableExpense::new("Entertainment"),
        ],
        preferences: Preferences::default(),
        constraints: Constraints::default(),
    }
}

/// Overlays `partial` on the starter input.
///
/// Each top-level key in `partial` replaces the default value wholesale, so
/// `{"variables": [...]}` swaps out every default category.
///
/// # Errors
///
/// Returns [`EngineError::ValidationError`] if `partial` is not a JSON object
/// or the merged value is not a valid [`PlanningInput`].
///
/// # Examples
///
/// ```
/// use budget_planner::config::merge_with_defaults;
/// use budget_planner::models::Money;
/// use serde_json::json;
///
/// let input = merge_with_defaults(&json!({
///     "incomes": [{"name": "Salary", "amount": "4000"}]
/// })).unwrap();
///
/// assert_eq!(input.incomes[0].amount, Money::from(4000));
/// assert_eq!(input.fixed.len(), 2);
/// ```
pub fn merge_with_defaults(partial: &Value) -> EngineResult<PlanningInput> {
    merge_onto(&starter_input(), partial)
}

/// Shallow top-level merge of `partial` over `baseline`.
pub(crate) fn merge_onto(baseline: &PlanningInput, partial: &Value) -> EngineResult<PlanningInput> {
    let overrides = partial
        .as_object()
        .ok_or_else(|| EngineError::ValidationError {
            message: format!("expected a JSON object, got {}", json_type(partial)),
        })?;

    let mut merged = serde_json::to_value(baseline).map_err(|e| EngineError::CalculationError {
        message: format!("could not serialize defaults: {}", e),
    })?;

    if let Value::Object(fields) = &mut merged {
        for (key, value) in overrides {
            fields.insert(key.clone(), value.clone());
        }
    }

    serde_json::from_value(merged).map_err(|e| EngineError::ValidationError {
        message: e.to_string(),
    })
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
