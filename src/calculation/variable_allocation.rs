//! Variable category allocation.
//!
//! Variables share whatever is left after fixed expenses and savings, in two
//! passes over the same funding order:
//!
//! 1. **Floors**: each category with a `min_amount` receives its floor, bounded
//!    by its cap and by the balance.
//! 2. **Remainder**: each category, highest priority first, absorbs as much of
//!    the balance as its cap allows. Uncapped categories take everything, so
//!    lower-priority categories may receive nothing.
//!
//! Increments from both passes merge into one line item per category.

use std::cmp::Ordering;

use tracing::debug;

use crate::models::{
    AuditStep, AuditWarning, ItemKind, Money, PlanItem, VariableExpense, WarningSeverity,
};

use super::RoundingPolicy;

/// Warning code raised when a category's floor could not be funded in full.
pub const FLOOR_NOT_MET: &str = "FLOOR_NOT_MET";

/// Warning code raised when a category's floor is larger than its cap.
pub const FLOOR_EXCEEDS_CAP: &str = "FLOOR_EXCEEDS_CAP";

/// The result of funding variable categories.
#[derive(Debug, Clone)]
pub struct VariableAllocationResult {
    /// One item per funded category, in order of first allocation.
    pub items: Vec<PlanItem>,
    /// The balance left after both passes.
    pub remaining: Money,
    /// Floors that could not be met and inconsistent bounds.
    pub warnings: Vec<AuditWarning>,
    /// The audit steps for the floor and remainder passes.
    pub audit_steps: Vec<AuditStep>,
}

/// Returns the variables in funding order: priority ascending, then name
/// ascending ignoring case.
///
/// The sort is stable, so entries with identical keys keep their input order.
///
/// # Examples
///
/// ```
/// use budget_planner::calculation::funding_order;
/// use budget_planner::models::VariableExpense;
///
/// let variables = vec![
///     VariableExpense::new("Transportation"),
///     VariableExpense::new("groceries"),
///     VariableExpense::new("Entertainment"),
///     VariableExpense::new("Rainy Day").with_priority(1),
/// ];
/// let names: Vec<&str> = funding_order(&variables).iter().map(|v| v.name.as_str()).collect();
/// assert_eq!(names, vec!["Rainy Day", "Entertainment", "groceries", "Transportation"]);
/// ```
pub fn funding_order(variables: &[VariableExpense]) -> Vec<&VariableExpense> {
    let mut ordered: Vec<&VariableExpense> = variables.iter().collect();
    ordered.sort_by(|a, b| compare_funding_order(a, b));
    ordered
}

fn compare_funding_order(a: &VariableExpense, b: &VariableExpense) -> Ordering {
    a.priority
        .cmp(&b.priority)
        .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
}

/// Running per-category totals, kept in order of first allocation.
#[derive(Debug, Default)]
struct Ledger {
    items: Vec<PlanItem>,
}

impl Ledger {
    fn allocated(&self, category: &str) -> Money {
        self.items
            .iter()
            .find(|item| item.category == category)
            .map_or(Money::ZERO, |item| item.allocated)
    }

    fn add(&mut self, category: &str, amount: Money) {
        match self.items.iter_mut().find(|item| item.category == category) {
            Some(item) => item.allocated += amount,
            None => self
                .items
                .push(PlanItem::new(category, ItemKind::Variable, amount)),
        }
    }
}

/// Room left under a cap; `None` means the category is uncapped.
fn cap_room(cap: Option<Money>, current: Money) -> Option<Money> {
    cap.map(|cap| (cap - current).floor_zero())
}

/// The most a category may receive right now.
fn hard_limit(room: Option<Money>, remaining: Money) -> Money {
    room.map_or(remaining, |room| room.min(remaining))
}

/// Funds variable categories out of `remaining`, floors first.
///
/// # Examples
///
/// ```
/// use budget_planner::calculation::{RoundingPolicy, allocate_variables};
/// use budget_planner::models::{Money, VariableExpense};
///
/// let variables = vec![
///     VariableExpense::new("Groceries").with_min(Money::from(200)),
///     VariableExpense::new("Transportation").with_min(Money::from(100)),
///     VariableExpense::new("Entertainment"),
/// ];
/// let policy = RoundingPolicy::new(Money::from(1));
///
/// let result = allocate_variables(&variables, Money::from(850), &policy, 4);
///
/// // Floors first, then Entertainment (alphabetically first, uncapped) takes the rest.
/// assert_eq!(result.items[0].allocated, Money::from(200));
/// assert_eq!(result.items[1].allocated, Money::from(100));
/// assert_eq!(result.items[2].category, "Entertainment");
/// assert_eq!(result.items[2].allocated, Money::from(550));
/// assert!(result.remaining.is_zero());
/// ```
pub fn allocate_variables(
    variables: &[VariableExpense],
    remaining: Money,
    policy: &RoundingPolicy,
    step_number: u32,
) -> VariableAllocationResult {
    let order = funding_order(variables);
    let mut ledger = Ledger::default();
    let mut warnings = Vec::new();
    let mut balance = remaining;

    // Floors
    let floors_start = balance;
    let mut floor_lines = Vec::new();

    for variable in &order {
        if let (Some(min), Some(max)) = (variable.min_amount, variable.max_amount) {
            if min > max {
                warnings.push(AuditWarning::new(
                    FLOOR_EXCEEDS_CAP,
                    format!(
                        "'{}' has a floor of ${} above its cap of ${}; the cap applies",
                        variable.name, min, max
                    ),
                    WarningSeverity::Low,
                ));
            }
        }

        let floor = variable.min_amount.unwrap_or(Money::ZERO);
        if !floor.is_positive() {
            continue;
        }

        let room = cap_room(variable.max_amount, ledger.allocated(&variable.name));
        let limit = hard_limit(room, balance);
        let wanted = room.map_or(floor, |room| floor.min(room));
        let allocation = policy.round_within(floor.min(limit), limit).floor_zero();

        if allocation.is_positive() {
            ledger.add(&variable.name, allocation);
            balance = policy.round_non_negative(balance - allocation);
        }

        if allocation < wanted && limit < wanted {
            debug!(
                category = %variable.name,
                floor = %floor,
                allocated = %allocation,
                "Variable floor not met"
            );
            warnings.push(AuditWarning::new(
                FLOOR_NOT_MET,
                format!(
                    "'{}' received ${} of its ${} floor",
                    variable.name, allocation, floor
                ),
                WarningSeverity::Medium,
            ));
        }

        floor_lines.push(serde_json::json!({
            "category": variable.name,
            "floor": floor.amount().to_string(),
            "allocated": allocation.amount().to_string()
        }));
    }

    let floors_funded = floors_start - balance;
    let floors_step = AuditStep {
        step_number,
        rule_id: "variable_floors".to_string(),
        rule_name: "Variable Floors".to_string(),
        input: serde_json::json!({
            "remaining": floors_start.amount().to_string(),
            "categories": order.len()
        }),
        output: serde_json::json!({
            "floors": floor_lines,
            "remaining": balance.amount().to_string()
        }),
        reasoning: format!(
            "Funded ${} of floors across {} categor{} by priority; ${} remaining",
            floors_funded,
            floor_lines.len(),
            if floor_lines.len() == 1 { "y" } else { "ies" },
            balance
        ),
    };

    // Remainder
    let remainder_start = balance;
    let mut remainder_lines = Vec::new();

    for variable in &order {
        if !balance.is_positive() {
            break;
        }

        let room = cap_room(variable.max_amount, ledger.allocated(&variable.name));
        if room.is_some_and(|room| !room.is_positive()) {
            continue;
        }

        let limit = hard_limit(room, balance);
        let addition = policy.round_within(limit, limit);
        if addition.is_positive() {
            ledger.add(&variable.name, addition);
            balance = policy.round_non_negative(balance - addition);
            remainder_lines.push(serde_json::json!({
                "category": variable.name,
                "allocated": addition.amount().to_string(),
                "capped": room.is_some()
            }));
        }
    }

    let remainder_step = AuditStep {
        step_number: step_number + 1,
        rule_id: "variable_remainder".to_string(),
        rule_name: "Variable Remainder".to_string(),
        input: serde_json::json!({
            "remaining": remainder_start.amount().to_string()
        }),
        output: serde_json::json!({
            "additions": remainder_lines,
            "remaining": balance.amount().to_string()
        }),
        reasoning: if remainder_lines.is_empty() {
            format!(
                "Nothing distributed; ${} remaining with no category able to absorb it",
                balance
            )
        } else {
            format!(
                "Distributed ${} by priority up to caps; ${} remaining",
                remainder_start - balance,
                balance
            )
        },
    };

    VariableAllocationResult {
        items: ledger.items,
        remaining: balance,
        warnings,
        audit_steps: vec![floors_step, remainder_step],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn money(s: &str) -> Money {
        Money::parse(s).unwrap()
    }

    fn whole_dollars() -> RoundingPolicy {
        RoundingPolicy::new(money("1.00"))
    }

    fn starter_variables() -> Vec<VariableExpense> {
        vec![
            VariableExpense::new("Groceries").with_min(money("200")),
            VariableExpense::new("Transportation").with_min(money("100")),
            VariableExpense::new("Entertainment"),
        ]
    }

    fn allocated(result: &VariableAllocationResult, category: &str) -> Money {
        result
            .items
            .iter()
            .find(|i| i.category == category)
            .map_or(Money::ZERO, |i| i.allocated)
    }

    #[test]
    fn test_funding_order_by_priority_then_name() {
        let variables = vec![
            VariableExpense::new("b").with_priority(2),
            VariableExpense::new("A").with_priority(2),
            VariableExpense::new("z").with_priority(1),
        ];
        let names: Vec<&str> = funding_order(&variables)
            .iter()
            .map(|v| v.name.as_str())
            .collect();
        assert_eq!(names, vec!["z", "A", "b"]);
    }

    #[test]
    fn test_funding_order_is_stable_for_equal_keys() {
        let variables = vec![
            VariableExpense::new("Food").with_min(money("1")),
            VariableExpense::new("food").with_min(money("2")),
        ];
        let order = funding_order(&variables);
        assert_eq!(order[0].min_amount, Some(money("1")));
        assert_eq!(order[1].min_amount, Some(money("2")));
    }

    #[test]
    fn test_floors_then_uncapped_remainder() {
        let result = allocate_variables(&starter_variables(), money("850"), &whole_dollars(), 1);

        assert_eq!(allocated(&result, "Groceries"), money("200"));
        assert_eq!(allocated(&result, "Transportation"), money("100"));
        assert_eq!(allocated(&result, "Entertainment"), money("550"));
        assert!(result.remaining.is_zero());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_increments_merge_into_one_item() {
        let variables = vec![VariableExpense::new("Groceries").with_min(money("200"))];
        let result = allocate_variables(&variables, money("500"), &whole_dollars(), 1);

        assert_eq!(result.items.len(), 1);
        assert_eq!(result.items[0].allocated, money("500"));
        assert_eq!(result.items[0].kind, ItemKind::Variable);
    }

    #[test]
    fn test_caps_are_respected_and_overflow_moves_on() {
        let variables = vec![
            VariableExpense::new("Dining")
                .with_max(money("150"))
                .with_priority(1),
            VariableExpense::new("Hobbies").with_priority(2),
        ];
        let result = allocate_variables(&variables, money("400"), &whole_dollars(), 1);

        assert_eq!(allocated(&result, "Dining"), money("150"));
        assert_eq!(allocated(&result, "Hobbies"), money("250"));
    }

    #[test]
    fn test_leftover_stays_when_every_category_is_capped() {
        let variables = vec![
            VariableExpense::new("Dining").with_max(money("100")),
            VariableExpense::new("Hobbies").with_max(money("50")),
        ];
        let result = allocate_variables(&variables, money("400"), &whole_dollars(), 1);

        assert_eq!(allocated(&result, "Dining"), money("100"));
        assert_eq!(allocated(&result, "Hobbies"), money("50"));
        assert_eq!(result.remaining, money("250"));
    }

    #[test]
    fn test_lower_priority_floor_starved() {
        let variables = vec![
            VariableExpense::new("Rent Buffer")
                .with_min(money("300"))
                .with_priority(1),
            VariableExpense::new("Groceries")
                .with_min(money("200"))
                .with_priority(2),
        ];
        let result = allocate_variables(&variables, money("350"), &whole_dollars(), 1);

        assert_eq!(allocated(&result, "Rent Buffer"), money("300"));
        assert_eq!(allocated(&result, "Groceries"), money("50"));
        assert!(result.remaining.is_zero());

        let floor_warnings: Vec<&AuditWarning> = result
            .warnings
            .iter()
            .filter(|w| w.code == FLOOR_NOT_MET)
            .collect();
        assert_eq!(floor_warnings.len(), 1);
        assert!(floor_warnings[0].message.contains("Groceries"));
    }

    #[test]
    fn test_floor_pass_stops_when_balance_is_gone() {
        let variables = vec![
            VariableExpense::new("A").with_min(money("100")).with_priority(1),
            VariableExpense::new("B").with_min(money("100")).with_priority(2),
        ];
        let result = allocate_variables(&variables, money("100"), &whole_dollars(), 1);

        assert_eq!(allocated(&result, "A"), money("100"));
        assert!(result.items.iter().all(|i| i.category != "B"));
        assert!(result.warnings.iter().any(|w| w.message.contains("'B'")));
    }

    #[test]
    fn test_floor_bounded_by_cap() {
        let variables = vec![
            VariableExpense::new("Gifts")
                .with_min(money("300"))
                .with_max(money("120")),
        ];
        let result = allocate_variables(&variables, money("1000"), &whole_dollars(), 1);

        assert_eq!(allocated(&result, "Gifts"), money("120"));
        assert_eq!(result.remaining, money("880"));
        assert!(result.warnings.iter().any(|w| w.code == FLOOR_EXCEEDS_CAP));
        assert!(!result.warnings.iter().any(|w| w.code == FLOOR_NOT_MET));
    }

    #[test]
    fn test_fractional_cap_is_never_exceeded() {
        let variables = vec![VariableExpense::new("Coffee").with_max(money("40.50"))];
        let result = allocate_variables(&variables, money("100"), &whole_dollars(), 1);

        assert_eq!(allocated(&result, "Coffee"), money("40"));
        assert_eq!(result.remaining, money("60"));
    }

    #[test]
    fn test_zero_balance_funds_nothing() {
        let result = allocate_variables(&starter_variables(), Money::ZERO, &whole_dollars(), 1);

        assert!(result.items.is_empty());
        assert!(result.remaining.is_zero());
        assert_eq!(
            result
                .warnings
                .iter()
                .filter(|w| w.code == FLOOR_NOT_MET)
                .count(),
            2
        );
    }

    #[test]
    fn test_no_rounding_distributes_exact_cents() {
        let policy = RoundingPolicy::new(Money::ZERO);
        let variables = vec![VariableExpense::new("Misc").with_min(money("10.333"))];
        let result = allocate_variables(&variables, money("25.555"), &policy, 1);

        assert_eq!(allocated(&result, "Misc"), money("25.555"));
        assert!(result.remaining.is_zero());
    }

    #[test]
    fn test_audit_steps_are_numbered_in_sequence() {
        let result = allocate_variables(&starter_variables(), money("850"), &whole_dollars(), 4);

        assert_eq!(result.audit_steps.len(), 2);
        assert_eq!(result.audit_steps[0].step_number, 4);
        assert_eq!(result.audit_steps[0].rule_id, "variable_floors");
        assert_eq!(result.audit_steps[1].step_number, 5);
        assert_eq!(result.audit_steps[1].rule_id, "variable_remainder");
        assert_eq!(
            result.audit_steps[1].output["additions"][0]["category"]
                .as_str()
                .unwrap(),
            "Entertainment"
        );
    }
}
