//! The allocation engine.
//!
//! [`Planner::build_plan`] runs the full pipeline over a [`PlanningInput`]:
//!
//! 1. Totals: sum incomes and fixed expenses.
//! 2. Fixed expenses, in input order.
//! 3. Savings: `total_income × savings_rate_min`.
//! 4. Variable floors, by priority.
//! 5. Variable remainder, by priority, up to caps.
//! 6. Summary.
//!
//! The planner is a pure function of its input. It never fails: shortfalls
//! degrade the plan and are recorded as audit warnings.

use tracing::debug;

use crate::models::{
    AuditStep, AuditTrace, ItemKind, Money, PlanResult, PlanSummary, PlanningInput,
};

use super::{RoundingPolicy, allocate_fixed, allocate_savings, allocate_variables, compute_totals};

/// Builds budget plans.
///
/// # Example
///
/// ```
/// use budget_planner::calculation::Planner;
/// use budget_planner::config::starter_input;
/// use budget_planner::models::Money;
///
/// let mut input = starter_input();
/// input.incomes[0].amount = Money::from(2500);
/// input.fixed[0].amount = Money::from(700);
/// input.fixed[1].amount = Money::from(700);
///
/// let plan = Planner::new().build_plan(&input);
/// assert_eq!(plan.summary.total_income, Money::from(2500));
/// assert_eq!(plan.summary.savings, Money::from(250));
/// assert!(plan.summary.remaining.is_zero());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Planner;

impl Planner {
    /// Creates a planner.
    pub fn new() -> Self {
        Self
    }

    /// Allocates the input's income across fixed expenses, savings and
    /// variable categories.
    pub fn build_plan(&self, input: &PlanningInput) -> PlanResult {
        let policy = RoundingPolicy::from_preferences(&input.preferences);
        let mut steps: Vec<AuditStep> = Vec::new();
        let mut warnings = Vec::new();
        let mut step_number: u32 = 1;

        let totals = compute_totals(input, &policy, step_number);
        steps.push(totals.audit_step);
        step_number += 1;

        let fixed = allocate_fixed(input, totals.total_income, &policy, step_number);
        steps.push(fixed.audit_step);
        warnings.extend(fixed.warning);
        step_number += 1;
        let mut items = fixed.items;

        let savings = allocate_savings(
            totals.total_income,
            fixed.remaining,
            input.preferences.savings_rate_min,
            &policy,
            step_number,
        );
        steps.push(savings.audit_step);
        warnings.extend(savings.warning);
        step_number += 1;
        items.extend(savings.item);

        let variables =
            allocate_variables(&input.variables, savings.remaining, &policy, step_number);
        step_number += variables.audit_steps.len() as u32;
        steps.extend(variables.audit_steps);
        warnings.extend(variables.warnings);
        items.extend(variables.items);

        let variable_total: Money = items
            .iter()
            .filter(|item| item.kind == ItemKind::Variable)
            .map(|item| item.allocated)
            .sum();
        let savings_total: Money = items
            .iter()
            .filter(|item| item.kind == ItemKind::Savings)
            .map(|item| item.allocated)
            .sum();

        let total_expenses = policy.round(totals.fixed_total + variable_total);
        let savings_total = policy.round(savings_total);
        let remaining =
            policy.round_non_negative(totals.total_income - total_expenses - savings_total);

        let summary = PlanSummary {
            total_income: totals.total_income,
            total_expenses,
            savings: savings_total,
            remaining,
        };

        let item_counts: serde_json::Map<String, serde_json::Value> =
            [ItemKind::Fixed, ItemKind::Variable, ItemKind::Savings]
                .into_iter()
                .map(|kind| {
                    let count = items.iter().filter(|item| item.kind == kind).count();
                    (kind.as_str().to_string(), count.into())
                })
                .collect();

        steps.push(AuditStep {
            step_number,
            rule_id: "summary".to_string(),
            rule_name: "Plan Summary".to_string(),
            input: serde_json::json!({
                "fixed_total": totals.fixed_total.amount().to_string(),
                "variable_total": variable_total.amount().to_string(),
                "savings_total": savings_total.amount().to_string(),
                "item_counts": item_counts
            }),
            output: serde_json::json!({
                "total_income": summary.total_income.amount().to_string(),
                "total_expenses": summary.total_expenses.amount().to_string(),
                "savings": summary.savings.amount().to_string(),
                "remaining": summary.remaining.amount().to_string()
            }),
            reasoning: format!(
                "${} income - ${} expenses - ${} savings = ${} remaining",
                summary.total_income, summary.total_expenses, summary.savings, summary.remaining
            ),
        });

        debug!(
            items = items.len(),
            warnings = warnings.len(),
            total_income = %summary.total_income,
            remaining = %summary.remaining,
            "Plan built"
        );

        PlanResult {
            items,
            summary,
            audit_trace: AuditTrace { steps, warnings },
        }
    }
}
