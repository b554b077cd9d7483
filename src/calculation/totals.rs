//! Income and fixed-cost totals.
//!
//! This is the first stage of the planner: everything after it works from
//! these two rounded figures.

use crate::models::{AuditStep, Money, PlanningInput};

use super::RoundingPolicy;

/// The rounded totals for a planning input, with the audit step recording them.
#[derive(Debug, Clone)]
pub struct TotalsResult {
    /// Sum of all incomes, rounded.
    pub total_income: Money,
    /// Sum of all fixed expenses, rounded.
    pub fixed_total: Money,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Sums incomes and fixed expenses and rounds both totals to the step.
///
/// # Examples
///
/// ```
/// use budget_planner::calculation::{RoundingPolicy, compute_totals};
/// use budget_planner::config::starter_input;
/// use budget_planner::models::Money;
///
/// let mut input = starter_input();
/// input.incomes[0].amount = Money::from(2500);
/// input.fixed[0].amount = Money::from(700);
/// input.fixed[1].amount = Money::from(700);
///
/// let policy = RoundingPolicy::from_preferences(&input.preferences);
/// let totals = compute_totals(&input, &policy, 1);
/// assert_eq!(totals.total_income, Money::from(2500));
/// assert_eq!(totals.fixed_total, Money::from(1400));
/// ```
pub fn compute_totals(
    input: &PlanningInput,
    policy: &RoundingPolicy,
    step_number: u32,
) -> TotalsResult {
    let total_income = policy.round(input.incomes.iter().map(|i| i.amount).sum());
    let fixed_total = policy.round(input.fixed.iter().map(|f| f.amount).sum());

    let audit_step = AuditStep {
        step_number,
        rule_id: "totals".to_string(),
        rule_name: "Income and Fixed Totals".to_string(),
        input: serde_json::json!({
            "income_sources": input.incomes.len(),
            "fixed_expenses": input.fixed.len(),
            "round_to": policy.step().amount().normalize().to_string()
        }),
        output: serde_json::json!({
            "total_income": total_income.amount().to_string(),
            "fixed_total": fixed_total.amount().to_string()
        }),
        reasoning: format!(
            "{} income source(s) total ${}; {} fixed expense(s) total ${}",
            input.incomes.len(),
            total_income,
            input.fixed.len(),
            fixed_total
        ),
    };

    TotalsResult {
        total_income,
        fixed_total,
        audit_step,
    }
}
