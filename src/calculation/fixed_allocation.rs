//! Fixed expense allocation.
//!
//! Fixed expenses are funded first and always at their nominal (rounded)
//! amount. When they exceed income the overrun is absorbed: the running
//! balance stops at zero and a warning is recorded, but every fixed item is
//! still listed.

use tracing::debug;

use crate::models::{
    AuditStep, AuditWarning, ItemKind, Money, PlanItem, PlanningInput, WarningSeverity,
};

use super::RoundingPolicy;

/// Warning code raised when fixed costs use up more than the total income.
pub const FIXED_COSTS_EXCEED_INCOME: &str = "FIXED_COSTS_EXCEED_INCOME";

/// The result of funding fixed expenses.
#[derive(Debug, Clone)]
pub struct FixedAllocationResult {
    /// One item per fixed expense with a positive rounded amount, in input order.
    pub items: Vec<PlanItem>,
    /// The balance left for savings and variables; never negative.
    pub remaining: Money,
    /// Set when fixed costs overran the income.
    pub warning: Option<AuditWarning>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Funds every fixed expense out of `total_income`.
///
/// Each amount is rounded to the step before it is listed and subtracted;
/// the balance is clamped at zero after every subtraction.
///
/// # Examples
///
/// ```
/// use budget_planner::calculation::{RoundingPolicy, allocate_fixed};
/// use budget_planner::config::starter_input;
/// use budget_planner::models::Money;
///
/// let mut input = starter_input();
/// input.fixed[0].amount = Money::from(700);
/// input.fixed[1].amount = Money::from(700);
///
/// let policy = RoundingPolicy::from_preferences(&input.preferences);
/// let result = allocate_fixed(&input, Money::from(2500), &policy, 2);
///
/// assert_eq!(result.items.len(), 2);
/// assert_eq!(result.remaining, Money::from(1100));
/// assert!(result.warning.is_none());
/// ```
pub fn allocate_fixed(
    input: &PlanningInput,
    total_income: Money,
    policy: &RoundingPolicy,
    step_number: u32,
) -> FixedAllocationResult {
    let mut items = Vec::new();
    let mut remaining = total_income;
    let mut overrun = false;

    for expense in &input.fixed {
        let amount = policy.round(expense.amount);
        if amount.is_positive() {
            items.push(PlanItem::new(&expense.name, ItemKind::Fixed, amount));
        }

        let balance = policy.round(remaining - amount);
        if balance.is_negative() {
            overrun = true;
        }
        remaining = balance.floor_zero();
    }

    let funded: Money = items.iter().map(|item| item.allocated).sum();

    let warning = if overrun {
        debug!(
            total_income = %total_income,
            fixed_funded = %funded,
            "Fixed costs exceed income; remaining clamped to zero"
        );
        Some(AuditWarning::new(
            FIXED_COSTS_EXCEED_INCOME,
            format!(
                "Fixed costs of ${} exceed total income of ${}",
                funded, total_income
            ),
            WarningSeverity::High,
        ))
    } else {
        None
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "fixed_allocation".to_string(),
        rule_name: "Fixed Expenses".to_string(),
        input: serde_json::json!({
            "total_income": total_income.amount().to_string(),
            "fixed_expenses": input.fixed.len()
        }),
        output: serde_json::json!({
            "items_funded": items.len(),
            "fixed_funded": funded.amount().to_string(),
            "remaining": remaining.amount().to_string(),
            "overrun": overrun
        }),
        reasoning: if overrun {
            format!(
                "${} income - ${} fixed costs is negative; remaining clamped to $0.00",
                total_income, funded
            )
        } else {
            format!(
                "${} income - ${} fixed costs = ${} remaining",
                total_income, funded, remaining
            )
        },
    };

    FixedAllocationResult {
        items,
        remaining,
        warning,
        audit_step,
    }
}
