//! Savings allocation.
//!
//! Savings are funded after fixed expenses and before any variable category.
//! The target is a fraction of total income; when the balance cannot cover
//! it, savings take whatever is left instead of failing.

use rust_decimal::Decimal;
use tracing::debug;

use crate::models::{AuditStep, AuditWarning, ItemKind, Money, PlanItem, WarningSeverity};

use super::RoundingPolicy;

/// Category name used for the savings line item.
pub const SAVINGS_CATEGORY: &str = "Savings";

/// Warning code raised when savings receive less than their target.
pub const SAVINGS_TARGET_NOT_MET: &str = "SAVINGS_TARGET_NOT_MET";

/// The result of funding savings.
#[derive(Debug, Clone)]
pub struct SavingsAllocationResult {
    /// The savings line item, present only when something was allocated.
    pub item: Option<PlanItem>,
    /// The rounded savings target (zero when the rate is not positive).
    pub target: Money,
    /// The amount actually set aside.
    pub allocated: Money,
    /// The balance left for variable categories.
    pub remaining: Money,
    /// Set when the target could not be met in full.
    pub warning: Option<AuditWarning>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Sets aside `total_income × savings_rate_min` out of `remaining`.
///
/// A rate of zero or less skips savings entirely: no item, no warning.
///
/// # Examples
///
/// ```
/// use budget_planner::calculation::{RoundingPolicy, allocate_savings};
/// use budget_planner::models::Money;
/// use rust_decimal::Decimal;
///
/// let policy = RoundingPolicy::new(Money::from(1));
/// let rate = Decimal::new(1, 1); // 10%
///
/// let result = allocate_savings(Money::from(2500), Money::from(1100), rate, &policy, 3);
/// assert_eq!(result.allocated, Money::from(250));
/// assert_eq!(result.remaining, Money::from(850));
/// ```
pub fn allocate_savings(
    total_income: Money,
    remaining: Money,
    savings_rate_min: Decimal,
    policy: &RoundingPolicy,
    step_number: u32,
) -> SavingsAllocationResult {
    let target = if savings_rate_min > Decimal::ZERO {
        policy.round(total_income * savings_rate_min)
    } else {
        Money::ZERO
    };

    let mut allocated = Money::ZERO;
    let mut balance = remaining;

    if target.is_positive() {
        allocated = if remaining >= target {
            target
        } else {
            remaining.floor_zero()
        };
        allocated = policy.round(allocated);
        if allocated.is_positive() {
            balance = policy.round_non_negative(remaining - allocated);
        }
    }

    let item = allocated
        .is_positive()
        .then(|| PlanItem::new(SAVINGS_CATEGORY, ItemKind::Savings, allocated));

    let warning = if target.is_positive() && allocated < target {
        debug!(
            target = %target,
            allocated = %allocated,
            "Savings target not met"
        );
        Some(AuditWarning::new(
            SAVINGS_TARGET_NOT_MET,
            format!(
                "Savings target of ${} could only be funded with ${}",
                target, allocated
            ),
            WarningSeverity::Medium,
        ))
    } else {
        None
    };

    let reasoning = if !target.is_positive() {
        "No savings target - savings rate is zero".to_string()
    } else if allocated == target {
        format!(
            "${} income x {} = ${} set aside; ${} remaining",
            total_income,
            savings_rate_min.normalize(),
            target,
            balance
        )
    } else {
        format!(
            "${} income x {} = ${} target, but only ${} was available",
            total_income,
            savings_rate_min.normalize(),
            target,
            allocated
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "savings_allocation".to_string(),
        rule_name: "Savings Target".to_string(),
        input: serde_json::json!({
            "total_income": total_income.amount().to_string(),
            "savings_rate_min": savings_rate_min.normalize().to_string(),
            "remaining": remaining.amount().to_string()
        }),
        output: serde_json::json!({
            "target": target.amount().to_string(),
            "allocated": allocated.amount().to_string(),
            "remaining": balance.amount().to_string(),
            "target_met": allocated >= target
        }),
        reasoning,
    };

    SavingsAllocationResult {
        item,
        target,
        allocated,
        remaining: balance,
        warning,
        audit_step,
    }
}
