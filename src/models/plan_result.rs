//! Plan result models for the budget planner.
//!
//! This module contains the [`PlanResult`] type and its associated structures
//! that capture all outputs from an allocation run: line items, the summary
//! totals, and an audit trace explaining each stage of the pipeline.

use serde::{Deserialize, Serialize};

use super::Money;

/// Which stage of the pipeline funded a line item.
///
/// # Example
///
/// ```
/// use budget_planner::models::ItemKind;
///
/// let kind = ItemKind::Savings;
/// assert_eq!(kind.as_str(), "savings");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// A fixed expense, funded first.
    Fixed,
    /// A variable spending category.
    Variable,
    /// The savings target.
    Savings,
}

impl ItemKind {
    /// Returns the wire name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Fixed => "fixed",
            ItemKind::Variable => "variable",
            ItemKind::Savings => "savings",
        }
    }
}

/// A single funded category in the plan.
///
/// Categories that receive nothing are left out of the plan, so `allocated`
/// is always positive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanItem {
    /// Category name.
    pub category: String,
    /// The stage that funded this item.
    pub kind: ItemKind,
    /// The amount allocated.
    pub allocated: Money,
}

impl PlanItem {
    /// Creates a new line item.
    pub fn new(category: impl Into<String>, kind: ItemKind, allocated: Money) -> Self {
        Self {
            category: category.into(),
            kind,
            allocated,
        }
    }
}

/// Aggregated totals for a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanSummary {
    /// Sum of all incomes.
    pub total_income: Money,
    /// Fixed plus variable spending.
    pub total_expenses: Money,
    /// Amount set aside as savings.
    pub savings: Money,
    /// Unallocated money; never negative.
    pub remaining: Money,
}

/// A single step in the audit trace recording one pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the stage.
    pub rule_id: String,
    /// The human-readable name of the stage.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// How serious an [`AuditWarning`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningSeverity {
    /// Worth a glance.
    Low,
    /// Part of the plan could not be funded as requested.
    Medium,
    /// The plan cannot cover its fixed costs.
    High,
}

/// A warning generated during allocation.
///
/// Warnings never change the allocation; they explain where the plan fell
/// short of what was asked for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level.
    pub severity: WarningSeverity,
}

impl AuditWarning {
    /// Creates a new warning.
    pub fn new(code: &str, message: impl Into<String>, severity: WarningSeverity) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            severity,
        }
    }
}

/// The complete audit trace for an allocation run.
///
/// The trace holds no timestamps or durations, so identical inputs always
/// produce identical traces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of pipeline steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during allocation.
    pub warnings: Vec<AuditWarning>,
}

impl AuditTrace {
    /// Returns true if a warning with the given code was recorded.
    pub fn has_warning(&self, code: &str) -> bool {
        self.warnings.iter().any(|w| w.code == code)
    }
}

/// The complete result of an allocation run.
///
/// # Example
///
/// ```
/// use budget_planner::models::{AuditTrace, ItemKind, Money, PlanItem, PlanResult, PlanSummary};
///
/// let result = PlanResult {
///     items: vec![PlanItem::new("Rent", ItemKind::Fixed, Money::from(700))],
///     summary: PlanSummary {
///         total_income: Money::from(1000),
///         total_expenses: Money::from(700),
///         savings: Money::ZERO,
///         remaining: Money::from(300),
///     },
///     audit_trace: AuditTrace::default(),
/// };
/// assert_eq!(result.total_for(ItemKind::Fixed), Money::from(700));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanResult {
    /// Funded line items: fixed first, then savings, then variables.
    pub items: Vec<PlanItem>,
    /// Aggregated totals.
    pub summary: PlanSummary,
    /// Explanation of every pipeline stage.
    pub audit_trace: AuditTrace,
}

impl PlanResult {
    /// Sums the allocations of every item of the given kind.
    pub fn total_for(&self, kind: ItemKind) -> Money {
        self.items
            .iter()
            .filter(|item| item.kind == kind)
            .map(|item| item.allocated)
            .sum()
    }

    /// Looks up a line item by category name.
    pub fn item(&self, category: &str) -> Option<&PlanItem> {
        self.items.iter().find(|item| item.category == category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result() -> PlanResult {
        PlanResult {
            items: vec![
                PlanItem::new("Rent", ItemKind::Fixed, Money::from(700)),
                PlanItem::new("Utilities", ItemKind::Fixed, Money::from(100)),
                PlanItem::new("Savings", ItemKind::Savings, Money::from(120)),
                PlanItem::new("Groceries", ItemKind::Variable, Money::from(280)),
            ],
            summary: PlanSummary {
                total_income: Money::from(1200),
                total_expenses: Money::from(1080),
                savings: Money::from(120),
                remaining: Money::ZERO,
            },
            audit_trace: AuditTrace::default(),
        }
    }

    #[test]
    fn test_total_for_kind() {
        let result = sample_result();
        assert_eq!(result.total_for(ItemKind::Fixed), Money::from(800));
        assert_eq!(result.total_for(ItemKind::Savings), Money::from(120));
        assert_eq!(result.total_for(ItemKind::Variable), Money::from(280));
    }

    #[test]
    fn test_item_lookup() {
        let result = sample_result();
        assert_eq!(result.item("Groceries").unwrap().kind, ItemKind::Variable);
        assert!(result.item("Dining").is_none());
    }

    #[test]
    fn test_item_kind_serialization() {
        assert_eq!(serde_json::to_string(&ItemKind::Fixed).unwrap(), "\"fixed\"");
        assert_eq!(
            serde_json::to_string(&ItemKind::Variable).unwrap(),
            "\"variable\""
        );
        let kind: ItemKind = serde_json::from_str("\"savings\"").unwrap();
        assert_eq!(kind, ItemKind::Savings);
    }

    #[test]
    fn test_plan_item_serialization() {
        let item = PlanItem::new("Rent", ItemKind::Fixed, Money::parse("700.00").unwrap());
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"category\":\"Rent\""));
        assert!(json.contains("\"kind\":\"fixed\""));
        assert!(json.contains("\"allocated\":\"700.00\""));
    }

    #[test]
    fn test_warning_severity_serialization() {
        let warning = AuditWarning::new("SAVINGS_TARGET_NOT_MET", "short", WarningSeverity::Medium);
        let json = serde_json::to_string(&warning).unwrap();
        assert!(json.contains("\"severity\":\"medium\""));
    }

    #[test]
    fn test_has_warning() {
        let trace = AuditTrace {
            steps: vec![],
            warnings: vec![AuditWarning::new("FLOOR_NOT_MET", "x", WarningSeverity::Medium)],
        };
        assert!(trace.has_warning("FLOOR_NOT_MET"));
        assert!(!trace.has_warning("FLOOR_EXCEEDS_CAP"));
    }

    #[test]
    fn test_plan_result_round_trips_through_json() {
        let result = sample_result();
        let json = serde_json::to_string(&result).unwrap();
        let parsed: PlanResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, result);
    }
}
