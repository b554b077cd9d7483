//! Percentage-split allocation.
//!
//! A simpler, independent strategy kept for the text-based input path: the
//! money left after fixed costs is split across categories in proportion to
//! their percentages. It shares no rules with [`Planner`](super::Planner):
//! no floors, caps, priorities or savings target.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::Money;

/// How often an income is received.
///
/// Anything other than `"week"` (in any case) is treated as monthly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IncomePeriod {
    /// Paid monthly.
    #[default]
    Month,
    /// Paid weekly; counted as four weeks per month.
    Week,
}

impl IncomePeriod {
    /// Factor that converts an amount for this period into a monthly amount.
    pub fn monthly_factor(&self) -> Decimal {
        match self {
            IncomePeriod::Month => Decimal::ONE,
            IncomePeriod::Week => Decimal::from(4),
        }
    }
}

impl From<String> for IncomePeriod {
    fn from(value: String) -> Self {
        if value.trim().eq_ignore_ascii_case("week") {
            IncomePeriod::Week
        } else {
            IncomePeriod::Month
        }
    }
}

impl From<IncomePeriod> for String {
    fn from(period: IncomePeriod) -> Self {
        match period {
            IncomePeriod::Month => "month".to_string(),
            IncomePeriod::Week => "week".to_string(),
        }
    }
}

/// An income line from the text-based form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyIncome {
    /// Income source name.
    pub name: String,
    /// Pay period of `amount`.
    #[serde(default)]
    pub period: IncomePeriod,
    /// Amount per period.
    pub amount: Money,
}

impl LegacyIncome {
    /// The amount converted to a monthly figure.
    pub fn monthly_amount(&self) -> Money {
        self.amount * self.period.monthly_factor()
    }
}

/// A fixed cost from the text-based form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyFixedCost {
    /// Cost name.
    pub name: String,
    /// Monthly amount.
    pub amount: Money,
}

/// A category and its share of the available money.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryShare {
    /// Category name.
    pub category: String,
    /// Share in whole percent.
    pub percent: u32,
}

/// Per-category bounds collected by the form.
///
/// The percentage split does not apply them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryBounds {
    /// Category name.
    pub category: String,
    /// Lower bound in percent.
    pub min: u32,
    /// Upper bound in percent.
    pub max: u32,
}

/// Everything the text-based form submits.
///
/// # Example
///
/// ```
/// use budget_planner::calculation::LegacyInput;
/// use budget_planner::models::Money;
///
/// let input: LegacyInput = serde_json::from_str(r#"{
///     "income_input": [
///         {"name": "Job", "period": "month", "amount": 2000},
///         {"name": "Tutoring", "period": "Week", "amount": 50}
///     ],
///     "fixed_costs": [{"name": "Rent", "amount": 900}],
///     "budget_preference": [{"category": "Food", "percent": 100}]
/// }"#).unwrap();
///
/// assert_eq!(input.total_income(), Money::from(2200));
/// assert_eq!(input.total_fixed(), Money::from(900));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LegacyInput {
    /// Income lines.
    #[serde(default)]
    pub income_input: Vec<LegacyIncome>,
    /// Fixed costs.
    #[serde(default)]
    pub fixed_costs: Vec<LegacyFixedCost>,
    /// Category percentages.
    #[serde(default)]
    pub budget_preference: Vec<CategoryShare>,
    /// Per-category bounds, carried but not applied.
    #[serde(default)]
    pub constraints: Vec<CategoryBounds>,
}

impl LegacyInput {
    /// Total monthly income, with weekly entries multiplied by four.
    pub fn total_income(&self) -> Money {
        self.income_input.iter().map(LegacyIncome::monthly_amount).sum()
    }

    /// Total fixed costs.
    pub fn total_fixed(&self) -> Money {
        self.fixed_costs.iter().map(|cost| cost.amount).sum()
    }

    /// Splits the money left after fixed costs across the preferences.
    pub fn allocate(&self) -> Vec<PercentAllocation> {
        allocate_by_percent(
            self.total_income(),
            self.total_fixed(),
            &self.budget_preference,
        )
    }
}

/// One category's share of the available money.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PercentAllocation {
    /// Category name.
    pub category: String,
    /// Amount, rounded to cents.
    pub amount: Money,
}

/// Splits `total_income - total_fixed` across `shares` in proportion to
/// their percentages.
///
/// Percentages are normalized by their own sum, so they need not add up to
/// 100. When they sum to zero every category receives zero. Output order
/// follows `shares`. The available amount is not clamped: if fixed costs
/// exceed income the allocations are negative.
///
/// # Examples
///
/// ```
/// use budget_planner::calculation::{CategoryShare, allocate_by_percent};
/// use budget_planner::models::Money;
///
/// let shares = vec![
///     CategoryShare { category: "Dining".to_string(), percent: 50 },
///     CategoryShare { category: "Shopping".to_string(), percent: 50 },
/// ];
/// let plan = allocate_by_percent(Money::from(1000), Money::ZERO, &shares);
/// assert_eq!(plan[0].amount, Money::from(500));
/// assert_eq!(plan[1].amount, Money::from(500));
/// ```
pub fn allocate_by_percent(
    total_income: Money,
    total_fixed: Money,
    shares: &[CategoryShare],
) -> Vec<PercentAllocation> {
    let available = total_income - total_fixed;
    let total_percent: u64 = shares.iter().map(|share| u64::from(share.percent)).sum();
    let total_percent = Decimal::from(total_percent);

    shares
        .iter()
        .map(|share| {
            let amount = (available * Decimal::from(share.percent))
                .checked_div(total_percent)
                .unwrap_or(Money::ZERO);
            PercentAllocation {
                category: share.category.clone(),
                amount: amount.round2(),
            }
        })
        .collect()
}

/// Checks that the category percentages add up to exactly 100.
///
/// The form enforces this before submitting; [`allocate_by_percent`] itself
/// does not require it.
///
/// # Examples
///
/// ```
/// use budget_planner::calculation::{CategoryShare, validate_percent_total};
///
/// let shares = vec![
///     CategoryShare { category: "Food".to_string(), percent: 60 },
///     CategoryShare { category: "Fun".to_string(), percent: 30 },
/// ];
/// assert!(validate_percent_total(&shares).is_err());
/// ```
pub fn validate_percent_total(shares: &[CategoryShare]) -> EngineResult<()> {
    let total: u64 = shares.iter().map(|share| u64::from(share.percent)).sum();
    if total == 100 {
        Ok(())
    } else {
        Err(EngineError::InvalidPercentTotal { total })
    }
}
