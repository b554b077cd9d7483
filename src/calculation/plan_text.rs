//! The newline-delimited `category-amount-percent` plan format.
//!
//! Each line holds one category. The percent field is written as `0` and is
//! recomputed from the amounts by whoever displays the plan.

use std::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::Money;

use super::LegacyInput;

/// One line of a text plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyRecord {
    /// Category name.
    pub category: String,
    /// Allocated amount.
    pub amount: Money,
    /// Share of the plan total in percent.
    pub percent: Decimal,
}

impl LegacyRecord {
    /// Creates a record with a zero percent.
    pub fn new(category: impl Into<String>, amount: Money) -> Self {
        Self {
            category: category.into(),
            amount,
            percent: Decimal::ZERO,
        }
    }
}

impl fmt::Display for LegacyRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}",
            self.category,
            shortest_amount(self.amount),
            self.percent.normalize()
        )
    }
}

/// Writes an amount without trailing zeros but with at least one decimal
/// place: `500.0`, `333.33`, `12.5`.
fn shortest_amount(amount: Money) -> String {
    let text = amount.amount().normalize().to_string();
    if text.contains('.') {
        text
    } else {
        format!("{}.0", text)
    }
}

/// Runs the percentage split and renders it as text, one line per category.
///
/// # Examples
///
/// ```
/// use budget_planner::calculation::{generate_plan_text, LegacyInput};
///
/// let input: LegacyInput = serde_json::from_str(r#"{
///     "income_input": [{"name": "Job", "period": "month", "amount": 1000}],
///     "fixed_costs": [],
///     "budget_preference": [
///         {"category": "Dining", "percent": 50},
///         {"category": "Shopping", "percent": 50}
///     ]
/// }"#).unwrap();
///
/// assert_eq!(generate_plan_text(&input), "Dining-500.0-0\nShopping-500.0-0");
/// ```
pub fn generate_plan_text(input: &LegacyInput) -> String {
    input
        .allocate()
        .into_iter()
        .map(|allocation| LegacyRecord::new(allocation.category, allocation.amount).to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Reads a text plan back into records.
///
/// Lines that do not split into exactly three `-`-separated fields, or whose
/// amount or percent is not a number, are skipped. A negative amount adds a
/// fourth field, so such lines are skipped too.
pub fn parse_plan_text(text: &str) -> Vec<LegacyRecord> {
    text.trim()
        .lines()
        .filter_map(|line| {
            let record = parse_line(line);
            if record.is_none() {
                debug!(line = %line, "Skipping malformed plan line");
            }
            record
        })
        .collect()
}

fn parse_line(line: &str) -> Option<LegacyRecord> {
    let fields: Vec<&str> = line.split('-').collect();
    let [category, amount, percent] = fields.as_slice() else {
        return None;
    };

    Some(LegacyRecord {
        category: category.trim().to_string(),
        amount: Money::parse(amount).ok()?,
        percent: Decimal::from_str(percent.trim()).ok()?,
    })
}

/// Fills in each record's percent as its share of the records' total amount,
/// rounded to 2 decimal places. All percents are zero when the total is not
/// positive.
pub fn recompute_percentages(records: &mut [LegacyRecord]) {
    let total: Money = records.iter().map(|record| record.amount).sum();

    for record in records.iter_mut() {
        record.percent = if total.is_positive() {
            record
                .amount
                .amount()
                .checked_div(total.amount())
                .and_then(|share| share.checked_mul(Decimal::ONE_HUNDRED))
                .map(|percent| percent.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
                .unwrap_or(Decimal::ZERO)
        } else {
            Decimal::ZERO
        };
    }
}
