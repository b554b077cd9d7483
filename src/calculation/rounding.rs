//! Rounding policy shared by every stage of the planner.

use crate::models::{Money, Preferences};

/// Rounds amounts to the caller's chosen step.
///
/// A step of zero or less disables rounding: amounts pass through unchanged.
///
/// # Examples
///
/// ```
/// use budget_planner::calculation::RoundingPolicy;
/// use budget_planner::models::Money;
///
/// let policy = RoundingPolicy::new(Money::parse("1.00").unwrap());
/// assert_eq!(policy.round(Money::parse("249.50").unwrap()), Money::from(250));
///
/// // Half-up would give 151, which exceeds the bound, so it floors instead.
/// let bound = Money::parse("150.60").unwrap();
/// assert_eq!(policy.round_within(bound, bound), Money::from(150));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundingPolicy {
    step: Money,
}

impl RoundingPolicy {
    /// Creates a policy for the given step.
    pub fn new(step: Money) -> Self {
        Self { step }
    }

    /// Creates the policy described by the caller's preferences.
    pub fn from_preferences(preferences: &Preferences) -> Self {
        Self::new(preferences.round_to)
    }

    /// Returns the configured step.
    pub fn step(&self) -> Money {
        self.step
    }

    /// Returns true if rounding is active.
    pub fn is_enabled(&self) -> bool {
        self.step.is_positive()
    }

    /// Rounds to the nearest step, half-up.
    pub fn round(&self, amount: Money) -> Money {
        if !self.is_enabled() {
            return amount;
        }
        amount.quantize_to_step(self.step)
    }

    /// Rounds `amount` to the step without letting the result exceed `bound`.
    ///
    /// `amount` is expected to be at most `bound`. When half-up rounding
    /// would overshoot, the bound is floored to the step instead.
    pub fn round_within(&self, amount: Money, bound: Money) -> Money {
        let rounded = self.round(amount);
        if rounded > bound {
            bound.floor_to_step(self.step)
        } else {
            rounded
        }
    }

    /// Rounds and clamps at zero.
    pub fn round_non_negative(&self, amount: Money) -> Money {
        self.round(amount).floor_zero()
    }
}
