//! Exact monetary amounts.
//!
//! [`Money`] wraps a [`Decimal`] and only exposes the operations a budget
//! needs: addition and subtraction between amounts, scaling by a plain
//! decimal factor, checked division, comparison, and rounding. Conversions
//! from text or floats happen once, at the boundary, and fail with
//! [`EngineError::InvalidAmount`] instead of silently becoming zero.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// An exact decimal amount of money.
///
/// Every operation returns a new `Money`; intermediate results never decay
/// to a bare numeric type. Addition, subtraction and scaling saturate at
/// [`Decimal::MAX`] and [`Decimal::MIN`] instead of panicking.
///
/// # Example
///
/// ```
/// use budget_planner::models::Money;
///
/// let rent: Money = "700".parse().unwrap();
/// let utilities = Money::parse("149.995").unwrap();
///
/// let total = rent + utilities;
/// assert_eq!(total.round2(), Money::parse("850.00").unwrap());
/// assert_eq!(total.to_string(), "850.00");
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Zero.
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Wraps a decimal value.
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Parses an amount from text such as `"1250.50"`.
    ///
    /// Surrounding whitespace is ignored. Anything else that is not a plain
    /// decimal number is rejected.
    pub fn parse(value: &str) -> EngineResult<Self> {
        Decimal::from_str(value.trim())
            .map(Self)
            .map_err(|_| EngineError::InvalidAmount {
                value: value.to_string(),
            })
    }

    /// Converts a float using its shortest round-trip text form, so `0.1`
    /// becomes exactly `0.1` rather than its binary expansion.
    ///
    /// NaN and infinities are rejected.
    pub fn from_f64(value: f64) -> EngineResult<Self> {
        Self::parse(&value.to_string())
    }

    /// Returns the underlying decimal.
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Rounds to cents, half-up.
    pub fn round2(&self) -> Self {
        Self(
            self.0
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Rounds to the nearest multiple of `step`, half-up.
    ///
    /// A zero or negative step leaves the amount unchanged.
    ///
    /// ```
    /// use budget_planner::models::Money;
    ///
    /// let m = Money::parse("12.50").unwrap();
    /// assert_eq!(m.quantize_to_step(Money::parse("1").unwrap()), Money::parse("13").unwrap());
    /// assert_eq!(m.quantize_to_step(Money::parse("0.05").unwrap()), m);
    /// ```
    pub fn quantize_to_step(&self, step: Money) -> Self {
        if !step.is_positive() {
            return *self;
        }
        // Steps too fine to count in a Decimal leave the amount as it is.
        self.0
            .checked_div(step.0)
            .map(|units| units.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
            .and_then(|units| units.checked_mul(step.0))
            .map_or(*self, Self)
    }

    /// Rounds down to a multiple of `step`.
    ///
    /// A zero or negative step leaves the amount unchanged.
    pub fn floor_to_step(&self, step: Money) -> Self {
        if !step.is_positive() {
            return *self;
        }
        self.0
            .checked_div(step.0)
            .and_then(|units| units.floor().checked_mul(step.0))
            .map_or(*self, Self)
    }

    /// Divides by a scalar, returning `None` when the divisor is zero.
    pub fn checked_div(&self, divisor: Decimal) -> Option<Self> {
        self.0.checked_div(divisor).map(Self)
    }

    /// Returns the amount, or zero if it is negative.
    pub fn floor_zero(&self) -> Self {
        if self.0.is_sign_negative() {
            Self::ZERO
        } else {
            *self
        }
    }

    /// Returns true if the amount is greater than zero.
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Returns true if the amount is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the amount is less than zero.
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }
}

impl FromStr for Money {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl From<i64> for Money {
    fn from(amount: i64) -> Self {
        Self(Decimal::from(amount))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.round2().0)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 = self.0.saturating_sub(rhs.0);
    }
}

impl Mul<Decimal> for Money {
    type Output = Money;

    fn mul(self, factor: Decimal) -> Money {
        Money(self.0.saturating_mul(factor))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, |acc, m| acc + *m)
    }
}
