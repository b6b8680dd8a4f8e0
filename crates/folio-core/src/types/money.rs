//! Currency and percentage value types.
//!
//! `Usd` and `Percent` both wrap a `Decimal`, but they do not mix: there is
//! no arithmetic between the two, and the only way to produce a percentage
//! from money is [`Percent::of`].
//!
//! The operators panic when a result leaves the `Decimal` range, like the
//! `Decimal` operators they wrap. Valuation code uses the `checked_*`
//! methods, which report [`ValuationError::Overflow`] instead.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use crate::error::ValuationError;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// A US dollar amount.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Usd(Decimal);

impl Usd {
    pub const ZERO: Usd = Usd(Decimal::ZERO);

    /// Wrap a raw decimal amount.
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// The raw decimal amount.
    pub fn amount(self) -> Decimal {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(self) -> bool {
        self.0 < Decimal::ZERO
    }

    pub fn is_positive(self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    /// Round to whole cents (banker's rounding).
    pub fn round_cents(self) -> Self {
        Self(self.0.round_dp(2))
    }

    pub fn checked_add(self, rhs: Usd) -> Result<Usd, ValuationError> {
        self.0
            .checked_add(rhs.0)
            .map(Usd)
            .ok_or(ValuationError::Overflow)
    }

    pub fn checked_sub(self, rhs: Usd) -> Result<Usd, ValuationError> {
        self.0
            .checked_sub(rhs.0)
            .map(Usd)
            .ok_or(ValuationError::Overflow)
    }

    /// Price times quantity.
    pub fn checked_mul(self, quantity: Decimal) -> Result<Usd, ValuationError> {
        self.0
            .checked_mul(quantity)
            .map(Usd)
            .ok_or(ValuationError::Overflow)
    }

    /// Sum amounts, failing on the first overflow.
    pub fn checked_sum<I>(amounts: I) -> Result<Usd, ValuationError>
    where
        I: IntoIterator<Item = Usd>,
    {
        amounts
            .into_iter()
            .try_fold(Usd::ZERO, |total, amount| total.checked_add(amount))
    }
}

impl From<Decimal> for Usd {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl Add for Usd {
    type Output = Usd;

    fn add(self, rhs: Usd) -> Usd {
        Usd(self.0 + rhs.0)
    }
}

impl AddAssign for Usd {
    fn add_assign(&mut self, rhs: Usd) {
        self.0 += rhs.0;
    }
}

impl Sub for Usd {
    type Output = Usd;

    fn sub(self, rhs: Usd) -> Usd {
        Usd(self.0 - rhs.0)
    }
}

impl SubAssign for Usd {
    fn sub_assign(&mut self, rhs: Usd) {
        self.0 -= rhs.0;
    }
}

impl Neg for Usd {
    type Output = Usd;

    fn neg(self) -> Usd {
        Usd(-self.0)
    }
}

/// Price times quantity.
impl Mul<Decimal> for Usd {
    type Output = Usd;

    fn mul(self, quantity: Decimal) -> Usd {
        Usd(self.0 * quantity)
    }
}

impl Sum for Usd {
    fn sum<I: Iterator<Item = Usd>>(iter: I) -> Usd {
        iter.fold(Usd::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Usd> for Usd {
    fn sum<I: Iterator<Item = &'a Usd>>(iter: I) -> Usd {
        iter.copied().sum()
    }
}

impl fmt::Display for Usd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-${:.2}", self.0.abs())
        } else {
            write!(f, "${:.2}", self.0)
        }
    }
}

/// A percentage, where `5` means 5%.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Percent(Decimal);

impl Percent {
    pub const ZERO: Percent = Percent(Decimal::ZERO);
    pub const HUNDRED: Percent = Percent(HUNDRED);

    /// Wrap a raw percentage value.
    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Build from a fraction, so `0.05` becomes 5%. Saturates at the
    /// `Decimal` bounds.
    pub fn from_fraction(fraction: Decimal) -> Self {
        Self(fraction.saturating_mul(HUNDRED))
    }

    /// `numerator / denominator * 100`.
    ///
    /// Fails with `DivisionByZero` on a zero denominator and `Overflow` when
    /// the ratio does not fit in a `Decimal`.
    pub fn of(numerator: Usd, denominator: Usd) -> Result<Self, ValuationError> {
        if denominator.is_zero() {
            return Err(ValuationError::DivisionByZero);
        }
        numerator
            .0
            .checked_div(denominator.0)
            .and_then(|ratio| ratio.checked_mul(HUNDRED))
            .map(Self)
            .ok_or(ValuationError::Overflow)
    }

    /// The raw percentage value.
    pub fn value(self) -> Decimal {
        self.0
    }

    /// The percentage as a fraction, so 5% becomes `0.05`.
    pub fn fraction(self) -> Decimal {
        self.0 / HUNDRED
    }

    pub fn is_negative(self) -> bool {
        self.0 < Decimal::ZERO
    }

    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    /// Difference in percentage points, clamped to the `Decimal` bounds.
    pub fn saturating_sub(self, rhs: Percent) -> Percent {
        Percent(self.0.saturating_sub(rhs.0))
    }
}

impl From<Decimal> for Percent {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

/// Difference of two percentages, in percentage points.
impl Sub for Percent {
    type Output = Percent;

    fn sub(self, rhs: Percent) -> Percent {
        Percent(self.0 - rhs.0)
    }
}

impl Add for Percent {
    type Output = Percent;

    fn add(self, rhs: Percent) -> Percent {
        Percent(self.0 + rhs.0)
    }
}

impl Neg for Percent {
    type Output = Percent;

    fn neg(self) -> Percent {
        Percent(-self.0)
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}%", self.0)
    }
}
