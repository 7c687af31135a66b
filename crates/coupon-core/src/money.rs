//! # Money Module
//!
//! Provides the `Money` type and the rounding rules used when a discount
//! produces a fraction of a cent.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  WHERE FRACTIONS APPEAR                                                 │
//! │                                                                         │
//! │  Line totals and cart totals are exact:                                 │
//! │    2 × $50.00 + 1 × $30.00 = $130.00   (13000 cents, no rounding)       │
//! │                                                                         │
//! │  Discounts are not:                                                     │
//! │    $130.01 × 12.5% = $16.25125         → must round to $16.25           │
//! │    $13.00 × (50/130) = $5.0000...      → proportional share             │
//! │                                                                         │
//! │  OUR SOLUTION: every amount is computed exactly (Decimal or i128) and   │
//! │  rounded ONCE with an explicit RoundingMode.                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use coupon_core::money::{Money, RoundingMode};
//! use coupon_core::types::DiscountRate;
//!
//! let total = Money::from_cents(13_000); // $130.00
//! let discount = total.percentage(DiscountRate::new(10.into()), RoundingMode::HalfEven);
//! assert_eq!(discount.cents(), 1300); // $13.00
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};
use ts_rs::TS;

use crate::error::ConfigError;
use crate::types::DiscountRate;

// =============================================================================
// Rounding Mode
// =============================================================================

/// How a fraction of a cent is resolved when a discount amount is finalized.
///
/// ## Midpoint Behavior
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────┐
/// │  exact value      HalfEven (bankers)     HalfAwayFromZero           │
/// │  ───────────      ──────────────────     ────────────────           │
/// │  0.125 → cents    12                     13                         │
/// │  0.135 → cents    14                     14                         │
/// │  0.1251 → cents   13                     13                         │
/// └─────────────────────────────────────────────────────────────────────┘
/// ```
/// Only exact midpoints differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum RoundingMode {
    /// Round half to even (bankers rounding).
    #[default]
    HalfEven,
    /// Round half away from zero (commercial rounding).
    HalfAwayFromZero,
}

impl RoundingMode {
    fn strategy(self) -> RoundingStrategy {
        match self {
            RoundingMode::HalfEven => RoundingStrategy::MidpointNearestEven,
            RoundingMode::HalfAwayFromZero => RoundingStrategy::MidpointAwayFromZero,
        }
    }

    /// Rounds an exact amount of cents to a whole cent.
    pub(crate) fn round_cents(self, exact: Decimal) -> i64 {
        let rounded = exact.round_dp_with_strategy(0, self.strategy());
        rounded.to_i64().unwrap_or(if rounded.is_sign_negative() {
            i64::MIN
        } else {
            i64::MAX
        })
    }

    /// Divides `numerator` by `denominator`, rounding the quotient with this mode.
    ///
    /// `denominator` must be non-zero; callers guard against zero totals
    /// before dividing.
    pub(crate) fn divide(self, numerator: i128, denominator: i128) -> i128 {
        let quotient = numerator / denominator;
        let remainder = numerator % denominator;
        if remainder == 0 {
            return quotient;
        }

        let away_from_zero = match (remainder.abs() * 2).cmp(&denominator.abs()) {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => match self {
                RoundingMode::HalfEven => quotient % 2 != 0,
                RoundingMode::HalfAwayFromZero => true,
            },
        };

        if !away_from_zero {
            quotient
        } else if (numerator < 0) != (denominator < 0) {
            quotient - 1
        } else {
            quotient + 1
        }
    }
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundingMode::HalfEven => write!(f, "half_even"),
            RoundingMode::HalfAwayFromZero => write!(f, "half_away_from_zero"),
        }
    }
}

impl std::str::FromStr for RoundingMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "half_even" | "bankers" => Ok(RoundingMode::HalfEven),
            "half_away_from_zero" | "half_up" | "commercial" => Ok(RoundingMode::HalfAwayFromZero),
            other => Err(ConfigError::Invalid(format!(
                "Unknown rounding mode: '{}'. Valid options: half_even, half_away_from_zero",
                other
            ))),
        }
    }
}

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  CartLine.unit_price ──► CartLine.line_total ──► Cart.total             │
/// │                                                      │                  │
/// │  RuleConfig.min_cart_total ◄── compared against ─────┘                  │
/// │                                                                         │
/// │  Strategy discount ──► CartLine.total_discount ──► CartTotals           │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use coupon_core::money::Money;
    ///
    /// let price = Money::from_cents(2500); // $25.00
    /// assert_eq!(price.cents(), 2500);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies a unit price by a quantity, saturating at the `i64` range.
    ///
    /// ```rust
    /// use coupon_core::money::Money;
    ///
    /// let line_total = Money::from_cents(5000).multiply_quantity(2);
    /// assert_eq!(line_total.cents(), 10_000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Returns `rate` of this amount, rounded to the cent with `mode`.
    ///
    /// ## Implementation
    /// `cents × percent / 100` is computed exactly in `Decimal`; the only
    /// rounding is the final step to a whole cent. A product too large for
    /// `Decimal` saturates.
    ///
    /// ```rust
    /// use coupon_core::money::{Money, RoundingMode};
    /// use coupon_core::types::DiscountRate;
    /// use rust_decimal::Decimal;
    ///
    /// // $10.00 at 12.5% = $1.25
    /// let amount = Money::from_cents(1000);
    /// let rate = DiscountRate::new(Decimal::new(125, 1));
    /// assert_eq!(amount.percentage(rate, RoundingMode::HalfEven).cents(), 125);
    /// ```
    pub fn percentage(&self, rate: DiscountRate, mode: RoundingMode) -> Money {
        match Decimal::from(self.0).checked_mul(rate.percent()) {
            Some(scaled) => Money::from_cents(mode.round_cents(scaled / Decimal::ONE_HUNDRED)),
            None if self.is_negative() == rate.percent().is_sign_negative() => {
                Money::from_cents(i64::MAX)
            }
            None => Money::from_cents(i64::MIN),
        }
    }

    /// Returns the share of this amount that `part` represents of `whole`,
    /// i.e. `self × part / whole`, rounded to the cent.
    ///
    /// Returns zero when `whole` is zero.
    pub fn prorate(&self, part: Money, whole: Money, mode: RoundingMode) -> Money {
        if whole.is_zero() {
            return Money::zero();
        }
        let cents = mode.divide(self.0 as i128 * part.0 as i128, whole.0 as i128);
        Money::from_cents(cents as i64)
    }

    /// Caps this amount at `cap` when one is set.
    #[inline]
    pub fn capped_at(self, cap: Option<Money>) -> Money {
        match cap {
            Some(cap) => self.min(cap),
            None => self,
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Debug display ("$13.00"). Locale formatting belongs to the caller.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, self.dollars().abs(), self.cents_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
