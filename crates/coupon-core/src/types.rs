//! # Domain Types
//!
//! Cart and coupon types shared by every rule strategy.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐        │
//! │  │      Cart       │   │    CartLine     │   │     Coupon      │        │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │        │
//! │  │  items ─────────┼──►│  product_id     │   │  id, code       │        │
//! │  │                 │   │  quantity       │   │  rule           │        │
//! │  │  total()        │   │  unit_price     │   │  is_active      │        │
//! │  │  totals()       │   │  total_discount │   │  start/end date │        │
//! │  └─────────────────┘   └─────────────────┘   │  redemptions    │        │
//! │                                              └─────────────────┘        │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐        │
//! │  │  DiscountRate   │   │   CouponType    │   │   CartTotals    │        │
//! │  │  percent        │   │  CartTotal      │   │  total_price    │        │
//! │  │  12.5 = 12.5%   │   │  SingleProduct  │   │  total_discount │        │
//! │  └─────────────────┘   │  BuyXGetY       │   │  final_price    │        │
//! │                        └─────────────────┘   └─────────────────┘        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//! The caller owns the `Cart`. Strategies borrow it immutably to evaluate and
//! mutably to apply; nothing in this crate keeps a reference past a call.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;
use crate::money::Money;
use crate::rules::RuleConfig;

// =============================================================================
// Discount Rate
// =============================================================================

/// Discount percentage, kept at full decimal precision.
///
/// `12.345` is 12.345%. The rate is never rounded; only the discount amount
/// it produces is rounded to the cent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountRate(
    #[serde(with = "rust_decimal::serde::float")]
    #[ts(type = "number")]
    Decimal,
);

impl DiscountRate {
    /// 100%.
    pub const FULL: DiscountRate = DiscountRate(Decimal::ONE_HUNDRED);

    #[inline]
    pub const fn new(percent: Decimal) -> Self {
        DiscountRate(percent)
    }

    /// The rate as a percentage (`10` = 10%).
    #[inline]
    pub const fn percent(&self) -> Decimal {
        self.0
    }
}

// =============================================================================
// Cart Line
// =============================================================================

/// A line in the shopping cart.
///
/// Strategies only ever change `quantity` (free items) and `total_discount`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLine {
    /// Product identifier.
    pub product_id: i64,

    /// Units in the cart, including free units added by a buy-X-get-Y rule.
    pub quantity: i64,

    /// Price of one unit.
    pub unit_price: Money,

    /// Discount accumulated on this line across applied coupons.
    #[serde(default)]
    pub total_discount: Money,
}

impl CartLine {
    /// Creates an undiscounted line.
    pub fn new(product_id: i64, unit_price: Money, quantity: i64) -> Self {
        CartLine {
            product_id,
            quantity,
            unit_price,
            total_discount: Money::zero(),
        }
    }

    /// Unit price × quantity, before any discount.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart a coupon is evaluated against.
///
/// ## Invariants
/// - Order is preserved; it only matters for which line absorbs the
///   rounding remainder of a cart-total discount
/// - Lookups by product return the first matching line
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Cart {
    pub items: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    pub fn with_items(items: Vec<CartLine>) -> Self {
        Cart { items }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all line totals.
    pub fn total(&self) -> Money {
        self.items.iter().map(CartLine::line_total).sum()
    }

    /// Returns the first line holding `product_id`.
    pub fn line(&self, product_id: i64) -> Option<&CartLine> {
        self.items.iter().find(|line| line.product_id == product_id)
    }

    /// Mutable variant of [`Cart::line`].
    pub fn line_mut(&mut self, product_id: i64) -> Option<&mut CartLine> {
        self.items.iter_mut().find(|line| line.product_id == product_id)
    }

    pub fn contains_product(&self, product_id: i64) -> bool {
        self.line(product_id).is_some()
    }

    /// Totals as reported to the shopper after coupons are applied.
    pub fn totals(&self) -> CartTotals {
        let total_price = self.total();
        let total_discount: Money = self.items.iter().map(|line| line.total_discount).sum();
        CartTotals {
            total_price,
            total_discount,
            final_price: total_price - total_discount,
        }
    }
}

/// Price summary of a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartTotals {
    pub total_price: Money,
    pub total_discount: Money,
    pub final_price: Money,
}

// =============================================================================
// Coupon Type
// =============================================================================

/// The rule family a coupon belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CouponType {
    /// Percentage off the whole cart.
    CartTotal,
    /// Percentage off one product line.
    SingleProduct,
    /// Buy a set of products, get another set free.
    #[serde(rename = "buy_x_get_y")]
    BuyXGetY,
}

impl std::fmt::Display for CouponType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CouponType::CartTotal => write!(f, "cart_total"),
            CouponType::SingleProduct => write!(f, "single_product"),
            CouponType::BuyXGetY => write!(f, "buy_x_get_y"),
        }
    }
}

impl std::str::FromStr for CouponType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cart_total" | "cart_wise" | "cartwise" => Ok(CouponType::CartTotal),
            "single_product" | "product_wise" | "productwise" => Ok(CouponType::SingleProduct),
            "buy_x_get_y" | "bxgy" | "buy_get" => Ok(CouponType::BuyXGetY),
            _ => Err(CoreError::UnsupportedRuleType(s.to_string())),
        }
    }
}

// =============================================================================
// Coupon
// =============================================================================

/// A coupon definition as handed over by the persistence layer.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Coupon {
    pub id: i64,
    pub code: String,
    /// Rule type and its decoded configuration.
    pub rule: RuleConfig,
    pub is_active: bool,
    #[ts(as = "Option<String>")]
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[ts(as = "Option<String>")]
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub max_redemptions: Option<u32>,
    #[serde(default)]
    pub current_redemptions: u32,
}

impl Coupon {
    /// Creates an active coupon with no date window and no redemption cap.
    pub fn new(id: i64, code: impl Into<String>, rule: RuleConfig) -> Self {
        Coupon {
            id,
            code: code.into(),
            rule,
            is_active: true,
            start_date: None,
            end_date: None,
            max_redemptions: None,
            current_redemptions: 0,
        }
    }

    #[inline]
    pub fn coupon_type(&self) -> CouponType {
        self.rule.coupon_type()
    }

    /// Checks whether the coupon may be redeemed at `now`.
    ///
    /// Both window bounds are inclusive. A coupon that has reached its
    /// redemption cap is no longer active.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        if !self.is_active {
            return false;
        }

        if self.start_date.is_some_and(|start| start > now) {
            return false;
        }

        if self.end_date.is_some_and(|end| end < now) {
            return false;
        }

        if let Some(max) = self.max_redemptions {
            if self.current_redemptions >= max {
                return false;
            }
        }

        true
    }
}

/// A coupon that applies to a cart, with the discount it would give.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ApplicableCoupon {
    pub coupon_id: i64,
    #[serde(rename = "type")]
    pub coupon_type: CouponType,
    pub discount: Money,
}

// =============================================================================
// Unit Tests
// =============================================================================
