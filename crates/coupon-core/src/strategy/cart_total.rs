//! # Cart-Total Strategy
//!
//! Percentage off the whole cart, optionally capped, once the cart reaches a
//! minimum total.
//!
//! ## Allocation Across Lines
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Cart total $130.00, discount 10% = $13.00                              │
//! │                                                                         │
//! │  line 1  $100.00 ─► round(13.00 × 100/130) = $10.00                     │
//! │  line 2  $ 30.00 ─► (last line) 13.00 − 10.00 = $ 3.00                  │
//! │                                              ───────                    │
//! │                                               $13.00  exactly           │
//! │                                                                         │
//! │  The last line absorbs the rounding remainder, so per-line shares       │
//! │  always sum to the discount reported by calculate_discount().           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Shares are not clamped. When the earlier lines round up, the last line's
//! remainder can be negative; the sum stays exact either way.

use tracing::debug;

use super::CouponStrategy;
use crate::money::{Money, RoundingMode};
use crate::rules::CartTotalConfig;
use crate::types::{Cart, CouponType};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CartTotalStrategy {
    rounding: RoundingMode,
}

impl CartTotalStrategy {
    pub const fn new(rounding: RoundingMode) -> Self {
        CartTotalStrategy { rounding }
    }

    /// Discount for a cart worth `cart_total`, without checking the minimum.
    ///
    /// `min(cart_total × rate, max_discount)`, rounded to the cent.
    pub fn discount_for_total(&self, config: &CartTotalConfig, cart_total: Money) -> Money {
        cart_total
            .percentage(config.discount, self.rounding)
            .capped_at(config.max_discount)
            .max(Money::zero())
    }

    /// Spreads `discount` over the lines in proportion to their totals.
    fn allocate(&self, discount: Money, cart_total: Money, cart: &mut Cart) {
        let last = cart.items.len() - 1;
        let mut allocated = Money::zero();

        for (index, line) in cart.items.iter_mut().enumerate() {
            let share = if index == last {
                discount - allocated
            } else {
                let share = discount.prorate(line.line_total(), cart_total, self.rounding);
                allocated += share;
                share
            };
            line.total_discount += share;
        }
    }
}

impl CouponStrategy for CartTotalStrategy {
    type Config = CartTotalConfig;

    const COUPON_TYPE: CouponType = CouponType::CartTotal;

    fn is_applicable(&self, config: &CartTotalConfig, cart: &Cart) -> bool {
        cart.total() >= config.min_cart_total
    }

    fn calculate_discount(&self, config: &CartTotalConfig, cart: &Cart) -> Money {
        if !self.is_applicable(config, cart) {
            return Money::zero();
        }
        self.discount_for_total(config, cart.total())
    }

    fn apply<'c>(&self, config: &CartTotalConfig, cart: &'c mut Cart) -> &'c mut Cart {
        if cart.is_empty() || !self.is_applicable(config, cart) {
            return cart;
        }

        let cart_total = cart.total();
        if !cart_total.is_positive() {
            return cart;
        }

        let discount = self.discount_for_total(config, cart_total);
        if !discount.is_positive() {
            return cart;
        }

        debug!(
            rule = %Self::COUPON_TYPE,
            lines = cart.items.len(),
            cart_total = %cart_total,
            discount = %discount,
            "Allocating cart-total discount"
        );
        self.allocate(discount, cart_total, cart);
        cart
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
