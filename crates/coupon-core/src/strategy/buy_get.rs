//! # Buy-X-Get-Y Strategy
//!
//! Buy every product of a buy set, get every product of a get set free,
//! repeated as many times as the cart allows up to a repetition limit.
//!
//! ## Counting Eligible Sets
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  buy  [{product 1, qty 2}, {product 2, qty 3}]                          │
//! │  get  [{product 3, qty 1}]                                              │
//! │  cart  product 1 × 7, product 2 × 6, product 3 × 1                      │
//! │                                                                         │
//! │  product 1: 7 / 2 = 3 sets                                              │
//! │  product 2: 6 / 3 = 2 sets  ◄── tightest requirement wins               │
//! │                     ─────                                               │
//! │  eligible sets = min(3, 2) = 2                                          │
//! │  repetition limit 1 ──► eligible sets = 1                               │
//! │                                                                         │
//! │  Any buy product missing or below its quantity ──► 0 sets               │
//! │  (the whole rule is void, not merely reduced)                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Free Items
//! Each eligible set grants `entry.quantity` units of every get product.
//! `apply` adds those units to the get product's line at face value and
//! discounts them fully, so their net contribution to the final price is
//! zero.

use tracing::debug;

use super::CouponStrategy;
use crate::money::{Money, RoundingMode};
use crate::rules::BuyGetConfig;
use crate::types::{Cart, CouponType};

/// Number of complete buy sets in `cart`, after the repetition limit.
///
/// ```rust
/// use coupon_core::money::Money;
/// use coupon_core::rules::{BuyGetConfig, ProductQuantity};
/// use coupon_core::strategy::eligible_sets;
/// use coupon_core::types::{Cart, CartLine};
///
/// let config = BuyGetConfig {
///     buy_products: vec![ProductQuantity::new(1, 2)],
///     get_products: vec![ProductQuantity::new(3, 1)],
///     repetition_limit: 0,
///     min_cart_total: None,
/// };
/// let cart = Cart::with_items(vec![CartLine::new(1, Money::from_cents(5000), 5)]);
/// assert_eq!(eligible_sets(&cart, &config), 2);
/// ```
pub fn eligible_sets(cart: &Cart, config: &BuyGetConfig) -> i64 {
    if config.buy_products.is_empty() {
        return 0;
    }

    let mut sets = i64::MAX;
    for required in &config.buy_products {
        if required.quantity <= 0 {
            return 0;
        }

        let line = match cart.line(required.product_id) {
            Some(line) if line.quantity >= required.quantity => line,
            _ => return 0,
        };

        sets = sets.min(line.quantity / required.quantity);
    }

    if config.repetition_limit > 0 {
        sets = sets.min(config.repetition_limit as i64);
    }

    sets.max(0)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuyXGetYStrategy {
    rounding: RoundingMode,
}

impl BuyXGetYStrategy {
    pub const fn new(rounding: RoundingMode) -> Self {
        BuyXGetYStrategy { rounding }
    }

    pub fn rounding(&self) -> RoundingMode {
        self.rounding
    }

    /// Value of the free units the cart earns, without the applicability gate.
    ///
    /// Get products with no line in the cart cannot be priced and contribute
    /// nothing; the other get products still count. Free quantity × unit
    /// price is already a whole number of cents, so no rounding occurs here.
    pub fn free_item_value(&self, config: &BuyGetConfig, cart: &Cart) -> Money {
        let sets = eligible_sets(cart, config);
        if sets <= 0 {
            return Money::zero();
        }

        config
            .get_products
            .iter()
            .filter_map(|reward| {
                let free_quantity = reward.quantity.saturating_mul(sets);
                cart.line(reward.product_id)
                    .map(|line| line.unit_price.multiply_quantity(free_quantity))
            })
            .sum()
    }
}

impl CouponStrategy for BuyXGetYStrategy {
    type Config = BuyGetConfig;

    const COUPON_TYPE: CouponType = CouponType::BuyXGetY;

    /// Applicable when the optional minimum is met, at least one set is
    /// eligible, and every get product has a line to price it from.
    fn is_applicable(&self, config: &BuyGetConfig, cart: &Cart) -> bool {
        if let Some(min) = config.min_cart_total {
            if cart.total() < min {
                return false;
            }
        }

        if eligible_sets(cart, config) <= 0 {
            return false;
        }

        config
            .get_products
            .iter()
            .all(|reward| cart.contains_product(reward.product_id))
    }

    fn calculate_discount(&self, config: &BuyGetConfig, cart: &Cart) -> Money {
        if !self.is_applicable(config, cart) {
            return Money::zero();
        }
        self.free_item_value(config, cart)
    }

    fn apply<'c>(&self, config: &BuyGetConfig, cart: &'c mut Cart) -> &'c mut Cart {
        if !self.is_applicable(config, cart) {
            return cart;
        }

        // Counted once: adding free units must not feed back into the count
        // when a get product is also a buy product.
        let sets = eligible_sets(cart, config);
        debug!(
            rule = %Self::COUPON_TYPE,
            sets,
            rewards = config.get_products.len(),
            "Adding free items"
        );

        for reward in &config.get_products {
            if let Some(line) = cart.line_mut(reward.product_id) {
                let free_quantity = reward.quantity.saturating_mul(sets);
                line.quantity = line.quantity.saturating_add(free_quantity);
                line.total_discount += line.unit_price.multiply_quantity(free_quantity);
            }
        }
        cart
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
