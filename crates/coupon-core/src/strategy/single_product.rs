//! # Single-Product Strategy
//!
//! Percentage off one product line, with an optional cap and an optional
//! cart-total gate.

use tracing::debug;

use super::CouponStrategy;
use crate::money::{Money, RoundingMode};
use crate::rules::SingleProductConfig;
use crate::types::{Cart, CouponType};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SingleProductStrategy {
    rounding: RoundingMode,
}

impl SingleProductStrategy {
    pub const fn new(rounding: RoundingMode) -> Self {
        SingleProductStrategy { rounding }
    }

    /// Discount on the target line, zero if the product is not in the cart.
    ///
    /// Does not look at `min_cart_total`; that gate belongs to
    /// [`CouponStrategy::is_applicable`].
    pub fn line_discount(&self, config: &SingleProductConfig, cart: &Cart) -> Money {
        match cart.line(config.product_id) {
            Some(line) => line
                .line_total()
                .percentage(config.discount, self.rounding)
                .capped_at(config.max_discount)
                .max(Money::zero()),
            None => Money::zero(),
        }
    }
}

impl CouponStrategy for SingleProductStrategy {
    type Config = SingleProductConfig;

    const COUPON_TYPE: CouponType = CouponType::SingleProduct;

    fn is_applicable(&self, config: &SingleProductConfig, cart: &Cart) -> bool {
        if let Some(min) = config.min_cart_total {
            if cart.total() < min {
                return false;
            }
        }

        cart.contains_product(config.product_id)
    }

    fn calculate_discount(&self, config: &SingleProductConfig, cart: &Cart) -> Money {
        if !self.is_applicable(config, cart) {
            return Money::zero();
        }
        self.line_discount(config, cart)
    }

    fn apply<'c>(&self, config: &SingleProductConfig, cart: &'c mut Cart) -> &'c mut Cart {
        if !self.is_applicable(config, cart) {
            return cart;
        }

        let discount = self.line_discount(config, cart);
        if let Some(line) = cart.line_mut(config.product_id) {
            debug!(
                rule = %Self::COUPON_TYPE,
                product_id = config.product_id,
                discount = %discount,
                "Discounting product line"
            );
            line.total_discount += discount;
        }
        cart
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CartLine, DiscountRate};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn config(product_id: i64, percent: Decimal) -> SingleProductConfig {
        SingleProductConfig {
            product_id,
            discount: DiscountRate::new(percent),
            max_discount: None,
            min_cart_total: None,
        }
    }

    fn sample_cart() -> Cart {
        Cart::with_items(vec![
            CartLine::new(1, Money::from_cents(10_000), 1),
            CartLine::new(2, Money::from_cents(5000), 1),
        ])
    }

    #[test]
    fn test_twenty_percent_on_target_only() {
        let strategy = SingleProductStrategy::default();
        let config = config(1, dec!(20));
        let mut cart = sample_cart();

        assert!(strategy.is_applicable(&config, &cart));
        assert_eq!(strategy.calculate_discount(&config, &cart).cents(), 2000);

        strategy.apply(&config, &mut cart);
        assert_eq!(cart.items[0].total_discount.cents(), 2000);
        assert_eq!(cart.items[0].quantity, 1);
        assert!(cart.items[1].total_discount.is_zero());
    }

    #[test]
    fn test_missing_product() {
        let strategy = SingleProductStrategy::default();
        let config = config(42, dec!(20));
        let mut cart = sample_cart();
        let before = cart.clone();

        assert!(!strategy.is_applicable(&config, &cart));
        assert!(strategy.calculate_discount(&config, &cart).is_zero());
        assert!(strategy.line_discount(&config, &cart).is_zero());
        strategy.apply(&config, &mut cart);
        assert_eq!(cart, before);
    }

    #[test]
    fn test_min_cart_total_gate() {
        let strategy = SingleProductStrategy::default();
        let mut config = config(1, dec!(20));
        config.min_cart_total = Some(Money::from_cents(20_000));
        let mut cart = sample_cart();
        let before = cart.clone();

        assert!(!strategy.is_applicable(&config, &cart));
        assert!(strategy.calculate_discount(&config, &cart).is_zero());
        // The line discount itself ignores the gate
        assert_eq!(strategy.line_discount(&config, &cart).cents(), 2000);

        strategy.apply(&config, &mut cart);
        assert_eq!(cart, before);

        config.min_cart_total = Some(Money::from_cents(15_000));
        assert!(strategy.is_applicable(&config, &cart));
    }

    #[test]
    fn test_max_discount_and_quantity() {
        let strategy = SingleProductStrategy::default();
        let mut config = config(2, dec!(50));
        let mut cart = sample_cart();
        cart.items[1].quantity = 3; // $150.00 line

        assert_eq!(strategy.calculate_discount(&config, &cart).cents(), 7500);

        config.max_discount = Some(Money::from_cents(4000));
        assert_eq!(strategy.calculate_discount(&config, &cart).cents(), 4000);
    }

    #[test]
    fn test_first_matching_line_is_discounted() {
        let strategy = SingleProductStrategy::default();
        let config = config(1, dec!(10));
        let mut cart = Cart::with_items(vec![
            CartLine::new(1, Money::from_cents(1000), 1),
            CartLine::new(1, Money::from_cents(9000), 1),
        ]);

        strategy.apply(&config, &mut cart);
        assert_eq!(cart.items[0].total_discount.cents(), 100);
        assert!(cart.items[1].total_discount.is_zero());
    }

    #[test]
    fn test_repeated_apply_accumulates_without_clamp() {
        let strategy = SingleProductStrategy::default();
        let config = config(1, dec!(60));
        let mut cart = sample_cart();

        strategy.apply(&config, &mut cart);
        strategy.apply(&config, &mut cart);

        // 2 × $60.00 on a $100.00 line
        assert_eq!(cart.items[0].total_discount.cents(), 12_000);
        assert!(cart.items[0].total_discount > cart.items[0].line_total());
    }
}
