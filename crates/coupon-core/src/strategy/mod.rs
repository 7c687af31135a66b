//! # Coupon Strategies
//!
//! The contract every coupon rule implements, the three rule strategies,
//! and the selector that routes a [`RuleConfig`] to its strategy.
//!
//! ## Call Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  caller                         StrategySelector                        │
//! │  ──────                         ────────────────                        │
//! │  ("cart_total", payload) ─────► decode()                                │
//! │                                   │ tag ──► CouponType ──► decoder      │
//! │                                   │ unknown tag ──► UnsupportedRuleType │
//! │                                   ▼                                     │
//! │                                 RuleConfig::CartTotal(config)           │
//! │                                   │                                     │
//! │  is_applicable(rule, &cart) ────► CartTotalStrategy::is_applicable      │
//! │  calculate_discount(rule, &cart) ► CartTotalStrategy::calculate_discount│
//! │  apply(rule, &mut cart) ────────► CartTotalStrategy::apply              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Strategies hold nothing but their rounding mode; each call receives the
//! configuration and the cart it works on.

pub mod buy_get;
pub mod cart_total;
pub mod single_product;

pub use buy_get::{eligible_sets, BuyXGetYStrategy};
pub use cart_total::CartTotalStrategy;
pub use single_product::SingleProductStrategy;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::PricingConfig;
use crate::error::{CoreResult, ValidationError};
use crate::money::{Money, RoundingMode};
use crate::rules::RuleConfig;
use crate::types::{Cart, CouponType};

// =============================================================================
// Strategy Contract
// =============================================================================

/// Operations shared by every coupon rule.
///
/// ## Contract
/// - `is_applicable` never mutates the cart
/// - `calculate_discount` returns zero whenever `is_applicable` is false,
///   and is never negative
/// - `apply` is a no-op when `is_applicable` is false; otherwise it mutates
///   lines in place and hands back the same cart
pub trait CouponStrategy {
    /// The rule parameters this strategy reads.
    type Config;

    /// The tag coupons of this strategy are stored under.
    const COUPON_TYPE: CouponType;

    fn is_applicable(&self, config: &Self::Config, cart: &Cart) -> bool;

    fn calculate_discount(&self, config: &Self::Config, cart: &Cart) -> Money;

    fn apply<'c>(&self, config: &Self::Config, cart: &'c mut Cart) -> &'c mut Cart;
}

// =============================================================================
// Strategy Selector
// =============================================================================

/// Dispatch table from coupon type to strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StrategySelector {
    cart_total: CartTotalStrategy,
    single_product: SingleProductStrategy,
    buy_get: BuyXGetYStrategy,
}

/// Selector with the default (half-to-even) rounding.
pub const DEFAULT_SELECTOR: StrategySelector = StrategySelector::new(RoundingMode::HalfEven);

impl StrategySelector {
    pub const fn new(rounding: RoundingMode) -> Self {
        StrategySelector {
            cart_total: CartTotalStrategy::new(rounding),
            single_product: SingleProductStrategy::new(rounding),
            buy_get: BuyXGetYStrategy::new(rounding),
        }
    }

    pub fn from_config(config: &PricingConfig) -> Self {
        Self::new(config.rounding)
    }

    pub fn cart_total(&self) -> &CartTotalStrategy {
        &self.cart_total
    }

    pub fn single_product(&self) -> &SingleProductStrategy {
        &self.single_product
    }

    pub fn buy_get(&self) -> &BuyXGetYStrategy {
        &self.buy_get
    }

    /// Decodes a raw `(type tag, details payload)` pair.
    ///
    /// The tag picks the decoder; the decoded record is validated before it
    /// is returned.
    ///
    /// ## Errors
    /// - `UnsupportedRuleType` for an unknown tag
    /// - `Configuration` when the payload does not decode or validate
    ///
    /// ```rust
    /// use coupon_core::strategy::StrategySelector;
    /// use coupon_core::CouponType;
    /// use serde_json::json;
    ///
    /// let rule = StrategySelector::decode("CartWise", &json!({ "discount": 10 })).unwrap();
    /// assert_eq!(rule.coupon_type(), CouponType::CartTotal);
    /// assert!(StrategySelector::decode("tiered", &json!({})).is_err());
    /// ```
    pub fn decode(tag: &str, payload: &Value) -> CoreResult<RuleConfig> {
        let rule = match tag.parse::<CouponType>()? {
            CouponType::CartTotal => RuleConfig::CartTotal(decode_details(payload)?),
            CouponType::SingleProduct => RuleConfig::SingleProduct(decode_details(payload)?),
            CouponType::BuyXGetY => RuleConfig::BuyXGetY(decode_details(payload)?),
        };
        rule.validate()?;
        Ok(rule)
    }

    pub fn is_applicable(&self, rule: &RuleConfig, cart: &Cart) -> bool {
        match rule {
            RuleConfig::CartTotal(config) => self.cart_total.is_applicable(config, cart),
            RuleConfig::SingleProduct(config) => self.single_product.is_applicable(config, cart),
            RuleConfig::BuyXGetY(config) => self.buy_get.is_applicable(config, cart),
        }
    }

    pub fn calculate_discount(&self, rule: &RuleConfig, cart: &Cart) -> Money {
        match rule {
            RuleConfig::CartTotal(config) => self.cart_total.calculate_discount(config, cart),
            RuleConfig::SingleProduct(config) => {
                self.single_product.calculate_discount(config, cart)
            }
            RuleConfig::BuyXGetY(config) => self.buy_get.calculate_discount(config, cart),
        }
    }

    pub fn apply<'c>(&self, rule: &RuleConfig, cart: &'c mut Cart) -> &'c mut Cart {
        match rule {
            RuleConfig::CartTotal(config) => self.cart_total.apply(config, cart),
            RuleConfig::SingleProduct(config) => self.single_product.apply(config, cart),
            RuleConfig::BuyXGetY(config) => self.buy_get.apply(config, cart),
        }
    }
}

fn decode_details<T: DeserializeOwned>(payload: &Value) -> Result<T, ValidationError> {
    T::deserialize(payload).map_err(|e| ValidationError::InvalidFormat {
        field: "details".to_string(),
        reason: e.to_string(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::types::CartLine;
    use serde_json::json;

    fn cart() -> Cart {
        Cart::with_items(vec![
            CartLine::new(1, Money::from_cents(5000), 4),
            CartLine::new(3, Money::from_cents(2500), 1),
        ])
    }

    #[test]
    fn test_decode_each_type() {
        let payload = json!({ "min_cart_total": 10000, "discount": 10 });
        let rule = StrategySelector::decode("cart_total", &payload).unwrap();
        assert_eq!(rule.coupon_type(), CouponType::CartTotal);

        let payload = json!({ "product_id": 1, "discount": 20 });
        let rule = StrategySelector::decode("ProductWise", &payload).unwrap();
        assert_eq!(rule.coupon_type(), CouponType::SingleProduct);

        let rule = StrategySelector::decode(
            "bxgy",
            &json!({
                "buy_products": [{ "product_id": 1, "quantity": 2 }],
                "get_products": [{ "product_id": 3, "quantity": 1 }],
                "repetition_limit": 2
            }),
        )
        .unwrap();
        assert_eq!(rule.coupon_type(), CouponType::BuyXGetY);
    }

    #[test]
    fn test_decode_unknown_tag() {
        let err = StrategySelector::decode("percent_off_shipping", &json!({})).unwrap_err();
        assert!(matches!(err, CoreError::UnsupportedRuleType(_)));
    }

    #[test]
    fn test_decode_malformed_payload() {
        // Missing required discount
        let payload = json!({ "min_cart_total": 100 });
        let err = StrategySelector::decode("cart_total", &payload).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Configuration(ValidationError::InvalidFormat { .. })
        ));

        // Negative repetition limit does not fit the unsigned field
        let err = StrategySelector::decode(
            "buy_x_get_y",
            &json!({
                "buy_products": [{ "product_id": 1, "quantity": 2 }],
                "get_products": [{ "product_id": 3, "quantity": 1 }],
                "repetition_limit": -1
            }),
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::Configuration(_)));
    }

    #[test]
    fn test_decode_runs_validation() {
        let err = StrategySelector::decode("cart_total", &json!({ "discount": 120 })).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Configuration(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_selector_routes_to_matching_strategy() {
        let rule = StrategySelector::decode(
            "buy_x_get_y",
            &json!({
                "buy_products": [{ "product_id": 1, "quantity": 2 }],
                "get_products": [{ "product_id": 3, "quantity": 1 }],
                "repetition_limit": 0
            }),
        )
        .unwrap();

        let mut cart = cart();
        assert!(DEFAULT_SELECTOR.is_applicable(&rule, &cart));
        assert_eq!(DEFAULT_SELECTOR.calculate_discount(&rule, &cart).cents(), 5000);

        DEFAULT_SELECTOR.apply(&rule, &mut cart);
        assert_eq!(cart.items[1].quantity, 3);
        assert_eq!(cart.items[1].total_discount.cents(), 5000);
    }

    #[test]
    fn test_selector_uses_configured_rounding() {
        let config = PricingConfig {
            rounding: RoundingMode::HalfAwayFromZero,
        };
        let selector = StrategySelector::from_config(&config);
        assert_eq!(selector, StrategySelector::new(RoundingMode::HalfAwayFromZero));
        assert_ne!(selector, DEFAULT_SELECTOR);
        assert_eq!(selector.buy_get().rounding(), RoundingMode::HalfAwayFromZero);
    }

    #[test]
    fn test_strategy_tags_match_rule_tags() {
        let selector = DEFAULT_SELECTOR;
        let cart = cart();

        let rule = StrategySelector::decode("cart_total", &json!({ "discount": 10 })).unwrap();
        assert_eq!(rule.coupon_type(), CartTotalStrategy::COUPON_TYPE);
        if let RuleConfig::CartTotal(config) = &rule {
            assert_eq!(
                selector.cart_total().calculate_discount(config, &cart),
                selector.calculate_discount(&rule, &cart)
            );
        }

        let payload = json!({ "product_id": 3, "discount": 50 });
        let rule = StrategySelector::decode("single_product", &payload).unwrap();
        assert_eq!(rule.coupon_type(), SingleProductStrategy::COUPON_TYPE);
        if let RuleConfig::SingleProduct(config) = &rule {
            assert_eq!(selector.single_product().calculate_discount(config, &cart).cents(), 1250);
        }

        assert_eq!(BuyXGetYStrategy::COUPON_TYPE, CouponType::BuyXGetY);
    }
}
