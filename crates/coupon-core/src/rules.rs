//! # Rule Configuration
//!
//! Parameter records for the three coupon rule types, and the tagged
//! [`RuleConfig`] that carries one of them.
//!
//! ## Payload Format
//! Money fields are integer cents; discount rates are percentages and may
//! carry any number of decimals:
//! ```json
//! { "type": "cart_total",
//!   "details": { "min_cart_total": 10000, "discount": 10, "max_discount": 2500 } }
//!
//! { "type": "single_product",
//!   "details": { "product_id": 1, "discount": 12.345 } }
//!
//! { "type": "buy_x_get_y",
//!   "details": { "buy_products": [{ "product_id": 1, "quantity": 2 }],
//!                "get_products": [{ "product_id": 3, "quantity": 1 }],
//!                "repetition_limit": 2 } }
//! ```
//!
//! Records are immutable once decoded; no strategy writes to its
//! configuration.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{CouponType, DiscountRate};
use crate::validation;

// =============================================================================
// Per-Type Records
// =============================================================================

/// Percentage off the whole cart once it reaches a minimum total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartTotalConfig {
    /// Cart total required before the rule applies.
    #[serde(default)]
    pub min_cart_total: Money,

    pub discount: DiscountRate,

    /// Upper bound on the discount amount.
    #[serde(default)]
    pub max_discount: Option<Money>,
}

/// Percentage off a single product line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SingleProductConfig {
    /// Product whose line is discounted.
    pub product_id: i64,

    pub discount: DiscountRate,

    #[serde(default)]
    pub max_discount: Option<Money>,

    /// Optional cart total gate.
    #[serde(default)]
    pub min_cart_total: Option<Money>,
}

/// A product and the number of units a buy-X-get-Y rule requires or grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductQuantity {
    pub product_id: i64,
    pub quantity: i64,
}

impl ProductQuantity {
    pub const fn new(product_id: i64, quantity: i64) -> Self {
        ProductQuantity {
            product_id,
            quantity,
        }
    }
}

/// Buy every product in `buy_products`, get every product in
/// `get_products` free, up to `repetition_limit` times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BuyGetConfig {
    pub buy_products: Vec<ProductQuantity>,

    pub get_products: Vec<ProductQuantity>,

    /// Maximum eligible sets per cart. 0 = unlimited.
    #[serde(default)]
    pub repetition_limit: u32,

    #[serde(default)]
    pub min_cart_total: Option<Money>,
}

// =============================================================================
// Tagged Rule Configuration
// =============================================================================

/// A coupon's rule, tagged by its [`CouponType`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type", content = "details", rename_all = "snake_case")]
pub enum RuleConfig {
    CartTotal(CartTotalConfig),
    SingleProduct(SingleProductConfig),
    #[serde(rename = "buy_x_get_y")]
    BuyXGetY(BuyGetConfig),
}

impl RuleConfig {
    /// The tag this configuration is stored under.
    pub fn coupon_type(&self) -> CouponType {
        match self {
            RuleConfig::CartTotal(_) => CouponType::CartTotal,
            RuleConfig::SingleProduct(_) => CouponType::SingleProduct,
            RuleConfig::BuyXGetY(_) => CouponType::BuyXGetY,
        }
    }

    /// Checks the per-type field rules.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            RuleConfig::CartTotal(config) => validation::validate_cart_total(config),
            RuleConfig::SingleProduct(config) => validation::validate_single_product(config),
            RuleConfig::BuyXGetY(config) => validation::validate_buy_get(config),
        }
    }
}

impl From<CartTotalConfig> for RuleConfig {
    fn from(config: CartTotalConfig) -> Self {
        RuleConfig::CartTotal(config)
    }
}

impl From<SingleProductConfig> for RuleConfig {
    fn from(config: SingleProductConfig) -> Self {
        RuleConfig::SingleProduct(config)
    }
}

impl From<BuyGetConfig> for RuleConfig {
    fn from(config: BuyGetConfig) -> Self {
        RuleConfig::BuyXGetY(config)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_tagged_payload_deserializes() {
        let rule: RuleConfig = serde_json::from_value(json!({
            "type": "buy_x_get_y",
            "details": {
                "buy_products": [{ "product_id": 1, "quantity": 2 }],
                "get_products": [{ "product_id": 3, "quantity": 1 }],
                "repetition_limit": 2
            }
        }))
        .unwrap();

        assert_eq!(rule.coupon_type(), CouponType::BuyXGetY);
        match rule {
            RuleConfig::BuyXGetY(config) => {
                assert_eq!(config.buy_products, vec![ProductQuantity::new(1, 2)]);
                assert_eq!(config.repetition_limit, 2);
                assert_eq!(config.min_cart_total, None);
            }
            other => panic!("unexpected rule {:?}", other),
        }
    }

    #[test]
    fn test_optional_fields_default() {
        let rule: RuleConfig = serde_json::from_value(json!({
            "type": "cart_total",
            "details": { "discount": 10 }
        }))
        .unwrap();

        assert_eq!(
            rule,
            RuleConfig::CartTotal(CartTotalConfig {
                min_cart_total: Money::zero(),
                discount: DiscountRate::new(dec!(10)),
                max_discount: None,
            })
        );
    }

    #[test]
    fn test_serializes_with_type_tag() {
        let rule = RuleConfig::from(SingleProductConfig {
            product_id: 1,
            discount: DiscountRate::new(dec!(12.345)),
            max_discount: None,
            min_cart_total: Some(Money::from_cents(5000)),
        });
        let value = serde_json::to_value(&rule).unwrap();
        assert_eq!(value["type"], "single_product");
        assert_eq!(value["details"]["product_id"], 1);
        assert_eq!(value["details"]["min_cart_total"], 5000);
        assert_eq!(value["details"]["discount"], 12.345);

        let back: RuleConfig = serde_json::from_value(value).unwrap();
        assert_eq!(back, rule);
    }

    #[test]
    fn test_validate_dispatches_per_type() {
        let rule = RuleConfig::from(BuyGetConfig {
            buy_products: vec![],
            get_products: vec![ProductQuantity::new(3, 1)],
            repetition_limit: 0,
            min_cart_total: None,
        });
        assert_eq!(
            rule.validate(),
            Err(ValidationError::Required {
                field: "buy_products".to_string()
            })
        );
    }
}
