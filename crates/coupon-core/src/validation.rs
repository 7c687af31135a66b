//! # Validation Module
//!
//! Field rules for rule configurations and cart lines.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Deserialization (serde)                                       │
//! │  ├── Shape of the payload, field types                                  │
//! │  └── Unsigned repetition limit (negative values fail to decode)         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                   │
//! │  ├── Ranges: discount in (0%, 100%], amounts >= 0                       │
//! │  └── Buy/get sets non-empty, product IDs and quantities > 0             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Strategies                                                    │
//! │  └── Assume a validated configuration                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use coupon_core::validation::validate_discount_rate;
//! use coupon_core::types::DiscountRate;
//! use rust_decimal::Decimal;
//!
//! assert!(validate_discount_rate(DiscountRate::new(Decimal::TEN)).is_ok());
//! assert!(validate_discount_rate(DiscountRate::new(Decimal::ZERO)).is_err());
//! ```

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::money::Money;
use crate::rules::{BuyGetConfig, CartTotalConfig, ProductQuantity, SingleProductConfig};
use crate::types::{Cart, DiscountRate};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a discount rate: strictly above 0%, at most 100%.
///
/// Any decimal precision is accepted.
pub fn validate_discount_rate(rate: DiscountRate) -> ValidationResult<()> {
    if rate.percent() <= Decimal::ZERO || rate > DiscountRate::FULL {
        return Err(ValidationError::OutOfRange {
            field: "discount".to_string(),
            min: 0,
            max: 100,
        });
    }

    Ok(())
}

/// Validates an amount that may be zero but not negative.
pub fn validate_non_negative(field: &str, amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Same as [`validate_non_negative`] for optional amounts.
pub fn validate_optional_non_negative(field: &str, amount: Option<Money>) -> ValidationResult<()> {
    match amount {
        Some(amount) => validate_non_negative(field, amount),
        None => Ok(()),
    }
}

/// Validates a product identifier (> 0).
pub fn validate_product_id(product_id: i64) -> ValidationResult<()> {
    if product_id <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "product_id".to_string(),
        });
    }

    Ok(())
}

fn validate_product_set(field: &str, set: &[ProductQuantity]) -> ValidationResult<()> {
    if set.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    for entry in set {
        validate_product_id(entry.product_id)?;
        if entry.quantity <= 0 {
            return Err(ValidationError::MustBePositive {
                field: format!("{field}.quantity"),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Rule Validators
// =============================================================================

/// Validates a cart-total rule.
///
/// ## Rules
/// - `min_cart_total` >= 0
/// - `discount` in (0%, 100%]
/// - `max_discount` >= 0 when set
pub fn validate_cart_total(config: &CartTotalConfig) -> ValidationResult<()> {
    validate_non_negative("min_cart_total", config.min_cart_total)?;
    validate_discount_rate(config.discount)?;
    validate_optional_non_negative("max_discount", config.max_discount)
}

/// Validates a single-product rule.
pub fn validate_single_product(config: &SingleProductConfig) -> ValidationResult<()> {
    validate_product_id(config.product_id)?;
    validate_discount_rate(config.discount)?;
    validate_optional_non_negative("max_discount", config.max_discount)?;
    validate_optional_non_negative("min_cart_total", config.min_cart_total)
}

/// Validates a buy-X-get-Y rule.
///
/// ## Rules
/// - `buy_products` and `get_products` hold at least one entry each
/// - every entry has `product_id > 0` and `quantity > 0`
/// - `min_cart_total` >= 0 when set
pub fn validate_buy_get(config: &BuyGetConfig) -> ValidationResult<()> {
    validate_product_set("buy_products", &config.buy_products)?;
    validate_product_set("get_products", &config.get_products)?;
    validate_optional_non_negative("min_cart_total", config.min_cart_total)
}

// =============================================================================
// Cart Validators
// =============================================================================

/// Validates that every cart line has a non-negative quantity and price.
pub fn validate_cart(cart: &Cart) -> ValidationResult<()> {
    for line in &cart.items {
        if line.quantity < 0 {
            return Err(ValidationError::MustNotBeNegative {
                field: "quantity".to_string(),
            });
        }
        validate_non_negative("unit_price", line.unit_price)?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CartLine;
    use rust_decimal_macros::dec;

    fn cart_total(min: i64, percent: Decimal, max: Option<i64>) -> CartTotalConfig {
        CartTotalConfig {
            min_cart_total: Money::from_cents(min),
            discount: DiscountRate::new(percent),
            max_discount: max.map(Money::from_cents),
        }
    }

    #[test]
    fn test_validate_discount_rate() {
        assert!(validate_discount_rate(DiscountRate::new(dec!(0.001))).is_ok());
        assert!(validate_discount_rate(DiscountRate::new(dec!(12.345))).is_ok());
        assert!(validate_discount_rate(DiscountRate::new(dec!(100))).is_ok());
        assert!(validate_discount_rate(DiscountRate::new(dec!(0))).is_err());
        assert!(validate_discount_rate(DiscountRate::new(dec!(-5))).is_err());
        assert!(validate_discount_rate(DiscountRate::new(dec!(100.01))).is_err());
    }

    #[test]
    fn test_validate_cart_total() {
        assert!(validate_cart_total(&cart_total(10_000, dec!(10), None)).is_ok());
        assert!(validate_cart_total(&cart_total(0, dec!(10), Some(0))).is_ok());

        assert_eq!(
            validate_cart_total(&cart_total(-1, dec!(10), None)),
            Err(ValidationError::MustNotBeNegative {
                field: "min_cart_total".to_string()
            })
        );
        assert!(validate_cart_total(&cart_total(0, dec!(0), None)).is_err());
        assert!(validate_cart_total(&cart_total(0, dec!(10), Some(-5))).is_err());
    }

    #[test]
    fn test_validate_single_product() {
        let mut config = SingleProductConfig {
            product_id: 1,
            discount: DiscountRate::new(dec!(20)),
            max_discount: None,
            min_cart_total: None,
        };
        assert!(validate_single_product(&config).is_ok());

        config.product_id = 0;
        assert_eq!(
            validate_single_product(&config),
            Err(ValidationError::MustBePositive {
                field: "product_id".to_string()
            })
        );

        config.product_id = 1;
        config.min_cart_total = Some(Money::from_cents(-100));
        assert!(validate_single_product(&config).is_err());
    }

    #[test]
    fn test_validate_buy_get() {
        let mut config = BuyGetConfig {
            buy_products: vec![ProductQuantity::new(1, 2)],
            get_products: vec![ProductQuantity::new(3, 1)],
            repetition_limit: 0,
            min_cart_total: None,
        };
        assert!(validate_buy_get(&config).is_ok());

        config.get_products.clear();
        assert_eq!(
            validate_buy_get(&config),
            Err(ValidationError::Required {
                field: "get_products".to_string()
            })
        );

        config.get_products = vec![ProductQuantity::new(3, 0)];
        assert_eq!(
            validate_buy_get(&config),
            Err(ValidationError::MustBePositive {
                field: "get_products.quantity".to_string()
            })
        );

        config.get_products = vec![ProductQuantity::new(3, 1)];
        config.buy_products = vec![ProductQuantity::new(-1, 2)];
        assert!(validate_buy_get(&config).is_err());
    }

    #[test]
    fn test_validate_cart() {
        let mut cart = Cart::with_items(vec![CartLine::new(1, Money::from_cents(0), 0)]);
        assert!(validate_cart(&cart).is_ok());

        cart.items[0].quantity = -1;
        assert!(validate_cart(&cart).is_err());

        cart.items[0].quantity = 1;
        cart.items[0].unit_price = Money::from_cents(-1);
        assert!(validate_cart(&cart).is_err());
    }
}
