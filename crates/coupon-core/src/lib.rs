//! # coupon-core: Coupon Rule Evaluation
//!
//! Pure discount logic for shopping-cart coupons. Given a cart and one
//! coupon's rule configuration, decide whether the coupon applies, how much
//! it is worth, and rewrite the cart lines to reflect it.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Coupon Service                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │   HTTP handlers / coupon store (outside this crate)             │    │
//! │  │   load coupons, validate requests, count redemptions            │    │
//! │  └─────────────────────────────┬───────────────────────────────────┘    │
//! │                                │ Coupon, &mut Cart, now                 │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐    │
//! │  │               ★ coupon-core (THIS CRATE) ★                      │    │
//! │  │                                                                 │    │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐    │    │
//! │  │   │  engine   │  │ strategy  │  │   rules   │  │   money   │    │    │
//! │  │   │ lifecycle │  │ CartTotal │  │ RuleConfig│  │   Money   │    │    │
//! │  │   │ apply flow│  │ Product   │  │ validation│  │ Rounding  │    │    │
//! │  │   │           │  │ BuyXGetY  │  │           │  │           │    │    │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘    │    │
//! │  │                                                                 │    │
//! │  │   NO I/O • NO DATABASE • NO CLOCK • PURE FUNCTIONS              │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Cart, cart lines, coupons
//! - [`money`] - Integer-cents money and rounding
//! - [`rules`] - Per-type rule configuration
//! - [`strategy`] - Strategy contract, the three rules, the selector
//! - [`engine`] - Lifecycle gating and the apply flow
//! - [`validation`] - Configuration field rules
//! - [`config`] - Engine settings
//! - [`error`] - Error types
//!
//! ## Example Usage
//!
//! ```rust
//! use coupon_core::strategy::{StrategySelector, DEFAULT_SELECTOR};
//! use coupon_core::{Cart, CartLine, Money};
//! use serde_json::json;
//!
//! let rule = StrategySelector::decode(
//!     "cart_total",
//!     &json!({ "min_cart_total": 10000, "discount": 10 }),
//! )
//! .unwrap();
//!
//! let mut cart = Cart::with_items(vec![
//!     CartLine::new(1, Money::from_cents(5000), 2),
//!     CartLine::new(2, Money::from_cents(3000), 1),
//! ]);
//!
//! assert!(DEFAULT_SELECTOR.is_applicable(&rule, &cart));
//! assert_eq!(DEFAULT_SELECTOR.calculate_discount(&rule, &cart).cents(), 1300);
//!
//! DEFAULT_SELECTOR.apply(&rule, &mut cart);
//! assert_eq!(cart.totals().final_price.cents(), 11_700);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod engine;
pub mod error;
pub mod money;
pub mod rules;
pub mod strategy;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use config::PricingConfig;
pub use engine::CouponEngine;
pub use error::{ConfigError, CoreError, CoreResult, ValidationError};
pub use money::{Money, RoundingMode};
pub use rules::{BuyGetConfig, CartTotalConfig, ProductQuantity, RuleConfig, SingleProductConfig};
pub use strategy::{
    BuyXGetYStrategy, CartTotalStrategy, CouponStrategy, SingleProductStrategy, StrategySelector,
};
pub use types::*;
