//! # Coupon Engine
//!
//! Runs stored coupons against a cart: which coupons apply, and what the
//! cart looks like after one of them is applied.
//!
//! ## Apply Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  apply_coupon(coupon, &mut cart, now)                                   │
//! │       │                                                                 │
//! │       ├── invalid cart line ───────────► Configuration                  │
//! │       │                                                                 │
//! │       ├── !coupon.is_active_at(now) ──► CouponInactive                  │
//! │       │                                                                 │
//! │       ├── rule.validate() fails ──────► InvalidCouponConfiguration      │
//! │       │                                                                 │
//! │       ├── !is_applicable(rule, cart) ─► CouponNotApplicable             │
//! │       │                                                                 │
//! │       └── apply(rule, cart) ──────────► Ok(cart.totals())               │
//! │                                                                         │
//! │  Redemption counting stays with the caller: it owns the coupon store.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `now` is always passed in; the engine never reads the clock.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::config::PricingConfig;
use crate::error::{CoreError, CoreResult};
use crate::strategy::StrategySelector;
use crate::types::{ApplicableCoupon, Cart, CartTotals, Coupon};
use crate::validation::validate_cart;

#[derive(Debug, Clone, Copy, Default)]
pub struct CouponEngine {
    selector: StrategySelector,
}

impl CouponEngine {
    pub fn new(config: &PricingConfig) -> Self {
        CouponEngine {
            selector: StrategySelector::from_config(config),
        }
    }

    /// Lists the coupons that apply to `cart`, in input order, with the
    /// discount each would give. The cart is not modified.
    ///
    /// Coupons inactive at `now` are skipped. A coupon with an invalid
    /// configuration aborts the whole evaluation.
    pub fn applicable_coupons(
        &self,
        coupons: &[Coupon],
        cart: &Cart,
        now: DateTime<Utc>,
    ) -> CoreResult<Vec<ApplicableCoupon>> {
        validate_cart(cart)?;
        let mut applicable = Vec::new();

        for coupon in coupons {
            if !coupon.is_active_at(now) {
                debug!(coupon_id = coupon.id, "Skipping inactive coupon");
                continue;
            }

            validate_coupon(coupon)?;

            if self.selector.is_applicable(&coupon.rule, cart) {
                let discount = self.selector.calculate_discount(&coupon.rule, cart);
                debug!(
                    coupon_id = coupon.id,
                    rule = %coupon.coupon_type(),
                    discount = %discount,
                    "Coupon applicable"
                );
                applicable.push(ApplicableCoupon {
                    coupon_id: coupon.id,
                    coupon_type: coupon.coupon_type(),
                    discount,
                });
            }
        }

        Ok(applicable)
    }

    /// Applies `coupon` to `cart` and returns the resulting totals.
    ///
    /// ## Errors
    /// - `Configuration` when a cart line has a negative quantity or price
    /// - `CouponInactive` when the coupon is disabled, outside its date
    ///   window or fully redeemed
    /// - `InvalidCouponConfiguration` when the rule fails validation
    /// - `CouponNotApplicable` when the rule does not match the cart
    ///
    /// The cart is only modified on success.
    pub fn apply_coupon(
        &self,
        coupon: &Coupon,
        cart: &mut Cart,
        now: DateTime<Utc>,
    ) -> CoreResult<CartTotals> {
        validate_cart(cart)?;

        if !coupon.is_active_at(now) {
            return Err(CoreError::CouponInactive {
                coupon_id: coupon.id,
            });
        }

        validate_coupon(coupon)?;

        if !self.selector.is_applicable(&coupon.rule, cart) {
            return Err(CoreError::CouponNotApplicable {
                coupon_id: coupon.id,
            });
        }

        debug!(coupon_id = coupon.id, rule = %coupon.coupon_type(), "Applying coupon");
        let totals = self.selector.apply(&coupon.rule, cart).totals();
        debug!(
            coupon_id = coupon.id,
            total_discount = %totals.total_discount,
            final_price = %totals.final_price,
            "Coupon applied"
        );
        Ok(totals)
    }
}

fn validate_coupon(coupon: &Coupon) -> CoreResult<()> {
    coupon
        .rule
        .validate()
        .map_err(|source| CoreError::InvalidCouponConfiguration {
            coupon_id: coupon.id,
            source,
        })
}

// =============================================================================
// Unit Tests
// =============================================================================
