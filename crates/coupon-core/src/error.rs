//! # Error Types
//!
//! Domain-specific error types for coupon-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  CoreError                                                              │
//! │  ├── UnsupportedRuleType         - unknown coupon type tag              │
//! │  ├── Configuration               - payload failed decode/validation     │
//! │  │     └── ValidationError                                              │
//! │  ├── InvalidCouponConfiguration  - same, naming the coupon              │
//! │  ├── CouponInactive              - lifecycle gate                       │
//! │  └── CouponNotApplicable         - rule does not match the cart         │
//! │                                                                         │
//! │  ConfigError                     - PricingConfig parse/validation       │
//! │                                                                         │
//! │  NOT errors: a rule referencing a product that is not in the cart.      │
//! │  That contributes zero or makes the rule inapplicable.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (coupon ID, field, etc.)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised while selecting, decoding or applying a coupon rule.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The coupon type tag names no known rule.
    #[error("Unsupported coupon rule type: {0}")]
    UnsupportedRuleType(String),

    /// A rule configuration payload is malformed.
    ///
    /// ## When This Occurs
    /// - The payload is not valid JSON for the declared rule type
    /// - A field is out of range (e.g. discount above 100%)
    /// - A buy-X-get-Y rule has an empty buy or get set
    #[error("Invalid rule configuration: {0}")]
    Configuration(#[from] ValidationError),

    /// A stored coupon carries a configuration that fails validation.
    #[error("Coupon {coupon_id} configuration invalid: {source}")]
    InvalidCouponConfiguration {
        coupon_id: i64,
        #[source]
        source: ValidationError,
    },

    /// Coupon is disabled, outside its date window, or fully redeemed.
    #[error("Coupon {coupon_id} is inactive or expired")]
    CouponInactive { coupon_id: i64 },

    /// Coupon rule does not apply to the cart.
    #[error("Coupon {coupon_id} is not applicable for this cart")]
    CouponNotApplicable { coupon_id: i64 },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors for rule configurations and carts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field or collection is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Payload could not be decoded.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Config Error
// =============================================================================

/// Errors loading or validating a [`PricingConfig`](crate::config::PricingConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid pricing configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse pricing configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

/// Result type alias for pricing configuration.
pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Unit Tests
// =============================================================================
