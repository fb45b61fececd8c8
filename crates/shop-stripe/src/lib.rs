//! # shop-stripe
//!
//! Stripe payment gateway for storefront-rs.
//!
//! **StripePaymentIntentGateway** wraps the PaymentIntents API:
//! - Amount and currency from the shopper's cart total
//! - 3-D Secure requested on every card
//! - Merchant name recorded in intent metadata
//! - Optional idempotency key
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use shop_stripe::StripePaymentIntentGateway;
//! use shop_core::{Currency, PaymentGateway, PaymentIntentRequest};
//!
//! let gateway = StripePaymentIntentGateway::from_env()?;
//! let intent = gateway
//!     .create_payment_intent(&PaymentIntentRequest::new(2499, Currency::USD))
//!     .await?;
//!
//! // Hand intent.client_secret to the storefront's payment sheet
//! ```

pub mod config;
pub mod intent;

// Re-exports
pub use config::StripeConfig;
pub use intent::StripePaymentIntentGateway;
