//! # shop-client
//!
//! Storefront client for the Fake Store API.
//!
//! This crate provides:
//! - `FakeStoreClient` for catalog, cart and account endpoints
//! - `PaymentBackendClient` for the payment-intent relay
//! - `SessionStore` for the persisted login
//! - `Storefront`, which composes them into shopper operations
//!
//! ## Example
//!
//! ```rust,ignore
//! use shop_client::{ClientConfig, Storefront};
//!
//! let storefront = Storefront::new(ClientConfig::load()?)?;
//! storefront.login("mor_2314", "83r5^_").await?;
//!
//! let cart = storefront.load_cart().await?;
//! let sheet = storefront.checkout(&cart).await?;
//! // Present the payment sheet with sheet.client_secret
//! ```

pub mod api;
pub mod config;
pub mod payment;
pub mod session;
pub mod storefront;

pub use api::FakeStoreClient;
pub use config::{ClientConfig, OrderHistoryWindow};
pub use payment::PaymentBackendClient;
pub use session::SessionStore;
pub use storefront::Storefront;
