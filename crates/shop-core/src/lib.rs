//! # shop-core
//!
//! Core types and traits for the storefront client and payment relay.
//!
//! This crate provides:
//! - `Product`, `ProductFilter` and money types for the catalog
//! - `Cart`, `NewCart` and `LocalCart` for cart handling
//! - `User`, `Session`, `ProfileUpdate` and address types
//! - `OrderSummary` for past orders
//! - `PaymentGateway` trait for payment processors
//! - `ShopError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use shop_core::{Currency, LocalCart, ProductFilter};
//!
//! let visible = ProductFilter::new().with_category("electronics").with_search("usb").apply(&products);
//!
//! let mut cart = LocalCart::from_items(items);
//! cart.update_quantity(product_id, -1);
//! let amount = cart.total(Currency::USD).amount; // smallest unit, sent to the payment relay
//! ```

pub mod cart;
pub mod error;
pub mod order;
pub mod payment;
pub mod product;
pub mod user;

// Re-exports for convenience
pub use cart::{Cart, CartItem, CartLine, LocalCart, NewCart};
pub use error::{ShopError, ShopResult};
pub use order::OrderSummary;
pub use payment::{
    BoxedPaymentGateway, PaymentGateway, PaymentIntent, PaymentIntentRequest, PaymentSheetParams,
};
pub use product::{categories, Currency, Price, Product, ProductFilter, Rating};
pub use user::{Address, AddressForm, Geolocation, Name, NewUser, ProfileUpdate, Session, User};
