//! # shop-api
//!
//! Payment-intent relay for the storefront client.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - A single endpoint that creates a payment intent and returns its client secret
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/create-payment-intent` | Create payment intent, returns `{ "clientSecret": ... }` |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
