//! # Routes
//!
//! Axum router configuration for the payment relay.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - GET  /health - Health check
/// - POST /create-payment-intent - Create a payment intent, returns `{ clientSecret }`
pub fn create_router(state: AppState) -> Router {
    // Storefront clients call from arbitrary origins
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/", get(handlers::health))
        .route("/create-payment-intent", post(handlers::create_payment_intent))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
