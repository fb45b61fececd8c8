//! # Request Handlers
//!
//! Axum request handlers for the payment relay.

use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use shop_core::{Currency, PaymentIntentRequest, ShopError};
use tracing::{error, info, instrument};
use uuid::Uuid;

// =============================================================================
// Request/Response Types
// =============================================================================

/// Create payment intent request
#[derive(Debug, Deserialize)]
pub struct CreatePaymentIntentRequest {
    /// Amount in smallest currency unit. Fractional values are rounded.
    pub amount: f64,
    /// Currency code, any case (optional, defaults to the relay's configured currency)
    #[serde(default)]
    pub currency: Option<String>,
    /// Description shown on the processor dashboard (optional)
    #[serde(default)]
    pub description: Option<String>,
    /// Idempotency key (optional, generated when absent)
    #[serde(default)]
    pub idempotency_key: Option<String>,
}

/// Create payment intent response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentIntentResponse {
    pub client_secret: String,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: u16) -> Self {
        Self {
            error: error.into(),
            code,
        }
    }
}

fn shop_error_to_response(err: ShopError) -> (StatusCode, Json<ErrorResponse>) {
    let code = err.status_code();
    let response = ErrorResponse::new(err.to_string(), code);
    (
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(response),
    )
}

/// Validate and round a wire amount to the smallest currency unit
fn amount_in_smallest_unit(amount: f64) -> Result<i64, ShopError> {
    if !amount.is_finite() {
        return Err(ShopError::InvalidRequest("Amount must be a number".to_string()));
    }
    let rounded = amount.round();
    if rounded < 1.0 || rounded > i64::MAX as f64 {
        return Err(ShopError::InvalidRequest(
            "Amount must be greater than zero".to_string(),
        ));
    }
    Ok(rounded as i64)
}

fn parse_currency(code: Option<&str>, default: Currency) -> Result<Currency, ShopError> {
    match code {
        None => Ok(default),
        Some(code) => code
            .parse::<Currency>()
            .map_err(|_| ShopError::InvalidRequest(format!("Unsupported currency: {}", code))),
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "payment-relay",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Create a payment intent and return its client secret
#[instrument(skip(state, payload))]
pub async fn create_payment_intent(
    State(state): State<AppState>,
    payload: Result<Json<CreatePaymentIntentRequest>, JsonRejection>,
) -> Result<Json<CreatePaymentIntentResponse>, (StatusCode, Json<ErrorResponse>)> {
    let Json(request) = payload.map_err(|rejection| {
        shop_error_to_response(ShopError::InvalidRequest(rejection.body_text()))
    })?;
    let amount = amount_in_smallest_unit(request.amount).map_err(shop_error_to_response)?;
    let currency = parse_currency(request.currency.as_deref(), state.default_currency)
        .map_err(shop_error_to_response)?;
    let idempotency_key = request
        .idempotency_key
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let mut intent_request =
        PaymentIntentRequest::new(amount, currency).with_idempotency_key(idempotency_key);
    if let Some(description) = request.description {
        intent_request = intent_request.with_description(description);
    }

    let intent = state
        .gateway
        .create_payment_intent(&intent_request)
        .await
        .map_err(|e| {
            error!("Error creating payment intent: {}", e);
            shop_error_to_response(e)
        })?;

    info!(
        "Payment intent created: id={}, provider={}, status={}",
        intent.id,
        state.gateway.provider_name(),
        intent.status
    );

    Ok(Json(CreatePaymentIntentResponse {
        client_secret: intent.client_secret,
    }))
}
