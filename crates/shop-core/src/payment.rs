//! # Payment Gateway Trait
//!
//! Strategy trait for the processor behind the payment relay.
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │           PaymentGateway (trait)            │
//! │  ├── create_payment_intent()                │
//! │  └── provider_name()                        │
//! └─────────────────────────────────────────────┘
//!                       ▲
//!          ┌────────────┴────────────┐
//!  ┌───────┴────────┐        ┌───────┴───────┐
//!  │ StripePayment  │        │  test doubles │
//!  │ IntentGateway  │        │               │
//!  └────────────────┘        └───────────────┘
//! ```

use crate::error::ShopResult;
use crate::product::Currency;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Request to authorize a charge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentIntentRequest {
    /// Amount in smallest currency unit
    pub amount: i64,
    pub currency: Currency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Prevents duplicate intents when a request is replayed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idempotency_key: Option<String>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, String>,
}

impl PaymentIntentRequest {
    pub fn new(amount: i64, currency: Currency) -> Self {
        Self {
            amount,
            currency,
            description: None,
            idempotency_key: None,
            metadata: HashMap::new(),
        }
    }

    /// Builder: set description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Builder: set idempotency key
    pub fn with_idempotency_key(mut self, key: impl Into<String>) -> Self {
        self.idempotency_key = Some(key.into());
        self
    }

    /// Builder: add metadata
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// A payment intent as created by the processor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    /// Opaque secret handed to the client-side payment UI
    pub client_secret: String,
    pub amount: i64,
    pub currency: String,
    pub status: String,
}

/// Everything the client-side payment sheet needs to present itself
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSheetParams {
    #[serde(rename = "paymentIntentClientSecret")]
    pub client_secret: String,
    pub merchant_display_name: String,
    pub country_code: String,
    pub google_pay: bool,
    pub apple_pay: bool,
}

/// Payment processor abstraction.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a payment intent and return it with its client secret.
    async fn create_payment_intent(&self, request: &PaymentIntentRequest) -> ShopResult<PaymentIntent>;

    /// Get the provider name (for logging and errors).
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared payment gateway (dynamic dispatch)
pub type BoxedPaymentGateway = Arc<dyn PaymentGateway>;

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedGateway;

    #[async_trait]
    impl PaymentGateway for FixedGateway {
        async fn create_payment_intent(
            &self,
            request: &PaymentIntentRequest,
        ) -> ShopResult<PaymentIntent> {
            Ok(PaymentIntent {
                id: "pi_1".into(),
                client_secret: "pi_1_secret_x".into(),
                amount: request.amount,
                currency: request.currency.as_str().into(),
                status: "requires_payment_method".into(),
            })
        }

        fn provider_name(&self) -> &'static str {
            "fixed"
        }
    }

    #[tokio::test]
    async fn test_boxed_gateway_dispatch() {
        let gateway: BoxedPaymentGateway = Arc::new(FixedGateway);
        let request = PaymentIntentRequest::new(2499, Currency::USD).with_idempotency_key("k1");
        let intent = gateway.create_payment_intent(&request).await.unwrap();

        assert_eq!(intent.amount, 2499);
        assert_eq!(intent.currency, "usd");
        assert_eq!(gateway.provider_name(), "fixed");
    }

    #[test]
    fn test_sheet_params_wire_names() {
        let params = PaymentSheetParams {
            client_secret: "pi_1_secret_x".into(),
            merchant_display_name: "Storefront".into(),
            country_code: "US".into(),
            google_pay: false,
            apple_pay: false,
        };
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["paymentIntentClientSecret"], "pi_1_secret_x");
        assert_eq!(json["merchantDisplayName"], "Storefront");
        assert_eq!(json["countryCode"], "US");
        assert_eq!(json["googlePay"], false);
    }
}
