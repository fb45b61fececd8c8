//! # Payment Backend Client
//!
//! Asks the payment relay for a payment-intent client secret.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use shop_core::{ShopError, ShopResult};
use tracing::{error, instrument};

#[derive(Debug, Serialize)]
struct IntentRequest {
    amount: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IntentResponse {
    #[serde(default)]
    client_secret: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Client for the `/create-payment-intent` relay
#[derive(Debug, Clone)]
pub struct PaymentBackendClient {
    base_url: String,
    client: Client,
}

impl PaymentBackendClient {
    pub fn new(base_url: impl Into<String>) -> ShopResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| ShopError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Request a client secret for `amount` (smallest currency unit)
    #[instrument(skip(self))]
    pub async fn request_client_secret(&self, amount: i64) -> ShopResult<String> {
        let url = format!("{}/create-payment-intent", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&IntentRequest { amount })
            .send()
            .await
            .map_err(|e| ShopError::NetworkError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ShopError::NetworkError(e.to_string()))?;

        let parsed: Option<IntentResponse> = serde_json::from_str(&body).ok();

        if !status.is_success() {
            error!("Payment backend error: status={}, body={}", status, body);
            let message = parsed.and_then(|r| r.error).unwrap_or(body);
            return Err(ShopError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        parsed
            .and_then(|r| r.client_secret)
            .filter(|s| !s.is_empty())
            .ok_or(ShopError::MissingClientSecret)
    }
}
