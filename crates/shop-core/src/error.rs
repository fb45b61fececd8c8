//! # Storefront Error Types
//!
//! Typed error handling for the storefront client and payment relay.
//! All storefront operations return `Result<T, ShopError>`.

use thiserror::Error;

/// Core error type for all storefront operations
#[derive(Debug, Error)]
pub enum ShopError {
    /// Configuration errors (missing keys, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A required form field was left empty
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Login rejected by the store API
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Login succeeded but the account could not be located
    #[error("User not found: {username}")]
    UserNotFound { username: String },

    /// The user record carries no address
    #[error("No address on file for user {user_id}")]
    AddressNotFound { user_id: u64 },

    /// Product not found in the catalog
    #[error("Product not found: {product_id}")]
    ProductNotFound { product_id: u64 },

    /// Checkout attempted with nothing in the cart
    #[error("Cart is empty")]
    EmptyCart,

    /// Profile update submitted without any changed field
    #[error("No changes to save")]
    NoChanges,

    /// Operation requires a stored session
    #[error("Not logged in")]
    NotLoggedIn,

    /// Payment backend answered without a client secret
    #[error("Payment backend returned no client secret")]
    MissingClientSecret,

    /// Payment provider API error
    #[error("Provider error [{provider}]: {message}")]
    ProviderError { provider: String, message: String },

    /// Non-success response from the store API
    #[error("API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Network/HTTP error communicating with a remote service
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Local session storage failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ShopError {
    /// Returns true if this error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            ShopError::NetworkError(_) | ShopError::ProviderError { .. } => true,
            ShopError::ApiError { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }

    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            ShopError::Configuration(_) => 500,
            ShopError::InvalidRequest(_) => 400,
            ShopError::MissingField { .. } => 400,
            ShopError::InvalidCredentials => 401,
            ShopError::UserNotFound { .. } => 404,
            ShopError::AddressNotFound { .. } => 404,
            ShopError::ProductNotFound { .. } => 404,
            ShopError::EmptyCart => 400,
            ShopError::NoChanges => 400,
            ShopError::NotLoggedIn => 401,
            ShopError::MissingClientSecret => 502,
            ShopError::ProviderError { .. } => 502,
            ShopError::ApiError { .. } => 502,
            ShopError::NetworkError(_) => 503,
            ShopError::Serialization(_) => 500,
            ShopError::Storage(_) => 500,
            ShopError::Internal(_) => 500,
        }
    }
}

impl From<serde_json::Error> for ShopError {
    fn from(err: serde_json::Error) -> Self {
        ShopError::Serialization(err.to_string())
    }
}

/// Result type alias for storefront operations
pub type ShopResult<T> = Result<T, ShopError>;
