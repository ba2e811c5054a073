//! # Checkout Error Types
//!
//! Typed error handling for the checkout flow.
//! Provisioning returns `Result<PaymentSession, CheckoutError>` so the HTTP
//! layer can tell validation failures apart from upstream provider failures.

use thiserror::Error;

/// Validation message for an absent or zero amount.
pub const MISSING_FIELDS: &str = "Missing required fields";

/// Core error type for all checkout operations
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Configuration errors (missing keys, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid or missing request data (user-correctable)
    #[error("{0}")]
    Validation(String),

    /// Currency code not recognised
    #[error("Unsupported currency: {currency}")]
    UnsupportedCurrency { currency: String },

    /// Payment provider API error
    #[error("Provider error [{provider}]: {message}")]
    ProviderError { provider: String, message: String },

    /// Network/HTTP error communicating with provider or checkout server
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Native payment sheet reported an error during init or present
    #[error("{message}")]
    PaymentUi { code: String, message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CheckoutError {
    /// Shorthand for the absent/zero amount rejection
    pub fn missing_fields() -> Self {
        CheckoutError::Validation(MISSING_FIELDS.to_string())
    }

    /// Returns true if a fresh attempt could reasonably succeed.
    ///
    /// Nothing in the flow retries automatically; the server logs it with
    /// provisioning failures.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            CheckoutError::NetworkError(_) | CheckoutError::ProviderError { .. }
        )
    }

    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            CheckoutError::Configuration(_) => 500,
            CheckoutError::Validation(_) => 400,
            CheckoutError::UnsupportedCurrency { .. } => 400,
            CheckoutError::ProviderError { .. } => 502,
            CheckoutError::NetworkError(_) => 503,
            CheckoutError::PaymentUi { .. } => 500,
            CheckoutError::Serialization(_) => 500,
        }
    }

    /// Short machine-readable code shown to the user in error alerts
    pub fn code(&self) -> &str {
        match self {
            CheckoutError::Configuration(_) => "Configuration",
            CheckoutError::Validation(_) => "Validation",
            CheckoutError::UnsupportedCurrency { .. } => "UnsupportedCurrency",
            CheckoutError::ProviderError { .. } => "Provider",
            CheckoutError::NetworkError(_) => "Network",
            CheckoutError::PaymentUi { code, .. } => code,
            CheckoutError::Serialization(_) => "Serialization",
        }
    }
}

/// Result type alias for checkout operations
pub type CheckoutResult<T> = Result<T, CheckoutError>;
