//! # Application State
//!
//! Shared state for the Axum application.
//! Holds the session provisioner and the server configuration.

use checkout_core::{BoxedPaymentProvider, CheckoutError, Currency, SessionProvisioner};
use checkout_stripe::StripeProvider;
use std::net::SocketAddr;
use std::sync::Arc;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Currency every payment intent is created in
    pub currency: Currency,
    /// Log output format
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Result<Self, CheckoutError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CheckoutError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(p) => p
                .parse()
                .map_err(|_| CheckoutError::Configuration(format!("Invalid PORT: {}", p)))?,
            None => 8080,
        };

        let currency = match lookup("CHECKOUT_CURRENCY") {
            Some(code) => code.parse()?,
            None => Currency::USD,
        };

        let log_format = match lookup("LOG_FORMAT").as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port,
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            currency,
            log_format,
        })
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> Result<SocketAddr, CheckoutError> {
        format!("{}:{}", self.host, self.port).parse().map_err(|_| {
            CheckoutError::Configuration(format!(
                "Invalid socket address: {}:{}",
                self.host, self.port
            ))
        })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Session provisioner
    pub provisioner: Arc<SessionProvisioner>,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create a new AppState backed by Stripe
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let stripe = StripeProvider::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize Stripe: {}", e))?;

        if stripe.config().is_live_mode() && !config.is_production() {
            tracing::warn!("Using live Stripe keys outside production");
        }

        Ok(Self::with_provider(config, Arc::new(stripe)))
    }

    /// Create state around an arbitrary provider
    pub fn with_provider(config: AppConfig, provider: BoxedPaymentProvider) -> Self {
        let provisioner = SessionProvisioner::new(provider, config.currency);
        Self {
            provisioner: Arc::new(provisioner),
            config,
        }
    }
}
