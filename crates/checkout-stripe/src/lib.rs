//! # checkout-stripe
//!
//! Stripe payment provider for sheet-checkout.
//!
//! `StripeProvider` implements `PaymentProvider` with three Stripe calls per
//! provisioned session:
//!
//! 1. `POST /v1/customers` - anonymous customer record
//! 2. `POST /v1/customer_sessions` - mobile payment element credential
//! 3. `POST /v1/payment_intents` - the charge, with automatic payment methods
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use checkout_core::{Currency, SessionProvisioner};
//! use checkout_stripe::StripeProvider;
//! use std::sync::Arc;
//!
//! // Create provider from environment
//! let provider = StripeProvider::from_env()?;
//!
//! let provisioner = SessionProvisioner::new(Arc::new(provider), Currency::USD);
//! let session = provisioner.provision(&request).await?;
//! ```

pub mod config;
pub mod provider;

// Re-exports
pub use config::StripeConfig;
pub use provider::StripeProvider;
