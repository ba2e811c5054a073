//! # Payment Provider Trait
//!
//! The seam between the provisioner and the hosted payment API.
//! Implementations: Stripe (`checkout-stripe`), test doubles.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   PaymentProvider (trait)                   │
//! │  ├── create_customer()                                      │
//! │  ├── create_customer_session()                              │
//! │  ├── create_payment_intent()                                │
//! │  └── publishable_key()                                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```

use crate::error::CheckoutResult;
use crate::money::Currency;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A customer record created by the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
}

/// Feature toggle value for mobile payment element capabilities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureState {
    Enabled,
    Disabled,
}

impl FeatureState {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureState::Enabled => "enabled",
            FeatureState::Disabled => "disabled",
        }
    }
}

/// Mobile payment element configuration for a customer session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MobilePaymentElement {
    pub enabled: bool,
    pub payment_method_save: FeatureState,
    pub payment_method_redisplay: FeatureState,
    pub payment_method_remove: FeatureState,
}

impl Default for MobilePaymentElement {
    /// Saved-method display, redisplay and removal all switched on
    fn default() -> Self {
        Self {
            enabled: true,
            payment_method_save: FeatureState::Enabled,
            payment_method_redisplay: FeatureState::Enabled,
            payment_method_remove: FeatureState::Enabled,
        }
    }
}

/// A customer-scoped session credential
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerSession {
    pub client_secret: String,
    pub customer_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Parameters for payment intent creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentRequest {
    /// Amount in the currency's smallest unit
    pub amount: i64,
    pub currency: Currency,
    pub customer_id: String,
    /// Let the provider choose applicable payment methods
    pub automatic_payment_methods: bool,
}

/// A payment intent created by the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
    pub amount: i64,
    pub currency: Currency,
}

/// Hosted payment API used to provision checkout sessions.
///
/// Each method is one remote call; none of them retry.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Create a new anonymous customer record.
    async fn create_customer(&self) -> CheckoutResult<Customer>;

    /// Create a session credential scoped to `customer_id`.
    async fn create_customer_session(
        &self,
        customer_id: &str,
        element: &MobilePaymentElement,
    ) -> CheckoutResult<CustomerSession>;

    /// Create a payment intent for the given amount.
    async fn create_payment_intent(&self, request: &IntentRequest)
        -> CheckoutResult<PaymentIntent>;

    /// Client-visible key handed back alongside the secrets.
    fn publishable_key(&self) -> &str;

    /// Get the provider name (for logging).
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared payment provider (dynamic dispatch)
pub type BoxedPaymentProvider = Arc<dyn PaymentProvider>;
