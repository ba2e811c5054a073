//! # Stripe Provider
//!
//! `PaymentProvider` over the Stripe REST API: customers, customer sessions
//! and payment intents. Requests are form-encoded the way Stripe expects.

use crate::config::StripeConfig;
use async_trait::async_trait;
use checkout_core::{
    CheckoutError, CheckoutResult, Currency, Customer, CustomerSession, IntentRequest,
    MobilePaymentElement, PaymentIntent, PaymentProvider,
};
use chrono::DateTime;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

const PROVIDER: &str = "stripe";

/// Stripe-backed session provisioning
pub struct StripeProvider {
    config: StripeConfig,
    client: Client,
}

impl StripeProvider {
    /// Create a new Stripe provider
    pub fn try_new(config: StripeConfig) -> CheckoutResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| {
                CheckoutError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { config, client })
    }

    /// Create from environment variables
    pub fn from_env() -> CheckoutResult<Self> {
        Self::try_new(StripeConfig::from_env()?)
    }

    pub fn config(&self) -> &StripeConfig {
        &self.config
    }

    /// Form fields for a customer session with the mobile payment element
    fn customer_session_form(
        customer_id: &str,
        element: &MobilePaymentElement,
    ) -> Vec<(String, String)> {
        let prefix = "components[mobile_payment_element]";
        vec![
            ("customer".to_string(), customer_id.to_string()),
            (format!("{}[enabled]", prefix), element.enabled.to_string()),
            (
                format!("{}[features][payment_method_save]", prefix),
                element.payment_method_save.as_str().to_string(),
            ),
            (
                format!("{}[features][payment_method_redisplay]", prefix),
                element.payment_method_redisplay.as_str().to_string(),
            ),
            (
                format!("{}[features][payment_method_remove]", prefix),
                element.payment_method_remove.as_str().to_string(),
            ),
        ]
    }

    /// Form fields for a payment intent
    fn payment_intent_form(request: &IntentRequest) -> Vec<(String, String)> {
        vec![
            ("amount".to_string(), request.amount.to_string()),
            ("currency".to_string(), request.currency.as_str().to_string()),
            ("customer".to_string(), request.customer_id.clone()),
            (
                "automatic_payment_methods[enabled]".to_string(),
                request.automatic_payment_methods.to_string(),
            ),
        ]
    }

    /// POST a form to the Stripe API and decode the JSON response.
    ///
    /// Every call carries its own idempotency key, so separate checkout
    /// attempts are never collapsed into one.
    async fn post_form<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        form: &[(String, String)],
    ) -> CheckoutResult<T> {
        let url = format!("{}/v1/{}", self.config.api_base_url, endpoint);
        let idempotency_key = Uuid::new_v4().to_string();

        debug!("POST {} ({} fields)", url, form.len());

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.config.auth_header())
            .header("Stripe-Version", &self.config.api_version)
            .header("Idempotency-Key", &idempotency_key)
            .form(form)
            .send()
            .await
            .map_err(|e| CheckoutError::NetworkError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CheckoutError::NetworkError(e.to_string()))?;

        if !status.is_success() {
            error!("Stripe API error: endpoint={}, status={}, body={}", endpoint, status, body);

            if let Ok(error_response) = serde_json::from_str::<StripeErrorResponse>(&body) {
                let message = match error_response.error.code {
                    Some(code) => format!("{} ({})", error_response.error.message, code),
                    None => error_response.error.message,
                };
                return Err(CheckoutError::ProviderError {
                    provider: PROVIDER.to_string(),
                    message,
                });
            }

            return Err(CheckoutError::ProviderError {
                provider: PROVIDER.to_string(),
                message: format!("HTTP {}: {}", status, body),
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            CheckoutError::Serialization(format!("Failed to parse Stripe {} response: {}", endpoint, e))
        })
    }
}

#[async_trait]
impl PaymentProvider for StripeProvider {
    #[instrument(skip(self))]
    async fn create_customer(&self) -> CheckoutResult<Customer> {
        let customer: StripeCustomer = self.post_form("customers", &[]).await?;
        info!("Created Stripe customer: id={}", customer.id);
        Ok(Customer { id: customer.id })
    }

    #[instrument(skip(self, element))]
    async fn create_customer_session(
        &self,
        customer_id: &str,
        element: &MobilePaymentElement,
    ) -> CheckoutResult<CustomerSession> {
        let form = Self::customer_session_form(customer_id, element);
        let session: StripeCustomerSession = self.post_form("customer_sessions", &form).await?;

        debug!("Created Stripe customer session for {}", session.customer);

        Ok(CustomerSession {
            client_secret: session.client_secret,
            customer_id: session.customer,
            expires_at: session
                .expires_at
                .and_then(|ts| DateTime::from_timestamp(ts, 0)),
        })
    }

    #[instrument(skip(self, request), fields(amount = request.amount, currency = %request.currency))]
    async fn create_payment_intent(
        &self,
        request: &IntentRequest,
    ) -> CheckoutResult<PaymentIntent> {
        let form = Self::payment_intent_form(request);
        let intent: StripePaymentIntent = self.post_form("payment_intents", &form).await?;

        info!(
            "Created Stripe payment intent: id={}, amount={}, status={}",
            intent.id, intent.amount, intent.status
        );

        let client_secret = intent.client_secret.ok_or_else(|| {
            CheckoutError::Serialization(format!(
                "Payment intent {} has no client_secret",
                intent.id
            ))
        })?;

        Ok(PaymentIntent {
            id: intent.id,
            client_secret,
            amount: intent.amount,
            currency: intent
                .currency
                .parse::<Currency>()
                .unwrap_or(request.currency),
        })
    }

    fn publishable_key(&self) -> &str {
        &self.config.publishable_key
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}

// =============================================================================
// Stripe API Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct StripeCustomer {
    id: String,
}

#[derive(Debug, Deserialize)]
struct StripeCustomerSession {
    client_secret: String,
    customer: String,
    #[serde(default)]
    expires_at: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct StripePaymentIntent {
    id: String,
    #[serde(default)]
    client_secret: Option<String>,
    amount: i64,
    currency: String,
    #[serde(default)]
    status: String,
}

#[derive(Debug, Deserialize)]
struct StripeErrorResponse {
    error: StripeError,
}

#[derive(Debug, Deserialize)]
struct StripeError {
    message: String,
    #[serde(default)]
    code: Option<String>,
}
