//! # Session Provisioner
//!
//! Server-side half of the checkout handshake. Turns a validated charge
//! request into a customer, a customer session and a payment intent, and
//! hands back the secrets the client needs.
//!
//! Stateless between requests: all state lives with the provider.

use crate::error::CheckoutResult;
use crate::money::Currency;
use crate::provider::{BoxedPaymentProvider, IntentRequest, MobilePaymentElement};
use crate::session::{ChargeRequest, PaymentSession};
use tracing::{info, instrument, warn};

pub struct SessionProvisioner {
    provider: BoxedPaymentProvider,
    currency: Currency,
    element: MobilePaymentElement,
}

impl SessionProvisioner {
    pub fn new(provider: BoxedPaymentProvider, currency: Currency) -> Self {
        Self {
            provider,
            currency,
            element: MobilePaymentElement::default(),
        }
    }

    /// Builder: override the mobile payment element configuration
    pub fn with_element(mut self, element: MobilePaymentElement) -> Self {
        self.element = element;
        self
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.provider_name()
    }

    /// Provision a fresh payment session.
    ///
    /// Three provider calls, awaited in order. A failure after the customer
    /// exists leaves that customer behind; nothing is rolled back.
    #[instrument(skip(self, request), fields(amount = %request.amount, currency = %self.currency))]
    pub async fn provision(&self, request: &ChargeRequest) -> CheckoutResult<PaymentSession> {
        // Reject before touching the provider
        let amount = self.currency.to_minor_units(request.amount)?;

        let (customer_id, created) = match &request.customer {
            Some(existing) => (existing.clone(), false),
            None => (self.provider.create_customer().await?.id, true),
        };

        let result = self.provision_for_customer(&customer_id, amount).await;

        if let Err(ref e) = result {
            if created {
                warn!(
                    "Provisioning failed after creating customer {}; leaving it in place: {}",
                    customer_id, e
                );
            }
        }

        result
    }

    async fn provision_for_customer(
        &self,
        customer_id: &str,
        amount: i64,
    ) -> CheckoutResult<PaymentSession> {
        let session = self
            .provider
            .create_customer_session(customer_id, &self.element)
            .await?;

        let intent = self
            .provider
            .create_payment_intent(&IntentRequest {
                amount,
                currency: self.currency,
                customer_id: customer_id.to_string(),
                automatic_payment_methods: true,
            })
            .await?;

        info!(
            "Provisioned payment session: customer={}, intent={}, amount={} {}",
            customer_id, intent.id, intent.amount, self.currency
        );

        Ok(PaymentSession {
            payment_intent_secret: intent.client_secret,
            session_secret: session.client_secret,
            customer_id: customer_id.to_string(),
            publishable_key: self.provider.publishable_key().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CheckoutError, MISSING_FIELDS};
    use crate::provider::{Customer, CustomerSession, PaymentIntent, PaymentProvider};
    use crate::session::CreateSessionBody;
    use async_trait::async_trait;
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct RecordingProvider {
        customers: AtomicUsize,
        sessions: AtomicUsize,
        intents: Mutex<Vec<IntentRequest>>,
        fail_intents: bool,
    }

    #[async_trait]
    impl PaymentProvider for RecordingProvider {
        async fn create_customer(&self) -> CheckoutResult<Customer> {
            let n = self.customers.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(Customer {
                id: format!("cus_{}", n),
            })
        }

        async fn create_customer_session(
            &self,
            customer_id: &str,
            element: &MobilePaymentElement,
        ) -> CheckoutResult<CustomerSession> {
            assert!(element.enabled);
            let n = self.sessions.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(CustomerSession {
                client_secret: format!("cuss_secret_{}", n),
                customer_id: customer_id.to_string(),
                expires_at: None,
            })
        }

        async fn create_payment_intent(
            &self,
            request: &IntentRequest,
        ) -> CheckoutResult<PaymentIntent> {
            if self.fail_intents {
                return Err(CheckoutError::ProviderError {
                    provider: "test".into(),
                    message: "intent rejected".into(),
                });
            }
            let mut intents = self.intents.lock().unwrap();
            intents.push(request.clone());
            Ok(PaymentIntent {
                id: format!("pi_{}", intents.len()),
                client_secret: format!("pi_{}_secret", intents.len()),
                amount: request.amount,
                currency: request.currency,
            })
        }

        fn publishable_key(&self) -> &str {
            "pk_test_abc"
        }

        fn provider_name(&self) -> &'static str {
            "test"
        }
    }

    fn provisioner(provider: Arc<RecordingProvider>) -> SessionProvisioner {
        SessionProvisioner::new(provider, Currency::USD)
    }

    #[tokio::test]
    async fn test_intent_amount_in_minor_units() {
        let provider = Arc::new(RecordingProvider::default());
        let request = ChargeRequest::new(dec!(24.50)).unwrap();

        let session = provisioner(provider.clone()).provision(&request).await.unwrap();

        let intents = provider.intents.lock().unwrap();
        assert_eq!(intents.len(), 1);
        assert_eq!(intents[0].amount, 2450);
        assert_eq!(intents[0].currency, Currency::USD);
        assert_eq!(intents[0].customer_id, "cus_1");
        assert!(intents[0].automatic_payment_methods);

        assert_eq!(session.payment_intent_secret, "pi_1_secret");
        assert_eq!(session.session_secret, "cuss_secret_1");
        assert_eq!(session.customer_id, "cus_1");
        assert_eq!(session.publishable_key, "pk_test_abc");
    }

    #[tokio::test]
    async fn test_no_deduplication_between_attempts() {
        let provider = Arc::new(RecordingProvider::default());
        let provisioner = provisioner(provider.clone());
        let request = ChargeRequest::new(dec!(10)).unwrap();

        let first = provisioner.provision(&request).await.unwrap();
        let second = provisioner.provision(&request).await.unwrap();

        assert_ne!(first.customer_id, second.customer_id);
        assert_ne!(first.payment_intent_secret, second.payment_intent_secret);
        assert_eq!(provider.customers.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_existing_customer_is_reused() {
        let provider = Arc::new(RecordingProvider::default());
        let request = ChargeRequest::new(dec!(10))
            .unwrap()
            .with_customer("cus_returning");

        let session = provisioner(provider.clone()).provision(&request).await.unwrap();

        assert_eq!(session.customer_id, "cus_returning");
        assert_eq!(provider.customers.load(Ordering::SeqCst), 0);
        assert_eq!(provider.intents.lock().unwrap()[0].customer_id, "cus_returning");
    }

    #[tokio::test]
    async fn test_invalid_amount_makes_no_provider_calls() {
        let provider = Arc::new(RecordingProvider::default());
        let body: CreateSessionBody = serde_json::from_str(r#"{"amount": 0}"#).unwrap();

        let err = ChargeRequest::try_from(body).unwrap_err();
        assert_eq!(err.to_string(), MISSING_FIELDS);

        // Over-precise amounts pass request validation but stop before any call
        let request = ChargeRequest::new(dec!(1.001)).unwrap();
        let err = provisioner(provider.clone()).provision(&request).await.unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert_eq!(provider.customers.load(Ordering::SeqCst), 0);
        assert_eq!(provider.sessions.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_provider_failure_propagates_without_cleanup() {
        let provider = Arc::new(RecordingProvider {
            fail_intents: true,
            ..Default::default()
        });
        let request = ChargeRequest::new(dec!(24.50)).unwrap();

        let err = provisioner(provider.clone()).provision(&request).await.unwrap_err();

        assert_eq!(err.status_code(), 502);
        // Customer and session were created and are left in place
        assert_eq!(provider.customers.load(Ordering::SeqCst), 1);
        assert_eq!(provider.sessions.load(Ordering::SeqCst), 1);
    }
}
