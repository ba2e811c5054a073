//! # Session Client
//!
//! Client side of `POST /create`: sends the charge request to the checkout
//! server and decodes the payment session it returns.

use async_trait::async_trait;
use checkout_core::{CheckoutError, CheckoutResult, CreateSessionBody, PaymentSession};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

/// Requests a payment session from the provisioner
#[async_trait]
pub trait SessionClient: Send + Sync {
    async fn request_session(&self, body: &CreateSessionBody) -> CheckoutResult<PaymentSession>;
}

/// `SessionClient` over HTTP
pub struct HttpSessionClient {
    base_url: String,
    client: Client,
}

impl HttpSessionClient {
    pub fn try_new(base_url: impl Into<String>) -> CheckoutResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| {
                CheckoutError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    fn create_url(&self) -> String {
        format!("{}/create", self.base_url)
    }
}

#[derive(Debug, Deserialize)]
struct ServerError {
    error: String,
}

#[async_trait]
impl SessionClient for HttpSessionClient {
    #[instrument(skip(self, body))]
    async fn request_session(&self, body: &CreateSessionBody) -> CheckoutResult<PaymentSession> {
        let url = self.create_url();
        debug!("Requesting payment session from {}", url);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| CheckoutError::NetworkError(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| CheckoutError::NetworkError(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ServerError>(&text)
                .map(|e| e.error)
                .unwrap_or_else(|_| format!("HTTP {}: {}", status, text));

            warn!("Checkout server rejected session request: {} {}", status, message);

            return Err(if status.is_client_error() {
                CheckoutError::Validation(message)
            } else {
                CheckoutError::ProviderError {
                    provider: "checkout-server".to_string(),
                    message,
                }
            });
        }

        serde_json::from_str(&text).map_err(|e| {
            CheckoutError::Serialization(format!("Failed to parse payment session: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_request_session() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/create"))
            .and(body_json(json!({"amount": "24.50"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "paymentIntent": "pi_1_secret",
                "customerSessionClientSecret": "cuss_1_secret",
                "customer": "cus_1",
                "publishableKey": "pk_test_1"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpSessionClient::try_new(format!("{}/", server.uri())).unwrap();
        let session = client
            .request_session(&CreateSessionBody::formatted("24.50"))
            .await
            .unwrap();

        assert_eq!(session.payment_intent_secret, "pi_1_secret");
        assert_eq!(session.session_secret, "cuss_1_secret");
        assert_eq!(session.customer_id, "cus_1");
        assert_eq!(session.publishable_key, "pk_test_1");
    }

    #[tokio::test]
    async fn test_bad_request_is_validation_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/create"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": "Missing required fields",
                "code": 400
            })))
            .mount(&server)
            .await;

        let client = HttpSessionClient::try_new(server.uri()).unwrap();
        let err = client
            .request_session(&CreateSessionBody::default())
            .await
            .unwrap_err();

        assert!(matches!(err, CheckoutError::Validation(_)));
        assert_eq!(err.to_string(), "Missing required fields");
    }

    #[tokio::test]
    async fn test_server_failure_is_provider_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/create"))
            .respond_with(ResponseTemplate::new(502).set_body_string("upstream down"))
            .mount(&server)
            .await;

        let client = HttpSessionClient::try_new(server.uri()).unwrap();
        let err = client
            .request_session(&CreateSessionBody::formatted("5.00"))
            .await
            .unwrap_err();

        assert_eq!(err.code(), "Provider");
        assert!(err.to_string().contains("upstream down"));
    }
}
