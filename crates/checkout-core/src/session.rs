//! # Session Types
//!
//! The client/server handshake: the charge request the client sends, the
//! payment session the provisioner returns, and the outcome the payment
//! sheet produces on the client.

use crate::error::{CheckoutError, CheckoutResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The `amount` field as it arrives on the wire.
///
/// Clients send either a JSON number or the `toFixed(2)` string form, so
/// both are accepted and normalised into a `Decimal`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    Number(serde_json::Number),
    Text(String),
    Flag(bool),
}

impl RawAmount {
    /// Parse into major currency units.
    ///
    /// Absent-like values (`false`, `""`) and zero are rejected with the
    /// missing-fields message.
    pub fn to_decimal(&self) -> CheckoutResult<Decimal> {
        let text = match self {
            RawAmount::Flag(false) => return Err(CheckoutError::missing_fields()),
            RawAmount::Flag(true) => {
                return Err(CheckoutError::Validation(
                    "amount must be a number".to_string(),
                ))
            }
            RawAmount::Number(n) => n.to_string(),
            RawAmount::Text(s) => s.trim().to_string(),
        };

        if text.is_empty() {
            return Err(CheckoutError::missing_fields());
        }

        Decimal::from_str(&text)
            .or_else(|_| Decimal::from_scientific(&text))
            .map_err(|_| CheckoutError::Validation("amount must be a number".to_string()))
    }
}

/// Body of `POST /create`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateSessionBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<RawAmount>,

    /// Existing provider customer to reuse instead of creating a new one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,
}

impl CreateSessionBody {
    /// Body as the client sends it: amount pre-formatted as a string
    pub fn formatted(amount: impl Into<String>) -> Self {
        Self {
            amount: Some(RawAmount::Text(amount.into())),
            customer: None,
        }
    }

    pub fn with_customer(mut self, customer: impl Into<String>) -> Self {
        self.customer = Some(customer.into());
        self
    }
}

/// A validated charge request: a positive amount in major currency units
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChargeRequest {
    pub amount: Decimal,
    pub customer: Option<String>,
}

impl ChargeRequest {
    pub fn new(amount: Decimal) -> CheckoutResult<Self> {
        if amount.is_zero() {
            return Err(CheckoutError::missing_fields());
        }
        if amount.is_sign_negative() {
            return Err(CheckoutError::Validation(
                "amount must be greater than zero".to_string(),
            ));
        }
        Ok(Self {
            amount,
            customer: None,
        })
    }

    pub fn with_customer(mut self, customer: impl Into<String>) -> Self {
        self.customer = Some(customer.into());
        self
    }
}

impl TryFrom<CreateSessionBody> for ChargeRequest {
    type Error = CheckoutError;

    fn try_from(body: CreateSessionBody) -> Result<Self, Self::Error> {
        let raw = body.amount.ok_or_else(CheckoutError::missing_fields)?;
        let request = ChargeRequest::new(raw.to_decimal()?)?;

        Ok(match body.customer.filter(|c| !c.trim().is_empty()) {
            Some(customer) => request.with_customer(customer),
            None => request,
        })
    }
}

/// Secrets the client needs to drive the native payment sheet.
///
/// Created fresh per checkout attempt and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSession {
    /// Payment intent client secret
    #[serde(rename = "paymentIntent")]
    pub payment_intent_secret: String,

    /// Customer session client secret
    #[serde(rename = "customerSessionClientSecret")]
    pub session_secret: String,

    /// Provider customer ID
    #[serde(rename = "customer")]
    pub customer_id: String,

    #[serde(rename = "publishableKey")]
    pub publishable_key: String,
}

/// Result of one checkout attempt as seen by the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CheckoutOutcome {
    Success,
    /// The user dismissed the sheet; `message` is what the sheet reported
    UserCanceled { message: String },
    Failed { code: String, message: String },
}

impl CheckoutOutcome {
    pub fn failed(code: impl Into<String>, message: impl Into<String>) -> Self {
        CheckoutOutcome::Failed {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn canceled(message: impl Into<String>) -> Self {
        CheckoutOutcome::UserCanceled {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, CheckoutOutcome::Success)
    }
}

impl From<&CheckoutError> for CheckoutOutcome {
    fn from(err: &CheckoutError) -> Self {
        CheckoutOutcome::failed(err.code(), err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MISSING_FIELDS;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn parse(body: serde_json::Value) -> CheckoutResult<ChargeRequest> {
        let body: CreateSessionBody = serde_json::from_value(body).unwrap();
        ChargeRequest::try_from(body)
    }

    #[test]
    fn test_accepts_number_and_string() {
        assert_eq!(parse(json!({"amount": 24.5})).unwrap().amount, dec!(24.5));
        assert_eq!(parse(json!({"amount": "24.50"})).unwrap().amount, dec!(24.50));
        assert_eq!(parse(json!({"amount": 10})).unwrap().amount, dec!(10));
    }

    #[test]
    fn test_missing_or_zero_amount() {
        for body in [
            json!({}),
            json!({"amount": null}),
            json!({"amount": 0}),
            json!({"amount": 0.0}),
            json!({"amount": "0.00"}),
            json!({"amount": ""}),
            json!({"amount": false}),
        ] {
            let err = parse(body.clone()).unwrap_err();
            assert_eq!(err.to_string(), MISSING_FIELDS, "body: {}", body);
        }
    }

    #[test]
    fn test_invalid_amounts() {
        let err = parse(json!({"amount": -3})).unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert_ne!(err.to_string(), MISSING_FIELDS);

        let err = parse(json!({"amount": "twelve"})).unwrap_err();
        assert_eq!(err.to_string(), "amount must be a number");
    }

    #[test]
    fn test_customer_passthrough() {
        let req = parse(json!({"amount": "5.00", "customer": "cus_123"})).unwrap();
        assert_eq!(req.customer.as_deref(), Some("cus_123"));

        let req = parse(json!({"amount": "5.00", "customer": "  "})).unwrap();
        assert_eq!(req.customer, None);
    }

    #[test]
    fn test_payment_session_wire_fields() {
        let session = PaymentSession {
            payment_intent_secret: "pi_1_secret_2".into(),
            session_secret: "cuss_secret_3".into(),
            customer_id: "cus_4".into(),
            publishable_key: "pk_test_5".into(),
        };

        let value = serde_json::to_value(&session).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 4);
        assert_eq!(obj["paymentIntent"], "pi_1_secret_2");
        assert_eq!(obj["customerSessionClientSecret"], "cuss_secret_3");
        assert_eq!(obj["customer"], "cus_4");
        assert_eq!(obj["publishableKey"], "pk_test_5");
    }

    #[test]
    fn test_outcome_wire_shape() {
        let value = serde_json::to_value(CheckoutOutcome::canceled("Zahlung abgebrochen")).unwrap();
        assert_eq!(
            value,
            json!({"status": "user_canceled", "message": "Zahlung abgebrochen"})
        );
    }

    #[test]
    fn test_client_body_serialization() {
        let body = CreateSessionBody::formatted("24.50");
        assert_eq!(serde_json::to_value(&body).unwrap(), json!({"amount": "24.50"}));
    }
}
