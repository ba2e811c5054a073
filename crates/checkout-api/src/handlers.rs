//! # Request Handlers
//!
//! Axum request handlers for the session provisioning API.

use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use checkout_core::{ChargeRequest, CheckoutError, CreateSessionBody, PaymentSession};
use serde::Serialize;
use tracing::{error, info, instrument, warn};

// =============================================================================
// Response Types
// =============================================================================

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: u16) -> Self {
        Self {
            error: error.into(),
            code,
        }
    }
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn checkout_error_to_response(err: CheckoutError) -> ApiError {
    let code = err.status_code();
    let response = ErrorResponse::new(err.to_string(), code);
    (
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(response),
    )
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "checkout-server",
        "version": env!("CARGO_PKG_VERSION"),
        "provider": state.provisioner.provider_name(),
        "currency": state.provisioner.currency(),
        "time": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Provision a payment session (`POST /create`)
///
/// Validation failures answer 400 before the provider is contacted;
/// provider failures answer 502/503.
#[instrument(skip(state, body))]
pub async fn create_session(
    State(state): State<AppState>,
    body: Result<Json<CreateSessionBody>, JsonRejection>,
) -> Result<Json<PaymentSession>, ApiError> {
    let Json(body) = body.map_err(|rejection| {
        warn!("Rejected create body: {}", rejection.body_text());
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(rejection.body_text(), 400)),
        )
    })?;

    let request = ChargeRequest::try_from(body).map_err(|e| {
        info!("Invalid charge request: {}", e);
        checkout_error_to_response(e)
    })?;

    let session = state.provisioner.provision(&request).await.map_err(|e| {
        if e.status_code() >= 500 {
            error!(
                retryable = e.is_retryable(),
                "Failed to provision payment session: {}", e
            );
        }
        checkout_error_to_response(e)
    })?;

    info!("Provisioned session for customer {}", session.customer_id);

    Ok(Json(session))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response() {
        let err = ErrorResponse::new("Test error", 400);
        assert_eq!(err.error, "Test error");
        assert_eq!(err.code, 400);
    }

    #[test]
    fn test_validation_maps_to_bad_request() {
        let (status, Json(body)) = checkout_error_to_response(CheckoutError::missing_fields());
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "Missing required fields");
    }

    #[test]
    fn test_provider_failure_maps_to_bad_gateway() {
        let (status, _json) = checkout_error_to_response(CheckoutError::ProviderError {
            provider: "stripe".into(),
            message: "boom".into(),
        });
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }
}
