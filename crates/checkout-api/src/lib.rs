//! # checkout-api
//!
//! HTTP layer for sheet-checkout.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - The session provisioning endpoint the mobile client calls before
//!   presenting the payment sheet
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/create` | Provision a payment session |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState, LogFormat};
