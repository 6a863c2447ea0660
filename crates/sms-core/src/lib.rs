//! # SMS Core
//!
//! Core traits and types shared by the sms-relay crates.
//!
//! This crate provides the fundamental building blocks:
//! - [`SmsClient`] trait implemented by gateway backends
//! - [`SmsError`] and its [`FailureReason`] tag
//! - [`ApiResponse`], a framework-agnostic HTTP response for the web adapters
//!
//! ## Example
//!
//! ```rust,ignore
//! use sms_core::{SendRequest, SmsClient};
//!
//! // Any gateway backend implements SmsClient
//! let response = client.send(SendRequest {
//!     to: "09123456789",
//!     from: Some("2000660110"),
//!     text: "Hello world!"
//! }).await?;
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Why a gateway call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureReason {
    /// The gateway answered but refused the message (bad sender, no credit, ...).
    ApplicationRejected,
    /// The gateway could not be reached or answered with something unreadable.
    TransportFailed,
}

/// Errors that can occur while sending through a gateway
#[derive(Debug, thiserror::Error)]
pub enum SmsError {
    /// The gateway returned an application-level error status
    #[error("gateway rejected request [{status}]: {message}")]
    Rejected { status: u16, message: String },
    /// HTTP communication error, or a response that could not be decoded
    #[error("http error: {0}")]
    Http(String),
}

impl SmsError {
    pub fn reason(&self) -> FailureReason {
        match self {
            SmsError::Rejected { .. } => FailureReason::ApplicationRejected,
            SmsError::Http(_) => FailureReason::TransportFailed,
        }
    }
}

/// HTTP status code for web responses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpStatus {
    Ok = 200,
    BadRequest = 400,
    UnprocessableEntity = 422,
}

impl HttpStatus {
    pub fn as_u16(self) -> u16 {
        self as u16
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SendRequest<'a> {
    pub to: &'a str,
    /// Sender line; `None` lets the gateway pick the account default.
    pub from: Option<&'a str>,
    pub text: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct SendResponse {
    pub id: String,
    /// Name of the backend/provider that produced the response, e.g. "kavenegar".
    pub provider: &'static str,
    /// Gateway's human-readable status for the message, if it sent one.
    pub status_text: Option<String>,
    /// When the gateway accepted the message.
    pub accepted_at: Option<OffsetDateTime>,
    /// Raw provider payload for debugging / audit.
    pub raw: serde_json::Value,
}

/// Generic response that can be converted to any framework's response type
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: HttpStatus,
    pub body: String,
    pub content_type: String,
}

impl ApiResponse {
    pub fn json(status: HttpStatus, body: &serde_json::Value) -> Self {
        Self {
            status,
            body: serde_json::to_string(body).unwrap_or_else(|_| "{}".to_string()),
            content_type: "application/json".to_string(),
        }
    }

    /// Acknowledgment returned once a send has been scheduled.
    pub fn accepted(message: &str) -> Self {
        Self::json(
            HttpStatus::Ok,
            &serde_json::json!({ "ok": true, "message": message }),
        )
    }

    pub fn error(status: HttpStatus, detail: &str) -> Self {
        Self::json(status, &serde_json::json!({ "detail": detail }))
    }
}

#[async_trait]
pub trait SmsClient: Send + Sync {
    /// Stable provider key, e.g. "kavenegar".
    fn provider(&self) -> &'static str;

    /// Send a single text SMS.
    async fn send(&self, req: SendRequest<'_>) -> Result<SendResponse, SmsError>;
}

/// Utility to create a pseudo id if a provider doesn't return one.
pub fn fallback_id() -> String {
    Uuid::new_v4().to_string()
}
