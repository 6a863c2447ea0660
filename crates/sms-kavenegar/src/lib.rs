//! # Kavenegar SMS Provider
//!
//! [Kavenegar](https://kavenegar.com) backend for sms-relay.
//!
//! ## Example
//!
//! ```rust,ignore
//! use sms_core::{SendRequest, SmsClient};
//! use sms_kavenegar::KavenegarClient;
//!
//! let client = KavenegarClient::new("api_key");
//! let response = client.send(SendRequest {
//!     to: "09123456789",
//!     from: Some("2000660110"),
//!     text: "Hello from Kavenegar!"
//! }).await?;
//! ```

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sms_core::{SendRequest, SendResponse, SmsClient, SmsError};
use time::OffsetDateTime;
use tracing::debug;

const PROVIDER: &str = "kavenegar";

pub const DEFAULT_BASE_URL: &str = "https://api.kavenegar.com";

/// Kavenegar REST client.
#[derive(Clone)]
pub struct KavenegarClient {
    /// API key; part of every request path.
    api_key: String,
    /// API base URL; override for testing/mocking.
    pub base_url: String,
    http: reqwest::Client,
}

impl std::fmt::Debug for KavenegarClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KavenegarClient")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl KavenegarClient {
    pub fn new<S: Into<String>>(api_key: S) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url<S: Into<String>>(api_key: S, base_url: String) -> Self {
        Self {
            api_key: api_key.into(),
            base_url,
            http: reqwest::Client::new(),
        }
    }

    /// Bound every gateway call by `timeout`. Without this, calls wait indefinitely.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, SmsError> {
        self.http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SmsError::Http(e.to_string()))?;
        Ok(self)
    }

    fn endpoint(&self, action: &str, method: &str) -> String {
        format!(
            "{}/v1/{}/{}/{}.json",
            self.base_url.trim_end_matches('/'),
            self.api_key,
            action,
            method
        )
    }
}

#[derive(Debug, Serialize)]
struct KavenegarSendRequest<'a> {
    receptor: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    sender: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct KavenegarEnvelope {
    #[serde(rename = "return")]
    result: KavenegarReturn,
    #[serde(default)]
    entries: Option<Vec<KavenegarEntry>>,
}

#[derive(Debug, Deserialize)]
struct KavenegarReturn {
    status: u16,
    message: String,
}

#[derive(Debug, Deserialize)]
struct KavenegarEntry {
    messageid: Option<i64>,
    statustext: Option<String>,
    /// Unix timestamp, seconds.
    date: Option<i64>,
}

/// Interpret a `sms/send` response body.
///
/// The gateway reports application errors inside the JSON envelope, usually with
/// a matching HTTP status, so the envelope is authoritative.
fn parse_send_response(body: &str) -> Result<SendResponse, SmsError> {
    let raw: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| SmsError::Http(format!("undecodable response: {}", e)))?;
    let envelope: KavenegarEnvelope = serde_json::from_value(raw.clone())
        .map_err(|e| SmsError::Http(format!("unexpected response shape: {}", e)))?;

    if envelope.result.status != 200 {
        return Err(SmsError::Rejected {
            status: envelope.result.status,
            message: envelope.result.message,
        });
    }

    let entry = envelope.entries.and_then(|entries| entries.into_iter().next());
    let id = entry
        .as_ref()
        .and_then(|e| e.messageid)
        .map(|id| id.to_string())
        .unwrap_or_else(sms_core::fallback_id);
    let accepted_at = entry
        .as_ref()
        .and_then(|e| e.date)
        .and_then(|ts| OffsetDateTime::from_unix_timestamp(ts).ok());

    Ok(SendResponse {
        id,
        provider: PROVIDER,
        status_text: entry.and_then(|e| e.statustext),
        accepted_at,
        raw,
    })
}

#[async_trait]
impl SmsClient for KavenegarClient {
    fn provider(&self) -> &'static str {
        PROVIDER
    }

    async fn send(&self, req: SendRequest<'_>) -> Result<SendResponse, SmsError> {
        let payload = KavenegarSendRequest {
            receptor: req.to,
            message: req.text,
            sender: req.from,
        };
        // The API key is in the path; keep it out of error text.
        let res = self
            .http
            .post(self.endpoint("sms", "send"))
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&payload)
            .send()
            .await
            .map_err(|e| SmsError::Http(e.without_url().to_string()))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| SmsError::Http(e.without_url().to_string()))?;
        debug!(%status, "kavenegar responded");

        parse_send_response(&body)
    }
}
