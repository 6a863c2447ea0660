use std::sync::Arc;

use sms_core::{SendRequest, SmsClient};
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::phone::mask_phone;

/// Sends accepted messages through the gateway, off the request path.
#[derive(Clone)]
pub struct Dispatcher {
    client: Arc<dyn SmsClient>,
    /// Sender line passed to the gateway; `None` omits it.
    sender: Option<String>,
}

impl Dispatcher {
    pub fn new(client: Arc<dyn SmsClient>, sender: Option<String>) -> Self {
        Self { client, sender }
    }

    /// Spawn a detached task that delivers one message.
    ///
    /// The returned handle yields nothing about the gateway outcome; callers on
    /// the request path drop it.
    pub fn dispatch(&self, phone: String, message: String) -> JoinHandle<()> {
        let dispatcher = self.clone();
        tokio::spawn(async move { dispatcher.deliver(&phone, &message).await })
    }

    /// Call the gateway once and log the outcome. Failures end here.
    pub async fn deliver(&self, phone: &str, message: &str) {
        let req = SendRequest {
            to: phone,
            from: self.sender.as_deref(),
            text: message,
        };
        match self.client.send(req).await {
            Ok(res) => info!(
                provider = res.provider,
                message_id = %res.id,
                status = res.status_text.as_deref().unwrap_or("-"),
                phone = %mask_phone(phone),
                "SMS sent"
            ),
            Err(e) => error!(
                provider = self.client.provider(),
                reason = ?e.reason(),
                error = %e,
                phone = %mask_phone(phone),
                "SMS dispatch failed"
            ),
        }
    }
}
