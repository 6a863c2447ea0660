use std::sync::Arc;

use axum::Router;
use sms_core::SmsClient;
use sms_kavenegar::KavenegarClient;
use sms_web_axum::AppState;
use sms_web_generic::{Dispatcher, SendProcessor};
use tracing::info;

use crate::config::{AppConfig, GatewayConfig};
use crate::error::StartupError;

/// Build the process-wide gateway client.
pub fn build_client(config: &GatewayConfig) -> Result<Arc<dyn SmsClient>, StartupError> {
    let mut client =
        KavenegarClient::with_base_url(config.api_key.clone(), config.base_url.clone());
    if let Some(timeout) = config.timeout() {
        client = client.with_timeout(timeout)?;
    }
    Ok(Arc::new(client))
}

/// Wire the HTTP surface around an already-built gateway client.
pub fn app(client: Arc<dyn SmsClient>, sender: Option<String>) -> Router {
    let processor = SendProcessor::new(Dispatcher::new(client, sender));
    sms_web_axum::router(AppState { processor })
}

pub async fn serve(config: AppConfig) -> Result<(), StartupError> {
    let client = build_client(&config.gateway)?;
    let sender = config.gateway.sender().map(str::to_string);
    info!(
        provider = client.provider(),
        sender = sender.as_deref().unwrap_or("-"),
        "gateway client ready"
    );

    let router = app(client, sender);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", addr);
    axum::serve(listener, router).await?;
    Ok(())
}
