use config::ConfigError;
use sms_core::SmsError;

/// Conditions that stop the process from starting.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("logging setup failed: {0}")]
    Telemetry(String),
    #[error("gateway client error: {0}")]
    Gateway(#[from] SmsError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
