use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LoggingConfig;
use crate::error::StartupError;

/// Install the global subscriber. `RUST_LOG`, when set, overrides `logging.level`.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), StartupError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| StartupError::Telemetry(e.to_string()))?;

    let builder = fmt().with_env_filter(filter).with_target(true);
    match config.format.as_str() {
        "pretty" => builder.pretty().try_init(),
        _ => builder.json().try_init(),
    }
    .map_err(|e| StartupError::Telemetry(e.to_string()))
}
