use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Environment variable holding the gateway credential.
pub const API_KEY_VAR: &str = "KAVENEGAR_API_KEY";

/// Application configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    /// Server configuration
    pub server: ServerConfig,
    /// SMS gateway configuration
    pub gateway: GatewayConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    /// Server host (default: 0.0.0.0)
    pub host: String,
    /// Server port (default: 8000)
    pub port: u16,
}

/// Kavenegar gateway configuration
#[derive(Deserialize, Serialize, Clone)]
pub struct GatewayConfig {
    /// API key, normally taken from `KAVENEGAR_API_KEY`
    pub api_key: String,
    /// API base URL (default: https://api.kavenegar.com)
    pub base_url: String,
    /// Sender line number (default: 2000660110). Empty leaves it to the gateway.
    pub sender: Option<String>,
    /// Per-call timeout in seconds (default: none)
    pub timeout_seconds: Option<u64>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    /// Log level (default: info)
    pub level: String,
    /// Log format: json or pretty (default: json)
    pub format: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: sms_kavenegar::DEFAULT_BASE_URL.to_string(),
            sender: Some("2000660110".to_string()),
            timeout_seconds: None,
        }
    }
}

impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("sender", &self.sender)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl GatewayConfig {
    /// Sender to pass to the gateway, if any.
    pub fn sender(&self) -> Option<&str> {
        self.sender.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "json".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = Config::builder()
            // Start with default configuration
            .add_source(Config::try_from(&AppConfig::default())?)
            // Add configuration file based on environment
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add local configuration file (gitignored)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables (prefixed with SMS_RELAY__)
            .add_source(Environment::with_prefix("SMS_RELAY").separator("__"))
            .set_override_option("gateway.api_key", env::var(API_KEY_VAR).ok())?
            .build()?;

        Self::from_config(s)
    }

    /// Deserialize and check a built configuration.
    pub fn from_config(config: Config) -> Result<Self, ConfigError> {
        let app: AppConfig = config.try_deserialize()?;
        app.validate()?;
        Ok(app)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gateway.api_key.trim().is_empty() {
            return Err(ConfigError::Message(format!("{} is not set", API_KEY_VAR)));
        }
        match self.logging.format.as_str() {
            "json" | "pretty" => Ok(()),
            other => Err(ConfigError::Message(format!(
                "unknown logging.format {:?} (expected json or pretty)",
                other
            ))),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            gateway: GatewayConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}
