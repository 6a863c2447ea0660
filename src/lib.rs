//! # SMS Relay
//!
//! A small HTTP front-end that accepts a phone number and a message, validates
//! them, and relays the message to the Kavenegar SMS gateway in the background.
//!
//! ## Features
//!
//! - **Immediate acknowledgment**: `POST /send-sms` answers before the gateway is contacted
//! - **Input validation**: Iranian mobile numbers (`09` + nine digits), 1-500 character messages
//! - **Fire-and-forget dispatch**: gateway failures are logged, never surfaced to the caller
//! - **Open CORS**: callable from any web origin
//! - **Layered configuration**: defaults, config files, environment variables
//! - **Structured logging**: JSON or pretty output through `tracing`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sms_relay::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), StartupError> {
//!     let config = AppConfig::load()?;
//!     init_tracing(&config.logging)?;
//!     serve(config).await
//! }
//! ```
//!
//! ## Configuration
//!
//! `KAVENEGAR_API_KEY` must be set; everything else has a default and can be
//! overridden with `SMS_RELAY__SECTION__KEY` variables:
//!
//! ```rust,ignore
//! use sms_relay::config::AppConfig;
//!
//! let config = AppConfig::load()?;
//! println!("Listening on {}:{}", config.server.host, config.server.port);
//! ```

pub mod config;
pub mod error;
pub mod server;
pub mod telemetry;

pub use crate::config::AppConfig;
pub use error::StartupError;

/// Common imports for sms-relay usage
pub mod prelude {
    pub use crate::config::{AppConfig, GatewayConfig, LoggingConfig, ServerConfig};
    pub use crate::error::StartupError;
    pub use crate::server::{app, build_client, serve};
    pub use crate::telemetry::init_tracing;
    pub use sms_core::*;
}
