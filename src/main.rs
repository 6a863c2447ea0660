use std::process::ExitCode;

use sms_relay::config::AppConfig;
use sms_relay::{server, telemetry};

#[tokio::main]
async fn main() -> ExitCode {
    // A local .env file is optional.
    dotenvy::dotenv().ok();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("sms-relay: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = match telemetry::init_tracing(&config.logging) {
        Ok(()) => server::serve(config).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "sms-relay stopped");
            eprintln!("sms-relay: {}", e);
            ExitCode::FAILURE
        }
    }
}
