//! llm-relay configuration check
//!
//! Loads a gateway configuration (first argument, or `config/gateway.yaml`),
//! applies environment overrides, validates it and prints the result.

#![allow(missing_docs)]

use llm_relay::Config;
use llm_relay::utils::logging::init_logging;
use std::process::ExitCode;
use tracing::{info, warn};

const DEFAULT_CONFIG_PATH: &str = "config/gateway.yaml";

#[tokio::main]
async fn main() -> ExitCode {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    match run(&path).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Display keeps validation messages readable
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(path: &str) -> llm_relay::Result<()> {
    let mut config = Config::from_file(path).await?;
    config.gateway.apply_env_overrides()?;
    config.validate()?;
    init_logging(&config.gateway.logging)?;

    for endpoint in config.endpoints() {
        info!(
            id = %endpoint.id,
            provider = %endpoint.provider,
            enabled = endpoint.enabled,
            max_concurrency = endpoint.max_concurrency,
            "Endpoint"
        );
    }
    if config.endpoints().is_empty() {
        warn!("No endpoints configured, only the local fallback can serve requests");
    }

    println!("{}", config.to_yaml()?);
    Ok(())
}
