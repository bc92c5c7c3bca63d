//! Dashboard binary for the CO2 emissions query engine.
//!
//! # Startup Sequence
//!
//! 1. Load configuration (`EMISSIONS_CONFIG`, default
//!    `emissions-dashboard.yaml`; defaults when the file is absent)
//! 2. Initialize structured logging (tracing)
//! 3. Load both CSV tables and build the shared dataset
//! 4. Serve the dashboard until `Ctrl-C`
//!
//! Any data load failure is fatal: the server never starts on partial data.

mod error;

use std::path::PathBuf;
use std::sync::Arc;

use emissions_core::config::LoggingConfig;
use emissions_core::{DashboardConfig, EmissionsDataset, load_from_paths};
use emissions_observer::{AppState, ServerConfig, start_server};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::DashboardError;

const CONFIG_ENV: &str = "EMISSIONS_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "emissions-dashboard.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, data loading, or the server fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration. Logging is not up yet, so remember where it came from.
    let (config, config_source) = load_config()?;

    // 2. Initialize structured logging.
    init_tracing(&config.logging);
    info!(config = %config_source, "emissions-dashboard starting");

    // 3. Load the tables and derive the dataset.
    let options = config.dataset_options();
    let (all, world) = load_from_paths(
        &config.data.all_entities_path,
        &config.data.world_path,
        &options.metric,
    )
    .map_err(DashboardError::from)?;
    let dataset = EmissionsDataset::build(all, world, options).map_err(DashboardError::from)?;

    // 4. Serve.
    let state = Arc::new(AppState::new(dataset, config.view.attribution.clone()));
    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };
    start_server(&server_config, state)
        .await
        .map_err(DashboardError::from)?;

    info!("emissions-dashboard stopped");
    Ok(())
}

/// Load configuration from the path named by `EMISSIONS_CONFIG`.
///
/// A missing file falls back to defaults; environment overrides still apply.
fn load_config() -> Result<(DashboardConfig, String), DashboardError> {
    let path = std::env::var(CONFIG_ENV)
        .map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    if path.exists() {
        let config = DashboardConfig::from_file(&path)?;
        Ok((config, path.display().to_string()))
    } else {
        let mut config = DashboardConfig::default();
        config.apply_env_overrides(|name| std::env::var(name).ok())?;
        Ok((config, String::from("defaults")))
    }
}

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.level.as_str()));
    if logging.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }
}
