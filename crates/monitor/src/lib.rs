//! Plant Monitor
//!
//! Composition root: one shared event log, a plant built from configuration,
//! and a replay of the configured readings with an evaluation after each round.

use alerting::{ConsoleEventLog, EventLog, PlantConfig, PlantReport};
use anyhow::Context;
use std::sync::Arc;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// Environment variable naming the configuration file
pub const CONFIG_PATH_VAR: &str = "PLANT_CONFIG";

/// Default configuration file (extension optional)
pub const DEFAULT_CONFIG_PATH: &str = "plant";

/// Initialize logging
pub fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        warn!("Tracing subscriber already installed");
    }
}

/// Load configuration, falling back to the demonstration plant when empty
pub fn load_config() -> anyhow::Result<PlantConfig> {
    let path = std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = PlantConfig::load(&path)
        .with_context(|| format!("loading plant configuration from {}", path))?;

    if config.managers.is_empty() {
        info!("No managers configured in {}, using demo plant", path);
        return Ok(PlantConfig::demo());
    }
    Ok(config)
}

/// Build the plant and replay every configured reading round
pub fn run(config: &PlantConfig, log: Arc<dyn EventLog>) -> anyhow::Result<Vec<PlantReport>> {
    let mut plant = config.build(log).context("building plant")?;

    let mut reports = Vec::with_capacity(config.rounds());
    for round in 0..config.rounds() {
        for (manager, sensor_id, value) in config.readings_for_round(round) {
            plant.record_reading(manager, sensor_id, value)?;
        }
        info!("Round {}: evaluating", round + 1);
        reports.push(plant.evaluate_all()?);
    }
    Ok(reports)
}

/// Entry point used by the binary
pub fn start() -> anyhow::Result<()> {
    init_logging();
    info!("=== Plant Monitor v{} ===", env!("CARGO_PKG_VERSION"));

    let config = load_config()?;
    let log: Arc<dyn EventLog> = Arc::new(ConsoleEventLog::new());
    let reports = run(&config, log)?;

    if let Some(last) = reports.last() {
        info!("Final round: {}", serde_json::to_string(last)?);
    }
    Ok(())
}
