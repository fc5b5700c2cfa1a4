//! Field driver for the Verdant plant engine.
//!
//! Plants every configured plant set into a flat test field and runs it
//! for a fixed number of random ticks under a seeded RNG, so two runs with
//! the same seed and configuration produce the same report.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `verdant-config.yaml`
//! 3. Decode and register plant sets
//! 4. Freeze the registry and build the propagation routes
//! 5. Plant the field
//! 6. Run the field from the world seed
//! 7. Log the result

mod catalog;
mod config;
mod error;
mod field;

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;
use tracing_subscriber::EnvFilter;
use verdant_growth::RngSampler;
use verdant_propagation::SeedPropagationEngine;

use crate::catalog::Catalog;
use crate::config::SimulationConfig;
use crate::error::SimError;
use crate::field::Field;

/// Configuration file looked up in the working directory.
const CONFIG_PATH: &str = "verdant-config.yaml";

/// Application entry point for the field driver.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or no plant set
/// survives decoding.
fn main() -> anyhow::Result<()> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("verdant-sim starting");

    // 2. Load configuration.
    let config = load_config().context("loading configuration")?;
    info!(
        seed = config.world.seed,
        ticks = config.world.ticks,
        plots_per_set = config.world.plots_per_set,
        initial_fertility = config.soil.initial_fertility,
        plant_sets = config.plant_sets.len(),
        "Configuration loaded"
    );

    // 3. Decode and register plant sets.
    let catalog = Catalog::from_config(&config.plant_sets);
    if catalog.registry.is_empty() {
        return Err(SimError::NoPlantSets {
            skipped: catalog.skipped,
        }
        .into());
    }
    info!(
        registered = catalog.registry.len(),
        skipped = catalog.skipped,
        edible = catalog.foods.len(),
        "Plant sets registered"
    );

    // 4. Freeze the registry.
    let engine = SeedPropagationEngine::new(Arc::new(catalog.registry));

    // 5. Plant the field.
    let mut field = Field::plant(
        engine,
        catalog.foods,
        config.soil,
        config.world.plots_per_set,
    );
    info!(plots = field.plots().len(), "Field planted");

    // 6. Run.
    let mut sampler = RngSampler::new(StdRng::seed_from_u64(config.world.seed));
    let report = field.run(config.world.ticks, &mut sampler);

    // 7. Log results.
    report.log();
    for plot in field.plots() {
        tracing::debug!(
            plot = %plot.id(),
            plant = %plot.plant_id(),
            position = %plot.position(),
            archetype = %plot.plant().archetype(),
            stage = plot.plant().stage(),
            fertility = plot.soil().fertility(),
            "final plot state"
        );
    }
    info!(
        produce_blocks = field.produce_blocks(),
        "verdant-sim shutdown complete"
    );

    Ok(())
}

/// Load the simulation configuration from `verdant-config.yaml`.
///
/// Looks for the config file relative to the current working directory.
fn load_config() -> Result<SimulationConfig, SimError> {
    let config_path = Path::new(CONFIG_PATH);
    if config_path.exists() {
        Ok(SimulationConfig::from_file(config_path)?)
    } else {
        info!("Config file not found, using defaults");
        let mut config = SimulationConfig::default();
        config.world.apply_env_overrides();
        Ok(config)
    }
}
