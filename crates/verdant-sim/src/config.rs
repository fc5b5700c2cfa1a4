//! Configuration loading and typed config structures for the field driver.
//!
//! The configuration lives in `verdant-config.yaml` in the working
//! directory. Every section has defaults, so a partial file (or none at
//! all) still yields a runnable simulation. Plant set rules are kept as raw
//! key-value maps here and decoded through the property serializer when the
//! catalog is built, so a bad entry is reported against its own keys.

use std::path::Path;

use serde::Deserialize;
use verdant_growth::soil::DEFAULT_FERTILITY;
use verdant_properties::{
    CompoundStore, ProduceProperties, PropertySet, encode_plant, encode_produce,
};
use verdant_types::Archetype;

/// Environment variable overriding `world.seed`.
pub const SEED_ENV: &str = "SEED";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

// ---------------------------------------------------------------------------
// SimulationConfig
// ---------------------------------------------------------------------------

/// Top-level configuration, mirroring `verdant-config.yaml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SimulationConfig {
    /// Seed and run length.
    #[serde(default)]
    pub world: WorldConfig,

    /// Soil behavior.
    #[serde(default)]
    pub soil: SoilConfig,

    /// Plant sets to register, in order.
    #[serde(default = "default_plant_sets")]
    pub plant_sets: Vec<PlantSetConfig>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            soil: SoilConfig::default(),
            plant_sets: default_plant_sets(),
        }
    }
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `SEED` in the environment overrides `world.seed`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&contents)?;
        config.world.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a YAML string. No environment overrides
    /// are applied.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yml::from_str(yaml)?)
    }
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// World-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorldConfig {
    /// Random seed for reproducibility.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Random ticks to run.
    #[serde(default = "default_ticks")]
    pub ticks: u64,

    /// Plots planted with each registered set.
    #[serde(default = "default_plots_per_set")]
    pub plots_per_set: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            ticks: default_ticks(),
            plots_per_set: default_plots_per_set(),
        }
    }
}

impl WorldConfig {
    /// Apply the `SEED` override. An unparsable value is ignored with a
    /// warning.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var(SEED_ENV) {
            match val.trim().parse() {
                Ok(seed) => self.seed = seed,
                Err(e) => tracing::warn!(value = %val, error = %e, "ignoring invalid SEED"),
            }
        }
    }
}

/// Soil configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SoilConfig {
    /// Fertility of every plot at the start of a run.
    #[serde(default = "default_initial_fertility")]
    pub initial_fertility: f64,

    /// Fertility removed from a plot per produce unit harvested.
    #[serde(default = "default_depletion_per_unit")]
    pub depletion_per_unit: f64,

    /// Fertility added when a plot is fertilized.
    #[serde(default = "default_fertilizer_amount")]
    pub fertilizer_amount: f64,

    /// Fertilize every plot every this many ticks. Zero disables
    /// fertilizing.
    #[serde(default = "default_fertilizer_interval")]
    pub fertilizer_interval: u64,
}

impl Default for SoilConfig {
    fn default() -> Self {
        Self {
            initial_fertility: default_initial_fertility(),
            depletion_per_unit: default_depletion_per_unit(),
            fertilizer_amount: default_fertilizer_amount(),
            fertilizer_interval: default_fertilizer_interval(),
        }
    }
}

/// One plant set entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlantSetConfig {
    /// Unique set name.
    pub name: String,

    /// Expected archetype; must match the `type` key of `properties`.
    pub archetype: Archetype,

    /// Identity the seeds come from (creature or ore).
    pub source: String,

    /// Identity of the produce (item or block).
    pub produce: String,

    /// Encoded [`PropertySet`].
    pub properties: CompoundStore,

    /// Encoded [`ProduceProperties`] for edible produce.
    #[serde(default)]
    pub food: Option<CompoundStore>,
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

const fn default_seed() -> u64 {
    42
}

const fn default_ticks() -> u64 {
    2_000
}

const fn default_plots_per_set() -> u32 {
    4
}

const fn default_initial_fertility() -> f64 {
    DEFAULT_FERTILITY
}

const fn default_depletion_per_unit() -> f64 {
    0.5
}

const fn default_fertilizer_amount() -> f64 {
    5.0
}

const fn default_fertilizer_interval() -> u64 {
    250
}

fn plant_set(
    name: &str,
    source: &str,
    produce: &str,
    properties: &PropertySet,
    food: Option<ProduceProperties>,
) -> PlantSetConfig {
    let mut store = CompoundStore::new();
    encode_plant(properties, &mut store);
    let food = food.map(|food| {
        let mut store = CompoundStore::new();
        encode_produce(&food, &mut store);
        store
    });
    PlantSetConfig {
        name: name.to_owned(),
        archetype: properties.archetype(),
        source: source.to_owned(),
        produce: produce.to_owned(),
        properties: store,
        food,
    }
}

/// The built-in plant sets: one per archetype.
pub fn default_plant_sets() -> Vec<PlantSetConfig> {
    vec![
        plant_set(
            "zombie",
            "minecraft:zombie",
            "verdant:zombie_bulb",
            &PropertySet::biochemical(true, 25.0, 3, 2.5, 5.0),
            Some(ProduceProperties::new(4, 0.6)),
        ),
        plant_set(
            "quartz",
            "minecraft:nether_quartz_ore",
            "verdant:quartz_shard",
            &PropertySet::crystalline(true, 20.0, 4, 5.0, 10.0, 2),
            None,
        ),
        plant_set(
            "iron",
            "minecraft:iron_ore",
            "verdant:iron_fruit",
            &PropertySet::metallic(false, 15.0, 2.0, 20.0),
            None,
        ),
    ]
}
