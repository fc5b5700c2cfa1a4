//! Error types for the field driver binary.

use crate::config::ConfigError;

/// Top-level error for the field driver.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: ConfigError,
    },

    /// Every configured plant set was rejected, so there is nothing to grow.
    #[error("no usable plant sets ({skipped} skipped)")]
    NoPlantSets {
        /// Entries that failed to decode or register.
        skipped: usize,
    },
}
