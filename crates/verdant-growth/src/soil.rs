//! Soil fertility for the growing medium beneath a plant.
//!
//! Fertility is the first of the two growth gates: on every random tick the
//! automaton rolls in `[0, MAX_FERTILITY)` and the plant may only grow if
//! the roll lands below the soil's fertility. Hosts raise it with
//! fertilizer and lower it as crops draw on the soil; every mutation clamps
//! into `[MIN_FERTILITY, MAX_FERTILITY]`.

use serde::{Deserialize, Serialize};

use verdant_properties::{KeyValueStore, PropertyError};

/// Lowest fertility a soil plot can fall to.
pub const MIN_FERTILITY: f64 = 0.1;

/// Highest fertility a soil plot can reach.
pub const MAX_FERTILITY: f64 = 50.0;

/// Fertility of freshly tilled soil.
pub const DEFAULT_FERTILITY: f64 = 10.0;

/// Key under which fertility is persisted with its owning plot.
pub const FERTILITY_KEY: &str = "fertility";

fn clamp_fertility(raw: f64) -> f64 {
    if raw.is_nan() {
        MIN_FERTILITY
    } else {
        raw.clamp(MIN_FERTILITY, MAX_FERTILITY)
    }
}

/// Fertility of one soil plot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoilState {
    fertility: f64,
}

impl SoilState {
    /// Soil with the given fertility, clamped.
    pub fn new(fertility: f64) -> Self {
        Self {
            fertility: clamp_fertility(fertility),
        }
    }

    /// Current fertility.
    pub const fn fertility(&self) -> f64 {
        self.fertility
    }

    /// Add `amount` fertility and return the new value.
    pub fn enrich(&mut self, amount: f64) -> f64 {
        self.fertility = clamp_fertility(self.fertility + amount);
        self.fertility
    }

    /// Remove `amount` fertility and return the new value.
    pub fn deplete(&mut self, amount: f64) -> f64 {
        self.fertility = clamp_fertility(self.fertility - amount);
        self.fertility
    }

    /// Overwrite the fertility, clamped.
    pub fn set(&mut self, fertility: f64) {
        self.fertility = clamp_fertility(fertility);
    }

    /// Persist into the owning plot's store.
    pub fn encode<S: KeyValueStore + ?Sized>(&self, store: &mut S) {
        store.put_float(FERTILITY_KEY, self.fertility);
    }

    /// Restore from the owning plot's store. Stored values outside the
    /// valid range are clamped.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::MalformedData`] if the key is missing or not
    /// a number.
    pub fn decode<S: KeyValueStore + ?Sized>(store: &S) -> Result<Self, PropertyError> {
        store.get_float(FERTILITY_KEY).map(Self::new)
    }
}

impl Default for SoilState {
    fn default() -> Self {
        Self {
            fertility: DEFAULT_FERTILITY,
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use verdant_properties::CompoundStore;

    use super::*;

    #[test]
    fn new_clamps_into_range() {
        assert_eq!(SoilState::new(0.0).fertility(), MIN_FERTILITY);
        assert_eq!(SoilState::new(80.0).fertility(), MAX_FERTILITY);
        assert_eq!(SoilState::new(f64::NAN).fertility(), MIN_FERTILITY);
        assert_eq!(SoilState::new(12.5).fertility(), 12.5);
    }

    #[test]
    fn default_is_fresh_soil() {
        assert_eq!(SoilState::default().fertility(), DEFAULT_FERTILITY);
    }

    #[test]
    fn mutations_clamp() {
        let mut soil = SoilState::new(45.0);
        assert_eq!(soil.enrich(10.0), MAX_FERTILITY);
        assert_eq!(soil.deplete(100.0), MIN_FERTILITY);
        assert!((soil.enrich(4.9) - 5.0).abs() < 1e-9);
        soil.set(-3.0);
        assert_eq!(soil.fertility(), MIN_FERTILITY);
    }

    #[test]
    fn persists_through_store() {
        let soil = SoilState::new(23.25);
        let mut store = CompoundStore::new();
        soil.encode(&mut store);
        assert_eq!(SoilState::decode(&store), Ok(soil));
    }

    #[test]
    fn missing_fertility_is_malformed() {
        let store = CompoundStore::new();
        assert!(matches!(
            SoilState::decode(&store),
            Err(PropertyError::MalformedData { .. })
        ));
    }

    #[test]
    fn serde_json_round_trip() {
        let soil = SoilState::new(7.5);
        let json = serde_json::to_string(&soil).unwrap_or_default();
        let back: SoilState = serde_json::from_str(&json).unwrap_or_default();
        assert_eq!(back, soil);
    }
}
