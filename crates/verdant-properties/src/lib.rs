//! Validated plant property sets and their versioned serializer.
//!
//! A [`PropertySet`] is the immutable rule bundle that drives one plant
//! set: how fast it grows, how much it yields, and how likely each of its
//! two seed channels is to fire. Out-of-range inputs are clamped on
//! construction, never rejected.
//!
//! # Modules
//!
//! - [`error`] -- Decode failures ([`PropertyError`]).
//! - [`property`] -- [`PropertySet`], [`ProduceProperties`], and
//!   [`SpawnChance`] with their clamping constructors.
//! - [`store`] -- The typed [`KeyValueStore`] seam and the in-memory
//!   [`CompoundStore`] used for config files and persistence.
//! - [`serializer`] -- Type-tagged, versioned encode/decode over any
//!   [`KeyValueStore`].

pub mod error;
pub mod property;
pub mod serializer;
pub mod store;

pub use error::PropertyError;
pub use property::{ChanceSlot, ProduceProperties, PropertySet, SpawnChance};
pub use serializer::{
    FORMAT_VERSION, PRODUCE_TAG, decode_plant, decode_produce, encode_plant, encode_produce,
    schema_keys,
};
pub use store::{CompoundStore, KeyValueStore, Value};
