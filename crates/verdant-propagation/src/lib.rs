//! Plant set registry and stochastic seed propagation.
//!
//! Plant sets are registered once at startup into a [`PlantSetRegistry`].
//! The registry is then frozen behind an `Arc` and handed to a
//! [`SeedPropagationEngine`], which builds a routing table from
//! `(channel, subject identity)` to the plant sets listening for it. World
//! events are dispatched through that table and each matching plant set
//! rolls independently for a seed.
//!
//! # Modules
//!
//! - [`engine`] -- Routing table and per-channel seed rolls.
//! - [`error`] -- Registration failures ([`RegistryError`]).
//! - [`event`] -- Host world events and the seed spawns they produce.
//! - [`registry`] -- Insertion-ordered, write-once plant set directory.

pub mod engine;
pub mod error;
pub mod event;
pub mod registry;

pub use engine::SeedPropagationEngine;
pub use error::RegistryError;
pub use event::{SeedSpawn, WorldEvent, replaces_source};
pub use registry::{PlantSet, PlantSetRegistry};
