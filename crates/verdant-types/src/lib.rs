//! Shared type definitions for the Verdant plant engine.
//!
//! Every other crate in the workspace speaks in these types: plant
//! archetypes, seed channels, block positions, and the identities that the
//! host world uses to name creatures, blocks, and items.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for plant instances and soil plots
//! - [`enums`] -- Archetypes, compass directions, and seed-spawn channels
//! - [`structs`] -- Block positions and host identities

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{Archetype, Channel, Direction, UnknownChannel};
pub use ids::{PlantId, PlotId};
pub use structs::{Identity, Position};
