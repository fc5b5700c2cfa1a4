//! Soil fertility and the per-plant growth automaton.
//!
//! Each plant instance owns a [`GrowthAutomaton`] that the host advances
//! once per random tick, passing the fertility of the [`SoilState`] under
//! the plant. Growth is gated by two independent rolls: one against the
//! soil, one against the plant set's growth probability.
//!
//! # Modules
//!
//! - [`automaton`] -- Stage transitions: ticks, forced growth, harvest, and
//!   metallic produce placement.
//! - [`sampler`] -- The [`Sampler`] randomness seam, with a `rand`-backed
//!   implementation and deterministic ones for tests and replays.
//! - [`site`] -- The [`PlantSite`] view of a plant's surroundings.
//! - [`soil`] -- [`SoilState`] fertility, clamped on every mutation.

pub mod automaton;
pub mod sampler;
pub mod site;
pub mod soil;

pub use automaton::GrowthAutomaton;
pub use sampler::{FixedSampler, RngSampler, Sampler, ScriptedSampler};
pub use site::{BareSite, PlantSite};
pub use soil::SoilState;
