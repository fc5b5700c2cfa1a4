//! Per-plant growth stage state machine.
//!
//! One automaton type covers all three archetypes; the archetype value
//! picks the stage count and the terminal behavior.
//!
//! # Transitions
//!
//! | trigger            | condition                              | effect                          |
//! |--------------------|----------------------------------------|---------------------------------|
//! | random tick        | soil roll < fertility AND growth roll < growth probability | stage + 1 |
//! | forced growth      | `can_bonemeal` and stage < max         | stage + uniform `[1, 3]`        |
//! | harvest            | biochemical at max                     | yield, stage - 4                |
//! | harvest            | crystalline at max                     | yield, stage unchanged          |
//! | reach max          | metallic                               | place produce in a neighbor     |
//! | produce destroyed  | metallic at max                        | stage = max - 1                 |
//!
//! Stages never exceed the archetype maximum and a tick never lowers the
//! stage.

use serde::{Deserialize, Serialize};

use verdant_properties::PropertySet;
use verdant_properties::property::MAX_PROBABILITY;
use verdant_types::{Archetype, Direction};

use crate::sampler::Sampler;
use crate::site::PlantSite;
use crate::soil::MAX_FERTILITY;

/// Stages a biochemical plant loses when harvested.
pub const HARVEST_REGRESSION: u8 = 4;

/// Smallest stage gain from forced growth.
pub const MIN_FORCED_GROWTH: u32 = 1;

/// Largest stage gain from forced growth.
pub const MAX_FORCED_GROWTH: u32 = 3;

/// Growth state of one plant instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowthAutomaton {
    archetype: Archetype,
    stage: u8,
    /// Direction of the placed produce block (metallic only).
    produce: Option<Direction>,
}

impl GrowthAutomaton {
    /// A freshly planted seed at stage 0.
    pub const fn new(archetype: Archetype) -> Self {
        Self {
            archetype,
            stage: 0,
            produce: None,
        }
    }

    /// Restore a plant at a saved stage, clamped to the archetype maximum.
    ///
    /// A restored metallic plant at its maximum has lost track of where its
    /// produce sits, so it is restored one stage below and will place a
    /// fresh produce block on its next successful tick.
    pub fn with_stage(archetype: Archetype, stage: u8) -> Self {
        let max = archetype.max_stage();
        let stage = match archetype {
            Archetype::Metallic if stage >= max => max.saturating_sub(1),
            _ => stage.min(max),
        };
        Self {
            archetype,
            stage,
            produce: None,
        }
    }

    /// Plant family.
    pub const fn archetype(&self) -> Archetype {
        self.archetype
    }

    /// Current growth stage.
    pub const fn stage(&self) -> u8 {
        self.stage
    }

    /// Highest stage for this archetype.
    pub const fn max_stage(&self) -> u8 {
        self.archetype.max_stage()
    }

    /// Whether the plant has reached its final stage.
    pub const fn is_mature(&self) -> bool {
        self.stage >= self.archetype.max_stage()
    }

    /// Where the metallic produce block was placed, if it is standing.
    pub const fn produce_direction(&self) -> Option<Direction> {
        self.produce
    }

    /// Handle one random tick.
    ///
    /// Draws two independent samples, one in `[0, MAX_FERTILITY)` compared
    /// with `fertility` and one in `[0, 100)` compared with the growth
    /// probability. The plant advances one stage only if both pass, so
    /// barren soil or a zero growth probability each block growth alone.
    /// Mature plants do not draw.
    ///
    /// Returns whether the stage changed.
    pub fn tick<S, W>(
        &mut self,
        props: &PropertySet,
        fertility: f64,
        sampler: &mut S,
        site: &mut W,
    ) -> bool
    where
        S: Sampler + ?Sized,
        W: PlantSite + ?Sized,
    {
        if self.is_mature() {
            return false;
        }

        let soil_roll = sampler.uniform(MAX_FERTILITY);
        let growth_roll = sampler.uniform(MAX_PROBABILITY);
        // Both comparisons are false for NaN, so bad fertility blocks growth.
        let grows = soil_roll < fertility && growth_roll < props.growth_probability();
        if !grows {
            return false;
        }

        self.advance_to(self.stage.saturating_add(1), sampler, site)
    }

    /// Apply fertilizer.
    ///
    /// A no-op returning `false` if the plant set cannot be fertilized or
    /// the plant is already mature. Otherwise advances by a uniform
    /// `[1, 3]` stages, clamped to the maximum, without any probability
    /// gate.
    pub fn force_growth<S, W>(&mut self, props: &PropertySet, sampler: &mut S, site: &mut W) -> bool
    where
        S: Sampler + ?Sized,
        W: PlantSite + ?Sized,
    {
        if !props.can_bonemeal() {
            tracing::trace!(archetype = %self.archetype, "forced growth refused: not fertilizable");
            return false;
        }
        if self.is_mature() {
            return false;
        }

        let steps = sampler.int_inclusive(MIN_FORCED_GROWTH, MAX_FORCED_GROWTH);
        let steps = u8::try_from(steps).unwrap_or(u8::MAX);
        let target = self.stage.saturating_add(steps).min(self.max_stage());
        self.advance_to(target, sampler, site)
    }

    /// Harvest the plant and return the produce units released.
    ///
    /// Biochemical plants at full growth yield and fall back
    /// [`HARVEST_REGRESSION`] stages. Crystalline plants at full growth
    /// yield and keep their stage; the host removes the block. Metallic
    /// plants never yield here, their produce is a separate block. Immature
    /// plants yield nothing and are unchanged.
    pub fn on_harvest(&mut self, props: &PropertySet) -> u32 {
        if !self.is_mature() {
            return 0;
        }
        match self.archetype {
            Archetype::Biochemical => {
                self.stage = self.stage.saturating_sub(HARVEST_REGRESSION);
                props.plant_yield()
            }
            Archetype::Crystalline => props.plant_yield(),
            Archetype::Metallic => 0,
        }
    }

    /// The metallic produce block was destroyed.
    ///
    /// Regresses a mature metallic plant to one stage below its maximum so
    /// it can grow another produce block. Returns whether the stage changed.
    pub fn on_produce_destroyed(&mut self) -> bool {
        if self.archetype != Archetype::Metallic || !self.is_mature() {
            return false;
        }
        self.stage = self.max_stage().saturating_sub(1);
        self.produce = None;
        true
    }

    /// Move to `target`, running metallic produce placement if `target` is
    /// the final stage.
    fn advance_to<S, W>(&mut self, target: u8, sampler: &mut S, site: &mut W) -> bool
    where
        S: Sampler + ?Sized,
        W: PlantSite + ?Sized,
    {
        let max = self.max_stage();
        let target = target.min(max);

        if self.archetype == Archetype::Metallic && target >= max {
            if let Some(direction) = place_produce(sampler, site) {
                self.stage = max;
                self.produce = Some(direction);
                return true;
            }
            tracing::debug!(
                position = %site.position(),
                stage = self.stage,
                "metallic produce placement failed, no free neighbor"
            );
            let held = max.saturating_sub(1).max(self.stage);
            let changed = held != self.stage;
            self.stage = held;
            return changed;
        }

        let changed = target > self.stage;
        if changed {
            self.stage = target;
        }
        changed
    }
}

/// Try the four horizontal neighbors clockwise from a random start. A
/// neighbor qualifies if it is empty and the block below it is solid.
fn place_produce<S, W>(sampler: &mut S, site: &mut W) -> Option<Direction>
where
    S: Sampler + ?Sized,
    W: PlantSite + ?Sized,
{
    let origin = site.position();
    let mut direction = Direction::from_index(sampler.int_inclusive(0, 3));
    for _ in 0..Direction::ALL.len() {
        let target = origin.offset(direction);
        if site.is_empty(target) && site.is_solid(target.below()) && site.place_produce(target) {
            return Some(direction);
        }
        direction = direction.clockwise();
    }
    None
}
