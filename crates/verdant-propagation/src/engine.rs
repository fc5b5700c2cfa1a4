//! Routing table and per-channel seed rolls.
//!
//! The engine is built once from a frozen [`PlantSetRegistry`]. For every
//! registered set it adds a route per seed channel, keyed by the channel
//! and the identity the channel matches against:
//!
//! | archetype   | channel                  | subject  | chance    | replaces drop |
//! |-------------|--------------------------|----------|-----------|---------------|
//! | biochemical | `creature-killed`        | source   | primary   | no            |
//! | biochemical | `item-use-finished`      | produce  | secondary | no            |
//! | crystalline | `block-broken`           | source   | primary   | yes           |
//! | crystalline | `item-expire-in-liquid`  | produce  | secondary | no            |
//! | metallic    | `block-explode-detonate` | source   | primary   | no            |
//! | metallic    | `block-explode-detonate` | produce  | secondary | no            |
//!
//! An event walks the routes for its key in registration order. Each route
//! rolls once per unit and spawns a seed when the roll lands below its
//! chance. Disabled chances are skipped without drawing a sample. Stacks
//! roll for at most [`MAX_YIELD`] units.

use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::Arc;

use verdant_growth::Sampler;
use verdant_properties::property::MAX_YIELD;
use verdant_properties::{ChanceSlot, SpawnChance};
use verdant_types::{Archetype, Channel, Identity, Position, UnknownChannel};

use crate::event::{SeedSpawn, WorldEvent};
use crate::registry::{PlantSet, PlantSetRegistry};

/// Upper bound of a seed roll; chances are percentages.
const ROLL_UPPER: f64 = 100.0;

/// One plant set listening on one `(channel, subject)` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Route {
    set_index: usize,
    slot: ChanceSlot,
    replaces_source: bool,
}

/// Which identity of a plant set a channel matches against.
#[derive(Debug, Clone, Copy)]
enum Subject {
    Source,
    Produce,
}

/// The channel bindings of one archetype.
const fn bindings(archetype: Archetype) -> &'static [(Channel, Subject, ChanceSlot, bool)] {
    match archetype {
        Archetype::Biochemical => &[
            (Channel::CreatureKilled, Subject::Source, ChanceSlot::Primary, false),
            (Channel::ItemUseFinished, Subject::Produce, ChanceSlot::Secondary, false),
        ],
        Archetype::Crystalline => &[
            (Channel::BlockBroken, Subject::Source, ChanceSlot::Primary, true),
            (Channel::ItemExpiredInLiquid, Subject::Produce, ChanceSlot::Secondary, false),
        ],
        Archetype::Metallic => &[
            (Channel::BlockDetonated, Subject::Source, ChanceSlot::Primary, false),
            (Channel::BlockDetonated, Subject::Produce, ChanceSlot::Secondary, false),
        ],
    }
}

/// Whether events on `channel` roll once per unit of an item stack.
const fn rolls_per_unit(channel: Channel) -> bool {
    matches!(channel, Channel::ItemUseFinished | Channel::ItemExpiredInLiquid)
}

// ---------------------------------------------------------------------------
// SeedPropagationEngine
// ---------------------------------------------------------------------------

/// Turns world events into seed spawns.
///
/// Holds no mutable state; all randomness comes from the caller's
/// [`Sampler`].
#[derive(Debug, Clone)]
pub struct SeedPropagationEngine {
    registry: Arc<PlantSetRegistry>,
    routes: BTreeMap<Channel, BTreeMap<Identity, Vec<Route>>>,
}

impl SeedPropagationEngine {
    /// Build the routing table from a frozen registry.
    pub fn new(registry: Arc<PlantSetRegistry>) -> Self {
        let mut routes: BTreeMap<Channel, BTreeMap<Identity, Vec<Route>>> = BTreeMap::new();
        for (set_index, set) in registry.iter().enumerate() {
            for &(channel, subject, slot, replaces_source) in bindings(set.archetype()) {
                let identity = match subject {
                    Subject::Source => set.source(),
                    Subject::Produce => set.produce(),
                };
                routes
                    .entry(channel)
                    .or_default()
                    .entry(identity.clone())
                    .or_default()
                    .push(Route {
                        set_index,
                        slot,
                        replaces_source,
                    });
            }
        }

        tracing::debug!(
            plant_sets = registry.len(),
            subjects = routes.values().map(BTreeMap::len).sum::<usize>(),
            "seed propagation routes built"
        );
        Self { registry, routes }
    }

    /// The registry the routes were built from.
    pub fn registry(&self) -> &PlantSetRegistry {
        &self.registry
    }

    /// Whether any plant set listens for `subject` on `channel`.
    pub fn is_bound(&self, channel: Channel, subject: &Identity) -> bool {
        self.routes_for(channel, subject).is_some()
    }

    fn routes_for(&self, channel: Channel, subject: &Identity) -> Option<&[Route]> {
        self.routes
            .get(&channel)
            .and_then(|by_subject| by_subject.get(subject))
            .map(Vec::as_slice)
    }

    /// Handle a single-unit event on `channel` for `subject` at `position`.
    pub fn on_event(
        &self,
        channel: Channel,
        subject: &Identity,
        position: Position,
        sampler: &mut impl Sampler,
    ) -> Vec<SeedSpawn> {
        self.on_stack(channel, subject, 1, position, sampler)
    }

    /// Handle an event carrying `units` items of `subject`.
    ///
    /// The unit count only matters on stack channels (`item-use-finished`
    /// and `item-expire-in-liquid`), where it is capped at [`MAX_YIELD`];
    /// other channels roll once.
    pub fn on_stack(
        &self,
        channel: Channel,
        subject: &Identity,
        units: u32,
        position: Position,
        sampler: &mut impl Sampler,
    ) -> Vec<SeedSpawn> {
        let Some(routes) = self.routes_for(channel, subject) else {
            return Vec::new();
        };
        let rolls = if rolls_per_unit(channel) {
            if units > MAX_YIELD {
                tracing::debug!(
                    channel = %channel,
                    subject = %subject,
                    units,
                    cap = MAX_YIELD,
                    "stack size capped"
                );
            }
            units.min(MAX_YIELD)
        } else {
            1
        };

        let mut spawns = Vec::new();
        for route in routes {
            let Some(set) = self.registry.get(route.set_index) else {
                continue;
            };
            for _ in 0..rolls {
                if let Some(spawn) = roll(set, *route, channel, position, sampler) {
                    spawns.push(spawn);
                }
            }
        }
        spawns
    }

    /// Handle an event whose channel is given by its stable name.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownChannel`] if `channel` names no channel.
    pub fn on_named_event(
        &self,
        channel: &str,
        subject: &Identity,
        position: Position,
        sampler: &mut impl Sampler,
    ) -> Result<Vec<SeedSpawn>, UnknownChannel> {
        let channel = Channel::from_str(channel)?;
        Ok(self.on_event(channel, subject, position, sampler))
    }

    /// Unpack a host event and handle it. Detonations evaluate every
    /// block in the blast, in the order given.
    pub fn dispatch(&self, event: &WorldEvent, sampler: &mut impl Sampler) -> Vec<SeedSpawn> {
        let channel = event.channel();
        match event {
            WorldEvent::CreatureKilled { creature, position } => {
                self.on_event(channel, creature, *position, sampler)
            }
            WorldEvent::BlockBroken { block, position } => {
                self.on_event(channel, block, *position, sampler)
            }
            WorldEvent::ItemUseFinished {
                item,
                units,
                position,
            }
            | WorldEvent::ItemExpiredInLiquid {
                item,
                units,
                position,
            } => self.on_stack(channel, item, *units, *position, sampler),
            WorldEvent::BlocksDetonated { blocks } => blocks
                .iter()
                .flat_map(|(block, position)| self.on_event(channel, block, *position, sampler))
                .collect(),
        }
    }
}

/// One seed roll for one route.
fn roll(
    set: &PlantSet,
    route: Route,
    channel: Channel,
    position: Position,
    sampler: &mut impl Sampler,
) -> Option<SeedSpawn> {
    let SpawnChance::Percent(chance) = set.properties().chance(route.slot) else {
        return None;
    };
    let sample = sampler.uniform(ROLL_UPPER);
    if sample >= chance {
        return None;
    }

    tracing::debug!(
        plant_set = set.name(),
        channel = %channel,
        position = %position,
        sample,
        chance,
        "seed spawned"
    );
    Some(SeedSpawn {
        plant_set: set.name().to_owned(),
        channel,
        position,
        replaces_source: route.replaces_source,
    })
}
