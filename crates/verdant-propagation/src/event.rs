//! Host world events and the seed spawns they produce.

use serde::{Deserialize, Serialize};

use verdant_types::{Channel, Identity, Position};

// ---------------------------------------------------------------------------
// WorldEvent
// ---------------------------------------------------------------------------

/// An event reported by the host world.
///
/// Stack events carry a unit count: every consumed or expired unit rolls
/// for its own seed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WorldEvent {
    /// A creature was killed.
    CreatureKilled {
        /// Creature type.
        creature: Identity,
        /// Where it died.
        position: Position,
    },
    /// A player finished using (eating) items from a stack.
    ItemUseFinished {
        /// Item type.
        item: Identity,
        /// Units consumed.
        units: u32,
        /// Where the player stood.
        position: Position,
    },
    /// A block was broken.
    BlockBroken {
        /// Block type.
        block: Identity,
        /// Where it stood.
        position: Position,
    },
    /// An explosion destroyed a set of blocks.
    BlocksDetonated {
        /// Every block in the blast, with its position.
        blocks: Vec<(Identity, Position)>,
    },
    /// A dropped item stack expired while in a liquid.
    ItemExpiredInLiquid {
        /// Item type.
        item: Identity,
        /// Units in the expired stack.
        units: u32,
        /// Where the stack was.
        position: Position,
    },
}

impl WorldEvent {
    /// The channel this event is delivered on.
    pub const fn channel(&self) -> Channel {
        match self {
            Self::CreatureKilled { .. } => Channel::CreatureKilled,
            Self::ItemUseFinished { .. } => Channel::ItemUseFinished,
            Self::BlockBroken { .. } => Channel::BlockBroken,
            Self::BlocksDetonated { .. } => Channel::BlockDetonated,
            Self::ItemExpiredInLiquid { .. } => Channel::ItemExpiredInLiquid,
        }
    }
}

// ---------------------------------------------------------------------------
// SeedSpawn
// ---------------------------------------------------------------------------

/// One seed the host should drop into the world.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedSpawn {
    /// Name of the plant set whose seed spawns.
    pub plant_set: String,
    /// Channel that produced the seed.
    pub channel: Channel,
    /// Where to drop it.
    pub position: Position,
    /// Whether the seed replaces the source block's normal drop.
    pub replaces_source: bool,
}

/// Whether any spawn in `spawns` replaces the source block's normal drop.
pub fn replaces_source(spawns: &[SeedSpawn]) -> bool {
    spawns.iter().any(|spawn| spawn.replaces_source)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spawn(replaces: bool) -> SeedSpawn {
        SeedSpawn {
            plant_set: String::from("quartz"),
            channel: Channel::BlockBroken,
            position: Position::new(0, 64, 0),
            replaces_source: replaces,
        }
    }

    #[test]
    fn events_map_to_channels() {
        let at = Position::new(1, 2, 3);
        let cases = [
            (
                WorldEvent::CreatureKilled {
                    creature: "minecraft:zombie".into(),
                    position: at,
                },
                Channel::CreatureKilled,
            ),
            (
                WorldEvent::ItemUseFinished {
                    item: "verdant:bulb".into(),
                    units: 1,
                    position: at,
                },
                Channel::ItemUseFinished,
            ),
            (
                WorldEvent::BlockBroken {
                    block: "minecraft:iron_ore".into(),
                    position: at,
                },
                Channel::BlockBroken,
            ),
            (WorldEvent::BlocksDetonated { blocks: Vec::new() }, Channel::BlockDetonated),
            (
                WorldEvent::ItemExpiredInLiquid {
                    item: "verdant:shard".into(),
                    units: 3,
                    position: at,
                },
                Channel::ItemExpiredInLiquid,
            ),
        ];
        for (event, channel) in cases {
            assert_eq!(event.channel(), channel);
        }
    }

    #[test]
    fn replaces_source_if_any_spawn_does() {
        assert!(!replaces_source(&[]));
        assert!(!replaces_source(&[spawn(false), spawn(false)]));
        assert!(replaces_source(&[spawn(false), spawn(true)]));
    }

    #[test]
    fn event_json_is_tagged() {
        let event = WorldEvent::BlockBroken {
            block: "minecraft:quartz_ore".into(),
            position: Position::new(4, 5, 6),
        };
        let json = serde_json::to_value(&event).unwrap_or_default();
        assert_eq!(json["kind"], "block_broken");
        assert_eq!(json["block"], "minecraft:quartz_ore");
        let back: Result<WorldEvent, _> = serde_json::from_value(json);
        assert_eq!(back.ok(), Some(event));
    }
}
