//! Enumeration types for the Verdant plant engine.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Archetype
// ---------------------------------------------------------------------------

/// One of the three plant-set families.
///
/// The archetype fixes the number of growth stages, what happens when the
/// plant is harvested, and which world events can yield new seeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Archetype {
    /// Creature-derived plants. Seeds drop from killed creatures and from
    /// eating the produce; harvesting regrows from a partial stage.
    Biochemical,
    /// Ore-derived crystal plants. Seeds replace broken ore and form from
    /// shards left in liquid; harvesting leaves the plant fully grown.
    Crystalline,
    /// Ore-derived metal plants. Mature plants push a produce block into a
    /// neighboring cell; seeds come from detonated ore or produce blocks.
    Metallic,
}

impl Archetype {
    /// Every archetype, in declaration order.
    pub const ALL: [Self; 3] = [Self::Biochemical, Self::Crystalline, Self::Metallic];

    /// Highest growth stage a plant of this archetype can reach.
    pub const fn max_stage(self) -> u8 {
        match self {
            Self::Biochemical | Self::Crystalline => 7,
            Self::Metallic => 8,
        }
    }

    /// The type tag written by the property serializer.
    pub const fn type_tag(self) -> &'static str {
        match self {
            Self::Biochemical => "biochemical",
            Self::Crystalline => "crystalline",
            Self::Metallic => "metallic",
        }
    }

    /// The two seed channels this archetype listens on.
    ///
    /// Metallic plants bind both of their chances to the single detonation
    /// channel, so the pair repeats.
    pub const fn channels(self) -> [Channel; 2] {
        match self {
            Self::Biochemical => [Channel::CreatureKilled, Channel::ItemUseFinished],
            Self::Crystalline => [Channel::BlockBroken, Channel::ItemExpiredInLiquid],
            Self::Metallic => [Channel::BlockDetonated, Channel::BlockDetonated],
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_tag())
    }
}

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// A horizontal compass direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Negative z.
    North,
    /// Positive x.
    East,
    /// Positive z.
    South,
    /// Negative x.
    West,
}

impl Direction {
    /// All four directions in clockwise order starting from north.
    pub const ALL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// The next direction turning clockwise.
    pub const fn clockwise(self) -> Self {
        match self {
            Self::North => Self::East,
            Self::East => Self::South,
            Self::South => Self::West,
            Self::West => Self::North,
        }
    }

    /// The direction pointing the other way.
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }

    /// Map an index to a direction, wrapping modulo four.
    pub const fn from_index(index: u32) -> Self {
        match index % 4 {
            0 => Self::North,
            1 => Self::East,
            2 => Self::South,
            _ => Self::West,
        }
    }

    /// The `(dx, dz)` step for one block in this direction.
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }
}

// ---------------------------------------------------------------------------
// Channel
// ---------------------------------------------------------------------------

/// A named world event that can produce seeds.
///
/// The string names are part of the host contract and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Channel {
    /// A creature was killed.
    CreatureKilled,
    /// A player finished using (eating) an item.
    ItemUseFinished,
    /// A block was broken.
    BlockBroken,
    /// A block was caught in an explosion.
    #[serde(rename = "block-explode-detonate")]
    BlockDetonated,
    /// A dropped item stack expired while in a liquid.
    #[serde(rename = "item-expire-in-liquid")]
    ItemExpiredInLiquid,
}

impl Channel {
    /// Every channel, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::CreatureKilled,
        Self::ItemUseFinished,
        Self::BlockBroken,
        Self::BlockDetonated,
        Self::ItemExpiredInLiquid,
    ];

    /// The stable channel name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::CreatureKilled => "creature-killed",
            Self::ItemUseFinished => "item-use-finished",
            Self::BlockBroken => "block-broken",
            Self::BlockDetonated => "block-explode-detonate",
            Self::ItemExpiredInLiquid => "item-expire-in-liquid",
        }
    }

    /// The archetype whose seed rules listen on this channel.
    pub const fn archetype(self) -> Archetype {
        match self {
            Self::CreatureKilled | Self::ItemUseFinished => Archetype::Biochemical,
            Self::BlockBroken | Self::ItemExpiredInLiquid => Archetype::Crystalline,
            Self::BlockDetonated => Archetype::Metallic,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when parsing a channel name that no archetype listens on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown seed channel: {0}")]
pub struct UnknownChannel(pub String);

impl FromStr for Channel {
    type Err = UnknownChannel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|channel| channel.name() == s)
            .ok_or_else(|| UnknownChannel(s.to_owned()))
    }
}
