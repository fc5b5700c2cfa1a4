//! Plain data structs shared across the workspace.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::enums::Direction;

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// A block position in the host world.
///
/// Coordinates saturate at the `i32` bounds rather than wrapping, so a
/// neighbor query at the world edge returns the edge cell itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    /// East-west coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
    /// North-south coordinate.
    pub z: i32,
}

impl Position {
    /// Create a position from its coordinates.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The horizontal neighbor one block in `direction`.
    pub const fn offset(self, direction: Direction) -> Self {
        let (dx, dz) = direction.offset();
        Self {
            x: self.x.saturating_add(dx),
            y: self.y,
            z: self.z.saturating_add(dz),
        }
    }

    /// The block directly below.
    pub const fn below(self) -> Self {
        Self {
            x: self.x,
            y: self.y.saturating_sub(1),
            z: self.z,
        }
    }

    /// The block directly above.
    pub const fn above(self) -> Self {
        Self {
            x: self.x,
            y: self.y.saturating_add(1),
            z: self.z,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// The host's name for a creature type, block, or item (for example
/// `minecraft:zombie` or `verdant:iron_ore`).
///
/// Seed channels match events to plant sets by comparing identities, so
/// the comparison is exact and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    /// Wrap a host identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Identity {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for Identity {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_moves_one_block() {
        let origin = Position::new(4, 64, -2);
        assert_eq!(origin.offset(Direction::North), Position::new(4, 64, -3));
        assert_eq!(origin.offset(Direction::East), Position::new(5, 64, -2));
        assert_eq!(origin.offset(Direction::South), Position::new(4, 64, -1));
        assert_eq!(origin.offset(Direction::West), Position::new(3, 64, -2));
    }

    #[test]
    fn below_and_above_are_inverse() {
        let pos = Position::new(0, 10, 0);
        assert_eq!(pos.below().above(), pos);
        assert_eq!(pos.below().y, 9);
    }

    #[test]
    fn offset_saturates_at_world_edge() {
        let edge = Position::new(i32::MAX, 0, 0);
        assert_eq!(edge.offset(Direction::East), edge);
    }

    #[test]
    fn identity_serializes_transparently() {
        let id = Identity::new("minecraft:zombie");
        let json = serde_json::to_string(&id).unwrap_or_default();
        assert_eq!(json, "\"minecraft:zombie\"");
        assert_eq!(id.as_str(), "minecraft:zombie");
    }
}
