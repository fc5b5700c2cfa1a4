//! The host-side view of a plant's surroundings.
//!
//! Only metallic plants look past their own block: when they finish
//! growing they push a produce block into one of the four horizontal
//! neighbors. The automaton asks the host about those cells through
//! [`PlantSite`], and the host performs the actual block placement.

use verdant_types::Position;

/// Queries and mutations the automaton needs from the world around a plant.
pub trait PlantSite {
    /// Position of the plant block itself.
    fn position(&self) -> Position;

    /// Whether `pos` holds nothing (air or a replaceable block).
    fn is_empty(&self, pos: Position) -> bool;

    /// Whether `pos` can support a block resting on it.
    fn is_solid(&self, pos: Position) -> bool;

    /// Place the plant's produce block at `pos`. Returns `false` if the host
    /// refused the placement.
    fn place_produce(&mut self, pos: Position) -> bool;
}

/// A site with no usable neighbors.
///
/// Suitable for biochemical and crystalline plants, which never place
/// blocks, and for hosts that disable metallic produce placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BareSite {
    /// Position of the plant block.
    pub position: Position,
}

impl BareSite {
    /// A bare site at `position`.
    pub const fn new(position: Position) -> Self {
        Self { position }
    }
}

impl PlantSite for BareSite {
    fn position(&self) -> Position {
        self.position
    }

    fn is_empty(&self, _pos: Position) -> bool {
        false
    }

    fn is_solid(&self, _pos: Position) -> bool {
        false
    }

    fn place_produce(&mut self, _pos: Position) -> bool {
        false
    }
}
