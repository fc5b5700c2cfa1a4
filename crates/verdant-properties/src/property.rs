//! Plant and produce property sets.
//!
//! Every constructor here takes raw numeric input and clamps it into the
//! documented range. Nothing is rejected: a config that asks for a 150%
//! growth chance gets 100%, and a negative yield gets zero.
//!
//! Seed-spawn chances have one extra state. A negative raw value does not
//! clamp to zero; it disables the channel outright, which the propagation
//! engine checks before drawing any random sample.

use serde::{Deserialize, Serialize};

use verdant_types::Archetype;

// ---------------------------------------------------------------------------
// Ranges
// ---------------------------------------------------------------------------

/// Upper bound of every percentage.
pub const MAX_PROBABILITY: f64 = 100.0;

/// Upper bound of produce yield and seed crafting yield.
pub const MAX_YIELD: u32 = 64;

/// Lower bound of the crystalline seed crafting yield.
pub const MIN_SEED_CRAFTING_YIELD: u32 = 1;

/// Upper bound of the food value restored by eating produce.
pub const MAX_FOOD_VALUE: u32 = 20;

/// Upper bound of the produce saturation modifier.
pub const MAX_SATURATION: f64 = 2.0;

/// Raw value written for a disabled seed channel.
pub const DISABLED_CHANCE: f64 = -1.0;

/// Clamp a percentage into `[0, 100]`. NaN becomes zero.
fn clamp_percent(raw: f64) -> f64 {
    if raw.is_nan() {
        0.0
    } else {
        raw.clamp(0.0, MAX_PROBABILITY)
    }
}

/// Clamp an integer count into `[min, max]`.
fn clamp_count(raw: i64, min: u32, max: u32) -> u32 {
    let clamped = raw.clamp(i64::from(min), i64::from(max));
    u32::try_from(clamped).unwrap_or(min)
}

// ---------------------------------------------------------------------------
// SpawnChance
// ---------------------------------------------------------------------------

/// Probability of one seed channel firing, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SpawnChance {
    /// The channel never fires and never draws a sample.
    Disabled,
    /// The channel fires when a sample in `[0, 100)` falls below this value.
    Percent(f64),
}

impl SpawnChance {
    /// Build from a raw config value: negative disables, everything else is
    /// clamped into `[0, 100]`.
    pub fn from_raw(raw: f64) -> Self {
        if raw < 0.0 {
            Self::Disabled
        } else {
            Self::Percent(clamp_percent(raw))
        }
    }

    /// The raw value to persist; disabled channels write `-1`.
    pub const fn to_raw(self) -> f64 {
        match self {
            Self::Disabled => DISABLED_CHANCE,
            Self::Percent(p) => p,
        }
    }

    /// The percentage, or `None` when disabled.
    pub const fn percent(self) -> Option<f64> {
        match self {
            Self::Disabled => None,
            Self::Percent(p) => Some(p),
        }
    }

    /// Whether the channel can fire at all.
    pub const fn is_enabled(self) -> bool {
        matches!(self, Self::Percent(_))
    }
}

/// Selects one of a plant set's two seed chances.
///
/// What each slot means depends on the archetype:
///
/// | archetype   | primary           | secondary                  |
/// |-------------|-------------------|----------------------------|
/// | biochemical | creature killed   | produce eaten              |
/// | crystalline | ore broken        | shard expired in liquid    |
/// | metallic    | ore detonated     | produce block detonated    |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChanceSlot {
    /// Channel keyed on the plant set's source (creature or ore).
    Primary,
    /// Channel keyed on the plant set's produce.
    Secondary,
}

// ---------------------------------------------------------------------------
// PropertySet
// ---------------------------------------------------------------------------

/// The validated rule bundle for one plant set.
///
/// Fields are private so every instance goes through a clamping
/// constructor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertySet {
    archetype: Archetype,
    can_bonemeal: bool,
    growth_probability: f64,
    plant_yield: u32,
    primary_chance: SpawnChance,
    secondary_chance: SpawnChance,
    seed_crafting_yield: u32,
}

impl PropertySet {
    /// Properties for a creature-derived plant.
    ///
    /// `from_mob` is the chance of a seed dropping from a killed source
    /// creature; `from_bulb` the chance per produce unit eaten.
    pub fn biochemical(
        can_bonemeal: bool,
        growth_probability: f64,
        plant_yield: i64,
        from_mob: f64,
        from_bulb: f64,
    ) -> Self {
        Self {
            archetype: Archetype::Biochemical,
            can_bonemeal,
            growth_probability: clamp_percent(growth_probability),
            plant_yield: clamp_count(plant_yield, 0, MAX_YIELD),
            primary_chance: SpawnChance::from_raw(from_mob),
            secondary_chance: SpawnChance::from_raw(from_bulb),
            seed_crafting_yield: MIN_SEED_CRAFTING_YIELD,
        }
    }

    /// Properties for an ore-derived crystal plant.
    ///
    /// `from_ore` is the chance that breaking the source ore drops a seed
    /// instead of the ore; `from_shard` the chance per shard that expires in
    /// liquid. `seed_crafting_yield` is the shard cost of crafting a seed.
    pub fn crystalline(
        can_bonemeal: bool,
        growth_probability: f64,
        plant_yield: i64,
        from_ore: f64,
        from_shard: f64,
        seed_crafting_yield: i64,
    ) -> Self {
        Self {
            archetype: Archetype::Crystalline,
            can_bonemeal,
            growth_probability: clamp_percent(growth_probability),
            plant_yield: clamp_count(plant_yield, 0, MAX_YIELD),
            primary_chance: SpawnChance::from_raw(from_ore),
            secondary_chance: SpawnChance::from_raw(from_shard),
            seed_crafting_yield: clamp_count(seed_crafting_yield, MIN_SEED_CRAFTING_YIELD, MAX_YIELD),
        }
    }

    /// Properties for an ore-derived metal plant.
    ///
    /// Metallic plants place their produce as a block rather than dropping
    /// items, so they carry no yield.
    pub fn metallic(
        can_bonemeal: bool,
        growth_probability: f64,
        from_ore: f64,
        from_organic_ore: f64,
    ) -> Self {
        Self {
            archetype: Archetype::Metallic,
            can_bonemeal,
            growth_probability: clamp_percent(growth_probability),
            plant_yield: 0,
            primary_chance: SpawnChance::from_raw(from_ore),
            secondary_chance: SpawnChance::from_raw(from_organic_ore),
            seed_crafting_yield: MIN_SEED_CRAFTING_YIELD,
        }
    }

    /// A blank instance built from explicit zero inputs, for schema
    /// discovery. Zeros pass through the normal clamping, so the crystalline
    /// seed crafting yield comes out as its minimum of one.
    pub fn blank(archetype: Archetype) -> Self {
        match archetype {
            Archetype::Biochemical => Self::biochemical(false, 0.0, 0, 0.0, 0.0),
            Archetype::Crystalline => Self::crystalline(false, 0.0, 0, 0.0, 0.0, 0),
            Archetype::Metallic => Self::metallic(false, 0.0, 0.0, 0.0),
        }
    }

    /// Which plant family these properties belong to.
    pub const fn archetype(&self) -> Archetype {
        self.archetype
    }

    /// Whether fertilizer can force growth.
    pub const fn can_bonemeal(&self) -> bool {
        self.can_bonemeal
    }

    /// Per-tick chance (percent) of advancing one stage.
    pub const fn growth_probability(&self) -> f64 {
        self.growth_probability
    }

    /// Produce units released by a harvest at full growth.
    pub const fn plant_yield(&self) -> u32 {
        self.plant_yield
    }

    /// Shards consumed (or produced) by the crystalline seed recipe.
    pub const fn seed_crafting_yield(&self) -> u32 {
        self.seed_crafting_yield
    }

    /// One of the two seed chances.
    pub const fn chance(&self, slot: ChanceSlot) -> SpawnChance {
        match slot {
            ChanceSlot::Primary => self.primary_chance,
            ChanceSlot::Secondary => self.secondary_chance,
        }
    }
}

// ---------------------------------------------------------------------------
// ProduceProperties
// ---------------------------------------------------------------------------

/// Properties of an edible produce item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProduceProperties {
    food_value: u32,
    saturation: f64,
}

impl ProduceProperties {
    /// Build from raw values, clamping `food_value` into `[0, 20]` and
    /// `saturation` into `[0, 2]`.
    pub fn new(food_value: i64, saturation: f64) -> Self {
        let saturation = if saturation.is_nan() {
            0.0
        } else {
            saturation.clamp(0.0, MAX_SATURATION)
        };
        Self {
            food_value: clamp_count(food_value, 0, MAX_FOOD_VALUE),
            saturation,
        }
    }

    /// Hunger points restored.
    pub const fn food_value(&self) -> u32 {
        self.food_value
    }

    /// Saturation modifier.
    pub const fn saturation(&self) -> f64 {
        self.saturation
    }
}
