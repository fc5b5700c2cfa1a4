//! Versioned, type-tagged encoding of property sets.
//!
//! # Key scheme
//!
//! Every encoded compound starts with two header keys, followed by the
//! fields of its type. The key names are a persistence contract: config
//! files and saved worlds written by any earlier version must keep
//! decoding, so keys are only ever added, never renamed.
//!
//! | key                                  | type  | written for                |
//! |--------------------------------------|-------|----------------------------|
//! | `type`                               | str   | all                        |
//! | `version`                            | int   | all                        |
//! | `can_bonemeal`                       | bool  | plants                     |
//! | `growth_probability`                 | float | plants                     |
//! | `plant_yield`                        | int   | biochemical, crystalline   |
//! | `seed_spawn_chance_from_mob`         | float | biochemical                |
//! | `seed_spawn_chance_from_bulb`        | float | biochemical                |
//! | `seed_spawn_chance_from_ore`         | float | crystalline, metallic      |
//! | `seed_spawn_chance_from_shard`       | float | crystalline                |
//! | `seed_crafting_yield`                | int   | crystalline                |
//! | `seed_spawn_chance_from_organic_ore` | float | metallic                   |
//! | `food_value`                         | int   | produce                    |
//! | `saturation`                         | float | produce                    |
//!
//! Decoding checks `type` before touching any other key. Decoded values go
//! back through the clamping constructors, so `decode(encode(p)) == p`
//! holds for every valid property set.

use verdant_types::Archetype;

use crate::error::PropertyError;
use crate::property::{ChanceSlot, ProduceProperties, PropertySet};
use crate::store::{CompoundStore, KeyValueStore};

/// Current encoding version. Stores without a `version` key are read as
/// version 1.
pub const FORMAT_VERSION: i64 = 1;

/// Type tag of [`ProduceProperties`].
pub const PRODUCE_TAG: &str = "produce";

/// Key names of the persisted scheme.
pub mod keys {
    /// Type tag.
    pub const TYPE: &str = "type";
    /// Encoding version.
    pub const VERSION: &str = "version";
    /// Whether fertilizer can force growth.
    pub const CAN_BONEMEAL: &str = "can_bonemeal";
    /// Per-tick growth chance.
    pub const GROWTH_PROBABILITY: &str = "growth_probability";
    /// Harvest yield.
    pub const PLANT_YIELD: &str = "plant_yield";
    /// Biochemical primary chance.
    pub const FROM_MOB: &str = "seed_spawn_chance_from_mob";
    /// Biochemical secondary chance.
    pub const FROM_BULB: &str = "seed_spawn_chance_from_bulb";
    /// Crystalline and metallic primary chance.
    pub const FROM_ORE: &str = "seed_spawn_chance_from_ore";
    /// Crystalline secondary chance.
    pub const FROM_SHARD: &str = "seed_spawn_chance_from_shard";
    /// Metallic secondary chance.
    pub const FROM_ORGANIC_ORE: &str = "seed_spawn_chance_from_organic_ore";
    /// Crystalline seed recipe size.
    pub const SEED_CRAFTING_YIELD: &str = "seed_crafting_yield";
    /// Produce food value.
    pub const FOOD_VALUE: &str = "food_value";
    /// Produce saturation.
    pub const SATURATION: &str = "saturation";
}

/// The `(primary, secondary)` chance keys of an archetype.
const fn chance_keys(archetype: Archetype) -> (&'static str, &'static str) {
    match archetype {
        Archetype::Biochemical => (keys::FROM_MOB, keys::FROM_BULB),
        Archetype::Crystalline => (keys::FROM_ORE, keys::FROM_SHARD),
        Archetype::Metallic => (keys::FROM_ORE, keys::FROM_ORGANIC_ORE),
    }
}

// ---------------------------------------------------------------------------
// Plants
// ---------------------------------------------------------------------------

/// Write a plant property set into `store`.
pub fn encode_plant<S: KeyValueStore + ?Sized>(props: &PropertySet, store: &mut S) {
    let archetype = props.archetype();
    write_header(store, archetype.type_tag());
    store.put_bool(keys::CAN_BONEMEAL, props.can_bonemeal());
    store.put_float(keys::GROWTH_PROBABILITY, props.growth_probability());

    match archetype {
        Archetype::Biochemical => {
            store.put_int(keys::PLANT_YIELD, i64::from(props.plant_yield()));
        }
        Archetype::Crystalline => {
            store.put_int(keys::PLANT_YIELD, i64::from(props.plant_yield()));
            store.put_int(
                keys::SEED_CRAFTING_YIELD,
                i64::from(props.seed_crafting_yield()),
            );
        }
        Archetype::Metallic => {}
    }

    let (primary, secondary) = chance_keys(archetype);
    store.put_float(primary, props.chance(ChanceSlot::Primary).to_raw());
    store.put_float(secondary, props.chance(ChanceSlot::Secondary).to_raw());
}

/// Read a plant property set of the `expected` archetype from `store`.
///
/// # Errors
///
/// - [`PropertyError::SerializationMismatch`] if the stored type tag is not
///   `expected`'s tag.
/// - [`PropertyError::MalformedData`] if any key is missing or mistyped, or
///   the version is newer than [`FORMAT_VERSION`].
pub fn decode_plant<S: KeyValueStore + ?Sized>(
    store: &S,
    expected: Archetype,
) -> Result<PropertySet, PropertyError> {
    read_header(store, expected.type_tag())?;

    let can_bonemeal = store.get_bool(keys::CAN_BONEMEAL)?;
    let growth_probability = store.get_float(keys::GROWTH_PROBABILITY)?;
    let (primary_key, secondary_key) = chance_keys(expected);
    let primary = store.get_float(primary_key)?;
    let secondary = store.get_float(secondary_key)?;

    let props = match expected {
        Archetype::Biochemical => PropertySet::biochemical(
            can_bonemeal,
            growth_probability,
            store.get_int(keys::PLANT_YIELD)?,
            primary,
            secondary,
        ),
        Archetype::Crystalline => PropertySet::crystalline(
            can_bonemeal,
            growth_probability,
            store.get_int(keys::PLANT_YIELD)?,
            primary,
            secondary,
            store.get_int(keys::SEED_CRAFTING_YIELD)?,
        ),
        Archetype::Metallic => {
            PropertySet::metallic(can_bonemeal, growth_probability, primary, secondary)
        }
    };
    Ok(props)
}

/// The keys an archetype's property set encodes, discovered by encoding a
/// blank instance. Sorted.
pub fn schema_keys(archetype: Archetype) -> Vec<String> {
    let mut store = CompoundStore::new();
    encode_plant(&PropertySet::blank(archetype), &mut store);
    store.keys().map(str::to_owned).collect()
}

// ---------------------------------------------------------------------------
// Produce
// ---------------------------------------------------------------------------

/// Write produce properties into `store`.
pub fn encode_produce<S: KeyValueStore + ?Sized>(props: &ProduceProperties, store: &mut S) {
    write_header(store, PRODUCE_TAG);
    store.put_int(keys::FOOD_VALUE, i64::from(props.food_value()));
    store.put_float(keys::SATURATION, props.saturation());
}

/// Read produce properties from `store`.
///
/// # Errors
///
/// Same taxonomy as [`decode_plant`].
pub fn decode_produce<S: KeyValueStore + ?Sized>(
    store: &S,
) -> Result<ProduceProperties, PropertyError> {
    read_header(store, PRODUCE_TAG)?;
    Ok(ProduceProperties::new(
        store.get_int(keys::FOOD_VALUE)?,
        store.get_float(keys::SATURATION)?,
    ))
}

// ---------------------------------------------------------------------------
// Header
// ---------------------------------------------------------------------------

fn write_header<S: KeyValueStore + ?Sized>(store: &mut S, tag: &str) {
    store.put_string(keys::TYPE, tag);
    store.put_int(keys::VERSION, FORMAT_VERSION);
}

fn read_header<S: KeyValueStore + ?Sized>(store: &S, expected: &str) -> Result<(), PropertyError> {
    let found = store.get_string(keys::TYPE)?;
    if found != expected {
        return Err(PropertyError::SerializationMismatch {
            expected: expected.to_owned(),
            found: found.to_owned(),
        });
    }

    if !store.contains(keys::VERSION) {
        tracing::debug!(tag = expected, "store has no version key, reading as version 1");
        return Ok(());
    }
    let version = store.get_int(keys::VERSION)?;
    if !(1..=FORMAT_VERSION).contains(&version) {
        return Err(PropertyError::malformed(
            keys::VERSION,
            format!("unsupported version {version} (supported: 1..={FORMAT_VERSION})"),
        ));
    }
    Ok(())
}
