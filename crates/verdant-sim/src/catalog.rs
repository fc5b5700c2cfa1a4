//! Builds the plant set registry from configuration.
//!
//! Entries that fail to decode or register are skipped with a warning; the
//! rest of the catalog still loads.

use std::collections::BTreeMap;

use verdant_properties::{ProduceProperties, decode_plant, decode_produce};
use verdant_propagation::PlantSetRegistry;
use verdant_types::Identity;

use crate::config::PlantSetConfig;

/// Registered plant sets plus the food properties of edible produce.
#[derive(Debug, Default)]
pub struct Catalog {
    /// The registry, ready to be frozen.
    pub registry: PlantSetRegistry,
    /// Food properties keyed by plant set name.
    pub foods: BTreeMap<String, ProduceProperties>,
    /// Entries that were skipped.
    pub skipped: usize,
}

impl Catalog {
    /// Decode and register every configured plant set, in order.
    pub fn from_config(sets: &[PlantSetConfig]) -> Self {
        let mut catalog = Self::default();
        for set in sets {
            let properties = match decode_plant(&set.properties, set.archetype) {
                Ok(properties) => properties,
                Err(e) => {
                    tracing::warn!(name = %set.name, error = %e, "skipping plant set with bad properties");
                    catalog.skipped = catalog.skipped.saturating_add(1);
                    continue;
                }
            };

            let registered = catalog.registry.register(
                set.name.clone(),
                properties,
                Identity::new(set.source.clone()),
                Identity::new(set.produce.clone()),
            );
            if registered.is_err() {
                catalog.skipped = catalog.skipped.saturating_add(1);
                continue;
            }

            if let Some(store) = &set.food {
                match decode_produce(store) {
                    Ok(food) => {
                        catalog.foods.insert(set.name.clone(), food);
                    }
                    Err(e) => {
                        tracing::warn!(name = %set.name, error = %e, "ignoring bad food properties");
                    }
                }
            }
        }
        catalog
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use verdant_properties::{CompoundStore, KeyValueStore};
    use verdant_types::Archetype;

    use super::*;
    use crate::config::default_plant_sets;

    #[test]
    fn defaults_register_cleanly() {
        let catalog = Catalog::from_config(&default_plant_sets());
        assert_eq!(catalog.registry.len(), 3);
        assert_eq!(catalog.skipped, 0);
        assert_eq!(catalog.foods.get("zombie").map(ProduceProperties::food_value), Some(4));
    }

    #[test]
    fn mismatched_and_duplicate_entries_are_skipped() {
        let mut sets = default_plant_sets();
        let mut wrong = sets.first().cloned().unwrap();
        wrong.name = String::from("mislabeled");
        wrong.archetype = Archetype::Crystalline;
        sets.push(wrong);
        let duplicate = sets.first().cloned().unwrap();
        sets.push(duplicate);

        let catalog = Catalog::from_config(&sets);
        assert_eq!(catalog.registry.len(), 3);
        assert_eq!(catalog.skipped, 2);
        assert!(catalog.registry.lookup_by_name("mislabeled").is_none());
    }

    #[test]
    fn missing_key_skips_only_that_entry() {
        let mut sets = default_plant_sets();
        if let Some(first) = sets.first_mut() {
            first.properties.remove("growth_probability");
        }
        let catalog = Catalog::from_config(&sets);
        assert_eq!(catalog.registry.len(), 2);
        assert!(catalog.registry.lookup_by_name("zombie").is_none());
        assert!(catalog.foods.is_empty());
    }

    #[test]
    fn bad_food_keeps_plant_set() {
        let mut sets = default_plant_sets();
        if let Some(first) = sets.first_mut() {
            let mut food = CompoundStore::new();
            food.put_string("type", "biochemical");
            first.food = Some(food);
        }
        let catalog = Catalog::from_config(&sets);
        assert_eq!(catalog.registry.len(), 3);
        assert!(catalog.foods.is_empty());
    }
}
