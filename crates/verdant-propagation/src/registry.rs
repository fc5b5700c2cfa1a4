//! The plant set directory.
//!
//! A [`PlantSetRegistry`] is filled during startup and then only read.
//! Callers enforce that split by moving the finished registry into an
//! `Arc` (see [`SeedPropagationEngine::new`]); nothing in it is interior
//! mutable.
//!
//! Entries keep their registration order. The propagation engine iterates
//! matching sets in that order, which keeps seed spawns reproducible when
//! several sets listen on the same event.
//!
//! [`SeedPropagationEngine::new`]: crate::engine::SeedPropagationEngine::new

use std::collections::BTreeMap;

use verdant_growth::GrowthAutomaton;
use verdant_properties::PropertySet;
use verdant_types::{Archetype, Identity};

use crate::error::RegistryError;

// ---------------------------------------------------------------------------
// PlantSet
// ---------------------------------------------------------------------------

/// One registered plant set: its rules plus the identities it is tied to
/// in the host world.
#[derive(Debug, Clone, PartialEq)]
pub struct PlantSet {
    name: String,
    properties: PropertySet,
    source: Identity,
    produce: Identity,
}

impl PlantSet {
    /// Unique name of the set.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Plant family, taken from the property set.
    pub const fn archetype(&self) -> Archetype {
        self.properties.archetype()
    }

    /// Growth and seed rules.
    pub const fn properties(&self) -> &PropertySet {
        &self.properties
    }

    /// What the seeds come from: a creature type for biochemical sets, an
    /// ore block for crystalline and metallic sets.
    pub const fn source(&self) -> &Identity {
        &self.source
    }

    /// What the plant produces: the bulb item, the shard item, or the
    /// metallic produce block.
    pub const fn produce(&self) -> &Identity {
        &self.produce
    }

    /// A freshly planted instance of this set.
    pub const fn new_plant(&self) -> GrowthAutomaton {
        GrowthAutomaton::new(self.properties.archetype())
    }
}

// ---------------------------------------------------------------------------
// PlantSetRegistry
// ---------------------------------------------------------------------------

/// Insertion-ordered directory of plant sets, at most one per name.
#[derive(Debug, Clone, Default)]
pub struct PlantSetRegistry {
    sets: Vec<PlantSet>,
    by_name: BTreeMap<String, usize>,
}

impl PlantSetRegistry {
    /// Create an empty registry.
    pub const fn new() -> Self {
        Self {
            sets: Vec::new(),
            by_name: BTreeMap::new(),
        }
    }

    /// Register a plant set.
    ///
    /// The archetype comes from `properties`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateRegistration`] if `name` is taken
    /// (the existing entry is kept untouched), or
    /// [`RegistryError::EmptyName`]. Both are logged at warn.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        properties: PropertySet,
        source: Identity,
        produce: Identity,
    ) -> Result<(), RegistryError> {
        let name = name.into();
        if name.is_empty() {
            tracing::warn!(source = %source, "rejected plant set with empty name");
            return Err(RegistryError::EmptyName);
        }
        if self.by_name.contains_key(&name) {
            tracing::warn!(name = %name, "duplicate plant set registration ignored");
            return Err(RegistryError::DuplicateRegistration { name });
        }

        tracing::debug!(
            name = %name,
            archetype = %properties.archetype(),
            source = %source,
            produce = %produce,
            "registered plant set"
        );
        self.by_name.insert(name.clone(), self.sets.len());
        self.sets.push(PlantSet {
            name,
            properties,
            source,
            produce,
        });
        Ok(())
    }

    /// Look up a plant set by name.
    pub fn lookup_by_name(&self, name: &str) -> Option<&PlantSet> {
        self.by_name.get(name).and_then(|&index| self.sets.get(index))
    }

    /// All plant sets of one archetype, in registration order.
    pub fn lookup_all(&self, archetype: Archetype) -> impl Iterator<Item = &PlantSet> {
        self.sets.iter().filter(move |set| set.archetype() == archetype)
    }

    /// The plant set registered at position `index`.
    pub fn get(&self, index: usize) -> Option<&PlantSet> {
        self.sets.get(index)
    }

    /// Every plant set, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &PlantSet> {
        self.sets.iter()
    }

    /// Number of registered sets.
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// Whether no set is registered.
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zombie() -> PropertySet {
        PropertySet::biochemical(true, 20.0, 4, 2.5, 1.0)
    }

    #[test]
    fn register_and_lookup() {
        let mut registry = PlantSetRegistry::new();
        let result = registry.register(
            "zombie",
            zombie(),
            Identity::new("minecraft:zombie"),
            Identity::new("verdant:zombie_bulb"),
        );
        assert_eq!(result, Ok(()));
        let set = registry.lookup_by_name("zombie");
        assert!(set.is_some());
        assert_eq!(set.map(PlantSet::archetype), Some(Archetype::Biochemical));
        assert_eq!(set.map(|s| s.source().as_str()), Some("minecraft:zombie"));
        assert!(registry.lookup_by_name("skeleton").is_none());
    }

    #[test]
    fn duplicate_registration_keeps_first() {
        let mut registry = PlantSetRegistry::new();
        let first = zombie();
        assert!(
            registry
                .register("zombie", first.clone(), "minecraft:zombie".into(), "verdant:bulb".into())
                .is_ok()
        );
        let second = PropertySet::biochemical(false, 90.0, 1, 50.0, 50.0);
        let err = registry.register("zombie", second, "minecraft:husk".into(), "verdant:husk".into());
        assert_eq!(
            err,
            Err(RegistryError::DuplicateRegistration {
                name: String::from("zombie")
            })
        );
        assert_eq!(registry.len(), 1);
        let set = registry.lookup_by_name("zombie");
        assert_eq!(set.map(PlantSet::properties), Some(&first));
        assert_eq!(set.map(|s| s.source().as_str()), Some("minecraft:zombie"));
    }

    #[test]
    fn empty_name_is_rejected() {
        let mut registry = PlantSetRegistry::new();
        let err = registry.register("", zombie(), "minecraft:zombie".into(), "verdant:bulb".into());
        assert_eq!(err, Err(RegistryError::EmptyName));
        assert!(registry.is_empty());
    }

    #[test]
    fn lookup_all_preserves_insertion_order() {
        let mut registry = PlantSetRegistry::new();
        let metallic = PropertySet::metallic(true, 20.0, 1.0, 1.0);
        for name in ["iron", "gold", "copper"] {
            let ore = Identity::new(format!("minecraft:{name}_ore"));
            let produce = Identity::new(format!("verdant:{name}_fruit"));
            assert!(registry.register(name, metallic.clone(), ore, produce).is_ok());
        }
        assert!(
            registry
                .register("zombie", zombie(), "minecraft:zombie".into(), "verdant:bulb".into())
                .is_ok()
        );

        let names: Vec<&str> = registry.lookup_all(Archetype::Metallic).map(PlantSet::name).collect();
        assert_eq!(names, vec!["iron", "gold", "copper"]);
        assert_eq!(registry.lookup_all(Archetype::Crystalline).count(), 0);
        assert_eq!(registry.lookup_all(Archetype::Biochemical).count(), 1);
    }

    #[test]
    fn new_plant_matches_archetype() {
        let mut registry = PlantSetRegistry::new();
        let crystal = PropertySet::crystalline(true, 20.0, 3, 5.0, 5.0, 8);
        assert!(
            registry
                .register("quartz", crystal, "minecraft:quartz_ore".into(), "verdant:quartz_shard".into())
                .is_ok()
        );
        let plant = registry.lookup_by_name("quartz").map(PlantSet::new_plant);
        assert_eq!(plant.map(|p| (p.archetype(), p.stage())), Some((Archetype::Crystalline, 0)));
    }
}
