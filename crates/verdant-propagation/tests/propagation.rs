//! End-to-end tests: configuration decoded through the property
//! serializer, registered, grown, harvested, and fed back as world events.

#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::float_cmp,
    clippy::arithmetic_side_effects
)]

use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use verdant_growth::{BareSite, FixedSampler, GrowthAutomaton, RngSampler, ScriptedSampler};
use verdant_properties::{CompoundStore, PropertySet, decode_plant, encode_plant};
use verdant_propagation::{PlantSetRegistry, RegistryError, SeedPropagationEngine, WorldEvent};
use verdant_types::{Archetype, Channel, Identity, Position};

const METALLIC_CONFIG: &str = r#"{
    "type": "metallic",
    "version": 1,
    "can_bonemeal": true,
    "growth_probability": 25,
    "seed_spawn_chance_from_ore": 100,
    "seed_spawn_chance_from_organic_ore": 100
}"#;

fn registry_with(sets: Vec<(&str, PropertySet, &str, &str)>) -> PlantSetRegistry {
    let mut registry = PlantSetRegistry::new();
    for (name, properties, source, produce) in sets {
        registry
            .register(name, properties, Identity::new(source), Identity::new(produce))
            .unwrap();
    }
    registry
}

#[test]
fn detonation_yields_one_seed_per_matching_block() {
    let store: CompoundStore = serde_json::from_str(METALLIC_CONFIG).unwrap();
    let iron = decode_plant(&store, Archetype::Metallic).unwrap();
    assert_eq!(iron.growth_probability(), 25.0);

    let registry = registry_with(vec![(
        "iron",
        iron,
        "minecraft:iron_ore",
        "verdant:iron_fruit",
    )]);
    let engine = SeedPropagationEngine::new(Arc::new(registry));

    let blast = WorldEvent::BlocksDetonated {
        blocks: vec![
            (Identity::new("minecraft:iron_ore"), Position::new(0, 10, 0)),
            (Identity::new("minecraft:dirt"), Position::new(1, 10, 0)),
            (Identity::new("verdant:iron_fruit"), Position::new(2, 10, 0)),
            (Identity::new("minecraft:iron_ore"), Position::new(3, 10, 0)),
        ],
    };
    let mut sampler = RngSampler::new(SmallRng::seed_from_u64(11));
    let spawns = engine.dispatch(&blast, &mut sampler);

    let xs: Vec<i32> = spawns.iter().map(|s| s.position.x).collect();
    assert_eq!(xs, vec![0, 2, 3]);
    assert!(spawns.iter().all(|s| s.plant_set == "iron"));
    assert!(spawns.iter().all(|s| s.channel == Channel::BlockDetonated));
}

#[test]
fn duplicate_registration_leaves_first_entry() {
    let mut registry = PlantSetRegistry::new();
    let first = PropertySet::crystalline(true, 20.0, 3, 10.0, 10.0, 8);
    registry
        .register("quartz", first.clone(), "minecraft:quartz_ore".into(), "verdant:quartz".into())
        .unwrap();
    let err = registry
        .register(
            "quartz",
            PropertySet::crystalline(false, 0.0, 0, 0.0, 0.0, 1),
            "minecraft:nether_quartz_ore".into(),
            "verdant:other".into(),
        )
        .unwrap_err();
    assert!(matches!(err, RegistryError::DuplicateRegistration { ref name } if name == "quartz"));

    let engine = SeedPropagationEngine::new(Arc::new(registry));
    assert!(engine.is_bound(Channel::BlockBroken, &Identity::new("minecraft:quartz_ore")));
    assert!(!engine.is_bound(Channel::BlockBroken, &Identity::new("minecraft:nether_quartz_ore")));
    assert_eq!(
        engine.registry().lookup_by_name("quartz").unwrap().properties(),
        &first
    );
}

#[test]
fn disabled_chance_never_spawns_under_zero_sampler() {
    let registry = registry_with(vec![(
        "zombie",
        PropertySet::biochemical(true, 20.0, 4, -1.0, -1.0),
        "minecraft:zombie",
        "verdant:zombie_bulb",
    )]);
    let engine = SeedPropagationEngine::new(Arc::new(registry));
    let mut sampler = FixedSampler::zero();

    for _ in 0..100 {
        let killed = WorldEvent::CreatureKilled {
            creature: "minecraft:zombie".into(),
            position: Position::default(),
        };
        let eaten = WorldEvent::ItemUseFinished {
            item: "verdant:zombie_bulb".into(),
            units: 16,
            position: Position::default(),
        };
        assert!(engine.dispatch(&killed, &mut sampler).is_empty());
        assert!(engine.dispatch(&eaten, &mut sampler).is_empty());
    }
}

#[test]
fn disabled_ore_chance_never_spawns_from_detonation() {
    let registry = registry_with(vec![
        (
            "iron",
            PropertySet::metallic(true, 20.0, -1.0, 100.0),
            "minecraft:iron_ore",
            "verdant:iron_fruit",
        ),
        (
            "quartz",
            PropertySet::crystalline(true, 20.0, 3, -1.0, 100.0, 8),
            "minecraft:nether_quartz_ore",
            "verdant:quartz_shard",
        ),
    ]);
    let engine = SeedPropagationEngine::new(Arc::new(registry));
    let mut sampler = FixedSampler::zero();

    for y in 0..50 {
        let blast = WorldEvent::BlocksDetonated {
            blocks: vec![
                (Identity::new("minecraft:iron_ore"), Position::new(0, y, 0)),
                (Identity::new("minecraft:iron_ore"), Position::new(1, y, 0)),
            ],
        };
        assert!(engine.dispatch(&blast, &mut sampler).is_empty());

        let broken = WorldEvent::BlockBroken {
            block: "minecraft:nether_quartz_ore".into(),
            position: Position::new(0, y, 0),
        };
        assert!(engine.dispatch(&broken, &mut sampler).is_empty());
    }

    // The produce side stays live.
    let blast = WorldEvent::BlocksDetonated {
        blocks: vec![
            (Identity::new("minecraft:iron_ore"), Position::new(0, 5, 0)),
            (Identity::new("verdant:iron_fruit"), Position::new(1, 5, 0)),
        ],
    };
    let spawns = engine.dispatch(&blast, &mut sampler);
    assert_eq!(spawns.len(), 1);
    assert_eq!(spawns.first().map(|s| s.position), Some(Position::new(1, 5, 0)));
}

#[test]
fn disabled_chance_survives_persistence() {
    let zombie = PropertySet::biochemical(true, 20.0, 4, -1.0, 12.5);
    let mut store = CompoundStore::new();
    encode_plant(&zombie, &mut store);
    let json = serde_json::to_string(&store).unwrap();
    let back: CompoundStore = serde_json::from_str(&json).unwrap();
    let decoded = decode_plant(&back, Archetype::Biochemical).unwrap();
    assert_eq!(decoded, zombie);

    let engine = SeedPropagationEngine::new(Arc::new(registry_with(vec![(
        "zombie",
        decoded,
        "minecraft:zombie",
        "verdant:zombie_bulb",
    )])));
    let mut sampler = FixedSampler::zero();
    let kill = engine.on_event(
        Channel::CreatureKilled,
        &Identity::new("minecraft:zombie"),
        Position::default(),
        &mut sampler,
    );
    assert!(kill.is_empty());
}

#[test]
fn multiple_sets_on_one_subject_roll_in_registration_order() {
    let registry = registry_with(vec![
        (
            "rotten",
            PropertySet::biochemical(true, 20.0, 4, 50.0, 0.0),
            "minecraft:zombie",
            "verdant:rotten_bulb",
        ),
        (
            "iron",
            PropertySet::metallic(true, 20.0, 100.0, 100.0),
            "minecraft:iron_ore",
            "verdant:iron_fruit",
        ),
        (
            "brain",
            PropertySet::biochemical(true, 20.0, 4, 50.0, 0.0),
            "minecraft:zombie",
            "verdant:brain_bulb",
        ),
    ]);
    let engine = SeedPropagationEngine::new(Arc::new(registry));

    // First set misses, second hits.
    let mut sampler = ScriptedSampler::new([75.0, 25.0], []);
    let spawns = engine.on_event(
        Channel::CreatureKilled,
        &Identity::new("minecraft:zombie"),
        Position::default(),
        &mut sampler,
    );
    let names: Vec<&str> = spawns.iter().map(|s| s.plant_set.as_str()).collect();
    assert_eq!(names, vec!["brain"]);

    let mut sampler = FixedSampler::zero();
    let spawns = engine.on_event(
        Channel::CreatureKilled,
        &Identity::new("minecraft:zombie"),
        Position::default(),
        &mut sampler,
    );
    let names: Vec<&str> = spawns.iter().map(|s| s.plant_set.as_str()).collect();
    assert_eq!(names, vec!["rotten", "brain"]);
}

#[test]
fn grown_biochemical_plant_harvests_back_to_stage_three() {
    let registry = registry_with(vec![(
        "zombie",
        PropertySet::biochemical(true, 100.0, 4, 0.0, 100.0),
        "minecraft:zombie",
        "verdant:zombie_bulb",
    )]);
    let engine = SeedPropagationEngine::new(Arc::new(registry));
    let set = engine.registry().lookup_by_name("zombie").unwrap();

    let mut plant: GrowthAutomaton = set.new_plant();
    let mut site = BareSite::new(Position::new(5, 64, 5));
    let mut rng = RngSampler::new(SmallRng::seed_from_u64(2024));
    let mut ticks = 0;
    while !plant.is_mature() && ticks < 10_000 {
        let before = plant.stage();
        plant.tick(set.properties(), 50.0, &mut rng, &mut site);
        assert!(plant.stage() >= before);
        assert!(plant.stage() <= plant.max_stage());
        ticks += 1;
    }
    assert!(plant.is_mature());
    assert_eq!(plant.stage(), 7);

    let units = plant.on_harvest(set.properties());
    assert_eq!(units, 4);
    assert_eq!(plant.stage(), 3);

    let eaten = WorldEvent::ItemUseFinished {
        item: set.produce().clone(),
        units,
        position: site.position,
    };
    let spawns = engine.dispatch(&eaten, &mut rng);
    assert_eq!(spawns.len(), 4);
}

#[test]
fn barren_soil_never_grows() {
    let props = PropertySet::biochemical(true, 100.0, 4, 0.0, 0.0);
    let mut plant = GrowthAutomaton::new(Archetype::Biochemical);
    let mut site = BareSite::default();
    let mut rng = RngSampler::new(SmallRng::seed_from_u64(5));
    for _ in 0..500 {
        assert!(!plant.tick(&props, 0.0, &mut rng, &mut site));
    }
    assert_eq!(plant.stage(), 0);
}
