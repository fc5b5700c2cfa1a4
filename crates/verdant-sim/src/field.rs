//! A flat test field: one plot per plant, a solid ground layer, and a
//! harvest loop that feeds produce back into seed propagation.
//!
//! Plots sit on a grid at `GROUND_Y + 1`, spaced so that every plot has
//! four free neighbors for metallic produce. Each random tick every plot
//! is ticked once, in planting order:
//!
//! 1. On fertilizer ticks, the plot is fertilized and forced growth is
//!    attempted.
//! 2. The plant ticks against its soil.
//! 3. A mature plant is harvested. Biochemical produce is eaten,
//!    crystalline shards are dropped into water and the plant is replanted,
//!    and metallic produce blocks are blown up. Each of those is reported
//!    to the propagation engine as the matching world event.

use std::collections::BTreeMap;

use verdant_growth::{GrowthAutomaton, PlantSite, Sampler, SoilState};
use verdant_properties::ProduceProperties;
use verdant_propagation::{PlantSet, SeedPropagationEngine, SeedSpawn, WorldEvent};
use verdant_types::{Archetype, PlantId, PlotId, Position};

use crate::config::SoilConfig;

/// Height of the solid ground layer.
pub const GROUND_Y: i32 = 0;

/// Distance between neighboring plots along each axis.
const PLOT_SPACING: i32 = 3;

/// What occupies a non-ground cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Block {
    Plant,
    Produce,
}

// ---------------------------------------------------------------------------
// Plot
// ---------------------------------------------------------------------------

/// One soil plot and the plant growing on it.
#[derive(Debug, Clone)]
pub struct Plot {
    id: PlotId,
    plant_id: PlantId,
    set_index: usize,
    position: Position,
    soil: SoilState,
    plant: GrowthAutomaton,
}

impl Plot {
    /// Plot identifier.
    pub const fn id(&self) -> PlotId {
        self.id
    }

    /// Identifier of the plant currently growing here.
    pub const fn plant_id(&self) -> PlantId {
        self.plant_id
    }

    /// Position of the plant block.
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Soil under the plant.
    pub const fn soil(&self) -> &SoilState {
        &self.soil
    }

    /// The plant.
    pub const fn plant(&self) -> &GrowthAutomaton {
        &self.plant
    }
}

/// [`PlantSite`] for one plot, backed by the field's block map.
struct PlotSite<'a> {
    position: Position,
    blocks: &'a mut BTreeMap<Position, Block>,
}

impl PlantSite for PlotSite<'_> {
    fn position(&self) -> Position {
        self.position
    }

    fn is_empty(&self, pos: Position) -> bool {
        pos.y > GROUND_Y && !self.blocks.contains_key(&pos)
    }

    fn is_solid(&self, pos: Position) -> bool {
        pos.y <= GROUND_Y
    }

    fn place_produce(&mut self, pos: Position) -> bool {
        if !self.is_empty(pos) {
            return false;
        }
        self.blocks.insert(pos, Block::Produce);
        true
    }
}

// ---------------------------------------------------------------------------
// FieldReport
// ---------------------------------------------------------------------------

/// Totals from one [`Field::run`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldReport {
    /// Ticks run.
    pub ticks: u64,
    /// Plots in the field.
    pub plots: usize,
    /// Stage advances from random ticks.
    pub growth_steps: u64,
    /// Successful forced growths from fertilizer.
    pub fertilized: u64,
    /// Plants harvested for produce units.
    pub harvests: u64,
    /// Produce units released by harvests.
    pub produce_units: u64,
    /// Hunger points restored by eaten produce.
    pub food_value: u64,
    /// Metallic produce blocks destroyed.
    pub detonations: u64,
    /// Seeds spawned, per plant set.
    pub seeds: BTreeMap<String, u64>,
}

impl FieldReport {
    /// Seeds spawned across all plant sets.
    pub fn total_seeds(&self) -> u64 {
        self.seeds.values().fold(0, |acc, n| acc.saturating_add(*n))
    }

    fn record(&mut self, spawns: &[SeedSpawn]) {
        for spawn in spawns {
            let count = self.seeds.entry(spawn.plant_set.clone()).or_default();
            *count = count.saturating_add(1);
        }
    }

    /// Log the totals at info.
    pub fn log(&self) {
        tracing::info!(
            ticks = self.ticks,
            plots = self.plots,
            growth_steps = self.growth_steps,
            fertilized = self.fertilized,
            harvests = self.harvests,
            produce_units = self.produce_units,
            food_value = self.food_value,
            detonations = self.detonations,
            seeds = self.total_seeds(),
            "field run complete"
        );
        for (name, count) in &self.seeds {
            tracing::info!(plant_set = %name, seeds = count, "seeds spawned");
        }
    }
}

// ---------------------------------------------------------------------------
// Field
// ---------------------------------------------------------------------------

/// The plots, the blocks around them, and the propagation engine the
/// harvest loop reports to.
#[derive(Debug)]
pub struct Field {
    engine: SeedPropagationEngine,
    foods: BTreeMap<String, ProduceProperties>,
    soil: SoilConfig,
    plots: Vec<Plot>,
    blocks: BTreeMap<Position, Block>,
}

impl Field {
    /// Plant `plots_per_set` plots for every registered set, one row per
    /// set, each on fresh soil.
    pub fn plant(
        engine: SeedPropagationEngine,
        foods: BTreeMap<String, ProduceProperties>,
        soil: SoilConfig,
        plots_per_set: u32,
    ) -> Self {
        let mut plots = Vec::new();
        let mut blocks = BTreeMap::new();
        for (set_index, set) in engine.registry().iter().enumerate() {
            let row = i32::try_from(set_index).unwrap_or(i32::MAX);
            for column in 0..plots_per_set {
                let column = i32::try_from(column).unwrap_or(i32::MAX);
                let position = Position::new(
                    column.saturating_mul(PLOT_SPACING),
                    GROUND_Y.saturating_add(1),
                    row.saturating_mul(PLOT_SPACING),
                );
                blocks.insert(position, Block::Plant);
                plots.push(Plot {
                    id: PlotId::new(),
                    plant_id: PlantId::new(),
                    set_index,
                    position,
                    soil: SoilState::new(soil.initial_fertility),
                    plant: set.new_plant(),
                });
            }
        }

        tracing::debug!(plots = plots.len(), "field planted");
        Self {
            engine,
            foods,
            soil,
            plots,
            blocks,
        }
    }

    /// The plots, in planting order.
    pub fn plots(&self) -> &[Plot] {
        &self.plots
    }

    /// Number of metallic produce blocks currently standing.
    pub fn produce_blocks(&self) -> usize {
        self.blocks.values().filter(|b| **b == Block::Produce).count()
    }

    /// Run `ticks` random ticks over every plot.
    pub fn run(&mut self, ticks: u64, sampler: &mut impl Sampler) -> FieldReport {
        let Self {
            engine,
            foods,
            soil: soil_config,
            plots,
            blocks,
        } = self;

        let mut report = FieldReport {
            ticks,
            plots: plots.len(),
            ..FieldReport::default()
        };

        for tick in 1..=ticks {
            let fertilize = tick.checked_rem(soil_config.fertilizer_interval) == Some(0);
            for plot in plots.iter_mut() {
                let Some(set) = engine.registry().get(plot.set_index) else {
                    continue;
                };
                let props = set.properties();
                let mut site = PlotSite {
                    position: plot.position,
                    blocks: &mut *blocks,
                };

                if fertilize {
                    plot.soil.enrich(soil_config.fertilizer_amount);
                    if plot.plant.force_growth(props, sampler, &mut site) {
                        report.fertilized = report.fertilized.saturating_add(1);
                    }
                }

                if plot.plant.tick(props, plot.soil.fertility(), sampler, &mut site) {
                    report.growth_steps = report.growth_steps.saturating_add(1);
                }

                if plot.plant.is_mature() {
                    let spawns = harvest(plot, set, foods, soil_config, blocks, &mut report, engine, sampler);
                    report.record(&spawns);
                }
            }
        }
        report
    }
}

/// Harvest a mature plot and report the produce to the engine.
#[allow(clippy::too_many_arguments)]
fn harvest(
    plot: &mut Plot,
    set: &PlantSet,
    foods: &BTreeMap<String, ProduceProperties>,
    soil_config: &SoilConfig,
    blocks: &mut BTreeMap<Position, Block>,
    report: &mut FieldReport,
    engine: &SeedPropagationEngine,
    sampler: &mut impl Sampler,
) -> Vec<SeedSpawn> {
    let position = plot.position;
    let event = match set.archetype() {
        Archetype::Biochemical | Archetype::Crystalline => {
            let units = plot.plant.on_harvest(set.properties());
            report.harvests = report.harvests.saturating_add(1);
            report.produce_units = report.produce_units.saturating_add(u64::from(units));
            plot.soil.deplete(soil_config.depletion_per_unit * f64::from(units));

            if set.archetype() == Archetype::Biochemical {
                if let Some(food) = foods.get(set.name()) {
                    let value = u64::from(food.food_value()).saturating_mul(u64::from(units));
                    report.food_value = report.food_value.saturating_add(value);
                }
                WorldEvent::ItemUseFinished {
                    item: set.produce().clone(),
                    units,
                    position,
                }
            } else {
                plot.plant = set.new_plant();
                plot.plant_id = PlantId::new();
                WorldEvent::ItemExpiredInLiquid {
                    item: set.produce().clone(),
                    units,
                    position,
                }
            }
        }
        Archetype::Metallic => {
            let Some(direction) = plot.plant.produce_direction() else {
                return Vec::new();
            };
            let produce_at = position.offset(direction);
            blocks.remove(&produce_at);
            plot.plant.on_produce_destroyed();
            report.detonations = report.detonations.saturating_add(1);
            WorldEvent::BlocksDetonated {
                blocks: vec![(set.produce().clone(), produce_at)],
            }
        }
    };

    tracing::debug!(
        plot = %plot.id,
        plant = %plot.plant_id,
        plant_set = set.name(),
        channel = %event.channel(),
        "harvested"
    );
    engine.dispatch(&event, sampler)
}
