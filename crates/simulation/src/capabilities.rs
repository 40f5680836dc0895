//! Tile capability composition.
//!
//! Every tile type carries a fixed set of typed capabilities: build cost,
//! growth target, render hints, utility roles, population, jobs, and road
//! attributes. The registry composes them once at startup into a dense table
//! indexed by raw tile id; lookups that miss return `None` rather than a
//! defaulted value, so callers can tell "absent" from "zero".

use std::sync::LazyLock;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::tiles::TileId;

// ---------------------------------------------------------------------------
// Capability values
// ---------------------------------------------------------------------------

/// Placement cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cost(pub u32);

/// An undeveloped zone's promotion target and relative chance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Growth {
    pub target: TileId,
    pub chance: f32,
}

/// Render hints stored alongside the simulation data for map collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderInfo {
    pub color: [f32; 3],
    pub height: f32,
}

/// Display name and tooltip text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Description {
    pub name: &'static str,
    pub info: &'static str,
}

/// Generates power.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerSource {
    pub capacity: u32,
    pub radius: u32,
}

impl Default for PowerSource {
    fn default() -> Self {
        Self {
            capacity: 1000,
            radius: 4,
        }
    }
}

/// Consumes power.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerConsumer {
    pub demand: u32,
}

impl Default for PowerConsumer {
    fn default() -> Self {
        Self { demand: 10 }
    }
}

/// Generates water (pumps).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaterSource {
    pub capacity: u32,
    pub radius: u32,
}

impl Default for WaterSource {
    fn default() -> Self {
        Self {
            capacity: 1000,
            radius: 6,
        }
    }
}

/// Consumes water.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaterConsumer {
    pub demand: u32,
}

impl Default for WaterConsumer {
    fn default() -> Self {
        Self { demand: 10 }
    }
}

/// Produces sewage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SewerSource {
    pub output: u32,
}

impl Default for SewerSource {
    fn default() -> Self {
        Self { output: 10 }
    }
}

/// Residents and workers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Population {
    pub capacity: u32,
    pub residents: u32,
    pub workers: u32,
}

/// Workplaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Jobs {
    pub capacity: u32,
    pub filled: u32,
}

/// Traffic attributes of a road tile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoadStats {
    pub capacity: u32,
    pub speed_limit: f32,
    /// 0.0 to 1.0. Not recomputed by this core; consumers derive it from
    /// road usage counters.
    pub congestion: f32,
}

impl Default for RoadStats {
    fn default() -> Self {
        Self {
            capacity: 100,
            speed_limit: 1.0,
            congestion: 0.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Kind-keyed lookup
// ---------------------------------------------------------------------------

/// Names one capability slot for dynamic lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CapabilityKind {
    Cost,
    Growth,
    RenderInfo,
    Description,
    PowerSource,
    PowerConsumer,
    PowerConductor,
    WaterSource,
    WaterConsumer,
    WaterConductor,
    SewerSource,
    SewerSink,
    SewerConductor,
    Population,
    Jobs,
    RoadStats,
}

/// A capability value tagged by kind. Conductor and sink roles are markers
/// and carry no data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Capability {
    Cost(Cost),
    Growth(Growth),
    RenderInfo(RenderInfo),
    Description(Description),
    PowerSource(PowerSource),
    PowerConsumer(PowerConsumer),
    PowerConductor,
    WaterSource(WaterSource),
    WaterConsumer(WaterConsumer),
    WaterConductor,
    SewerSource(SewerSource),
    SewerSink,
    SewerConductor,
    Population(Population),
    Jobs(Jobs),
    RoadStats(RoadStats),
}

// ---------------------------------------------------------------------------
// Tile definitions
// ---------------------------------------------------------------------------

/// The composed capability record of one tile type. Immutable once the
/// registry is built.
#[derive(Debug, Clone, Default)]
pub struct TileDef {
    pub description: Option<Description>,
    pub render: Option<RenderInfo>,
    pub cost: Option<Cost>,
    pub growth: Option<Growth>,
    pub power_source: Option<PowerSource>,
    pub power_consumer: Option<PowerConsumer>,
    pub power_conductor: bool,
    pub water_source: Option<WaterSource>,
    pub water_consumer: Option<WaterConsumer>,
    pub water_conductor: bool,
    pub sewer_source: Option<SewerSource>,
    pub sewer_sink: bool,
    pub sewer_conductor: bool,
    pub population: Option<Population>,
    pub jobs: Option<Jobs>,
    pub road: Option<RoadStats>,
}

impl TileDef {
    pub fn get(&self, kind: CapabilityKind) -> Option<Capability> {
        match kind {
            CapabilityKind::Cost => self.cost.map(Capability::Cost),
            CapabilityKind::Growth => self.growth.map(Capability::Growth),
            CapabilityKind::RenderInfo => self.render.map(Capability::RenderInfo),
            CapabilityKind::Description => self.description.map(Capability::Description),
            CapabilityKind::PowerSource => self.power_source.map(Capability::PowerSource),
            CapabilityKind::PowerConsumer => self.power_consumer.map(Capability::PowerConsumer),
            CapabilityKind::PowerConductor => {
                self.power_conductor.then_some(Capability::PowerConductor)
            }
            CapabilityKind::WaterSource => self.water_source.map(Capability::WaterSource),
            CapabilityKind::WaterConsumer => self.water_consumer.map(Capability::WaterConsumer),
            CapabilityKind::WaterConductor => {
                self.water_conductor.then_some(Capability::WaterConductor)
            }
            CapabilityKind::SewerSource => self.sewer_source.map(Capability::SewerSource),
            CapabilityKind::SewerSink => self.sewer_sink.then_some(Capability::SewerSink),
            CapabilityKind::SewerConductor => {
                self.sewer_conductor.then_some(Capability::SewerConductor)
            }
            CapabilityKind::Population => self.population.map(Capability::Population),
            CapabilityKind::Jobs => self.jobs.map(Capability::Jobs),
            CapabilityKind::RoadStats => self.road.map(Capability::RoadStats),
        }
    }

    pub fn has(&self, kind: CapabilityKind) -> bool {
        self.get(kind).is_some()
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Dense capability table indexed by raw tile id. Built once; never mutated
/// afterwards.
pub struct TileRegistry {
    defs: [Option<TileDef>; TileId::COUNT],
}

impl TileRegistry {
    fn new() -> Self {
        Self {
            defs: std::array::from_fn(|_| None),
        }
    }

    /// Registering the same tile type twice is a caller error: the second
    /// definition is ignored with a warning, and debug builds assert.
    fn register(&mut self, tile: TileId, def: TileDef) {
        let slot = &mut self.defs[tile.raw() as usize];
        if slot.is_some() {
            warn!(
                "TileRegistry: duplicate definition for {:?}, ignoring the second",
                tile
            );
            debug_assert!(false, "TileRegistry: duplicate definition for {:?}", tile);
            return;
        }
        *slot = Some(def);
    }

    pub fn def(&self, tile: TileId) -> Option<&TileDef> {
        self.defs[tile.raw() as usize].as_ref()
    }

    pub fn get(&self, tile: TileId, kind: CapabilityKind) -> Option<Capability> {
        self.def(tile).and_then(|def| def.get(kind))
    }

    pub fn has(&self, tile: TileId, kind: CapabilityKind) -> bool {
        self.def(tile).is_some_and(|def| def.has(kind))
    }

    // Convenience accessors with the fallbacks map collaborators expect.

    pub fn name(&self, tile: TileId) -> &'static str {
        self.def(tile)
            .and_then(|def| def.description)
            .map_or("Unknown", |desc| desc.name)
    }

    pub fn cost(&self, tile: TileId) -> u32 {
        self.def(tile).and_then(|def| def.cost).map_or(0, |c| c.0)
    }

    pub fn color(&self, tile: TileId) -> [f32; 3] {
        self.def(tile)
            .and_then(|def| def.render)
            .map_or([1.0, 0.0, 1.0], |r| r.color)
    }

    pub fn height(&self, tile: TileId) -> f32 {
        self.def(tile)
            .and_then(|def| def.render)
            .map_or(0.1, |r| r.height)
    }

    pub fn growth_target(&self, tile: TileId) -> TileId {
        self.def(tile)
            .and_then(|def| def.growth)
            .map_or(TileId::Empty, |g| g.target)
    }
}

fn builtin() -> TileRegistry {
    let desc = |name: &'static str| {
        Some(Description { name, info: "" })
    };
    let render = |color: [f32; 3], height: f32| Some(RenderInfo { color, height });
    let cost = |amount: u32| Some(Cost(amount));

    let mut registry = TileRegistry::new();

    // Empty deliberately has no definition: it is the sentinel for
    // out-of-bounds and undefined-layer reads.

    registry.register(
        TileId::Dirt,
        TileDef {
            description: desc("Dirt"),
            render: render([0.4, 0.3, 0.2], 0.1),
            cost: cost(0),
            ..TileDef::default()
        },
    );

    registry.register(
        TileId::Water,
        TileDef {
            description: desc("Water"),
            render: render([0.2, 0.4, 0.8], 0.1),
            cost: cost(0),
            ..TileDef::default()
        },
    );

    registry.register(
        TileId::Road,
        TileDef {
            description: desc("Road"),
            render: render([0.2, 0.2, 0.2], 0.15),
            cost: cost(10),
            road: Some(RoadStats::default()),
            ..TileDef::default()
        },
    );

    registry.register(
        TileId::PowerLine,
        TileDef {
            description: desc("Power Line"),
            render: render([0.9, 0.9, 0.4], 0.4),
            cost: cost(5),
            power_conductor: true,
            ..TileDef::default()
        },
    );

    registry.register(
        TileId::WaterPump,
        TileDef {
            description: desc("Water Pump"),
            render: render([0.2, 0.6, 1.0], 0.8),
            cost: cost(500),
            water_source: Some(WaterSource::default()),
            power_consumer: Some(PowerConsumer { demand: 50 }),
            power_conductor: true,
            ..TileDef::default()
        },
    );

    registry.register(
        TileId::WaterPipe,
        TileDef {
            description: desc("Water Pipe"),
            render: render([0.2, 0.6, 1.0], 0.2),
            cost: cost(5),
            water_conductor: true,
            ..TileDef::default()
        },
    );

    registry.register(
        TileId::SewerPipe,
        TileDef {
            description: desc("Sewer Pipe"),
            render: render([0.4, 0.3, 0.1], 0.2),
            cost: cost(5),
            sewer_conductor: true,
            ..TileDef::default()
        },
    );

    // Undeveloped zones conduct all three utilities so service can reach
    // the buildings they grow into.

    registry.register(
        TileId::Residential,
        TileDef {
            description: desc("Residential (Zone)"),
            render: render([0.0, 0.4, 0.0], 0.1),
            cost: cost(100),
            growth: Some(Growth {
                target: TileId::ResidentialLvl1,
                chance: 1.0,
            }),
            power_conductor: true,
            water_conductor: true,
            sewer_conductor: true,
            population: Some(Population {
                capacity: 5,
                ..Population::default()
            }),
            ..TileDef::default()
        },
    );

    registry.register(
        TileId::Commercial,
        TileDef {
            description: desc("Commercial (Zone)"),
            render: render([0.0, 0.0, 0.4], 0.1),
            cost: cost(100),
            growth: Some(Growth {
                target: TileId::CommercialLvl1,
                chance: 1.0,
            }),
            power_conductor: true,
            water_conductor: true,
            sewer_conductor: true,
            jobs: Some(Jobs {
                capacity: 5,
                ..Jobs::default()
            }),
            ..TileDef::default()
        },
    );

    registry.register(
        TileId::Industrial,
        TileDef {
            description: desc("Industrial (Zone)"),
            render: render([0.4, 0.4, 0.0], 0.1),
            cost: cost(100),
            growth: Some(Growth {
                target: TileId::IndustrialLvl1,
                chance: 1.0,
            }),
            power_conductor: true,
            water_conductor: true,
            sewer_conductor: true,
            jobs: Some(Jobs {
                capacity: 8,
                ..Jobs::default()
            }),
            ..TileDef::default()
        },
    );

    registry.register(
        TileId::ResidentialLvl1,
        TileDef {
            description: desc("Small House"),
            render: render([0.0, 0.8, 0.0], 0.5),
            cost: cost(0),
            power_consumer: Some(PowerConsumer::default()),
            power_conductor: true,
            water_consumer: Some(WaterConsumer::default()),
            water_conductor: true,
            sewer_source: Some(SewerSource::default()),
            sewer_conductor: true,
            population: Some(Population {
                capacity: 20,
                ..Population::default()
            }),
            ..TileDef::default()
        },
    );

    registry.register(
        TileId::CommercialLvl1,
        TileDef {
            description: desc("Small Shop"),
            render: render([0.0, 0.0, 0.8], 0.6),
            cost: cost(0),
            power_consumer: Some(PowerConsumer::default()),
            power_conductor: true,
            water_consumer: Some(WaterConsumer::default()),
            water_conductor: true,
            sewer_source: Some(SewerSource::default()),
            sewer_conductor: true,
            jobs: Some(Jobs {
                capacity: 15,
                ..Jobs::default()
            }),
            ..TileDef::default()
        },
    );

    registry.register(
        TileId::IndustrialLvl1,
        TileDef {
            description: desc("Factory"),
            render: render([0.8, 0.8, 0.0], 0.7),
            cost: cost(0),
            power_consumer: Some(PowerConsumer::default()),
            power_conductor: true,
            water_consumer: Some(WaterConsumer::default()),
            water_conductor: true,
            sewer_source: Some(SewerSource::default()),
            sewer_conductor: true,
            jobs: Some(Jobs {
                capacity: 30,
                ..Jobs::default()
            }),
            ..TileDef::default()
        },
    );

    registry.register(
        TileId::PowerPlant,
        TileDef {
            description: desc("Power Plant"),
            render: render([0.8, 0.2, 0.2], 2.0),
            cost: cost(1000),
            power_source: Some(PowerSource::default()),
            power_conductor: true,
            ..TileDef::default()
        },
    );

    registry
}

static REGISTRY: LazyLock<TileRegistry> = LazyLock::new(builtin);

/// The process-wide tile registry. Built on first access, immutable after.
pub fn tile_registry() -> &'static TileRegistry {
    &REGISTRY
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
