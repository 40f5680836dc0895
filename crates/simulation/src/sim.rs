//! Simulation state and the tick driver.
//!
//! [`Simulation`] owns the map and everything derived from it: utility
//! coverage sets, the per-tile occupancy census, daily road usage, and the
//! aggregate population. All mutation funnels through [`Simulation::tick`];
//! collaborators read the derived state between ticks (single-writer,
//! snapshot-read at tick boundaries, no internal locking).

use std::collections::{HashMap, HashSet};

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::{
    DEFAULT_SEED, MAP_HEIGHT, MAP_WIDTH, TICKS_PER_DAY, TICK_SECONDS, UTILITY_PASSES,
    WATER_THRESHOLD,
};
use crate::grid::CityMap;
use crate::labor::{self, TileOccupancy};
use crate::{growth, power, sewer, terrain, water};

#[derive(Resource)]
pub struct Simulation {
    pub map: CityMap,
    rng: ChaCha8Rng,
    tick_timer: f32,
    tick_seconds: f32,
    ticks: u64,
    /// Simulated days elapsed.
    pub day: u32,
    /// Sum of residents across the occupancy census.
    pub population: u32,
    pub powered_tiles: HashSet<(i32, i32)>,
    pub watered_tiles: HashSet<(i32, i32)>,
    pub drained_tiles: HashSet<(i32, i32)>,
    /// Lazily-created per-tile counters; grows for the life of the session.
    pub occupancy: HashMap<(i32, i32), TileOccupancy>,
    /// Trips per coordinate for the current day.
    pub road_usage: HashMap<(i32, i32), u32>,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(MAP_WIDTH, MAP_HEIGHT, DEFAULT_SEED)
    }
}

impl Simulation {
    /// New session: generates terrain exactly once, then all map mutation
    /// goes through `set_tile` calls and the tick loop.
    pub fn new(width: u32, height: u32, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut map = CityMap::new(width, height);
        terrain::generate_terrain(&mut map, WATER_THRESHOLD, &mut rng);
        Self::with_rng(map, rng)
    }

    /// Wrap an existing map (for example one restored from a payload)
    /// without regenerating terrain.
    pub fn from_map(map: CityMap, seed: u64) -> Self {
        Self::with_rng(map, ChaCha8Rng::seed_from_u64(seed))
    }

    fn with_rng(map: CityMap, rng: ChaCha8Rng) -> Self {
        Self {
            map,
            rng,
            tick_timer: 0.0,
            tick_seconds: TICK_SECONDS,
            ticks: 0,
            day: 0,
            population: 0,
            powered_tiles: HashSet::new(),
            watered_tiles: HashSet::new(),
            drained_tiles: HashSet::new(),
            occupancy: HashMap::new(),
            road_usage: HashMap::new(),
        }
    }

    /// Steps completed so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Accumulate `dt` seconds of time. When the accumulated time crosses
    /// the tick interval, exactly one full step executes and the timer
    /// resets. Returns true if the map changed.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.tick_timer += dt;
        if self.tick_timer < self.tick_seconds {
            return false;
        }
        self.tick_timer = 0.0;
        self.step()
    }

    /// One full simulation step: growth, utility coverage, and on day
    /// boundaries the labor exchange.
    fn step(&mut self) -> bool {
        let changed = growth::grow_zones(&mut self.map, &mut self.rng);

        // Power and water are recomputed twice per step, sewage once. Each
        // pass is a full recompute, so the repeat is idempotent on an
        // unchanged map.
        for _ in 0..UTILITY_PASSES {
            self.powered_tiles = power::powered_tiles(&self.map);
            self.watered_tiles = water::watered_tiles(&self.map);
        }
        self.drained_tiles = sewer::drained_tiles(&self.map);

        self.ticks += 1;
        if self.ticks.is_multiple_of(TICKS_PER_DAY) {
            self.day += 1;
            labor::run_labor_exchange(&self.map, &mut self.occupancy, &mut self.road_usage);
        }

        self.population = self.occupancy.values().map(|o| o.residents).sum();
        changed
    }
}
