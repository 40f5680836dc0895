pub const MAP_WIDTH: u32 = 64;
pub const MAP_HEIGHT: u32 = 64;

/// Probability that a cell is seeded as water during terrain generation.
pub const WATER_THRESHOLD: f32 = 0.1;
pub const SMOOTHING_PASSES: u32 = 3;
/// A water cell survives a smoothing pass with at least this many water
/// neighbors in its 8-neighborhood.
pub const WATER_SURVIVE_AT: u32 = 2;
/// A dry cell becomes water with at least this many water neighbors.
pub const WATER_BORN_AT: u32 = 5;
/// Half-width of the lake forced onto maps that generate no water at all.
pub const FALLBACK_LAKE_RADIUS: i32 = 2;

/// Seconds of accumulated time per simulation step.
pub const TICK_SECONDS: f32 = 1.0;
/// Steps per simulated day. Labor exchange and immigration run on day
/// boundaries.
pub const TICKS_PER_DAY: u64 = 1;

/// Base promotion probability per step for a road-connected zone, scaled by
/// the zone's growth chance.
pub const GROWTH_BASE_CHANCE: f32 = 0.1;

/// Power and water coverage passes per simulation step.
pub const UTILITY_PASSES: u32 = 2;

/// New residents per populated tile per day, up to capacity.
pub const IMMIGRATION_PER_DAY: u32 = 1;

/// Seed used when no explicit seed is provided.
pub const DEFAULT_SEED: u64 = 42;
