//! Procedural water generation.
//!
//! Cells are seeded as water independently at the configured threshold, then
//! smoothed with a few cellular-automaton passes: isolated water dries up,
//! surrounded dirt floods. A map that ends up fully dry gets a small forced
//! lake at its center so pumps always have water to reference.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::config::{FALLBACK_LAKE_RADIUS, SMOOTHING_PASSES, WATER_BORN_AT, WATER_SURVIVE_AT};
use crate::grid::CityMap;
use crate::tiles::{TileId, LAYER_SURFACE};

/// Run the full water pipeline on a fresh map. Intended to run exactly once
/// per session, right after map construction.
pub fn generate_terrain(map: &mut CityMap, water_threshold: f32, rng: &mut ChaCha8Rng) {
    seed_water(map, water_threshold, rng);
    for _ in 0..SMOOTHING_PASSES {
        smooth_water(map);
    }
    if water_tile_count(map) == 0 {
        force_center_lake(map);
    }
}

/// Number of surface water tiles. Guaranteed non-zero after terrain
/// generation.
pub fn water_tile_count(map: &CityMap) -> usize {
    map.positions()
        .filter(|&(x, y)| map.surface(x, y) == TileId::Water)
        .count()
}

fn seed_water(map: &mut CityMap, threshold: f32, rng: &mut ChaCha8Rng) {
    for (x, y) in map.positions() {
        if rng.gen::<f32>() < threshold {
            map.set_tile(x, y, TileId::Water, LAYER_SURFACE);
        }
    }
}

/// One smoothing pass. Reads a snapshot so every cell sees the same
/// generation.
fn smooth_water(map: &mut CityMap) {
    let snapshot = map.clone();
    for (x, y) in snapshot.positions() {
        let neighbors = water_neighbors(&snapshot, x, y);
        if snapshot.surface(x, y) == TileId::Water {
            if neighbors < WATER_SURVIVE_AT {
                map.set_tile(x, y, TileId::Dirt, LAYER_SURFACE);
            }
        } else if neighbors >= WATER_BORN_AT {
            map.set_tile(x, y, TileId::Water, LAYER_SURFACE);
        }
    }
}

/// Water tiles among the 8 surrounding cells. Off-map cells read as empty
/// and never count.
fn water_neighbors(map: &CityMap, x: i32, y: i32) -> u32 {
    let mut count = 0;
    for dy in -1..=1 {
        for dx in -1..=1 {
            if dx == 0 && dy == 0 {
                continue;
            }
            if map.surface(x + dx, y + dy) == TileId::Water {
                count += 1;
            }
        }
    }
    count
}

fn force_center_lake(map: &mut CityMap) {
    let cx = map.width() as i32 / 2;
    let cy = map.height() as i32 / 2;
    for y in (cy - FALLBACK_LAKE_RADIUS)..=(cy + FALLBACK_LAKE_RADIUS) {
        for x in (cx - FALLBACK_LAKE_RADIUS)..=(cx + FALLBACK_LAKE_RADIUS) {
            map.set_tile(x, y, TileId::Water, LAYER_SURFACE);
        }
    }
}
