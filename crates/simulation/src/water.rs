//! Water coverage.
//!
//! Pumps on the surface seed a 4-connected flood fill through water-bearing
//! tiles: pipes on the water-mains layer or conducting buildings on the
//! surface. Pumps always produce; no adjacency to surface water is required
//! (groundwater model). The set is recomputed from scratch on every call.

use std::collections::{HashSet, VecDeque};

use crate::capabilities::{tile_registry, CapabilityKind};
use crate::grid::CityMap;
use crate::tiles::{LAYER_SURFACE, LAYER_WATER_MAINS};

/// Compute the set of watered tiles.
pub fn watered_tiles(map: &CityMap) -> HashSet<(i32, i32)> {
    let registry = tile_registry();
    let mut watered = HashSet::new();
    let mut queue = VecDeque::new();

    for (x, y) in map.positions() {
        if registry.has(map.surface(x, y), CapabilityKind::WaterSource) {
            watered.insert((x, y));
            queue.push_back((x, y));
        }
    }

    let mut visited: HashSet<(i32, i32)> = queue.iter().copied().collect();

    while let Some((x, y)) = queue.pop_front() {
        let (neighbors, count) = map.neighbors4(x, y);
        for &(nx, ny) in &neighbors[..count] {
            if visited.contains(&(nx, ny)) {
                continue;
            }

            let conducts = registry.has(
                map.get_tile(nx, ny, LAYER_WATER_MAINS),
                CapabilityKind::WaterConductor,
            ) || registry.has(
                map.get_tile(nx, ny, LAYER_SURFACE),
                CapabilityKind::WaterConductor,
            );

            if conducts {
                watered.insert((nx, ny));
                visited.insert((nx, ny));
                queue.push_back((nx, ny));
            }
        }
    }

    watered
}
