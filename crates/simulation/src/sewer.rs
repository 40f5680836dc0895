//! Sewage drainage.
//!
//! The map boundary acts as the implicit drainage sink: sewer pipes on the
//! sewer-mains layer that touch an edge row or column seed the fill, which
//! then spreads backwards through connected pipes. Only the sewer-mains
//! layer is consulted. The set is recomputed from scratch on every call.

use std::collections::{HashSet, VecDeque};

use crate::capabilities::{tile_registry, CapabilityKind};
use crate::grid::CityMap;
use crate::tiles::LAYER_SEWER_MAINS;

/// Compute the set of drained tiles.
pub fn drained_tiles(map: &CityMap) -> HashSet<(i32, i32)> {
    let registry = tile_registry();
    let mut drained = HashSet::new();
    let mut queue = VecDeque::new();

    let right = map.width() as i32 - 1;
    let bottom = map.height() as i32 - 1;

    for (x, y) in map.positions() {
        let on_edge = x == 0 || y == 0 || x == right || y == bottom;
        if on_edge
            && registry.has(
                map.get_tile(x, y, LAYER_SEWER_MAINS),
                CapabilityKind::SewerConductor,
            )
        {
            drained.insert((x, y));
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
            if registry.has(
                map.get_tile(nx, ny, LAYER_SEWER_MAINS),
                CapabilityKind::SewerConductor,
            ) {
                drained.insert((nx, ny));
                visited.insert((nx, ny));
                queue.push_back((nx, ny));
            }
        }
    }

    drained
}
