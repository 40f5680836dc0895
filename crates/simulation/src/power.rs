//! Power coverage.
//!
//! Plants on the surface seed a 4-connected flood fill that spreads through
//! conducting tiles: lines on the air layer or conducting buildings on the
//! surface. A consuming tile that touches the powered network is serviced
//! without extending it. The set is recomputed from scratch on every call,
//! so an unchanged map always yields the same result.

use std::collections::{HashSet, VecDeque};

use crate::capabilities::{tile_registry, CapabilityKind};
use crate::grid::CityMap;
use crate::tiles::{LAYER_AIR, LAYER_SURFACE};

/// Compute the set of powered tiles.
pub fn powered_tiles(map: &CityMap) -> HashSet<(i32, i32)> {
    let registry = tile_registry();
    let mut powered = HashSet::new();
    let mut queue = VecDeque::new();

    for (x, y) in map.positions() {
        if registry.has(map.surface(x, y), CapabilityKind::PowerSource) {
            powered.insert((x, y));
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

            let conducts = registry.has(map.get_tile(nx, ny, LAYER_AIR), CapabilityKind::PowerConductor)
                || registry.has(
                    map.get_tile(nx, ny, LAYER_SURFACE),
                    CapabilityKind::PowerConductor,
                );

            if conducts {
                powered.insert((nx, ny));
                visited.insert((nx, ny));
                queue.push_back((nx, ny));
            } else if registry.has(map.surface(nx, ny), CapabilityKind::PowerConsumer) {
                // Serviced by adjacency; consumers do not extend the network.
                powered.insert((nx, ny));
            }
        }
    }

    powered
}
