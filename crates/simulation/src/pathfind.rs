//! Road routing.
//!
//! A* over 4-connected surface tiles, restricted to roads with two
//! exceptions: the trip endpoints may be non-road tiles (buildings sit next
//! to the network, not on it). Edge cost is the reciprocal of the
//! destination tile's speed limit; tiles without road attributes default to
//! speed 1.0. "No path" is a normal outcome, not an error.

use pathfinding::prelude::astar;

use crate::capabilities::tile_registry;
use crate::grid::CityMap;

/// Fixed-point scale for edge costs; `astar` needs ordered integer costs.
const COST_SCALE: u32 = 1000;

/// Full coordinate path from `start` to `goal`, endpoints included, or
/// `None` when the road network does not connect them.
pub fn find_path(map: &CityMap, start: (i32, i32), goal: (i32, i32)) -> Option<Vec<(i32, i32)>> {
    if start == goal {
        return Some(vec![start]);
    }

    let result = astar(
        &start,
        |&(x, y)| {
            let (neighbors, count) = map.neighbors4(x, y);
            neighbors[..count]
                .iter()
                .filter(|&&pos| is_traversable(map, pos, start, goal))
                .map(|&pos| (pos, step_cost(map, pos)))
                .collect::<Vec<_>>()
        },
        |&pos| manhattan(pos, goal) * COST_SCALE,
        |&pos| pos == goal,
    );

    result.map(|(path, _cost)| path)
}

/// Observable trip cost: the sum of `1 / speed_limit` over every edge of
/// the path.
pub fn path_cost(map: &CityMap, path: &[(i32, i32)]) -> f32 {
    path.iter().skip(1).map(|&pos| 1.0 / speed_at(map, pos)).sum()
}

fn is_traversable(map: &CityMap, pos: (i32, i32), start: (i32, i32), goal: (i32, i32)) -> bool {
    pos == start || pos == goal || map.surface(pos.0, pos.1).is_road()
}

fn speed_at(map: &CityMap, pos: (i32, i32)) -> f32 {
    tile_registry()
        .def(map.surface(pos.0, pos.1))
        .and_then(|def| def.road)
        .map_or(1.0, |road| road.speed_limit)
}

fn step_cost(map: &CityMap, pos: (i32, i32)) -> u32 {
    (COST_SCALE as f32 / speed_at(map, pos)).round() as u32
}

fn manhattan(a: (i32, i32), b: (i32, i32)) -> u32 {
    a.0.abs_diff(b.0) + a.1.abs_diff(b.1)
}
