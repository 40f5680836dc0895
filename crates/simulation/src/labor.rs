//! Labor exchange and commute routing.
//!
//! Once per simulated day: a census grows resident counts toward capacity,
//! every tile with residents seeks the nearest tile with open jobs by
//! Manhattan distance, and each found commute path adds the seeker's
//! resident count to the per-day road usage counters. Road usage is the
//! congestion signal consumers read; congestion fields on road tiles are
//! not recomputed here.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::capabilities::tile_registry;
use crate::config::IMMIGRATION_PER_DAY;
use crate::grid::CityMap;
use crate::pathfind;

/// Per-tile instance counters, created lazily on first census and never
/// removed. `filled_jobs` is set by external collaborators; this core only
/// reads it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileOccupancy {
    pub residents: u32,
    pub workers: u32,
    pub filled_jobs: u32,
}

/// Run one day of census, matching, and routing. `road_usage` is cleared
/// and rebuilt.
pub fn run_labor_exchange(
    map: &CityMap,
    occupancy: &mut HashMap<(i32, i32), TileOccupancy>,
    road_usage: &mut HashMap<(i32, i32), u32>,
) {
    road_usage.clear();

    let registry = tile_registry();
    let mut seekers: Vec<((i32, i32), u32)> = Vec::new();
    let mut employers: Vec<((i32, i32), u32)> = Vec::new();

    // Census and immigration.
    for (x, y) in map.positions() {
        let Some(def) = registry.def(map.surface(x, y)) else {
            continue;
        };

        if let Some(pop) = def.population {
            let entry = occupancy.entry((x, y)).or_default();
            entry.residents = (entry.residents + IMMIGRATION_PER_DAY).min(pop.capacity);
            if entry.residents > 0 {
                seekers.push(((x, y), entry.residents));
            }
        }

        if let Some(jobs) = def.jobs {
            let entry = occupancy.entry((x, y)).or_default();
            let open = jobs.capacity.saturating_sub(entry.filled_jobs);
            if open > 0 {
                employers.push(((x, y), open));
            }
        }
    }

    // Match each seeker to the nearest open employer, then route the
    // commute over the road network.
    for (seeker, residents) in seekers {
        let mut best: Option<(i32, i32)> = None;
        let mut best_dist = u32::MAX;
        for &(employer, _) in &employers {
            let dist = seeker.0.abs_diff(employer.0) + seeker.1.abs_diff(employer.1);
            if dist < best_dist {
                best_dist = dist;
                best = Some(employer);
            }
        }

        let Some(employer) = best else {
            continue;
        };
        let Some(path) = pathfind::find_path(map, seeker, employer) else {
            // No route today; the seeker tries again tomorrow.
            continue;
        };
        for pos in path {
            *road_usage.entry(pos).or_insert(0) += residents;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::{TileId, LAYER_SURFACE};

    fn commuter_town() -> CityMap {
        // House at (0, 1), road from (1, 1) to (4, 1), shop at (5, 1).
        let mut map = CityMap::new(8, 8);
        map.set_tile(0, 1, TileId::ResidentialLvl1, LAYER_SURFACE);
        for x in 1..=4 {
            map.set_tile(x, 1, TileId::Road, LAYER_SURFACE);
        }
        map.set_tile(5, 1, TileId::CommercialLvl1, LAYER_SURFACE);
        map
    }

    #[test]
    fn test_immigration_fills_toward_capacity() {
        let map = commuter_town();
        let mut occupancy = HashMap::new();
        let mut road_usage = HashMap::new();

        run_labor_exchange(&map, &mut occupancy, &mut road_usage);
        assert_eq!(occupancy[&(0, 1)].residents, 1);

        // Far beyond capacity days later, residents stay capped at 20.
        for _ in 0..40 {
            run_labor_exchange(&map, &mut occupancy, &mut road_usage);
        }
        assert_eq!(occupancy[&(0, 1)].residents, 20);
    }

    #[test]
    fn test_commute_accumulates_road_usage() {
        let map = commuter_town();
        let mut occupancy = HashMap::new();
        let mut road_usage = HashMap::new();

        run_labor_exchange(&map, &mut occupancy, &mut road_usage);

        // One resident commuted over the whole path, endpoints included.
        for x in 0..=5 {
            assert_eq!(road_usage.get(&(x, 1)), Some(&1), "missing usage at x={x}");
        }
        // Usage is rebuilt, not accumulated across days.
        run_labor_exchange(&map, &mut occupancy, &mut road_usage);
        assert_eq!(road_usage.get(&(0, 1)), Some(&2));
    }

    #[test]
    fn test_no_route_no_usage() {
        let mut map = CityMap::new(8, 8);
        map.set_tile(0, 0, TileId::ResidentialLvl1, LAYER_SURFACE);
        map.set_tile(7, 7, TileId::CommercialLvl1, LAYER_SURFACE);
        let mut occupancy = HashMap::new();
        let mut road_usage = HashMap::new();

        run_labor_exchange(&map, &mut occupancy, &mut road_usage);
        assert!(road_usage.is_empty());
        // The census still ran.
        assert_eq!(occupancy[&(0, 0)].residents, 1);
    }

    #[test]
    fn test_seeker_picks_nearest_employer() {
        let mut map = CityMap::new(16, 16);
        map.set_tile(0, 1, TileId::ResidentialLvl1, LAYER_SURFACE);
        for x in 1..=10 {
            map.set_tile(x, 1, TileId::Road, LAYER_SURFACE);
        }
        map.set_tile(3, 0, TileId::CommercialLvl1, LAYER_SURFACE);
        map.set_tile(11, 1, TileId::IndustrialLvl1, LAYER_SURFACE);

        let mut occupancy = HashMap::new();
        let mut road_usage = HashMap::new();
        run_labor_exchange(&map, &mut occupancy, &mut road_usage);

        // The shop at distance 4 wins over the factory at distance 11.
        assert!(road_usage.contains_key(&(3, 0)));
        assert!(!road_usage.contains_key(&(11, 1)));
    }

    #[test]
    fn test_filled_jobs_close_an_employer() {
        let mut map = CityMap::new(8, 8);
        map.set_tile(0, 1, TileId::ResidentialLvl1, LAYER_SURFACE);
        for x in 1..=4 {
            map.set_tile(x, 1, TileId::Road, LAYER_SURFACE);
        }
        map.set_tile(5, 1, TileId::CommercialLvl1, LAYER_SURFACE);

        let mut occupancy = HashMap::new();
        occupancy.insert(
            (5, 1),
            TileOccupancy {
                filled_jobs: 15,
                ..TileOccupancy::default()
            },
        );
        let mut road_usage = HashMap::new();

        run_labor_exchange(&map, &mut occupancy, &mut road_usage);
        // The only employer is full, so nobody commutes.
        assert!(road_usage.is_empty());
    }

    #[test]
    fn test_zones_participate_before_developing() {
        // Undeveloped zones already hold a little population and a few jobs.
        let mut map = CityMap::new(8, 8);
        map.set_tile(0, 1, TileId::Residential, LAYER_SURFACE);
        for x in 1..=3 {
            map.set_tile(x, 1, TileId::Road, LAYER_SURFACE);
        }
        map.set_tile(4, 1, TileId::Commercial, LAYER_SURFACE);

        let mut occupancy = HashMap::new();
        let mut road_usage = HashMap::new();
        run_labor_exchange(&map, &mut occupancy, &mut road_usage);

        assert_eq!(occupancy[&(0, 1)].residents, 1);
        assert!(road_usage.contains_key(&(4, 1)));
    }
}
