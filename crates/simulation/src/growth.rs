//! Zone growth.
//!
//! Undeveloped zones promote to their developed tile once they touch the
//! road network. Each road-connected zone gets one Bernoulli draw per step;
//! zones without road access never grow, no matter how long they wait.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::capabilities::tile_registry;
use crate::config::GROWTH_BASE_CHANCE;
use crate::grid::CityMap;
use crate::tiles::LAYER_SURFACE;

/// Promote road-connected zones toward their growth targets. Returns true
/// if any tile changed.
pub fn grow_zones(map: &mut CityMap, rng: &mut ChaCha8Rng) -> bool {
    let registry = tile_registry();
    let mut changed = false;

    for (x, y) in map.positions() {
        let Some(growth) = registry.def(map.surface(x, y)).and_then(|def| def.growth) else {
            continue;
        };
        if !is_connected_to_road(map, x, y) {
            continue;
        }
        if rng.gen::<f32>() < GROWTH_BASE_CHANCE * growth.chance {
            map.set_tile(x, y, growth.target, LAYER_SURFACE);
            changed = true;
        }
    }

    changed
}

/// True if any cardinal neighbor on the surface is a road.
pub fn is_connected_to_road(map: &CityMap, x: i32, y: i32) -> bool {
    let (neighbors, count) = map.neighbors4(x, y);
    neighbors[..count]
        .iter()
        .any(|&(nx, ny)| map.surface(nx, ny).is_road())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::TileId;
    use rand::SeedableRng;

    #[test]
    fn test_road_adjacency() {
        let mut map = CityMap::new(8, 8);
        map.set_tile(3, 3, TileId::Road, LAYER_SURFACE);
        assert!(is_connected_to_road(&map, 2, 3));
        assert!(is_connected_to_road(&map, 4, 3));
        assert!(is_connected_to_road(&map, 3, 2));
        // Diagonals do not count.
        assert!(!is_connected_to_road(&map, 2, 2));
        assert!(!is_connected_to_road(&map, 5, 5));
    }

    #[test]
    fn test_connected_zone_eventually_grows() {
        let mut map = CityMap::new(8, 8);
        map.set_tile(3, 3, TileId::Road, LAYER_SURFACE);
        map.set_tile(2, 3, TileId::Residential, LAYER_SURFACE);
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        // At 10% per step the chance of 300 misses is below 1e-13.
        let mut grew = false;
        for _ in 0..300 {
            grow_zones(&mut map, &mut rng);
            if map.surface(2, 3) == TileId::ResidentialLvl1 {
                grew = true;
                break;
            }
        }
        assert!(grew, "connected zone never grew");
    }

    #[test]
    fn test_disconnected_zone_never_grows() {
        let mut map = CityMap::new(8, 8);
        map.set_tile(2, 3, TileId::Residential, LAYER_SURFACE);
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        for _ in 0..100 {
            assert!(!grow_zones(&mut map, &mut rng));
        }
        assert_eq!(map.surface(2, 3), TileId::Residential);
    }

    #[test]
    fn test_grown_tile_is_growth_target() {
        let mut map = CityMap::new(8, 8);
        map.set_tile(3, 3, TileId::Road, LAYER_SURFACE);
        map.set_tile(2, 3, TileId::Commercial, LAYER_SURFACE);
        map.set_tile(4, 3, TileId::Industrial, LAYER_SURFACE);
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        for _ in 0..300 {
            grow_zones(&mut map, &mut rng);
        }
        assert_eq!(map.surface(2, 3), TileId::CommercialLvl1);
        assert_eq!(map.surface(4, 3), TileId::IndustrialLvl1);
    }

    #[test]
    fn test_developed_tiles_stop_growing() {
        let mut map = CityMap::new(8, 8);
        map.set_tile(3, 3, TileId::Road, LAYER_SURFACE);
        map.set_tile(2, 3, TileId::ResidentialLvl1, LAYER_SURFACE);
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        for _ in 0..50 {
            assert!(!grow_zones(&mut map, &mut rng));
        }
        assert_eq!(map.surface(2, 3), TileId::ResidentialLvl1);
    }
}
