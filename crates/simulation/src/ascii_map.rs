//! ASCII rendering of the map for debugging.
//!
//! One character per tile, one row per line, built on demand from a
//! [`CityMap`] reference. The surface view is the one most debugging cares
//! about; the layer view exposes the air and mains layers for utility work.

use crate::grid::CityMap;
use crate::tiles::{LayerId, TileId, LAYER_SURFACE};

pub fn tile_char(tile: TileId) -> char {
    match tile {
        TileId::Empty => ' ',
        TileId::Dirt => '.',
        TileId::Water => '~',
        TileId::Road => '#',
        TileId::Residential => 'r',
        TileId::Commercial => 'c',
        TileId::Industrial => 'i',
        TileId::PowerPlant => 'P',
        TileId::PowerLine => '|',
        TileId::WaterPump => 'W',
        TileId::WaterPipe => '-',
        TileId::ResidentialLvl1 => 'R',
        TileId::CommercialLvl1 => 'C',
        TileId::IndustrialLvl1 => 'I',
        TileId::SewerPipe => 's',
    }
}

/// Render one layer, row by row, top row first.
pub fn layer_to_string(map: &CityMap, layer: LayerId) -> String {
    let width = map.width() as i32;
    let height = map.height() as i32;
    let mut out = String::with_capacity((width as usize + 1) * height as usize);
    for y in 0..height {
        for x in 0..width {
            out.push(tile_char(map.get_tile(x, y, layer)));
        }
        out.push('\n');
    }
    out
}

/// Surface view of the map.
pub fn map_to_string(map: &CityMap) -> String {
    layer_to_string(map, LAYER_SURFACE)
}
