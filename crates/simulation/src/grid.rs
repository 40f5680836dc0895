//! Layered tile map.
//!
//! One flat row-major tile array per vertical layer, all layers sharing the
//! same width and height. Coordinate access is sentinel-based: reads outside
//! the map or on an undefined layer yield [`TileId::Empty`], writes outside
//! the map are dropped, and writing to an undefined layer allocates it. The
//! map is the single source of truth for tile occupancy; every collaborator
//! goes through `get_tile`/`set_tile`.

use std::collections::BTreeMap;

use crate::tiles::{
    LayerId, TileId, LAYER_AIR, LAYER_SEWER_MAINS, LAYER_SURFACE, LAYER_WATER_MAINS,
};

#[derive(Debug, Clone, PartialEq)]
pub struct CityMap {
    width: u32,
    height: u32,
    layers: BTreeMap<LayerId, Vec<TileId>>,
}

impl CityMap {
    /// A fresh map with the four standard layers: dirt surface, empty air
    /// and mains. Terrain generation is a separate, one-time pass.
    pub fn new(width: u32, height: u32) -> Self {
        let size = width as usize * height as usize;
        let mut layers = BTreeMap::new();
        layers.insert(LAYER_AIR, vec![TileId::Empty; size]);
        layers.insert(LAYER_SURFACE, vec![TileId::Dirt; size]);
        layers.insert(LAYER_WATER_MAINS, vec![TileId::Empty; size]);
        layers.insert(LAYER_SEWER_MAINS, vec![TileId::Empty; size]);
        Self {
            width,
            height,
            layers,
        }
    }

    /// Restore a map from already-decoded layers. Layer lengths must match
    /// `width * height`; `map_save` validates before calling.
    pub(crate) fn from_layers(
        width: u32,
        height: u32,
        layers: BTreeMap<LayerId, Vec<TileId>>,
    ) -> Self {
        debug_assert!(layers
            .values()
            .all(|cells| cells.len() == width as usize * height as usize));
        Self {
            width,
            height,
            layers,
        }
    }

    pub(crate) fn replace_layer(&mut self, layer: LayerId, cells: Vec<TileId>) {
        debug_assert_eq!(cells.len(), self.width as usize * self.height as usize);
        self.layers.insert(layer, cells);
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width as i32 && y < self.height as i32
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Read a tile. Out-of-range coordinates and undefined layers yield
    /// [`TileId::Empty`], never an error.
    pub fn get_tile(&self, x: i32, y: i32, layer: LayerId) -> TileId {
        if !self.in_bounds(x, y) {
            return TileId::Empty;
        }
        match self.layers.get(&layer) {
            Some(cells) => cells[self.index(x, y)],
            None => TileId::Empty,
        }
    }

    /// Surface-layer read; most callers only care about layer 0.
    pub fn surface(&self, x: i32, y: i32) -> TileId {
        self.get_tile(x, y, LAYER_SURFACE)
    }

    /// Write a tile. Out-of-range writes are dropped; writing to an
    /// undefined layer allocates it filled with [`TileId::Empty`].
    pub fn set_tile(&mut self, x: i32, y: i32, tile: TileId, layer: LayerId) {
        if !self.in_bounds(x, y) {
            return;
        }
        let size = self.width as usize * self.height as usize;
        let idx = self.index(x, y);
        let cells = self
            .layers
            .entry(layer)
            .or_insert_with(|| vec![TileId::Empty; size]);
        cells[idx] = tile;
    }

    /// Defined layer ids, lowest first.
    pub fn layer_ids(&self) -> impl Iterator<Item = LayerId> + '_ {
        self.layers.keys().copied()
    }

    /// Raw row-major contents of one layer, if defined.
    pub fn layer_cells(&self, layer: LayerId) -> Option<&[TileId]> {
        self.layers.get(&layer).map(Vec::as_slice)
    }

    /// Every coordinate of the map, column by column.
    pub fn positions(&self) -> impl Iterator<Item = (i32, i32)> {
        let w = self.width as i32;
        let h = self.height as i32;
        (0..w).flat_map(move |x| (0..h).map(move |y| (x, y)))
    }

    /// Up to 4 in-bounds cardinal neighbors and the count of valid entries.
    /// Iterate `&result[..count]`.
    pub fn neighbors4(&self, x: i32, y: i32) -> ([(i32, i32); 4], usize) {
        let mut result = [(0, 0); 4];
        let mut count = 0;
        for (nx, ny) in [(x + 1, y), (x - 1, y), (x, y + 1), (x, y - 1)] {
            if self.in_bounds(nx, ny) {
                result[count] = (nx, ny);
                count += 1;
            }
        }
        (result, count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_map_layer_fill() {
        let map = CityMap::new(8, 8);
        assert_eq!(map.surface(3, 3), TileId::Dirt);
        assert_eq!(map.get_tile(3, 3, LAYER_AIR), TileId::Empty);
        assert_eq!(map.get_tile(3, 3, LAYER_WATER_MAINS), TileId::Empty);
        assert_eq!(map.get_tile(3, 3, LAYER_SEWER_MAINS), TileId::Empty);
    }

    #[test]
    fn test_out_of_bounds_reads_empty() {
        let map = CityMap::new(8, 8);
        assert_eq!(map.surface(-1, 0), TileId::Empty);
        assert_eq!(map.surface(0, -1), TileId::Empty);
        assert_eq!(map.surface(8, 0), TileId::Empty);
        assert_eq!(map.surface(0, 8), TileId::Empty);
    }

    #[test]
    fn test_undefined_layer_reads_empty() {
        let map = CityMap::new(8, 8);
        assert_eq!(map.get_tile(0, 0, 5), TileId::Empty);
        assert_eq!(map.get_tile(0, 0, -7), TileId::Empty);
    }

    #[test]
    fn test_set_tile_creates_layer() {
        let mut map = CityMap::new(8, 8);
        map.set_tile(2, 2, TileId::PowerLine, 3);
        assert_eq!(map.get_tile(2, 2, 3), TileId::PowerLine);
        // The rest of the new layer is empty.
        assert_eq!(map.get_tile(0, 0, 3), TileId::Empty);
        assert!(map.layer_ids().any(|l| l == 3));
    }

    #[test]
    fn test_out_of_bounds_writes_dropped() {
        let mut map = CityMap::new(8, 8);
        map.set_tile(8, 0, TileId::Road, LAYER_SURFACE);
        map.set_tile(-1, 4, TileId::Road, LAYER_SURFACE);
        for (x, y) in map.positions() {
            assert_ne!(map.surface(x, y), TileId::Road);
        }
    }

    #[test]
    fn test_neighbors4_corner_and_center() {
        let map = CityMap::new(8, 8);
        assert_eq!(map.neighbors4(0, 0).1, 2);
        assert_eq!(map.neighbors4(4, 4).1, 4);
        assert_eq!(map.neighbors4(7, 7).1, 2);
        assert_eq!(map.neighbors4(0, 4).1, 3);
    }

    #[test]
    fn test_positions_cover_map() {
        let map = CityMap::new(4, 3);
        let all: Vec<(i32, i32)> = map.positions().collect();
        assert_eq!(all.len(), 12);
        assert!(all.contains(&(0, 0)));
        assert!(all.contains(&(3, 2)));
    }
}
