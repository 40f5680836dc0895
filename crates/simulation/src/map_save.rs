//! Map payload serialization.
//!
//! The exchange format is a plain payload: width, height, and one flat
//! row-major tile-id list per defined layer, keyed by the stringified layer
//! id. Legacy payloads that predate layering carry a single `grid` key and
//! are mapped to the surface layer. Decoding never panics; malformed
//! payloads surface as typed errors for the caller to handle.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::grid::CityMap;
use crate::tiles::{LayerId, TileId, LAYER_SURFACE};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapPayload {
    pub width: u32,
    pub height: u32,
    /// Layer id (stringified) to row-major raw tile ids.
    #[serde(default)]
    pub layers: BTreeMap<String, Vec<u16>>,
    /// Legacy single-layer form: surface tile ids only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid: Option<Vec<u16>>,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Decoding failures for map payloads.
#[derive(Debug)]
pub enum MapDecodeError {
    /// Width or height of zero.
    BadDimensions { width: u32, height: u32 },
    /// A layer key that does not parse as a layer id.
    BadLayerKey(String),
    /// A layer whose tile list does not match `width * height`.
    LayerLength {
        layer: LayerId,
        expected: usize,
        found: usize,
    },
    /// A raw tile id outside the closed tile enumeration.
    UnknownTile { layer: LayerId, raw: u16 },
    /// The payload itself failed to deserialize.
    Malformed(String),
}

impl fmt::Display for MapDecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapDecodeError::BadDimensions { width, height } => {
                write!(f, "bad map dimensions {width}x{height}")
            }
            MapDecodeError::BadLayerKey(key) => write!(f, "bad layer key {key:?}"),
            MapDecodeError::LayerLength {
                layer,
                expected,
                found,
            } => write!(
                f,
                "layer {layer} holds {found} tiles, expected {expected}"
            ),
            MapDecodeError::UnknownTile { layer, raw } => {
                write!(f, "unknown tile id {raw} on layer {layer}")
            }
            MapDecodeError::Malformed(msg) => write!(f, "malformed map payload: {msg}"),
        }
    }
}

impl std::error::Error for MapDecodeError {}

// ---------------------------------------------------------------------------
// Encode / decode
// ---------------------------------------------------------------------------

pub fn to_payload(map: &CityMap) -> MapPayload {
    let mut layers = BTreeMap::new();
    for layer in map.layer_ids() {
        if let Some(cells) = map.layer_cells(layer) {
            layers.insert(
                layer.to_string(),
                cells.iter().map(|tile| tile.raw()).collect(),
            );
        }
    }
    MapPayload {
        width: map.width(),
        height: map.height(),
        layers,
        grid: None,
    }
}

pub fn from_payload(payload: &MapPayload) -> Result<CityMap, MapDecodeError> {
    if payload.width == 0 || payload.height == 0 {
        return Err(MapDecodeError::BadDimensions {
            width: payload.width,
            height: payload.height,
        });
    }
    let expected = payload.width as usize * payload.height as usize;

    if !payload.layers.is_empty() {
        let mut layers = BTreeMap::new();
        for (key, raws) in &payload.layers {
            let layer: LayerId = key
                .parse()
                .map_err(|_| MapDecodeError::BadLayerKey(key.clone()))?;
            layers.insert(layer, decode_layer(layer, raws, expected)?);
        }
        return Ok(CityMap::from_layers(payload.width, payload.height, layers));
    }

    // Legacy form: the single tile list is the surface; the standard empty
    // layers are kept around it.
    let mut map = CityMap::new(payload.width, payload.height);
    if let Some(raws) = &payload.grid {
        map.replace_layer(LAYER_SURFACE, decode_layer(LAYER_SURFACE, raws, expected)?);
    }
    Ok(map)
}

fn decode_layer(
    layer: LayerId,
    raws: &[u16],
    expected: usize,
) -> Result<Vec<TileId>, MapDecodeError> {
    if raws.len() != expected {
        return Err(MapDecodeError::LayerLength {
            layer,
            expected,
            found: raws.len(),
        });
    }
    raws.iter()
        .map(|&raw| TileId::from_raw(raw).ok_or(MapDecodeError::UnknownTile { layer, raw }))
        .collect()
}

// ---------------------------------------------------------------------------
// JSON surface
// ---------------------------------------------------------------------------

pub fn to_json(map: &CityMap) -> serde_json::Value {
    serde_json::to_value(to_payload(map)).unwrap_or(serde_json::Value::Null)
}

pub fn from_json(value: &serde_json::Value) -> Result<CityMap, MapDecodeError> {
    let payload: MapPayload = serde_json::from_value(value.clone())
        .map_err(|e| MapDecodeError::Malformed(e.to_string()))?;
    from_payload(&payload)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::{LAYER_AIR, LAYER_SEWER_MAINS, LAYER_WATER_MAINS};

    /// Exercises every tile type at least once, spread over all four layers.
    fn sample_map() -> CityMap {
        let mut map = CityMap::new(6, 5);
        map.set_tile(0, 0, TileId::PowerPlant, LAYER_SURFACE);
        map.set_tile(1, 0, TileId::Road, LAYER_SURFACE);
        map.set_tile(2, 0, TileId::Residential, LAYER_SURFACE);
        map.set_tile(3, 0, TileId::Water, LAYER_SURFACE);
        map.set_tile(4, 0, TileId::WaterPump, LAYER_SURFACE);
        map.set_tile(0, 2, TileId::Commercial, LAYER_SURFACE);
        map.set_tile(1, 2, TileId::Industrial, LAYER_SURFACE);
        map.set_tile(2, 2, TileId::ResidentialLvl1, LAYER_SURFACE);
        map.set_tile(3, 2, TileId::CommercialLvl1, LAYER_SURFACE);
        map.set_tile(4, 2, TileId::IndustrialLvl1, LAYER_SURFACE);
        map.set_tile(5, 2, TileId::Empty, LAYER_SURFACE);
        map.set_tile(1, 0, TileId::PowerLine, LAYER_AIR);
        map.set_tile(2, 1, TileId::WaterPipe, LAYER_WATER_MAINS);
        map.set_tile(0, 1, TileId::SewerPipe, LAYER_SEWER_MAINS);
        map
    }

    #[test]
    fn test_sample_map_covers_every_tile_type() {
        let map = sample_map();
        for tile in TileId::ALL {
            let found = map
                .layer_ids()
                .any(|layer| map.layer_cells(layer).is_some_and(|cells| cells.contains(&tile)));
            assert!(found, "{tile:?} missing from the sample map");
        }
    }

    #[test]
    fn test_payload_roundtrip() {
        let map = sample_map();
        let restored = from_payload(&to_payload(&map)).expect("payload should decode");
        assert_eq!(restored, map);
    }

    #[test]
    fn test_json_roundtrip() {
        let map = sample_map();
        let restored = from_json(&to_json(&map)).expect("json should decode");
        assert_eq!(restored, map);
    }

    #[test]
    fn test_legacy_single_layer_payload() {
        let mut surface = vec![TileId::Dirt.raw(); 4];
        surface[3] = TileId::Road.raw();
        let value = serde_json::json!({
            "width": 2,
            "height": 2,
            "grid": surface,
        });

        let map = from_json(&value).expect("legacy payload should decode");
        assert_eq!(map.surface(1, 1), TileId::Road);
        assert_eq!(map.surface(0, 0), TileId::Dirt);
        // The remaining standard layers exist and are empty.
        assert_eq!(map.get_tile(1, 1, LAYER_AIR), TileId::Empty);
        assert_eq!(map.get_tile(1, 1, LAYER_SEWER_MAINS), TileId::Empty);
    }

    #[test]
    fn test_layer_length_mismatch() {
        let mut payload = to_payload(&CityMap::new(4, 4));
        payload.layers.insert("0".to_string(), vec![0; 3]);
        match from_payload(&payload) {
            Err(MapDecodeError::LayerLength {
                layer: 0,
                expected: 16,
                found: 3,
            }) => {}
            other => panic!("expected LayerLength error, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_tile_id() {
        let mut payload = to_payload(&CityMap::new(2, 2));
        payload.layers.insert("0".to_string(), vec![999; 4]);
        match from_payload(&payload) {
            Err(MapDecodeError::UnknownTile { layer: 0, raw: 999 }) => {}
            other => panic!("expected UnknownTile error, got {other:?}"),
        }
    }

    #[test]
    fn test_bad_layer_key() {
        let mut payload = to_payload(&CityMap::new(2, 2));
        payload.layers.insert("surface".to_string(), vec![0; 4]);
        assert!(matches!(
            from_payload(&payload),
            Err(MapDecodeError::BadLayerKey(_))
        ));
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let payload = MapPayload {
            width: 0,
            height: 4,
            layers: BTreeMap::new(),
            grid: None,
        };
        assert!(matches!(
            from_payload(&payload),
            Err(MapDecodeError::BadDimensions { .. })
        ));
    }
}
