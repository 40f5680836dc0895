use serde::{Deserialize, Serialize};

/// Identifier of a vertical map layer. Positive layers sit above the surface,
/// negative layers below it.
pub type LayerId = i8;

/// Power lines.
pub const LAYER_AIR: LayerId = 1;
/// Roads, zones, buildings. The only layer filled (with dirt) by default.
pub const LAYER_SURFACE: LayerId = 0;
/// Water pipes.
pub const LAYER_WATER_MAINS: LayerId = -1;
/// Sewer pipes.
pub const LAYER_SEWER_MAINS: LayerId = -2;

/// The closed set of tile types. Raw ids are part of the serialized map
/// format and must stay stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[repr(u16)]
pub enum TileId {
    #[default]
    Empty = 0,
    Dirt = 1,
    Water = 2,
    Road = 3,
    Residential = 4,
    Commercial = 5,
    Industrial = 6,
    PowerPlant = 7,
    PowerLine = 8,
    WaterPump = 9,
    WaterPipe = 10,
    ResidentialLvl1 = 11,
    CommercialLvl1 = 12,
    IndustrialLvl1 = 13,
    SewerPipe = 14,
}

impl TileId {
    /// Number of defined tile types; raw ids are contiguous in `0..COUNT`.
    pub const COUNT: usize = 15;

    /// Every defined tile type, in raw-id order.
    pub const ALL: [TileId; Self::COUNT] = [
        TileId::Empty,
        TileId::Dirt,
        TileId::Water,
        TileId::Road,
        TileId::Residential,
        TileId::Commercial,
        TileId::Industrial,
        TileId::PowerPlant,
        TileId::PowerLine,
        TileId::WaterPump,
        TileId::WaterPipe,
        TileId::ResidentialLvl1,
        TileId::CommercialLvl1,
        TileId::IndustrialLvl1,
        TileId::SewerPipe,
    ];

    pub fn raw(self) -> u16 {
        self as u16
    }

    pub fn from_raw(raw: u16) -> Option<TileId> {
        Self::ALL.get(raw as usize).copied()
    }

    pub fn is_road(self) -> bool {
        matches!(self, TileId::Road)
    }
}
