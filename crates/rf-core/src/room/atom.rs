//! Atoms: the smallest placed tile-objects.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::geometry::{GridPos, Vec2};
use crate::primitive::PrimitiveId;
use crate::TILE_SIZE;

use super::Room;

/// Tile-object type. Capabilities are explicit predicates, never
/// string tags.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum AtomKind {
    FloorTile = 0,
    FillerStone = 1,
    LadderTile = 2,
    SlopeTile = 3,
    SlopeFill = 4,
    SpringTile = 5,
    WaterTile = 6,
    PlatformTile = 7,
    MushroomTile = 8,
    CactusTile = 9,
    BladeTile = 10,
    FruitTile = 11,
    DoorBottom = 12,
    DoorTop = 13,
    OpenDoorBottom = 14,
    OpenDoorTop = 15,
    KeyTile = 16,
    LockTile = 17,
}

impl AtomKind {
    /// Solid ground the player can stand on.
    pub const fn is_solid(&self) -> bool {
        matches!(
            self,
            AtomKind::FloorTile
                | AtomKind::FillerStone
                | AtomKind::SlopeTile
                | AtomKind::SlopeFill
                | AtomKind::SpringTile
                | AtomKind::PlatformTile
                | AtomKind::MushroomTile
        )
    }

    /// Climbable vertical surface.
    pub const fn is_climbable(&self) -> bool {
        matches!(self, AtomKind::LadderTile)
    }

    pub const fn is_liquid(&self) -> bool {
        matches!(self, AtomKind::WaterTile)
    }

    pub const fn is_hazard(&self) -> bool {
        matches!(self, AtomKind::CactusTile | AtomKind::BladeTile)
    }

    pub const fn is_door(&self) -> bool {
        matches!(
            self,
            AtomKind::DoorBottom
                | AtomKind::DoorTop
                | AtomKind::OpenDoorBottom
                | AtomKind::OpenDoorTop
        )
    }

    /// Kinds the environmental carve pass (pits, water) may remove.
    pub const fn is_carvable(&self) -> bool {
        matches!(self, AtomKind::FloorTile | AtomKind::FillerStone)
    }

    /// Footprint in world units.
    pub fn footprint(&self) -> Vec2 {
        match self {
            AtomKind::DoorTop | AtomKind::OpenDoorTop => Vec2::new(TILE_SIZE / 2.0, TILE_SIZE),
            AtomKind::KeyTile => Vec2::new(55.0, 35.0),
            _ => Vec2::new(TILE_SIZE, TILE_SIZE),
        }
    }

    /// Per-kind placement rule, checked by the room before insertion.
    /// Surface-mounted kinds need something solid to sit on; everything
    /// else is valid wherever it does not overlap.
    pub fn validate_placement(&self, pos: GridPos, room: &Room) -> bool {
        match self {
            AtomKind::MushroomTile
            | AtomKind::CactusTile
            | AtomKind::BladeTile
            | AtomKind::SpringTile
            | AtomKind::DoorBottom
            | AtomKind::LockTile => room.has_solid_at(pos.offset(0, 1)),
            _ => true,
        }
    }
}

/// A placed tile-object. Immutable once placed except for visual kind
/// swaps (door opening).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Atom {
    pub kind: AtomKind,
    pub pos: GridPos,
    pub size: Vec2,
    /// Ladders drop collision on their bottom tile; everything else
    /// follows its kind.
    pub collidable: bool,
    pub owner: PrimitiveId,
}

impl Atom {
    pub fn world_pos(&self) -> Vec2 {
        self.pos.world()
    }
}

/// An atom staged for insertion, before the room has accepted it.
#[derive(Debug, Clone, Copy)]
pub struct StagedAtom {
    pub pos: GridPos,
    pub kind: AtomKind,
    pub collidable: bool,
}

impl StagedAtom {
    pub fn new(pos: GridPos, kind: AtomKind) -> Self {
        Self {
            pos,
            kind,
            collidable: kind.is_solid() || kind.is_door(),
        }
    }

    pub fn passable(pos: GridPos, kind: AtomKind) -> Self {
        Self {
            pos,
            kind,
            collidable: false,
        }
    }
}
