//! Floor runs and one-tile-thick platforms.

use crate::primitive::{PrimitiveData, PrimitiveKind, StagedPrimitive};
use crate::room::{AtomKind, GridPos, StagedAtom};

/// A horizontal run of floor tiles starting at `origin`.
pub fn stage_floor(origin: GridPos, width: i32) -> StagedPrimitive {
    let mut staged = StagedPrimitive::new(
        PrimitiveKind::Floor,
        PrimitiveData::Floor { width },
        origin,
    );
    for dx in 0..width {
        staged
            .atoms
            .push(StagedAtom::new(origin.offset(dx, 0), AtomKind::FloorTile));
    }
    staged
}

/// A floating platform, walkable like floor but placed mid-air.
pub fn stage_platform(origin: GridPos, width: i32) -> StagedPrimitive {
    let mut staged = StagedPrimitive::new(
        PrimitiveKind::Platform,
        PrimitiveData::Platform { width },
        origin,
    );
    for dx in 0..width {
        staged.atoms.push(StagedAtom::new(
            origin.offset(dx, 0),
            AtomKind::PlatformTile,
        ));
    }
    staged
}
