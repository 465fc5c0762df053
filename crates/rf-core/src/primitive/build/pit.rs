//! Pits: carved openings in the ground with walled interiors.

use crate::capability::TraversalCapability;
use crate::errors::GenError;
use crate::primitive::{PrimitiveData, PrimitiveId, PrimitiveKind, StagedPrimitive};
use crate::rng::GenRng;
use crate::room::{AtomKind, GridPos, Room, StagedAtom};

/// Cells a carving primitive wants, split by purpose.
pub(super) struct CarveFootprint {
    /// Opening plus interior: must end up empty.
    pub interior: Vec<GridPos>,
    /// Side walls and bottom: filled with stone.
    pub shell: Vec<GridPos>,
}

/// Footprint of a pit/water body whose opening starts at `surface`
/// (the leftmost floor cell being replaced).
pub(super) fn carve_footprint(surface: GridPos, width: i32, depth: i32) -> CarveFootprint {
    let mut interior = Vec::new();
    let mut shell = Vec::new();
    for dy in 0..depth {
        for dx in 0..width {
            interior.push(surface.offset(dx, dy));
        }
        shell.push(surface.offset(-1, dy));
        shell.push(surface.offset(width, dy));
    }
    for dx in -1..=width {
        shell.push(surface.offset(dx, depth));
    }
    CarveFootprint { interior, shell }
}

/// Check a carve footprint fits: everything in bounds, interior and
/// shell cells empty or carvable, two rows of clearance over the
/// opening.
pub(super) fn check_footprint(
    room: &Room,
    surface: GridPos,
    width: i32,
    fp: &CarveFootprint,
) -> Result<(), GenError> {
    for &pos in fp.interior.iter().chain(fp.shell.iter()) {
        if !room.in_bounds(pos) {
            return Err(GenError::InfeasibleGeometry("footprint out of bounds"));
        }
        if let Some(atom) = room.atom_at(pos) {
            if !atom.kind.is_carvable() {
                return Err(GenError::PlacementConflict { pos });
            }
        }
    }
    // Opening must be cut through existing ground, not open air.
    for dx in 0..width {
        let pos = surface.offset(dx, 0);
        if !room.atom_at(pos).is_some_and(|a| a.kind.is_carvable()) {
            return Err(GenError::InfeasibleGeometry("opening not on ground"));
        }
    }
    for dy in 1..=2 {
        for dx in 0..width {
            let pos = surface.offset(dx, -dy);
            if room.in_bounds(pos) && room.has_atom_at(pos) {
                return Err(GenError::InfeasibleGeometry("no clearance over opening"));
            }
        }
    }
    Ok(())
}

pub(super) fn carve_all(room: &mut Room, fp: &CarveFootprint) {
    for &pos in fp.interior.iter().chain(fp.shell.iter()) {
        room.carve_cell(pos);
    }
}

/// Roll pit dimensions from the difficulty fraction. The maxima can
/// collapse to or below the minima at low difficulty; the roll then
/// just returns the minimum.
pub(super) fn roll_dims(
    rng: &mut GenRng,
    cap: &TraversalCapability,
    difficulty: f32,
) -> (i32, i32) {
    let max_width = (cap.max_gap_tiles() as f32 * difficulty).floor() as i32;
    let max_depth = (10.0 * difficulty).ceil() as i32;
    let width = rng.range_or_min(2, max_width);
    let depth = rng.range_or_min(2, max_depth);
    (width, depth)
}

/// Carve a pit into the ground at `surface` and insert it.
///
/// Dimensions scale with room difficulty. On success the opening has
/// been cut, the interior walled and floored with stone, and the pit's
/// traversal anchors generated.
pub fn build_pit(
    room: &mut Room,
    rng: &mut GenRng,
    cap: &TraversalCapability,
    surface: GridPos,
) -> Result<PrimitiveId, GenError> {
    let (width, depth) = roll_dims(rng, cap, room.difficulty_percent());
    let fp = carve_footprint(surface, width, depth);
    check_footprint(room, surface, width, &fp)?;
    carve_all(room, &fp);

    let mut staged = StagedPrimitive::new(
        PrimitiveKind::Pit,
        PrimitiveData::Pit { width, depth },
        surface,
    );
    for &pos in &fp.shell {
        staged
            .atoms
            .push(StagedAtom::new(pos, AtomKind::FillerStone));
    }
    room.insert(staged)
}
