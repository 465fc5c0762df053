//! Water bodies: carved basins filled with swimmable water.

use crate::capability::TraversalCapability;
use crate::errors::GenError;
use crate::primitive::{PrimitiveData, PrimitiveId, PrimitiveKind, StagedPrimitive};
use crate::rng::GenRng;
use crate::room::{AtomKind, GridPos, Room, StagedAtom};

use super::pit::{carve_all, carve_footprint, check_footprint, roll_dims};

/// Carve a water basin into the ground at `surface` and insert it.
///
/// Same footprint rules as a pit, but the interior fills with
/// passable water tiles instead of staying open.
pub fn build_water(
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
        PrimitiveKind::Water,
        PrimitiveData::Water { width, depth },
        surface,
    );
    for &pos in &fp.shell {
        staged
            .atoms
            .push(StagedAtom::new(pos, AtomKind::FillerStone));
    }
    for &pos in &fp.interior {
        staged
            .atoms
            .push(StagedAtom::passable(pos, AtomKind::WaterTile));
    }
    room.insert(staged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::build::stage_floor;

    #[test]
    fn test_water_fills_interior() {
        let mut room = Room::new(30, 20, 8);
        for y in 10..20 {
            room.insert(stage_floor(GridPos::new(0, y), 30)).unwrap();
        }
        let mut rng = GenRng::new(3);
        let cap = TraversalCapability::default();
        let id = build_water(&mut room, &mut rng, &cap, GridPos::new(12, 10)).unwrap();

        let PrimitiveData::Water { width, depth } = room.primitive(id).data else {
            panic!("wrong payload");
        };
        for dy in 0..depth {
            for dx in 0..width {
                let pos = GridPos::new(12 + dx, 10 + dy);
                assert!(room.has_atom_of_kind_at(pos, AtomKind::WaterTile));
                assert!(!room.has_solid_at(pos));
            }
        }
        // Swim anchors cover the interior.
        assert_eq!(
            room.primitive(id).anchors.len(),
            (width * depth) as usize
        );
    }
}
