//! Anchor-driven expansion.
//!
//! After the structural passes, the room grows organically: a placed
//! primitive proposes a compatible neighbor kind, a spot is rolled
//! near one of its anchors, and the candidate goes in only if its own
//! anchors connect back to the existing traversal web. Rejections are
//! free; the room never holds a half-placed candidate.

use crate::capability::TraversalCapability;
use crate::consts::MAX_PLACE_ATTEMPTS;
use crate::gen::compat::{compatible, weighted_choice};
use crate::primitive::build::{
    build_water, stage_blade, stage_cactus, stage_floor, stage_fruit, stage_ladder,
    stage_mushroom, stage_platform, stage_spring,
};
use crate::primitive::{Anchor, Primitive, PrimitiveId, PrimitiveKind, StagedPrimitive};
use crate::rng::GenRng;
use crate::room::{GridPos, Room};

/// Grow the room by up to `limit` primitives. Returns how many were
/// actually placed.
pub fn expand(
    room: &mut Room,
    cap: &TraversalCapability,
    rng: &mut GenRng,
    limit: u32,
) -> u32 {
    let mut placed = 0;
    let mut budget = limit * MAX_PLACE_ATTEMPTS;
    while placed < limit && budget > 0 {
        budget -= 1;
        if expand_once(room, cap, rng) {
            placed += 1;
        }
    }
    placed
}

fn expand_once(room: &mut Room, cap: &TraversalCapability, rng: &mut GenRng) -> bool {
    let sources: Vec<PrimitiveId> = room
        .primitives()
        .filter(|(_, p)| !p.anchors.is_empty() && !compatible(p.kind).is_empty())
        .map(|(id, _)| id)
        .collect();
    let Some(&source) = rng.choose(&sources) else {
        return false;
    };
    let Some(next_kind) = weighted_choice(rng, compatible(room.primitive(source).kind)) else {
        return false;
    };

    for _ in 0..MAX_PLACE_ATTEMPTS {
        let anchors = &room.primitive(source).anchors;
        let Some(anchor) = rng.choose(anchors).copied() else {
            return false;
        };
        let target = anchor.random_nearby_point(rng).grid();

        if next_kind == PrimitiveKind::Water {
            // Carving kind: validates and commits itself.
            if build_water(room, rng, cap, target).is_ok() {
                return true;
            }
            continue;
        }

        let Some(staged) = stage_candidate(next_kind, target, cap, rng) else {
            return false;
        };
        if !connects_back(room, &staged) {
            continue;
        }
        if room.insert(staged).is_ok() {
            return true;
        }
    }
    false
}

fn stage_candidate(
    kind: PrimitiveKind,
    target: GridPos,
    cap: &TraversalCapability,
    rng: &mut GenRng,
) -> Option<StagedPrimitive> {
    Some(match kind {
        PrimitiveKind::Floor => stage_floor(target, 2 + rng.rn2(3) as i32),
        PrimitiveKind::Platform => stage_platform(target, 2 + rng.rn2(2) as i32),
        PrimitiveKind::Ladder => stage_ladder(target, 3 + rng.rn2(3) as i32),
        PrimitiveKind::Spring => stage_spring(target, cap.spring_apex_tiles()),
        PrimitiveKind::Mushroom => stage_mushroom(target, cap.jump_apex_tiles()),
        PrimitiveKind::Cactus => stage_cactus(target),
        PrimitiveKind::FloorBlade => stage_blade(target),
        PrimitiveKind::Fruit => stage_fruit(target),
        _ => return None,
    })
}

/// Would this candidate's anchors overlap any anchor already in the
/// room? Candidates that would float disconnected are rejected before
/// insertion.
fn connects_back(room: &Room, staged: &StagedPrimitive) -> bool {
    let preview = preview_anchors(staged);
    room.all_anchors()
        .any(|(_, _, existing)| preview.iter().any(|c| c.connects_to(existing)))
}

fn preview_anchors(staged: &StagedPrimitive) -> Vec<Anchor> {
    let mut preview = Primitive {
        kind: staged.kind,
        data: staged.data,
        origin: staged.origin,
        atoms: Vec::new(),
        anchors: Vec::new(),
        internal_paths: Vec::new(),
        obstruction_lines: Vec::new(),
        removed: false,
    };
    preview.generate_anchors(PrimitiveId(usize::MAX));
    preview.anchors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::room::AtomKind;

    #[test]
    fn test_expansion_stays_connected() {
        let mut room = Room::new(30, 16, 5);
        room.insert(stage_floor(GridPos::new(1, 14), 28)).unwrap();
        let cap = TraversalCapability::default();
        let mut rng = GenRng::new(1234);

        let placed = expand(&mut room, &cap, &mut rng, 10);
        assert!(placed > 0, "flat ground should always grow something");

        // Every non-structural primitive added after the base floor
        // has at least one anchor overlapping another primitive's.
        for (id, p) in room.primitives().skip(1) {
            if p.anchors.is_empty() {
                continue;
            }
            // Carved kinds connect through terrain adjacency instead.
            if matches!(p.kind, PrimitiveKind::Water | PrimitiveKind::Pit) {
                continue;
            }
            let linked = room
                .all_anchors()
                .filter(|(other, _, _)| *other != id)
                .any(|(_, _, a)| p.anchors.iter().any(|mine| mine.connects_to(a)));
            assert!(linked, "{:?} ({}) floats free", id, p.kind);
        }
    }

    #[test]
    fn test_expansion_is_deterministic() {
        let cap = TraversalCapability::default();
        let build = || {
            let mut room = Room::new(30, 16, 5);
            room.insert(stage_floor(GridPos::new(1, 14), 28)).unwrap();
            let mut rng = GenRng::new(99);
            expand(&mut room, &cap, &mut rng, 8);
            let mut kinds: Vec<String> = room
                .primitives()
                .map(|(_, p)| p.kind.to_string())
                .collect();
            kinds.sort();
            (room.atoms().count(), kinds)
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn test_limit_zero_is_a_noop() {
        let mut room = Room::new(30, 16, 5);
        room.insert(stage_floor(GridPos::new(1, 14), 28)).unwrap();
        let before = room.atoms().count();
        let cap = TraversalCapability::default();
        let mut rng = GenRng::new(5);
        assert_eq!(expand(&mut room, &cap, &mut rng, 0), 0);
        assert_eq!(room.atoms().count(), before);
        assert!(room
            .atoms()
            .all(|a| a.kind == AtomKind::FloorTile));
    }
}
