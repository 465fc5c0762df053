//! Door-to-door path building and key placement.
//!
//! The leftmost door becomes the start and opens. Every other door
//! gets a key: candidate spots are rated by the combined difficulty of
//! start-to-key plus key-to-door, and the hardest reachable spot wins.
//! Doors no route can reach keep their lock and get no key.

use std::collections::HashSet;

use crate::errors::GenError;
use crate::geometry::{GridPos, Vec2};
use crate::path::graph::AnchorGraph;
use crate::path::score::{path_difficulty, InterestingnessResult};
use crate::primitive::build::{open_door, stage_key};
use crate::primitive::{
    AnchorRole, DoorColour, DoorFlags, PrimitiveData, PrimitiveId, PrimitiveKind,
};
use crate::room::Room;

/// How many far-flung floor spots compete as key positions per door,
/// on top of every pit and water body.
const FLOOR_CANDIDATES: usize = 4;

#[derive(Debug, Clone, Copy)]
struct Candidate {
    cell: GridPos,
    pos: Vec2,
}

/// Build traversal paths from the start door to every other door,
/// placing keys along the way, and score the result.
pub fn generate_paths(room: &mut Room) -> Result<InterestingnessResult, GenError> {
    let doors = room.doors();
    if doors.len() < 2 {
        return Err(GenError::TooFewDoors(doors.len()));
    }

    // Leftmost door starts the room; ties keep insertion order.
    let start = *doors
        .iter()
        .min_by_key(|&&id| room.primitive(id).origin.x)
        .unwrap();
    if let PrimitiveData::Door { flags, .. } = &mut room.primitive_mut(start).data {
        flags.insert(DoorFlags::START);
    }
    open_door(room, start);

    let mut visited: HashSet<(PrimitiveId, usize)> = HashSet::new();
    let mut kinds_used: HashSet<PrimitiveKind> = HashSet::new();
    let mut difficulties: Vec<u32> = Vec::new();
    let mut goals = 0;

    for &door in doors.iter().filter(|&&d| d != start) {
        // Keys added for earlier doors are themselves waypoints, so
        // the graph rebuilds per door.
        let graph = AnchorGraph::build(room);
        let start_node = graph
            .node_of(start, 0)
            .ok_or(GenError::MissingDoorAnchor(start.0))?;
        let door_node = graph
            .node_of(door, 0)
            .ok_or(GenError::MissingDoorAnchor(door.0))?;
        let door_pos = room.primitive(door).origin.world();

        let mut rated: Vec<(u32, Candidate, Vec<usize>, Vec<usize>)> = Vec::new();
        for candidate in key_candidates(room, door_pos) {
            let Some(node) = graph.nearest_node(candidate.pos) else {
                continue;
            };
            let Some(to_key) = graph.find_path(start_node, node) else {
                continue;
            };
            let Some(to_door) = graph.find_path(node, door_node) else {
                continue;
            };
            let difficulty =
                path_difficulty(room, &graph, &to_key) + path_difficulty(room, &graph, &to_door);
            rated.push((difficulty, candidate, to_key, to_door));
        }
        rated.sort_by(|a, b| b.0.cmp(&a.0));

        let colour = door_colour(room, door);
        for (difficulty, candidate, to_key, to_door) in rated {
            if room.insert(stage_key(candidate.cell, colour)).is_err() {
                continue;
            }
            goals += 1;
            difficulties.push(difficulty);
            for &node in to_key.iter().chain(to_door.iter()) {
                let n = graph.node(node);
                visited.insert((n.owner, n.anchor_idx));
                kinds_used.insert(room.primitive(n.owner).kind);
            }
            break;
        }
    }

    Ok(InterestingnessResult::compute(
        visited.len(),
        room.total_anchor_count(),
        goals,
        &difficulties,
        &kinds_used,
    ))
}

fn door_colour(room: &Room, door: PrimitiveId) -> DoorColour {
    match room.primitive(door).data {
        PrimitiveData::Door { colour, .. } => colour,
        _ => DoorColour::Red,
    }
}

/// Key spots for one door: the floor of every pit, a perch over every
/// water body, and the few standable cells farthest from the door.
fn key_candidates(room: &Room, door_pos: Vec2) -> Vec<Candidate> {
    let mut out = Vec::new();
    for (_, p) in room.primitives() {
        match p.data {
            PrimitiveData::Pit { .. } => {
                for anchor in p.anchors.iter().filter(|a| a.role == AnchorRole::Bottom) {
                    out.push(Candidate {
                        cell: anchor.pos.grid(),
                        pos: anchor.pos,
                    });
                }
            }
            PrimitiveData::Water { width, depth } => {
                // The key hovers over the surface (a tile can't share a
                // water cell), but routes target the basin floor so the
                // path has to swim down for it.
                let cell = p.origin.offset(width / 2, -1);
                if room.in_bounds(cell) && !room.has_atom_at(cell) {
                    out.push(Candidate {
                        cell,
                        pos: p.origin.offset(width / 2, depth - 1).world(),
                    });
                }
            }
            _ => {}
        }
    }

    let mut spots = room.positions_above_floor();
    spots.sort_by(|a, b| {
        b.world()
            .distance_to(door_pos)
            .partial_cmp(&a.world().distance_to(door_pos))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    out.extend(spots.into_iter().take(FLOOR_CANDIDATES).map(|cell| Candidate {
        cell,
        pos: cell.world(),
    }));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::TraversalCapability;
    use crate::primitive::build::{build_water, stage_door, stage_floor, stage_lock, stage_wall};
    use crate::rng::GenRng;
    use crate::room::AtomKind;

    fn doored_room() -> (Room, PrimitiveId, PrimitiveId) {
        let mut room = Room::new(30, 14, 5);
        room.insert(stage_floor(GridPos::new(1, 12), 28)).unwrap();
        let left = room
            .insert(stage_door(
                GridPos::new(2, 11),
                DoorColour::Red,
                DoorFlags::empty(),
            ))
            .unwrap();
        let right = room
            .insert(stage_door(
                GridPos::new(26, 11),
                DoorColour::Blue,
                DoorFlags::empty(),
            ))
            .unwrap();
        room.insert(stage_lock(GridPos::new(25, 11), DoorColour::Blue))
            .unwrap();
        (room, left, right)
    }

    #[test]
    fn test_too_few_doors() {
        let mut room = Room::new(30, 14, 5);
        room.insert(stage_floor(GridPos::new(1, 12), 28)).unwrap();
        assert_eq!(
            generate_paths(&mut room).unwrap_err(),
            GenError::TooFewDoors(0)
        );
        room.insert(stage_door(
            GridPos::new(2, 11),
            DoorColour::Red,
            DoorFlags::empty(),
        ))
        .unwrap();
        assert_eq!(
            generate_paths(&mut room).unwrap_err(),
            GenError::TooFewDoors(1)
        );
    }

    #[test]
    fn test_leftmost_door_starts_open() {
        let (mut room, left, right) = doored_room();
        generate_paths(&mut room).unwrap();

        let PrimitiveData::Door { flags, .. } = room.primitive(left).data else {
            panic!("payload")
        };
        assert!(flags.contains(DoorFlags::START));
        assert!(flags.contains(DoorFlags::OPEN));
        assert!(room.has_atom_of_kind_at(GridPos::new(2, 11), AtomKind::OpenDoorBottom));

        let PrimitiveData::Door { flags, .. } = room.primitive(right).data else {
            panic!("payload")
        };
        assert!(!flags.contains(DoorFlags::OPEN));
    }

    #[test]
    fn test_key_placed_with_door_colour() {
        let (mut room, _, _) = doored_room();
        let result = generate_paths(&mut room).unwrap();
        assert_eq!(result.goals_reached, 1);

        let keys: Vec<_> = room
            .primitives()
            .filter(|(_, p)| p.kind == PrimitiveKind::DoorKey)
            .collect();
        assert_eq!(keys.len(), 1);
        assert_eq!(
            keys[0].1.data,
            PrimitiveData::Key {
                colour: DoorColour::Blue
            }
        );
        assert!(result.score > 0.0);
        assert!(result.anchors_visited > 0);
    }

    #[test]
    fn test_water_key_spot_targets_basin_floor() {
        let mut room = Room::new(30, 20, 10);
        room.insert(stage_floor(GridPos::new(0, 10), 30)).unwrap();
        room.insert(stage_wall(GridPos::new(0, 11), 30, 9)).unwrap();
        let mut rng = GenRng::new(42);
        let cap = TraversalCapability::default();
        let water = build_water(&mut room, &mut rng, &cap, GridPos::new(10, 10)).unwrap();
        let PrimitiveData::Water { width, depth } = room.primitive(water).data else {
            panic!("payload");
        };

        let candidates = key_candidates(&room, GridPos::new(0, 10).world());
        let perch = room.primitive(water).origin.offset(width / 2, -1);
        let spot = candidates
            .iter()
            .find(|c| c.cell == perch)
            .expect("water body offers a key spot");
        // The key itself hangs over the surface, but the rated position
        // is the basin floor, so the route dives the full depth.
        assert_eq!(
            spot.pos,
            room.primitive(water).origin.offset(width / 2, depth - 1).world()
        );
        assert!(spot.pos.y > perch.world().y);
    }

    #[test]
    fn test_unreachable_door_gets_no_key() {
        let (mut room, _, _) = doored_room();
        // An isolated third door on a floating island nothing reaches.
        room.insert(stage_floor(GridPos::new(12, 3), 3)).unwrap();
        room.insert(stage_door(
            GridPos::new(13, 2),
            DoorColour::Green,
            DoorFlags::empty(),
        ))
        .unwrap();

        let result = generate_paths(&mut room).unwrap();
        assert_eq!(result.goals_reached, 1);
        assert!(!room.primitives().any(|(_, p)| matches!(
            p.data,
            PrimitiveData::Key {
                colour: DoorColour::Green
            }
        )));
    }
}
