//! Vertical connectors.
//!
//! After floors go in, zones whose floor hangs high above everything
//! walkable get a way up: a spring if the launch reaches, else a slope
//! staircase if there is room for one, else a ladder. Every connector
//! punches a one-tile hole through the upper zone's floor at the flush
//! edge column so the route actually passes through.

use crate::capability::TraversalCapability;
use crate::gen::zone::Zone;
use crate::primitive::build::{stage_floor, stage_ladder, stage_slope, stage_spring};
use crate::primitive::SlopeDir;
use crate::rng::GenRng;
use crate::room::{GridPos, Room};

/// Which side of the upper zone is flush with the lower zone.
#[derive(Debug, Clone, Copy, PartialEq)]
enum FlushEdge {
    Left,
    Right,
}

/// Place connectors until every zone that can be reached is, or no
/// candidate pairing remains.
pub fn place_connectors(
    room: &mut Room,
    zones: &mut [Zone],
    cap: &TraversalCapability,
    rng: &mut GenRng,
) -> usize {
    let mut placed = 0;
    // A fresh connector can make further zones reachable through
    // walking, so sweep until a full pass changes nothing.
    for _ in 0..zones.len() {
        let pending = super::zone::unreachable_zones(zones, rng);
        if pending.is_empty() {
            break;
        }
        let mut progressed = false;
        for idx in pending {
            if connect_one(room, zones, idx, cap) {
                zones[idx].reachable = true;
                super::zone::propagate_reachability(zones);
                placed += 1;
                progressed = true;
            }
        }
        if !progressed {
            break;
        }
    }
    placed
}

fn connect_one(room: &mut Room, zones: &[Zone], idx: usize, cap: &TraversalCapability) -> bool {
    let upper = zones[idx];
    for lower in zones.iter().filter(|z| z.reachable) {
        if lower.floor_row() <= upper.floor_row() {
            continue;
        }
        let edge = if upper.x == lower.x {
            FlushEdge::Left
        } else if upper.right() == lower.right() {
            FlushEdge::Right
        } else {
            continue;
        };
        let gap = lower.floor_row() - upper.floor_row();
        if gap <= 2 {
            // Close enough to jump.
            return true;
        }
        let col = match edge {
            FlushEdge::Left => upper.x.max(1),
            FlushEdge::Right => (upper.right() - 1).min(room.width() - 2),
        };
        if try_spring(room, cap, col, upper.floor_row(), lower.floor_row())
            || try_slope(room, edge, col, upper.floor_row(), gap)
            || try_ladder(room, col, upper.floor_row(), gap)
        {
            return true;
        }
    }
    false
}

/// The hole the connector passes through: empty already, or carvable
/// floor.
fn hole_fits(room: &Room, pos: GridPos) -> bool {
    match room.atom_at(pos) {
        None => room.in_bounds(pos),
        Some(atom) => atom.kind.is_carvable(),
    }
}

fn try_spring(
    room: &mut Room,
    cap: &TraversalCapability,
    col: i32,
    upper_floor: i32,
    lower_floor: i32,
) -> bool {
    let gap = lower_floor - upper_floor;
    if gap > cap.spring_apex_tiles() {
        return false;
    }
    if !room.has_solid_at(GridPos::new(col, lower_floor)) {
        return false;
    }
    let hole = GridPos::new(col, upper_floor);
    if !hole_fits(room, hole) {
        return false;
    }
    for y in (upper_floor + 1)..lower_floor {
        if room.has_atom_at(GridPos::new(col, y)) {
            return false;
        }
    }
    room.carve_cell(hole);
    // The spring tile rests one above the lower floor, so an apex of
    // gap - 1 tiles tops out exactly in the hole, where the upper
    // floor's carved anchor used to be.
    room.insert(stage_spring(GridPos::new(col, lower_floor - 1), gap - 1))
        .is_ok()
}

fn try_slope(room: &mut Room, edge: FlushEdge, col: i32, upper_floor: i32, gap: i32) -> bool {
    let dir = match edge {
        FlushEdge::Left => SlopeDir::DownRight,
        FlushEdge::Right => SlopeDir::DownLeft,
    };
    let hole = GridPos::new(col, upper_floor);
    let staged = stage_slope(hole, dir, gap);
    for atom in &staged.atoms {
        if !room.in_bounds(atom.pos) {
            return false;
        }
        if atom.pos == hole {
            if !hole_fits(room, hole) {
                return false;
            }
        } else if room.has_atom_at(atom.pos) {
            return false;
        }
    }
    room.carve_cell(hole);
    room.insert(staged).is_ok()
}

/// Ladder fallback: spans `gap + 1` tiles, top rung in the hole and
/// bottom rung standing in the lower floor row (its collision is off,
/// so the floor tile there is carved away). A support floor tile is
/// synthesized beneath the ladder when nothing solid is there.
fn try_ladder(room: &mut Room, col: i32, upper_floor: i32, gap: i32) -> bool {
    let hole = GridPos::new(col, upper_floor);
    let foot = GridPos::new(col, upper_floor + gap);
    if !hole_fits(room, hole) || !hole_fits(room, foot) {
        return false;
    }
    for dy in 1..gap {
        if room.has_atom_at(GridPos::new(col, upper_floor + dy)) {
            return false;
        }
    }
    let support = foot.offset(0, 1);
    if !room.has_solid_at(support) {
        if !room.in_bounds(support) || room.has_atom_at(support) {
            return false;
        }
        if room.insert(stage_floor(support, 1)).is_err() {
            return false;
        }
    }
    room.carve_cell(hole);
    room.carve_cell(foot);
    room.insert(stage_ladder(hole, gap + 1)).is_ok()
}
