//! Enclosed dead-space fill.
//!
//! Placement can leave pockets no path will ever enter: a rectangle of
//! space fenced on all four sides by obstruction lines, with no anchor
//! inside. Those pockets fill with stone. Filling adds new obstruction
//! lines, so the pass repeats to a fixed point.

use crate::consts::MAX_FILL_PASSES;
use crate::geometry::{merge_colinear, Segment};
use crate::primitive::build::stage_wall;
use crate::room::{GridPos, Room};
use crate::{HALF_TILE, TILE_SIZE};

const SPAN_TOL: f32 = 1.0;

/// Run fill passes to a fixed point. Returns the number of cells
/// filled.
pub fn fill_enclosed_areas(room: &mut Room) -> usize {
    let mut total = 0;
    for _ in 0..MAX_FILL_PASSES {
        let filled = fill_pass(room);
        if filled == 0 {
            break;
        }
        total += filled;
    }
    total
}

fn fill_pass(room: &mut Room) -> usize {
    let lines: Vec<Segment> = room
        .primitives()
        .flat_map(|(_, p)| p.obstruction_lines.iter().copied())
        .collect();
    let merged = merge_colinear(&lines);
    let verticals: Vec<&Segment> = merged.iter().filter(|s| s.is_vertical()).collect();
    let horizontals: Vec<&Segment> = merged.iter().filter(|s| s.is_horizontal()).collect();

    let mut cells: Vec<GridPos> = Vec::new();
    for (vi, &v1) in verticals.iter().enumerate() {
        for &v2 in &verticals[vi + 1..] {
            let (left, right) = if v1.a.x <= v2.a.x { (v1, v2) } else { (v2, v1) };
            for (hi, &h1) in horizontals.iter().enumerate() {
                for &h2 in &horizontals[hi + 1..] {
                    let (top, bottom) = if h1.a.y <= h2.a.y { (h1, h2) } else { (h2, h1) };
                    if bounded(room, left, right, top, bottom) {
                        collect_interior(room, left, right, top, bottom, &mut cells);
                    }
                }
            }
        }
    }

    cells.sort_by_key(|p| (p.y, p.x));
    cells.dedup();
    let filled = cells.len();

    // Group into row runs so each pocket becomes few primitives.
    let mut i = 0;
    while i < cells.len() {
        let start = cells[i];
        let mut width = 1;
        while i + 1 < cells.len()
            && cells[i + 1].y == start.y
            && cells[i + 1].x == start.x + width
        {
            width += 1;
            i += 1;
        }
        // Interior cells were empty when collected; a run can only
        // fail if an earlier run in this pass took one of its cells,
        // which grouping rules out.
        let _ = room.insert(stage_wall(start, width, 1));
        i += 1;
    }
    filled
}

/// Four lines fence a rectangle when each vertical covers the
/// horizontal pair's y-range and each horizontal covers the vertical
/// pair's x-range.
fn bounded(room: &Room, left: &Segment, right: &Segment, top: &Segment, bottom: &Segment) -> bool {
    if right.a.x - left.a.x < TILE_SIZE - SPAN_TOL {
        return false;
    }
    if bottom.a.y - top.a.y < TILE_SIZE - SPAN_TOL {
        return false;
    }
    let covers_y = |v: &Segment| {
        v.a.y.min(v.b.y) <= top.a.y + SPAN_TOL && v.a.y.max(v.b.y) >= bottom.a.y - SPAN_TOL
    };
    let covers_x = |h: &Segment| {
        h.a.x.min(h.b.x) <= left.a.x + SPAN_TOL && h.a.x.max(h.b.x) >= right.a.x - SPAN_TOL
    };
    if !(covers_y(left) && covers_y(right) && covers_x(top) && covers_x(bottom)) {
        return false;
    }
    // A fenced rectangle with an anchor inside is playable space, not
    // dead space.
    !room.all_anchors().any(|(_, _, a)| {
        a.pos.x > left.a.x + SPAN_TOL
            && a.pos.x < right.a.x - SPAN_TOL
            && a.pos.y > top.a.y + SPAN_TOL
            && a.pos.y < bottom.a.y - SPAN_TOL
    })
}

fn collect_interior(
    room: &Room,
    left: &Segment,
    right: &Segment,
    top: &Segment,
    bottom: &Segment,
    out: &mut Vec<GridPos>,
) {
    let gx_lo = ((left.a.x + HALF_TILE) / TILE_SIZE).ceil() as i32;
    let gx_hi = ((right.a.x - HALF_TILE) / TILE_SIZE).floor() as i32;
    let gy_lo = ((top.a.y + HALF_TILE) / TILE_SIZE).ceil() as i32;
    let gy_hi = ((bottom.a.y - HALF_TILE) / TILE_SIZE).floor() as i32;
    for gy in gy_lo..=gy_hi {
        for gx in gx_lo..=gx_hi {
            let pos = GridPos::new(gx, gy);
            if room.in_bounds(pos) && !room.has_atom_at(pos) {
                out.push(pos);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::build::stage_floor;
    use crate::room::AtomKind;

    #[test]
    fn test_pocket_between_walls_fills() {
        let mut room = Room::new(20, 12, 5);
        // A 2x2 pocket fenced by stone on all sides, anchor-free.
        room.insert(stage_wall(GridPos::new(4, 4), 4, 1)).unwrap();
        room.insert(stage_wall(GridPos::new(4, 7), 4, 1)).unwrap();
        room.insert(stage_wall(GridPos::new(4, 5), 1, 2)).unwrap();
        room.insert(stage_wall(GridPos::new(7, 5), 1, 2)).unwrap();

        let filled = fill_enclosed_areas(&mut room);
        assert_eq!(filled, 4);
        for y in 5..=6 {
            for x in 5..=6 {
                assert!(room.has_atom_of_kind_at(GridPos::new(x, y), AtomKind::FillerStone));
            }
        }
    }

    #[test]
    fn test_open_side_does_not_fill() {
        let mut room = Room::new(20, 12, 5);
        // Same pocket, but the right fence is missing.
        room.insert(stage_wall(GridPos::new(4, 4), 4, 1)).unwrap();
        room.insert(stage_wall(GridPos::new(4, 7), 4, 1)).unwrap();
        room.insert(stage_wall(GridPos::new(4, 5), 1, 2)).unwrap();

        assert_eq!(fill_enclosed_areas(&mut room), 0);
        assert!(!room.has_atom_at(GridPos::new(5, 5)));
    }

    #[test]
    fn test_anchored_space_stays_open() {
        let mut room = Room::new(20, 12, 5);
        // Fence a larger box, then put a walkable floor inside it;
        // the floor's anchors mark the space as playable.
        room.insert(stage_wall(GridPos::new(3, 3), 8, 1)).unwrap();
        room.insert(stage_wall(GridPos::new(3, 9), 8, 1)).unwrap();
        room.insert(stage_wall(GridPos::new(3, 4), 1, 5)).unwrap();
        room.insert(stage_wall(GridPos::new(10, 4), 1, 5)).unwrap();
        room.insert(stage_floor(GridPos::new(4, 8), 6)).unwrap();

        assert_eq!(fill_enclosed_areas(&mut room), 0);
        assert!(!room.has_atom_at(GridPos::new(5, 5)));
    }
}
