//! Zone partitioning.
//!
//! The room is cut into zones by a shallow BSP; each zone later gets a
//! floor along its bottom row. Two structural checks guard the
//! partition: a full-width band of aligned zones would seal the room
//! with an unbroken floor line, and a zone whose neighbors' floors all
//! sit too far away is unreachable on foot.

use serde::{Deserialize, Serialize};

use crate::rng::GenRng;

/// A rectangular region of the room grid, in tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    /// Whether the zone's floor can be reached on foot (updated by
    /// the reachability pass, then by connector placement).
    pub reachable: bool,
}

impl Zone {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            reachable: false,
        }
    }

    /// Grid row of this zone's floor surface.
    pub fn floor_row(&self) -> i32 {
        self.y + self.height - 1
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }
}

/// BSP depth for a room: average of how many times each dimension can
/// halve before hitting the zone minimum, at least one split.
fn split_depth(width: i32, height: i32, min_w: i32, min_h: i32) -> u32 {
    let halvings = |dim: i32, min: i32| {
        if dim >= min {
            (dim / min).ilog2()
        } else {
            0
        }
    };
    ((halvings(width, min_w) + halvings(height, min_h)) / 2).max(1)
}

/// Cut the room into zones. Splits alternate by shape: the wider axis
/// is cut, with the cut point rolled inside an off-center band and
/// clamped so both halves respect the minimum dimensions. A rectangle
/// too small to cut either way becomes a leaf early.
pub fn partition(width: i32, height: i32, min_w: i32, min_h: i32, rng: &mut GenRng) -> Vec<Zone> {
    let depth = split_depth(width, height, min_w, min_h);
    let mut zones = Vec::new();
    split(Zone::new(0, 0, width, height), depth, min_w, min_h, rng, &mut zones);
    zones
}

fn split(rect: Zone, depth: u32, min_w: i32, min_h: i32, rng: &mut GenRng, out: &mut Vec<Zone>) {
    if depth == 0 {
        out.push(rect);
        return;
    }
    let can_cut_x = rect.width >= 2 * min_w;
    let can_cut_y = rect.height >= 2 * min_h;
    let cut_x = match (can_cut_x, can_cut_y) {
        (true, true) => rect.width >= rect.height,
        (true, false) => true,
        (false, true) => false,
        (false, false) => {
            out.push(rect);
            return;
        }
    };

    if cut_x {
        let cut = ((rect.width as f32 * rng.frac(0.25, 0.75)).round() as i32)
            .clamp(min_w, rect.width - min_w);
        split(
            Zone::new(rect.x, rect.y, cut, rect.height),
            depth - 1,
            min_w,
            min_h,
            rng,
            out,
        );
        split(
            Zone::new(rect.x + cut, rect.y, rect.width - cut, rect.height),
            depth - 1,
            min_w,
            min_h,
            rng,
            out,
        );
    } else {
        let cut = ((rect.height as f32 * rng.frac(0.15, 0.75)).round() as i32)
            .clamp(min_h, rect.height - min_h);
        split(
            Zone::new(rect.x, rect.y, rect.width, cut),
            depth - 1,
            min_w,
            min_h,
            rng,
            out,
        );
        split(
            Zone::new(rect.x, rect.y + cut, rect.width, rect.height - cut),
            depth - 1,
            min_w,
            min_h,
            rng,
            out,
        );
    }
}

/// Detect a band of zones whose floors line up into an unbroken
/// full-width floor above the ground. Such a partition seals off
/// everything above the band and is regenerated.
pub fn has_sealing_band(zones: &[Zone], room_width: i32, room_height: i32) -> bool {
    for start in zones {
        if start.x != 0 || start.bottom() == room_height {
            continue;
        }
        let mut acc = start.width;
        let mut cur = *start;
        while acc < room_width {
            let Some(next) = zones.iter().find(|z| {
                z.x == cur.right() && (z.floor_row() - cur.floor_row()).abs() <= 1
            }) else {
                break;
            };
            acc += next.width;
            cur = *next;
        }
        if acc >= room_width {
            return true;
        }
    }
    false
}

/// Mark each zone's on-foot reachability.
///
/// Ground-band zones (floor on the room's bottom row) seed the flood;
/// a neighbor is walkable when the two zones share a vertical edge and
/// their floor rows differ by at most one tile.
pub fn mark_reachability(zones: &mut [Zone], room_height: i32) {
    for zone in zones.iter_mut() {
        zone.reachable = zone.floor_row() == room_height - 1;
    }
    propagate_reachability(zones);
}

/// Extend the reachable set through walkable neighbors without
/// reseeding, after a connector opened a new zone.
pub fn propagate_reachability(zones: &mut [Zone]) {
    loop {
        let mut changed = false;
        for i in 0..zones.len() {
            if zones[i].reachable {
                continue;
            }
            let me = zones[i];
            let connected = zones.iter().any(|other| {
                other.reachable
                    && (other.right() == me.x || me.right() == other.x)
                    && (other.floor_row() - me.floor_row()).abs() <= 1
            });
            if connected {
                zones[i].reachable = true;
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }
}

/// Zones still unreachable after the flood, in a shuffled order so
/// connector placement does not always favor the same corner.
pub fn unreachable_zones(zones: &[Zone], rng: &mut GenRng) -> Vec<usize> {
    let mut out: Vec<usize> = zones
        .iter()
        .enumerate()
        .filter(|(_, z)| !z.reachable)
        .map(|(i, _)| i)
        .collect();
    rng.shuffle(&mut out);
    out
}
