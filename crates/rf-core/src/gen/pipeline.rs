//! The full generation pipeline.
//!
//! Order matters: partition, border walls, zone floors, reachability
//! and connectors, dead-space fill, environmental carving and
//! expansion, doors and locks, connection cleanup, then path building
//! and scoring.

use serde::{Deserialize, Serialize};

use crate::capability::TraversalCapability;
use crate::consts::{
    DEFAULT_ROOM_HEIGHT, DEFAULT_ROOM_WIDTH, EXPANSION_LIMIT, MAX_PARTITION_ATTEMPTS,
    MAX_PLACE_ATTEMPTS, MIN_ZONE_HEIGHT, MIN_ZONE_WIDTH,
};
use crate::gen::connector::place_connectors;
use crate::gen::expand::expand;
use crate::gen::fill::fill_enclosed_areas;
use crate::gen::zone::{self, Zone};
use crate::path::builder::generate_paths;
use crate::path::graph::remove_intersecting_connections;
use crate::path::score::InterestingnessResult;
use crate::primitive::build::{build_pit, build_water, stage_door, stage_floor, stage_lock, stage_wall};
use crate::primitive::{DoorColour, DoorFlags, PrimitiveId};
use crate::rng::GenRng;
use crate::room::{AtomKind, GridPos, Room};

/// Tuning knobs for one generation pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenParams {
    pub width: i32,
    pub height: i32,
    /// 0..=10; drives pit sizing, hazard counts and scoring.
    pub difficulty: u32,
    pub min_zone_width: i32,
    pub min_zone_height: i32,
    pub expansion_limit: u32,
    pub capability: TraversalCapability,
}

impl Default for GenParams {
    fn default() -> Self {
        Self {
            width: DEFAULT_ROOM_WIDTH,
            height: DEFAULT_ROOM_HEIGHT,
            difficulty: 5,
            min_zone_width: MIN_ZONE_WIDTH,
            min_zone_height: MIN_ZONE_HEIGHT,
            expansion_limit: EXPANSION_LIMIT,
            capability: TraversalCapability::default(),
        }
    }
}

/// Generate one room. The scoring result is `None` when fewer than two
/// doors fit, which only happens in degenerate tiny rooms.
pub fn generate_room(
    params: &GenParams,
    rng: &mut GenRng,
) -> (Room, Option<InterestingnessResult>) {
    let mut zones = partition_with_retries(params, rng);
    let mut room = Room::new(params.width, params.height, params.difficulty);

    place_borders(&mut room);
    place_zone_floors(&mut room, &zones);

    zone::mark_reachability(&mut zones, params.height);
    place_connectors(&mut room, &mut zones, &params.capability, rng);

    fill_enclosed_areas(&mut room);

    place_environmental(&mut room, &params.capability, rng);
    expand(&mut room, &params.capability, rng, params.expansion_limit);

    place_doors(&mut room, rng);

    remove_intersecting_connections(&mut room);
    let result = generate_paths(&mut room).ok();
    (room, result)
}

/// Partition, rejecting layouts whose zone floors would seal the room
/// with an unbroken full-width line. After the retry budget the room
/// falls back to a single zone: one ground floor, always traversable.
fn partition_with_retries(params: &GenParams, rng: &mut GenRng) -> Vec<Zone> {
    for _ in 0..MAX_PARTITION_ATTEMPTS {
        let zones = zone::partition(
            params.width,
            params.height,
            params.min_zone_width,
            params.min_zone_height,
            rng,
        );
        if !zone::has_sealing_band(&zones, params.width, params.height) {
            return zones;
        }
    }
    vec![Zone::new(0, 0, params.width, params.height)]
}

/// Left, right and top border walls. The bottom edge stays open: the
/// ground-band zone floors are the bottom of the world.
fn place_borders(room: &mut Room) {
    let (w, h) = (room.width(), room.height());
    let _ = room.insert(stage_wall(GridPos::new(0, 0), 1, h));
    let _ = room.insert(stage_wall(GridPos::new(w - 1, 0), 1, h));
    let _ = room.insert(stage_wall(GridPos::new(1, 0), w - 2, 1));
}

/// One floor run along each zone's bottom row, clipped to the strip
/// inside the border walls.
fn place_zone_floors(room: &mut Room, zones: &[Zone]) {
    for zone in zones {
        let start = zone.x.max(1);
        let end = zone.right().min(room.width() - 1);
        if end > start {
            let _ = room.insert(stage_floor(
                GridPos::new(start, zone.floor_row()),
                end - start,
            ));
        }
    }
}

/// Carve pits and water bodies into the ground, scaled by difficulty.
fn place_environmental(room: &mut Room, cap: &TraversalCapability, rng: &mut GenRng) {
    let pit_budget = 1 + room.difficulty() / 4;
    for _ in 0..pit_budget {
        try_carve(room, cap, rng, build_pit);
    }
    if rng.percent(30 + room.difficulty() * 5) {
        try_carve(room, cap, rng, build_water);
    }
}

fn try_carve(
    room: &mut Room,
    cap: &TraversalCapability,
    rng: &mut GenRng,
    build: impl Fn(&mut Room, &mut GenRng, &TraversalCapability, GridPos) -> Result<PrimitiveId, crate::errors::GenError>,
) {
    let surfaces: Vec<GridPos> = room
        .atoms()
        .filter(|a| a.kind == AtomKind::FloorTile)
        .map(|a| a.pos)
        .collect();
    for _ in 0..MAX_PLACE_ATTEMPTS {
        let Some(&surface) = rng.choose(&surfaces) else {
            return;
        };
        if build(room, rng, cap, surface).is_ok() {
            return;
        }
    }
}

/// 2 to 4 doors in distinct colours, spread across standable spots,
/// each with its lock on the ground beside it. The start door's lock
/// never goes in; path building opens that door anyway.
fn place_doors(room: &mut Room, rng: &mut GenRng) {
    let want = 2 + rng.rn2(3) as usize;
    let mut colours = DoorColour::ALL;
    rng.shuffle(&mut colours);

    let mut spots = room.positions_above_floor();
    rng.shuffle(&mut spots);

    let mut placed: Vec<(PrimitiveId, GridPos, DoorColour)> = Vec::new();
    for spot in spots {
        if placed.len() == want {
            break;
        }
        // Keep doors out of each other's pockets.
        if placed.iter().any(|(_, p, _)| (p.x - spot.x).abs() < 5) {
            continue;
        }
        let colour = colours[placed.len()];
        if let Ok(id) = room.insert(stage_door(spot, colour, DoorFlags::empty())) {
            placed.push((id, spot, colour));
        }
    }

    if placed.is_empty() {
        return;
    }
    let start = placed
        .iter()
        .min_by_key(|(_, pos, _)| pos.x)
        .map(|(id, _, _)| *id)
        .unwrap();
    for (id, pos, colour) in placed {
        if id == start {
            continue;
        }
        for side in [pos.offset(1, 0), pos.offset(-1, 0)] {
            if room.insert(stage_lock(side, colour)).is_ok() {
                break;
            }
        }
    }
}
