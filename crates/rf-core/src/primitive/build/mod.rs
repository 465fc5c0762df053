//! Staging constructors for each primitive kind.
//!
//! Everything here produces a [`StagedPrimitive`] (or, for the carving
//! kinds, mutates the room directly) and leaves validation to
//! [`Room::insert`](crate::room::Room::insert).

mod door;
mod floor;
mod hazards;
mod ladder;
mod pit;
mod slope;
mod spring;
mod wall;
mod water;

pub use door::{open_door, stage_door, stage_key, stage_lock, unlock_door};
pub use floor::{stage_floor, stage_platform};
pub use hazards::{stage_blade, stage_cactus, stage_fruit};
pub use ladder::stage_ladder;
pub use pit::build_pit;
pub use slope::stage_slope;
pub use spring::{stage_mushroom, stage_spring};
pub use wall::stage_wall;
pub use water::build_water;
