//! roomforge-core: procedural platformer room generation.
//!
//! A room is generated in passes: a BSP partition cuts the grid into
//! zones, each zone gets a floor, vertical connectors make high zones
//! reachable, dead space fills with stone, the room grows outward from
//! its anchors, doors and locks go in, and finally paths are built
//! from the start door to every goal and the whole thing is scored.
//!
//! Everything is deterministic per seed:
//!
//! ```
//! use rf_core::gen::{generate_room, GenParams};
//! use rf_core::GenRng;
//!
//! let params = GenParams::default();
//! let (room, score) = generate_room(&params, &mut GenRng::new(42));
//! assert!(room.doors().len() >= 2);
//! assert!(score.is_some());
//! ```

pub mod capability;
pub mod gen;
pub mod geometry;
pub mod path;
pub mod primitive;
pub mod room;

mod consts;
mod errors;
mod rng;

pub use capability::TraversalCapability;
pub use consts::*;
pub use errors::GenError;
pub use rng::GenRng;
