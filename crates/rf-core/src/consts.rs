//! Engine-wide constants.

/// World units per grid cell. Atoms are centered on `cell * TILE_SIZE`.
pub const TILE_SIZE: f32 = 70.0;

/// Half a tile, the distance from an atom's center to its edge.
pub const HALF_TILE: f32 = TILE_SIZE / 2.0;

/// Default orbit radius for traversal anchors.
pub const ANCHOR_ORBIT: f32 = 40.0;

/// Default room dimensions in tiles.
pub const DEFAULT_ROOM_WIDTH: i32 = 40;
pub const DEFAULT_ROOM_HEIGHT: i32 = 26;

/// Minimum zone dimensions for the BSP partitioner.
pub const MIN_ZONE_WIDTH: i32 = 3;
pub const MIN_ZONE_HEIGHT: i32 = 3;

/// Bound on full re-partitions when an unreachable zone cluster is
/// detected. After this many attempts the partitioner falls back to a
/// single full-size zone.
pub const MAX_PARTITION_ATTEMPTS: u32 = 8;

/// Bound on random placement retries for a single primitive.
pub const MAX_PLACE_ATTEMPTS: u32 = 10;

/// Bound on primitives spawned by anchor expansion per room.
pub const EXPANSION_LIMIT: u32 = 10;

/// Safety cap on enclosed-area fill passes. The loop normally stops at
/// a fixed point well before this.
pub const MAX_FILL_PASSES: u32 = 16;

/// Difficulty levels run 0..=DIFFICULTY_MAX; the derived percentage is
/// `level / DIFFICULTY_MAX`.
pub const DIFFICULTY_MAX: u32 = 10;
