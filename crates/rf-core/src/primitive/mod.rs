//! Composite primitives: multi-atom level features with anchors,
//! internal traversal paths and obstruction lines.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::geometry::{GridPos, Segment, Vec2, EPS};
use crate::room::{AtomId, StagedAtom};
use crate::{ANCHOR_ORBIT, HALF_TILE, TILE_SIZE};

pub mod anchor;
pub mod build;
pub mod kind;

pub use anchor::{Anchor, AnchorConnection, AnchorRole};
pub use kind::{PrimitiveCategory, PrimitiveKind};

/// Index of a primitive in its room. Primitives never hold references
/// back to the room; everything goes through ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrimitiveId(pub usize);

/// Which way a slope descends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum SlopeDir {
    DownLeft,
    DownRight,
}

/// Lock/door colour pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum DoorColour {
    Red,
    Blue,
    Green,
    Yellow,
}

impl DoorColour {
    pub const ALL: [DoorColour; 4] = [
        DoorColour::Red,
        DoorColour::Blue,
        DoorColour::Green,
        DoorColour::Yellow,
    ];
}

bitflags! {
    /// Door state.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DoorFlags: u8 {
        /// Door is open (lock satisfied or start door).
        const OPEN = 0x01;
        /// The entry door paths are built from.
        const START = 0x02;
    }
}

// Manual serde impl for DoorFlags
impl Serialize for DoorFlags {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.bits().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for DoorFlags {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bits = u8::deserialize(deserializer)?;
        Ok(DoorFlags::from_bits_truncate(bits))
    }
}

/// Per-kind payload. Only what anchor generation and path building
/// need to know after placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PrimitiveData {
    Floor { width: i32 },
    Wall { width: i32, height: i32 },
    Platform { width: i32 },
    Ladder { length: i32 },
    Slope { dir: SlopeDir, length: i32 },
    Spring { apex_tiles: i32 },
    Mushroom { apex_tiles: i32 },
    Pit { width: i32, depth: i32 },
    Water { width: i32, depth: i32 },
    Door { colour: DoorColour, flags: DoorFlags },
    Lock { colour: DoorColour },
    Key { colour: DoorColour },
    None,
}

/// A placed composite feature. Atoms are ids into the room arena;
/// anchors and obstruction lines are world-space.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Primitive {
    pub kind: PrimitiveKind,
    pub data: PrimitiveData,
    /// Top-left grid cell of the primitive's footprint.
    pub origin: GridPos,
    pub atoms: Vec<AtomId>,
    pub anchors: Vec<Anchor>,
    pub internal_paths: Vec<AnchorConnection>,
    pub obstruction_lines: Vec<Segment>,
    /// Set when a lock/key pair is consumed; removed primitives keep
    /// their slot so ids stay stable.
    pub removed: bool,
}

/// A primitive staged for insertion: kind, payload and the atoms it
/// wants to place. The room validates the whole set before anything
/// becomes visible.
#[derive(Debug, Clone)]
pub struct StagedPrimitive {
    pub kind: PrimitiveKind,
    pub data: PrimitiveData,
    pub origin: GridPos,
    pub atoms: Vec<StagedAtom>,
}

impl StagedPrimitive {
    pub fn new(kind: PrimitiveKind, data: PrimitiveData, origin: GridPos) -> Self {
        Self {
            kind,
            data,
            origin,
            atoms: Vec::new(),
        }
    }
}

impl Primitive {
    /// Difficulty weight contributed while a path stays on this
    /// primitive's anchors.
    pub fn difficulty_weight(&self) -> u32 {
        self.kind.difficulty_weight()
    }

    /// World-space center above a grid cell, where a standing anchor
    /// orbits.
    fn above(cell: GridPos) -> Vec2 {
        let w = cell.world();
        Vec2::new(w.x, w.y - ANCHOR_ORBIT)
    }

    fn push_anchor(
        &mut self,
        pos: Vec2,
        cell: GridPos,
        role: AnchorRole,
        owner: PrimitiveId,
    ) -> usize {
        self.anchors
            .push(Anchor::new(pos, cell, ANCHOR_ORBIT, role, owner));
        self.anchors.len() - 1
    }

    /// Build this primitive's anchors, internal paths and obstruction
    /// lines from its payload. Called once by the room at insertion.
    pub fn generate_anchors(&mut self, id: PrimitiveId) {
        self.anchors.clear();
        self.internal_paths.clear();
        self.obstruction_lines.clear();

        match self.data {
            PrimitiveData::Floor { width } | PrimitiveData::Platform { width } => {
                self.anchors_for_surface(id, width);
            }
            PrimitiveData::Wall { width, height } => {
                self.lines_for_box(width, height);
            }
            PrimitiveData::Ladder { length } => {
                let foot = self.origin.offset(0, length - 1);
                let t = self.push_anchor(Self::above(self.origin), self.origin, AnchorRole::Top, id);
                let b = self.push_anchor(Self::above(foot), foot, AnchorRole::Bottom, id);
                self.internal_paths.push(AnchorConnection::two_way(t, b));
            }
            PrimitiveData::Slope { dir, length } => {
                // High end is the origin for DownRight, the far end
                // for DownLeft.
                let (high, low) = match dir {
                    SlopeDir::DownRight => (
                        self.origin,
                        self.origin.offset(length - 1, length - 1),
                    ),
                    SlopeDir::DownLeft => (
                        self.origin.offset(length - 1, 0),
                        self.origin.offset(0, length - 1),
                    ),
                };
                let t = self.push_anchor(Self::above(high), high, AnchorRole::Top, id);
                let b = self.push_anchor(Self::above(low), low, AnchorRole::Bottom, id);
                self.internal_paths.push(AnchorConnection::two_way(t, b));
            }
            PrimitiveData::Spring { apex_tiles } | PrimitiveData::Mushroom { apex_tiles } => {
                let base =
                    self.push_anchor(Self::above(self.origin), self.origin, AnchorRole::Bottom, id);
                let apex_cell = self.origin.offset(0, -apex_tiles);
                let apex =
                    self.push_anchor(Self::above(apex_cell), apex_cell, AnchorRole::Top, id);
                // Falling back down is always possible.
                self.internal_paths
                    .push(AnchorConnection::two_way(base, apex));
            }
            PrimitiveData::Pit { width, depth } => {
                self.anchors_for_pit(id, width, depth);
            }
            PrimitiveData::Water { width, depth } => {
                self.anchors_for_water(id, width, depth);
            }
            PrimitiveData::Door { .. }
            | PrimitiveData::Lock { .. }
            | PrimitiveData::Key { .. } => {
                self.push_anchor(self.origin.world(), self.origin, AnchorRole::Center, id);
            }
            PrimitiveData::None => {
                // Hazards and collectibles: one anchor over the tile so
                // paths can route across them at their weight.
                self.push_anchor(Self::above(self.origin), self.origin, AnchorRole::Top, id);
            }
        }
    }

    /// One anchor orbiting above every tile of a walkable run, chained
    /// into a two-way internal path, plus an obstruction line along
    /// the top surface.
    fn anchors_for_surface(&mut self, id: PrimitiveId, width: i32) {
        for dx in 0..width {
            let cell = self.origin.offset(dx, 0);
            let i = self.push_anchor(Self::above(cell), cell, AnchorRole::Top, id);
            if dx > 0 {
                self.internal_paths
                    .push(AnchorConnection::two_way(i - 1, i));
            }
        }
        let w = self.origin.world();
        let y = w.y - HALF_TILE;
        self.obstruction_lines.push(Segment::new(
            Vec2::new(w.x - HALF_TILE, y),
            Vec2::new(w.x - HALF_TILE + width as f32 * TILE_SIZE, y),
        ));
    }

    /// Obstruction lines around a solid box. All four edges so the
    /// enclosed-area fill can pair them into rectangles.
    fn lines_for_box(&mut self, width: i32, height: i32) {
        let w = self.origin.world();
        let left = w.x - HALF_TILE;
        let right = left + width as f32 * TILE_SIZE;
        let top = w.y - HALF_TILE;
        let bottom = top + height as f32 * TILE_SIZE;
        self.obstruction_lines.extend([
            Segment::new(Vec2::new(left, top), Vec2::new(right, top)),
            Segment::new(Vec2::new(left, bottom), Vec2::new(right, bottom)),
            Segment::new(Vec2::new(left, top), Vec2::new(left, bottom)),
            Segment::new(Vec2::new(right, top), Vec2::new(right, bottom)),
        ]);
    }

    /// Pit interior anchors. Origin is the top-left interior cell.
    ///
    /// Side anchors hug the walls per row, bottom anchors line the
    /// floor per column, and one top anchor hovers over each opening
    /// column where the carved floor's anchors used to sit, keeping the
    /// rim linked. Internal paths encode how the pit is actually
    /// traversed: falling in from the top, walking the bottom,
    /// wall-jumping out between opposite walls, hopping from the floor
    /// onto the lowest wall rows. Top anchors never connect to each
    /// other, so a rim-to-rim route has to go down and climb back out.
    fn anchors_for_pit(&mut self, id: PrimitiveId, width: i32, depth: i32) {
        let mut left = Vec::with_capacity(depth as usize);
        let mut right = Vec::with_capacity(depth as usize);
        for dy in 0..depth {
            let lcell = self.origin.offset(0, dy);
            let rcell = self.origin.offset(width - 1, dy);
            left.push(self.push_anchor(lcell.world(), lcell, AnchorRole::Left, id));
            right.push(self.push_anchor(rcell.world(), rcell, AnchorRole::Right, id));
        }
        let mut bottom = Vec::with_capacity(width as usize);
        let mut top = Vec::with_capacity(width as usize);
        for dx in 0..width {
            let cell = self.origin.offset(dx, depth - 1);
            bottom.push(self.push_anchor(Self::above(cell), cell, AnchorRole::Bottom, id));
        }
        for dx in 0..width {
            let cell = self.origin.offset(dx, 0);
            top.push(self.push_anchor(Self::above(cell), cell, AnchorRole::Top, id));
        }

        // Falling in, anywhere along the opening.
        for dx in 0..width as usize {
            self.internal_paths
                .push(AnchorConnection::one_way(top[dx], bottom[dx]));
        }
        // Walking the bottom.
        for pair in bottom.windows(2) {
            self.internal_paths
                .push(AnchorConnection::two_way(pair[0], pair[1]));
        }
        // Wall jumps gain a row per wall-to-wall hop.
        for dy in 1..depth as usize {
            self.internal_paths
                .push(AnchorConnection::one_way(left[dy], right[dy - 1]));
            self.internal_paths
                .push(AnchorConnection::one_way(right[dy], left[dy - 1]));
        }
        // Topmost wall anchors exit over their side of the rim.
        self.internal_paths
            .push(AnchorConnection::one_way(left[0], top[0]));
        self.internal_paths
            .push(AnchorConnection::one_way(right[0], top[width as usize - 1]));
        // From the floor, the lowest three wall rows are in jump range.
        let reachable_rows = depth.saturating_sub(3).max(0) as usize..depth as usize;
        for (i, &b) in bottom.iter().enumerate() {
            for dy in reachable_rows.clone() {
                if i == 0 {
                    self.internal_paths
                        .push(AnchorConnection::one_way(b, left[dy]));
                }
                if i == width as usize - 1 {
                    self.internal_paths
                        .push(AnchorConnection::one_way(b, right[dy]));
                }
            }
        }

        // The opening still gets a top line; pits never obstruct, so
        // the connection pruning pass skips it, but the fill pass can
        // see the rim.
        let w = self.origin.world();
        let y = w.y - HALF_TILE;
        self.obstruction_lines.push(Segment::new(
            Vec2::new(w.x - HALF_TILE, y),
            Vec2::new(w.x - HALF_TILE + width as f32 * TILE_SIZE, y),
        ));
    }

    /// Water interior: one anchor per submerged cell, every orthogonal
    /// neighbor pair connected both ways. Swimming is omnidirectional.
    /// Surface anchors ride above their cell, in the spots the carved
    /// floor's anchors vacated, so the rim stays linked to the water.
    fn anchors_for_water(&mut self, id: PrimitiveId, width: i32, depth: i32) {
        let idx = |dx: i32, dy: i32| (dy * width + dx) as usize;
        for dy in 0..depth {
            for dx in 0..width {
                let cell = self.origin.offset(dx, dy);
                if dy == 0 {
                    self.push_anchor(Self::above(cell), cell, AnchorRole::Top, id);
                } else {
                    self.push_anchor(cell.world(), cell, AnchorRole::Center, id);
                }
            }
        }
        for dy in 0..depth {
            for dx in 0..width {
                if dx + 1 < width {
                    self.internal_paths
                        .push(AnchorConnection::two_way(idx(dx, dy), idx(dx + 1, dy)));
                }
                if dy + 1 < depth {
                    self.internal_paths
                        .push(AnchorConnection::two_way(idx(dx, dy), idx(dx, dy + 1)));
                }
            }
        }
    }

    /// Drop every anchor generated for the given cell, remapping
    /// internal path indices and discarding paths that lost an
    /// endpoint. Used when a pit, water body or connector carves a
    /// tile out from under its anchors.
    pub fn remove_anchors_in_cell(&mut self, cell: GridPos) {
        let keep: Vec<bool> = self.anchors.iter().map(|a| a.cell != cell).collect();
        if keep.iter().all(|&k| k) {
            return;
        }

        let mut remap = vec![usize::MAX; self.anchors.len()];
        let mut next = 0;
        for (i, &k) in keep.iter().enumerate() {
            if k {
                remap[i] = next;
                next += 1;
            }
        }

        let mut i = 0;
        self.anchors.retain(|_| {
            let k = keep[i];
            i += 1;
            k
        });
        self.internal_paths.retain_mut(|conn| {
            if remap[conn.from] == usize::MAX || remap[conn.to] == usize::MAX {
                return false;
            }
            conn.from = remap[conn.from];
            conn.to = remap[conn.to];
            true
        });
    }

    /// Cut the span of a carved cell out of every obstruction line
    /// touching it, so routes through the hole are not treated as
    /// crossing this primitive. Axis-aligned lines split into at most
    /// two pieces; pieces shorter than the tolerance vanish.
    pub fn carve_obstruction_gap(&mut self, cell: GridPos) {
        let centre = cell.world();
        let (x_lo, x_hi) = (centre.x - HALF_TILE, centre.x + HALF_TILE);
        let (y_lo, y_hi) = (centre.y - HALF_TILE, centre.y + HALF_TILE);

        let mut trimmed = Vec::with_capacity(self.obstruction_lines.len());
        for line in self.obstruction_lines.drain(..) {
            if line.is_horizontal() {
                let y = line.a.y;
                let (lo, hi) = (line.a.x.min(line.b.x), line.a.x.max(line.b.x));
                if y < y_lo - EPS || y > y_hi + EPS || hi <= x_lo + EPS || lo >= x_hi - EPS {
                    trimmed.push(line);
                    continue;
                }
                if lo < x_lo - EPS {
                    trimmed.push(Segment::new(Vec2::new(lo, y), Vec2::new(x_lo, y)));
                }
                if hi > x_hi + EPS {
                    trimmed.push(Segment::new(Vec2::new(x_hi, y), Vec2::new(hi, y)));
                }
            } else if line.is_vertical() {
                let x = line.a.x;
                let (lo, hi) = (line.a.y.min(line.b.y), line.a.y.max(line.b.y));
                if x < x_lo - EPS || x > x_hi + EPS || hi <= y_lo + EPS || lo >= y_hi - EPS {
                    trimmed.push(line);
                    continue;
                }
                if lo < y_lo - EPS {
                    trimmed.push(Segment::new(Vec2::new(x, lo), Vec2::new(x, y_lo)));
                }
                if hi > y_hi + EPS {
                    trimmed.push(Segment::new(Vec2::new(x, y_hi), Vec2::new(x, hi)));
                }
            } else {
                trimmed.push(line);
            }
        }
        self.obstruction_lines = trimmed;
    }
}
