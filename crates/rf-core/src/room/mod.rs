//! The room: atom arena, occupancy grid and primitive list.
//!
//! All placement goes through [`Room::insert`], which validates a
//! staged primitive as a whole and either commits every atom or
//! commits nothing.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::errors::GenError;
use crate::geometry::Vec2;
use crate::primitive::{Primitive, PrimitiveId, PrimitiveKind, StagedPrimitive};
use crate::DIFFICULTY_MAX;

mod atom;

pub use crate::geometry::GridPos;
pub use atom::{Atom, AtomKind, StagedAtom};

/// Index of an atom in the room arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AtomId(pub usize);

/// A generated (or generating) room.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    width: i32,
    height: i32,
    difficulty: u32,
    /// Arena; carved atoms leave a `None` so ids stay stable.
    atoms: Vec<Option<Atom>>,
    occupancy: HashMap<GridPos, AtomId>,
    primitives: Vec<Primitive>,
}

impl Room {
    pub fn new(width: i32, height: i32, difficulty: u32) -> Self {
        Self {
            width,
            height,
            difficulty: difficulty.min(DIFFICULTY_MAX),
            atoms: Vec::new(),
            occupancy: HashMap::new(),
            primitives: Vec::new(),
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    /// Difficulty as a 0..=1 fraction of the scale.
    pub fn difficulty_percent(&self) -> f32 {
        (self.difficulty as f32 / DIFFICULTY_MAX as f32).clamp(0.0, 1.0)
    }

    pub fn in_bounds(&self, pos: GridPos) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    // ------------------------------------------------------------------
    // queries

    pub fn atom(&self, id: AtomId) -> Option<&Atom> {
        self.atoms.get(id.0).and_then(|slot| slot.as_ref())
    }

    pub fn atom_at(&self, pos: GridPos) -> Option<&Atom> {
        self.occupancy.get(&pos).and_then(|&id| self.atom(id))
    }

    pub fn has_atom_at(&self, pos: GridPos) -> bool {
        self.occupancy.contains_key(&pos)
    }

    pub fn has_atom_of_kind_at(&self, pos: GridPos, kind: AtomKind) -> bool {
        self.atom_at(pos).is_some_and(|a| a.kind == kind)
    }

    /// Solid collidable ground at this cell.
    pub fn has_solid_at(&self, pos: GridPos) -> bool {
        self.atom_at(pos)
            .is_some_and(|a| a.collidable && a.kind.is_solid())
    }

    pub fn atoms(&self) -> impl Iterator<Item = &Atom> {
        self.atoms.iter().filter_map(|slot| slot.as_ref())
    }

    pub fn primitives(&self) -> impl Iterator<Item = (PrimitiveId, &Primitive)> {
        self.primitives
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.removed)
            .map(|(i, p)| (PrimitiveId(i), p))
    }

    pub fn primitive(&self, id: PrimitiveId) -> &Primitive {
        &self.primitives[id.0]
    }

    pub fn primitive_mut(&mut self, id: PrimitiveId) -> &mut Primitive {
        &mut self.primitives[id.0]
    }

    pub fn primitive_count(&self) -> usize {
        self.primitives.len()
    }

    /// Doors in insertion order.
    pub fn doors(&self) -> Vec<PrimitiveId> {
        self.primitives()
            .filter(|(_, p)| p.kind == PrimitiveKind::Door)
            .map(|(id, _)| id)
            .collect()
    }

    /// All anchors in the room, flattened.
    pub fn all_anchors(&self) -> impl Iterator<Item = (PrimitiveId, usize, &crate::primitive::Anchor)> {
        self.primitives().flat_map(|(id, p)| {
            p.anchors.iter().enumerate().map(move |(i, a)| (id, i, a))
        })
    }

    pub fn total_anchor_count(&self) -> usize {
        self.primitives().map(|(_, p)| p.anchors.len()).sum()
    }

    /// Empty cells directly above a standable solid, candidates for
    /// surface-mounted placements.
    pub fn positions_above_floor(&self) -> Vec<GridPos> {
        let mut out = Vec::new();
        for atom in self.atoms() {
            if !(atom.collidable && atom.kind.is_solid()) {
                continue;
            }
            let above = atom.pos.offset(0, -1);
            if self.in_bounds(above) && !self.has_atom_at(above) {
                out.push(above);
            }
        }
        out.sort_by_key(|p| (p.y, p.x));
        out
    }

    // ------------------------------------------------------------------
    // mutation

    /// Validate and commit a staged primitive.
    ///
    /// Checks bounds, overlap against the occupancy grid (and within
    /// the staged set itself), then each atom's own placement rule.
    /// On any failure nothing is committed.
    pub fn insert(&mut self, staged: StagedPrimitive) -> Result<PrimitiveId, GenError> {
        for atom in &staged.atoms {
            if !self.in_bounds(atom.pos) {
                return Err(GenError::InvalidPlacement { pos: atom.pos });
            }
            if self.has_atom_at(atom.pos) {
                return Err(GenError::PlacementConflict { pos: atom.pos });
            }
        }
        for (i, atom) in staged.atoms.iter().enumerate() {
            if staged.atoms[..i].iter().any(|other| other.pos == atom.pos) {
                return Err(GenError::PlacementConflict { pos: atom.pos });
            }
        }
        for atom in &staged.atoms {
            if !atom.kind.validate_placement(atom.pos, self) {
                return Err(GenError::InvalidPlacement { pos: atom.pos });
            }
        }

        let id = PrimitiveId(self.primitives.len());
        let mut atom_ids = Vec::with_capacity(staged.atoms.len());
        for atom in &staged.atoms {
            let atom_id = AtomId(self.atoms.len());
            self.atoms.push(Some(Atom {
                kind: atom.kind,
                pos: atom.pos,
                size: atom.kind.footprint(),
                collidable: atom.collidable,
                owner: id,
            }));
            self.occupancy.insert(atom.pos, atom_id);
            atom_ids.push(atom_id);
        }

        let mut primitive = Primitive {
            kind: staged.kind,
            data: staged.data,
            origin: staged.origin,
            atoms: atom_ids,
            anchors: Vec::new(),
            internal_paths: Vec::new(),
            obstruction_lines: Vec::new(),
            removed: false,
        };
        primitive.generate_anchors(id);
        self.primitives.push(primitive);
        Ok(id)
    }

    /// Remove the carvable atom at `pos`, if any, together with every
    /// anchor any primitive generated for that cell. Returns whether a
    /// cell was carved. Non-carvable occupants stay put.
    pub fn carve_cell(&mut self, pos: GridPos) -> bool {
        let Some(&atom_id) = self.occupancy.get(&pos) else {
            return false;
        };
        let Some(atom) = self.atom(atom_id) else {
            return false;
        };
        if !atom.kind.is_carvable() {
            return false;
        }
        let owner = atom.owner;

        self.occupancy.remove(&pos);
        self.atoms[atom_id.0] = None;
        self.primitives[owner.0].atoms.retain(|&a| a != atom_id);
        for primitive in &mut self.primitives {
            primitive.remove_anchors_in_cell(pos);
            primitive.carve_obstruction_gap(pos);
        }
        true
    }

    /// Swap the visual kind of one atom in place (door opening).
    pub fn swap_atom_kind(&mut self, id: AtomId, kind: AtomKind) {
        if let Some(atom) = self.atoms.get_mut(id.0).and_then(|slot| slot.as_mut()) {
            atom.kind = kind;
            atom.size = kind.footprint();
        }
    }

    pub fn set_atom_collidable(&mut self, id: AtomId, collidable: bool) {
        if let Some(atom) = self.atoms.get_mut(id.0).and_then(|slot| slot.as_mut()) {
            atom.collidable = collidable;
        }
    }

    /// Take a primitive out of play: atoms leave the grid, anchors and
    /// lines are dropped, the slot stays so ids remain stable.
    pub fn remove_primitive(&mut self, id: PrimitiveId) {
        let atom_ids: Vec<AtomId> = self.primitives[id.0].atoms.drain(..).collect();
        for atom_id in atom_ids {
            if let Some(atom) = self.atoms[atom_id.0].take() {
                self.occupancy.remove(&atom.pos);
            }
        }
        let primitive = &mut self.primitives[id.0];
        primitive.anchors.clear();
        primitive.internal_paths.clear();
        primitive.obstruction_lines.clear();
        primitive.removed = true;
    }

    /// World position of the first anchor of a primitive, if any.
    pub fn primitive_anchor_pos(&self, id: PrimitiveId) -> Option<Vec2> {
        self.primitives[id.0].anchors.first().map(|a| a.pos)
    }
}
