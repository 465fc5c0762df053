//! Surface hazards and collectibles.

use crate::primitive::{PrimitiveData, PrimitiveKind, StagedPrimitive};
use crate::room::{AtomKind, GridPos, StagedAtom};

fn single(kind: PrimitiveKind, atom: AtomKind, pos: GridPos) -> StagedPrimitive {
    let mut staged = StagedPrimitive::new(kind, PrimitiveData::None, pos);
    staged.atoms.push(StagedAtom::passable(pos, atom));
    staged
}

/// A cactus sitting on solid ground. Touching it hurts; paths may
/// still cross it at its difficulty weight.
pub fn stage_cactus(pos: GridPos) -> StagedPrimitive {
    single(PrimitiveKind::Cactus, AtomKind::CactusTile, pos)
}

/// A floor blade, the nastiest surface hazard.
pub fn stage_blade(pos: GridPos) -> StagedPrimitive {
    single(PrimitiveKind::FloorBlade, AtomKind::BladeTile, pos)
}

/// A fruit pickup.
pub fn stage_fruit(pos: GridPos) -> StagedPrimitive {
    single(PrimitiveKind::Fruit, AtomKind::FruitTile, pos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hazards_are_passable_single_atoms() {
        for staged in [
            stage_cactus(GridPos::new(3, 5)),
            stage_blade(GridPos::new(4, 5)),
            stage_fruit(GridPos::new(5, 5)),
        ] {
            assert_eq!(staged.atoms.len(), 1);
            assert!(!staged.atoms[0].collidable);
        }
    }
}
