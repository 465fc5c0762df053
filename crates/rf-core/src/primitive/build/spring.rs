//! Launch tiles: springs and bounce mushrooms.

use crate::primitive::{PrimitiveData, PrimitiveKind, StagedPrimitive};
use crate::room::{AtomKind, GridPos, StagedAtom};

/// A spring sitting on solid ground at `pos`, launching `apex_tiles`
/// tiles up. Callers cap the apex at the player's spring launch reach;
/// connectors aim it at the hole they carved.
pub fn stage_spring(pos: GridPos, apex_tiles: i32) -> StagedPrimitive {
    let mut staged = StagedPrimitive::new(
        PrimitiveKind::Spring,
        PrimitiveData::Spring { apex_tiles },
        pos,
    );
    staged.atoms.push(StagedAtom::new(pos, AtomKind::SpringTile));
    staged
}

/// A bounce mushroom: weaker launch, regular jump apex.
pub fn stage_mushroom(pos: GridPos, apex_tiles: i32) -> StagedPrimitive {
    let mut staged = StagedPrimitive::new(
        PrimitiveKind::Mushroom,
        PrimitiveData::Mushroom { apex_tiles },
        pos,
    );
    staged
        .atoms
        .push(StagedAtom::new(pos, AtomKind::MushroomTile));
    staged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::TraversalCapability;

    #[test]
    fn test_spring_apex_above_mushroom() {
        let cap = TraversalCapability::default();
        let spring = stage_spring(GridPos::new(3, 8), cap.spring_apex_tiles());
        let mushroom = stage_mushroom(GridPos::new(5, 8), cap.jump_apex_tiles());
        let apex = |d: &PrimitiveData| match *d {
            PrimitiveData::Spring { apex_tiles } | PrimitiveData::Mushroom { apex_tiles } => {
                apex_tiles
            }
            _ => unreachable!(),
        };
        assert!(apex(&spring.data) > apex(&mushroom.data));
    }
}
