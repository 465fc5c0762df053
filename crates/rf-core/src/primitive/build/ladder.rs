//! Ladders.

use crate::primitive::{PrimitiveData, PrimitiveKind, StagedPrimitive};
use crate::room::{AtomKind, GridPos, StagedAtom};

/// A vertical ladder whose topmost tile sits at `top`. Ladder tiles
/// never collide; the player climbs through them.
pub fn stage_ladder(top: GridPos, length: i32) -> StagedPrimitive {
    let mut staged = StagedPrimitive::new(
        PrimitiveKind::Ladder,
        PrimitiveData::Ladder { length },
        top,
    );
    for dy in 0..length {
        staged
            .atoms
            .push(StagedAtom::new(top.offset(0, dy), AtomKind::LadderTile));
    }
    staged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ladder_runs_downward() {
        let staged = stage_ladder(GridPos::new(5, 2), 4);
        assert_eq!(staged.atoms.len(), 4);
        assert_eq!(staged.atoms[3].pos, GridPos::new(5, 5));
        assert!(staged.atoms.iter().all(|a| !a.collidable));
    }
}
