//! Solid filler walls.

use crate::primitive::{PrimitiveData, PrimitiveKind, StagedPrimitive};
use crate::room::{AtomKind, GridPos, StagedAtom};

/// A solid rectangle of filler stone.
pub fn stage_wall(origin: GridPos, width: i32, height: i32) -> StagedPrimitive {
    let mut staged = StagedPrimitive::new(
        PrimitiveKind::Wall,
        PrimitiveData::Wall { width, height },
        origin,
    );
    for dy in 0..height {
        for dx in 0..width {
            staged.atoms.push(StagedAtom::new(
                origin.offset(dx, dy),
                AtomKind::FillerStone,
            ));
        }
    }
    staged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wall_fills_rectangle() {
        let staged = stage_wall(GridPos::new(2, 3), 3, 4);
        assert_eq!(staged.atoms.len(), 12);
        assert!(staged.atoms.iter().any(|a| a.pos == GridPos::new(4, 6)));
        assert!(staged.atoms.iter().all(|a| a.collidable));
    }
}
