//! Diagonal slopes.

use crate::primitive::{PrimitiveData, PrimitiveKind, SlopeDir, StagedPrimitive};
use crate::room::{AtomKind, GridPos, StagedAtom};

/// A 45° slope of `length` tiles. `top` is the grid cell of the
/// highest slope tile; the run descends one row per column in `dir`,
/// with filler stone packed underneath every step down to the bottom
/// row so the ramp has a solid back.
pub fn stage_slope(top: GridPos, dir: SlopeDir, length: i32) -> StagedPrimitive {
    let origin = match dir {
        SlopeDir::DownRight => top,
        SlopeDir::DownLeft => top.offset(-(length - 1), 0),
    };
    let mut staged = StagedPrimitive::new(
        PrimitiveKind::Slope,
        PrimitiveData::Slope { dir, length },
        origin,
    );
    for i in 0..length {
        let step = match dir {
            SlopeDir::DownRight => top.offset(i, i),
            SlopeDir::DownLeft => top.offset(-i, i),
        };
        staged
            .atoms
            .push(StagedAtom::new(step, AtomKind::SlopeTile));
        for dy in (i + 1)..length {
            staged.atoms.push(StagedAtom::new(
                GridPos::new(step.x, top.y + dy),
                AtomKind::SlopeFill,
            ));
        }
    }
    staged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slope_down_right_shape() {
        let staged = stage_slope(GridPos::new(3, 2), SlopeDir::DownRight, 3);
        // 3 steps + 2 + 1 fill
        assert_eq!(staged.atoms.len(), 6);
        let steps: Vec<_> = staged
            .atoms
            .iter()
            .filter(|a| a.kind == AtomKind::SlopeTile)
            .map(|a| a.pos)
            .collect();
        assert_eq!(
            steps,
            vec![GridPos::new(3, 2), GridPos::new(4, 3), GridPos::new(5, 4)]
        );
        // Fill under the first step reaches the bottom row.
        assert!(staged
            .atoms
            .iter()
            .any(|a| a.kind == AtomKind::SlopeFill && a.pos == GridPos::new(3, 4)));
    }

    #[test]
    fn test_slope_down_left_origin() {
        let staged = stage_slope(GridPos::new(6, 2), SlopeDir::DownLeft, 3);
        assert_eq!(staged.origin, GridPos::new(4, 2));
        assert!(staged
            .atoms
            .iter()
            .any(|a| a.kind == AtomKind::SlopeTile && a.pos == GridPos::new(4, 4)));
    }
}
