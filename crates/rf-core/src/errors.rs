//! Generation error taxonomy.
//!
//! Almost every failure during generation is recovered locally: a
//! rejected placement is retried, infeasible geometry leaves a zone
//! unreachable, a degenerate partition is regenerated. These errors
//! exist so the recovery sites have something precise to match on;
//! none of them is fatal to a generation pass.

use thiserror::Error;

use crate::room::GridPos;

/// Errors raised (and mostly swallowed) during room generation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenError {
    /// An atom of a candidate primitive overlaps an already placed atom.
    /// Recovered by retrying with a new candidate position.
    #[error("placement conflict at {pos:?}")]
    PlacementConflict { pos: GridPos },

    /// An atom failed its own placement validity rule.
    #[error("invalid placement at {pos:?}")]
    InvalidPlacement { pos: GridPos },

    /// No connector or key position fits the geometry. Recovered by
    /// leaving the zone or door unreachable.
    #[error("infeasible geometry: {0}")]
    InfeasibleGeometry(&'static str),

    /// Path building needs at least two doors.
    #[error("room has {0} doors, need at least 2")]
    TooFewDoors(usize),

    /// A door is missing the anchor role path building starts from.
    #[error("door {0} has no center anchor")]
    MissingDoorAnchor(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GenError::TooFewDoors(1);
        assert!(err.to_string().contains("need at least 2"));

        let err = GenError::InfeasibleGeometry("no floor run");
        assert!(err.to_string().contains("no floor run"));
    }
}
