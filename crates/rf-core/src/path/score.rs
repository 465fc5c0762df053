//! Path difficulty and the room interestingness metric.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::path::graph::AnchorGraph;
use crate::primitive::PrimitiveKind;
use crate::room::Room;

/// Sum of difficulty weights along a path, charged once per run of
/// consecutive anchors on the same primitive. Crossing a six-anchor
/// pit costs the pit's weight once, not six times.
pub fn path_difficulty(room: &Room, graph: &AnchorGraph, path: &[usize]) -> u32 {
    let mut total = 0;
    let mut last_owner = None;
    for &node in path {
        let owner = graph.node(node).owner;
        if last_owner != Some(owner) {
            total += room.primitive(owner).difficulty_weight();
            last_owner = Some(owner);
        }
    }
    total
}

/// Normalization ceilings for the interestingness terms.
const GOALS_CEIL: f32 = 3.0;
const DIFFICULTY_CEIL: f32 = 120.0;
const VERTICAL_KINDS_CEIL: f32 = 4.0;
const ABILITY_KINDS_CEIL: f32 = 3.0;

/// How interesting a generated room is, with the raw counters the
/// score was computed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestingnessResult {
    pub score: f32,
    pub anchors_visited: usize,
    pub total_anchors: usize,
    pub goals_reached: usize,
    pub avg_difficulty: f32,
    pub max_difficulty: u32,
    pub vertical_kinds: usize,
    pub ability_kinds: usize,
}

impl InterestingnessResult {
    /// Weighted sum of five normalized terms: anchor coverage, goals
    /// reached, average path difficulty, vertical-movement variety and
    /// ability variety. Each term clamps at 1 before weighting, so the
    /// score itself stays in 0..=1.
    pub fn compute(
        anchors_visited: usize,
        total_anchors: usize,
        goals_reached: usize,
        path_difficulties: &[u32],
        kinds_used: &HashSet<PrimitiveKind>,
    ) -> Self {
        let coverage = if total_anchors == 0 {
            0.0
        } else {
            anchors_visited as f32 / total_anchors as f32
        };
        let avg_difficulty = if path_difficulties.is_empty() {
            0.0
        } else {
            path_difficulties.iter().sum::<u32>() as f32 / path_difficulties.len() as f32
        };
        let max_difficulty = path_difficulties.iter().copied().max().unwrap_or(0);
        let vertical_kinds = kinds_used.iter().filter(|k| k.is_vertical_movement()).count();
        let ability_kinds = kinds_used.iter().filter(|k| k.is_ability_relevant()).count();

        let clamp = |v: f32| v.min(1.0);
        let score = 0.05 * clamp(coverage)
            + 0.2 * clamp(goals_reached as f32 / GOALS_CEIL)
            + 0.3 * clamp(avg_difficulty / DIFFICULTY_CEIL)
            + 0.2 * clamp(vertical_kinds as f32 / VERTICAL_KINDS_CEIL)
            + 0.25 * clamp(ability_kinds as f32 / ABILITY_KINDS_CEIL);

        Self {
            score,
            anchors_visited,
            total_anchors,
            goals_reached,
            avg_difficulty,
            max_difficulty,
            vertical_kinds,
            ability_kinds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::build::{stage_floor, stage_ladder};
    use crate::room::GridPos;

    #[test]
    fn test_difficulty_charged_per_run() {
        let mut room = Room::new(20, 12, 5);
        let low = room.insert(stage_floor(GridPos::new(1, 10), 5)).unwrap();
        let high = room.insert(stage_floor(GridPos::new(1, 4), 5)).unwrap();
        let ladder = room.insert(stage_ladder(GridPos::new(6, 4), 7)).unwrap();
        let graph = AnchorGraph::build(&room);

        let path = graph
            .find_path(
                graph.node_of(low, 0).unwrap(),
                graph.node_of(high, 0).unwrap(),
            )
            .unwrap();
        // floor + ladder + floor, each once: 1 + 3 + 1.
        assert_eq!(path_difficulty(&room, &graph, &path), 5);
        assert!(path.iter().any(|&n| graph.node(n).owner == ladder));
    }

    #[test]
    fn test_empty_room_scores_zero() {
        let result = InterestingnessResult::compute(0, 0, 0, &[], &HashSet::new());
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn test_terms_clamp_at_one() {
        let mut kinds = HashSet::new();
        for k in PrimitiveKind::ALL {
            kinds.insert(k);
        }
        // Absurd counters cannot push the score past 1.
        let result = InterestingnessResult::compute(500, 10, 50, &[10_000], &kinds);
        assert!(result.score <= 1.0 + f32::EPSILON);
        assert!(result.score > 0.99);
    }

    #[test]
    fn test_variety_raises_score() {
        let narrow: HashSet<_> = [PrimitiveKind::Floor].into_iter().collect();
        let varied: HashSet<_> = [
            PrimitiveKind::Floor,
            PrimitiveKind::Ladder,
            PrimitiveKind::Spring,
            PrimitiveKind::Water,
        ]
        .into_iter()
        .collect();
        let a = InterestingnessResult::compute(5, 10, 2, &[30], &narrow);
        let b = InterestingnessResult::compute(5, 10, 2, &[30], &varied);
        assert!(b.score > a.score);
        assert_eq!(b.vertical_kinds, 2);
        assert_eq!(b.ability_kinds, 2);
    }
}
