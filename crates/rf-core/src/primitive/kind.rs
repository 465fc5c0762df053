//! The closed primitive registry.
//!
//! Every level feature the generator can place is one of these kinds.
//! Categories, difficulty weights and connection behavior are data
//! methods on the enum so matches stay exhaustive.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Composite level-feature type.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum PrimitiveKind {
    Floor = 0,
    Wall = 1,
    Platform = 2,
    Ladder = 3,
    Slope = 4,
    Spring = 5,
    Mushroom = 6,
    Pit = 7,
    Water = 8,
    Cactus = 9,
    FloorBlade = 10,
    Fruit = 11,
    Door = 12,
    DoorLock = 13,
    DoorKey = 14,
}

/// Broad role of a primitive, used by templates and scoring.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum PrimitiveCategory {
    Floor,
    Hazard,
    Collectible,
    Platform,
    Environmental,
    MovementModifier,
    Exit,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 15] = [
        PrimitiveKind::Floor,
        PrimitiveKind::Wall,
        PrimitiveKind::Platform,
        PrimitiveKind::Ladder,
        PrimitiveKind::Slope,
        PrimitiveKind::Spring,
        PrimitiveKind::Mushroom,
        PrimitiveKind::Pit,
        PrimitiveKind::Water,
        PrimitiveKind::Cactus,
        PrimitiveKind::FloorBlade,
        PrimitiveKind::Fruit,
        PrimitiveKind::Door,
        PrimitiveKind::DoorLock,
        PrimitiveKind::DoorKey,
    ];

    pub const fn category(&self) -> PrimitiveCategory {
        match self {
            PrimitiveKind::Floor => PrimitiveCategory::Floor,
            PrimitiveKind::Wall => PrimitiveCategory::Environmental,
            PrimitiveKind::Platform | PrimitiveKind::Slope => PrimitiveCategory::Platform,
            PrimitiveKind::Ladder | PrimitiveKind::Spring | PrimitiveKind::Mushroom => {
                PrimitiveCategory::MovementModifier
            }
            PrimitiveKind::Pit | PrimitiveKind::Water | PrimitiveKind::DoorLock => {
                PrimitiveCategory::Environmental
            }
            PrimitiveKind::Cactus | PrimitiveKind::FloorBlade => PrimitiveCategory::Hazard,
            PrimitiveKind::Fruit | PrimitiveKind::DoorKey => PrimitiveCategory::Collectible,
            PrimitiveKind::Door => PrimitiveCategory::Exit,
        }
    }

    /// Difficulty weight summed along traversal paths.
    pub const fn difficulty_weight(&self) -> u32 {
        match self {
            PrimitiveKind::Floor => 1,
            PrimitiveKind::Wall => 1,
            PrimitiveKind::Platform => 2,
            PrimitiveKind::Ladder => 3,
            PrimitiveKind::Slope => 2,
            PrimitiveKind::Spring => 4,
            PrimitiveKind::Mushroom => 3,
            PrimitiveKind::Pit => 5,
            PrimitiveKind::Water => 4,
            PrimitiveKind::Cactus => 6,
            PrimitiveKind::FloorBlade => 7,
            PrimitiveKind::Fruit => 1,
            PrimitiveKind::Door => 1,
            PrimitiveKind::DoorLock => 2,
            PrimitiveKind::DoorKey => 2,
        }
    }

    /// Whether this primitive's obstruction lines block anchor
    /// connections. Pits and water bodies are traversed through their
    /// interior, so they never obstruct.
    pub const fn obstructs_connections(&self) -> bool {
        !matches!(self, PrimitiveKind::Pit | PrimitiveKind::Water)
    }

    /// The four vertical-movement kinds counted by the
    /// interestingness score.
    pub const fn is_vertical_movement(&self) -> bool {
        matches!(
            self,
            PrimitiveKind::Ladder
                | PrimitiveKind::Slope
                | PrimitiveKind::Spring
                | PrimitiveKind::Mushroom
        )
    }

    /// The three kinds that exercise a distinct player ability
    /// (climb, wall-jump, swim), counted by the interestingness score.
    pub const fn is_ability_relevant(&self) -> bool {
        matches!(
            self,
            PrimitiveKind::Ladder | PrimitiveKind::Pit | PrimitiveKind::Water
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_table_is_complete() {
        use strum::IntoEnumIterator;
        assert_eq!(PrimitiveKind::ALL.len(), PrimitiveKind::iter().count());
    }

    #[test]
    fn test_weights_positive() {
        for kind in PrimitiveKind::ALL {
            assert!(kind.difficulty_weight() >= 1, "{kind} weight");
        }
    }

    #[test]
    fn test_obstruction_exemptions() {
        assert!(!PrimitiveKind::Pit.obstructs_connections());
        assert!(!PrimitiveKind::Water.obstructs_connections());
        assert!(PrimitiveKind::Wall.obstructs_connections());
        assert!(PrimitiveKind::Floor.obstructs_connections());
    }

    #[test]
    fn test_score_groups() {
        let vertical: Vec<_> = PrimitiveKind::ALL
            .iter()
            .filter(|k| k.is_vertical_movement())
            .collect();
        assert_eq!(vertical.len(), 4);

        let ability: Vec<_> = PrimitiveKind::ALL
            .iter()
            .filter(|k| k.is_ability_relevant())
            .collect();
        assert_eq!(ability.len(), 3);
    }

    #[test]
    fn test_categories() {
        assert_eq!(PrimitiveKind::Floor.category(), PrimitiveCategory::Floor);
        assert_eq!(PrimitiveKind::Door.category(), PrimitiveCategory::Exit);
        assert_eq!(
            PrimitiveKind::Ladder.category(),
            PrimitiveCategory::MovementModifier
        );
        assert_eq!(PrimitiveKind::Cactus.category(), PrimitiveCategory::Hazard);
    }
}
