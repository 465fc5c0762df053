//! Primitive compatibility weights.
//!
//! Expansion grows the room outward from what is already placed; this
//! table says which kinds like to appear next to which, and how much.

use crate::primitive::PrimitiveKind;
use crate::rng::GenRng;

/// Weighted neighbor kinds for a placed primitive. Kinds not listed
/// never spawn from that neighbor.
pub fn compatible(kind: PrimitiveKind) -> &'static [(PrimitiveKind, f32)] {
    use PrimitiveKind::*;
    match kind {
        Floor => &[(Ladder, 0.9), (Mushroom, 0.7), (Cactus, 0.3), (Water, 0.3)],
        Ladder => &[(Floor, 0.9), (Platform, 0.8)],
        Mushroom => &[(Floor, 0.7), (Platform, 0.6)],
        Platform => &[(Ladder, 0.8), (Mushroom, 0.6)],
        Water => &[(Platform, 0.7), (Floor, 0.3)],
        Pit => &[(Platform, 0.5), (FloorBlade, 0.5)],
        Fruit => &[(Platform, 0.5), (Floor, 0.3)],
        FloorBlade => &[(Floor, 0.6), (Platform, 0.3), (Mushroom, 0.2)],
        Cactus => &[(Floor, 0.4)],
        Spring => &[(Floor, 0.6), (Platform, 0.4)],
        Wall | Slope | Door | DoorLock | DoorKey => &[],
    }
}

/// Roulette-wheel draw over a weight table. `None` when the table is
/// empty.
pub fn weighted_choice(
    rng: &mut GenRng,
    options: &[(PrimitiveKind, f32)],
) -> Option<PrimitiveKind> {
    let total: f32 = options.iter().map(|(_, w)| w).sum();
    if total <= 0.0 {
        return None;
    }
    let mut roll = rng.frac(0.0, total);
    for &(kind, weight) in options {
        if roll < weight {
            return Some(kind);
        }
        roll -= weight;
    }
    options.last().map(|&(kind, _)| kind)
}
