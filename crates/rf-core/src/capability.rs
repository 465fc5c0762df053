//! Player traversal capabilities.
//!
//! The generator never owns physics. Connector and hazard placement
//! consume this small immutable snapshot of the player's movement
//! constants and derive feasibility bounds from it.

use serde::{Deserialize, Serialize};

use crate::TILE_SIZE;

/// Immutable movement constants, sampled once per generation pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraversalCapability {
    /// Downward acceleration in world units / s².
    pub gravity: f32,
    /// Horizontal run speed in world units / s.
    pub move_speed: f32,
    /// Initial upward speed of a regular jump.
    pub jump_speed: f32,
    /// Initial upward speed when launched by a spring.
    pub spring_speed: f32,
    /// Horizontal air acceleration available during a wall jump.
    pub air_acceleration: f32,
}

impl Default for TraversalCapability {
    fn default() -> Self {
        Self {
            gravity: 980.0,
            move_speed: 150.0,
            jump_speed: 420.0,
            spring_speed: 700.0,
            air_acceleration: 120.0,
        }
    }
}

impl TraversalCapability {
    /// Apex height of a spring launch, in whole tiles.
    ///
    /// Ballistic apex `v² / 2g`, divided by the tile size.
    pub fn spring_apex_tiles(&self) -> i32 {
        let apex = (self.spring_speed * self.spring_speed) / (2.0 * self.gravity);
        (apex / TILE_SIZE).floor() as i32
    }

    /// Apex height of a regular jump, in whole tiles.
    pub fn jump_apex_tiles(&self) -> i32 {
        let apex = (self.jump_speed * self.jump_speed) / (2.0 * self.gravity);
        (apex / TILE_SIZE).floor() as i32
    }

    /// Maximum horizontal gap the player can clear from a standing
    /// jump, in whole tiles. Solves the fall parabola for the time to
    /// drop one tile while decelerating horizontally, then converts
    /// the distance covered at run speed.
    pub fn max_gap_tiles(&self) -> i32 {
        let a = 0.5 * self.gravity;
        let b = -self.air_acceleration;
        let c = TILE_SIZE;
        let discriminant = b * b + 4.0 * a * c;
        let t = (-b + discriminant.sqrt()) / (2.0 * a);
        let horizontal = self.move_speed * t;
        (horizontal / TILE_SIZE).ceil() as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spring_apex_positive() {
        let cap = TraversalCapability::default();
        assert!(cap.spring_apex_tiles() >= 3);
        assert!(cap.spring_apex_tiles() > cap.jump_apex_tiles());
    }

    #[test]
    fn test_gap_positive() {
        let cap = TraversalCapability::default();
        assert!(cap.max_gap_tiles() >= 1);
    }

    #[test]
    fn test_stronger_spring_reaches_higher() {
        let weak = TraversalCapability {
            spring_speed: 400.0,
            ..Default::default()
        };
        let strong = TraversalCapability {
            spring_speed: 900.0,
            ..Default::default()
        };
        assert!(strong.spring_apex_tiles() > weak.spring_apex_tiles());
    }
}
