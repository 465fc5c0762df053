//! Anchors and anchor connections.
//!
//! Anchors are world-space circles primitives expose as attachment and
//! traversal points. Two anchors connect when their circles overlap;
//! a primitive can also declare explicit internal paths between its own
//! anchors (how a pit is traversed through its interior, say).

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::geometry::{GridPos, Vec2};
use crate::rng::GenRng;

use super::PrimitiveId;

/// Where on its owning primitive an anchor sits.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum AnchorRole {
    Center,
    Top,
    Left,
    Right,
    Bottom,
    TopLeft,
    /// Mid-air waypoint on a jump arc, not attached to any tile.
    JumpArc,
}

/// A traversal/attachment point in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub pos: Vec2,
    /// Grid cell this anchor was generated for. Standing anchors orbit
    /// one cell above their tile, so the world point alone cannot say
    /// which tile the anchor belongs to; carving that tile drops the
    /// anchor as stale.
    pub cell: GridPos,
    pub radius: f32,
    pub role: AnchorRole,
    pub owner: PrimitiveId,
}

impl Anchor {
    pub fn new(pos: Vec2, cell: GridPos, radius: f32, role: AnchorRole, owner: PrimitiveId) -> Self {
        Self {
            pos,
            cell,
            radius,
            role,
            owner,
        }
    }

    /// Two anchors connect when their circles overlap or touch.
    pub fn connects_to(&self, other: &Anchor) -> bool {
        self.pos.distance_to(other.pos) <= self.radius + other.radius
    }

    /// A uniformly random point inside this anchor's circle, used when
    /// scattering expansion candidates around an anchor.
    pub fn random_nearby_point(&self, rng: &mut GenRng) -> Vec2 {
        let angle = rng.frac(0.0, std::f32::consts::TAU);
        // sqrt for area-uniform sampling
        let dist = self.radius * rng.frac(0.0, 1.0).sqrt();
        Vec2::new(
            self.pos.x + angle.cos() * dist,
            self.pos.y + angle.sin() * dist,
        )
    }
}

/// A declared path between two anchors of the same primitive, indexed
/// into the owner's anchor list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorConnection {
    pub from: usize,
    pub to: usize,
    pub bidirectional: bool,
}

impl AnchorConnection {
    pub fn one_way(from: usize, to: usize) -> Self {
        Self {
            from,
            to,
            bidirectional: false,
        }
    }

    pub fn two_way(from: usize, to: usize) -> Self {
        Self {
            from,
            to,
            bidirectional: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchor_at(pos: Vec2, role: AnchorRole) -> Anchor {
        Anchor::new(pos, pos.grid(), 40.0, role, PrimitiveId(0))
    }

    #[test]
    fn test_connects_by_overlap() {
        let a = anchor_at(Vec2::new(0.0, 0.0), AnchorRole::Top);
        let b = anchor_at(Vec2::new(70.0, 0.0), AnchorRole::Top);
        let c = anchor_at(Vec2::new(200.0, 0.0), AnchorRole::Top);
        assert!(a.connects_to(&b));
        assert!(b.connects_to(&a));
        assert!(!a.connects_to(&c));
    }

    #[test]
    fn test_touching_circles_connect() {
        let a = anchor_at(Vec2::new(0.0, 0.0), AnchorRole::Top);
        let b = anchor_at(Vec2::new(80.0, 0.0), AnchorRole::Top);
        assert!(a.connects_to(&b));
    }

    #[test]
    fn test_random_nearby_point_stays_inside() {
        let mut rng = GenRng::new(7);
        let a = anchor_at(Vec2::new(10.0, -5.0), AnchorRole::Center);
        for _ in 0..100 {
            let p = a.random_nearby_point(&mut rng);
            assert!(a.pos.distance_to(p) <= a.radius + 1e-3);
        }
    }
}
