//! Grid and world-space geometry.
//!
//! The room is a tile grid; atoms live on cells and anchors live in
//! world space (cell × `TILE_SIZE`, y growing downward). Obstruction
//! tests and the enclosed-area fill work on world-space segments.

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use crate::{HALF_TILE, TILE_SIZE};

pub(crate) const EPS: f32 = 1e-3;

/// A grid cell coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// World-space center of this cell.
    pub fn world(self) -> Vec2 {
        Vec2::new(self.x as f32 * TILE_SIZE, self.y as f32 * TILE_SIZE)
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// A 2D world-space point.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: Vec2) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// The grid cell whose tile contains this point.
    pub fn grid(self) -> GridPos {
        GridPos::new(
            ((self.x + HALF_TILE) / TILE_SIZE).floor() as i32,
            ((self.y + HALF_TILE) / TILE_SIZE).floor() as i32,
        )
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A world-space line segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub a: Vec2,
    pub b: Vec2,
}

impl Segment {
    pub const fn new(a: Vec2, b: Vec2) -> Self {
        Self { a, b }
    }

    pub fn is_vertical(&self) -> bool {
        (self.a.x - self.b.x).abs() < EPS
    }

    pub fn is_horizontal(&self) -> bool {
        (self.a.y - self.b.y).abs() < EPS
    }
}

/// Sign of the cross product (b - a) × (c - a): 1 counterclockwise,
/// -1 clockwise, 0 collinear within tolerance.
fn orientation(a: Vec2, b: Vec2, c: Vec2) -> i32 {
    let cross = (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x);
    if cross > EPS {
        1
    } else if cross < -EPS {
        -1
    } else {
        0
    }
}

/// Whether two segments intersect for obstruction purposes.
///
/// A strict interior crossing counts. An endpoint merely touching the
/// other segment (shared endpoint or T-junction) does not: a connection
/// is allowed to start or end on an obstruction line. Collinear
/// segments count only when they overlap over a positive length.
pub fn segments_intersect(p1: Vec2, p2: Vec2, p3: Vec2, p4: Vec2) -> bool {
    let o1 = orientation(p1, p2, p3);
    let o2 = orientation(p1, p2, p4);
    let o3 = orientation(p3, p4, p1);
    let o4 = orientation(p3, p4, p2);

    if o1 != 0 && o2 != 0 && o3 != 0 && o4 != 0 {
        return o1 != o2 && o3 != o4;
    }

    if o1 == 0 && o2 == 0 && o3 == 0 && o4 == 0 {
        // Collinear: project on the dominant axis and measure overlap.
        let horizontal = (p2.x - p1.x).abs() >= (p2.y - p1.y).abs();
        let (a1, a2, b1, b2) = if horizontal {
            (p1.x, p2.x, p3.x, p4.x)
        } else {
            (p1.y, p2.y, p3.y, p4.y)
        };
        let (alo, ahi) = (a1.min(a2), a1.max(a2));
        let (blo, bhi) = (b1.min(b2), b1.max(b2));
        return ahi.min(bhi) - alo.max(blo) > EPS;
    }

    // Some orientation is zero: an endpoint lies on the other segment.
    // Touching is not crossing.
    false
}

/// Merge colinear segments that overlap or touch into maximal runs.
///
/// Only axis-aligned segments participate (the enclosed-area fill only
/// produces those); anything else passes through unchanged.
pub fn merge_colinear(segments: &[Segment]) -> Vec<Segment> {
    let mut verticals: Vec<Segment> = Vec::new();
    let mut horizontals: Vec<Segment> = Vec::new();
    let mut rest: Vec<Segment> = Vec::new();

    for seg in segments {
        if seg.is_vertical() {
            verticals.push(*seg);
        } else if seg.is_horizontal() {
            horizontals.push(*seg);
        } else {
            rest.push(*seg);
        }
    }

    let mut merged = merge_axis(&verticals, false);
    merged.extend(merge_axis(&horizontals, true));
    merged.extend(rest);
    merged
}

/// Merge one orientation class. `horizontal` selects which coordinate
/// is the run axis.
fn merge_axis(segments: &[Segment], horizontal: bool) -> Vec<Segment> {
    // (fixed coordinate, interval) per segment
    let mut runs: Vec<(f32, f32, f32)> = segments
        .iter()
        .map(|s| {
            if horizontal {
                (s.a.y, s.a.x.min(s.b.x), s.a.x.max(s.b.x))
            } else {
                (s.a.x, s.a.y.min(s.b.y), s.a.y.max(s.b.y))
            }
        })
        .collect();

    runs.sort_by(|a, b| {
        a.0.partial_cmp(&b.0)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
    });

    let mut out: Vec<(f32, f32, f32)> = Vec::new();
    for (fixed, lo, hi) in runs {
        match out.last_mut() {
            Some((f, _, prev_hi)) if (*f - fixed).abs() < EPS && lo <= *prev_hi + EPS => {
                *prev_hi = prev_hi.max(hi);
            }
            _ => out.push((fixed, lo, hi)),
        }
    }

    out.into_iter()
        .map(|(fixed, lo, hi)| {
            if horizontal {
                Segment::new(Vec2::new(lo, fixed), Vec2::new(hi, fixed))
            } else {
                Segment::new(Vec2::new(fixed, lo), Vec2::new(fixed, hi))
            }
        })
        .collect()
}
