//! Axis-aligned bounding box collision
//!
//! Every entity is a rectangle anchored at its top-left position with a
//! fixed, per-type box size. Boxes are rebuilt from current positions each
//! tick; nothing is cached between frames.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box in screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Aabb {
    pub fn new(left: f32, right: f32, top: f32, bottom: f32) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// Box for an entity at `pos` with the given `(width, height)`
    #[inline]
    pub fn from_entity(pos: Vec2, size: (f32, f32)) -> Self {
        Self {
            left: pos.x,
            right: pos.x + size.0,
            top: pos.y,
            bottom: pos.y + size.1,
        }
    }
}

/// Separating-axis test: boxes overlap unless one lies entirely to one side
/// of the other. Touching edges count as overlap.
#[inline]
pub fn overlaps(a: &Aabb, b: &Aabb) -> bool {
    !(a.left > b.right || a.right < b.left || a.top > b.bottom || a.bottom < b.top)
}
