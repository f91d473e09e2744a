//! Axis-aligned bounding boxes
//!
//! Used for the collision broad phase, the arena walls and render culling.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A closed axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Aabb {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl Aabb {
    pub const fn new(min_x: f32, max_x: f32, min_y: f32, max_y: f32) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    /// Square box around a circle
    #[inline]
    pub fn around(center: Vec2, radius: f32) -> Self {
        Self::new(
            center.x - radius,
            center.x + radius,
            center.y - radius,
            center.y + radius,
        )
    }

    /// Box from a view rectangle given by its top-left corner and size.
    ///
    /// The world is y-up, so the rectangle extends downward from `top_left.y`.
    pub fn from_view(top_left: Vec2, size: Vec2) -> Self {
        Self::new(
            top_left.x,
            top_left.x + size.x,
            top_left.y - size.y,
            top_left.y,
        )
    }

    /// Closed-interval overlap test (touching edges count)
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        !(self.min_y > other.max_y
            || self.min_x > other.max_x
            || other.min_y > self.max_y
            || other.min_x > self.max_x)
    }

    /// Grow to contain `other`
    #[inline]
    pub fn union(&self, other: &Aabb) -> Self {
        Self::new(
            self.min_x.min(other.min_x),
            self.max_x.max(other.max_x),
            self.min_y.min(other.min_y),
            self.max_y.max(other.max_y),
        )
    }

    /// Same box with `margin` added on every side
    #[inline]
    pub fn inflate(&self, margin: f32) -> Self {
        Self::new(
            self.min_x - margin,
            self.max_x + margin,
            self.min_y - margin,
            self.max_y + margin,
        )
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_box() -> impl Strategy<Value = Aabb> {
        (-500.0f32..500.0, 0.0f32..200.0, -500.0f32..500.0, 0.0f32..200.0)
            .prop_map(|(x, w, y, h)| Aabb::new(x, x + w, y, y + h))
    }

    #[test]
    fn test_touching_edges_overlap() {
        let a = Aabb::new(0.0, 10.0, 0.0, 10.0);
        let b = Aabb::new(10.0, 20.0, 0.0, 10.0);
        assert!(a.overlaps(&b));
        let c = Aabb::new(10.5, 20.0, 0.0, 10.0);
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_union_and_inflate() {
        let a = Aabb::around(Vec2::ZERO, 5.0);
        let b = Aabb::around(Vec2::new(20.0, 0.0), 5.0);
        let u = a.union(&b);
        assert_eq!(u, Aabb::new(-5.0, 25.0, -5.0, 5.0));
        let r = u.inflate(50.0);
        assert_eq!(r.width(), 130.0);
        assert_eq!(r.height(), 110.0);
    }

    #[test]
    fn test_from_view_is_y_up() {
        let view = Aabb::from_view(Vec2::new(-960.0, 540.0), Vec2::new(1920.0, 1080.0));
        assert_eq!(view, Aabb::new(-960.0, 960.0, -540.0, 540.0));
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(a in arb_box(), b in arb_box()) {
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }

        #[test]
        fn box_overlaps_its_union(a in arb_box(), b in arb_box()) {
            let u = a.union(&b);
            prop_assert!(u.overlaps(&a));
            prop_assert!(u.overlaps(&b));
        }
    }
}
