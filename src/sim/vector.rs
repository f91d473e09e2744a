//! 2D vector helpers on top of `glam::Vec2`
//!
//! Angles are in degrees throughout the simulation. Rotations are
//! counterclockwise in a y-up world.

use glam::Vec2;

/// cos(45°), used by the fixed 45° rotations
pub const COS_45: f32 = std::f32::consts::FRAC_1_SQRT_2;

/// Unit vector in the same direction, or the input unchanged if it has zero length
#[inline]
pub fn unit(v: Vec2) -> Vec2 {
    let len = v.length();
    if len > 0.0 { v / len } else { v }
}

/// Scalar (z component of the 3D) cross product
#[inline]
pub fn cross(a: Vec2, b: Vec2) -> f32 {
    a.x * b.y - a.y * b.x
}

/// Cosine of the angle between two vectors, `None` if either has zero length
#[inline]
pub fn cos_between(a: Vec2, b: Vec2) -> Option<f32> {
    let denom = a.length() * b.length();
    if denom > 0.0 {
        Some(a.dot(b) / denom)
    } else {
        None
    }
}

/// Rotate counterclockwise by `degrees` (negative rotates clockwise)
#[inline]
pub fn rotate_deg(v: Vec2, degrees: f32) -> Vec2 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.y * cos + v.x * sin)
}

#[inline]
pub fn ccw_90(v: Vec2) -> Vec2 {
    Vec2::new(-v.y, v.x)
}

#[inline]
pub fn cw_90(v: Vec2) -> Vec2 {
    Vec2::new(v.y, -v.x)
}

#[inline]
pub fn ccw_45(v: Vec2) -> Vec2 {
    Vec2::new(COS_45 * (v.x - v.y), COS_45 * (v.x + v.y))
}

#[inline]
pub fn cw_45(v: Vec2) -> Vec2 {
    Vec2::new(COS_45 * (v.x + v.y), COS_45 * (v.y - v.x))
}

/// Point at `distance` from `origin` along `direction` (normalized first)
#[inline]
pub fn point_along(origin: Vec2, direction: Vec2, distance: f32) -> Vec2 {
    origin + unit(direction) * distance
}
