//! Turn-rate limited steering
//!
//! Headings turn like a tank turret: at most `turn_rate` degrees per tick,
//! snapping onto the target only once it is within a single tick's budget.

use glam::Vec2;

use super::vector::{cos_between, cross, rotate_deg, unit};

/// New heading after one tick of turning `heading` toward `target`.
///
/// A zero-length target leaves the heading unchanged.
pub fn turn_toward(heading: Vec2, target: Vec2, turn_rate: f32) -> Vec2 {
    let Some(cos_angle) = cos_between(heading, target) else {
        return heading;
    };

    if cos_angle > 0.0 && cos_angle > turn_rate.to_radians().cos() {
        return unit(target);
    }

    if cross(heading, target) > 0.0 {
        rotate_deg(heading, turn_rate)
    } else {
        rotate_deg(heading, -turn_rate)
    }
}
