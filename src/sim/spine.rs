//! Spine solver
//!
//! Follow-the-leader propagation of a moved head through a chain of rigid,
//! angle-limited body segments. Each node keeps the direction it had relative
//! to its (already updated) predecessor, clamped to the predecessor's flex
//! limit, and is then placed exactly `link_distance` away from it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::vector::{cos_between, rotate_deg, unit};

/// One segment of a creature's spine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyNode {
    pub pos: Vec2,
    pub radius: f32,
    /// Rigid distance from this node to the next one toward the tail
    pub link_distance: f32,
    /// Maximum bend (degrees) between the two segments meeting at this node
    pub flex_degrees: f32,
}

impl BodyNode {
    pub fn new(pos: Vec2, radius: f32, link_distance: f32, flex_degrees: f32) -> Self {
        Self {
            pos,
            radius,
            link_distance,
            flex_degrees,
        }
    }
}

/// Re-place every node behind the head.
///
/// `body[0]` must already be at its new position. `heading` is only used as
/// a fallback direction when a node sits exactly on its predecessor.
pub fn solve(body: &mut [BodyNode], heading: Vec2) {
    for i in 1..body.len() {
        let prev = body[i - 1];
        let mut dir = body[i].pos - prev.pos;

        let prev_dir = if i >= 2 {
            Some(prev.pos - body[i - 2].pos)
        } else {
            None
        };

        if dir.length_squared() == 0.0 {
            dir = prev_dir.unwrap_or(-heading);
        }

        if let Some(prev_dir) = prev_dir {
            dir = clamp_bend(dir, prev_dir, prev.flex_degrees);
        }

        body[i].pos = prev.pos + unit(dir) * prev.link_distance;
    }
}

/// Clamp `dir` to within `flex_degrees` of `prev_dir`.
///
/// When out of range, the boundary direction closer to `dir` (larger dot
/// product) wins.
pub fn clamp_bend(dir: Vec2, prev_dir: Vec2, flex_degrees: f32) -> Vec2 {
    let Some(cos_angle) = cos_between(dir, prev_dir) else {
        return dir;
    };
    if cos_angle >= flex_degrees.to_radians().cos() {
        return dir;
    }

    let ccw = rotate_deg(prev_dir, flex_degrees);
    let cw = rotate_deg(prev_dir, -flex_degrees);
    if ccw.dot(dir) > cw.dot(dir) { ccw } else { cw }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn straight_body(count: usize, link: f32, flex: f32) -> Vec<BodyNode> {
        (0..count)
            .map(|i| BodyNode::new(Vec2::new(-(i as f32) * link, 0.0), 10.0, link, flex))
            .collect()
    }

    fn bend_degrees(a: Vec2, b: Vec2) -> f32 {
        cos_between(a, b).unwrap().clamp(-1.0, 1.0).acos().to_degrees()
    }

    #[test]
    fn test_straight_motion_keeps_shape() {
        let mut body = straight_body(5, 20.0, 45.0);
        body[0].pos += Vec2::new(5.0, 0.0);
        solve(&mut body, Vec2::X);
        for (i, node) in body.iter().enumerate() {
            assert!((node.pos - Vec2::new(5.0 - i as f32 * 20.0, 0.0)).length() < 1e-4);
        }
    }

    #[test]
    fn test_sharp_turn_is_clamped_to_flex() {
        let mut body = straight_body(4, 20.0, 30.0);
        // Fold node 2 back on itself: unclamped it would bend ~180°
        body[2].pos = Vec2::new(0.0, 1.0);
        solve(&mut body, Vec2::X);
        let bend = bend_degrees(body[2].pos - body[1].pos, body[1].pos - body[0].pos);
        assert!(bend <= 30.0 + 0.01, "bend {bend}");
    }

    #[test]
    fn test_clamp_picks_closer_boundary() {
        let prev = Vec2::X;
        // 80° counterclockwise of prev, limit 45°: ccw boundary is closer
        let dir = rotate_deg(prev, 80.0);
        let clamped = clamp_bend(dir, prev, 45.0);
        assert!((clamped - rotate_deg(prev, 45.0)).length() < 1e-5);

        let dir = rotate_deg(prev, -100.0);
        let clamped = clamp_bend(dir, prev, 45.0);
        assert!((clamped - rotate_deg(prev, -45.0)).length() < 1e-5);
    }

    #[test]
    fn test_coincident_node_uses_fallback() {
        let mut body = straight_body(3, 15.0, 45.0);
        body[1].pos = body[0].pos;
        solve(&mut body, Vec2::X);
        assert!(((body[1].pos - body[0].pos).length() - 15.0).abs() < 1e-4);
        assert!(!body[1].pos.is_nan());
    }

    proptest! {
        #[test]
        fn links_stay_rigid_and_bends_stay_limited(
            flex in 10.0f32..90.0,
            moves in proptest::collection::vec((0.0f32..360.0, 0.0f32..15.0), 1..40),
        ) {
            let mut body = straight_body(8, 25.0, flex);
            for (angle, speed) in moves {
                let heading = rotate_deg(Vec2::X, angle);
                body[0].pos += heading * speed;
                solve(&mut body, heading);

                for i in 1..body.len() {
                    let d = (body[i].pos - body[i - 1].pos).length();
                    prop_assert!((d - body[i - 1].link_distance).abs() < 1e-2);
                }
                for i in 2..body.len() {
                    let bend = bend_degrees(
                        body[i].pos - body[i - 1].pos,
                        body[i - 1].pos - body[i - 2].pos,
                    );
                    prop_assert!(bend <= body[i - 1].flex_degrees + 0.05, "bend {} > {}", bend, flex);
                }
            }
        }
    }
}
