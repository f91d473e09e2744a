//! Three-point limb solver
//!
//! A leg is a root (hip/shoulder), a middle joint (knee/elbow) and a head
//! (foot). Each update relaxes the chain toward a foot target with two
//! forward/backward passes, then mirrors the knee if it bends against the
//! aim direction.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::vector::{ccw_90, cw_90, point_along, unit};

/// Below this squared root-to-foot length the reflection line is undefined
const DEGENERATE_LINE_EPS: f32 = 0.0001;

/// Relaxation passes per update
const RELAX_PASSES: usize = 2;

/// Move `from` onto the circle of `distance` around `to`, keeping its bearing.
///
/// If `from` sits exactly on `to` the bearing is undefined and +X is used.
pub fn constrain(from: Vec2, to: Vec2, distance: f32) -> Vec2 {
    let offset = from - to;
    let dir = if offset.length_squared() > 0.0 {
        unit(offset)
    } else {
        Vec2::X
    };
    to + dir * distance
}

/// A root-middle-head leg chain with two rigid links
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LimbChain3 {
    pub root: Vec2,
    pub middle: Vec2,
    pub head: Vec2,
    pub root_radius: f32,
    pub middle_radius: f32,
    pub head_radius: f32,
    pub dist_root_middle: f32,
    pub dist_middle_head: f32,
}

impl LimbChain3 {
    /// A chain template with every joint at the origin
    pub const fn template(
        root_radius: f32,
        middle_radius: f32,
        head_radius: f32,
        dist_root_middle: f32,
        dist_middle_head: f32,
    ) -> Self {
        Self {
            root: Vec2::ZERO,
            middle: Vec2::ZERO,
            head: Vec2::ZERO,
            root_radius,
            middle_radius,
            head_radius,
            dist_root_middle,
            dist_middle_head,
        }
    }

    /// Longest root-to-foot distance the two links can span
    pub fn reach(&self) -> f32 {
        self.dist_root_middle + self.dist_middle_head
    }

    /// Lay the chain out at rest with root on `root_pos` and foot on `foot`,
    /// the knee set back against `aim` so the bend agrees with it.
    pub fn place(&mut self, root_pos: Vec2, foot: Vec2, aim: Vec2) {
        self.root = root_pos;
        self.head = foot;
        self.middle = (root_pos + foot) * 0.5 - unit(aim) * self.dist_root_middle * 0.5;
        if self.update(root_pos, foot, aim) {
            self.update(root_pos, foot, aim);
        }
    }

    /// Solve the chain for a pinned root and a foot target.
    ///
    /// Returns `true` when the knee pointed against `aim` and was mirrored
    /// across the root-foot line; the caller should then solve once more so
    /// the relaxation settles around the mirrored pose.
    pub fn update(&mut self, root_pos: Vec2, target: Vec2, aim: Vec2) -> bool {
        for _ in 0..RELAX_PASSES {
            // forward: foot to target, pull the rest after it
            self.head = target;
            self.middle = constrain(self.middle, self.head, self.dist_middle_head);
            self.root = constrain(self.root, self.middle, self.dist_root_middle);
            // backward: pin the root again
            self.root = root_pos;
            self.middle = constrain(self.middle, self.root, self.dist_root_middle);
            self.head = constrain(self.head, self.middle, self.dist_middle_head);
        }

        let bend = unit((self.root - self.middle) + (self.head - self.middle));
        if bend.dot(unit(aim)) >= 0.0 {
            return false;
        }

        if let Some(mirrored) = reflect_across_line(self.middle, self.root, self.head) {
            self.middle = mirrored;
        } else {
            log::debug!("limb flip skipped: root and foot coincide");
        }
        true
    }
}

/// Reflect `p` across the line through `a` and `b`, `None` if `a == b`
pub fn reflect_across_line(p: Vec2, a: Vec2, b: Vec2) -> Option<Vec2> {
    // line: A*x + B*y + C = 0
    let la = b.y - a.y;
    let lb = a.x - b.x;
    let lc = b.x * a.y - a.x * b.y;
    let norm_sq = la * la + lb * lb;
    if norm_sq <= DEGENERATE_LINE_EPS {
        return None;
    }
    let side = la * p.x + lb * p.y + lc;
    Some(Vec2::new(
        p.x - 2.0 * la * side / norm_sq,
        p.y - 2.0 * lb * side / norm_sq,
    ))
}

/// Where a limb is attached and how far its foot may trail before stepping
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LegStance {
    /// Index of the spine node the root is pinned to (must be >= 1)
    pub anchor: usize,
    /// Distance the planted foot may fall behind its step target
    pub max_trail: f32,
    /// Sideways reach of the foot from the anchor
    pub lateral: f32,
    /// Extra reach of the step target toward the head, on top of `max_trail`.
    /// A foot that has just stepped lands this far ahead of the point where it
    /// would be exactly `max_trail` in front of its rest spot.
    pub forward: f32,
}

impl LegStance {
    /// Resting foot position: `lateral` out from the root on the given side.
    /// `body_dir` points from the anchor toward the head.
    pub fn rest_foot(&self, root: Vec2, body_dir: Vec2, left: bool) -> Vec2 {
        let side = if left { ccw_90(body_dir) } else { cw_90(body_dir) };
        point_along(root, side, self.lateral)
    }

    /// Where a foot lands when it steps
    pub fn step_target(&self, root: Vec2, body_dir: Vec2, left: bool) -> Vec2 {
        point_along(
            self.rest_foot(root, body_dir, left),
            body_dir,
            self.max_trail + self.forward,
        )
    }
}

/// Four legs: 0/1 front, 2/3 back; even indices on the left
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quadruped {
    pub legs: [LimbChain3; 4],
    pub front: LegStance,
    pub back: LegStance,
}

impl Quadruped {
    /// Mirror front/back templates onto both sides
    pub fn new(front_leg: LimbChain3, back_leg: LimbChain3, front: LegStance, back: LegStance) -> Self {
        Self {
            legs: [front_leg, front_leg, back_leg, back_leg],
            front,
            back,
        }
    }

    pub fn stance(&self, leg: usize) -> &LegStance {
        if leg <= 1 { &self.front } else { &self.back }
    }

    pub fn is_left(leg: usize) -> bool {
        leg % 2 == 0
    }
}
