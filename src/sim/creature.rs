//! Segmented creatures
//!
//! A creature is a spine of body nodes driven from its head, optionally
//! carrying four legs (lizards) and head/tail guns. The body length is fixed
//! at construction.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::limb::{LegStance, LimbChain3, Quadruped};
use super::spine::{self, BodyNode};
use super::steering;
use super::vector::{point_along, rotate_deg, unit};
use super::weapon::{Color, Gun};
use crate::consts::*;
use crate::error::{Result, SimError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CreatureKind {
    /// Spine only
    Snake,
    /// Spine plus four legs
    Lizard,
}

/// Who controls a creature. Tagged per creature rather than implied by pool slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Player,
    Hostile,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub body: Color,
    pub outline: Color,
}

/// How far the drawn head silhouette reaches past the head radius, per ray
/// (straight ahead, ±30°, ±60°). 1.0 means exactly the radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeadInset {
    pub front: f32,
    pub side_30: f32,
    pub side_60: f32,
}

impl Default for HeadInset {
    fn default() -> Self {
        Self {
            front: 1.0,
            side_30: 1.0,
            side_60: 1.0,
        }
    }
}

impl HeadInset {
    pub fn max_reach(&self) -> f32 {
        1.0f32.max(self.front).max(self.side_30).max(self.side_60)
    }
}

/// Limb templates for a quadruped blueprint
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LimbTemplates {
    pub front_leg: LimbChain3,
    pub back_leg: LimbChain3,
    pub front: LegStance,
    pub back: LegStance,
}

/// Body description as parallel per-node arrays
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blueprint {
    pub kind: CreatureKind,
    pub radii: Vec<f32>,
    pub link_distances: Vec<f32>,
    pub flex_degrees: Vec<f32>,
    pub limbs: Option<LimbTemplates>,
}

impl Blueprint {
    pub fn len(&self) -> usize {
        self.radii.len()
    }

    pub fn is_empty(&self) -> bool {
        self.radii.is_empty()
    }

    /// Check the arrays agree and limb anchors fit the body
    pub fn validate(&self) -> Result<()> {
        let count = self.radii.len();
        if count == 0 {
            return Err(SimError::EmptyBody);
        }
        if self.link_distances.len() != count || self.flex_degrees.len() != count {
            return Err(SimError::MismatchedBody {
                radii: count,
                links: self.link_distances.len(),
                flex: self.flex_degrees.len(),
            });
        }
        if self.kind == CreatureKind::Lizard {
            let limbs = self.limbs.as_ref().ok_or(SimError::MissingLimbs)?;
            for anchor in [limbs.front.anchor, limbs.back.anchor] {
                if anchor == 0 || anchor >= count {
                    return Err(SimError::LimbAnchorOutOfRange {
                        anchor,
                        body_len: count,
                    });
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Creature {
    pub kind: CreatureKind,
    pub role: Role,
    body: Vec<BodyNode>,
    pub limbs: Option<Quadruped>,
    pub head_inset: HeadInset,
    /// Unit heading
    pub direction: Vec2,
    /// Degrees per tick
    pub turn_rate: f32,
    /// Distance per tick along `direction`
    pub speed: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    pub hp: f32,
    pub max_hp: f32,
    /// Gameplay collision box
    pub bounds: Aabb,
    /// `bounds` plus a margin; culling only
    pub render_bounds: Aabb,
    pub visible: bool,
    pub head_gun: Option<Gun>,
    pub tail_gun: Option<Gun>,
    pub palette: Palette,
}

impl Creature {
    /// Build a creature with its head at `pos`, body trailing straight behind.
    pub fn new(
        blueprint: &Blueprint,
        pos: Vec2,
        direction: Vec2,
        speed: f32,
        role: Role,
        palette: Palette,
    ) -> Result<Self> {
        blueprint.validate()?;

        let direction = if direction.length_squared() > 0.0 {
            unit(direction)
        } else {
            Vec2::X
        };

        let mut body: Vec<BodyNode> = Vec::with_capacity(blueprint.len());
        for i in 0..blueprint.len() {
            let node_pos = match body.last() {
                None => pos,
                Some(prev) => prev.pos - direction * prev.link_distance,
            };
            body.push(BodyNode::new(
                node_pos,
                blueprint.radii[i],
                blueprint.link_distances[i],
                blueprint.flex_degrees[i],
            ));
        }

        let limbs = match (blueprint.kind, blueprint.limbs) {
            (CreatureKind::Lizard, Some(t)) => {
                Some(Quadruped::new(t.front_leg, t.back_leg, t.front, t.back))
            }
            _ => None,
        };

        let mut creature = Self {
            kind: blueprint.kind,
            role,
            body,
            limbs,
            head_inset: HeadInset::default(),
            direction,
            turn_rate: DEFAULT_TURN_RATE,
            speed: 0.0,
            min_speed: DEFAULT_MIN_SPEED,
            max_speed: DEFAULT_MAX_SPEED,
            hp: DEFAULT_MAX_HP,
            max_hp: DEFAULT_MAX_HP,
            bounds: Aabb::default(),
            render_bounds: Aabb::default(),
            visible: false,
            head_gun: None,
            tail_gun: None,
            palette,
        };
        creature.set_speed(speed);
        creature.refresh_bounds();
        creature.place_limbs();
        Ok(creature)
    }

    pub fn body(&self) -> &[BodyNode] {
        &self.body
    }

    /// Mutable access to the nodes; the count cannot change
    pub fn body_mut(&mut self) -> &mut [BodyNode] {
        &mut self.body
    }

    pub fn head_pos(&self) -> Vec2 {
        self.body[0].pos
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0.0
    }

    pub fn add_speed(&mut self, delta: f32) {
        self.set_speed(self.speed + delta);
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed.clamp(self.min_speed, self.max_speed);
    }

    pub fn turn_left(&mut self) {
        self.direction = rotate_deg(self.direction, self.turn_rate);
    }

    pub fn turn_right(&mut self) {
        self.direction = rotate_deg(self.direction, -self.turn_rate);
    }

    /// One tick of turn-rate limited steering toward `target`
    pub fn steer_toward(&mut self, target: Vec2) {
        self.direction = steering::turn_toward(self.direction, target, self.turn_rate);
    }

    /// Move the head along the heading and drag the spine after it
    pub fn advance(&mut self) {
        self.direction = if self.direction.length_squared() > 0.0 {
            unit(self.direction)
        } else {
            Vec2::X
        };
        self.body[0].pos += self.direction * self.speed;
        spine::solve(&mut self.body, self.direction);
        self.refresh_bounds();
    }

    /// Recompute the collision and render boxes from the current nodes
    pub fn refresh_bounds(&mut self) {
        let head = self.body[0];
        let mut bounds = Aabb::around(head.pos, head.radius * HEAD_BOX_SCALE);
        for node in &self.body {
            bounds = bounds.union(&Aabb::around(node.pos, node.radius));
        }
        self.bounds = bounds;
        self.render_bounds = bounds.inflate(RENDER_MARGIN);
    }

    /// Head radius used for body contacts, covering the drawn silhouette
    pub fn contact_head_radius(&self) -> f32 {
        self.body[0].radius * HEAD_CONTACT_INFLATION * self.head_inset.max_reach()
    }

    /// Unit direction the tail points (second-to-last node toward the tail)
    pub fn tail_direction(&self) -> Option<Vec2> {
        let n = self.body.len();
        if n < 2 {
            return None;
        }
        Some(unit(self.body[n - 1].pos - self.body[n - 2].pos))
    }

    /// Place gun muzzles just outside the head and tail circles
    pub fn update_mounts(&mut self) {
        let head = self.body[0];
        let direction = self.direction;
        if let Some(gun) = self.head_gun.as_mut() {
            gun.muzzle = point_along(head.pos, direction, head.radius + gun.bullet.radius);
            gun.aim = direction;
        }

        let tail_dir = self.tail_direction();
        let tail = self.body[self.body.len() - 1];
        if let (Some(gun), Some(tail_dir)) = (self.tail_gun.as_mut(), tail_dir) {
            gun.muzzle = point_along(tail.pos, tail_dir, tail.radius + gun.bullet.radius);
            gun.aim = tail_dir;
        }
    }

    /// Put every leg at its rest stance around the current spine
    fn place_limbs(&mut self) {
        let Some(quad) = self.limbs.as_mut() else {
            return;
        };
        let body = &self.body;
        for leg in 0..quad.legs.len() {
            let stance = *quad.stance(leg);
            let Some((root, body_dir)) = anchor_frame(body, stance.anchor) else {
                continue;
            };
            let foot = stance.rest_foot(root, body_dir, Quadruped::is_left(leg));
            let aim = leg_aim(leg, body_dir);
            quad.legs[leg].place(root, foot, aim);
        }
    }

    /// Step and solve every leg of a quadruped
    pub fn update_limbs(&mut self) {
        let Some(quad) = self.limbs.as_mut() else {
            return;
        };
        let body = &self.body;

        for leg in 0..quad.legs.len() {
            let stance = *quad.stance(leg);
            let Some((root, body_dir)) = anchor_frame(body, stance.anchor) else {
                continue;
            };
            let mut target = stance.step_target(root, body_dir, Quadruped::is_left(leg));

            let chain = &mut quad.legs[leg];
            let trailing = target.distance_squared(chain.head) < stance.max_trail * stance.max_trail;
            let attached = chain.head.distance(root) <= chain.reach();
            if trailing && attached {
                // foot stays planted
                target = chain.head;
            }

            let aim = leg_aim(leg, body_dir);
            if chain.update(root, target, aim) {
                chain.update(root, target, aim);
            }
        }
    }

    /// Culling flag from the render box against a world-space view
    pub fn update_visibility(&mut self, view: &Aabb) {
        self.visible = self.render_bounds.overlaps(view);
    }
}

/// Leg root and the unit direction from it toward the head
fn anchor_frame(body: &[BodyNode], anchor: usize) -> Option<(Vec2, Vec2)> {
    if anchor == 0 || anchor >= body.len() {
        return None;
    }
    let root = body[anchor].pos;
    Some((root, unit(body[anchor - 1].pos - root)))
}

/// Front knees bend toward the head, back knees toward the tail
fn leg_aim(leg: usize, body_dir: Vec2) -> Vec2 {
    if leg <= 1 { body_dir } else { -body_dir }
}
