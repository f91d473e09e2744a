//! Collision detection and response between creatures, walls and bullets
//!
//! Every test is gated by an AABB broad phase and then decided on circles.
//! Body contacts only ever move the colliding head; the body it ran into
//! stays where the spine put it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::creature::{Creature, Role};
use super::pool::BulletPool;
use super::spine::BodyNode;
use super::weapon::Bullet;
use crate::consts::*;

/// Who loses HP when a hostile's head runs into the player's body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RamPenalty {
    /// The hostile that did the ramming
    #[default]
    Rammer,
    /// The player that was rammed
    Rammed,
}

/// Push `head` out of every node circle it overlaps, in node order.
///
/// Each overlap moves the head half the penetration depth along the
/// node-to-head separation. Coincident centers are skipped. Returns whether
/// any correction was applied.
pub fn push_head_out(head: &mut Vec2, head_radius: f32, nodes: &[BodyNode]) -> bool {
    let mut touched = false;
    for node in nodes {
        let offset = *head - node.pos;
        let dist_sq = offset.length_squared();
        let reach = head_radius + node.radius;
        if dist_sq < reach * reach && dist_sq > 0.0 {
            let dist = dist_sq.sqrt();
            *head += offset / dist * (reach - dist) * HEAD_PUSH_SHARE;
            touched = true;
        }
    }
    touched
}

/// Resolve head-versus-body contacts across all creatures.
///
/// Each creature's head is tested against its own body (past the neck) and
/// against every creature whose box overlaps its own. A hostile head touching
/// the player's body charges `RAM_DAMAGE` to whoever `penalty` names.
/// Returns the number of rams.
pub fn resolve_contacts(creatures: &mut [Creature], penalty: RamPenalty) -> u32 {
    let mut rams = 0;
    for i in 0..creatures.len() {
        for j in 0..creatures.len() {
            if !creatures[i].bounds.overlaps(&creatures[j].bounds) {
                continue;
            }

            let head_radius = creatures[i].contact_head_radius();
            let mut head = creatures[i].head_pos();
            let skip = if i == j { SELF_CONTACT_SKIP } else { 0 };
            let nodes = creatures[j].body().get(skip..).unwrap_or(&[]);
            let touched = push_head_out(&mut head, head_radius, nodes);
            if touched {
                // later broad-phase checks see the moved head
                creatures[i].body_mut()[0].pos = head;
                creatures[i].refresh_bounds();
            }

            if touched && creatures[i].role == Role::Hostile && creatures[j].role == Role::Player {
                rams += 1;
                let payer = match penalty {
                    RamPenalty::Rammer => i,
                    RamPenalty::Rammed => j,
                };
                creatures[payer].hp -= RAM_DAMAGE;
            }
        }
    }
    rams
}

/// An arena boundary slab and the unit direction it pushes nodes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wall {
    pub bounds: Aabb,
    pub push: Vec2,
}

/// The four slabs fencing the playfield at three to four screens out
pub fn arena_walls() -> [Wall; 4] {
    let (w, h) = (ARENA_WIDTH, ARENA_HEIGHT);
    let (inner, outer) = (WALL_INNER_SCREENS, WALL_OUTER_SCREENS);
    [
        Wall {
            bounds: Aabb::new(-outer * w, outer * w, inner * h, outer * h),
            push: Vec2::NEG_Y,
        },
        Wall {
            bounds: Aabb::new(-outer * w, outer * w, -outer * h, -inner * h),
            push: Vec2::Y,
        },
        Wall {
            bounds: Aabb::new(-outer * w, -inner * w, -outer * h, outer * h),
            push: Vec2::X,
        },
        Wall {
            bounds: Aabb::new(inner * w, outer * w, -outer * h, outer * h),
            push: Vec2::NEG_X,
        },
    ]
}

/// Nudge each node touching a wall back inward by half its radius.
///
/// Returns whether any node moved.
pub fn push_out_of_walls(creature: &mut Creature, walls: &[Wall]) -> bool {
    let mut moved = false;
    for node in creature.body_mut() {
        let node_box = Aabb::around(node.pos, node.radius);
        for wall in walls {
            if node_box.overlaps(&wall.bounds) {
                node.pos += wall.push * node.radius * WALL_PUSH_SHARE;
                moved = true;
            }
        }
    }
    moved
}

/// Square box around a bullet
pub fn bullet_bounds(bullet: &Bullet) -> Aabb {
    Aabb::around(bullet.pos, bullet.radius)
}

/// Whether `bullet` overlaps any node circle of `creature` (touching counts)
pub fn bullet_hits(bullet: &Bullet, creature: &Creature) -> bool {
    if !bullet_bounds(bullet).overlaps(&creature.bounds) {
        return false;
    }
    creature.body().iter().any(|node| {
        let reach = node.radius + bullet.radius;
        node.pos.distance_squared(bullet.pos) <= reach * reach
    })
}

/// A bullet landing on a creature
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BulletHit {
    /// Index into the creature slice
    pub target: usize,
    pub role: Role,
    pub damage: f32,
}

/// Move one bullet and apply its first hit.
///
/// The player is tested first, and only once the bullet is past its
/// immunity window; hostiles follow in slice order. A hit consumes the
/// bullet. A bullet that misses ages by one tick and is spent once it
/// outlives `BULLET_MAX_AGE_TICKS`.
pub fn update_bullet(bullet: &mut Bullet, creatures: &mut [Creature]) -> Option<BulletHit> {
    bullet.pos += bullet.direction * bullet.speed;

    let player = creatures.iter().position(|c| c.role == Role::Player);
    if let Some(index) = player {
        if bullet.age_ticks > PLAYER_IMMUNITY_TICKS && bullet_hits(bullet, &creatures[index]) {
            return Some(apply_hit(bullet, creatures, index, PLAYER_BULLET_FACTOR));
        }
    }

    let hostile = creatures
        .iter()
        .position(|c| c.role == Role::Hostile && bullet_hits(bullet, c));
    if let Some(index) = hostile {
        return Some(apply_hit(bullet, creatures, index, 1.0));
    }

    bullet.age_ticks = bullet.age_ticks.saturating_add(1);
    if bullet.age_ticks > BULLET_MAX_AGE_TICKS {
        bullet.spent = true;
    }
    None
}

fn apply_hit(bullet: &mut Bullet, creatures: &mut [Creature], index: usize, factor: f32) -> BulletHit {
    let target = &mut creatures[index];
    let damage = bullet.damage * factor;
    target.hp -= damage;
    bullet.spent = true;
    BulletHit {
        target: index,
        role: target.role,
        damage,
    }
}

/// Update every live bullet, leaving spent ones for the cleanup pass
pub fn update_bullets(bullets: &mut BulletPool, creatures: &mut [Creature]) -> Vec<BulletHit> {
    bullets
        .iter_mut()
        .filter(|b| !b.spent)
        .filter_map(|b| update_bullet(b, creatures))
        .collect()
}
