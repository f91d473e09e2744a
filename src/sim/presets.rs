//! Creature blueprints and loadouts

use glam::Vec2;

use super::creature::{Blueprint, Creature, CreatureKind, LimbTemplates, Palette, Role};
use super::limb::{LegStance, LimbChain3};
use super::weapon::{BulletKind, Color, GunKind};
use crate::error::Result;

pub const PLAYER_COLORS: Palette = Palette {
    body: Color::rgb(1.0, 0.5, 0.0),
    outline: Color::WHITE,
};

const SNAKE_RADII: [f32; 16] = [
    30.0, 30.0, 25.0, 25.0, 25.0, 25.0, 25.0, 25.0, 25.0, 20.0, 20.0, 15.0, 15.0, 15.0, 10.0, 10.0,
];
const SNAKE_LINK: f32 = 60.0;

const LIZARD_RADII: [f32; 21] = [
    55.0, 31.0, 58.0, 59.0, 60.0, 60.0, 48.0, 29.0, 18.0, 11.0, 8.0, 8.0, 8.0, 8.0, 8.0, 8.0, 8.0,
    8.0, 7.0, 7.0, 7.0,
];
const LIZARD_LINKS: [f32; 21] = [
    42.0, 37.0, 29.0, 30.0, 33.0, 33.0, 28.0, 18.0, 14.0, 14.0, 12.0, 12.0, 12.0, 12.0, 12.0, 12.0,
    12.0, 12.0, 12.0, 12.0, 12.0,
];

const FLEX_DEGREES: f32 = 45.0;

pub const LIZARD_FRONT_LEG: LimbChain3 = LimbChain3::template(40.0, 20.0, 20.0, 70.0, 35.0);
pub const LIZARD_BACK_LEG: LimbChain3 = LimbChain3::template(23.0, 23.0, 23.0, 80.0, 45.0);

pub const LIZARD_FRONT_STANCE: LegStance = LegStance {
    anchor: 2,
    max_trail: 70.0,
    lateral: 55.0,
    forward: 10.0,
};
pub const LIZARD_BACK_STANCE: LegStance = LegStance {
    anchor: 6,
    max_trail: 50.0,
    lateral: 65.0,
    forward: 5.0,
};

pub fn snake_blueprint() -> Blueprint {
    Blueprint {
        kind: CreatureKind::Snake,
        radii: SNAKE_RADII.to_vec(),
        link_distances: vec![SNAKE_LINK; SNAKE_RADII.len()],
        flex_degrees: vec![FLEX_DEGREES; SNAKE_RADII.len()],
        limbs: None,
    }
}

pub fn lizard_blueprint() -> Blueprint {
    Blueprint {
        kind: CreatureKind::Lizard,
        radii: LIZARD_RADII.to_vec(),
        link_distances: LIZARD_LINKS.to_vec(),
        flex_degrees: vec![FLEX_DEGREES; LIZARD_RADII.len()],
        limbs: Some(LimbTemplates {
            front_leg: LIZARD_FRONT_LEG,
            back_leg: LIZARD_BACK_LEG,
            front: LIZARD_FRONT_STANCE,
            back: LIZARD_BACK_STANCE,
        }),
    }
}

pub fn snake(pos: Vec2, direction: Vec2, speed: f32, role: Role, palette: Palette) -> Result<Creature> {
    Creature::new(&snake_blueprint(), pos, direction, speed, role, palette)
}

pub fn lizard(pos: Vec2, direction: Vec2, speed: f32, role: Role, palette: Palette) -> Result<Creature> {
    Creature::new(&lizard_blueprint(), pos, direction, speed, role, palette)
}

/// The player's starting lizard: shotguns at both ends loaded with standard rounds
pub fn player(pos: Vec2, direction: Vec2, speed: f32) -> Result<Creature> {
    let mut creature = lizard(pos, direction, speed, Role::Player, PLAYER_COLORS)?;
    creature.head_gun = Some(GunKind::Shotgun.build(BulletKind::Standard.template()));
    creature.tail_gun = Some(GunKind::Shotgun.build(BulletKind::Standard.template()));
    creature.update_mounts();
    Ok(creature)
}
