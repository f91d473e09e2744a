//! Guns and bullets
//!
//! A gun carries a bullet template and fires a copy of it from its muzzle
//! whenever its fire timer has elapsed and a shot is requested.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::pool::{AddOutcome, BulletPool};

/// RGBA color in 0..1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const DARK_GOLD: Color = Color::rgb(0.85, 0.64, 0.13);
    pub const SKY_BLUE: Color = Color::rgb(0.529, 0.81, 0.98);
    pub const PURPLE: Color = Color::rgb(0.58, 0.0, 0.83);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

/// Bullet presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulletKind {
    Standard,
    Ammo,
    Bubble,
    Sniper,
}

impl BulletKind {
    pub const ALL: [BulletKind; 4] = [
        BulletKind::Standard,
        BulletKind::Ammo,
        BulletKind::Bubble,
        BulletKind::Sniper,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BulletKind::Standard => "Standard",
            BulletKind::Ammo => "Ammo",
            BulletKind::Bubble => "Bubble",
            BulletKind::Sniper => "Sniper",
        }
    }

    pub fn template(self) -> Bullet {
        // (damage, speed, radius, color)
        let (damage, speed, radius, color) = match self {
            BulletKind::Standard => (5.0, 5.0, 5.0, Color::WHITE),
            BulletKind::Ammo => (10.0, 20.0, 10.0, Color::DARK_GOLD),
            BulletKind::Bubble => (100.0, 5.0, 25.0, Color::SKY_BLUE),
            BulletKind::Sniper => (75.0, 40.0, 15.0, Color::PURPLE),
        };
        Bullet {
            kind: self,
            damage,
            speed,
            radius,
            color,
            direction: Vec2::ZERO,
            pos: Vec2::ZERO,
            age_ticks: 0,
            spent: false,
        }
    }
}

/// A projectile in flight (or a gun's template for one)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub kind: BulletKind,
    pub damage: f32,
    /// Distance travelled per tick
    pub speed: f32,
    pub radius: f32,
    pub color: Color,
    pub direction: Vec2,
    pub pos: Vec2,
    pub age_ticks: u32,
    /// Hit something or expired; removed in the cleanup pass
    #[serde(skip)]
    pub spent: bool,
}

/// Gun presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GunKind {
    Shotgun,
    Rifle,
    SniperRifle,
}

impl GunKind {
    pub const ALL: [GunKind; 3] = [GunKind::Shotgun, GunKind::Rifle, GunKind::SniperRifle];

    pub fn as_str(&self) -> &'static str {
        match self {
            GunKind::Shotgun => "Shotgun",
            GunKind::Rifle => "Rifle",
            GunKind::SniperRifle => "Sniper Rifle",
        }
    }

    /// A gun of this kind loaded with `bullet`
    pub fn build(self, bullet: Bullet) -> Gun {
        let (fire_interval_ticks, damage_multiplier) = match self {
            GunKind::Shotgun => (90.0, 1.25),
            GunKind::Rifle => (20.0, 1.0),
            GunKind::SniperRifle => (150.0, 2.0),
        };
        Gun {
            kind: self,
            bullet,
            fire_interval_ticks,
            damage_multiplier,
            ticks_since_shot: 0,
            muzzle: Vec2::ZERO,
            aim: Vec2::X,
        }
    }
}

/// A creature-mounted emitter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gun {
    pub kind: GunKind,
    pub bullet: Bullet,
    pub fire_interval_ticks: f32,
    pub damage_multiplier: f32,
    pub ticks_since_shot: u32,
    pub muzzle: Vec2,
    pub aim: Vec2,
}

impl Gun {
    /// Advance the fire timer and shoot if requested and ready.
    ///
    /// Call exactly once per tick. At most one bullet is fired per call no
    /// matter how far the timer has overshot. Returns how the pool took the
    /// shot, or `None` if nothing was fired.
    pub fn try_shoot(&mut self, pool: &mut BulletPool, fire: bool) -> Option<AddOutcome> {
        self.ticks_since_shot = self.ticks_since_shot.saturating_add(1);
        if !fire || self.ticks_since_shot as f32 <= self.fire_interval_ticks {
            return None;
        }

        let mut shot = self.bullet;
        shot.damage *= self.damage_multiplier;
        shot.age_ticks = 0;
        shot.spent = false;
        shot.pos = self.muzzle;
        shot.direction = self.aim;
        let outcome = pool.add(shot);
        self.ticks_since_shot = 0;
        Some(outcome)
    }

    /// Swap in a new gun body, keeping the loaded bullet
    pub fn rebuild(&mut self, kind: GunKind) {
        let bullet = self.bullet;
        *self = Gun {
            muzzle: self.muzzle,
            aim: self.aim,
            ..kind.build(bullet)
        };
    }
}
