//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - One seeded RNG per world
//! - Stable iteration order (pool order, which only swap-pop changes)
//! - No rendering or platform dependencies

pub mod aabb;
pub mod collision;
pub mod creature;
pub mod limb;
pub mod pool;
pub mod presets;
pub mod spine;
pub mod state;
pub mod steering;
pub mod tick;
pub mod vector;
pub mod weapon;

pub use aabb::Aabb;
pub use collision::{BulletHit, RamPenalty, Wall, arena_walls, resolve_contacts, update_bullets};
pub use creature::{Blueprint, Creature, CreatureKind, HeadInset, LimbTemplates, Palette, Role};
pub use limb::{LegStance, LimbChain3, Quadruped};
pub use pool::{AddOutcome, BulletPool, CharacterPool, OverflowPolicy};
pub use spine::BodyNode;
pub use state::{GameEvent, GamePhase, UpgradeChoice, UpgradeOffer, World, WorldConfig};
pub use steering::turn_toward;
pub use tick::{TickInput, tick};
pub use vector::{cos_between, cross, rotate_deg, unit};
pub use weapon::{Bullet, BulletKind, Color, Gun, GunKind};
