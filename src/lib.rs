//! Coil Arena - an arena survival game of segmented creatures
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spines, limbs, collisions, weapons, world state)
//! - `scheduler`: Real time to fixed logic ticks
//! - `settings`: JSON runtime configuration
//! - `highscores`: Single-integer high score persistence

pub mod error;
pub mod highscores;
pub mod scheduler;
pub mod settings;
pub mod sim;

pub use error::{Result, SimError};
pub use highscores::HighScore;
pub use scheduler::FixedTimestep;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Logic ticks per second
    pub const LOGIC_RATE: u32 = 60;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// One screen of world units; the arena walls sit 3 to 4 screens out
    pub const ARENA_WIDTH: f32 = 1920.0;
    pub const ARENA_HEIGHT: f32 = 1080.0;
    pub const WALL_INNER_SCREENS: f32 = 3.0;
    pub const WALL_OUTER_SCREENS: f32 = 4.0;
    /// Fraction of a node's radius a wall pushes it back per tick
    pub const WALL_PUSH_SHARE: f32 = 0.5;
    pub const DEFAULT_VIEW_EXTENTS: Vec2 = Vec2::new(ARENA_WIDTH, ARENA_HEIGHT);

    /// Creature defaults
    pub const DEFAULT_TURN_RATE: f32 = 5.0;
    pub const DEFAULT_MAX_SPEED: f32 = 10.0;
    pub const DEFAULT_MIN_SPEED: f32 = -5.0;
    pub const DEFAULT_MAX_HP: f32 = 100.0;

    /// Head box reaches this many radii to cover a lunge
    pub const HEAD_BOX_SCALE: f32 = 2.0;
    /// Render box margin around the collision box (culling only)
    pub const RENDER_MARGIN: f32 = 50.0;

    /// Body contact tuning
    pub const HEAD_CONTACT_INFLATION: f32 = 1.35;
    pub const HEAD_PUSH_SHARE: f32 = 0.5;
    /// Own nodes a head never collides with, counting the head
    pub const SELF_CONTACT_SKIP: usize = 4;
    /// HP lost per tick of a hostile head touching the player
    pub const RAM_DAMAGE: f32 = 0.1;

    /// Bullets
    pub const BULLET_POOL_CAPACITY: usize = 5000;
    pub const BULLET_MAX_AGE_TICKS: u32 = 6000;
    /// Bullets pass through the player until older than this
    pub const PLAYER_IMMUNITY_TICKS: u32 = 10;
    pub const PLAYER_BULLET_FACTOR: f32 = 0.25;

    pub const CREATURE_POOL_CAPACITY: usize = 16;

    /// Player control
    pub const PLAYER_START_POS: Vec2 = Vec2::new(100.0, 100.0);
    pub const PLAYER_START_DIRECTION: Vec2 = Vec2::new(-1.0, -0.5);
    pub const PLAYER_START_SPEED: f32 = 5.0;
    pub const PLAYER_THRUST: f32 = 2.0;
    pub const PLAYER_BRAKE: f32 = 5.0;

    /// Enemy spawning
    pub const SPAWN_DISTANCE_FACTOR: f32 = 0.6;
    pub const ENEMY_BASE_SPEED: f32 = 3.0;
    pub const ENEMY_SPEED_SPREAD: f32 = 3.0;
    pub const SPAWN_INTERVAL_START_SECONDS: u64 = 5;
    /// Every this many seconds the spawn interval shrinks by one second
    pub const SPAWN_RAMP_SECONDS: f32 = 30.0;
    pub const SPAWN_BATCH: u32 = 2;

    /// Weapon upgrades are offered in the last `UPGRADE_WINDOW_SECONDS` of each period
    pub const UPGRADE_PERIOD_SECONDS: u64 = 10;
    pub const UPGRADE_WINDOW_SECONDS: f32 = 0.2;

    pub const DEFAULT_HIGH_SCORE_PATH: &str = "data.txt";
}
