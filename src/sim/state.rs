//! World state and round lifecycle
//!
//! Everything a tick reads or writes lives in [`World`]: both pools, the
//! single seeded RNG, the score and the round clock.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{RamPenalty, Wall, arena_walls};
use super::creature::{Creature, Palette, Role};
use super::pool::{BulletPool, CharacterPool, OverflowPolicy};
use super::presets;
use super::vector::rotate_deg;
use super::weapon::{BulletKind, Color, GunKind};
use crate::consts::*;
use crate::error::Result;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    /// Player died; ticks are ignored until the round is reset
    GameOver,
}

/// A randomly rolled weapon upgrade waiting for the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeOffer {
    pub bullet: BulletKind,
    pub gun: GunKind,
}

/// Where to install the current offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpgradeChoice {
    /// Load the offered bullet into the head gun
    HeadBullet,
    /// Replace the head gun, keeping its bullet
    HeadGun,
    TailBullet,
    TailGun,
}

/// Things that happened during the last tick, for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    EnemySpawned { index: usize },
    ShotFired { by: Role },
    /// A shot overwrote an older bullet in a full pool
    BulletEvicted,
    PlayerDamaged { amount: f32 },
    HostilesKilled { count: u32, score: u64 },
    UpgradeOffered(UpgradeOffer),
    UpgradeApplied(UpgradeChoice),
    GameOver { score: u64 },
}

/// Per-world tuning that settings may override
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldConfig {
    /// Logic ticks per second
    pub logic_rate: u32,
    /// Visible world extents used for spawn distance
    pub view_extents: Vec2,
    pub ram_penalty: RamPenalty,
    pub bullet_overflow: OverflowPolicy,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            logic_rate: LOGIC_RATE,
            view_extents: DEFAULT_VIEW_EXTENTS,
            ram_penalty: RamPenalty::default(),
            bullet_overflow: OverflowPolicy::default(),
        }
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct World {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub config: WorldConfig,
    pub creatures: CharacterPool,
    pub bullets: BulletPool,
    pub walls: [Wall; 4],
    pub score: u64,
    pub kills: u32,
    /// Ticks since the round started
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub last_spawn_tick: u64,
    pub upgrade_offer: Option<UpgradeOffer>,
    /// Upgrade period the current offer was rolled in
    offered_period: Option<u64>,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
}

impl World {
    /// Create a world and start its first round
    pub fn new(seed: u64, config: WorldConfig) -> Result<Self> {
        let mut world = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            config,
            creatures: CharacterPool::with_capacity(CREATURE_POOL_CAPACITY),
            bullets: BulletPool::new(BULLET_POOL_CAPACITY, config.bullet_overflow),
            walls: arena_walls(),
            score: 0,
            kills: 0,
            time_ticks: 0,
            phase: GamePhase::Playing,
            last_spawn_tick: 0,
            upgrade_offer: None,
            offered_period: None,
            events: Vec::new(),
        };
        world.reset_round()?;
        Ok(world)
    }

    /// Clear both pools and start over with a fresh player and one enemy.
    ///
    /// The RNG carries on from where it was; it is only seeded once.
    pub fn reset_round(&mut self) -> Result<()> {
        self.creatures.clear();
        self.bullets.clear();
        self.score = 0;
        self.kills = 0;
        self.time_ticks = 0;
        self.last_spawn_tick = 0;
        self.phase = GamePhase::Playing;
        self.upgrade_offer = None;
        self.offered_period = None;
        self.events.clear();

        let player = presets::player(PLAYER_START_POS, PLAYER_START_DIRECTION, PLAYER_START_SPEED)?;
        self.spawn_creature(player)?;
        self.spawn_enemy_near(PLAYER_START_POS, self.config.view_extents)?;
        log::info!("Round started (seed {})", self.seed);
        Ok(())
    }

    /// Add a creature to the world, returning its current index
    pub fn spawn_creature(&mut self, creature: Creature) -> Result<usize> {
        let index = self.creatures.add(creature)?;
        log::debug!("Spawned creature at index {index}");
        Ok(index)
    }

    /// Spawn a hostile snake just off-screen around `player_pos`, facing it.
    ///
    /// The spawn point sits at a random whole-degree bearing, a fixed
    /// fraction of the larger view extent away, and is clamped inside the
    /// arena walls.
    pub fn spawn_enemy_near(&mut self, player_pos: Vec2, view_extents: Vec2) -> Result<usize> {
        let distance = view_extents.x.max(view_extents.y) * SPAWN_DISTANCE_FACTOR;
        let bearing = self.rng.random_range(0..360) as f32;
        let limit = Vec2::new(WALL_INNER_SCREENS * ARENA_WIDTH, WALL_INNER_SCREENS * ARENA_HEIGHT);
        let pos = (player_pos + rotate_deg(Vec2::X, bearing) * distance).clamp(-limit, limit);

        let palette = Palette {
            body: self.random_color(),
            outline: self.random_color(),
        };
        let speed = ENEMY_BASE_SPEED + self.rng.random_range(0.0..ENEMY_SPEED_SPREAD);
        let enemy = presets::snake(pos, player_pos - pos, speed, Role::Hostile, palette)?;

        let index = self.spawn_creature(enemy)?;
        self.events.push(GameEvent::EnemySpawned { index });
        Ok(index)
    }

    fn random_color(&mut self) -> Color {
        let mut channel = || self.rng.random_range(0..255) as f32 / 255.0;
        Color::rgb(channel(), channel(), channel())
    }

    pub fn player(&self) -> Option<&Creature> {
        self.creatures.player()
    }

    pub fn elapsed_seconds(&self) -> f32 {
        self.time_ticks as f32 / self.config.logic_rate.max(1) as f32
    }

    /// Ticks between enemy waves; shrinks every half minute down to one second
    pub fn spawn_interval_ticks(&self) -> u64 {
        let ramp = (self.elapsed_seconds() / SPAWN_RAMP_SECONDS) as u64;
        let seconds = SPAWN_INTERVAL_START_SECONDS.saturating_sub(ramp).max(1);
        seconds * self.config.logic_rate as u64
    }

    /// Spawn a wave around the player if the interval has elapsed
    pub fn run_spawn_schedule(&mut self) -> Result<()> {
        if self.time_ticks - self.last_spawn_tick < self.spawn_interval_ticks() {
            return Ok(());
        }
        let Some(player_pos) = self.player().map(Creature::head_pos) else {
            return Ok(());
        };
        for _ in 0..SPAWN_BATCH {
            self.spawn_enemy_near(player_pos, self.config.view_extents)?;
        }
        self.last_spawn_tick = self.time_ticks;
        log::info!(
            "Spawned {SPAWN_BATCH} enemies at {:.1}s ({} creatures)",
            self.elapsed_seconds(),
            self.creatures.len()
        );
        Ok(())
    }

    /// Roll a new upgrade offer once, near the end of every upgrade period
    pub fn update_upgrade_offer(&mut self) {
        let rate = self.config.logic_rate.max(1) as u64;
        let period_ticks = UPGRADE_PERIOD_SECONDS * rate;
        let window_ticks = (UPGRADE_WINDOW_SECONDS * rate as f32).round() as u64;
        let period = self.time_ticks / period_ticks;
        if self.time_ticks % period_ticks < period_ticks - window_ticks
            || self.offered_period == Some(period)
        {
            return;
        }

        const BULLETS: [BulletKind; 3] = [BulletKind::Ammo, BulletKind::Bubble, BulletKind::Sniper];
        let offer = UpgradeOffer {
            bullet: BULLETS[self.rng.random_range(0..BULLETS.len())],
            gun: GunKind::ALL[self.rng.random_range(0..GunKind::ALL.len())],
        };
        self.upgrade_offer = Some(offer);
        self.offered_period = Some(period);
        self.events.push(GameEvent::UpgradeOffered(offer));
        log::info!("Upgrade offered: {} / {}", offer.bullet.as_str(), offer.gun.as_str());
    }

    /// Install the pending offer on the player. Returns false if there was
    /// no offer, no player, or no gun at that mount.
    pub fn apply_upgrade(&mut self, choice: UpgradeChoice) -> bool {
        let Some(offer) = self.upgrade_offer else {
            return false;
        };
        let Some(player) = self.creatures.player_mut() else {
            return false;
        };
        let gun = match choice {
            UpgradeChoice::HeadBullet | UpgradeChoice::HeadGun => player.head_gun.as_mut(),
            UpgradeChoice::TailBullet | UpgradeChoice::TailGun => player.tail_gun.as_mut(),
        };
        let Some(gun) = gun else {
            return false;
        };

        match choice {
            UpgradeChoice::HeadBullet | UpgradeChoice::TailBullet => {
                gun.bullet = offer.bullet.template();
            }
            UpgradeChoice::HeadGun | UpgradeChoice::TailGun => gun.rebuild(offer.gun),
        }
        self.upgrade_offer = None;
        self.events.push(GameEvent::UpgradeApplied(choice));
        log::info!("Upgrade applied: {choice:?}");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_world_has_player_and_one_enemy() {
        let world = World::new(7, WorldConfig::default()).unwrap();
        assert_eq!(world.creatures.len(), 2);
        assert_eq!(world.creatures.player_index(), Some(0));
        assert_eq!(world.phase, GamePhase::Playing);
        assert_eq!(world.bullets.capacity(), BULLET_POOL_CAPACITY);
    }

    #[test]
    fn test_enemy_spawns_at_distance_facing_player() {
        let mut world = World::new(3, WorldConfig::default()).unwrap();
        let index = world.spawn_enemy_near(Vec2::ZERO, Vec2::new(1000.0, 500.0)).unwrap();
        let enemy = world.creatures.get(index).unwrap();
        assert_eq!(enemy.role, Role::Hostile);
        assert!((enemy.head_pos().length() - 600.0).abs() < 1e-2);
        assert!(enemy.direction.dot(-enemy.head_pos().normalize()) > 0.999);
        assert!(enemy.speed >= ENEMY_BASE_SPEED && enemy.speed < ENEMY_BASE_SPEED + ENEMY_SPEED_SPREAD);
    }

    #[test]
    fn test_enemy_spawn_is_clamped_inside_walls() {
        let mut world = World::new(3, WorldConfig::default()).unwrap();
        let corner = Vec2::new(WALL_INNER_SCREENS * ARENA_WIDTH, WALL_INNER_SCREENS * ARENA_HEIGHT);
        for _ in 0..20 {
            let index = world.spawn_enemy_near(corner, DEFAULT_VIEW_EXTENTS).unwrap();
            let pos = world.creatures.get(index).unwrap().head_pos();
            assert!(pos.x <= corner.x && pos.y <= corner.y);
        }
    }

    #[test]
    fn test_spawn_interval_ramps_down_to_one_second() {
        let mut world = World::new(1, WorldConfig::default()).unwrap();
        let rate = LOGIC_RATE as u64;
        assert_eq!(world.spawn_interval_ticks(), 5 * rate);
        world.time_ticks = 31 * rate;
        assert_eq!(world.spawn_interval_ticks(), 4 * rate);
        world.time_ticks = 600 * rate;
        assert_eq!(world.spawn_interval_ticks(), rate);
    }

    #[test]
    fn test_upgrade_offered_once_per_period() {
        let mut world = World::new(9, WorldConfig::default()).unwrap();
        let rate = LOGIC_RATE as u64;
        world.time_ticks = 9 * rate;
        world.update_upgrade_offer();
        assert!(world.upgrade_offer.is_none());

        world.time_ticks = 10 * rate - 2;
        world.update_upgrade_offer();
        let offer = world.upgrade_offer.unwrap();
        assert_ne!(offer.bullet, BulletKind::Standard);

        world.events.clear();
        world.time_ticks += 1;
        world.update_upgrade_offer();
        assert!(world.events.is_empty());
    }

    #[test]
    fn test_apply_upgrade_consumes_offer() {
        let mut world = World::new(9, WorldConfig::default()).unwrap();
        assert!(!world.apply_upgrade(UpgradeChoice::HeadBullet));

        world.upgrade_offer = Some(UpgradeOffer {
            bullet: BulletKind::Sniper,
            gun: GunKind::Rifle,
        });
        assert!(world.apply_upgrade(UpgradeChoice::TailGun));
        let tail = world.player().unwrap().tail_gun.unwrap();
        assert_eq!(tail.kind, GunKind::Rifle);
        assert_eq!(tail.bullet.kind, BulletKind::Standard);
        assert!(world.upgrade_offer.is_none());
        assert!(!world.apply_upgrade(UpgradeChoice::TailGun));
    }

    #[test]
    fn test_reset_round_clears_score_and_bullets() {
        let mut world = World::new(5, WorldConfig::default()).unwrap();
        world.score = 500;
        world.time_ticks = 1234;
        world.bullets.add(BulletKind::Ammo.template());
        world.phase = GamePhase::GameOver;
        world.reset_round().unwrap();
        assert_eq!(world.score, 0);
        assert_eq!(world.time_ticks, 0);
        assert!(world.bullets.is_empty());
        assert_eq!(world.phase, GamePhase::Playing);
        assert_eq!(world.creatures.len(), 2);
    }
}
