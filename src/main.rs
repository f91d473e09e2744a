//! Coil Arena headless runner
//!
//! Plays one round with a scripted autopilot at a fixed frame rate, logs
//! what happened and keeps the high score up to date.
//!
//! Usage: `coil-arena [settings.json]`

use std::process::ExitCode;

use glam::Vec2;

use coil_arena::sim::{Aabb, Creature, Role, TickInput, World, tick};
use coil_arena::sim::{GamePhase, UpgradeChoice, cos_between, cross};
use coil_arena::{FixedTimestep, HighScore, Result, Settings};

const DEFAULT_SETTINGS_PATH: &str = "coil-arena.json";
/// Simulated display refresh
const FRAME_SECONDS: f32 = 1.0 / 60.0;
/// Autopilot fires the head gun when the target is within this cone
const AIM_CONE_COS: f32 = 0.94;

fn main() -> ExitCode {
    env_logger::init();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let settings_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_SETTINGS_PATH.to_string());
    let settings = Settings::load(&settings_path);

    let seed = settings.seed.unwrap_or_else(rand::random);
    log::info!("Coil Arena (headless) starting, seed {seed}");

    let mut high_score = HighScore::load(&settings.high_score_path).unwrap_or_else(|err| {
        log::warn!("Ignoring unreadable high score: {err}");
        HighScore::default()
    });

    let mut world = World::new(seed, settings.world_config())?;
    let mut clock = FixedTimestep::new(settings.logic_rate, settings.max_substeps);
    let frames = (settings.headless_seconds.max(0.0) / FRAME_SECONDS).ceil() as u64;

    for _ in 0..frames {
        for _ in 0..clock.advance(FRAME_SECONDS) {
            let input = autopilot(&world, settings.view_extents);
            tick(&mut world, &input);
        }
        if world.phase == GamePhase::GameOver {
            break;
        }
    }

    log::info!(
        "Round finished after {:.1}s: score {}, kills {}, {} creatures and {} bullets alive",
        world.elapsed_seconds(),
        world.score,
        world.kills,
        world.creatures.len(),
        world.bullets.len()
    );

    if high_score.record(world.score) {
        log::info!("New high score: {}", high_score.best);
    }
    high_score.save(&settings.high_score_path)?;
    Ok(())
}

/// Chase the nearest hostile, shooting forward when lined up and backward always
fn autopilot(world: &World, view_extents: Vec2) -> TickInput {
    let Some(player) = world.player() else {
        return TickInput::default();
    };
    let head = player.head_pos();
    let view = Aabb::from_view(head + Vec2::new(-view_extents.x, view_extents.y) * 0.5, view_extents);

    let target = world
        .creatures
        .iter()
        .filter(|c| c.role == Role::Hostile)
        .map(Creature::head_pos)
        .min_by(|a, b| a.distance_squared(head).total_cmp(&b.distance_squared(head)));

    let mut input = TickInput {
        forward: true,
        fire_tail: true,
        upgrade: world.upgrade_offer.map(|_| UpgradeChoice::HeadBullet),
        view: Some(view),
        ..Default::default()
    };

    if let Some(target) = target {
        let to_target = target - head;
        let side = cross(player.direction, to_target);
        input.turn_left = side > 0.0;
        input.turn_right = side < 0.0;
        input.fire_head = cos_between(player.direction, to_target).is_some_and(|c| c > AIM_CONE_COS);
    }
    input
}
