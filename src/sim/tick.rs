//! Fixed timestep simulation tick
//!
//! One call advances the world by exactly one logic tick. Stages run in a
//! fixed order and each sees the finished output of the one before:
//! steering, spines, contacts, limbs, weapons, bullets, cleanup.

use super::aabb::Aabb;
use super::collision::{RamPenalty, push_out_of_walls, resolve_contacts, update_bullets};
use super::creature::{Creature, Role};
use super::pool::AddOutcome;
use super::state::{GameEvent, GamePhase, UpgradeChoice, World};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Thrust; turning only works while thrusting
    pub forward: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    pub fire_head: bool,
    pub fire_tail: bool,
    /// Install the pending upgrade offer, if any
    pub upgrade: Option<UpgradeChoice>,
    /// World-space visible rectangle, for culling flags only
    pub view: Option<Aabb>,
}

/// Advance the world by one tick
pub fn tick(world: &mut World, input: &TickInput) {
    if world.phase == GamePhase::GameOver {
        return;
    }
    world.events.clear();
    world.time_ticks += 1;

    if let Some(player) = world.creatures.player_mut() {
        drive_player(player, input);
        push_out_of_walls(player, &world.walls);
    }

    steer_hostiles(world);

    for creature in world.creatures.iter_mut() {
        creature.advance();
    }

    let rams = resolve_contacts(world.creatures.as_mut_slice(), world.config.ram_penalty);
    if rams > 0 && world.config.ram_penalty == RamPenalty::Rammed {
        world.events.push(GameEvent::PlayerDamaged {
            amount: rams as f32 * RAM_DAMAGE,
        });
    }

    for creature in world.creatures.iter_mut() {
        creature.update_limbs();
        creature.update_mounts();
    }

    fire_weapons(world, input);

    let hits = update_bullets(&mut world.bullets, world.creatures.as_mut_slice());
    for hit in hits.iter().filter(|h| h.role == Role::Player) {
        world.events.push(GameEvent::PlayerDamaged { amount: hit.damage });
    }

    let (count, score) = world.creatures.remove_dead_hostiles();
    if count > 0 {
        world.score += score;
        world.kills += count;
        world.events.push(GameEvent::HostilesKilled { count, score });
        log::info!("{count} hostile(s) killed, score {}", world.score);
    }
    world.bullets.remove_spent();

    if !world.player().is_some_and(Creature::is_alive) {
        world.phase = GamePhase::GameOver;
        world.events.push(GameEvent::GameOver { score: world.score });
        log::info!(
            "Game over after {:.1}s: score {}, kills {}",
            world.elapsed_seconds(),
            world.score,
            world.kills
        );
        return;
    }

    if let Err(err) = world.run_spawn_schedule() {
        log::warn!("Enemy spawn failed: {err}");
    }

    world.update_upgrade_offer();
    if let Some(choice) = input.upgrade {
        world.apply_upgrade(choice);
    }

    if let Some(view) = input.view {
        for creature in world.creatures.iter_mut() {
            creature.update_visibility(&view);
        }
    }
}

/// Thrust and turn while `forward` is held, brake to a stop otherwise
fn drive_player(player: &mut Creature, input: &TickInput) {
    if input.forward {
        if input.turn_left {
            player.turn_left();
        }
        if input.turn_right {
            player.turn_right();
        }
        player.add_speed(PLAYER_THRUST);
    } else {
        if player.speed > 0.0 {
            player.add_speed(-PLAYER_BRAKE);
        }
        if player.speed < 0.0 {
            player.set_speed(0.0);
        }
    }
}

/// Point every hostile one turn step toward the player's head
fn steer_hostiles(world: &mut World) {
    let Some(target) = world.player().map(Creature::head_pos) else {
        return;
    };
    for creature in world.creatures.iter_mut().filter(|c| c.role == Role::Hostile) {
        let to_player = target - creature.head_pos();
        creature.steer_toward(to_player);
    }
}

fn fire_weapons(world: &mut World, input: &TickInput) {
    for creature in world.creatures.iter_mut() {
        let (fire_head, fire_tail) = match creature.role {
            Role::Player => (input.fire_head, input.fire_tail),
            Role::Hostile => (false, false),
        };
        let role = creature.role;
        let mounts = [(creature.head_gun.as_mut(), fire_head), (creature.tail_gun.as_mut(), fire_tail)];
        for (gun, fire) in mounts {
            let Some(gun) = gun else { continue };
            match gun.try_shoot(&mut world.bullets, fire) {
                Some(AddOutcome::Added) => world.events.push(GameEvent::ShotFired { by: role }),
                Some(AddOutcome::Replaced) => {
                    world.events.push(GameEvent::ShotFired { by: role });
                    world.events.push(GameEvent::BulletEvicted);
                }
                Some(AddOutcome::Dropped) => log::debug!("Shot dropped: bullet pool full"),
                None => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::WorldConfig;
    use glam::Vec2;

    fn world(seed: u64) -> World {
        World::new(seed, WorldConfig::default()).unwrap()
    }

    #[test]
    fn test_tick_advances_clock_and_moves_player() {
        let mut world = world(12345);
        let start = world.player().unwrap().head_pos();
        let input = TickInput {
            forward: true,
            ..Default::default()
        };
        tick(&mut world, &input);
        assert_eq!(world.time_ticks, 1);
        let player = world.player().unwrap();
        assert_eq!(player.speed, PLAYER_START_SPEED + PLAYER_THRUST);
        assert!(player.head_pos().distance(start) > 0.0);
    }

    #[test]
    fn test_player_brakes_to_a_stop() {
        let mut world = world(1);
        for _ in 0..3 {
            tick(&mut world, &TickInput::default());
        }
        assert_eq!(world.player().unwrap().speed, 0.0);
    }

    #[test]
    fn test_turning_needs_thrust() {
        let mut world = world(1);
        let heading = world.player().unwrap().direction;
        let input = TickInput {
            turn_left: true,
            ..Default::default()
        };
        tick(&mut world, &input);
        assert!((world.player().unwrap().direction - heading).length() < 1e-6);
    }

    #[test]
    fn test_hostiles_turn_toward_player() {
        let mut world = world(42);
        let player = world.player().unwrap().head_pos();
        let enemy = world.creatures.get(1).unwrap();
        let before = enemy.direction.dot((player - enemy.head_pos()).normalize());
        tick(&mut world, &TickInput::default());
        let enemy = world.creatures.get(1).unwrap();
        let after = enemy.direction.dot((player - enemy.head_pos()).normalize());
        assert!(after >= before - 1e-3);
    }

    #[test]
    fn test_fire_spawns_bullets_from_both_mounts() {
        let mut world = world(2);
        let player = world.creatures.player_mut().unwrap();
        player.head_gun.as_mut().unwrap().ticks_since_shot = 1000;
        player.tail_gun.as_mut().unwrap().ticks_since_shot = 1000;
        let input = TickInput {
            fire_head: true,
            fire_tail: true,
            ..Default::default()
        };
        tick(&mut world, &input);
        assert_eq!(world.bullets.len(), 2);
        let shots = world
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::ShotFired { by: Role::Player }))
            .count();
        assert_eq!(shots, 2);
    }

    #[test]
    fn test_dead_hostile_is_removed_and_scored() {
        let mut world = world(3);
        world.creatures.get_mut(1).unwrap().hp = 0.0;
        tick(&mut world, &TickInput::default());
        assert_eq!(world.score, 100);
        assert_eq!(world.kills, 1);
        assert!(world.events.contains(&GameEvent::HostilesKilled { count: 1, score: 100 }));
    }

    #[test]
    fn test_game_over_stops_ticking() {
        let mut world = world(4);
        world.creatures.player_mut().unwrap().hp = 0.0;
        tick(&mut world, &TickInput::default());
        assert_eq!(world.phase, GamePhase::GameOver);
        let ticks = world.time_ticks;
        tick(&mut world, &TickInput::default());
        assert_eq!(world.time_ticks, ticks);
    }

    #[test]
    fn test_enemy_wave_after_interval() {
        let mut world = world(5);
        let before = world.creatures.len();
        let interval = world.spawn_interval_ticks();
        // keep the player alive through any ramming
        for _ in 0..interval {
            world.creatures.player_mut().unwrap().hp = 1000.0;
            tick(&mut world, &TickInput::default());
        }
        assert!(world.creatures.len() >= before + SPAWN_BATCH as usize - 1);
        assert_eq!(world.last_spawn_tick, interval);
    }

    #[test]
    fn test_view_sets_visibility() {
        let mut world = world(6);
        let head = world.player().unwrap().head_pos();
        let input = TickInput {
            view: Some(Aabb::around(head, 10.0)),
            ..Default::default()
        };
        tick(&mut world, &input);
        assert!(world.player().unwrap().visible);

        let input = TickInput {
            view: Some(Aabb::around(Vec2::splat(1.0e6), 10.0)),
            ..Default::default()
        };
        tick(&mut world, &input);
        assert!(!world.player().unwrap().visible);
    }

    #[test]
    fn test_same_seed_same_run() {
        let script = |t: u64| TickInput {
            forward: t % 90 < 60,
            turn_left: t % 200 < 50,
            fire_head: true,
            fire_tail: t % 3 == 0,
            ..Default::default()
        };
        let mut a = world(99);
        let mut b = world(99);
        for t in 0..900 {
            tick(&mut a, &script(t));
            tick(&mut b, &script(t));
        }
        assert_eq!(a.score, b.score);
        assert_eq!(a.creatures.len(), b.creatures.len());
        assert_eq!(a.bullets.len(), b.bullets.len());
        for (x, y) in a.creatures.iter().zip(b.creatures.iter()) {
            assert_eq!(x.head_pos(), y.head_pos());
            assert_eq!(x.hp, y.hp);
        }
    }
}
