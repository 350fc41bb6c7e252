//! Fixed-step simulation
//!
//! One call to [`tick`] is one gameplay frame: every speed and angular rate
//! in the game is expressed per step.

use super::collision::resolve_collisions;
use super::spawn::create_bullet;
use super::state::{GameEvent, Particle, World};

/// Rotation control state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Turn {
    #[default]
    None,
    /// Counter-clockwise on screen
    Left,
    /// Clockwise on screen
    Right,
}

/// Held controls for a single step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub thrust: bool,
    pub turn: Turn,
}

/// Fire a bullet from the ship's nose unless the bullet cap is reached
pub fn fire(world: &mut World) -> Option<GameEvent> {
    if world.game_over || world.bullets.len() >= world.config.max_bullets {
        return None;
    }
    let bullet = create_bullet(&world.player, world.config.bullet_speed);
    world.bullets.push(bullet);
    Some(GameEvent::BulletFired)
}

/// Advance the world by one step
///
/// Order: ship, particles, bullets, asteroids, collisions, wave refill.
pub fn tick(world: &mut World, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if world.game_over {
        return events;
    }

    let size = world.size;
    let step = world.config.rotation_step;

    let player = &mut world.player;
    player.thrusting = input.thrust;
    player.rotation = match input.turn {
        Turn::None => 0.0,
        Turn::Left => step,
        Turn::Right => -step,
    };
    player.update(size);

    for particle in &mut world.particles {
        particle.update();
    }
    world.particles.retain(Particle::is_alive);

    for bullet in &mut world.bullets {
        bullet.update();
    }
    world.bullets.retain(|b| b.in_bounds(size));

    for asteroid in &mut world.asteroids {
        asteroid.update(size);
    }

    resolve_collisions(world, &mut events);

    if world.asteroids.is_empty() {
        let count = world.spawn_wave();
        log::debug!("Wave cleared, spawned {count} asteroids");
        events.push(GameEvent::WaveSpawned { count });
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::state::{Bullet, Player};
    use glam::Vec2;
    use proptest::prelude::*;

    fn world() -> World {
        World::new(12345, 800.0, 600.0, GameConfig::default())
    }

    /// Stationary rocks so collisions happen exactly where they are placed
    fn freeze_asteroids(world: &mut World) {
        for a in &mut world.asteroids {
            a.speed = 0.0;
        }
    }

    #[test]
    fn test_bullet_cap() {
        let mut w = world();
        for _ in 0..5 {
            assert_eq!(fire(&mut w), Some(GameEvent::BulletFired));
        }
        assert!(fire(&mut w).is_none());
        assert_eq!(w.bullets.len(), 5);
    }

    #[test]
    fn test_fire_after_bullets_expire() {
        let mut w = world();
        w.asteroids.clear();
        w.spawn_asteroid(Some(Vec2::new(30.0, 580.0)), Some(10.0));
        freeze_asteroids(&mut w);
        for _ in 0..5 {
            fire(&mut w);
        }
        // Bullets leave the 600px-tall field in about 30 steps
        for _ in 0..40 {
            tick(&mut w, &TickInput::default());
        }
        assert!(w.bullets.is_empty());
        assert!(fire(&mut w).is_some());
    }

    #[test]
    fn test_no_fire_when_game_over() {
        let mut w = world();
        w.game_over = true;
        assert!(fire(&mut w).is_none());
    }

    #[test]
    fn test_turning() {
        let mut w = world();
        let start = w.player.angle;
        tick(
            &mut w,
            &TickInput {
                turn: Turn::Left,
                ..Default::default()
            },
        );
        assert!((w.player.angle - (start + 0.05)).abs() < 1e-6);
        tick(
            &mut w,
            &TickInput {
                turn: Turn::Right,
                ..Default::default()
            },
        );
        assert!((w.player.angle - start).abs() < 1e-6);
        tick(&mut w, &TickInput::default());
        assert_eq!(w.player.rotation, 0.0);
    }

    #[test]
    fn test_wave_refill() {
        let mut w = world();
        w.asteroids.clear();
        w.spawn_asteroid(Some(Vec2::new(100.0, 100.0)), Some(10.0));
        freeze_asteroids(&mut w);
        w.bullets.push(Bullet {
            pos: Vec2::new(100.0, 100.0),
            vel: Vec2::ZERO,
        });

        let events = tick(&mut w, &TickInput::default());
        assert_eq!(w.score, 50);
        assert_eq!(w.asteroids.len(), 5);
        assert!(events.contains(&GameEvent::WaveSpawned { count: 5 }));
    }

    #[test]
    fn test_particles_expire() {
        let mut w = world();
        w.asteroids.clear();
        w.spawn_asteroid(Some(Vec2::new(30.0, 30.0)), Some(10.0));
        freeze_asteroids(&mut w);
        w.spawn_explosion(Vec2::new(400.0, 100.0), [255, 255, 255]);
        for _ in 0..99 {
            tick(&mut w, &TickInput::default());
        }
        assert_eq!(w.particles.len(), 15);
        tick(&mut w, &TickInput::default());
        assert!(w.particles.is_empty());
    }

    #[test]
    fn test_game_over_freezes_world() {
        let mut w = world();
        w.game_over = true;
        let pos = w.player.pos;
        let events = tick(
            &mut w,
            &TickInput {
                thrust: true,
                ..Default::default()
            },
        );
        assert!(events.is_empty());
        assert_eq!(w.player.pos, pos);
    }

    /// Scripted run: split a radius-40 rock, clear both children, then
    /// fly into a rock.
    #[test]
    fn test_session_end_to_end() {
        let mut w = world();
        assert_eq!(w.player.pos, Vec2::new(400.0, 300.0));
        assert_eq!(w.asteroids.len(), 5);

        // Keep one target straight above the ship, park the rest in a corner
        w.asteroids.truncate(1);
        w.asteroids[0].pos = Vec2::new(400.0, 150.0);
        w.asteroids[0].radius = 40.0;
        w.spawn_asteroid(Some(Vec2::new(60.0, 540.0)), Some(10.0));
        freeze_asteroids(&mut w);

        let idle = TickInput::default();
        fire(&mut w);
        let mut steps = 0;
        while w.score == 0 && steps < 30 {
            tick(&mut w, &idle);
            steps += 1;
        }
        assert_eq!(w.score, 20);
        let children: Vec<_> = w.asteroids.iter().filter(|a| a.radius == 20.0).collect();
        assert_eq!(children.len(), 2);
        for c in &children {
            assert_eq!(c.pos, Vec2::new(400.0, 150.0));
        }

        // Hold the children still and shoot each of them
        freeze_asteroids(&mut w);
        for expected in [70, 120] {
            fire(&mut w);
            for _ in 0..15 {
                tick(&mut w, &idle);
            }
            assert_eq!(w.score, expected);
        }
        assert!(w.asteroids.iter().all(|a| a.radius != 20.0));
        assert_eq!(w.asteroids.len(), 1);

        // Ram the parked rock
        w.player.pos = Vec2::new(60.0, 520.0);
        let events = tick(&mut w, &idle);
        assert!(w.game_over);
        assert!(events.contains(&GameEvent::PlayerDestroyed {
            pos: Vec2::new(60.0, 520.0),
            final_score: 120,
        }));
    }

    proptest! {
        #[test]
        fn prop_speed_never_exceeds_cap(inputs in prop::collection::vec((any::<bool>(), -1i8..=1), 1..300)) {
            let config = GameConfig::default();
            let mut player = Player::new(Vec2::new(400.0, 300.0), &config);
            let size = Vec2::new(800.0, 600.0);
            for (thrust, turn) in inputs {
                let before = player.speed;
                player.thrusting = thrust;
                player.rotation = f32::from(turn) * config.rotation_step;
                player.update(size);
                prop_assert!(player.speed <= 5.0);
                if !thrust {
                    prop_assert!((player.speed - before * 0.99).abs() < 1e-5);
                }
            }
        }

        #[test]
        fn prop_wrapped_entities_stay_in_band(seed in any::<u64>(), steps in 1usize..200) {
            let mut w = World::new(seed, 640.0, 480.0, GameConfig::default());
            w.player.speed = 5.0;
            let input = TickInput { thrust: true, turn: Turn::Left };
            for _ in 0..steps {
                tick(&mut w, &input);
                if w.game_over {
                    break;
                }
                let p = &w.player;
                prop_assert!(p.pos.x >= -p.radius && p.pos.x <= w.size.x + p.radius);
                prop_assert!(p.pos.y >= -p.radius && p.pos.y <= w.size.y + p.radius);
                for a in &w.asteroids {
                    prop_assert!(a.pos.x >= -a.radius && a.pos.x <= w.size.x + a.radius);
                    prop_assert!(a.pos.y >= -a.radius && a.pos.y <= w.size.y + a.radius);
                }
            }
        }

        #[test]
        fn prop_never_more_than_cap_from_fire(presses in 0usize..20) {
            let mut w = world();
            for _ in 0..presses {
                fire(&mut w);
            }
            prop_assert!(w.bullets.len() <= 5);
            prop_assert_eq!(w.bullets.len(), presses.min(5));
        }
    }
}
