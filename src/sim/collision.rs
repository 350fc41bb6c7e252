//! Collision detection and scoring
//!
//! Everything is a circle, so every test is a centre-distance check. The
//! pass is asteroid-major and bullet-minor; hits are recorded as index sets
//! and compacted afterwards so nothing is skipped or processed twice.

use glam::Vec2;

use super::state::{Asteroid, Bullet, GameEvent, Player, ROCK_COLOR, SHIP_COLOR, World};

/// Whether two centres are strictly closer than `reach`
#[inline]
pub fn within(a: Vec2, b: Vec2, reach: f32) -> bool {
    a.distance_squared(b) < reach * reach
}

/// A bullet hits when its centre is inside the asteroid's circle
#[inline]
pub fn bullet_hits_asteroid(bullet: &Bullet, asteroid: &Asteroid) -> bool {
    within(bullet.pos, asteroid.pos, asteroid.radius)
}

/// Ship and rock touch when their circles overlap
#[inline]
pub fn player_hits_asteroid(player: &Player, asteroid: &Asteroid) -> bool {
    within(player.pos, asteroid.pos, player.radius + asteroid.radius)
}

/// Drop every element whose flag is set, keeping the order of the rest
fn compact<T>(items: &mut Vec<T>, removed: &[bool]) {
    let mut flags = removed.iter();
    items.retain(|_| !flags.next().copied().unwrap_or(false));
}

/// Resolve all bullet/asteroid and player/asteroid contacts for this step
///
/// - A hit asteroid is removed with the bullet that hit it. Rocks above the
///   split threshold award `split_points` and leave two half-size children;
///   smaller ones award `destroy_points`.
/// - Children join the field after the pass and are first checked next step.
/// - A rock consumed by a bullet can't also kill the ship.
/// - Ship contact ends the run and stops the pass, freezing the score.
pub fn resolve_collisions(world: &mut World, events: &mut Vec<GameEvent>) {
    let asteroid_count = world.asteroids.len();
    let mut dead_asteroids = vec![false; asteroid_count];
    let mut dead_bullets = vec![false; world.bullets.len()];
    let mut children: Vec<(Vec2, f32)> = Vec::new();
    let threshold = world.config.split_threshold;

    for ai in 0..asteroid_count {
        let asteroid = &world.asteroids[ai];
        let hit = world
            .bullets
            .iter()
            .enumerate()
            .find(|(bi, bullet)| !dead_bullets[*bi] && bullet_hits_asteroid(bullet, asteroid))
            .map(|(bi, _)| bi);

        if let Some(bi) = hit {
            let (pos, radius) = (asteroid.pos, asteroid.radius);
            let split = asteroid.splits(threshold);
            dead_bullets[bi] = true;
            dead_asteroids[ai] = true;

            let points = if split {
                children.push((pos, radius / 2.0));
                children.push((pos, radius / 2.0));
                world.config.split_points
            } else {
                world.config.destroy_points
            };
            world.score += points;
            world.spawn_explosion(pos, ROCK_COLOR);
            events.push(GameEvent::AsteroidDestroyed {
                pos,
                radius,
                split,
                points,
            });
            continue;
        }

        if player_hits_asteroid(&world.player, asteroid) {
            let pos = world.player.pos;
            world.spawn_explosion(pos, SHIP_COLOR);
            world.game_over = true;
            events.push(GameEvent::PlayerDestroyed {
                pos,
                final_score: world.score,
            });
            break;
        }
    }

    compact(&mut world.asteroids, &dead_asteroids);
    compact(&mut world.bullets, &dead_bullets);

    for (pos, radius) in children {
        world.spawn_asteroid(Some(pos), Some(radius));
    }
}
