//! Entity factories
//!
//! All randomness comes from the caller's RNG so a seeded world stays
//! reproducible.

use glam::Vec2;
use rand::Rng;

use super::state::{Asteroid, Bullet, Particle, Player, Rgb, Star};
use crate::config::GameConfig;
use crate::consts::*;
use crate::heading_vector;

/// Uniform sample from `[lo, hi)`; degenerate ranges return `lo`
#[inline]
fn uniform<R: Rng>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    lo + rng.random::<f32>() * (hi - lo)
}

/// Random coordinate in the outer 30% band at either end of an axis
fn edge_band<R: Rng>(rng: &mut R, extent: f32) -> f32 {
    if rng.random_bool(0.5) {
        uniform(rng, 0.0, extent * 0.3)
    } else {
        uniform(rng, extent * 0.7, extent)
    }
}

/// Build an asteroid. Without a position it spawns away from the centre,
/// where the ship starts; without a radius it gets a large random one.
pub fn create_asteroid<R: Rng>(
    rng: &mut R,
    config: &GameConfig,
    size: Vec2,
    pos: Option<Vec2>,
    radius: Option<f32>,
) -> Asteroid {
    let radius = radius
        .unwrap_or_else(|| uniform(rng, config.asteroid_min_radius, config.asteroid_max_radius));
    let pos = pos.unwrap_or_else(|| Vec2::new(edge_band(rng, size.x), edge_band(rng, size.y)));
    let angle = uniform(rng, 0.0, std::f32::consts::TAU);
    let speed = uniform(rng, config.asteroid_min_speed, config.asteroid_max_speed);

    let vertices = rng.random_range(ASTEROID_MIN_VERTICES..=ASTEROID_MAX_VERTICES);
    let jag = radius * ASTEROID_JAGGEDNESS;
    let offsets = (0..vertices).map(|_| uniform(rng, -jag, jag)).collect();

    Asteroid {
        pos,
        radius,
        angle,
        speed,
        offsets,
    }
}

/// A burst of debris sharing one colour
pub fn create_explosion<R: Rng>(rng: &mut R, pos: Vec2, color: Rgb) -> Vec<Particle> {
    (0..EXPLOSION_PARTICLES)
        .map(|_| Particle {
            pos,
            vel: Vec2::new(
                uniform(rng, -PARTICLE_MAX_SPEED, PARTICLE_MAX_SPEED),
                uniform(rng, -PARTICLE_MAX_SPEED, PARTICLE_MAX_SPEED),
            ),
            radius: uniform(rng, 1.0, 3.0),
            color,
            life: PARTICLE_LIFE,
        })
        .collect()
}

/// A bullet leaving the ship's nose along its heading
pub fn create_bullet(player: &Player, speed: f32) -> Bullet {
    Bullet {
        pos: player.nose(),
        vel: heading_vector(player.angle) * speed,
    }
}

/// Static background starfield
pub fn create_stars<R: Rng>(rng: &mut R, count: usize, size: Vec2) -> Vec<Star> {
    (0..count)
        .map(|_| Star {
            pos: Vec2::new(uniform(rng, 0.0, size.x), uniform(rng, 0.0, size.y)),
            radius: uniform(rng, 0.0, 1.5),
            alpha: uniform(rng, 0.2, 0.7),
        })
        .collect()
}
