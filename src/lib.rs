//! Rock Drift - an Asteroids-style mini-game for a portfolio page
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (entities, physics, collisions, scoring)
//! - `input`: Keyboard/touch state mapped to player intent
//! - `session`: Play session state machine
//! - `renderer`: Canvas 2D drawing
//! - `audio`: Optional sound cues (Web Audio or no-op)
//! - `platform`: Browser DOM binding and the animation-frame loop
//! - `config`: Data-driven game tuning

pub mod audio;
pub mod config;
pub mod error;
pub mod input;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod sim;

pub use config::GameConfig;
pub use error::BindError;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep. One step is one "frame" in gameplay units.
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Longest frame delta fed into the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Playfield is this fraction of the viewport in each dimension
    pub const VIEWPORT_FRACTION: f64 = 0.9;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 15.0;
    pub const PLAYER_FRICTION: f32 = 0.99;
    pub const PLAYER_THRUST: f32 = 0.1;
    pub const PLAYER_MAX_SPEED: f32 = 5.0;
    pub const PLAYER_LIVES: u8 = 3;
    /// Angular step while a rotate key is held (radians per step)
    pub const ROTATION_STEP: f32 = 0.05;

    /// Bullets
    pub const BULLET_SPEED: f32 = 10.0;
    pub const BULLET_RADIUS: f32 = 3.0;
    pub const MAX_BULLETS: usize = 5;

    /// Asteroids
    pub const ASTEROID_MIN_RADIUS: f32 = 30.0;
    pub const ASTEROID_MAX_RADIUS: f32 = 60.0;
    pub const ASTEROID_MIN_SPEED: f32 = 0.5;
    pub const ASTEROID_MAX_SPEED: f32 = 1.5;
    pub const ASTEROID_MIN_VERTICES: usize = 7;
    pub const ASTEROID_MAX_VERTICES: usize = 11;
    /// Vertex offsets are drawn from +/- this fraction of the radius
    pub const ASTEROID_JAGGEDNESS: f32 = 0.3;
    /// Asteroids larger than this split in two when shot
    pub const SPLIT_THRESHOLD: f32 = 20.0;
    /// Asteroids per wave (and at session start)
    pub const WAVE_SIZE: usize = 5;

    /// Scoring
    pub const SPLIT_POINTS: u32 = 20;
    pub const DESTROY_POINTS: u32 = 50;

    /// Particles
    pub const EXPLOSION_PARTICLES: usize = 15;
    pub const PARTICLE_LIFE: u32 = 100;
    pub const PARTICLE_MAX_SPEED: f32 = 2.0;

    /// Background
    pub const STAR_COUNT: usize = 100;
}

/// Unit heading vector in screen space (y grows downward, so angles are
/// measured counter-clockwise as seen on screen)
#[inline]
pub fn heading_vector(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), -angle.sin())
}

/// Wrap a single coordinate around a `[0, extent]` axis, allowing the entity
/// to leave by its full radius before it reappears on the far side
#[inline]
pub fn wrap_coord(value: f32, radius: f32, extent: f32) -> f32 {
    if value < -radius {
        extent + radius
    } else if value > extent + radius {
        -radius
    } else {
        value
    }
}

/// Toroidal, radius-aware wrap of a position inside a `size` playfield
#[inline]
pub fn wrap_position(pos: Vec2, radius: f32, size: Vec2) -> Vec2 {
    Vec2::new(
        wrap_coord(pos.x, radius, size.x),
        wrap_coord(pos.y, radius, size.y),
    )
}
