//! Game state and core simulation types
//!
//! The `World` is the single authoritative copy of a play session. It owns
//! every entity plus the seeded RNG, so a session replays identically from
//! its seed and inputs.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::spawn;
use crate::config::GameConfig;
use crate::consts::*;
use crate::{heading_vector, wrap_position};

/// RGB colour triplet shared by a particle burst
pub type Rgb = [u8; 3];

/// Debris colour for destroyed asteroids
pub const ROCK_COLOR: Rgb = [189, 189, 189];
/// Debris colour for the destroyed ship
pub const SHIP_COLOR: Rgb = [129, 140, 248];

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    /// Heading (radians, counter-clockwise on screen, π/2 = nose up)
    pub angle: f32,
    /// Angular velocity (radians per step)
    pub rotation: f32,
    /// Scalar speed along the heading (pixels per step)
    pub speed: f32,
    pub friction: f32,
    /// Speed gained per step while thrusting
    pub thrust: f32,
    pub max_speed: f32,
    pub thrusting: bool,
    /// Carried for a future multi-life mode; a single collision ends the run
    pub lives: u8,
}

impl Player {
    /// Create a ship at `pos`, nose up, at rest
    pub fn new(pos: Vec2, config: &GameConfig) -> Self {
        Self {
            pos,
            radius: config.player_radius,
            angle: std::f32::consts::FRAC_PI_2,
            rotation: 0.0,
            speed: 0.0,
            friction: config.friction,
            thrust: config.thrust,
            max_speed: config.max_speed,
            thrusting: false,
            lives: PLAYER_LIVES,
        }
    }

    /// Advance one step: move, turn, decay, thrust, wrap
    pub fn update(&mut self, size: Vec2) {
        self.pos += heading_vector(self.angle) * self.speed;
        self.angle += self.rotation;
        self.speed *= self.friction;
        if self.thrusting {
            self.speed = (self.speed + self.thrust).min(self.max_speed);
        }
        self.pos = wrap_position(self.pos, self.radius, size);
    }

    /// Tip of the ship, where bullets leave
    pub fn nose(&self) -> Vec2 {
        self.pos + heading_vector(self.angle) * self.radius
    }
}

/// A drifting rock with a fixed jagged silhouette
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub pos: Vec2,
    pub radius: f32,
    /// Drift direction (radians)
    pub angle: f32,
    pub speed: f32,
    /// Radial offset per outline vertex; length is the vertex count
    pub offsets: Vec<f32>,
}

impl Asteroid {
    pub fn vertex_count(&self) -> usize {
        self.offsets.len()
    }

    pub fn update(&mut self, size: Vec2) {
        self.pos += Vec2::from_angle(self.angle) * self.speed;
        self.pos = wrap_position(self.pos, self.radius, size);
    }

    /// Whether shooting this rock breaks it into two smaller ones
    pub fn splits(&self, threshold: f32) -> bool {
        self.radius > threshold
    }
}

/// A projectile. Lives until it leaves the playfield or hits something.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Bullet {
    pub fn update(&mut self) {
        self.pos += self.vel;
    }

    pub fn in_bounds(&self, size: Vec2) -> bool {
        self.pos.x >= 0.0 && self.pos.x <= size.x && self.pos.y >= 0.0 && self.pos.y <= size.y
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: Rgb,
    /// Steps left; removed at 0
    pub life: u32,
}

impl Particle {
    pub fn update(&mut self) {
        self.pos += self.vel;
        self.life = self.life.saturating_sub(1);
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0
    }

    /// Opacity fades linearly with remaining life
    pub fn alpha(&self) -> f32 {
        self.life as f32 / PARTICLE_LIFE as f32
    }
}

/// Decorative background star
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec2,
    pub radius: f32,
    pub alpha: f32,
}

/// Something that happened during a step or input action, for the host to
/// turn into sound and HUD updates
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    BulletFired,
    AsteroidDestroyed {
        pos: Vec2,
        radius: f32,
        /// Two children were spawned
        split: bool,
        points: u32,
    },
    PlayerDestroyed {
        pos: Vec2,
        final_score: u32,
    },
    WaveSpawned {
        count: usize,
    },
}

/// Complete state of one play session
#[derive(Debug, Clone, Serialize)]
pub struct World {
    /// Seed the session was started with
    pub seed: u64,
    /// Playfield size in pixels
    pub size: Vec2,
    pub player: Player,
    pub asteroids: Vec<Asteroid>,
    pub bullets: Vec<Bullet>,
    pub particles: Vec<Particle>,
    pub stars: Vec<Star>,
    pub score: u32,
    pub game_over: bool,
    #[serde(skip)]
    pub config: GameConfig,
    #[serde(skip)]
    rng: Pcg32,
}

impl World {
    /// Create a fresh session on a `width` x `height` playfield
    pub fn new(seed: u64, width: f32, height: f32, config: GameConfig) -> Self {
        let size = Vec2::new(width, height);
        let mut world = Self {
            seed,
            size,
            player: Player::new(size / 2.0, &config),
            asteroids: Vec::new(),
            bullets: Vec::new(),
            particles: Vec::new(),
            stars: Vec::new(),
            score: 0,
            game_over: false,
            config,
            rng: Pcg32::seed_from_u64(seed),
        };
        world.populate();
        world
    }

    /// Start over with a new seed, keeping the playfield size and config
    pub fn reset(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);
        self.player = Player::new(self.size / 2.0, &self.config);
        self.asteroids.clear();
        self.bullets.clear();
        self.particles.clear();
        self.score = 0;
        self.game_over = false;
        self.populate();
    }

    fn populate(&mut self) {
        self.stars = spawn::create_stars(&mut self.rng, self.config.star_count, self.size);
        self.spawn_wave();
    }

    /// Change the playfield size without touching the simulation
    pub fn resize(&mut self, width: f32, height: f32) {
        self.size = Vec2::new(width, height);
    }

    /// Add an asteroid; omitted position/radius are randomised
    pub fn spawn_asteroid(&mut self, pos: Option<Vec2>, radius: Option<f32>) {
        let asteroid = spawn::create_asteroid(&mut self.rng, &self.config, self.size, pos, radius);
        self.asteroids.push(asteroid);
    }

    /// Add a full wave of randomly placed asteroids
    pub fn spawn_wave(&mut self) -> usize {
        let count = self.config.wave_size;
        for _ in 0..count {
            self.spawn_asteroid(None, None);
        }
        count
    }

    /// Add a burst of debris particles
    pub fn spawn_explosion(&mut self, pos: Vec2, color: Rgb) {
        let burst = spawn::create_explosion(&mut self.rng, pos, color);
        self.particles.extend(burst);
    }
}
