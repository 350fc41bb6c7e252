//! Frame-driven simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One call to `tick` per fixed step
//! - Seeded RNG only (owned by the `World`)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{bullet_hits_asteroid, player_hits_asteroid, resolve_collisions};
pub use state::{
    Asteroid, Bullet, GameEvent, Particle, Player, ROCK_COLOR, Rgb, SHIP_COLOR, Star, World,
};
pub use tick::{TickInput, Turn, fire, tick};
