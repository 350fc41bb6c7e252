//! Shape generation for the 2D canvas
//!
//! Pure geometry and colour strings; the canvas backend only traces what
//! these return. Screen space is y-down, ship angles are y-up.

use glam::Vec2;
use std::f32::consts::TAU;

use crate::sim::{Asteroid, Player, Rgb};

/// Background fill
pub const BACKGROUND: &str = "#000000";
/// Ship outline
pub const SHIP_STROKE: &str = "#6366f1";
pub const SHIP_LINE_WIDTH: f64 = 2.0;
pub const BULLET_FILL: &str = "#FFFF00";
pub const ASTEROID_STROKE: &str = "#BDBDBD";
pub const ASTEROID_LINE_WIDTH: f64 = 2.0;
/// Flame gradient stops, base to tip
pub const FLAME_COLORS: [&str; 2] = ["orange", "yellow"];
/// Flame gradient length in pixels
const FLAME_GRADIENT_LENGTH: f32 = 20.0;

/// CSS colour with alpha, e.g. `rgba(189,189,189,0.5)`
pub fn rgba(color: Rgb, alpha: f32) -> String {
    let [r, g, b] = color;
    format!("rgba({r},{g},{b},{})", alpha.clamp(0.0, 1.0))
}

/// White star colour at the given brightness
pub fn star_color(alpha: f32) -> String {
    rgba([255, 255, 255], alpha)
}

/// Ship triangle: nose, then the two rear corners
pub fn ship_triangle(player: &Player) -> [Vec2; 3] {
    let Player {
        pos, radius: r, angle, ..
    } = *player;
    let (sin, cos) = angle.sin_cos();
    [
        Vec2::new(pos.x + r * cos, pos.y - r * sin),
        Vec2::new(pos.x - r * (cos + sin), pos.y + r * (sin - cos)),
        Vec2::new(pos.x - r * (cos - sin), pos.y + r * (sin + cos)),
    ]
}

/// Thrust flame: two base points behind the ship and the tip
pub fn flame_triangle(player: &Player) -> [Vec2; 3] {
    let Player {
        pos, radius: r, angle, ..
    } = *player;
    let (sin, cos) = angle.sin_cos();
    let back = 2.0 / 3.0;
    [
        Vec2::new(
            pos.x - r * (back * cos + 0.5 * sin),
            pos.y + r * (back * sin - 0.5 * cos),
        ),
        Vec2::new(
            pos.x - r * (back * cos - 0.5 * sin),
            pos.y + r * (back * sin + 0.5 * cos),
        ),
        Vec2::new(pos.x - 1.5 * r * cos, pos.y + 1.5 * r * sin),
    ]
}

/// Start and end of the flame's linear gradient
pub fn flame_gradient(player: &Player) -> (Vec2, Vec2) {
    let (sin, cos) = player.angle.sin_cos();
    let end = player.pos + FLAME_GRADIENT_LENGTH * Vec2::new(-cos, sin);
    (player.pos, end)
}

/// Closed outline of a jagged rock
pub fn asteroid_outline(asteroid: &Asteroid) -> Vec<Vec2> {
    let n = asteroid.vertex_count();
    asteroid
        .offsets
        .iter()
        .enumerate()
        .map(|(j, offset)| {
            let theta = TAU * j as f32 / n as f32;
            asteroid.pos + (asteroid.radius + offset) * Vec2::from_angle(theta)
        })
        .collect()
}
