//! Canvas 2D backend

use glam::Vec2;
use std::f64::consts::TAU;
use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::shapes;
use crate::consts::BULLET_RADIUS;
use crate::sim::World;

/// Draws a [`World`] onto an HTML canvas
pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    pub fn new(canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d) -> Self {
        Self { canvas, ctx }
    }

    /// Match the backing store to the playfield
    pub fn resize(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    /// Draw one frame, back to front
    pub fn render(&self, world: &World) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        ctx.set_fill_style_str(shapes::BACKGROUND);
        ctx.fill_rect(0.0, 0.0, f64::from(world.size.x), f64::from(world.size.y));

        for star in &world.stars {
            ctx.set_fill_style_str(&shapes::star_color(star.alpha));
            self.disc(star.pos, star.radius)?;
        }

        if !world.game_over {
            self.draw_ship(world)?;
        }

        for particle in &world.particles {
            ctx.set_fill_style_str(&shapes::rgba(particle.color, particle.alpha()));
            self.disc(particle.pos, particle.radius)?;
        }

        ctx.set_fill_style_str(shapes::BULLET_FILL);
        for bullet in &world.bullets {
            self.disc(bullet.pos, BULLET_RADIUS)?;
        }

        ctx.set_stroke_style_str(shapes::ASTEROID_STROKE);
        ctx.set_line_width(shapes::ASTEROID_LINE_WIDTH);
        for asteroid in &world.asteroids {
            self.polygon(&shapes::asteroid_outline(asteroid));
            ctx.stroke();
        }

        Ok(())
    }

    fn draw_ship(&self, world: &World) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let player = &world.player;

        if player.thrusting {
            let (start, end) = shapes::flame_gradient(player);
            let gradient = ctx.create_linear_gradient(
                f64::from(start.x),
                f64::from(start.y),
                f64::from(end.x),
                f64::from(end.y),
            );
            let [base, tip] = shapes::FLAME_COLORS;
            gradient.add_color_stop(0.0, base)?;
            gradient.add_color_stop(1.0, tip)?;
            ctx.set_fill_style_canvas_gradient(&gradient);
            self.polygon(&shapes::flame_triangle(player));
            ctx.fill();
        }

        ctx.set_stroke_style_str(shapes::SHIP_STROKE);
        ctx.set_line_width(shapes::SHIP_LINE_WIDTH);
        self.polygon(&shapes::ship_triangle(player));
        ctx.stroke();
        Ok(())
    }

    /// Trace a closed path through `points`
    fn polygon(&self, points: &[Vec2]) {
        let ctx = &self.ctx;
        ctx.begin_path();
        let mut iter = points.iter();
        if let Some(first) = iter.next() {
            ctx.move_to(f64::from(first.x), f64::from(first.y));
        }
        for p in iter {
            ctx.line_to(f64::from(p.x), f64::from(p.y));
        }
        ctx.close_path();
    }

    fn disc(&self, center: Vec2, radius: f32) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        ctx.begin_path();
        ctx.arc(
            f64::from(center.x),
            f64::from(center.y),
            f64::from(radius),
            0.0,
            TAU,
        )?;
        ctx.fill();
        Ok(())
    }
}
