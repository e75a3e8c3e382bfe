//! Shape geometry and drawing for world entities.
//!
//! Sizes scale with the logical surface width so a world looks the same at
//! any resolution. Rotation follows the `(x - sin θ·r, y + cos θ·r)`
//! parametrization, which matches the direction animals actually move.

use glam::{DVec2, Vec2};
use simview_common::Rgb;
use std::f64::consts::TAU;

use crate::{DrawContext, PixelSize, SurfaceError};

/// Food radius as a fraction of the logical width.
pub const FOOD_RADIUS: f64 = 0.005;
/// Animal body radius as a fraction of the logical width.
pub const ANIMAL_SIZE: f64 = 0.01;
/// Nose vertex distance relative to the body radius.
pub const NOSE_SCALE: f64 = 1.5;
/// Outline width in logical pixels.
pub const OUTLINE_WIDTH: f64 = 1.0;

pub const FOOD_COLOR: Rgb = Rgb::new(0, 225, 0);
pub const ANIMAL_COLOR: Rgb = Rgb::new(0, 0, 225);
pub const OUTLINE_COLOR: Rgb = Rgb::new(255, 255, 255);

/// Map a normalized world position onto the logical surface.
pub fn to_screen(position: Vec2, logical: PixelSize) -> DVec2 {
    position.as_dvec2() * DVec2::new(f64::from(logical.width), f64::from(logical.height))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: DVec2,
    pub radius: f64,
}

impl Circle {
    /// A food pellet: diameter 1% of the logical width.
    pub fn food(center: DVec2, logical_width: f64) -> Self {
        Self {
            center,
            radius: FOOD_RADIUS * logical_width,
        }
    }
}

/// A directional marker. The nose sits further from the center than the two
/// tail corners, so the shape reads as a heading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub nose: DVec2,
    pub tails: [DVec2; 2],
}

impl Triangle {
    pub fn animal(center: DVec2, rotation: f64, logical_width: f64) -> Self {
        let size = ANIMAL_SIZE * logical_width;
        Self {
            nose: vertex(center, rotation, size * NOSE_SCALE),
            tails: [
                vertex(center, rotation + TAU / 3.0, size),
                vertex(center, rotation + 2.0 * TAU / 3.0, size),
            ],
        }
    }
}

fn vertex(center: DVec2, angle: f64, radius: f64) -> DVec2 {
    DVec2::new(
        center.x - angle.sin() * radius,
        center.y + angle.cos() * radius,
    )
}

/// Filled circle, no outline.
pub fn draw_food<C: DrawContext + ?Sized>(
    ctx: &mut C,
    circle: &Circle,
) -> Result<(), SurfaceError> {
    ctx.begin_path();
    ctx.arc(circle.center, circle.radius, 0.0, TAU)?;
    ctx.set_fill_color(FOOD_COLOR);
    ctx.fill();
    Ok(())
}

/// Filled triangle, then its outline on top.
pub fn draw_animal<C: DrawContext + ?Sized>(ctx: &mut C, triangle: &Triangle) {
    ctx.begin_path();
    ctx.move_to(triangle.nose);
    ctx.line_to(triangle.tails[0]);
    ctx.line_to(triangle.tails[1]);
    ctx.line_to(triangle.nose);

    ctx.set_fill_color(ANIMAL_COLOR);
    ctx.fill();
    ctx.set_stroke_color(OUTLINE_COLOR);
    ctx.set_line_width(OUTLINE_WIDTH);
    ctx.stroke();
}
