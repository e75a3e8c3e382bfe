use glam::DVec2;
use serde::{Deserialize, Serialize};
use simview_common::Rgb;

/// Errors from the host drawing surface.
#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    #[error("2D drawing context unavailable: {0}")]
    ContextUnavailable(String),
    #[error("draw call rejected: {0}")]
    Draw(String),
}

/// Width and height in whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

impl PixelSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Both dimensions multiplied by `ratio`, rounded to the nearest pixel.
    pub fn scaled(self, ratio: f64) -> Self {
        Self {
            width: (f64::from(self.width) * ratio).round() as u32,
            height: (f64::from(self.height) * ratio).round() as u32,
        }
    }
}

/// The drawing calls the renderer issues, in logical coordinates once the
/// adapter has applied its scale.
///
/// Mirrors a canvas-style 2D context: a current path plus fill and stroke
/// state. Calls a host may reject return `Result`.
pub trait DrawContext {
    /// Multiply the current transform by a scale.
    fn scale(&mut self, x: f64, y: f64) -> Result<(), SurfaceError>;
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn begin_path(&mut self);
    fn move_to(&mut self, point: DVec2);
    fn line_to(&mut self, point: DVec2);
    /// Add a circular arc from `start` to `end` radians to the current path.
    fn arc(
        &mut self,
        center: DVec2,
        radius: f64,
        start: f64,
        end: f64,
    ) -> Result<(), SurfaceError>;
    fn set_fill_color(&mut self, color: Rgb);
    fn fill(&mut self);
    fn set_stroke_color(&mut self, color: Rgb);
    fn set_line_width(&mut self, width: f64);
    fn stroke(&mut self);
}

/// A host drawing target: a logical (CSS) size, a resizable physical pixel
/// buffer, and a 2D context.
pub trait Surface {
    type Context: DrawContext;

    /// The size the page layout gave the surface, before any scaling.
    fn logical_size(&self) -> PixelSize;

    /// Resize the physical pixel buffer.
    fn set_buffer_size(&mut self, size: PixelSize);

    /// Pin the displayed size, so a larger buffer does not grow on screen.
    fn set_display_size(&mut self, size: PixelSize);

    fn context(&mut self) -> Result<Self::Context, SurfaceError>;
}

/// Owns a surface and maps logical pixels onto its physical buffer.
///
/// Scaling happens exactly once, in [`SurfaceAdapter::initialize`]. Later
/// viewport resizes are not tracked.
pub struct SurfaceAdapter<S: Surface> {
    surface: S,
    context: S::Context,
    logical: PixelSize,
    pixel_ratio: f64,
}

impl<S: Surface> SurfaceAdapter<S> {
    /// Scale `surface` for a display with `device_pixel_ratio` physical
    /// pixels per logical pixel.
    ///
    /// A ratio that is not a positive finite number falls back to 1. Failing
    /// to obtain the drawing context is fatal and leaves the surface untouched.
    pub fn initialize(mut surface: S, device_pixel_ratio: f64) -> Result<Self, SurfaceError> {
        let mut context = surface.context()?;

        let pixel_ratio = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio
        } else {
            tracing::warn!(device_pixel_ratio, "unusable pixel ratio, falling back to 1");
            1.0
        };

        let logical = surface.logical_size();
        let buffer = logical.scaled(pixel_ratio);
        surface.set_buffer_size(buffer);
        surface.set_display_size(logical);
        // Resizing a buffer resets the context transform, so scale last.
        context.scale(pixel_ratio, pixel_ratio)?;

        tracing::info!(
            logical_width = logical.width,
            logical_height = logical.height,
            buffer_width = buffer.width,
            buffer_height = buffer.height,
            pixel_ratio,
            "surface initialized"
        );

        Ok(Self {
            surface,
            context,
            logical,
            pixel_ratio,
        })
    }

    pub fn logical_size(&self) -> PixelSize {
        self.logical
    }

    pub fn logical_width(&self) -> f64 {
        f64::from(self.logical.width)
    }

    pub fn logical_height(&self) -> f64 {
        f64::from(self.logical.height)
    }

    /// The ratio actually applied, after fallback.
    pub fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn context(&self) -> &S::Context {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut S::Context {
        &mut self.context
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DrawCommand, RecordingSurface};

    #[test]
    fn scaled_rounds_to_nearest_pixel() {
        let size = PixelSize::new(101, 33);
        assert_eq!(size.scaled(1.5), PixelSize::new(152, 50));
        assert_eq!(size.scaled(1.0), size);
    }

    #[test]
    fn initialize_scales_buffer_and_pins_display() {
        let adapter = SurfaceAdapter::initialize(RecordingSurface::new(800, 600), 2.0).unwrap();

        assert_eq!(adapter.logical_size(), PixelSize::new(800, 600));
        assert_eq!(adapter.surface().buffer_size(), PixelSize::new(1600, 1200));
        assert_eq!(adapter.surface().display_size(), Some(PixelSize::new(800, 600)));
        assert_eq!(adapter.pixel_ratio(), 2.0);
        assert_eq!(
            adapter.context().log().commands(),
            vec![DrawCommand::Scale { x: 2.0, y: 2.0 }]
        );
    }

    #[test]
    fn unusable_ratio_falls_back_to_one() {
        for ratio in [0.0, -2.0, f64::NAN, f64::INFINITY] {
            let adapter =
                SurfaceAdapter::initialize(RecordingSurface::new(320, 240), ratio).unwrap();
            assert_eq!(adapter.pixel_ratio(), 1.0);
            assert_eq!(adapter.surface().buffer_size(), PixelSize::new(320, 240));
        }
    }

    #[test]
    fn missing_context_is_fatal() {
        let result = SurfaceAdapter::initialize(RecordingSurface::without_context(100, 100), 2.0);
        assert!(matches!(result, Err(SurfaceError::ContextUnavailable(_))));
    }
}
