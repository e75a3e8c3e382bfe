use glam::DVec2;
use simview_common::Rgb;
use simview_render::{DrawContext, PixelSize, Surface, SurfaceError};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

pub(crate) fn js_error(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

/// A page canvas. Its `width`/`height` attributes as laid out are the
/// logical size.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas }
    }
}

impl Surface for CanvasSurface {
    type Context = CanvasContext;

    fn logical_size(&self) -> PixelSize {
        PixelSize::new(self.canvas.width(), self.canvas.height())
    }

    fn set_buffer_size(&mut self, size: PixelSize) {
        self.canvas.set_width(size.width);
        self.canvas.set_height(size.height);
    }

    fn set_display_size(&mut self, size: PixelSize) {
        let style = self.canvas.style();
        for (property, value) in [("width", size.width), ("height", size.height)] {
            if let Err(err) = style.set_property(property, &format!("{value}px")) {
                tracing::warn!("failed to pin canvas {property}: {}", js_error(&err));
            }
        }
    }

    fn context(&mut self) -> Result<CanvasContext, SurfaceError> {
        let context = self
            .canvas
            .get_context("2d")
            .map_err(|err| SurfaceError::ContextUnavailable(js_error(&err)))?
            .ok_or_else(|| SurfaceError::ContextUnavailable("canvas has no 2d context".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| SurfaceError::ContextUnavailable("unexpected 2d context type".into()))?;
        Ok(CanvasContext { context })
    }
}

/// [`DrawContext`] over a browser `CanvasRenderingContext2d`.
pub struct CanvasContext {
    context: CanvasRenderingContext2d,
}

impl DrawContext for CanvasContext {
    fn scale(&mut self, x: f64, y: f64) -> Result<(), SurfaceError> {
        self.context
            .scale(x, y)
            .map_err(|err| SurfaceError::Draw(js_error(&err)))
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.context.clear_rect(x, y, width, height);
    }

    fn begin_path(&mut self) {
        self.context.begin_path();
    }

    fn move_to(&mut self, point: DVec2) {
        self.context.move_to(point.x, point.y);
    }

    fn line_to(&mut self, point: DVec2) {
        self.context.line_to(point.x, point.y);
    }

    fn arc(
        &mut self,
        center: DVec2,
        radius: f64,
        start: f64,
        end: f64,
    ) -> Result<(), SurfaceError> {
        self.context
            .arc(center.x, center.y, radius, start, end)
            .map_err(|err| SurfaceError::Draw(js_error(&err)))
    }

    fn set_fill_color(&mut self, color: Rgb) {
        self.context.set_fill_style_str(&color.to_string());
    }

    fn fill(&mut self) {
        self.context.fill();
    }

    fn set_stroke_color(&mut self, color: Rgb) {
        self.context.set_stroke_style_str(&color.to_string());
    }

    fn set_line_width(&mut self, width: f64) {
        self.context.set_line_width(width);
    }

    fn stroke(&mut self) {
        self.context.stroke();
    }
}
