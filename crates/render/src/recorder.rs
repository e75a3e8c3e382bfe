use glam::DVec2;
use serde::Serialize;
use simview_common::Rgb;
use std::cell::RefCell;
use std::rc::Rc;

use crate::{DrawContext, PixelSize, Surface, SurfaceError};

/// One call made against a [`RecordingContext`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Scale { x: f64, y: f64 },
    ClearRect { x: f64, y: f64, width: f64, height: f64 },
    BeginPath,
    MoveTo { point: DVec2 },
    LineTo { point: DVec2 },
    Arc { center: DVec2, radius: f64, start: f64, end: f64 },
    SetFillColor { color: Rgb },
    Fill,
    SetStrokeColor { color: Rgb },
    SetLineWidth { width: f64 },
    Stroke,
}

/// Shared, append-only list of draw commands.
///
/// Cloning yields another handle onto the same list, so a test double can
/// observe what was drawn while the render loop owns the context.
#[derive(Debug, Clone, Default)]
pub struct CommandLog {
    commands: Rc<RefCell<Vec<DrawCommand>>>,
}

impl CommandLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, command: DrawCommand) {
        self.commands.borrow_mut().push(command);
    }

    pub fn len(&self) -> usize {
        self.commands.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.borrow().is_empty()
    }

    pub fn last(&self) -> Option<DrawCommand> {
        self.commands.borrow().last().cloned()
    }

    /// Copy of every command recorded so far.
    pub fn commands(&self) -> Vec<DrawCommand> {
        self.commands.borrow().clone()
    }

    /// Commands from the most recent `ClearRect` onward, or everything if
    /// nothing has been cleared yet. Any clear counts, whatever its extent.
    pub fn last_frame(&self) -> Vec<DrawCommand> {
        let commands = self.commands.borrow();
        let start = commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::ClearRect { .. }))
            .unwrap_or(0);
        commands[start..].to_vec()
    }

    /// Number of recorded commands matching `predicate`.
    pub fn count(&self, predicate: impl Fn(&DrawCommand) -> bool) -> usize {
        self.commands.borrow().iter().filter(|c| predicate(c)).count()
    }
}

/// A [`DrawContext`] that records every call instead of rasterizing.
#[derive(Debug, Clone)]
pub struct RecordingContext {
    log: CommandLog,
}

impl RecordingContext {
    pub fn new(log: CommandLog) -> Self {
        Self { log }
    }

    pub fn log(&self) -> &CommandLog {
        &self.log
    }
}

impl DrawContext for RecordingContext {
    fn scale(&mut self, x: f64, y: f64) -> Result<(), SurfaceError> {
        self.log.push(DrawCommand::Scale { x, y });
        Ok(())
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.log.push(DrawCommand::ClearRect {
            x,
            y,
            width,
            height,
        });
    }

    fn begin_path(&mut self) {
        self.log.push(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, point: DVec2) {
        self.log.push(DrawCommand::MoveTo { point });
    }

    fn line_to(&mut self, point: DVec2) {
        self.log.push(DrawCommand::LineTo { point });
    }

    fn arc(
        &mut self,
        center: DVec2,
        radius: f64,
        start: f64,
        end: f64,
    ) -> Result<(), SurfaceError> {
        // Same rule a canvas applies.
        if radius < 0.0 {
            return Err(SurfaceError::Draw(format!("negative arc radius {radius}")));
        }
        self.log.push(DrawCommand::Arc {
            center,
            radius,
            start,
            end,
        });
        Ok(())
    }

    fn set_fill_color(&mut self, color: Rgb) {
        self.log.push(DrawCommand::SetFillColor { color });
    }

    fn fill(&mut self) {
        self.log.push(DrawCommand::Fill);
    }

    fn set_stroke_color(&mut self, color: Rgb) {
        self.log.push(DrawCommand::SetStrokeColor { color });
    }

    fn set_line_width(&mut self, width: f64) {
        self.log.push(DrawCommand::SetLineWidth { width });
    }

    fn stroke(&mut self) {
        self.log.push(DrawCommand::Stroke);
    }
}

/// In-memory surface. Tracks the sizes it is given and records draw calls
/// into a [`CommandLog`].
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    logical: PixelSize,
    buffer: PixelSize,
    display: Option<PixelSize>,
    log: CommandLog,
    has_context: bool,
}

impl RecordingSurface {
    /// A surface laid out at `width` x `height` logical pixels. The buffer
    /// starts at the same size, as an unscaled canvas does.
    pub fn new(width: u32, height: u32) -> Self {
        let logical = PixelSize::new(width, height);
        Self {
            logical,
            buffer: logical,
            display: None,
            log: CommandLog::new(),
            has_context: true,
        }
    }

    /// A surface whose drawing context can never be obtained.
    pub fn without_context(width: u32, height: u32) -> Self {
        Self {
            has_context: false,
            ..Self::new(width, height)
        }
    }

    pub fn buffer_size(&self) -> PixelSize {
        self.buffer
    }

    /// The pinned display size, once set.
    pub fn display_size(&self) -> Option<PixelSize> {
        self.display
    }

    pub fn log(&self) -> &CommandLog {
        &self.log
    }
}

impl Surface for RecordingSurface {
    type Context = RecordingContext;

    fn logical_size(&self) -> PixelSize {
        self.logical
    }

    fn set_buffer_size(&mut self, size: PixelSize) {
        self.buffer = size;
    }

    fn set_display_size(&mut self, size: PixelSize) {
        self.display = Some(size);
    }

    fn context(&mut self) -> Result<RecordingContext, SurfaceError> {
        if !self.has_context {
            return Err(SurfaceError::ContextUnavailable(
                "recording surface built without a context".into(),
            ));
        }
        Ok(RecordingContext::new(self.log.clone()))
    }
}
