//! Rendering core: maps a simulation's normalized world onto a 2D surface,
//! one frame at a time.
//!
//! # Invariants
//! - The physical buffer equals the logical size times the pixel ratio; all
//!   drawing happens in logical units.
//! - Every frame clears the whole logical area, steps the simulation once,
//!   then draws from a single world snapshot.
//! - The first error halts the loop; no further frame is requested.
//!
//! Host environments plug in through [`Surface`], [`DrawContext`] and
//! [`FrameScheduler`]. [`RecordingSurface`] is an in-memory host used by the
//! CLI and tests.

mod recorder;
mod render_loop;
pub mod shapes;
mod surface;
mod svg;

pub use recorder::{CommandLog, DrawCommand, RecordingContext, RecordingSurface};
pub use render_loop::{FrameBudget, FrameScheduler, RenderError, RenderLoop};
pub use surface::{DrawContext, PixelSize, Surface, SurfaceAdapter, SurfaceError};
pub use svg::SvgFrame;
