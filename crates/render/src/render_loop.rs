use simview_kernel::{Simulation, SimulationError};
use std::future::Future;

use crate::shapes::{self, Circle, Triangle};
use crate::{DrawContext, Surface, SurfaceAdapter, SurfaceError};

/// Errors that halt the render loop.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error(transparent)]
    Surface(#[from] SurfaceError),
    #[error(transparent)]
    Simulation(#[from] SimulationError),
}

/// The host's "run before the next repaint" primitive, as something to await.
pub trait FrameScheduler {
    /// Suspend until the host is about to repaint, yielding its frame
    /// timestamp in milliseconds. `None` once the host has stopped
    /// delivering frames.
    fn next_frame(&mut self) -> impl Future<Output = Option<f64>>;
}

/// Delivers a fixed number of frames immediately, then reports the host
/// as stopped. Timestamps advance at a nominal 60 Hz.
#[derive(Debug, Clone)]
pub struct FrameBudget {
    remaining: u64,
    timestamp_ms: f64,
}

impl FrameBudget {
    const INTERVAL_MS: f64 = 1000.0 / 60.0;

    pub fn new(frames: u64) -> Self {
        Self {
            remaining: frames,
            timestamp_ms: 0.0,
        }
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }
}

impl FrameScheduler for FrameBudget {
    async fn next_frame(&mut self) -> Option<f64> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.timestamp_ms += Self::INTERVAL_MS;
        Some(self.timestamp_ms)
    }
}

/// Steps a simulation and paints its world, once per host frame.
///
/// Owns both the surface and the simulation for as long as it runs. There is
/// no paused or stopped state: the loop ends when the host stops delivering
/// frames or when a frame fails.
pub struct RenderLoop<S: Surface, M: Simulation> {
    adapter: SurfaceAdapter<S>,
    simulation: M,
    frames_rendered: u64,
}

impl<S: Surface, M: Simulation> RenderLoop<S, M> {
    pub fn new(adapter: SurfaceAdapter<S>, simulation: M) -> Self {
        Self {
            adapter,
            simulation,
            frames_rendered: 0,
        }
    }

    pub fn adapter(&self) -> &SurfaceAdapter<S> {
        &self.adapter
    }

    pub fn simulation(&self) -> &M {
        &self.simulation
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// Render one frame: clear, step, then draw every entity from a single
    /// snapshot.
    ///
    /// A failed step returns before anything is drawn.
    pub fn frame(&mut self) -> Result<(), RenderError> {
        let logical = self.adapter.logical_size();
        let width = self.adapter.logical_width();
        let height = self.adapter.logical_height();

        self.adapter.context_mut().clear_rect(0.0, 0.0, width, height);
        self.simulation.step()?;

        // One read per frame keeps foods and animals from the same instant.
        let world = self.simulation.world();
        let ctx = self.adapter.context_mut();

        for food in &world.foods {
            let center = shapes::to_screen(food.position, logical);
            shapes::draw_food(ctx, &Circle::food(center, width))?;
        }

        for animal in &world.animals {
            let center = shapes::to_screen(animal.position, logical);
            let rotation = f64::from(animal.rotation);
            shapes::draw_animal(ctx, &Triangle::animal(center, rotation, width));
        }

        self.frames_rendered += 1;
        tracing::trace!(
            frame = self.frames_rendered,
            foods = world.foods.len(),
            animals = world.animals.len(),
            "frame drawn"
        );
        Ok(())
    }

    /// Render a frame each time `frames` yields one, until the host stops
    /// delivering frames or a frame fails.
    ///
    /// Frames never interleave: each runs to completion before the next is
    /// awaited. Resolves to the total number of frames rendered.
    pub async fn run<F: FrameScheduler>(&mut self, mut frames: F) -> Result<u64, RenderError> {
        tracing::debug!("render loop started");
        while let Some(timestamp_ms) = frames.next_frame().await {
            if let Err(err) = self.frame() {
                tracing::error!(
                    frame = self.frames_rendered + 1,
                    timestamp_ms,
                    "render loop halted: {err}"
                );
                return Err(err);
            }
        }
        tracing::debug!(frames = self.frames_rendered, "host stopped delivering frames");
        Ok(self.frames_rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RecordingSurface;
    use simview_common::{Animal, Food, WorldSnapshot};

    struct Fixed(WorldSnapshot);

    impl Simulation for Fixed {
        fn world(&self) -> WorldSnapshot {
            self.0.clone()
        }

        fn step(&mut self) -> Result<(), SimulationError> {
            Ok(())
        }
    }

    fn render_loop(world: WorldSnapshot) -> RenderLoop<RecordingSurface, Fixed> {
        let adapter = SurfaceAdapter::initialize(RecordingSurface::new(200, 100), 1.0).unwrap();
        RenderLoop::new(adapter, Fixed(world))
    }

    #[test]
    fn frame_counts_up() {
        let mut rl = render_loop(WorldSnapshot::default());
        rl.frame().unwrap();
        rl.frame().unwrap();
        assert_eq!(rl.frames_rendered(), 2);
    }

    #[test]
    fn empty_world_only_clears() {
        let mut rl = render_loop(WorldSnapshot::default());
        rl.frame().unwrap();
        assert_eq!(rl.adapter().context().log().last_frame().len(), 1);
    }

    #[test]
    fn frame_draws_one_shape_per_entity() {
        let world = WorldSnapshot::new(
            vec![Food::new(0.1, 0.1), Food::new(0.9, 0.9)],
            vec![Animal::new(0.5, 0.5, 0.0)],
        );
        let mut rl = render_loop(world);
        rl.frame().unwrap();

        let log = rl.adapter().context().log();
        assert_eq!(log.count(|c| matches!(c, crate::DrawCommand::Arc { .. })), 2);
        assert_eq!(log.count(|c| matches!(c, crate::DrawCommand::Stroke)), 1);
        assert_eq!(log.count(|c| matches!(c, crate::DrawCommand::Fill)), 3);
    }

    #[test]
    fn frame_budget_runs_out() {
        let mut budget = FrameBudget::new(2);
        assert!(pollster::block_on(budget.next_frame()).is_some());
        assert!(pollster::block_on(budget.next_frame()).is_some());
        assert_eq!(pollster::block_on(budget.next_frame()), None);
        assert_eq!(budget.remaining(), 0);
    }
}
