use simview_common::WorldSnapshot;

/// Errors raised while advancing a simulation.
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    #[error("simulation state corrupted at tick {tick}: {reason}")]
    Corrupted { tick: u64, reason: String },
    #[error("invalid simulation config: {0}")]
    InvalidConfig(String),
}

/// The capability pair a renderer needs from a simulation engine.
///
/// The engine is otherwise opaque: how it seeds, moves, or evolves its
/// entities is none of the renderer's business.
pub trait Simulation {
    /// Current state of every entity. Each call builds a fresh snapshot.
    fn world(&self) -> WorldSnapshot;

    /// Advance by one tick. Blocks until the tick is complete.
    fn step(&mut self) -> Result<(), SimulationError>;
}

impl<S: Simulation + ?Sized> Simulation for Box<S> {
    fn world(&self) -> WorldSnapshot {
        (**self).world()
    }

    fn step(&mut self) -> Result<(), SimulationError> {
        (**self).step()
    }
}
