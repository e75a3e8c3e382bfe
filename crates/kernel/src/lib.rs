//! Simulation Kernel: the contract the renderer consumes, and a stand-in world.
//!
//! # Invariants
//! - `world()` never mutates state and is callable before the first `step()`.
//! - `step()` advances exactly one discrete tick.
//! - Given the same seed, `WanderSimulation` produces identical trajectories.

mod simulation;
mod wander;

pub use simulation::{Simulation, SimulationError};
pub use wander::{WanderConfig, WanderSimulation};
