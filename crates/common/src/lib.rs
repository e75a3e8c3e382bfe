//! Shared types: the read-only world snapshot handed from a simulation to the
//! renderer, and the colors the renderer paints with.

mod types;

pub use types::{Animal, Food, Rgb, WorldSnapshot};
