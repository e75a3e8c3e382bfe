use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A food pellet at a normalized position in `[0, 1] x [0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub position: Vec2,
}

impl Food {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
        }
    }
}

/// An animal at a normalized position, facing `rotation` radians.
///
/// The heading direction is `(-sin θ, cos θ)`: zero faces +y, the world's
/// "up", which lands toward the bottom edge once mapped to screen space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Animal {
    pub position: Vec2,
    pub rotation: f32,
}

impl Animal {
    pub fn new(x: f32, y: f32, rotation: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            rotation,
        }
    }
}

/// Immutable view of every entity in the simulation at one instant.
///
/// Produced fresh on every query and discarded after the frame that drew it.
/// Entities carry no identity across snapshots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub foods: Vec<Food>,
    pub animals: Vec<Animal>,
}

impl WorldSnapshot {
    pub fn new(foods: Vec<Food>, animals: Vec<Animal>) -> Self {
        Self { foods, animals }
    }

    pub fn entity_count(&self) -> usize {
        self.foods.len() + self.animals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.foods.is_empty() && self.animals.is_empty()
    }
}

/// An opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// CSS functional notation, e.g. `rgb(0, 225, 0)`.
impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_snapshot_has_no_entities() {
        let snapshot = WorldSnapshot::default();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.entity_count(), 0);
    }

    #[test]
    fn entity_count_sums_both_kinds() {
        let snapshot = WorldSnapshot::new(
            vec![Food::new(0.1, 0.2), Food::new(0.3, 0.4)],
            vec![Animal::new(0.5, 0.5, 0.0)],
        );
        assert!(!snapshot.is_empty());
        assert_eq!(snapshot.entity_count(), 3);
    }

    #[test]
    fn rgb_formats_as_css() {
        assert_eq!(Rgb::new(0, 225, 0).to_string(), "rgb(0, 225, 0)");
        assert_eq!(Rgb::new(255, 255, 255).to_string(), "rgb(255, 255, 255)");
    }

    #[test]
    fn snapshot_serializes_with_field_names() {
        let snapshot = WorldSnapshot::new(vec![Food::new(0.25, 0.75)], vec![]);
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["foods"][0]["position"][0], 0.25);
        assert_eq!(json["animals"].as_array().unwrap().len(), 0);
    }
}
