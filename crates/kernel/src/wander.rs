use glam::Vec2;
use simview_common::{Animal, Food, WorldSnapshot};
use std::f32::consts::TAU;

use crate::{Simulation, SimulationError};

/// Distance at which an animal eats a food pellet.
const EAT_RADIUS: f32 = 0.01;

/// Tunables for [`WanderSimulation`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WanderConfig {
    pub food_count: usize,
    pub animal_count: usize,
    /// Distance travelled per tick, in normalized world units.
    pub speed: f32,
    /// Largest heading change per tick, in radians.
    pub turn_rate: f32,
}

impl Default for WanderConfig {
    fn default() -> Self {
        Self {
            food_count: 60,
            animal_count: 40,
            speed: 0.002,
            turn_rate: 0.1,
        }
    }
}

impl WanderConfig {
    fn validate(&self) -> Result<(), SimulationError> {
        if !self.speed.is_finite() || self.speed < 0.0 {
            return Err(SimulationError::InvalidConfig(format!(
                "speed must be finite and non-negative, got {}",
                self.speed
            )));
        }
        if !self.turn_rate.is_finite() || self.turn_rate < 0.0 {
            return Err(SimulationError::InvalidConfig(format!(
                "turn_rate must be finite and non-negative, got {}",
                self.turn_rate
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
struct Wanderer {
    position: Vec2,
    rotation: f32,
    satiation: u32,
}

/// A deterministic stand-in world: animals drift along a jittering heading,
/// eating whatever food they pass over.
///
/// Stands in for a real engine so the renderer has something to draw. Given
/// the same seed and config, every run produces identical states.
#[derive(Debug, Clone)]
pub struct WanderSimulation {
    config: WanderConfig,
    foods: Vec<Food>,
    animals: Vec<Wanderer>,
    tick: u64,
    rng: SeedStream,
}

impl WanderSimulation {
    /// Seed a world with randomly placed foods and animals.
    pub fn new(seed: u64, config: WanderConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        let mut rng = SeedStream::new(seed);

        let foods = (0..config.food_count)
            .map(|_| Food {
                position: rng.next_position(),
            })
            .collect();
        let animals = (0..config.animal_count)
            .map(|_| Wanderer {
                position: rng.next_position(),
                rotation: rng.next_f32() * TAU,
                satiation: 0,
            })
            .collect();

        tracing::debug!(
            seed,
            foods = config.food_count,
            animals = config.animal_count,
            "seeded wander simulation"
        );

        Ok(Self {
            config,
            foods,
            animals,
            tick: 0,
            rng,
        })
    }

    /// Current simulation tick.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Total number of food pellets eaten since creation.
    pub fn total_satiation(&self) -> u64 {
        self.animals.iter().map(|a| u64::from(a.satiation)).sum()
    }

    #[cfg(test)]
    fn from_parts(seed: u64, config: WanderConfig, foods: Vec<Food>, animals: Vec<Animal>) -> Self {
        Self {
            config,
            foods,
            animals: animals
                .into_iter()
                .map(|a| Wanderer {
                    position: a.position,
                    rotation: a.rotation,
                    satiation: 0,
                })
                .collect(),
            tick: 0,
            rng: SeedStream::new(seed),
        }
    }

    fn process_collisions(&mut self) {
        for animal in &mut self.animals {
            for food in &mut self.foods {
                if animal.position.distance(food.position) <= EAT_RADIUS {
                    animal.satiation += 1;
                    food.position = self.rng.next_position();
                }
            }
        }
    }

    fn process_turns(&mut self) {
        let turn_rate = self.config.turn_rate;
        for animal in &mut self.animals {
            let jitter = (self.rng.next_f32() * 2.0 - 1.0) * turn_rate;
            animal.rotation = wrap_unit(animal.rotation + jitter, TAU);
        }
    }

    fn process_movements(&mut self) {
        let speed = self.config.speed;
        for animal in &mut self.animals {
            animal.position += heading(animal.rotation) * speed;
            animal.position.x = wrap_unit(animal.position.x, 1.0);
            animal.position.y = wrap_unit(animal.position.y, 1.0);
        }
    }
}

impl Simulation for WanderSimulation {
    fn world(&self) -> WorldSnapshot {
        WorldSnapshot {
            foods: self.foods.clone(),
            animals: self
                .animals
                .iter()
                .map(|a| Animal {
                    position: a.position,
                    rotation: a.rotation,
                })
                .collect(),
        }
    }

    fn step(&mut self) -> Result<(), SimulationError> {
        self.process_collisions();
        self.process_turns();
        self.process_movements();
        self.tick += 1;

        if let Some(animal) = self
            .animals
            .iter()
            .find(|a| !a.position.is_finite() || !a.rotation.is_finite())
        {
            return Err(SimulationError::Corrupted {
                tick: self.tick,
                reason: format!(
                    "non-finite animal state at ({}, {}) facing {}",
                    animal.position.x, animal.position.y, animal.rotation
                ),
            });
        }
        Ok(())
    }
}

/// Unit heading for a rotation; zero faces +y.
fn heading(rotation: f32) -> Vec2 {
    Vec2::new(-rotation.sin(), rotation.cos())
}

/// Wrap `value` into `[0, period)`.
fn wrap_unit(value: f32, period: f32) -> f32 {
    let wrapped = value.rem_euclid(period);
    // rem_euclid can round up to `period` for tiny negative inputs
    if wrapped >= period { 0.0 } else { wrapped }
}

/// Splitmix64 stream: reproducible across platforms, no external RNG state.
#[derive(Debug, Clone)]
struct SeedStream {
    state: u64,
}

impl SeedStream {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }

    /// Uniform in `[0, 1)`, using the top 24 bits.
    fn next_f32(&mut self) -> f32 {
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }

    fn next_position(&mut self) -> Vec2 {
        Vec2::new(self.next_f32(), self.next_f32())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn still_config() -> WanderConfig {
        WanderConfig {
            food_count: 0,
            animal_count: 0,
            speed: 0.01,
            turn_rate: 0.0,
        }
    }

    #[test]
    fn seeds_requested_population() {
        let sim = WanderSimulation::new(42, WanderConfig::default()).unwrap();
        let world = sim.world();
        assert_eq!(world.foods.len(), 60);
        assert_eq!(world.animals.len(), 40);
        assert_eq!(sim.tick(), 0);
    }

    #[test]
    fn world_is_readable_before_first_step() {
        let sim = WanderSimulation::new(1, WanderConfig::default()).unwrap();
        assert_eq!(sim.world(), sim.world());
    }

    #[test]
    fn same_seed_same_trajectory() {
        let mut a = WanderSimulation::new(42, WanderConfig::default()).unwrap();
        let mut b = WanderSimulation::new(42, WanderConfig::default()).unwrap();
        for _ in 0..200 {
            a.step().unwrap();
            b.step().unwrap();
        }
        assert_eq!(a.world(), b.world());
        assert_eq!(a.tick(), 200);
    }

    #[test]
    fn different_seeds_diverge() {
        let a = WanderSimulation::new(1, WanderConfig::default()).unwrap();
        let b = WanderSimulation::new(2, WanderConfig::default()).unwrap();
        assert_ne!(a.world(), b.world());
    }

    #[test]
    fn entities_stay_normalized() {
        let mut sim = WanderSimulation::new(7, WanderConfig::default()).unwrap();
        for _ in 0..1000 {
            sim.step().unwrap();
        }
        let world = sim.world();
        for food in &world.foods {
            assert!((0.0..1.0).contains(&food.position.x));
            assert!((0.0..1.0).contains(&food.position.y));
        }
        for animal in &world.animals {
            assert!((0.0..1.0).contains(&animal.position.x));
            assert!((0.0..1.0).contains(&animal.position.y));
            assert!((0.0..TAU).contains(&animal.rotation));
        }
    }

    #[test]
    fn zero_rotation_moves_toward_positive_y() {
        let mut sim = WanderSimulation::from_parts(
            0,
            still_config(),
            vec![],
            vec![Animal::new(0.5, 0.5, 0.0)],
        );
        sim.step().unwrap();
        let moved = sim.world().animals[0].position;
        assert!((moved.x - 0.5).abs() < 1e-6);
        assert!((moved.y - 0.51).abs() < 1e-6);
    }

    #[test]
    fn movement_wraps_across_edges() {
        let mut sim = WanderSimulation::from_parts(
            0,
            still_config(),
            vec![],
            vec![Animal::new(0.5, 0.995, 0.0)],
        );
        sim.step().unwrap();
        let moved = sim.world().animals[0].position;
        assert!(moved.y < 0.01, "expected wrap to top, got {}", moved.y);
    }

    #[test]
    fn animal_eats_food_underneath() {
        let mut sim = WanderSimulation::from_parts(
            3,
            still_config(),
            vec![Food::new(0.5, 0.5)],
            vec![Animal::new(0.5, 0.5, 0.0)],
        );
        sim.step().unwrap();
        assert_eq!(sim.total_satiation(), 1);
    }

    #[test]
    fn rejects_invalid_config() {
        let config = WanderConfig {
            speed: f32::NAN,
            ..WanderConfig::default()
        };
        let err = WanderSimulation::new(0, config).unwrap_err();
        assert!(matches!(err, SimulationError::InvalidConfig(_)));
    }

    #[test]
    fn wrap_unit_stays_in_range() {
        assert_eq!(wrap_unit(1.25, 1.0), 0.25);
        assert_eq!(wrap_unit(-0.25, 1.0), 0.75);
        assert!(wrap_unit(-1e-9, 1.0) < 1.0);
    }

    #[test]
    fn seed_stream_is_unit_interval() {
        let mut rng = SeedStream::new(99);
        for _ in 0..10_000 {
            let v = rng.next_f32();
            assert!((0.0..1.0).contains(&v));
        }
    }
}
