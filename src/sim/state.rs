//! Show state and core simulation types
//!
//! Entities are plain data; all behavior lives in the engine methods and the
//! tick pass. Randomness is consumed only at spawn/explode time, from the
//! session's seeded RNG.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;

/// A rising projectile. Detonates into sparks at its target altitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rocket {
    /// Canvas-space position, origin top-left, y grows downward
    pub pos: Vec2,
    /// Detonation altitude; smaller y is higher
    pub target_y: f32,
    /// Constant climb speed per tick
    pub speed: f32,
    /// Palette index, shared with the sparks it produces
    pub color: u32,
}

/// A short-lived fading spark from a detonation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spark {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Palette index inherited from the parent rocket
    pub color: u32,
    /// Opacity in [0, 1]; the spark dies when it reaches zero
    pub alpha: f32,
    /// Opacity lost per tick
    pub decay: f32,
    /// Render radius
    pub size: f32,
}

/// Complete simulation state for one show session.
///
/// The engine exclusively owns both entity collections; they are only
/// mutated by `spawn_rocket`, `explode`, and the tick pass.
#[derive(Debug, Clone)]
pub struct ShowState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Surface bounds in canvas units
    pub width: f32,
    pub height: f32,
    /// Active rockets
    pub rockets: Vec<Rocket>,
    /// Active sparks
    pub sparks: Vec<Spark>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Number of palette entries rocket colors index into
    palette_len: u32,
    rng: Pcg32,
}

impl ShowState {
    /// Create a fresh engine for a surface of the given size.
    ///
    /// Degenerate (zero or negative) dimensions are tolerated: random
    /// ranges collapse to their lower bound instead of panicking.
    pub fn new(width: f32, height: f32, palette_len: usize, seed: u64) -> Self {
        Self {
            seed,
            width,
            height,
            rockets: Vec::new(),
            sparks: Vec::new(),
            time_ticks: 0,
            palette_len: (palette_len as u32).max(1),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Update surface bounds (viewport resize mid-show)
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    /// Append one rocket at a random spot on the bottom edge, aimed at a
    /// random altitude in the top band of the surface.
    pub fn spawn_rocket(&mut self) {
        let x = uniform_f32(&mut self.rng, 0.0, self.width);
        let target_y = TARGET_FLOOR + uniform_f32(&mut self.rng, 0.0, self.height * TARGET_BAND);
        let speed = uniform_f32(&mut self.rng, ROCKET_SPEED_MIN, ROCKET_SPEED_MAX);
        let color = self.rng.random_range(0..self.palette_len);

        self.rockets.push(Rocket {
            pos: Vec2::new(x, self.height),
            target_y,
            speed,
            color,
        });
    }

    /// Append one burst of sparks at a detonation point.
    ///
    /// Sparks fan out radially: spark `i` of `n` leaves at exactly
    /// angle `2π·i/n`, with speed, decay, and size randomized per spark.
    pub fn explode(&mut self, x: f32, y: f32, color: u32) {
        let count = self.rng.random_range(SPARKS_MIN..SPARKS_MAX);
        self.sparks.reserve(count);

        for i in 0..count {
            let angle = std::f32::consts::TAU * i as f32 / count as f32;
            let speed = uniform_f32(&mut self.rng, SPARK_SPEED_MIN, SPARK_SPEED_MAX);

            self.sparks.push(Spark {
                pos: Vec2::new(x, y),
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                color,
                alpha: 1.0,
                decay: uniform_f32(&mut self.rng, SPARK_DECAY_MIN, SPARK_DECAY_MAX),
                size: uniform_f32(&mut self.rng, SPARK_SIZE_MIN, SPARK_SIZE_MAX),
            });
        }
    }
}

/// `random_range` panics on an empty range; degenerate surfaces collapse
/// to the lower bound instead.
fn uniform_f32(rng: &mut Pcg32, lo: f32, hi: f32) -> f32 {
    if hi > lo { rng.random_range(lo..hi) } else { lo }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_bounds_on_800x600() {
        let mut state = ShowState::new(800.0, 600.0, 6, 7);
        for _ in 0..200 {
            state.spawn_rocket();
        }
        for rocket in &state.rockets {
            assert!(rocket.pos.x >= 0.0 && rocket.pos.x <= 800.0);
            assert_eq!(rocket.pos.y, 600.0);
            assert!(rocket.target_y >= 50.0 && rocket.target_y <= 290.0);
            assert!(rocket.speed >= 8.0 && rocket.speed < 12.0);
            assert!(rocket.color < 6);
        }
    }

    #[test]
    fn test_spawn_on_degenerate_surface() {
        let mut state = ShowState::new(0.0, 0.0, 6, 1);
        state.spawn_rocket();
        let rocket = &state.rockets[0];
        assert_eq!(rocket.pos, Vec2::new(0.0, 0.0));
        assert_eq!(rocket.target_y, 50.0);
    }

    #[test]
    fn test_explode_batch_size_and_shared_origin() {
        let mut state = ShowState::new(800.0, 600.0, 6, 3);
        state.explode(120.0, 80.0, 4);

        assert!(state.sparks.len() >= 80 && state.sparks.len() < 120);
        for spark in &state.sparks {
            assert_eq!(spark.pos, Vec2::new(120.0, 80.0));
            assert_eq!(spark.color, 4);
            assert_eq!(spark.alpha, 1.0);
            assert!(spark.decay >= 0.015 && spark.decay < 0.025);
            assert!(spark.size >= 2.0 && spark.size < 4.0);
            let speed = spark.vel.length();
            assert!(speed >= 2.0 && speed < 6.0);
        }
    }

    #[test]
    fn test_explode_is_a_radial_fan() {
        let mut state = ShowState::new(800.0, 600.0, 6, 11);
        state.explode(0.0, 0.0, 0);

        let n = state.sparks.len() as f32;
        for (i, spark) in state.sparks.iter().enumerate() {
            let angle = std::f32::consts::TAU * i as f32 / n;
            let dir = spark.vel / spark.vel.length();
            assert!((dir.x - angle.cos()).abs() < 1e-5, "spark {i} off-angle");
            assert!((dir.y - angle.sin()).abs() < 1e-5, "spark {i} off-angle");
        }
    }

    #[test]
    fn test_same_seed_same_show() {
        let mut a = ShowState::new(800.0, 600.0, 6, 99);
        let mut b = ShowState::new(800.0, 600.0, 6, 99);
        for _ in 0..5 {
            a.spawn_rocket();
            b.spawn_rocket();
        }
        a.explode(10.0, 10.0, 1);
        b.explode(10.0, 10.0, 1);

        assert_eq!(a.rockets, b.rockets);
        assert_eq!(a.sparks, b.sparks);
    }

    #[test]
    fn test_empty_palette_still_yields_valid_color() {
        let mut state = ShowState::new(800.0, 600.0, 0, 5);
        state.spawn_rocket();
        assert_eq!(state.rockets[0].color, 0);
    }
}
