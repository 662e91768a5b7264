//! Deterministic fireworks simulation
//!
//! All show logic lives here. This module must stay pure and deterministic:
//! - Per-tick physics only
//! - Seeded RNG only, consumed at spawn/explode time
//! - No rendering or platform dependencies

pub mod launcher;
pub mod state;
pub mod tick;

pub use launcher::{Launcher, Phase, Verdict};
pub use state::{Rocket, ShowState, Spark};
pub use tick::tick;
