//! Skyburst - a celebration page with a canvas fireworks display
//!
//! Core modules:
//! - `sim`: Deterministic fireworks simulation (rockets, sparks, launch cadence)
//! - `driver`: Session ownership and the per-frame pump
//! - `renderer`: WebGPU rendering pipeline
//! - `settings`: Palette and show configuration
//! - `countdown`: Date-diff readout for the landing page

pub mod color;
pub mod countdown;
pub mod driver;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use driver::{Director, FrameOutcome};
pub use settings::Settings;

/// Show tuning constants
pub mod consts {
    /// Downward acceleration applied to sparks, canvas units per tick²
    pub const GRAVITY: f32 = 0.05;

    /// Rockets launched over one show
    pub const MAX_ROCKETS: u32 = 20;

    /// Rocket climb speed band, canvas units per tick
    pub const ROCKET_SPEED_MIN: f32 = 8.0;
    pub const ROCKET_SPEED_MAX: f32 = 12.0;

    /// Detonations land in the top `TARGET_BAND` of the surface,
    /// pushed down by a `TARGET_FLOOR` offset from the top edge
    pub const TARGET_BAND: f32 = 0.4;
    pub const TARGET_FLOOR: f32 = 50.0;

    /// Spark batch size per explosion
    pub const SPARKS_MIN: usize = 80;
    pub const SPARKS_MAX: usize = 120;
    /// Spark ejection speed band
    pub const SPARK_SPEED_MIN: f32 = 2.0;
    pub const SPARK_SPEED_MAX: f32 = 6.0;
    /// Spark fade rate band, alpha per tick
    pub const SPARK_DECAY_MIN: f32 = 0.015;
    pub const SPARK_DECAY_MAX: f32 = 0.025;
    /// Spark render radius band
    pub const SPARK_SIZE_MIN: f32 = 2.0;
    pub const SPARK_SIZE_MAX: f32 = 4.0;

    /// Rocket head radius and tail geometry
    pub const ROCKET_HEAD_RADIUS: f32 = 3.0;
    pub const ROCKET_TAIL_LENGTH: f32 = 20.0;
    pub const ROCKET_TAIL_WIDTH: f32 = 2.0;

    /// Pause between rocket launches, milliseconds
    pub const LAUNCH_DELAY_MIN_MS: f64 = 250.0;
    pub const LAUNCH_DELAY_MAX_MS: f64 = 650.0;
    /// Wind-down after the last launch before the frame loop stops
    pub const GRACE_MS: f64 = 4000.0;
}
