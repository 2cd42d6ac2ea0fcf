//! Global configuration constants and the serializable run configuration.

use serde::{Deserialize, Serialize};

use crate::core::vector::Vector;

/// Default downward gravitational acceleration (m/s²).
pub const DEFAULT_GRAVITY: f64 = 9.81;

/// Default integration timestep (in seconds).
pub const DEFAULT_TIME_STEP: f64 = 0.1;

/// Default number of steps for a run.
pub const DEFAULT_STEP_COUNT: usize = 100;

/// Dimension of worlds created without an explicit wind vector.
pub const DEFAULT_DIMENSION: usize = 2;

/// Component index treated as "up" when forming the gravity effect.
pub const VERTICAL_AXIS: usize = 1;

/// Multiplier applied to a body's velocity for every obstacle it hits.
pub const COLLISION_RESPONSE_FACTOR: f64 = -0.5;

/// Wall-clock budget for a single simulation step before a warning is logged.
pub const DEFAULT_STEP_BUDGET_MS: f32 = 16.0;

/// Environment and run parameters for a [`World`](crate::world::World).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub gravity: f64,
    /// Constant force added to every body each step. Its length fixes the
    /// world's dimension.
    pub wind: Vector,
    pub time_step: f64,
    pub step_count: usize,
    /// Advance bodies within a step on the rayon pool (requires the
    /// `parallel` feature; ignored otherwise).
    pub parallel: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            wind: Vector::zeros(DEFAULT_DIMENSION),
            time_step: DEFAULT_TIME_STEP,
            step_count: DEFAULT_STEP_COUNT,
            parallel: false,
        }
    }
}
