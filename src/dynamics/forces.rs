use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_DIMENSION, DEFAULT_GRAVITY, VERTICAL_AXIS};
use crate::core::vector::Vector;
use crate::error::{Result, SimError};

/// World-wide constants every body is advanced against.
///
/// This is the read-only handle a body receives instead of holding a
/// reference back to its world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    /// Downward acceleration magnitude. Signed; positive pulls toward -y.
    pub gravity: f64,
    /// Constant force summed into every body's net force. Not scaled by mass.
    pub wind: Vector,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            wind: Vector::zeros(DEFAULT_DIMENSION),
        }
    }
}

impl Environment {
    pub fn new(gravity: f64, wind: Vector) -> Self {
        Self { gravity, wind }
    }

    pub fn dimension(&self) -> usize {
        self.wind.dimension()
    }

    /// Weight of a body: `-gravity * mass` on the vertical axis, zero elsewhere.
    pub fn gravity_effect(&self, mass: f64, dimension: usize) -> Result<Vector> {
        let mut effect = Vector::zeros(dimension);
        effect
            .set(VERTICAL_AXIS, -self.gravity * mass)
            .map_err(|_| SimError::DimensionMismatch {
                expected: VERTICAL_AXIS + 1,
                found: dimension,
            })?;
        Ok(effect)
    }

    /// `(applied_force + gravity_effect + wind) / mass`.
    pub fn acceleration_for(&self, mass: f64, applied_force: &Vector) -> Result<Vector> {
        let gravity = self.gravity_effect(mass, applied_force.dimension())?;
        let net_force = applied_force.add(&gravity)?.add(&self.wind)?;
        Ok(net_force.scale(1.0 / mass))
    }
}
