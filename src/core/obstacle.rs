use serde::{Deserialize, Serialize};

use super::{body::Body, vector::Vector};
use crate::error::{Result, SimError};

/// Immutable circular (n-spherical) region bodies can hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    position: Vector,
    radius: f64,
}

impl Obstacle {
    pub fn new(position: Vector, radius: f64) -> Result<Self> {
        if radius.is_nan() || radius < 0.0 {
            return Err(SimError::InvalidRadius(radius));
        }
        Ok(Self { position, radius })
    }

    pub fn position(&self) -> &Vector {
        &self.position
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// True if `point` lies inside or on the boundary.
    pub fn contains(&self, point: &Vector) -> Result<bool> {
        Ok(point.distance(&self.position)? <= self.radius)
    }

    /// Samples the body's current position only; a body that crosses the
    /// obstacle between two steps is not detected.
    pub fn check_collision(&self, body: &Body) -> Result<bool> {
        self.contains(&body.position)
    }
}
