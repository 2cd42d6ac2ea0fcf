use std::fmt;

use glam::DVec2;

use super::vector::Vector;
use crate::dynamics::{forces::Environment, integrator::Integrator};
use crate::error::{Result, SimError};

/// A simulated point mass.
///
/// Bodies are built as plain values and then registered into a
/// [`World`](crate::world::World), which owns them from then on.
#[derive(Debug, Clone)]
pub struct Body {
    identifier: String,
    mass: f64,
    pub velocity: Vector,
    applied_force: Vector,
    pub position: Vector,
    acceleration: Vector,
    path: Vec<DVec2>,
}

impl Body {
    /// Builds a body at the origin with its acceleration already derived from
    /// `environment`.
    pub fn new(
        identifier: impl Into<String>,
        mass: f64,
        velocity: Vector,
        applied_force: Vector,
        environment: &Environment,
    ) -> Result<Self> {
        let identifier = identifier.into();
        if identifier.is_empty() {
            return Err(SimError::EmptyIdentifier);
        }
        if !mass.is_finite() || mass <= 0.0 {
            return Err(SimError::InvalidMass(mass));
        }
        if velocity.dimension() != applied_force.dimension() {
            return Err(SimError::DimensionMismatch {
                expected: velocity.dimension(),
                found: applied_force.dimension(),
            });
        }

        let acceleration = environment.acceleration_for(mass, &applied_force)?;
        Ok(Self {
            identifier,
            mass,
            position: Vector::zeros(velocity.dimension()),
            velocity,
            applied_force,
            acceleration,
            path: Vec::new(),
        })
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn applied_force(&self) -> &Vector {
        &self.applied_force
    }

    /// Acceleration snapshot the next [`advance`](Self::advance) will use.
    pub fn acceleration(&self) -> &Vector {
        &self.acceleration
    }

    pub fn dimension(&self) -> usize {
        self.applied_force.dimension()
    }

    /// Recorded `(x, y)` positions, one per completed step.
    pub fn path(&self) -> &[DVec2] {
        &self.path
    }

    /// Derives the acceleration from the body's own force and `environment`.
    pub fn compute_acceleration(&self, environment: &Environment) -> Result<Vector> {
        environment.acceleration_for(self.mass, &self.applied_force)
    }

    /// Replaces the acceleration snapshot with a fresh derivation.
    pub fn refresh_acceleration(&mut self, environment: &Environment) -> Result<()> {
        self.acceleration = self.compute_acceleration(environment)?;
        Ok(())
    }

    /// Advances this body by one fixed step.
    ///
    /// Only fails if a caller has replaced `position` or `velocity` with a
    /// vector of a different dimension.
    pub fn advance(&mut self, time_step: f64, environment: &Environment) -> Result<()> {
        Integrator::new(time_step).step(self, environment)
    }

    pub(crate) fn set_acceleration(&mut self, acceleration: Vector) {
        self.acceleration = acceleration;
    }

    pub(crate) fn record_position(&mut self) {
        self.path.push(self.position.to_dvec2());
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Obj(id={}, place={}, vel={}, acc={})",
            self.identifier, self.position, self.velocity, self.acceleration
        )
    }
}
