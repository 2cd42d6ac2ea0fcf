use crate::core::body::Body;
use crate::dynamics::forces::Environment;
use crate::error::Result;

/// Fixed-step integrator: second-order Taylor expansion for position,
/// explicit Euler for velocity, both driven by the acceleration snapshot
/// taken at the end of the previous step.
#[derive(Debug, Clone, Copy)]
pub struct Integrator {
    pub dt: f64,
}

impl Integrator {
    pub fn new(dt: f64) -> Self {
        Self { dt }
    }

    /// `x += v·dt + a·dt²/2`
    pub fn integrate_position(&self, body: &mut Body) -> Result<()> {
        let displacement = body
            .velocity
            .scale(self.dt)
            .add(&body.acceleration().scale(0.5 * self.dt * self.dt))?;
        body.position = body.position.add(&displacement)?;
        Ok(())
    }

    /// `v += a·dt`, with the same `a` the position update used.
    pub fn integrate_velocity(&self, body: &mut Body) -> Result<()> {
        body.velocity = body.velocity.add(&body.acceleration().scale(self.dt))?;
        Ok(())
    }

    /// Runs one step in order: position, velocity, acceleration refresh, then
    /// appends the new position to the body's path.
    pub fn step(&self, body: &mut Body, environment: &Environment) -> Result<()> {
        self.integrate_position(body)?;
        self.integrate_velocity(body)?;
        let acceleration = body.compute_acceleration(environment)?;
        body.set_acceleration(acceleration);
        body.record_position();
        Ok(())
    }
}
