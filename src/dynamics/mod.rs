//! Simulation dynamics: the environment's force model and the step integrator.

pub mod forces;
pub mod integrator;
#[cfg(feature = "parallel")]
pub mod parallel;

pub use forces::Environment;
pub use integrator::Integrator;
