//! Kinesim – fixed-timestep kinematic simulation of point masses.
//!
//! Bodies move under constant gravity, an optional uniform wind, and a
//! constant applied force. Each step, positions are advanced with a
//! second-order Taylor expansion, velocities with explicit Euler, and every
//! body is tested against a set of circular obstacles; a hit reverses and
//! halves the body's velocity.
//!
//! ```
//! use kinesim::{Vector, World};
//!
//! let mut world = World::new();
//! world
//!     .create_body("Ball1", 10.0, Vector::from([5.0, 10.0]), Vector::from([0.0, -20.0]))
//!     .unwrap();
//! world.add_obstacle(Vector::from([20.0, 0.0]), 2.0).unwrap();
//!
//! let report = world.run_simulation(0.1, 100, Some("Ball1")).unwrap();
//! assert_eq!(report.steps_completed, 100);
//! assert_eq!(world.lookup_body("Ball1").unwrap().path().len(), 100);
//! ```

pub mod collision;
pub mod config;
pub mod core;
pub mod dynamics;
pub mod error;
pub mod observer;
pub mod utils;
pub mod world;

pub use glam::DVec2;

pub use collision::CollisionEvent;
pub use config::SimulationConfig;
pub use crate::core::{body::Body, obstacle::Obstacle, vector::Vector};
pub use dynamics::{forces::Environment, integrator::Integrator};
pub use error::{Result, SimError};
pub use observer::{
    BodySnapshot, EventLog, LogObserver, NoopObserver, SimulationObserver, StepSnapshot,
};
pub use utils::{
    allocator::{Arena, EntityId},
    cancel::CancellationToken,
};
pub use world::{BodyId, ObstacleId, SimulationReport, World, WorldBuilder};
