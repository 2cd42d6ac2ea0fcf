//! Notifications emitted while a world runs, and a few ready-made consumers.

use std::fmt;
use std::sync::Arc;

use log::info;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::collision::CollisionEvent;
use crate::core::{body::Body, vector::Vector};

/// State of one body after a step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodySnapshot {
    pub identifier: String,
    pub position: Vector,
    pub velocity: Vector,
    pub acceleration: Vector,
}

impl From<&Body> for BodySnapshot {
    fn from(body: &Body) -> Self {
        Self {
            identifier: body.identifier().to_owned(),
            position: body.position.clone(),
            velocity: body.velocity.clone(),
            acceleration: body.acceleration().clone(),
        }
    }
}

impl fmt::Display for BodySnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Obj(id={}, place={}, vel={}, acc={})",
            self.identifier, self.position, self.velocity, self.acceleration
        )
    }
}

/// Post-update state of every simulated body, in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepSnapshot {
    /// 1-based step index.
    pub step: usize,
    pub bodies: Vec<BodySnapshot>,
}

/// Receives notifications from [`World::run_simulation_observed`](crate::world::World::run_simulation_observed).
///
/// For a given step, every collision notification arrives before the step
/// snapshot.
pub trait SimulationObserver {
    fn on_collision(&mut self, _event: &CollisionEvent) {}

    fn on_step(&mut self, _snapshot: &StepSnapshot) {}
}

/// Observer that ignores everything.
#[derive(Debug, Default)]
pub struct NoopObserver;

impl SimulationObserver for NoopObserver {}

/// Writes every step and collision through the `log` facade at info level.
#[derive(Debug, Default)]
pub struct LogObserver;

impl SimulationObserver for LogObserver {
    fn on_collision(&mut self, event: &CollisionEvent) {
        info!(
            "Step {}: {} hit obstacle {}",
            event.step,
            event.identifier,
            event.obstacle.index()
        );
    }

    fn on_step(&mut self, snapshot: &StepSnapshot) {
        info!("Step {}:", snapshot.step);
        for body in &snapshot.bodies {
            info!("{body}");
        }
    }
}

#[derive(Debug, Default)]
struct EventLogInner {
    steps: Vec<StepSnapshot>,
    collisions: Vec<CollisionEvent>,
}

/// Thread-safe recorder of everything a run emits.
///
/// Cloning yields another handle onto the same log, so a reader on another
/// thread can watch a run in progress.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    inner: Arc<Mutex<EventLogInner>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn steps(&self) -> Vec<StepSnapshot> {
        self.inner.lock().steps.clone()
    }

    pub fn collisions(&self) -> Vec<CollisionEvent> {
        self.inner.lock().collisions.clone()
    }

    pub fn step_count(&self) -> usize {
        self.inner.lock().steps.len()
    }

    pub fn latest(&self) -> Option<StepSnapshot> {
        self.inner.lock().steps.last().cloned()
    }
}

impl SimulationObserver for EventLog {
    fn on_collision(&mut self, event: &CollisionEvent) {
        self.inner.lock().collisions.push(event.clone());
    }

    fn on_step(&mut self, snapshot: &StepSnapshot) {
        self.inner.lock().steps.push(snapshot.clone());
    }
}
