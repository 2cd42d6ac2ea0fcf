use glam::DVec2;
use log::{debug, info, trace, warn};
use serde::{Deserialize, Serialize};

use crate::{
    collision::{self, CollisionEvent},
    config::{DEFAULT_STEP_BUDGET_MS, DEFAULT_TIME_STEP, SimulationConfig},
    core::{body::Body, obstacle::Obstacle, vector::Vector},
    dynamics::forces::Environment,
    error::{Result, SimError},
    observer::{BodySnapshot, SimulationObserver, StepSnapshot},
    utils::{
        allocator::{Arena, EntityId},
        cancel::CancellationToken,
        logging::{ScopedTimer, warn_if_step_budget_exceeded},
    },
};

pub type BodyId = EntityId;
pub type ObstacleId = EntityId;

/// Outcome of a call to [`World::run_simulation`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub steps_completed: usize,
    pub collision_count: usize,
    /// Every collision of the run. Only filled by
    /// [`World::run_simulation`]; observed runs hand events to the observer
    /// instead of keeping them.
    pub collisions: Vec<CollisionEvent>,
    /// Set when a [`CancellationToken`] stopped the run early.
    pub cancelled: bool,
}

/// Owns the bodies, the obstacles and the environment, and drives the step
/// loop.
#[derive(Debug)]
pub struct World {
    environment: Environment,
    bodies: Arena<Body>,
    obstacles: Arena<Obstacle>,
    time_step: f64,
    step_count: usize,
    parallel_enabled: bool,
    step_budget_ms: f32,
    cancellation: Option<CancellationToken>,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    pub fn new() -> Self {
        Self::from_config(&SimulationConfig::default())
    }

    pub fn builder() -> WorldBuilder {
        WorldBuilder::new()
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        let time_step = if config.time_step.is_finite() && config.time_step > 0.0 {
            config.time_step
        } else {
            warn!(
                "Invalid configured time step {}; using {DEFAULT_TIME_STEP}",
                config.time_step
            );
            DEFAULT_TIME_STEP
        };

        Self {
            environment: Environment::new(config.gravity, config.wind.clone()),
            bodies: Arena::new(),
            obstacles: Arena::new(),
            time_step,
            step_count: config.step_count,
            parallel_enabled: config.parallel,
            step_budget_ms: DEFAULT_STEP_BUDGET_MS,
            cancellation: None,
        }
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn gravity(&self) -> f64 {
        self.environment.gravity
    }

    pub fn wind(&self) -> &Vector {
        &self.environment.wind
    }

    /// Every body and obstacle in this world has this many components.
    pub fn dimension(&self) -> usize {
        self.environment.dimension()
    }

    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// Has no effect unless the crate is built with the `parallel` feature.
    pub fn set_parallel_enabled(&mut self, enabled: bool) {
        self.parallel_enabled = enabled;
    }

    pub fn parallel_enabled(&self) -> bool {
        self.parallel_enabled
    }

    pub fn set_step_budget_ms(&mut self, budget_ms: f32) {
        self.step_budget_ms = budget_ms;
    }

    pub fn set_cancellation_token(&mut self, token: CancellationToken) {
        self.cancellation = Some(token);
    }

    pub fn cancellation_token(&self) -> Option<&CancellationToken> {
        self.cancellation.as_ref()
    }

    /// Takes ownership of `body` and binds its acceleration to this world's
    /// environment.
    ///
    /// Duplicate identifiers are accepted; lookups resolve to the body that
    /// was registered first.
    pub fn add_body(&mut self, mut body: Body) -> Result<BodyId> {
        if body.dimension() != self.dimension() {
            return Err(SimError::DimensionMismatch {
                expected: self.dimension(),
                found: body.dimension(),
            });
        }
        body.refresh_acceleration(&self.environment)?;

        if self.bodies.find(|b| b.identifier() == body.identifier()).is_some() {
            warn!(
                "Body id {} is already registered; lookups will return the earlier body",
                body.identifier()
            );
        }

        let id = self.bodies.insert(body);
        debug!("Registered body #{}", id.index());
        Ok(id)
    }

    /// Builds a body against this world's environment and registers it.
    pub fn create_body(
        &mut self,
        identifier: impl Into<String>,
        mass: f64,
        velocity: Vector,
        applied_force: Vector,
    ) -> Result<BodyId> {
        let body = Body::new(identifier, mass, velocity, applied_force, &self.environment)?;
        self.add_body(body)
    }

    pub fn add_obstacle(&mut self, position: Vector, radius: f64) -> Result<ObstacleId> {
        if position.dimension() != self.dimension() {
            return Err(SimError::DimensionMismatch {
                expected: self.dimension(),
                found: position.dimension(),
            });
        }
        let obstacle = Obstacle::new(position, radius)?;
        Ok(self.obstacles.insert(obstacle))
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id)
    }

    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.get_mut(id)
    }

    pub fn obstacle(&self, id: ObstacleId) -> Option<&Obstacle> {
        self.obstacles.get(id)
    }

    pub fn lookup_body_id(&self, identifier: &str) -> Result<BodyId> {
        self.bodies
            .find(|body| body.identifier() == identifier)
            .map(|(id, _)| id)
            .ok_or_else(|| SimError::NotFound(identifier.to_owned()))
    }

    pub fn lookup_body(&self, identifier: &str) -> Result<&Body> {
        let id = self.lookup_body_id(identifier)?;
        self.bodies
            .get(id)
            .ok_or_else(|| SimError::NotFound(identifier.to_owned()))
    }

    pub fn lookup_body_mut(&mut self, identifier: &str) -> Result<&mut Body> {
        let id = self.lookup_body_id(identifier)?;
        self.bodies
            .get_mut(id)
            .ok_or_else(|| SimError::NotFound(identifier.to_owned()))
    }

    pub fn bodies(&self) -> impl Iterator<Item = &Body> + '_ {
        self.bodies.iter()
    }

    pub fn obstacles(&self) -> impl Iterator<Item = &Obstacle> + '_ {
        self.obstacles.iter()
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn obstacle_count(&self) -> usize {
        self.obstacles.len()
    }

    /// Recorded path of every body, for plotting.
    pub fn paths(&self) -> impl Iterator<Item = (&str, &[DVec2])> + '_ {
        self.bodies.iter().map(|body| (body.identifier(), body.path()))
    }

    /// Runs with the timestep and step count this world was configured with.
    pub fn run_with_defaults(&mut self, target: Option<&str>) -> Result<SimulationReport> {
        self.run_simulation(self.time_step, self.step_count, target)
    }

    /// Advances `target` by `step_count` steps of `time_step` seconds.
    ///
    /// `None` or an empty identifier simulates every body. Any finite
    /// `time_step` is used as given, zero and negative values included.
    pub fn run_simulation(
        &mut self,
        time_step: f64,
        step_count: usize,
        target: Option<&str>,
    ) -> Result<SimulationReport> {
        let mut collector = CollisionCollector::default();
        let mut report =
            self.run_simulation_observed(time_step, step_count, target, &mut collector)?;
        report.collisions = collector.events;
        Ok(report)
    }

    /// Like [`run_simulation`](Self::run_simulation), reporting every
    /// collision and every completed step to `observer`.
    ///
    /// Each step finishes for all simulated bodies, obstacle checks included,
    /// before the next begins. A non-finite `time_step` or an unknown
    /// `target` fails before any body moves. The report only counts
    /// collisions; keeping them is up to `observer`.
    pub fn run_simulation_observed(
        &mut self,
        time_step: f64,
        step_count: usize,
        target: Option<&str>,
        observer: &mut dyn SimulationObserver,
    ) -> Result<SimulationReport> {
        if !time_step.is_finite() {
            return Err(SimError::InvalidTimeStep(time_step));
        }
        let target = target
            .filter(|ident| !ident.is_empty())
            .map(|ident| self.lookup_body_id(ident))
            .transpose()?;

        info!(
            "Simulating {} body(s) against {} obstacle(s): {} steps of {} s",
            target.map_or(self.bodies.len(), |_| 1),
            self.obstacles.len(),
            step_count,
            time_step
        );

        let mut report = SimulationReport::default();
        for step in 1..=step_count {
            if self.is_cancelled() {
                info!("Simulation cancelled before step {step}");
                report.cancelled = true;
                break;
            }

            let timer = ScopedTimer::new("world::step");
            let events = self.advance_working_set(time_step, step, target)?;
            for event in events {
                trace!(
                    "Step {step}: {} collided with obstacle #{}",
                    event.identifier,
                    event.obstacle.index()
                );
                observer.on_collision(&event);
                report.collision_count += 1;
            }

            let snapshot = self.snapshot(step, target);
            debug!("Step {step} complete for {} body(s)", snapshot.bodies.len());
            observer.on_step(&snapshot);
            report.steps_completed = step;
            warn_if_step_budget_exceeded(step, timer.elapsed(), self.step_budget_ms);
        }

        info!(
            "Simulation finished after {} step(s) with {} collision(s)",
            report.steps_completed,
            report.collision_count
        );
        Ok(report)
    }

    fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
    }

    fn advance_working_set(
        &mut self,
        time_step: f64,
        step: usize,
        target: Option<BodyId>,
    ) -> Result<Vec<CollisionEvent>> {
        let environment = &self.environment;
        let obstacles = &self.obstacles;

        if let Some(id) = target {
            let body = self
                .bodies
                .get_mut(id)
                .ok_or_else(|| SimError::NotFound(format!("#{}", id.index())))?;
            return advance_body(id, body, time_step, step, environment, obstacles);
        }

        let per_body: Vec<Result<Vec<CollisionEvent>>> = {
            let bodies = self.bodies.as_mut_slice();
            let step_one = |id: BodyId, body: &mut Body| {
                advance_body(id, body, time_step, step, environment, obstacles)
            };

            #[cfg(feature = "parallel")]
            {
                if self.parallel_enabled {
                    crate::dynamics::parallel::map_bodies(bodies, step_one)
                } else {
                    sequential(bodies, step_one)
                }
            }
            #[cfg(not(feature = "parallel"))]
            {
                sequential(bodies, step_one)
            }
        };

        let mut events = Vec::new();
        for result in per_body {
            events.extend(result?);
        }
        Ok(events)
    }

    fn snapshot(&self, step: usize, target: Option<BodyId>) -> StepSnapshot {
        let bodies = match target {
            Some(id) => self.bodies.get(id).map(BodySnapshot::from).into_iter().collect(),
            None => self.bodies.iter().map(BodySnapshot::from).collect(),
        };
        StepSnapshot { step, bodies }
    }
}

/// Keeps the events of an unobserved run for its report.
#[derive(Default)]
struct CollisionCollector {
    events: Vec<CollisionEvent>,
}

impl SimulationObserver for CollisionCollector {
    fn on_collision(&mut self, event: &CollisionEvent) {
        self.events.push(event.clone());
    }
}

fn sequential<F, R>(bodies: &mut [Body], step_one: F) -> Vec<R>
where
    F: Fn(BodyId, &mut Body) -> R,
{
    bodies
        .iter_mut()
        .enumerate()
        .map(|(index, body)| step_one(EntityId::from_index(index), body))
        .collect()
}

/// Integrates one body and resolves its obstacle contacts for this step.
fn advance_body(
    id: BodyId,
    body: &mut Body,
    time_step: f64,
    step: usize,
    environment: &Environment,
    obstacles: &Arena<Obstacle>,
) -> Result<Vec<CollisionEvent>> {
    body.advance(time_step, environment)?;
    let hits = collision::detect_and_respond(body, obstacles)?;
    Ok(hits
        .into_iter()
        .map(|obstacle| CollisionEvent {
            body: id,
            identifier: body.identifier().to_owned(),
            obstacle,
            step,
        })
        .collect())
}

/// Fluent construction of a [`World`] from [`SimulationConfig`] fields.
#[derive(Debug, Clone, Default)]
pub struct WorldBuilder {
    config: SimulationConfig,
}

impl WorldBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gravity(mut self, gravity: f64) -> Self {
        self.config.gravity = gravity;
        self
    }

    pub fn wind(mut self, wind: impl Into<Vector>) -> Self {
        self.config.wind = wind.into();
        self
    }

    pub fn time_step(mut self, time_step: f64) -> Self {
        self.config.time_step = time_step;
        self
    }

    pub fn step_count(mut self, step_count: usize) -> Self {
        self.config.step_count = step_count;
        self
    }

    pub fn parallel(mut self, enabled: bool) -> Self {
        self.config.parallel = enabled;
        self
    }

    pub fn build(self) -> World {
        World::from_config(&self.config)
    }
}
