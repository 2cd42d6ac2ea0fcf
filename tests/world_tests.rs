use approx::assert_relative_eq;
use kinesim::*;

fn two_body_world() -> World {
    let mut world = World::new();
    world
        .create_body("X", 1.0, Vector::from([1.0, 0.0]), Vector::zeros(2))
        .unwrap();
    world
        .create_body("Y", 2.0, Vector::from([0.0, 1.0]), Vector::zeros(2))
        .unwrap();
    world
}

#[test]
fn defaults_match_reference_values() {
    let world = World::new();
    assert_eq!(world.gravity(), 9.81);
    assert_eq!(world.wind(), &Vector::zeros(2));
    assert_eq!(world.time_step(), 0.1);
    assert_eq!(world.step_count(), 100);
}

#[test]
fn targeted_run_leaves_other_bodies_untouched() {
    let mut world = two_body_world();

    let report = world.run_simulation(0.1, 10, Some("X")).unwrap();

    assert_eq!(report.steps_completed, 10);
    let x = world.lookup_body("X").unwrap();
    let y = world.lookup_body("Y").unwrap();
    assert_ne!(x.position, Vector::zeros(2));
    assert_eq!(x.path().len(), 10);
    assert_eq!(y.position, Vector::zeros(2));
    assert!(y.path().is_empty());
}

#[test]
fn untargeted_run_advances_every_body() {
    let mut world = two_body_world();
    world.run_simulation(0.1, 3, None).unwrap();
    for (identifier, path) in world.paths() {
        assert_eq!(path.len(), 3, "{identifier}");
    }
}

#[test]
fn lookup_of_unknown_identifier_fails() {
    let mut world = two_body_world();
    assert_eq!(
        world.lookup_body("Z").unwrap_err(),
        SimError::NotFound("Z".to_owned())
    );
    assert_eq!(
        world.run_simulation(0.1, 1, Some("Z")).unwrap_err(),
        SimError::NotFound("Z".to_owned())
    );
    // Nothing moved.
    assert!(world.bodies().all(|body| body.path().is_empty()));
}

#[test]
fn duplicate_identifiers_resolve_to_first_registration() {
    let mut world = World::new();
    let first = world
        .create_body("dup", 1.0, Vector::zeros(2), Vector::zeros(2))
        .unwrap();
    let second = world
        .create_body("dup", 5.0, Vector::zeros(2), Vector::zeros(2))
        .unwrap();

    assert_ne!(first, second);
    assert_eq!(world.body_count(), 2);
    assert_eq!(world.lookup_body_id("dup").unwrap(), first);
    assert_eq!(world.lookup_body("dup").unwrap().mass(), 1.0);
}

#[test]
fn registration_rebinds_acceleration_to_world_environment() {
    let elsewhere = Environment::new(1.0, Vector::zeros(2));
    let body = Body::new("moved", 2.0, Vector::zeros(2), Vector::zeros(2), &elsewhere).unwrap();
    assert_relative_eq!(body.acceleration().get(1).unwrap(), -1.0);

    let mut world = World::builder().wind([0.5, 0.0]).build();
    let id = world.add_body(body).unwrap();

    let acceleration = world.body(id).unwrap().acceleration();
    assert_relative_eq!(acceleration.get(0).unwrap(), 0.25);
    assert_relative_eq!(acceleration.get(1).unwrap(), -9.81, epsilon = 1e-12);
}

#[test]
fn mismatched_dimensions_are_rejected_at_registration() {
    let mut world = World::new();
    assert!(matches!(
        world.create_body("3d", 1.0, Vector::zeros(3), Vector::zeros(3)),
        Err(SimError::DimensionMismatch { .. })
    ));
    assert!(matches!(
        world.add_obstacle(Vector::zeros(3), 1.0),
        Err(SimError::DimensionMismatch { .. })
    ));
    assert_eq!(
        world.add_obstacle(Vector::zeros(2), -0.5).unwrap_err(),
        SimError::InvalidRadius(-0.5)
    );
}

#[test]
fn collision_reverses_velocity_and_emits_event() {
    let mut world = World::builder().gravity(0.0).build();
    let ball = world
        .create_body("ball", 1.0, Vector::from([10.0, 0.0]), Vector::zeros(2))
        .unwrap();
    let wall = world.add_obstacle(Vector::from([1.0, 0.0]), 0.5).unwrap();

    let mut log = EventLog::new();
    let report = world
        .run_simulation_observed(0.1, 1, None, &mut log)
        .unwrap();

    let expected = CollisionEvent {
        body: ball,
        identifier: "ball".to_owned(),
        obstacle: wall,
        step: 1,
    };
    assert_eq!(report.collision_count, 1);
    assert!(report.collisions.is_empty());
    assert_eq!(log.collisions(), vec![expected]);
    assert_relative_eq!(world.body(ball).unwrap().velocity.get(0).unwrap(), -5.0);
}

#[test]
fn step_notifications_carry_post_update_state_in_insertion_order() {
    let mut world = two_body_world();
    let mut log = EventLog::new();

    world.run_simulation_observed(0.1, 4, None, &mut log).unwrap();

    let steps = log.steps();
    assert_eq!(steps.len(), 4);
    assert_eq!(
        steps.iter().map(|s| s.step).collect::<Vec<_>>(),
        vec![1, 2, 3, 4]
    );
    let last = log.latest().unwrap();
    let names: Vec<_> = last.bodies.iter().map(|b| b.identifier.as_str()).collect();
    assert_eq!(names, ["X", "Y"]);
    assert_eq!(last.bodies[0], BodySnapshot::from(world.lookup_body("X").unwrap()));
}

#[test]
fn targeted_snapshots_only_contain_the_target() {
    let mut world = two_body_world();
    let mut log = EventLog::new();
    world
        .run_simulation_observed(0.1, 2, Some("Y"), &mut log)
        .unwrap();
    for snapshot in log.steps() {
        assert_eq!(snapshot.bodies.len(), 1);
        assert_eq!(snapshot.bodies[0].identifier, "Y");
    }
}

#[test]
fn log_observer_runs_without_an_installed_logger() {
    let mut world = two_body_world();
    world.add_obstacle(Vector::from([0.1, 0.0]), 1.0).unwrap();
    let report = world
        .run_simulation_observed(0.1, 2, None, &mut LogObserver)
        .unwrap();
    assert_eq!(report.steps_completed, 2);
    assert!(report.collision_count > 0);
    assert!(report.collisions.is_empty());
}

#[test]
fn unobserved_run_reports_every_collision() {
    let mut world = World::builder().gravity(0.0).build();
    world
        .create_body("ball", 1.0, Vector::from([10.0, 0.0]), Vector::zeros(2))
        .unwrap();
    world.add_obstacle(Vector::from([1.0, 0.0]), 0.5).unwrap();

    let report = world.run_simulation(0.1, 1, None).unwrap();

    assert_eq!(report.collision_count, 1);
    assert_eq!(report.collisions.len(), 1);
    assert_eq!(report.collisions[0].step, 1);
}

#[test]
fn overlapping_obstacles_emit_ordered_events_and_compound() {
    let mut world = World::builder().gravity(0.0).build();
    let a = world
        .create_body("a", 1.0, Vector::from([10.0, 0.0]), Vector::zeros(2))
        .unwrap();
    let b = world
        .create_body("b", 1.0, Vector::from([0.0, 10.0]), Vector::zeros(2))
        .unwrap();
    // After one 0.1 s step `a` sits at (1, 0) and `b` at (0, 1).
    let near = world.add_obstacle(Vector::from([1.0, 0.0]), 0.5).unwrap();
    let wide = world.add_obstacle(Vector::from([0.5, 0.5]), 1.0).unwrap();

    let report = world.run_simulation(0.1, 1, None).unwrap();

    let order: Vec<_> = report
        .collisions
        .iter()
        .map(|event| (event.body, event.obstacle, event.step))
        .collect();
    assert_eq!(order, vec![(a, near, 1), (a, wide, 1), (b, wide, 1)]);
    assert_eq!(report.collision_count, 3);

    // Two hits: 10 * -0.5 * -0.5.
    assert_relative_eq!(world.body(a).unwrap().velocity.get(0).unwrap(), 2.5);
    // One hit.
    assert_relative_eq!(world.body(b).unwrap().velocity.get(1).unwrap(), -5.0);
}

#[test]
fn cancelled_token_stops_run_between_steps() {
    let mut world = two_body_world();
    let token = CancellationToken::new();
    world.set_cancellation_token(token.clone());

    let mut cancel_after_two = CancelAfter {
        token: token.clone(),
        remaining: 2,
    };
    let report = world
        .run_simulation_observed(0.1, 10, None, &mut cancel_after_two)
        .unwrap();

    assert!(report.cancelled);
    assert_eq!(report.steps_completed, 2);
    assert_eq!(world.lookup_body("X").unwrap().path().len(), 2);

    token.reset();
    let report = world.run_simulation(0.1, 1, None).unwrap();
    assert!(!report.cancelled);
    assert_eq!(report.steps_completed, 1);
}

struct CancelAfter {
    token: CancellationToken,
    remaining: usize,
}

impl SimulationObserver for CancelAfter {
    fn on_step(&mut self, _snapshot: &StepSnapshot) {
        self.remaining -= 1;
        if self.remaining == 0 {
            self.token.cancel();
        }
    }
}

#[test]
fn zero_time_step_is_honored() {
    let mut world = World::builder().time_step(0.05).build();
    world
        .create_body("a", 1.0, Vector::from([1.0, 1.0]), Vector::zeros(2))
        .unwrap();

    world.run_simulation(0.0, 1, None).unwrap();

    let body = world.lookup_body("a").unwrap();
    assert_eq!(body.position, Vector::zeros(2));
    assert_eq!(body.velocity, Vector::from([1.0, 1.0]));
    assert_eq!(body.path().len(), 1);
}

#[test]
fn negative_time_step_runs_backwards() {
    let mut world = World::builder().gravity(0.0).time_step(0.05).build();
    world
        .create_body("a", 1.0, Vector::from([1.0, 2.0]), Vector::zeros(2))
        .unwrap();

    world.run_simulation(-1.0, 1, None).unwrap();

    assert_eq!(world.lookup_body("a").unwrap().position, Vector::from([-1.0, -2.0]));
}

#[test]
fn non_finite_time_step_is_rejected_before_anything_moves() {
    let mut world = two_body_world();
    for time_step in [f64::INFINITY, f64::NEG_INFINITY] {
        assert_eq!(
            world.run_simulation(time_step, 3, None).unwrap_err(),
            SimError::InvalidTimeStep(time_step)
        );
    }
    assert!(matches!(
        world.run_simulation(f64::NAN, 3, None),
        Err(SimError::InvalidTimeStep(t)) if t.is_nan()
    ));
    assert!(world.bodies().all(|body| body.path().is_empty()));
    assert!(world.bodies().all(|body| body.position == Vector::zeros(2)));
}

#[test]
fn empty_target_advances_every_body() {
    let mut world = two_body_world();
    let report = world.run_simulation(0.1, 2, Some("")).unwrap();
    assert_eq!(report.steps_completed, 2);
    for (identifier, path) in world.paths() {
        assert_eq!(path.len(), 2, "{identifier}");
    }
}

#[test]
fn run_with_defaults_uses_configured_step_count() {
    let mut world = World::builder().step_count(7).build();
    world
        .create_body("a", 1.0, Vector::zeros(2), Vector::zeros(2))
        .unwrap();
    let report = world.run_with_defaults(None).unwrap();
    assert_eq!(report.steps_completed, 7);
}

#[test]
fn world_from_config_round_trips_through_json() {
    let config = SimulationConfig {
        gravity: 3.7,
        wind: Vector::from([0.1, 0.0]),
        time_step: 0.02,
        step_count: 50,
        parallel: true,
    };
    let json = serde_json::to_string(&config).unwrap();
    let parsed: SimulationConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, config);

    let world = World::from_config(&parsed);
    assert_eq!(world.gravity(), 3.7);
    assert_eq!(world.time_step(), 0.02);
    assert!(world.parallel_enabled());
}

#[test]
fn config_time_step_is_sanitized() {
    for time_step in [0.0, -0.5, f64::NAN] {
        let config = SimulationConfig {
            time_step,
            ..SimulationConfig::default()
        };
        assert_eq!(World::from_config(&config).time_step(), 0.1);
    }
}

#[cfg(feature = "parallel")]
#[test]
fn parallel_stepping_matches_sequential() {
    fn build(parallel: bool) -> World {
        let mut world = World::builder()
            .wind([0.3, 0.0])
            .parallel(parallel)
            .build();
        for i in 0..64 {
            world
                .create_body(
                    format!("b{i}"),
                    1.0 + i as f64,
                    Vector::from([i as f64 * 0.5, 10.0]),
                    Vector::from([0.0, i as f64]),
                )
                .unwrap();
        }
        world.add_obstacle(Vector::from([3.0, 2.0]), 2.5).unwrap();
        world.add_obstacle(Vector::from([8.0, 4.0]), 3.0).unwrap();
        world
    }

    let mut sequential = build(false);
    let mut parallel = build(true);
    let seq_report = sequential.run_simulation(0.05, 40, None).unwrap();
    let par_report = parallel.run_simulation(0.05, 40, None).unwrap();

    assert_eq!(seq_report, par_report);
    for (a, b) in sequential.bodies().zip(parallel.bodies()) {
        assert_eq!(a.path(), b.path());
        assert_eq!(a.velocity, b.velocity);
    }
}
