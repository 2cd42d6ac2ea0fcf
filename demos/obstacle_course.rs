use kinesim::*;

fn main() -> Result<()> {
    let mut world = World::builder().wind([0.56, 0.0]).build();

    world.create_body(
        "Ball1",
        10.0,
        Vector::from([4.0, 6.0]),
        Vector::from([0.0, -5.0]),
    )?;
    world.create_body("Ball2", 2.0, Vector::from([8.0, 0.0]), Vector::zeros(2))?;
    world.add_obstacle(Vector::from([20.0, 0.0]), 2.0)?;
    world.add_obstacle(Vector::from([6.0, -3.0]), 1.0)?;

    let log = EventLog::new();
    let report = world.run_simulation_observed(0.1, 100, None, &mut log.clone())?;

    println!("{} collisions in {} steps", report.collision_count, report.steps_completed);
    for event in log.collisions() {
        println!(
            "step {:>3}: {} hit obstacle #{}",
            event.step,
            event.identifier,
            event.obstacle.index()
        );
    }
    for (identifier, path) in world.paths() {
        if let Some(last) = path.last() {
            println!("{identifier}: {} points, ends at ({:.3}, {:.3})", path.len(), last.x, last.y);
        }
    }
    println!("{} snapshots recorded", log.step_count());
    Ok(())
}
