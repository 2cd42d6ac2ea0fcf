use kinesim::*;

/// Prints every step the way a console driver would.
struct ConsolePrinter;

impl SimulationObserver for ConsolePrinter {
    fn on_step(&mut self, snapshot: &StepSnapshot) {
        println!("Step {}:", snapshot.step);
        for body in &snapshot.bodies {
            println!("{body}");
        }
        println!();
    }
}

fn main() -> Result<()> {
    let mut world = World::new();

    world.create_body(
        "Ball1",
        10.0,
        Vector::from([5.0, 10.0]),
        Vector::from([0.0, -20.0]),
    )?;

    world.run_simulation_observed(0.1, 1000, Some("Ball1"), &mut ConsolePrinter)?;

    let ball = world.lookup_body("Ball1")?;
    println!("Final state: {ball}");
    Ok(())
}
