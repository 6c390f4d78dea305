//! Figure-eight choreography in double-double precision.
//!
//! Integrates the Chenciner–Montgomery orbit through one full period with
//! the direct velocity-Verlet solver and reports how well the configuration
//! closes on itself.
//!
//! Run with: cargo run --release --package scenarios --example figure_eight

use doubledouble::DoubleDouble;
use nbody::{total_energy, total_momentum, DirectSimulator, Simulator, System};
use scenarios::ThreeBodySystem;

fn main() {
    env_logger::init();

    println!("Figure-eight choreography, double-double scalar\n");
    println!("{}", "=".repeat(60));

    let mut system = ThreeBodySystem::<DoubleDouble>::new();
    system.generate();

    let one = DoubleDouble::ONE;
    let initial_positions: Vec<_> = system.bodies().iter().map(|b| b.position).collect();
    let initial_energy = total_energy(system.bodies(), one);

    println!("Initial energy: {:.6e}", initial_energy.to_f64());
    println!(
        "Initial momentum: {:.3e}",
        total_momentum(system.bodies()).magnitude().to_f64()
    );

    let dt = DoubleDouble::from(1e-4);
    let period = ThreeBodySystem::<DoubleDouble>::period();
    let steps = (period.to_f64() / dt.to_f64()) as usize;

    let mut simulator = DirectSimulator::new();
    simulator.set_dt(dt);
    simulator.set_min_distance_squared(DoubleDouble::from(1e-20));

    println!("\nIntegrating {steps} steps of dt = {:.0e}...", dt.to_f64());

    let mut next_report = steps / 4;
    let taken = simulator.run_with(&mut system, steps, &mut |sys, t| {
        next_report -= 1;
        if next_report == 0 {
            next_report = steps / 4;
            let drift = ((total_energy(sys.bodies(), one) - initial_energy) / initial_energy)
                .abs()
                .to_f64();
            println!("t = {:.3}: |ΔE/E| = {drift:.2e}", t.to_f64());
        }
    });

    println!("\n{}", "=".repeat(60));
    println!("Steps taken: {taken}/{steps}");

    let energy_drift = ((total_energy(system.bodies(), one) - initial_energy) / initial_energy)
        .abs()
        .to_f64();
    let momentum = total_momentum(system.bodies()).magnitude().to_f64();
    let return_error: f64 = system
        .bodies()
        .iter()
        .zip(&initial_positions)
        .map(|(b, start)| (b.position - *start).magnitude().to_f64())
        .sum();

    println!("Energy drift over one period: {energy_drift:.2e}");
    println!("Total momentum: {momentum:.2e}");
    println!("Return error Σ|x(T) - x(0)|: {return_error:.2e}");

    if energy_drift < 1e-8 && return_error < 1e-3 {
        println!("\n✓ The choreography closes within tolerance");
    } else {
        println!("\n✗ Drift outside tolerance");
    }
}
