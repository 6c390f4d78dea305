//! Cold collapse of a random cloud under the particle-mesh solver.
//!
//! Scatters a few hundred bodies through a cube, lets them fall, and
//! watches the solver adapt its box as the cloud contracts.
//!
//! Run with: RUST_LOG=info cargo run --release --package scenarios --example pm_cloud

use nbody::{kinetic_energy, total_momentum, ParticleMeshSimulator, Simulator, System};
use scenarios::RandomCloudSystem;

fn main() {
    env_logger::init();

    println!("Particle-mesh collapse of a random cloud\n");
    println!("{}", "=".repeat(60));

    let mut system = RandomCloudSystem::<f64>::new(500, 1234).with_extent_and_mass(1.0, 1.0);
    system.generate();
    println!("Bodies: {} (seed {})", system.len(), system.seed());

    let mut simulator = ParticleMeshSimulator::new(64);
    simulator.set_dt(1e-4);
    simulator.set_g(1.0);
    simulator.set_force_mode_lazy();

    let steps = 200;
    println!("Grid: {}³, {} steps of dt = 1e-4\n", simulator.grid_size(), steps);

    for frame in 0..4 {
        let taken = simulator.run(&mut system, steps / 4);

        let ke = kinetic_energy(system.bodies());
        let momentum = total_momentum(system.bodies()).magnitude();

        println!(
            "frame {}: steps {taken}, box {:.3}, cell {:.4}, kinetic {ke:.4e}, |p| {momentum:.2e}, escaped {}",
            frame + 1,
            simulator.box_size(),
            simulator.cell_size(),
            simulator.out_of_bounds_count()
        );
    }

    println!("\n{}", "=".repeat(60));
    println!("Final softening: {:.4}", simulator.softening());

    // A cold cloud only gains kinetic energy by falling inward; the net
    // momentum stays near zero because the mesh forces are symmetric.
    let momentum = total_momentum(system.bodies()).magnitude();
    if kinetic_energy(system.bodies()) > 0.0 && momentum < 1e-6 {
        println!("✓ Collapse under way with conserved momentum");
    } else {
        println!("✗ Unexpected state: |p| = {momentum:.2e}");
    }
}
