use nbody::{
    center_of_mass, total_energy, total_momentum, DirectSimulator, Simulator, System, Vec3,
};

use crate::three_body::ThreeBodySystem;

#[test]
fn generates_the_choreography() {
    let mut system = ThreeBodySystem::<f64>::new();
    system.generate();

    assert_eq!(system.len(), 3);
    assert!(system.is_valid());

    // Equal masses, antisymmetric outer pair, middle body at the origin.
    for body in system.bodies() {
        assert_eq!(body.mass, 1.0);
    }
    assert_eq!(system.bodies()[1].position, Vec3::zero());
    assert_eq!(
        system.bodies()[0].position,
        -system.bodies()[2].position
    );

    // The outer bodies each carry minus half the middle body's velocity.
    let middle = system.bodies()[1].velocity;
    let outer = system.bodies()[0].velocity;
    assert!((outer * -2.0 - middle).magnitude() < 1e-12);
}

#[test]
fn starts_with_zero_momentum_and_centred_mass() {
    let mut system = ThreeBodySystem::<f64>::new();
    system.generate();

    assert!(total_momentum(system.bodies()).magnitude() < 1e-12);
    assert!(center_of_mass(system.bodies()).magnitude() < 1e-12);
    assert!(system.graph_value() < 0.0);
}

#[test]
fn validation_fails_once_momentum_is_corrupted() {
    let mut system = ThreeBodySystem::<f64>::new();
    system.generate();

    system.bodies_mut()[0].velocity.x += 1.0;
    assert!(!system.is_valid());
}

#[test]
fn figure_eight_returns_to_its_initial_state_after_one_period() {
    let mut system = ThreeBodySystem::<f64>::new();
    system.generate();

    let initial_positions: Vec<_> = system.bodies().iter().map(|b| b.position).collect();
    let initial_energy = total_energy(system.bodies(), 1.0);

    let dt = 1e-4;
    let period = ThreeBodySystem::<f64>::period();
    let steps = (period / dt) as usize;

    let mut simulator = DirectSimulator::new();
    simulator.set_dt(dt);
    let taken = simulator.run(&mut system, steps);
    assert_eq!(taken, steps, "validation failed mid-run");

    // Energy drift stays bounded by the symplectic integrator.
    let drift =
        ((total_energy(system.bodies(), 1.0) - initial_energy) / initial_energy).abs();
    assert!(drift < 1e-6, "energy drift {drift:e}");

    // Momentum is conserved to round-off throughout.
    assert!(total_momentum(system.bodies()).magnitude() < 1e-10);

    // The choreography closes: every body is back near its start.
    let return_error: f64 = system
        .bodies()
        .iter()
        .zip(&initial_positions)
        .map(|(b, start)| (b.position - *start).magnitude())
        .sum();
    assert!(return_error < 5e-2, "period return error {return_error:e}");
}
