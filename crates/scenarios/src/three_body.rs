//! The Chenciner–Montgomery figure-eight choreography.

use log::warn;

use nbody::{total_momentum, Body, Scalar, System, Vec3};

/// Maximum total-momentum magnitude before the configuration is declared
/// broken; the choreography starts with exactly zero momentum.
const MOMENTUM_EPSILON: f64 = 0.01;

/// Three equal masses chasing each other along a common lemniscate.
///
/// Initial conditions from Chenciner & Montgomery, "A remarkable periodic
/// solution of the three-body problem in the case of equal masses" (2000):
/// the middle body at the origin with velocity (-0.93240737, -0.86473146, 0)
/// and the outer pair at ±(0.97000436, -0.24308753, 0) each carrying minus
/// half of it. The orbit is periodic with T ≈ 6.3259 at G = 1 and is
/// chaotic enough that it doubles as a precision stress test: round-off
/// grows exponentially, which is what the double-double scalar is for.
pub struct ThreeBodySystem<T: Scalar> {
    bodies: Vec<Body<T>>,
}

impl<T: Scalar> ThreeBodySystem<T> {
    pub fn new() -> Self {
        Self { bodies: Vec::new() }
    }

    /// The choreography's period at G = 1.
    pub fn period() -> T {
        T::from_f64(6.3259)
    }
}

impl<T: Scalar> Default for ThreeBodySystem<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Scalar> System<T> for ThreeBodySystem<T> {
    fn bodies(&self) -> &[Body<T>] {
        &self.bodies
    }

    fn bodies_mut(&mut self) -> &mut [Body<T>] {
        &mut self.bodies
    }

    fn generate(&mut self) {
        self.bodies.clear();

        let mass = T::one();

        let pos1 = Vec3::from_f64(-0.97000436, 0.24308753, 0.0);
        let pos2 = Vec3::zero();
        let pos3 = Vec3::from_f64(0.97000436, -0.24308753, 0.0);

        let vel1 = Vec3::from_f64(0.4662036850, 0.4323657300, 0.0);
        let vel2 = Vec3::from_f64(-0.9324073700, -0.8647314600, 0.0);
        let vel3 = Vec3::from_f64(0.4662036850, 0.4323657300, 0.0);

        self.bodies.push(Body::new(mass, pos1, vel1, "Body 1"));
        self.bodies.push(Body::new(mass, pos2, vel2, "Body 2"));
        self.bodies.push(Body::new(mass, pos3, vel3, "Body 3"));
    }

    fn is_valid(&self) -> bool {
        if !self
            .bodies
            .iter()
            .all(|b| b.mass > T::zero() && b.position.is_finite() && b.velocity.is_finite())
        {
            return false;
        }

        let momentum = total_momentum(&self.bodies).magnitude();
        if momentum > T::from_f64(MOMENTUM_EPSILON) {
            warn!("figure-eight momentum drifted to {momentum}");
            return false;
        }

        true
    }
}
