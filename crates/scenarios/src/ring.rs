//! Equal masses on a rotating ring.

use log::warn;

use nbody::{center_of_mass, total_momentum, Body, Scalar, System, Vec3};

/// Drift tolerance on the ring's centre of mass and total momentum.
const DRIFT_EPSILON: f64 = 0.5;

/// `k` equal masses evenly spaced on a circle, all moving tangentially.
///
/// The tangential speed `√(G k m / (3.625 r))` balances the ring against
/// the combined pull of its own members: the 3.625 divisor is the
/// effective-mass factor of the pairwise lattice sum for rings of a
/// handful of bodies, so the configuration orbits without collapsing or
/// flying apart.
pub struct RingSystem<T: Scalar> {
    bodies: Vec<Body<T>>,
    count: usize,
    radius: T,
}

impl<T: Scalar> RingSystem<T> {
    /// A ring of `count` unit masses with radius 1.
    pub fn new(count: usize) -> Self {
        Self::with_radius(count, T::one())
    }

    pub fn with_radius(count: usize, radius: T) -> Self {
        assert!(count >= 2, "a ring needs at least two bodies");
        Self {
            bodies: Vec::new(),
            count,
            radius,
        }
    }

    /// The tangential speed every member is launched with.
    pub fn orbit_velocity(&self) -> T {
        let g = T::one();
        let mass = T::one();
        let count = T::from_f64(self.count as f64);
        (g * mass * count / (T::from_f64(3.625) * self.radius)).sqrt()
    }
}

impl<T: Scalar> System<T> for RingSystem<T> {
    fn bodies(&self) -> &[Body<T>] {
        &self.bodies
    }

    fn bodies_mut(&mut self) -> &mut [Body<T>] {
        &mut self.bodies
    }

    fn generate(&mut self) {
        self.bodies.clear();

        let mass = T::one();
        let orbit_velocity = self.orbit_velocity();

        for i in 0..self.count {
            let angle = T::from_f64(2.0) * T::pi() * T::from_f64(i as f64)
                / T::from_f64(self.count as f64);

            let position = Vec3::new(
                self.radius * angle.cos(),
                self.radius * angle.sin(),
                T::zero(),
            );
            let velocity = Vec3::new(
                -orbit_velocity * angle.sin(),
                orbit_velocity * angle.cos(),
                T::zero(),
            );

            self.bodies
                .push(Body::new(mass, position, velocity, format!("Body {}", i + 1)));
        }
    }

    fn is_valid(&self) -> bool {
        if !self
            .bodies
            .iter()
            .all(|b| b.mass > T::zero() && b.position.is_finite() && b.velocity.is_finite())
        {
            return false;
        }

        let epsilon = T::from_f64(DRIFT_EPSILON);

        let com = center_of_mass(&self.bodies).magnitude();
        if com > epsilon {
            warn!("ring centre of mass drifted to {com}");
            return false;
        }

        let momentum = total_momentum(&self.bodies).magnitude();
        if momentum > epsilon {
            warn!("ring momentum drifted to {momentum}");
            return false;
        }

        true
    }
}
