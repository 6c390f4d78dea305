//! The system abstraction and conserved-quantity diagnostics.

use crate::body::Body;
use crate::scalar::Scalar;
use crate::vec3::Vec3;

/// An ordered collection of bodies with a generator and health checks.
///
/// Concrete systems own their body vector and know how to populate it from
/// seed parameters; simulators borrow the bodies mutably for the duration of
/// one step. Variants override [`System::is_valid`] with the invariants of
/// their configuration (bounded centre of mass, near-zero total momentum)
/// and [`System::graph_value`] when something other than the total
/// mechanical energy should be plotted.
pub trait System<T: Scalar> {
    /// The bodies, in generation order.
    fn bodies(&self) -> &[Body<T>];

    /// Mutable access for the active simulator.
    fn bodies_mut(&mut self) -> &mut [Body<T>];

    /// Populates the body list from the system's seed parameters,
    /// replacing any previous contents.
    fn generate(&mut self);

    fn len(&self) -> usize {
        self.bodies().len()
    }

    fn is_empty(&self) -> bool {
        self.bodies().is_empty()
    }

    /// Health check consulted by drivers after every step.
    ///
    /// The default requires every mass to be strictly positive and every
    /// coordinate to be finite; divergence is reported here rather than
    /// panicking so the driver can stop stepping cleanly.
    fn is_valid(&self) -> bool {
        self.bodies()
            .iter()
            .all(|b| b.mass > T::zero() && b.position.is_finite() && b.velocity.is_finite())
    }

    /// The scalar a driver plots for conservation diagnostics; by
    /// convention the total mechanical energy at G = 1.
    fn graph_value(&self) -> T {
        total_energy(self.bodies(), T::one())
    }
}

/// Mass-weighted centre of mass, or zero for an empty slice.
pub fn center_of_mass<T: Scalar>(bodies: &[Body<T>]) -> Vec3<T> {
    let mut total_mass = T::zero();
    let mut weighted = Vec3::zero();

    for body in bodies {
        weighted += body.position * body.mass;
        total_mass += body.mass;
    }

    if total_mass > T::zero() {
        weighted / total_mass
    } else {
        Vec3::zero()
    }
}

/// Total linear momentum `Σ mᵢvᵢ`.
pub fn total_momentum<T: Scalar>(bodies: &[Body<T>]) -> Vec3<T> {
    bodies
        .iter()
        .fold(Vec3::zero(), |acc, b| acc + b.momentum())
}

/// Total kinetic energy `Σ mᵢvᵢ²/2`.
pub fn kinetic_energy<T: Scalar>(bodies: &[Body<T>]) -> T {
    bodies
        .iter()
        .fold(T::zero(), |acc, b| acc + b.kinetic_energy())
}

/// Pairwise gravitational potential energy `-G Σᵢ<ⱼ mᵢmⱼ/rᵢⱼ`.
///
/// Coincident pairs contribute nothing, mirroring the force cutoff of the
/// direct simulator.
pub fn potential_energy<T: Scalar>(bodies: &[Body<T>], g: T) -> T {
    let mut potential = T::zero();

    for (i, body_i) in bodies.iter().enumerate() {
        for body_j in &bodies[i + 1..] {
            let distance = (body_i.position - body_j.position).magnitude();
            if distance > T::zero() {
                potential -= g * body_i.mass * body_j.mass / distance;
            }
        }
    }

    potential
}

/// Total mechanical energy, kinetic plus pairwise potential.
pub fn total_energy<T: Scalar>(bodies: &[Body<T>], g: T) -> T {
    kinetic_energy(bodies) + potential_energy(bodies, g)
}
