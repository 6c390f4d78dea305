//! Point masses.

use serde::{Deserialize, Serialize};

use crate::scalar::Scalar;
use crate::vec3::Vec3;

/// A point mass with a position, a velocity and a display name.
///
/// Mass is fixed for the lifetime of a body; position and velocity are
/// mutated in place by whichever simulator is stepping the system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body<T> {
    pub mass: T,
    pub position: Vec3<T>,
    pub velocity: Vec3<T>,
    pub name: String,
}

impl<T: Scalar> Body<T> {
    /// Creates a new body.
    ///
    /// # Examples
    ///
    /// ```
    /// use nbody::{Body, Vec3};
    ///
    /// let earth = Body::new(
    ///     5.97e24,
    ///     Vec3::new(1.496e11, 0.0, 0.0),
    ///     Vec3::new(0.0, 2.98e4, 0.0),
    ///     "Earth",
    /// );
    /// assert_eq!(earth.name, "Earth");
    /// ```
    pub fn new(mass: T, position: Vec3<T>, velocity: Vec3<T>, name: impl Into<String>) -> Self {
        Self {
            mass,
            position,
            velocity,
            name: name.into(),
        }
    }

    /// Linear momentum `m v`.
    pub fn momentum(&self) -> Vec3<T> {
        self.velocity * self.mass
    }

    /// Kinetic energy `m v² / 2`.
    pub fn kinetic_energy(&self) -> T {
        T::from_f64(0.5) * self.mass * self.velocity.magnitude_squared()
    }
}
