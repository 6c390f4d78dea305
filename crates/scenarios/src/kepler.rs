//! Keplerian orbital elements and their Cartesian conversion.
//!
//! Cartesian state is what the integrators consume; orbital elements are
//! what planet tables and minor-body catalogs supply. The conversion solves
//! Kepler's equation for the eccentric anomaly and rotates the orbital-plane
//! state by R_z(Ω)·R_x(i)·R_z(ω), written out as explicit coefficients so it
//! stays generic over the scalar.

use serde::{Deserialize, Serialize};

use nbody::{Scalar, Vec3};

/// Iteration cap for the Newton solve of Kepler's equation.
pub const KEPLER_MAX_ITERATIONS: usize = 10_000;

/// Convergence tolerance for the Newton solve, in radians of eccentric
/// anomaly.
pub const KEPLER_TOLERANCE: f64 = 1e-10;

/// Keplerian elements of a bound orbit.
///
/// The semi-major axis is in whatever length unit the caller works in; all
/// angles are in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitalElements<T> {
    pub semi_major_axis: T,
    /// Dimensionless, in [0, 1) for bound orbits.
    pub eccentricity: T,
    pub inclination: T,
    pub longitude_ascending_node: T,
    pub argument_of_periapsis: T,
    pub mean_anomaly: T,
}

impl<T: Scalar> OrbitalElements<T> {
    /// An in-plane orbit described by only `a`, `e` and the mean anomaly.
    pub fn planar(semi_major_axis: T, eccentricity: T, mean_anomaly: T) -> Self {
        Self {
            semi_major_axis,
            eccentricity,
            inclination: T::zero(),
            longitude_ascending_node: T::zero(),
            argument_of_periapsis: T::zero(),
            mean_anomaly,
        }
    }

    /// Orbital period by Kepler's third law, `2π √(a³/μ)`.
    pub fn period(&self, mu: T) -> T {
        let a = self.semi_major_axis;
        T::from_f64(2.0) * T::pi() * (a * a * a / mu).sqrt()
    }
}

/// Degrees to radians.
pub fn radians<T: Scalar>(degrees: T) -> T {
    degrees * T::pi() / T::from_f64(180.0)
}

/// Solves Kepler's equation `M = E - e sin E` for the eccentric anomaly by
/// Newton iteration starting from `E₀ = M`.
///
/// The iteration cap and tolerance match the values the solar-system tables
/// were prepared with; eccentricities close to 1 converge slowly but stay
/// within the cap.
pub fn solve_keplers_equation<T: Scalar>(mean_anomaly: T, eccentricity: T) -> T {
    let tolerance = T::from_f64(KEPLER_TOLERANCE);
    let mut ecc_anomaly = mean_anomaly;

    for _ in 0..KEPLER_MAX_ITERATIONS {
        let delta = (ecc_anomaly - eccentricity * ecc_anomaly.sin() - mean_anomaly)
            / (T::one() - eccentricity * ecc_anomaly.cos());
        ecc_anomaly -= delta;

        if delta.abs() < tolerance {
            break;
        }
    }

    ecc_anomaly
}

/// Converts orbital elements around a central body of gravitational
/// parameter `mu` into a Cartesian position and velocity.
///
/// # Examples
///
/// ```
/// use scenarios::kepler::{elements_to_cartesian, OrbitalElements};
///
/// // A circular orbit of radius 1 about a unit-μ primary moves at unit
/// // speed along +y when started at periapsis.
/// let elements = OrbitalElements::planar(1.0, 0.0, 0.0);
/// let (position, velocity) = elements_to_cartesian(&elements, 1.0_f64);
///
/// assert!((position.x - 1.0).abs() < 1e-12);
/// assert!(position.y.abs() < 1e-12);
/// assert!((velocity.y - 1.0).abs() < 1e-12);
/// ```
pub fn elements_to_cartesian<T: Scalar>(
    elements: &OrbitalElements<T>,
    mu: T,
) -> (Vec3<T>, Vec3<T>) {
    let one = T::one();
    let two = T::from_f64(2.0);

    let a = elements.semi_major_axis;
    let e = elements.eccentricity;
    let i = elements.inclination;
    let omega = elements.argument_of_periapsis;
    let node = elements.longitude_ascending_node;

    let ecc_anomaly = solve_keplers_equation(elements.mean_anomaly, e);

    // ν = 2·atan2(√(1+e)·sin(E/2), √(1-e)·cos(E/2))
    let true_anomaly = two
        * ((one + e).sqrt() * (ecc_anomaly / two).sin())
            .atan2((one - e).sqrt() * (ecc_anomaly / two).cos());
    let r = a * (one - e * ecc_anomaly.cos());

    // Position in the orbital plane, periapsis on the +x axis.
    let x_orb = r * true_anomaly.cos();
    let y_orb = r * true_anomaly.sin();

    // Velocity in the orbital plane from the vis-viva components.
    let p = a * (one - e * e);
    let v_factor = (mu / p).sqrt();
    let vx_orb = -v_factor * true_anomaly.sin();
    let vy_orb = v_factor * (e + true_anomaly.cos());

    // R_z(Ω)·R_x(i)·R_z(ω), expanded.
    let (sin_omega, cos_omega) = (omega.sin(), omega.cos());
    let (sin_node, cos_node) = (node.sin(), node.cos());
    let (sin_i, cos_i) = (i.sin(), i.cos());

    let xx = cos_omega * cos_node - sin_omega * sin_node * cos_i;
    let xy = -sin_omega * cos_node - cos_omega * sin_node * cos_i;
    let yx = cos_omega * sin_node + sin_omega * cos_node * cos_i;
    let yy = -sin_omega * sin_node + cos_omega * cos_node * cos_i;
    let zx = sin_omega * sin_i;
    let zy = cos_omega * sin_i;

    let position = Vec3::new(
        xx * x_orb + xy * y_orb,
        yx * x_orb + yy * y_orb,
        zx * x_orb + zy * y_orb,
    );
    let velocity = Vec3::new(
        xx * vx_orb + xy * vy_orb,
        yx * vx_orb + yy * vy_orb,
        zx * vx_orb + zy * vy_orb,
    );

    (position, velocity)
}
