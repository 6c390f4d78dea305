//! Two-body Kepler problem with a closed-form oracle.

use nbody::{Body, Scalar, System, Vec3};

/// A heavy primary and a light satellite on an orbit of chosen
/// eccentricity.
///
/// The satellite starts at periapsis `a(1-e)` with the tangential vis-viva
/// speed `√(G m₁ (2/r - 1/a))`, for `a = 1`, `G = 1` and a primary of mass
/// 10³. Because the mass ratio is extreme, the closed-form solution of the
/// reduced problem doubles as a validation oracle:
/// [`exact_position`](Self::exact_position) gives the satellite position at
/// any time, so an integrator's error growth can be measured over many
/// periods instead of inferred from energy drift alone.
pub struct TwoBodySystem<T: Scalar> {
    bodies: Vec<Body<T>>,
    eccentricity: T,
    semi_major_axis: T,
    g: T,
    primary_mass: T,
    period: T,
}

impl<T: Scalar> TwoBodySystem<T> {
    /// Creates the system for an orbit of eccentricity `e`.
    ///
    /// # Panics
    ///
    /// Panics unless `0 <= e < 1`.
    pub fn new(eccentricity: T) -> Self {
        assert!(
            eccentricity >= T::zero() && eccentricity < T::one(),
            "eccentricity must be in [0, 1)"
        );

        Self {
            bodies: Vec::new(),
            eccentricity,
            semi_major_axis: T::one(),
            g: T::one(),
            primary_mass: T::from_f64(1e3),
            period: T::zero(),
        }
    }

    /// The orbital period `2π √(a³ / (G m₁))`.
    pub fn period(&self) -> T {
        self.period
    }

    /// The closed-form satellite position at time `t` past periapsis.
    ///
    /// Solves `E = M + e sin E` by fixed-point iteration (20 rounds,
    /// tolerance 10⁻¹²) and evaluates the ellipse in its orbital plane:
    /// `x = a(cos E - e)`, `y = a√(1-e²) sin E`, measured from the focus.
    pub fn exact_position(&self, t: T) -> Vec3<T> {
        let a = self.semi_major_axis;
        let e = self.eccentricity;
        let one = T::one();

        let mean_motion = (self.g * self.primary_mass / (a * a * a)).sqrt();
        let mean_anomaly = mean_motion * t;

        let tolerance = T::from_f64(1e-12);
        let mut ecc_anomaly = mean_anomaly;
        for _ in 0..20 {
            let next = mean_anomaly + e * ecc_anomaly.sin();
            if (next - ecc_anomaly).abs() < tolerance {
                ecc_anomaly = next;
                break;
            }
            ecc_anomaly = next;
        }

        let x = a * (ecc_anomaly.cos() - e);
        let y = a * (one - e * e).sqrt() * ecc_anomaly.sin();

        Vec3::new(x, y, T::zero())
    }
}

impl<T: Scalar> System<T> for TwoBodySystem<T> {
    fn bodies(&self) -> &[Body<T>] {
        &self.bodies
    }

    fn bodies_mut(&mut self) -> &mut [Body<T>] {
        &mut self.bodies
    }

    fn generate(&mut self) {
        self.bodies.clear();

        let one = T::one();
        let two = T::from_f64(2.0);

        let a = self.semi_major_axis;
        let r = a * (one - self.eccentricity);

        let primary_position = Vec3::zero();
        let satellite_position = Vec3::new(r, T::zero(), T::zero());

        // Vis-viva at the periapsis distance.
        let orbital_speed = (self.g * self.primary_mass * (two / r - one / a)).sqrt();
        let satellite_velocity = Vec3::new(T::zero(), orbital_speed, T::zero());

        self.bodies.push(Body::new(
            self.primary_mass,
            primary_position,
            Vec3::zero(),
            "Primary",
        ));
        self.bodies.push(Body::new(
            one,
            satellite_position,
            satellite_velocity,
            "Satellite",
        ));

        self.period =
            two * T::pi() * (a * a * a / (self.g * self.primary_mass)).sqrt();
    }
}
