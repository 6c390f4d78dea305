//! The Solar System: Sun, planets, dwarf planets and minor-body belts.

use std::path::Path;

use log::info;

use nbody::{Body, Scalar, System, Vec3};

use crate::catalog::{self, Belt, BeltSummary, CatalogError, MinorBody};
use crate::kepler::{elements_to_cartesian, radians, OrbitalElements};

/// Gravitational constant of the table's unit system. The element tables
/// and GM columns are prepared against G = 1 with masses in kilograms and
/// distances in metres.
pub const GRAVITATIONAL_CONSTANT: f64 = 1.0;

/// Solar mass in kilograms.
pub const SOLAR_MASS_KG: f64 = 1.989e30;

/// One astronomical unit in metres.
pub const AU_M: f64 = 1.496e11;

/// J2000-epoch osculating elements:
/// (name, mass [kg], a [AU], e, i [deg], ω [deg], Ω [deg], M [deg]).
const PLANETS: [(&str, f64, f64, f64, f64, f64, f64, f64); 16] = [
    ("Mercury", 3.30e23, 0.387, 0.2056, 7.00, 29.12, 48.33, 0.0),
    ("Venus", 4.87e24, 0.723, 0.0068, 3.39, 54.88, 76.68, 0.0),
    ("Earth", 5.97e24, 1.000, 0.0167, 0.00, 114.21, 348.74, 0.0),
    ("Mars", 6.42e23, 1.524, 0.0934, 1.85, 49.56, 286.50, 0.0),
    ("Jupiter", 1.90e27, 5.204, 0.0489, 1.30, 100.46, 275.07, 0.0),
    ("Saturn", 5.68e26, 9.582, 0.0565, 2.49, 113.67, 339.39, 0.0),
    ("Uranus", 8.68e25, 19.218, 0.0463, 0.77, 74.00, 96.54, 0.0),
    ("Neptune", 1.02e26, 30.070, 0.0095, 1.77, 131.78, 276.34, 0.0),
    ("Ceres", 9.39e20, 2.77, 0.0758, 10.59, 80.33, 73.12, 0.0),
    ("Vesta", 2.59e20, 2.36, 0.0887, 7.14, 103.85, 150.73, 0.0),
    ("Pallas", 2.11e20, 2.77, 0.2313, 34.84, 173.09, 310.05, 0.0),
    ("Hygiea", 8.67e19, 3.14, 0.1126, 3.84, 283.20, 312.32, 0.0),
    ("Pluto", 1.31e22, 39.482, 0.2488, 17.14, 110.30, 113.76, 0.0),
    ("Eris", 1.66e22, 67.8, 0.4361, 44.04, 35.95, 150.98, 0.0),
    ("Haumea", 4.01e21, 43.1, 0.1913, 28.19, 121.79, 239.08, 0.0),
    ("Makemake", 3.1e21, 45.8, 0.1610, 29.01, 79.36, 297.24, 0.0),
];

/// The Sun, the eight planets and the major dwarfs, optionally extended
/// with minor bodies from CSV catalogs, all shifted into the barycentric
/// frame.
///
/// [`generate`](System::generate) builds the planetary configuration;
/// [`load_main_belt`](Self::load_main_belt) and
/// [`load_kuiper_belt`](Self::load_kuiper_belt) append catalog bodies
/// afterwards. Appending moves the barycentre, so finish with
/// [`shift_to_barycenter`](Self::shift_to_barycenter) once everything is
/// loaded.
pub struct SolarSystem<T: Scalar> {
    bodies: Vec<Body<T>>,
}

impl<T: Scalar> SolarSystem<T> {
    pub fn new() -> Self {
        Self { bodies: Vec::new() }
    }

    /// Places one body from its heliocentric elements.
    fn add_from_elements(&mut self, name: &str, mass: T, elements: &OrbitalElements<T>) {
        let mu = T::from_f64(GRAVITATIONAL_CONSTANT * SOLAR_MASS_KG);
        let (position, velocity) = elements_to_cartesian(elements, mu);
        self.bodies.push(Body::new(mass, position, velocity, name));
    }

    /// Appends main-belt asteroids from a CSV catalog.
    pub fn load_main_belt<P: AsRef<Path>>(&mut self, path: P) -> Result<BeltSummary, CatalogError> {
        self.load_belt(path, Belt::Main)
    }

    /// Appends Kuiper-belt objects from a CSV catalog.
    pub fn load_kuiper_belt<P: AsRef<Path>>(
        &mut self,
        path: P,
    ) -> Result<BeltSummary, CatalogError> {
        self.load_belt(path, Belt::Kuiper)
    }

    fn load_belt<P: AsRef<Path>>(&mut self, path: P, belt: Belt) -> Result<BeltSummary, CatalogError> {
        let (minor_bodies, summary) = catalog::load_belt_file::<T, _>(path, belt)?;
        self.extend_with_minor_bodies(minor_bodies);
        Ok(summary)
    }

    /// Places already-parsed catalog rows; the elements carry a in AU.
    pub fn extend_with_minor_bodies(&mut self, minor_bodies: Vec<MinorBody<T>>) {
        for minor in minor_bodies {
            let mut elements = minor.elements;
            elements.semi_major_axis = elements.semi_major_axis * T::from_f64(AU_M);
            self.add_from_elements(&minor.name, minor.mass, &elements);
        }
    }

    /// Moves the whole configuration into the centre-of-momentum frame.
    pub fn shift_to_barycenter(&mut self) {
        let mut total_mass = T::zero();
        let mut barycenter_position = Vec3::zero();
        let mut barycenter_velocity = Vec3::zero();

        for body in &self.bodies {
            total_mass += body.mass;
            barycenter_position += body.position * body.mass;
            barycenter_velocity += body.velocity * body.mass;
        }

        if total_mass > T::zero() {
            barycenter_position /= total_mass;
            barycenter_velocity /= total_mass;
        }

        for body in &mut self.bodies {
            body.position -= barycenter_position;
            body.velocity -= barycenter_velocity;
        }
    }
}

impl<T: Scalar> Default for SolarSystem<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Scalar> System<T> for SolarSystem<T> {
    fn bodies(&self) -> &[Body<T>] {
        &self.bodies
    }

    fn bodies_mut(&mut self) -> &mut [Body<T>] {
        &mut self.bodies
    }

    fn generate(&mut self) {
        self.bodies.clear();

        self.bodies.push(Body::new(
            T::from_f64(SOLAR_MASS_KG),
            Vec3::zero(),
            Vec3::zero(),
            "Sun",
        ));

        info!("placing {} planets and dwarfs", PLANETS.len());

        for &(name, mass, a_au, e, i_deg, omega_deg, node_deg, ma_deg) in &PLANETS {
            let elements = OrbitalElements {
                semi_major_axis: T::from_f64(a_au * AU_M),
                eccentricity: T::from_f64(e),
                inclination: radians(T::from_f64(i_deg)),
                longitude_ascending_node: radians(T::from_f64(node_deg)),
                argument_of_periapsis: radians(T::from_f64(omega_deg)),
                mean_anomaly: radians(T::from_f64(ma_deg)),
            };
            self.add_from_elements(name, T::from_f64(mass), &elements);
        }

        self.shift_to_barycenter();
    }
}
