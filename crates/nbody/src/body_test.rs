use approx::assert_relative_eq;
use doubledouble::DoubleDouble;

use crate::body::Body;
use crate::vec3::Vec3;

#[test]
fn construction_stores_the_fields() {
    let body = Body::new(
        2.5,
        Vec3::new(1.0, 2.0, 3.0),
        Vec3::new(-0.5, 0.0, 0.5),
        "probe",
    );

    assert_eq!(body.mass, 2.5);
    assert_eq!(body.position, Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(body.velocity, Vec3::new(-0.5, 0.0, 0.5));
    assert_eq!(body.name, "probe");
}

#[test]
fn momentum_is_mass_times_velocity() {
    let body = Body::new(3.0, Vec3::zero(), Vec3::new(1.0, -2.0, 0.5), "");
    assert_eq!(body.momentum(), Vec3::new(3.0, -6.0, 1.5));
}

#[test]
fn kinetic_energy_is_half_m_v_squared() {
    let body = Body::new(2.0, Vec3::zero(), Vec3::new(3.0, 4.0, 0.0), "");
    // ½ · 2 · 25
    assert_relative_eq!(body.kinetic_energy(), 25.0, epsilon = 1e-15);
}

#[test]
fn helpers_work_in_double_double() {
    let dd = DoubleDouble::from;
    let body = Body::new(
        dd(2.0),
        Vec3::zero(),
        Vec3::new(dd(0.1), dd(0.0), dd(0.0)),
        "dd",
    );

    // ½ · 2 · 0.1² = 0.01, held to double-double precision.
    let residual = (body.kinetic_energy() - dd(0.1).square()).abs();
    assert!(residual.to_f64() < 1e-32);
}
