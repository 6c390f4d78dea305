use approx::assert_relative_eq;
use doubledouble::DoubleDouble;

use crate::vec3::Vec3;

#[test]
fn component_arithmetic() {
    let a = Vec3::new(1.0, 2.0, 3.0);
    let b = Vec3::new(4.0, 5.0, 6.0);

    assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
    assert_eq!(b - a, Vec3::new(3.0, 3.0, 3.0));
    assert_eq!(a * 2.0, Vec3::new(2.0, 4.0, 6.0));
    assert_eq!(b / 2.0, Vec3::new(2.0, 2.5, 3.0));
    assert_eq!(-a, Vec3::new(-1.0, -2.0, -3.0));
}

#[test]
fn assign_operators_match_binary_operators() {
    let mut v = Vec3::new(1.0, 2.0, 3.0);
    v += Vec3::new(1.0, 1.0, 1.0);
    v -= Vec3::new(0.0, 1.0, 0.0);
    v *= 3.0;
    v /= 2.0;

    assert_eq!(v, Vec3::new(3.0, 3.0, 6.0));
}

#[test]
fn dot_and_cross_products() {
    let x = Vec3::new(1.0, 0.0, 0.0);
    let y = Vec3::new(0.0, 1.0, 0.0);
    let z = Vec3::new(0.0, 0.0, 1.0);

    assert_eq!(x.dot(y), 0.0);
    assert_eq!(x.dot(x), 1.0);
    assert_eq!(x.cross(y), z);
    assert_eq!(y.cross(x), -z);
    assert_eq!(z.cross(x), y);

    // The cross product is orthogonal to both factors.
    let a = Vec3::new(1.5, -2.0, 0.5);
    let b = Vec3::new(0.3, 4.0, -1.0);
    let c = a.cross(b);
    assert_relative_eq!(c.dot(a), 0.0, epsilon = 1e-12);
    assert_relative_eq!(c.dot(b), 0.0, epsilon = 1e-12);
}

#[test]
fn magnitudes() {
    let v = Vec3::new(3.0, 4.0, 0.0);

    assert_eq!(v.magnitude_squared(), 25.0);
    assert_eq!(v.magnitude(), 5.0);
}

#[test]
fn normalized_returns_a_unit_vector() {
    let v = Vec3::new(3.0, 4.0, 0.0).normalized();

    assert_relative_eq!(v.magnitude(), 1.0, epsilon = 1e-15);
    assert_relative_eq!(v.x, 0.6, epsilon = 1e-15);
    assert_relative_eq!(v.y, 0.8, epsilon = 1e-15);
}

#[test]
fn normalized_of_a_negligible_vector_is_zero() {
    let v: Vec3<f64> = Vec3::new(1e-300, 0.0, 0.0).normalized();
    assert_eq!(v, Vec3::zero());

    assert_eq!(Vec3::<f64>::zero().normalized(), Vec3::zero());
}

#[test]
fn indexing_matches_fields() {
    let mut v = Vec3::new(1.0, 2.0, 3.0);
    assert_eq!(v[0], v.x);
    assert_eq!(v[1], v.y);
    assert_eq!(v[2], v.z);

    v[2] = 9.0;
    assert_eq!(v.z, 9.0);
}

#[test]
#[should_panic(expected = "out of range")]
fn indexing_past_the_end_panics() {
    let v = Vec3::new(1.0, 2.0, 3.0);
    let _ = v[3];
}

#[test]
fn double_double_components_keep_extra_precision() {
    let dd = |x: f64| DoubleDouble::from(x);
    let a = Vec3::new(dd(0.1), dd(0.1), dd(0.1));
    let b = a + Vec3::new(dd(0.2), dd(0.2), dd(0.2));

    assert_eq!(b.x.to_f64(), 0.1 + 0.2);
    // 0.1 + 0.2 carries a non-zero correction limb in double-double.
    assert!(b.x.lo() != 0.0);

    let m = Vec3::new(dd(3.0), dd(4.0), dd(0.0)).magnitude();
    assert_eq!(m.to_f64(), 5.0);
}
