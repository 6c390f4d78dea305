use crate::DoubleDouble;

fn dd(x: f64) -> DoubleDouble {
    DoubleDouble::from(x)
}

#[test]
fn pi_constants_head_matches_f64() {
    assert_eq!(DoubleDouble::PI.hi(), std::f64::consts::PI);
    assert_eq!(DoubleDouble::TAU.hi(), std::f64::consts::TAU);
    assert_eq!(DoubleDouble::FRAC_PI_2.hi(), std::f64::consts::FRAC_PI_2);
    assert_eq!(DoubleDouble::FRAC_PI_4.hi(), std::f64::consts::FRAC_PI_4);
}

#[test]
fn pi_constants_are_consistent() {
    let half = DoubleDouble::PI / 2.0;
    assert!((half - DoubleDouble::FRAC_PI_2).abs().to_f64() < 1e-32);

    let doubled = DoubleDouble::PI * 2.0;
    assert!((doubled - DoubleDouble::TAU).abs().to_f64() < 1e-31);
}

#[test]
fn sqrt_squares_back_to_the_argument() {
    for &x in &[2.0, 0.5, 10.0, 123456.789, 1e-8] {
        let r = dd(x).sqrt();
        let residual = (r.square() - dd(x)).abs();
        assert!(
            residual.to_f64() <= 2e-32 * x,
            "sqrt residual too large for {x}: {}",
            residual.to_f64()
        );
    }
}

#[test]
fn sqrt_of_zero_is_zero() {
    assert!(dd(0.0).sqrt().is_zero());
}

#[test]
#[should_panic(expected = "negative argument")]
fn sqrt_of_negative_panics() {
    let _ = dd(-1.0).sqrt();
}

#[test]
fn sin_cos_satisfy_the_pythagorean_identity() {
    let mut x = -10.0;
    while x <= 10.0 {
        let a = dd(x);
        let residual = (a.sin().square() + a.cos().square() - 1.0).abs();
        assert!(
            residual.to_f64() < 1e-31,
            "sin²+cos²-1 = {} at x = {x}",
            residual.to_f64()
        );
        x += 0.37;
    }
}

#[test]
fn sin_cos_match_known_values() {
    let half = (DoubleDouble::PI / 6.0).sin();
    assert!((half - 0.5).abs().to_f64() < 1e-30);

    let half = (DoubleDouble::PI / 3.0).cos();
    assert!((half - 0.5).abs().to_f64() < 1e-30);

    assert_eq!(dd(0.0).sin().to_f64(), 0.0);
    assert_eq!(dd(0.0).cos(), 1.0);

    // Reduction far outside the principal range.
    let big = DoubleDouble::TAU * 25.0 + DoubleDouble::FRAC_PI_2;
    assert!((big.sin() - 1.0).abs().to_f64() < 1e-29);
}

#[test]
fn sin_is_odd_and_cos_is_even() {
    for &x in &[0.3, 1.1, 2.9] {
        let a = dd(x);
        assert!((a.sin() + (-a).sin()).abs().to_f64() < 1e-31);
        assert!((a.cos() - (-a).cos()).abs().to_f64() < 1e-31);
    }
}

#[test]
fn atan2_axis_and_diagonal_shortcuts() {
    assert_eq!(dd(1.0).atan2(dd(0.0)), DoubleDouble::FRAC_PI_2);
    assert_eq!(dd(-1.0).atan2(dd(0.0)), -DoubleDouble::FRAC_PI_2);
    assert_eq!(dd(0.0).atan2(dd(2.0)), DoubleDouble::ZERO);
    assert_eq!(dd(0.0).atan2(dd(-2.0)), DoubleDouble::PI);

    assert_eq!(dd(3.0).atan2(dd(3.0)), DoubleDouble::FRAC_PI_4);
    assert_eq!(dd(-3.0).atan2(dd(3.0)), -DoubleDouble::FRAC_PI_4);
}

#[test]
#[should_panic(expected = "both arguments zero")]
fn atan2_at_the_origin_panics() {
    let _ = dd(0.0).atan2(dd(0.0));
}

#[test]
fn atan2_agrees_with_f64_in_the_first_quadrant() {
    for &(y, x) in &[(1.0, 2.0), (0.5, 0.7), (2.0, 5.0)] {
        let z = dd(y).atan2(dd(x));
        let expected = y.atan2(x);
        assert!((z.to_f64() - expected).abs() < 1e-15);

        // The refined angle must reproduce the input ratio.
        let tan_residual = (z.sin() / z.cos() - dd(y) / dd(x)).abs();
        assert!(tan_residual.to_f64() < 1e-15);
    }
}

#[test]
fn floor_and_ceil_look_at_the_tail() {
    // 2 - 1e-17 has head 2.0 and a negative tail: its floor is 1.
    let just_below_two = dd(2.0) - dd(1e-17);
    assert_eq!(just_below_two.hi(), 2.0);
    assert_eq!(just_below_two.floor(), 1.0);
    assert_eq!(just_below_two.ceil(), 2.0);

    let just_above_two = dd(2.0) + dd(1e-17);
    assert_eq!(just_above_two.floor(), 2.0);
    assert_eq!(just_above_two.ceil(), 3.0);

    assert_eq!(dd(2.5).floor(), 2.0);
    assert_eq!(dd(-2.5).floor(), -3.0);
    assert_eq!(dd(2.5).ceil(), 3.0);
}

#[test]
fn trunc_rounds_toward_zero() {
    assert_eq!(dd(2.7).trunc(), 2.0);
    assert_eq!(dd(-2.7).trunc(), -2.0);
}

#[test]
fn div_rem_reconstructs_the_dividend() {
    let a = dd(17.25);
    let b = dd(4.0);
    let (q, r) = a.div_rem(b);

    assert_eq!(q, 4.0);
    assert_eq!(r, 1.25);
    assert!((q * b + r - a).is_zero());
}

#[test]
fn abs_strips_the_sign() {
    let a = dd(0.1) + dd(0.2);
    assert_eq!((-a).abs(), a);
    assert_eq!(a.abs(), a);
}
