use crate::{DoubleDouble, ParseDoubleDoubleError};

fn dd(x: f64) -> DoubleDouble {
    DoubleDouble::from(x)
}

#[test]
fn zero_formats_as_a_bare_digit() {
    assert_eq!(DoubleDouble::ZERO.to_string_with_digits(32), "0");
}

#[test]
fn format_produces_scientific_notation() {
    assert_eq!(dd(1.0).to_string_with_digits(4), "1.000E0");
    assert_eq!(dd(-0.5).to_string_with_digits(4), "-5.000E-1");
    assert_eq!(dd(1234.0).to_string_with_digits(6), "1.23400E3");
}

#[test]
fn display_uses_32_significant_digits() {
    let s = DoubleDouble::PI.to_string();
    // "3." plus 31 more digits plus exponent.
    assert!(s.starts_with("3.14159265358979323846264338327"));
    assert!(s.ends_with("E0"));
    assert_eq!(s.len(), "3.".len() + 31 + "E0".len());
}

#[test]
fn parse_integers_exactly() {
    let x: DoubleDouble = "125".parse().unwrap();
    assert_eq!(x, 125.0);

    let x: DoubleDouble = "-9007199254740993".parse().unwrap();
    // 2⁵³ + 1 is not representable in f64 but is in double-double.
    assert_eq!(x.hi(), -9007199254740992.0);
    assert_eq!(x.lo(), -1.0);
}

#[test]
fn parse_handles_point_sign_and_exponent() {
    let x: DoubleDouble = "+1.5e2".parse().unwrap();
    assert_eq!(x, 150.0);

    let x: DoubleDouble = "2.5E-1".parse().unwrap();
    assert!((x - 0.25).abs().to_f64() < 1e-32);

    let x: DoubleDouble = "  42".parse().unwrap();
    assert_eq!(x, 42.0);
}

#[test]
fn parse_rejects_malformed_input() {
    assert_eq!(
        "".parse::<DoubleDouble>(),
        Err(ParseDoubleDoubleError::Empty)
    );
    assert_eq!(
        "abc".parse::<DoubleDouble>(),
        Err(ParseDoubleDoubleError::UnexpectedChar('a'))
    );
    assert_eq!(
        "1.2.3".parse::<DoubleDouble>(),
        Err(ParseDoubleDoubleError::DuplicatePoint)
    );
    assert_eq!(
        "1-2".parse::<DoubleDouble>(),
        Err(ParseDoubleDoubleError::MisplacedSign)
    );
    assert_eq!(
        "1e".parse::<DoubleDouble>(),
        Err(ParseDoubleDoubleError::BadExponent)
    );
    assert_eq!(
        "-".parse::<DoubleDouble>(),
        Err(ParseDoubleDoubleError::NoDigits)
    );
}

#[test]
fn format_parse_round_trips_to_format_precision() {
    let values = [
        DoubleDouble::PI,
        DoubleDouble::TAU,
        dd(0.1) + dd(0.2),
        dd(1.0) / dd(3.0),
        dd(-6.02214076e23) * dd(1.0000000001),
        DoubleDouble::from_parts(2.0, -1e-18),
    ];

    for &v in &values {
        let text = v.to_string_with_digits(32);
        let back: DoubleDouble = text.parse().unwrap();
        let rel = ((back - v) / v).abs().to_f64();
        assert!(rel < 1e-31, "round trip failed for {text}: rel = {rel:e}");
    }
}
