use approx::assert_relative_eq;

use crate::catalog::{estimate_mass, read_belt, Belt};

const SAMPLE: &str = "\
name,id,e,a,i,om,gm,w
\"  Ceres \",1,.0758,2.77,10.59,80.33,62.6,73.12
Vesta,2,0.0887,2.36,7.14,103.85,null,150.73
Pallas,3,0.2313,2.77,34.84,173.09,,310.05
Hyperbolic,4,1.5,2.0,0.0,0.0,null,0.0
Sunken,5,0.1,-1.0,0.0,0.0,null,0.0
Short,6,0.1
";

#[test]
fn loads_valid_rows_and_skips_the_rest() {
    let (bodies, summary) = read_belt::<f64, _>(SAMPLE.as_bytes(), Belt::Main);

    assert_eq!(summary.loaded, 3);
    assert_eq!(summary.skipped, 3);
    assert_eq!(bodies.len(), 3);
}

#[test]
fn quoted_names_are_unwrapped_and_trimmed() {
    let (bodies, _) = read_belt::<f64, _>(SAMPLE.as_bytes(), Belt::Main);

    assert_eq!(bodies[0].name, "Ceres");
    assert_eq!(bodies[1].name, "Vesta");
}

#[test]
fn leading_decimal_points_read_as_zero_point() {
    let (bodies, _) = read_belt::<f64, _>(SAMPLE.as_bytes(), Belt::Main);

    // ".0758" in the eccentricity column.
    assert_relative_eq!(bodies[0].elements.eccentricity, 0.0758, epsilon = 1e-12);
}

#[test]
fn angles_arrive_in_radians_with_zero_mean_anomaly() {
    let (bodies, _) = read_belt::<f64, _>(SAMPLE.as_bytes(), Belt::Main);
    let ceres = &bodies[0];

    assert_relative_eq!(
        ceres.elements.inclination,
        10.59_f64.to_radians(),
        epsilon = 1e-12
    );
    assert_relative_eq!(
        ceres.elements.longitude_ascending_node,
        80.33_f64.to_radians(),
        epsilon = 1e-12
    );
    assert_relative_eq!(
        ceres.elements.argument_of_periapsis,
        73.12_f64.to_radians(),
        epsilon = 1e-12
    );
    assert_eq!(ceres.elements.mean_anomaly, 0.0);
    assert_relative_eq!(ceres.elements.semi_major_axis, 2.77, epsilon = 1e-12);
}

#[test]
fn gm_column_sets_the_mass_when_present() {
    let (bodies, _) = read_belt::<f64, _>(SAMPLE.as_bytes(), Belt::Main);

    // mass = GM / G with G = 1.
    assert_relative_eq!(bodies[0].mass, 62.6, epsilon = 1e-12);
}

#[test]
fn null_and_empty_gm_fall_back_to_the_belt_average() {
    let (bodies, _) = read_belt::<f64, _>(SAMPLE.as_bytes(), Belt::Main);

    assert_eq!(bodies[1].mass, Belt::Main.average_mass());
    assert_eq!(bodies[2].mass, Belt::Main.average_mass());

    let (kuiper, _) = read_belt::<f64, _>(
        "name,id,e,a,i,om,gm,w\nQuaoar,1,0.04,43.7,8.0,189.0,null,157.0\n".as_bytes(),
        Belt::Kuiper,
    );
    assert_eq!(kuiper[0].mass, Belt::Kuiper.average_mass());
}

#[test]
fn summary_accumulates_loaded_mass() {
    let (_, summary) = read_belt::<f64, _>(SAMPLE.as_bytes(), Belt::Main);

    let expected = 62.6 + 2.0 * Belt::Main.average_mass();
    assert_relative_eq!(summary.total_mass, expected, epsilon = 1e-6);
}

#[test]
fn headers_only_or_empty_input_loads_nothing() {
    let (bodies, summary) = read_belt::<f64, _>("name,id,e,a,i,om,gm,w\n".as_bytes(), Belt::Main);
    assert!(bodies.is_empty());
    assert_eq!(summary.loaded, 0);
    assert_eq!(summary.skipped, 0);

    let (bodies, _) = read_belt::<f64, _>(&b""[..], Belt::Main);
    assert!(bodies.is_empty());
}

#[test]
fn mass_estimation_prefers_gm_then_diameter_then_average() {
    // GM wins outright.
    assert_eq!(estimate_mass(42.0, 500.0, Belt::Main), 42.0);

    // Diameter-based sphere: (4/3)·π·r³·ρ with r in metres.
    let diameter_km = 100.0;
    let radius: f64 = diameter_km * 1e3 / 2.0;
    let expected = (4.0 / 3.0) * std::f64::consts::PI * radius.powi(3) * Belt::Main.density();
    assert_relative_eq!(
        estimate_mass(0.0, diameter_km, Belt::Main),
        expected,
        epsilon = 1e-12
    );

    // Kuiper bodies are lighter per volume but the fallback is heavier.
    assert!(Belt::Kuiper.density() < Belt::Main.density());
    assert!(Belt::Kuiper.average_mass() > Belt::Main.average_mass());

    assert_eq!(estimate_mass(0.0, 0.0, Belt::Main), Belt::Main.average_mass());
    assert_eq!(
        estimate_mass(0.0, 0.0, Belt::Kuiper),
        Belt::Kuiper.average_mass()
    );
}
