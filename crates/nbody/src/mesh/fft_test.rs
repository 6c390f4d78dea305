use num_complex::Complex;

use crate::mesh::fft::Fft3;

fn sample_grid(n: usize) -> Vec<f64> {
    // Deterministic, aperiodic-looking data.
    (0..n * n * n)
        .map(|i| ((i * 37 + 11) % 97) as f64 / 97.0 - 0.5)
        .collect()
}

#[test]
fn round_trip_reproduces_the_input_after_normalization() {
    let n = 8;
    let mut fft = Fft3::new(n);

    let input = sample_grid(n);
    let mut spectrum = vec![Complex::default(); fft.spectrum_len()];
    let mut output = vec![0.0; fft.grid_len()];

    fft.forward(&input, &mut spectrum);
    fft.inverse(&mut spectrum, &mut output);

    let norm = 1.0 / (n * n * n) as f64;
    for (got, expected) in output.iter().zip(&input) {
        assert!(
            (got * norm - expected).abs() < 1e-12,
            "round trip error: {} vs {expected}",
            got * norm
        );
    }
}

#[test]
fn dc_bin_holds_the_grid_sum() {
    let n = 8;
    let mut fft = Fft3::new(n);

    let input = sample_grid(n);
    let sum: f64 = input.iter().sum();

    let mut spectrum = vec![Complex::default(); fft.spectrum_len()];
    fft.forward(&input, &mut spectrum);

    assert!((spectrum[0].re - sum).abs() < 1e-10);
    assert!(spectrum[0].im.abs() < 1e-10);
}

#[test]
fn impulse_transforms_to_a_flat_spectrum() {
    let n = 8;
    let mut fft = Fft3::new(n);

    let mut input = vec![0.0; fft.grid_len()];
    input[0] = 1.0;

    let mut spectrum = vec![Complex::default(); fft.spectrum_len()];
    fft.forward(&input, &mut spectrum);

    for bin in &spectrum {
        assert!((bin.re - 1.0).abs() < 1e-12);
        assert!(bin.im.abs() < 1e-12);
    }
}

#[test]
fn single_mode_lands_in_a_single_bin() {
    let n = 16;
    let half = n / 2 + 1;
    let mut fft = Fft3::new(n);

    // cos(2π·3x/n): one mode along the x axis.
    let mut input = vec![0.0; fft.grid_len()];
    for iz in 0..n {
        for iy in 0..n {
            for ix in 0..n {
                input[(iz * n + iy) * n + ix] =
                    (std::f64::consts::TAU * 3.0 * ix as f64 / n as f64).cos();
            }
        }
    }

    let mut spectrum = vec![Complex::default(); fft.spectrum_len()];
    fft.forward(&input, &mut spectrum);

    // Expected amplitude: n³/2 in the (3, 0, 0) bin of the half spectrum.
    let expected = (n * n * n) as f64 / 2.0;
    for iz in 0..n {
        for iy in 0..n {
            for ix in 0..half {
                let value = spectrum[(iz * n + iy) * half + ix];
                if iz == 0 && iy == 0 && ix == 3 {
                    assert!((value.re - expected).abs() < 1e-8 * expected);
                } else {
                    assert!(value.norm() < 1e-6, "leakage at ({ix},{iy},{iz})");
                }
            }
        }
    }
}

#[test]
#[should_panic(expected = "must be even")]
fn odd_grid_sizes_are_rejected() {
    let _ = Fft3::new(9);
}
