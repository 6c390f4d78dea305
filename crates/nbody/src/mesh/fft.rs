//! Three-dimensional real-to-complex FFT.
//!
//! Composes a 3D transform from 1D passes: a real-to-complex pass along x
//! (the fastest-varying axis), then complex passes along y and z over the
//! half spectrum. The spectrum layout is the conventional
//! `n · n · (n/2 + 1)` array with `ix ∈ [0, n/2]`, indexed
//! `(iz · n + iy) · (n/2 + 1) + ix`.
//!
//! Plans and scratch buffers are allocated once at construction and reused
//! for every transform; neither direction normalizes, so a forward/inverse
//! round trip scales the data by n³.

use num_complex::Complex;
use realfft::{ComplexToReal, RealFftPlanner, RealToComplex};
use rustfft::{Fft, FftPlanner};
use std::sync::Arc;

pub struct Fft3 {
    n: usize,
    half: usize,
    r2c: Arc<dyn RealToComplex<f64>>,
    c2r: Arc<dyn ComplexToReal<f64>>,
    c2c_forward: Arc<dyn Fft<f64>>,
    c2c_inverse: Arc<dyn Fft<f64>>,
    real_row: Vec<f64>,
    spectrum_row: Vec<Complex<f64>>,
    column: Vec<Complex<f64>>,
    r2c_scratch: Vec<Complex<f64>>,
    c2r_scratch: Vec<Complex<f64>>,
    c2c_scratch: Vec<Complex<f64>>,
}

impl Fft3 {
    /// Plans transforms for an `n³` grid; `n` must be even (in practice a
    /// power of two).
    pub fn new(n: usize) -> Self {
        assert!(n >= 2 && n % 2 == 0, "grid size must be even, got {n}");

        let half = n / 2 + 1;

        let mut real_planner = RealFftPlanner::<f64>::new();
        let r2c = real_planner.plan_fft_forward(n);
        let c2r = real_planner.plan_fft_inverse(n);

        let mut planner = FftPlanner::<f64>::new();
        let c2c_forward = planner.plan_fft_forward(n);
        let c2c_inverse = planner.plan_fft_inverse(n);

        let r2c_scratch = vec![Complex::default(); r2c.get_scratch_len()];
        let c2r_scratch = vec![Complex::default(); c2r.get_scratch_len()];
        let scratch_len = c2c_forward
            .get_inplace_scratch_len()
            .max(c2c_inverse.get_inplace_scratch_len());

        Self {
            n,
            half,
            r2c,
            c2r,
            c2c_forward,
            c2c_inverse,
            real_row: vec![0.0; n],
            spectrum_row: vec![Complex::default(); half],
            column: vec![Complex::default(); n],
            r2c_scratch,
            c2r_scratch,
            c2c_scratch: vec![Complex::default(); scratch_len],
        }
    }

    pub fn grid_len(&self) -> usize {
        self.n * self.n * self.n
    }

    pub fn spectrum_len(&self) -> usize {
        self.n * self.n * self.half
    }

    /// Forward transform of an `n³` real grid into the half spectrum.
    pub fn forward(&mut self, real: &[f64], spectrum: &mut [Complex<f64>]) {
        assert_eq!(real.len(), self.grid_len());
        assert_eq!(spectrum.len(), self.spectrum_len());

        let (n, half) = (self.n, self.half);

        for row in 0..n * n {
            self.real_row.copy_from_slice(&real[row * n..(row + 1) * n]);
            self.r2c
                .process_with_scratch(
                    &mut self.real_row,
                    &mut spectrum[row * half..(row + 1) * half],
                    &mut self.r2c_scratch,
                )
                .expect("real-to-complex pass failed");
        }

        self.transform_columns(spectrum, true);
    }

    /// Inverse transform of the half spectrum back onto an `n³` real grid.
    ///
    /// The spectrum buffer is used as working storage and holds no
    /// meaningful data afterwards.
    pub fn inverse(&mut self, spectrum: &mut [Complex<f64>], real: &mut [f64]) {
        assert_eq!(real.len(), self.grid_len());
        assert_eq!(spectrum.len(), self.spectrum_len());

        let (n, half) = (self.n, self.half);

        self.transform_columns(spectrum, false);

        for row in 0..n * n {
            self.spectrum_row
                .copy_from_slice(&spectrum[row * half..(row + 1) * half]);

            // The DC and Nyquist bins of a real signal are purely real; the
            // complex column passes leave round-off residue there that the
            // real inverse rejects.
            self.spectrum_row[0].im = 0.0;
            self.spectrum_row[half - 1].im = 0.0;

            self.c2r
                .process_with_scratch(
                    &mut self.spectrum_row,
                    &mut real[row * n..(row + 1) * n],
                    &mut self.c2r_scratch,
                )
                .expect("complex-to-real pass failed");
        }
    }

    /// In-place complex passes along y then z for every x bin of the half
    /// spectrum; the axis order is immaterial for a separable transform.
    fn transform_columns(&mut self, spectrum: &mut [Complex<f64>], forward: bool) {
        let (n, half) = (self.n, self.half);
        let fft = if forward {
            &self.c2c_forward
        } else {
            &self.c2c_inverse
        };

        // y axis: stride `half` within each z plane
        for iz in 0..n {
            for ix in 0..half {
                for iy in 0..n {
                    self.column[iy] = spectrum[(iz * n + iy) * half + ix];
                }
                fft.process_with_scratch(&mut self.column, &mut self.c2c_scratch);
                for iy in 0..n {
                    spectrum[(iz * n + iy) * half + ix] = self.column[iy];
                }
            }
        }

        // z axis: stride `n * half`
        for iy in 0..n {
            for ix in 0..half {
                for iz in 0..n {
                    self.column[iz] = spectrum[(iz * n + iy) * half + ix];
                }
                fft.process_with_scratch(&mut self.column, &mut self.c2c_scratch);
                for iz in 0..n {
                    spectrum[(iz * n + iy) * half + ix] = self.column[iz];
                }
            }
        }
    }
}
