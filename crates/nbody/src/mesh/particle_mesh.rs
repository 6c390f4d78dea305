//! The particle-mesh gravity solver.

use log::warn;
use num_complex::Complex;

use crate::body::Body;
use crate::mesh::fft::Fft3;
use crate::scalar::Scalar;
use crate::simulator::Simulator;
use crate::system::System;
use crate::vec3::Vec3;

/// Softening length in units of the cell size.
const SOFTENING_CELLS: f64 = 2.8;

/// When and how grid forces are evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForceMode {
    /// Differentiate the whole potential grid up front, once per step.
    Precomputed,
    /// Differentiate grid points on demand and memoize; cheaper when the
    /// bodies touch a small fraction of the cells.
    Lazy,
}

/// Particle-mesh Poisson solver with kick-drift integration.
///
/// Each step deposits the body masses onto a regular N³ grid with
/// Cloud-in-Cell weights, solves ∇²φ = 4πGρ in Fourier space, recovers
/// grid forces by central differences of the potential and interpolates
/// them back to the bodies with the same CIC weights. Cost per step is
/// O(N³ log N + bodies), against O(bodies²) for direct summation.
///
/// The grid geometry is toroidal: mass assignment and finite differences
/// both wrap, and the k = 0 mode is zeroed, which subtracts the mean
/// density as a uniform background. The simulation box is sized to the
/// bodies on the first step and re-derived whenever more than a quarter of
/// them drift outside (when [`set_adaptive_box`](Self::set_adaptive_box)
/// is left on).
///
/// The update is a first-order kick-drift rather than velocity Verlet: a
/// Verlet half-step at the drifted positions would require a second
/// Poisson solve per step.
pub struct ParticleMeshSimulator<T: Scalar> {
    grid_size: usize,
    total_cells: usize,
    box_size: T,
    cell_size: T,
    softening: T,
    g: T,
    dt: T,
    current_time: T,

    min_cell_size: T,
    max_cell_size: T,
    adaptive_box: bool,
    auto_box_size: bool,
    out_of_bounds_count: usize,

    force_mode: ForceMode,
    force_computed: Vec<bool>,

    density_grid: Vec<T>,
    potential_grid: Vec<T>,
    force_grid: Vec<Vec3<T>>,

    fft: Fft3,
    fft_real: Vec<f64>,
    fft_spectrum: Vec<Complex<f64>>,

    box_min: Vec3<T>,
    box_max: Vec3<T>,
}

impl<T: Scalar> ParticleMeshSimulator<T> {
    /// Plans FFTs and allocates grids for an `grid_size³` mesh; the
    /// simulation box is derived from the bodies on the first step.
    pub fn new(grid_size: usize) -> Self {
        let total_cells = grid_size * grid_size * grid_size;
        let fft = Fft3::new(grid_size);
        let spectrum_len = fft.spectrum_len();

        Self {
            grid_size,
            total_cells,
            box_size: T::zero(),
            cell_size: T::zero(),
            softening: T::zero(),
            g: T::one(),
            dt: T::from_f64(0.01),
            current_time: T::zero(),
            min_cell_size: T::from_f64(0.001),
            max_cell_size: T::from_f64(10.0),
            adaptive_box: true,
            auto_box_size: true,
            out_of_bounds_count: 0,
            force_mode: ForceMode::Lazy,
            force_computed: vec![false; total_cells],
            density_grid: vec![T::zero(); total_cells],
            potential_grid: vec![T::zero(); total_cells],
            force_grid: vec![Vec3::zero(); total_cells],
            fft,
            fft_real: vec![0.0; total_cells],
            fft_spectrum: vec![Complex::default(); spectrum_len],
            box_min: Vec3::zero(),
            box_max: Vec3::zero(),
        }
    }

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    pub fn cell_size(&self) -> T {
        self.cell_size
    }

    pub fn box_size(&self) -> T {
        self.box_size
    }

    pub fn softening(&self) -> T {
        self.softening
    }

    pub fn box_min(&self) -> Vec3<T> {
        self.box_min
    }

    pub fn box_max(&self) -> Vec3<T> {
        self.box_max
    }

    pub fn out_of_bounds_count(&self) -> usize {
        self.out_of_bounds_count
    }

    pub fn min_cell_size(&self) -> T {
        self.min_cell_size
    }

    pub fn max_cell_size(&self) -> T {
        self.max_cell_size
    }

    /// Mass density per cell, rebuilt every step.
    pub fn density_grid(&self) -> &[T] {
        &self.density_grid
    }

    /// Gravitational potential per cell, rebuilt every step.
    pub fn potential_grid(&self) -> &[T] {
        &self.potential_grid
    }

    /// Grid forces; meaningful everywhere in precomputed mode, only at
    /// visited cells in lazy mode.
    pub fn force_grid(&self) -> &[Vec3<T>] {
        &self.force_grid
    }

    /// The real FFT workspace: the raw (unnormalized) inverse-transform
    /// output of the latest Poisson solve.
    pub fn fft_in_data(&self) -> &[f64] {
        &self.fft_real
    }

    /// The half spectrum as of the latest Poisson solve.
    pub fn fft_out_data(&self) -> &[Complex<f64>] {
        &self.fft_spectrum
    }

    /// Fixes the box to a cube of side `box_size` centred on the origin
    /// and disables the first-step auto-sizing.
    pub fn set_box_size(&mut self, box_size: T) {
        self.box_size = box_size;
        self.auto_box_size = false;

        let half_box = Vec3::new(box_size, box_size, box_size) * T::from_f64(0.5);
        self.box_min = -half_box;
        self.box_max = half_box;

        self.update_grid_parameters();
    }

    /// Enables or disables box re-derivation when bodies escape.
    pub fn set_adaptive_box(&mut self, enable: bool) {
        self.adaptive_box = enable;
    }

    /// Clamps the cell sizes an adaptive box may choose.
    pub fn set_cell_size_limits(&mut self, min_size: T, max_size: T) {
        self.min_cell_size = min_size;
        self.max_cell_size = max_size;
    }

    pub fn set_force_mode_precomputed(&mut self) {
        self.force_mode = ForceMode::Precomputed;
    }

    pub fn set_force_mode_lazy(&mut self) {
        self.force_mode = ForceMode::Lazy;
        self.force_computed.fill(false);
    }

    pub fn is_force_mode_lazy(&self) -> bool {
        self.force_mode == ForceMode::Lazy
    }

    fn cell_index(&self, i: usize, j: usize, k: usize) -> usize {
        (k * self.grid_size + j) * self.grid_size + i
    }

    /// Wraps a possibly negative grid coordinate onto the torus.
    fn wrap(&self, index: i64) -> usize {
        let n = self.grid_size as i64;
        (((index % n) + n) % n) as usize
    }

    /// The base cell and fractional offsets of a position, shared by mass
    /// assignment and force interpolation.
    fn grid_coordinates(&self, position: Vec3<T>) -> (i64, i64, i64, T, T, T) {
        let grid_pos = (position - self.box_min) / self.cell_size;

        let fx = grid_pos.x - grid_pos.x.floor();
        let fy = grid_pos.y - grid_pos.y.floor();
        let fz = grid_pos.z - grid_pos.z.floor();

        let i = grid_pos.x.floor().to_f64() as i64;
        let j = grid_pos.y.floor().to_f64() as i64;
        let k = grid_pos.z.floor().to_f64() as i64;

        (i, j, k, fx, fy, fz)
    }

    /// Derives the simulation box from the bodies: a cube of twice the
    /// system size (the larger of the coordinate span and the centre-of-
    /// mass diameter), centred on the centre of mass, with the cell size
    /// clamped to the configured limits.
    fn determine_simulation_box(&mut self, bodies: &[Body<T>]) {
        if bodies.is_empty() {
            return;
        }

        let mut min_pos = bodies[0].position;
        let mut max_pos = bodies[0].position;
        let mut total_mass = T::zero();
        let mut center_of_mass = Vec3::zero();

        for body in bodies {
            let pos = body.position;
            min_pos = Vec3::new(
                min_scalar(min_pos.x, pos.x),
                min_scalar(min_pos.y, pos.y),
                min_scalar(min_pos.z, pos.z),
            );
            max_pos = Vec3::new(
                max_scalar(max_pos.x, pos.x),
                max_scalar(max_pos.y, pos.y),
                max_scalar(max_pos.z, pos.z),
            );

            center_of_mass += pos * body.mass;
            total_mass += body.mass;
        }
        center_of_mass /= total_mass;

        let mut max_distance = T::zero();
        for body in bodies {
            let dist = (body.position - center_of_mass).magnitude();
            max_distance = max_scalar(max_distance, dist);
        }

        let range = max_pos - min_pos;
        let span = max_scalar(range.x, max_scalar(range.y, range.z));

        let system_size = max_scalar(span, T::from_f64(2.0) * max_distance);
        let padding_factor = T::from_f64(2.0);

        self.box_size = system_size * padding_factor;

        let grid_size = T::from_f64(self.grid_size as f64);
        let cell_size = self.box_size / grid_size;
        if cell_size < self.min_cell_size {
            self.box_size = self.min_cell_size * grid_size;
        } else if cell_size > self.max_cell_size {
            self.box_size = self.max_cell_size * grid_size;
        }

        let half_box = Vec3::new(self.box_size, self.box_size, self.box_size) * T::from_f64(0.5);
        self.box_min = center_of_mass - half_box;
        self.box_max = center_of_mass + half_box;

        self.update_grid_parameters();
    }

    fn update_grid_parameters(&mut self) {
        self.cell_size = self.box_size / T::from_f64(self.grid_size as f64);
        self.softening = T::from_f64(SOFTENING_CELLS) * self.cell_size;
    }

    /// Phase 2: zero the density grid and deposit every body with CIC
    /// weights. Bodies outside the box are counted and wrapped onto the
    /// torus rather than dropped.
    fn assign_masses(&mut self, bodies: &[Body<T>]) {
        self.density_grid.fill(T::zero());

        for body in bodies {
            self.assign_particle_mass_cic(body);
        }
    }

    fn assign_particle_mass_cic(&mut self, body: &Body<T>) {
        let cell_volume = self.cell_size * self.cell_size * self.cell_size;

        let pos = body.position;
        let out_of_bounds = pos.x < self.box_min.x
            || pos.x > self.box_max.x
            || pos.y < self.box_min.y
            || pos.y > self.box_max.y
            || pos.z < self.box_min.z
            || pos.z > self.box_max.z;

        if out_of_bounds {
            self.out_of_bounds_count += 1;
        }

        let (i, j, k, fx, fy, fz) = self.grid_coordinates(pos);
        let one = T::one();

        for dk in 0..2_i64 {
            for dj in 0..2_i64 {
                for di in 0..2_i64 {
                    let gi = self.wrap(i + di);
                    let gj = self.wrap(j + dj);
                    let gk = self.wrap(k + dk);

                    let weight = (if di == 0 { one - fx } else { fx })
                        * (if dj == 0 { one - fy } else { fy })
                        * (if dk == 0 { one - fz } else { fz });

                    let idx = self.cell_index(gi, gj, gk);
                    self.density_grid[idx] += body.mass * weight / cell_volume;
                }
            }
        }
    }

    /// Phase 3: forward FFT of the density, Green's-function multiply,
    /// inverse FFT, 1/N³ normalization into the potential grid.
    fn solve_poisson_equation(&mut self) {
        for (slot, density) in self.fft_real.iter_mut().zip(&self.density_grid) {
            *slot = density.to_f64();
        }

        self.fft.forward(&self.fft_real, &mut self.fft_spectrum);
        self.apply_greens_function();
        self.fft.inverse(&mut self.fft_spectrum, &mut self.fft_real);

        let norm = T::one() / T::from_f64(self.total_cells as f64);
        for (potential, value) in self.potential_grid.iter_mut().zip(&self.fft_real) {
            *potential = T::from_f64(*value) * norm;
        }
    }

    /// Multiplies each mode by −4πG/k²; the k = 0 mode is zeroed, which
    /// removes the mean density and pins the potential average to zero.
    fn apply_greens_function(&mut self) {
        let n = self.grid_size;
        let half = n / 2 + 1;
        let kfac = T::from_f64(2.0) * T::pi() / self.box_size;
        let minus_four_pi_g = T::from_f64(-4.0) * T::pi() * self.g;

        for iz in 0..n {
            for iy in 0..n {
                for ix in 0..half {
                    let idx = (iz * n + iy) * half + ix;

                    let kx = T::from_f64(ix as f64) * kfac;
                    let ky = signed_frequency::<T>(iy, n) * kfac;
                    let kz = signed_frequency::<T>(iz, n) * kfac;

                    let k2 = kx * kx + ky * ky + kz * kz;

                    if k2 > T::zero() {
                        let green_factor = (minus_four_pi_g / k2).to_f64();
                        self.fft_spectrum[idx].re *= green_factor;
                        self.fft_spectrum[idx].im *= green_factor;
                    } else {
                        self.fft_spectrum[idx] = Complex::default();
                    }
                }
            }
        }
    }

    /// Phase 4: either differentiate the whole grid now or reset the lazy
    /// memo for on-demand evaluation.
    fn compute_forces(&mut self) {
        match self.force_mode {
            ForceMode::Precomputed => {
                for k in 0..self.grid_size {
                    for j in 0..self.grid_size {
                        for i in 0..self.grid_size {
                            let idx = self.cell_index(i, j, k);
                            self.force_grid[idx] = self.force_at_grid_point(i, j, k);
                        }
                    }
                }
            }
            ForceMode::Lazy => {
                self.force_computed.fill(false);
            }
        }
    }

    /// Central-difference force −∇φ at one grid point, with periodic
    /// neighbour indices. Memoized in lazy mode.
    fn force_at_grid_point(&mut self, i: usize, j: usize, k: usize) -> Vec3<T> {
        let idx = self.cell_index(i, j, k);
        if self.force_mode == ForceMode::Lazy && self.force_computed[idx] {
            return self.force_grid[idx];
        }

        let n = self.grid_size;
        let ip = (i + 1) % n;
        let im = (i + n - 1) % n;
        let jp = (j + 1) % n;
        let jm = (j + n - 1) % n;
        let kp = (k + 1) % n;
        let km = (k + n - 1) % n;

        let phi_ip = self.potential_grid[self.cell_index(ip, j, k)];
        let phi_im = self.potential_grid[self.cell_index(im, j, k)];
        let phi_jp = self.potential_grid[self.cell_index(i, jp, k)];
        let phi_jm = self.potential_grid[self.cell_index(i, jm, k)];
        let phi_kp = self.potential_grid[self.cell_index(i, j, kp)];
        let phi_km = self.potential_grid[self.cell_index(i, j, km)];

        let inv_2h = T::one() / (T::from_f64(2.0) * self.cell_size);

        let force = Vec3::new(
            -(phi_ip - phi_im) * inv_2h,
            -(phi_jp - phi_jm) * inv_2h,
            -(phi_kp - phi_km) * inv_2h,
        );

        if self.force_mode == ForceMode::Lazy {
            self.force_grid[idx] = force;
            self.force_computed[idx] = true;
        }

        force
    }

    /// Phase 5: the CIC-weighted sum of the eight neighbouring grid
    /// forces at a body position.
    fn interpolate_force_cic(&mut self, position: Vec3<T>) -> Vec3<T> {
        let (i, j, k, fx, fy, fz) = self.grid_coordinates(position);
        let one = T::one();

        let mut force = Vec3::zero();

        for dk in 0..2_i64 {
            for dj in 0..2_i64 {
                for di in 0..2_i64 {
                    let gi = self.wrap(i + di);
                    let gj = self.wrap(j + dj);
                    let gk = self.wrap(k + dk);

                    let weight = (if di == 0 { one - fx } else { fx })
                        * (if dj == 0 { one - fy } else { fy })
                        * (if dk == 0 { one - fz } else { fz });

                    let grid_force = match self.force_mode {
                        ForceMode::Precomputed => self.force_grid[self.cell_index(gi, gj, gk)],
                        ForceMode::Lazy => self.force_at_grid_point(gi, gj, gk),
                    };

                    force += grid_force * weight;
                }
            }
        }

        force
    }

    /// Phase 6: kick-drift update of every body from its interpolated
    /// force.
    fn integrate_equations_of_motion(&mut self, bodies: &mut [Body<T>]) {
        for body in bodies {
            let force = self.interpolate_force_cic(body.position);
            let acceleration = force / body.mass;

            body.velocity += acceleration * self.dt;
            body.position += body.velocity * self.dt;
        }
    }
}

impl<T: Scalar> Simulator<T> for ParticleMeshSimulator<T> {
    fn dt(&self) -> T {
        self.dt
    }

    fn set_dt(&mut self, dt: T) {
        assert!(dt > T::zero(), "time step must be positive");
        self.dt = dt;
    }

    fn set_g(&mut self, g: T) {
        self.g = g;
    }

    fn current_time(&self) -> T {
        self.current_time
    }

    fn step(&mut self, system: &mut dyn System<T>) -> bool {
        if system.is_empty() {
            return false;
        }

        if self.auto_box_size {
            self.determine_simulation_box(system.bodies());
            self.auto_box_size = false;
        }

        self.out_of_bounds_count = 0;

        self.assign_masses(system.bodies());
        self.solve_poisson_equation();
        self.compute_forces();
        self.integrate_equations_of_motion(system.bodies_mut());

        if self.adaptive_box && self.out_of_bounds_count > system.len() / 4 {
            warn!(
                "adapting box size after {} out-of-bounds particles",
                self.out_of_bounds_count
            );
            self.determine_simulation_box(system.bodies());
        }

        self.current_time += self.dt;
        true
    }
}

fn min_scalar<T: Scalar>(a: T, b: T) -> T {
    if b < a {
        b
    } else {
        a
    }
}

fn max_scalar<T: Scalar>(a: T, b: T) -> T {
    if b > a {
        b
    } else {
        a
    }
}

/// The signed frequency of bin `i` on an `n`-point axis: bins above n/2
/// alias to negative frequencies.
fn signed_frequency<T: Scalar>(i: usize, n: usize) -> T {
    if i <= n / 2 {
        T::from_f64(i as f64)
    } else {
        T::from_f64(i as f64 - n as f64)
    }
}
