//! Particle-mesh machinery: the 3D real FFT and the Poisson-solver
//! simulator built on it.

pub mod fft;
pub mod particle_mesh;

#[cfg(test)]
mod fft_test;

pub use fft::Fft3;
pub use particle_mesh::{ForceMode, ParticleMeshSimulator};
