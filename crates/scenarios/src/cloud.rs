//! Seeded random particle clouds, the natural particle-mesh workload.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaChaRng;

use nbody::{Body, Scalar, System, Vec3};

/// `n` equal masses scattered uniformly through a cube, starting cold.
///
/// Positions are drawn from an explicitly seeded generator, so a cloud is
/// reproducible from its seed alone. A cold cloud collapses
/// under self-gravity, which exercises every phase of the particle-mesh
/// solver including box adaptation once infalling bodies overshoot.
pub struct RandomCloudSystem<T: Scalar> {
    bodies: Vec<Body<T>>,
    count: usize,
    half_extent: f64,
    body_mass: f64,
    seed: u64,
}

impl<T: Scalar> RandomCloudSystem<T> {
    /// A cloud of `count` unit masses in the cube [-1, 1]³.
    pub fn new(count: usize, seed: u64) -> Self {
        Self {
            bodies: Vec::new(),
            count,
            half_extent: 1.0,
            body_mass: 1.0,
            seed,
        }
    }

    /// Overrides the cube half-extent and the per-body mass.
    pub fn with_extent_and_mass(mut self, half_extent: f64, body_mass: f64) -> Self {
        self.half_extent = half_extent;
        self.body_mass = body_mass;
        self
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl<T: Scalar> System<T> for RandomCloudSystem<T> {
    fn bodies(&self) -> &[Body<T>] {
        &self.bodies
    }

    fn bodies_mut(&mut self) -> &mut [Body<T>] {
        &mut self.bodies
    }

    fn generate(&mut self) {
        self.bodies.clear();

        let mut rng = ChaChaRng::seed_from_u64(self.seed);
        let h = self.half_extent;

        for i in 0..self.count {
            let position = Vec3::from_f64(
                rng.gen_range(-h..h),
                rng.gen_range(-h..h),
                rng.gen_range(-h..h),
            );

            self.bodies.push(Body::new(
                T::from_f64(self.body_mass),
                position,
                Vec3::zero(),
                format!("Particle {}", i + 1),
            ));
        }
    }
}
