//! The simulator contract.

use crate::scalar::Scalar;
use crate::system::System;

/// Advances a [`System`] through time, one fixed step at a time.
///
/// A simulator owns its time step, gravitational constant and clock; the
/// system is passed into every call so the same simulator can serve several
/// configurations in turn. `step` is synchronous and CPU-bound with no
/// suspension points: long runs are cancelled by simply not calling it
/// again.
pub trait Simulator<T: Scalar> {
    /// The current time step.
    fn dt(&self) -> T;

    /// Sets the time step.
    ///
    /// # Panics
    ///
    /// Panics when `dt` is not strictly positive.
    fn set_dt(&mut self, dt: T);

    /// Sets the gravitational constant.
    fn set_g(&mut self, g: T);

    /// Simulated time accumulated over all successful steps.
    fn current_time(&self) -> T;

    /// Advances the system by one `dt`, mutating the bodies in place.
    ///
    /// Returns `false` when the simulation cannot proceed (for the
    /// particle-mesh solver: an empty body list).
    fn step(&mut self, system: &mut dyn System<T>) -> bool;

    /// How many steps amount to 10⁻² time units, the conventional display
    /// frame.
    fn steps_per_frame(&self) -> i32 {
        (1e-2 / self.dt().to_f64()).round() as i32
    }

    /// Runs up to `max_steps` steps, stopping early when a step fails or
    /// the system reports itself invalid. Returns the number of steps
    /// actually taken.
    fn run(&mut self, system: &mut dyn System<T>, max_steps: usize) -> usize {
        self.run_with(system, max_steps, &mut |_, _| {})
    }

    /// Like [`Simulator::run`], invoking `callback` with the system and the
    /// current time after every successful step.
    fn run_with(
        &mut self,
        system: &mut dyn System<T>,
        max_steps: usize,
        callback: &mut dyn FnMut(&dyn System<T>, T),
    ) -> usize {
        let mut steps = 0;

        while steps < max_steps {
            if !self.step(system) {
                break;
            }
            steps += 1;

            callback(&*system, self.current_time());

            if !system.is_valid() {
                break;
            }
        }

        steps
    }
}
