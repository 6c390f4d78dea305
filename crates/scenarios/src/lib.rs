//! Seed configurations for the N-body simulation core.
//!
//! Every system here implements [`nbody::System`]: it populates a body list
//! from a handful of seed parameters, validates its own conserved-quantity
//! invariants after each step, and reports its total mechanical energy for
//! conservation plots. The two-body system doubles as a validation oracle,
//! carrying the closed-form Kepler solution of its own orbit.

pub mod catalog;
pub mod cloud;
pub mod kepler;
pub mod ring;
pub mod solar;
pub mod three_body;
pub mod two_body;

#[cfg(test)]
mod catalog_test;
#[cfg(test)]
mod three_body_test;

pub use catalog::{Belt, BeltSummary, CatalogError, MinorBody};
pub use cloud::RandomCloudSystem;
pub use kepler::OrbitalElements;
pub use ring::RingSystem;
pub use solar::SolarSystem;
pub use three_body::ThreeBodySystem;
pub use two_body::TwoBodySystem;
