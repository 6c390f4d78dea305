//! The arithmetic protocol shared by every scalar the simulator runs on.
//!
//! The whole crate is generic over [`Scalar`] so that the same integrators
//! serve both plain `f64` (the particle-mesh path, where throughput matters)
//! and [`DoubleDouble`] (the direct path, where century-scale error growth
//! matters). `f64` conversions are part of the protocol because the FFT
//! stage always runs in binary-64, whatever scalar the bodies carry.

use std::fmt::{Debug, Display};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use doubledouble::DoubleDouble;

/// A real scalar the simulator can integrate with.
pub trait Scalar:
    Copy
    + Debug
    + Display
    + Default
    + PartialEq
    + PartialOrd
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
    + DivAssign
{
    /// Converts from binary-64; the anchor for all literal constants.
    fn from_f64(value: f64) -> Self;

    /// The nearest binary-64 value.
    fn to_f64(self) -> f64;

    /// Unit round-off of the format.
    fn epsilon() -> Self;

    /// The circle constant at full format precision.
    fn pi() -> Self;

    fn sqrt(self) -> Self;

    fn abs(self) -> Self;

    fn floor(self) -> Self;

    fn sin(self) -> Self;

    fn cos(self) -> Self;

    /// Four-quadrant arctangent, `self` being the ordinate.
    fn atan2(self, x: Self) -> Self;

    /// Integer power.
    fn powi(self, n: i32) -> Self;

    fn is_finite(self) -> bool;

    #[inline]
    fn zero() -> Self {
        Self::from_f64(0.0)
    }

    #[inline]
    fn one() -> Self {
        Self::from_f64(1.0)
    }
}

impl Scalar for f64 {
    #[inline]
    fn from_f64(value: f64) -> Self {
        value
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self
    }

    #[inline]
    fn epsilon() -> Self {
        f64::EPSILON
    }

    #[inline]
    fn pi() -> Self {
        std::f64::consts::PI
    }

    #[inline]
    fn sqrt(self) -> Self {
        f64::sqrt(self)
    }

    #[inline]
    fn abs(self) -> Self {
        f64::abs(self)
    }

    #[inline]
    fn floor(self) -> Self {
        f64::floor(self)
    }

    #[inline]
    fn sin(self) -> Self {
        f64::sin(self)
    }

    #[inline]
    fn cos(self) -> Self {
        f64::cos(self)
    }

    #[inline]
    fn atan2(self, x: Self) -> Self {
        f64::atan2(self, x)
    }

    #[inline]
    fn powi(self, n: i32) -> Self {
        f64::powi(self, n)
    }

    #[inline]
    fn is_finite(self) -> bool {
        f64::is_finite(self)
    }
}

impl Scalar for DoubleDouble {
    #[inline]
    fn from_f64(value: f64) -> Self {
        DoubleDouble::from(value)
    }

    #[inline]
    fn to_f64(self) -> f64 {
        DoubleDouble::to_f64(self)
    }

    #[inline]
    fn epsilon() -> Self {
        DoubleDouble::from(DoubleDouble::EPSILON)
    }

    #[inline]
    fn pi() -> Self {
        DoubleDouble::PI
    }

    #[inline]
    fn sqrt(self) -> Self {
        DoubleDouble::sqrt(self)
    }

    #[inline]
    fn abs(self) -> Self {
        DoubleDouble::abs(self)
    }

    #[inline]
    fn floor(self) -> Self {
        DoubleDouble::floor(self)
    }

    #[inline]
    fn sin(self) -> Self {
        DoubleDouble::sin(self)
    }

    #[inline]
    fn cos(self) -> Self {
        DoubleDouble::cos(self)
    }

    #[inline]
    fn atan2(self, x: Self) -> Self {
        DoubleDouble::atan2(self, x)
    }

    #[inline]
    fn powi(self, n: i32) -> Self {
        DoubleDouble::powi(self, n)
    }

    #[inline]
    fn is_finite(self) -> bool {
        DoubleDouble::is_finite(self)
    }
}
