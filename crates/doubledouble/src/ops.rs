//! Arithmetic operators.
//!
//! Mixed `DoubleDouble ∘ f64` overloads use the cheaper specialized
//! sequences (one error-free transform fewer than the full double-double
//! forms), matching the cost structure expected of the format.

use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign};

use crate::eft::{two_diff, two_prod, two_sum};
use crate::DoubleDouble;

/// Correction cutoff for the double-double division loop.
const DIV_CORRECTION_CUTOFF: f64 = 1e-42;

impl Neg for DoubleDouble {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self {
            hi: -self.hi,
            lo: -self.lo,
        }
    }
}

impl Add for DoubleDouble {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        let (s1, s2) = two_sum(self.hi, rhs.hi);
        let (t1, t2) = two_sum(self.lo, rhs.lo);
        let s2 = s2 + t1;
        let (s1, s2) = two_sum(s1, s2);
        let s2 = s2 + t2;
        let (hi, lo) = two_sum(s1, s2);
        Self { hi, lo }
    }
}

impl Add<f64> for DoubleDouble {
    type Output = Self;

    fn add(self, rhs: f64) -> Self {
        let (s1, s2) = two_sum(self.hi, rhs);
        let s2 = s2 + self.lo;
        let (hi, lo) = two_sum(s1, s2);
        Self { hi, lo }
    }
}

impl Add<DoubleDouble> for f64 {
    type Output = DoubleDouble;

    #[inline]
    fn add(self, rhs: DoubleDouble) -> DoubleDouble {
        rhs + self
    }
}

impl Sub for DoubleDouble {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        let (s1, s2) = two_diff(self.hi, rhs.hi);
        let (t1, t2) = two_diff(self.lo, rhs.lo);
        let s2 = s2 + t1;
        let (s1, s2) = two_sum(s1, s2);
        let s2 = s2 + t2;
        let (hi, lo) = two_sum(s1, s2);
        Self { hi, lo }
    }
}

impl Sub<f64> for DoubleDouble {
    type Output = Self;

    fn sub(self, rhs: f64) -> Self {
        let (s1, s2) = two_diff(self.hi, rhs);
        let s2 = s2 + self.lo;
        let (hi, lo) = two_sum(s1, s2);
        Self { hi, lo }
    }
}

impl Sub<DoubleDouble> for f64 {
    type Output = DoubleDouble;

    fn sub(self, rhs: DoubleDouble) -> DoubleDouble {
        let (s1, s2) = two_diff(self, rhs.hi);
        let s2 = s2 - rhs.lo;
        let (hi, lo) = two_sum(s1, s2);
        DoubleDouble { hi, lo }
    }
}

impl Mul for DoubleDouble {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let (p1, p2) = two_prod(self.hi, rhs.hi);
        let p2 = p2 + self.hi * rhs.lo;
        let p2 = p2 + self.lo * rhs.hi;
        let (hi, lo) = two_sum(p1, p2);
        Self { hi, lo }
    }
}

impl Mul<f64> for DoubleDouble {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        let (p1, p2) = two_prod(self.hi, rhs);
        let p2 = p2 + self.lo * rhs;
        let (hi, lo) = two_sum(p1, p2);
        Self { hi, lo }
    }
}

impl Mul<DoubleDouble> for f64 {
    type Output = DoubleDouble;

    #[inline]
    fn mul(self, rhs: DoubleDouble) -> DoubleDouble {
        rhs * self
    }
}

impl Div<f64> for DoubleDouble {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        let q1 = self.hi / rhs;

        // (s, e) = self - q1 * rhs, exactly
        let (p1, p2) = two_prod(q1, rhs);
        let (s, e) = two_diff(self.hi, p1);
        let e = e + self.lo;
        let e = e - p2;

        let q2 = (s + e) / rhs;

        let (hi, lo) = two_sum(q1, q2);
        Self { hi, lo }
    }
}

impl Div for DoubleDouble {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        let q1 = self.hi / rhs.hi;
        let mut r = self - q1 * rhs;

        let q2 = r.hi / rhs.hi;
        r -= q2 * rhs;

        let (q1, q2) = two_sum(q1, q2);
        let mut q3 = r.hi / rhs.hi;
        let mut t = DoubleDouble { hi: q1, lo: q2 } + q3;

        while q3 > DIV_CORRECTION_CUTOFF {
            r -= q3 * rhs;
            q3 = r.hi / rhs.hi;
            t += q3;
        }

        t
    }
}

impl Div<DoubleDouble> for f64 {
    type Output = DoubleDouble;

    #[inline]
    fn div(self, rhs: DoubleDouble) -> DoubleDouble {
        DoubleDouble::from(self) / rhs
    }
}

impl Rem for DoubleDouble {
    type Output = Self;

    /// Truncated remainder: `self - trunc(self / rhs) * rhs`.
    fn rem(self, rhs: Self) -> Self {
        let n = (self / rhs).trunc();
        self - n * rhs
    }
}

impl AddAssign for DoubleDouble {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl AddAssign<f64> for DoubleDouble {
    #[inline]
    fn add_assign(&mut self, rhs: f64) {
        *self = *self + rhs;
    }
}

impl SubAssign for DoubleDouble {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl SubAssign<f64> for DoubleDouble {
    #[inline]
    fn sub_assign(&mut self, rhs: f64) {
        *self = *self - rhs;
    }
}

impl MulAssign for DoubleDouble {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl MulAssign<f64> for DoubleDouble {
    #[inline]
    fn mul_assign(&mut self, rhs: f64) {
        *self = *self * rhs;
    }
}

impl DivAssign for DoubleDouble {
    #[inline]
    fn div_assign(&mut self, rhs: Self) {
        *self = *self / rhs;
    }
}

impl DivAssign<f64> for DoubleDouble {
    #[inline]
    fn div_assign(&mut self, rhs: f64) {
        *self = *self / rhs;
    }
}

impl RemAssign for DoubleDouble {
    #[inline]
    fn rem_assign(&mut self, rhs: Self) {
        *self = *self % rhs;
    }
}

impl DoubleDouble {
    /// The reciprocal `1 / self`.
    #[inline]
    pub fn recip(self) -> Self {
        1.0 / self
    }

    /// The square `self * self`, one cross term cheaper than `self * self`.
    pub fn square(self) -> Self {
        let (p1, p2) = crate::eft::two_square(self.hi);
        let p2 = p2 + 2.0 * self.hi * self.lo;
        let p2 = p2 + self.lo * self.lo;
        let (hi, lo) = two_sum(p1, p2);
        Self { hi, lo }
    }

    /// Integer power by binary exponentiation; negative exponents invert.
    ///
    /// # Panics
    ///
    /// Panics on the indeterminate form `0⁰`.
    ///
    /// # Examples
    ///
    /// ```
    /// use doubledouble::DoubleDouble;
    ///
    /// assert_eq!(DoubleDouble::from(2.0).powi(10), 1024.0);
    /// assert_eq!(DoubleDouble::from(2.0).powi(-2), 0.25);
    /// ```
    pub fn powi(self, n: i32) -> Self {
        if n == 0 {
            assert!(!self.is_zero(), "DoubleDouble::powi: 0^0 is undefined");
            return Self::ONE;
        }

        let mut r = self;
        let mut s = Self::ONE;
        let mut m = n.unsigned_abs();

        if m > 1 {
            while m > 0 {
                if m % 2 == 1 {
                    s *= r;
                }
                m /= 2;
                if m > 0 {
                    r = r.square();
                }
            }
        } else {
            s = r;
        }

        if n < 0 {
            return s.recip();
        }
        s
    }
}
