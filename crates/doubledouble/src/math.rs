//! Square root, rounding and trigonometric functions.
//!
//! `sin`/`cos` reduce the argument modulo 2π, fold it into [0, π/4] and
//! evaluate a Taylor series there; `atan2` refines the binary-64 result with
//! one Newton step against the exact sine/cosine. Accuracy is limited by the
//! format itself (~10⁻³² relative) rather than by the series cutoffs.

use crate::DoubleDouble;

/// Relative cutoff for the sine Taylor series.
const SINCOS_THRESHOLD: f64 = 1.0e-34;

impl DoubleDouble {
    /// The absolute value.
    #[inline]
    pub fn abs(self) -> Self {
        if self.hi < 0.0 {
            -self
        } else {
            self
        }
    }

    /// The largest integer value not greater than `self`.
    ///
    /// When the head is already integral the tail still carries the
    /// fractional information, so it is floored and the pair renormalized.
    pub fn floor(self) -> Self {
        let hi = self.hi.floor();

        if hi == self.hi {
            let lo = self.lo.floor();
            return Self::exact_sum(hi, lo);
        }

        Self { hi, lo: 0.0 }
    }

    /// The smallest integer value not less than `self`.
    pub fn ceil(self) -> Self {
        let hi = self.hi.ceil();

        if hi == self.hi {
            let lo = self.lo.ceil();
            return Self::exact_sum(hi, lo);
        }

        Self { hi, lo: 0.0 }
    }

    /// Rounds toward zero.
    #[inline]
    pub fn trunc(self) -> Self {
        if self.hi >= 0.0 {
            self.floor()
        } else {
            self.ceil()
        }
    }

    /// Truncated division quotient and remainder.
    pub fn div_rem(self, rhs: Self) -> (Self, Self) {
        let n = (self / rhs).trunc();
        (n, self - n * rhs)
    }

    /// The square root, by Karp's method: one binary-64 reciprocal square
    /// root refined with a single correction in double-double.
    ///
    /// # Panics
    ///
    /// Panics for strictly negative arguments.
    ///
    /// # Examples
    ///
    /// ```
    /// use doubledouble::DoubleDouble;
    ///
    /// let r = DoubleDouble::from(2.0).sqrt();
    /// let residual = r.square() - 2.0;
    /// assert!(residual.to_f64().abs() < 1e-31);
    /// ```
    pub fn sqrt(self) -> Self {
        if self.is_zero() {
            return Self::ZERO;
        }

        assert!(
            !self.is_negative(),
            "DoubleDouble::sqrt: negative argument {}",
            self.hi
        );

        // sqrt(a) ≈ a*x + (a - (a*x)²) * x / 2  with  x = 1/sqrt(a.hi)
        let x = 1.0 / self.hi.sqrt();
        let ax = self.hi * x;
        Self::exact_sum(ax, (self - Self::exact_square(ax)).hi * (x * 0.5))
    }

    /// The cosine.
    ///
    /// The argument is reduced modulo 2π, folded into [0, π] by symmetry,
    /// into [0, π/2] with a sign flip and finally into [0, π/4] by the
    /// complementary-angle identity before the series is evaluated.
    pub fn cos(self) -> Self {
        if self.is_zero() {
            return Self::ONE;
        }

        let (_, mut t) = self.div_rem(Self::TAU);

        if t > Self::PI {
            t -= Self::TAU;
        } else if t < -Self::PI {
            t += Self::TAU;
        }

        if t.is_negative() {
            t = -t;
        }

        let mut negate = false;
        if t > Self::FRAC_PI_2 {
            t = Self::PI - t;
            negate = true;
        }

        let cos_t = if t > Self::FRAC_PI_4 {
            // cos t = sin(π/2 - t)
            let (sin_c, _) = sin_cos_taylor(Self::FRAC_PI_2 - t);
            sin_c
        } else {
            let (_, cos_t) = sin_cos_taylor(t);
            cos_t
        };

        if negate {
            -cos_t
        } else {
            cos_t
        }
    }

    /// The sine, via `sin a = cos(a - π/2)`.
    #[inline]
    pub fn sin(self) -> Self {
        (self - Self::FRAC_PI_2).cos()
    }

    /// The four-quadrant arctangent of `self / x`, with `self` the ordinate.
    ///
    /// Points on the axes and on the ±45° rays are answered from the π
    /// constants; everywhere else the binary-64 `atan2` estimate is refined
    /// with one Newton step on whichever of `sin z = y/r`, `cos z = x/r`
    /// has the better-conditioned derivative.
    ///
    /// # Panics
    ///
    /// Panics when both arguments are zero.
    pub fn atan2(self, x: Self) -> Self {
        let y = self;

        if x.is_zero() {
            assert!(!y.is_zero(), "DoubleDouble::atan2: both arguments zero");
            return if y.is_positive() {
                Self::FRAC_PI_2
            } else {
                -Self::FRAC_PI_2
            };
        } else if y.is_zero() {
            return if x.is_positive() { Self::ZERO } else { Self::PI };
        }

        if x == y {
            return if y.is_positive() {
                Self::FRAC_PI_4
            } else {
                -(Self::FRAC_PI_4 * 3.0)
            };
        }

        if x == -y {
            return if y.is_positive() {
                Self::FRAC_PI_4 * 3.0
            } else {
                -Self::FRAC_PI_4
            };
        }

        let r = (x.square() + y.square()).sqrt();
        let xx = x / r;
        let yy = y / r;

        let mut z = Self::from(y.to_f64().atan2(x.to_f64()));
        let (sin_z, cos_z) = sin_cos_taylor(z);

        if xx > yy {
            // z' = z + (sin z_exact - sin z) / cos z
            z += (yy - sin_z) / cos_z;
        } else {
            // z' = z - (cos z_exact - cos z) / sin z
            z -= (xx - cos_z) / sin_z;
        }

        z
    }
}

/// Taylor evaluation of sine on a folded argument, with cosine recovered as
/// √(1 - sin²); only valid where the cosine is non-negative.
fn sin_cos_taylor(a: DoubleDouble) -> (DoubleDouble, DoubleDouble) {
    if a.is_zero() {
        return (DoubleDouble::ZERO, DoubleDouble::ONE);
    }

    let thresh = SINCOS_THRESHOLD * a.abs();
    let minus_a_sqr = -a.square();
    let mut partial_sum = a;
    let mut power = a;
    let mut m = 1.0_f64;
    let mut denom = DoubleDouble::ONE;

    loop {
        power *= minus_a_sqr;
        m += 2.0;
        denom *= m * (m - 1.0);
        let term = power / denom;
        partial_sum += term;

        if term.abs() <= thresh {
            break;
        }
    }

    let sin_a = partial_sum;
    let cos_a = (1.0 - partial_sum.square()).sqrt();
    (sin_a, cos_a)
}
