//! Decimal conversion.
//!
//! Output extracts one decimal digit at a time by repeated multiplication by
//! ten in full double-double precision, then rounds the final guard digit
//! with carry propagation. Input is the mirror image: digits accumulate as
//! `r = 10r + d` and the decimal point and exponent are applied at the end
//! through an exact power of ten.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::DoubleDouble;

/// Default number of significant decimal digits, enough to round-trip the
/// ~106-bit mantissa.
pub const DISPLAY_DIGITS: usize = 32;

/// Failure modes of [`DoubleDouble`]'s decimal parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseDoubleDoubleError {
    #[error("empty input")]
    Empty,
    #[error("no digits in input")]
    NoDigits,
    #[error("more than one decimal point")]
    DuplicatePoint,
    #[error("sign not at the start of the number")]
    MisplacedSign,
    #[error("malformed exponent")]
    BadExponent,
    #[error("unexpected character {0:?}")]
    UnexpectedChar(char),
}

impl DoubleDouble {
    /// Formats the value in scientific notation with `d` significant
    /// decimal digits.
    ///
    /// # Examples
    ///
    /// ```
    /// use doubledouble::DoubleDouble;
    ///
    /// assert_eq!(DoubleDouble::from(-0.5).to_string_with_digits(4), "-5.000E-1");
    /// assert_eq!(DoubleDouble::ZERO.to_string_with_digits(4), "0");
    /// ```
    pub fn to_string_with_digits(&self, d: usize) -> String {
        assert!(d >= 1, "at least one significant digit required");

        if self.hi() == 0.0 {
            return "0".to_string();
        }

        // One guard digit beyond the requested precision drives the rounding.
        let count = d + 1;
        let mut r = self.abs();
        let mut e = self.hi().abs().log10().floor() as i32;

        let p = DoubleDouble::from(10.0).powi(e);
        r /= p;
        if r >= 10.0 {
            r /= 10.0;
            e += 1;
        } else if r < 1.0 {
            r *= 10.0;
            e -= 1;
        }

        assert!(
            r < 10.0 && r >= 1.0,
            "DoubleDouble::to_string_with_digits: can't compute exponent"
        );

        let mut digits = vec![0_i32; count];
        for slot in digits.iter_mut() {
            *slot = r.hi() as i32;
            r = r - f64::from(*slot);
            r *= 10.0;
        }

        // Digit extraction can undershoot; borrow from the left.
        for i in (1..count).rev() {
            if digits[i] < 0 {
                digits[i - 1] -= 1;
                digits[i] += 10;
            }
        }

        assert!(
            digits[0] > 0,
            "DoubleDouble::to_string_with_digits: non-positive leading digit"
        );

        // Round away the guard digit.
        if digits[count - 1] >= 5 {
            digits[count - 2] += 1;

            let mut i = count - 2;
            while i > 0 && digits[i] >= 10 {
                digits[i] -= 10;
                i -= 1;
                digits[i] += 1;
            }
        }

        let mut s = String::with_capacity(count + 8);
        if self.hi() < 0.0 {
            s.push('-');
        }

        if digits[0] >= 10 {
            // Rounding carried into a new decade.
            s.push('1');
            s.push('.');
            s.push('0');
            e += 1;
        } else {
            s.push(char::from(b'0' + digits[0] as u8));
            s.push('.');
        }

        for &digit in &digits[1..count - 1] {
            s.push(char::from(b'0' + digit as u8));
        }

        s.push('E');
        s.push_str(&e.to_string());
        s
    }
}

impl fmt::Display for DoubleDouble {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_with_digits(DISPLAY_DIGITS))
    }
}

impl FromStr for DoubleDouble {
    type Err = ParseDoubleDoubleError;

    /// Parses `±digits[.digits][eE±digits]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use doubledouble::DoubleDouble;
    ///
    /// let x: DoubleDouble = "-125".parse().unwrap();
    /// assert_eq!(x, -125.0);
    ///
    /// assert!("12..5".parse::<DoubleDouble>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim_start_matches(' ');
        if s.is_empty() {
            return Err(ParseDoubleDoubleError::Empty);
        }

        let mut sign = 0_i32;
        let mut point: i32 = -1;
        let mut digit_count: i32 = 0;
        let mut exponent: i32 = 0;
        let mut r = DoubleDouble::ZERO;

        for (idx, ch) in s.char_indices() {
            match ch {
                '0'..='9' => {
                    r *= 10.0;
                    r += f64::from(ch as u8 - b'0');
                    digit_count += 1;
                }
                '.' => {
                    if point >= 0 {
                        return Err(ParseDoubleDoubleError::DuplicatePoint);
                    }
                    point = digit_count;
                }
                '+' | '-' => {
                    if sign != 0 || digit_count > 0 {
                        return Err(ParseDoubleDoubleError::MisplacedSign);
                    }
                    sign = if ch == '-' { -1 } else { 1 };
                }
                'e' | 'E' => {
                    exponent = s[idx + 1..]
                        .parse()
                        .map_err(|_| ParseDoubleDoubleError::BadExponent)?;
                    break;
                }
                _ => return Err(ParseDoubleDoubleError::UnexpectedChar(ch)),
            }
        }

        if digit_count == 0 {
            return Err(ParseDoubleDoubleError::NoDigits);
        }

        if point >= 0 {
            exponent -= digit_count - point;
        }

        if exponent != 0 {
            r *= DoubleDouble::from(10.0).powi(exponent);
        }

        Ok(if sign == -1 { -r } else { r })
    }
}
