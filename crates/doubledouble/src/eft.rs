//! Error-free transforms.
//!
//! The building blocks of double-double arithmetic: each function returns a
//! pair `(result, error)` whose exact sum equals the exact result of the
//! underlying operation on binary-64 inputs. The formulations are the
//! classical Dekker/Knuth ones and must not be reassociated; in particular
//! they rely on strict IEEE-754 rounding of every intermediate.

/// Dekker's splitter, 2²⁷ + 1.
pub const SPLITTER: f64 = 134_217_729.0;

/// Computes `s = fl(a + b)` and the exact error `e = (a + b) - s`.
#[inline]
pub fn two_sum(a: f64, b: f64) -> (f64, f64) {
    let s = a + b;
    let bb = s - a;
    let err = (a - (s - bb)) + (b - bb);
    (s, err)
}

/// Like [`two_sum`] but assumes `|a| >= |b|`, saving two operations.
#[inline]
pub fn quick_two_sum(a: f64, b: f64) -> (f64, f64) {
    let s = a + b;
    let err = b - (s - a);
    (s, err)
}

/// Computes `s = fl(a - b)` and the exact error `e = (a - b) - s`.
#[inline]
pub fn two_diff(a: f64, b: f64) -> (f64, f64) {
    let s = a - b;
    let bb = s - a;
    let err = (a - (s - bb)) - (b + bb);
    (s, err)
}

/// Splits `a` into a 26-bit head and tail with `head + tail == a` exactly.
#[inline]
pub fn split(a: f64) -> (f64, f64) {
    let temp = SPLITTER * a;
    let hi = temp - (temp - a);
    let lo = a - hi;
    (hi, lo)
}

/// Computes `p = fl(a * b)` and the exact error `e = a * b - p`.
#[inline]
pub fn two_prod(a: f64, b: f64) -> (f64, f64) {
    let p = a * b;
    let (a_hi, a_lo) = split(a);
    let (b_hi, b_lo) = split(b);
    let err = ((a_hi * b_hi - p) + a_hi * b_lo + a_lo * b_hi) + a_lo * b_lo;
    (p, err)
}

/// Computes `p = fl(a * a)` and the exact error `e = a² - p`.
#[inline]
pub fn two_square(a: f64) -> (f64, f64) {
    let q = a * a;
    let (hi, lo) = split(a);
    let err = ((hi * hi - q) + 2.0 * hi * lo) + lo * lo;
    (q, err)
}
