//! Scalar complex arithmetic over amplitudes.
//!
//! Amplitudes are plain [`Complex64`] values. The named functions here are the
//! arithmetic vocabulary used by the rest of the engine; they are total and
//! never fail.

use num_complex::Complex64;

/// Complex zero.
pub const ZERO: Complex64 = Complex64::new(0.0, 0.0);

/// Complex one.
pub const ONE: Complex64 = Complex64::new(1.0, 0.0);

/// Imaginary unit.
pub const I: Complex64 = Complex64::new(0.0, 1.0);

/// `a + b`.
#[inline]
pub fn add(a: Complex64, b: Complex64) -> Complex64 {
    a + b
}

/// `a * b` = `(ac - bd, ad + bc)`.
#[inline]
pub fn multiply(a: Complex64, b: Complex64) -> Complex64 {
    Complex64::new(a.re * b.re - a.im * b.im, a.re * b.im + a.im * b.re)
}

/// Multiply both components by a real factor.
#[inline]
pub fn scale(z: Complex64, k: f64) -> Complex64 {
    Complex64::new(z.re * k, z.im * k)
}

/// Complex conjugate.
#[inline]
pub fn conjugate(z: Complex64) -> Complex64 {
    Complex64::new(z.re, -z.im)
}

/// `|z|`.
#[inline]
pub fn magnitude(z: Complex64) -> f64 {
    magnitude_squared(z).sqrt()
}

/// `|z|²`. Used for every probability so no square root is taken.
#[inline]
pub fn magnitude_squared(z: Complex64) -> f64 {
    z.re * z.re + z.im * z.im
}

/// True when both components are within `tolerance` of zero.
#[inline]
pub fn is_negligible(z: Complex64, tolerance: f64) -> bool {
    z.re.abs() < tolerance && z.im.abs() < tolerance
}

/// True when the value is exactly zero.
#[inline]
pub fn is_exact_zero(z: Complex64) -> bool {
    z.re == 0.0 && z.im == 0.0
}

/// Render an amplitude as `(a + bi)`.
///
/// Components smaller than `tolerance` are dropped; a pure `±1` imaginary part
/// is written as `i` / `-i`. A fully negligible value renders as `(0)`.
pub fn format_complex(z: Complex64, precision: usize, tolerance: f64) -> String {
    let re = if z.re.abs() < tolerance { 0.0 } else { z.re };
    let im = if z.im.abs() < tolerance { 0.0 } else { z.im };

    if re == 0.0 && im == 0.0 {
        return "(0)".to_string();
    }

    let mut out = String::new();
    if re != 0.0 {
        out.push_str(&format!("{re:.precision$}"));
    }

    if im != 0.0 {
        let unit = (im.abs() - 1.0).abs() < tolerance;
        let sign = match (re == 0.0, im < 0.0) {
            (true, true) => "-",
            (true, false) => "",
            (false, true) => " - ",
            (false, false) => " + ",
        };
        out.push_str(sign);
        if unit {
            out.push('i');
        } else {
            out.push_str(&format!("{:.precision$}i", im.abs()));
        }
    }

    format!("({out})")
}
