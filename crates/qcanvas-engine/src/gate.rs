//! Elementary gates and the fixed 2x2 operator catalog.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_1_SQRT_2;
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::complex::{ONE, ZERO};
use crate::error::{EngineError, EngineResult};

/// The single-qubit operators a circuit can place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ElementaryGate {
    /// Pauli-X (bit flip).
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z (phase flip).
    Z,
    /// Hadamard.
    H,
    /// S gate (sqrt(Z)).
    S,
    /// T gate (fourth root of Z).
    T,
}

impl ElementaryGate {
    /// Every catalog entry, in palette order.
    pub const ALL: [ElementaryGate; 6] = [
        ElementaryGate::X,
        ElementaryGate::Y,
        ElementaryGate::Z,
        ElementaryGate::H,
        ElementaryGate::S,
        ElementaryGate::T,
    ];

    /// Symbol used in circuit descriptions.
    #[inline]
    pub fn symbol(self) -> &'static str {
        match self {
            ElementaryGate::X => "X",
            ElementaryGate::Y => "Y",
            ElementaryGate::Z => "Z",
            ElementaryGate::H => "H",
            ElementaryGate::S => "S",
            ElementaryGate::T => "T",
        }
    }

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            ElementaryGate::X => "Pauli-X",
            ElementaryGate::Y => "Pauli-Y",
            ElementaryGate::Z => "Pauli-Z",
            ElementaryGate::H => "Hadamard",
            ElementaryGate::S => "Phase (S)",
            ElementaryGate::T => "pi/8 (T)",
        }
    }

    /// The gate's 2x2 unitary, read from the shared catalog.
    #[inline]
    pub fn matrix(self) -> Unitary2x2 {
        CATALOG[self as usize]
    }
}

impl fmt::Display for ElementaryGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for ElementaryGate {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "X" => Ok(ElementaryGate::X),
            "Y" => Ok(ElementaryGate::Y),
            "Z" => Ok(ElementaryGate::Z),
            "H" => Ok(ElementaryGate::H),
            "S" => Ok(ElementaryGate::S),
            "T" => Ok(ElementaryGate::T),
            _ => Err(EngineError::UnsupportedGate(s.to_string())),
        }
    }
}

/// Operator table indexed by `ElementaryGate as usize`. Built once, read-only.
static CATALOG: LazyLock<[Unitary2x2; 6]> = LazyLock::new(|| {
    [
        Unitary2x2::x(),
        Unitary2x2::y(),
        Unitary2x2::z(),
        Unitary2x2::h(),
        Unitary2x2::s(),
        Unitary2x2::t(),
    ]
});

/// Look up the operator for a gate symbol.
///
/// Returns [`EngineError::UnsupportedGate`] for anything outside the catalog.
pub fn lookup(symbol: &str) -> EngineResult<Unitary2x2> {
    symbol.parse::<ElementaryGate>().map(ElementaryGate::matrix)
}

/// A 2x2 matrix in row-major order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unitary2x2 {
    /// The matrix elements: `[[a, b], [c, d]]` stored as `[a, b, c, d]`.
    pub data: [Complex64; 4],
}

impl Unitary2x2 {
    /// Create a matrix from its four entries.
    pub const fn new(a: Complex64, b: Complex64, c: Complex64, d: Complex64) -> Self {
        Self { data: [a, b, c, d] }
    }

    /// Identity.
    pub const fn identity() -> Self {
        Self::new(ONE, ZERO, ZERO, ONE)
    }

    /// `[[0, 1], [1, 0]]`.
    pub const fn x() -> Self {
        Self::new(ZERO, ONE, ONE, ZERO)
    }

    /// `[[0, -i], [i, 0]]`.
    pub const fn y() -> Self {
        Self::new(
            ZERO,
            Complex64::new(0.0, -1.0),
            Complex64::new(0.0, 1.0),
            ZERO,
        )
    }

    /// `[[1, 0], [0, -1]]`.
    pub const fn z() -> Self {
        Self::new(ONE, ZERO, ZERO, Complex64::new(-1.0, 0.0))
    }

    /// `(1/sqrt(2)) [[1, 1], [1, -1]]`.
    pub const fn h() -> Self {
        let s = Complex64::new(FRAC_1_SQRT_2, 0.0);
        Self::new(s, s, s, Complex64::new(-FRAC_1_SQRT_2, 0.0))
    }

    /// `[[1, 0], [0, i]]`.
    pub const fn s() -> Self {
        Self::new(ONE, ZERO, ZERO, Complex64::new(0.0, 1.0))
    }

    /// `[[1, 0], [0, e^(i pi/4)]]`.
    pub fn t() -> Self {
        Self::new(ONE, ZERO, ZERO, Complex64::from_polar(1.0, PI / 4.0))
    }

    /// Entry at `(row, col)`; both indices are 0 or 1.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Complex64 {
        self.data[row * 2 + col]
    }

    /// `self * other`.
    #[allow(clippy::many_single_char_names)]
    pub fn mul(&self, other: &Self) -> Self {
        let [a, b, c, d] = self.data;
        let [e, f, g, h] = other.data;
        Self::new(a * e + b * g, a * f + b * h, c * e + d * g, c * f + d * h)
    }

    /// Conjugate transpose.
    pub fn dagger(&self) -> Self {
        Self::new(
            self.data[0].conj(),
            self.data[2].conj(),
            self.data[1].conj(),
            self.data[3].conj(),
        )
    }

    /// True when `U U† = I` within `tolerance`.
    pub fn is_unitary(&self, tolerance: f64) -> bool {
        let product = self.mul(&self.dagger());
        product
            .data
            .iter()
            .zip(Self::identity().data.iter())
            .all(|(got, want)| (got - want).norm() < tolerance)
    }
}

impl fmt::Display for Unitary2x2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cell = |z: Complex64| format!("{:>6.3}{:+.3}i", z.re, z.im);
        writeln!(f, "[{}  {}]", cell(self.data[0]), cell(self.data[1]))?;
        write!(f, "[{}  {}]", cell(self.data[2]), cell(self.data[3]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_catalog_is_unitary() {
        for gate in ElementaryGate::ALL {
            assert!(gate.matrix().is_unitary(EPSILON), "{gate} is not unitary");
        }
    }

    #[test]
    fn test_lookup_by_symbol() {
        assert_eq!(lookup("X").unwrap(), Unitary2x2::x());
        assert_eq!(lookup("h").unwrap(), Unitary2x2::h());
        assert_eq!(" T ".parse::<ElementaryGate>().unwrap(), ElementaryGate::T);
    }

    #[test]
    fn test_lookup_unknown_symbol() {
        let err = lookup("CCZ").unwrap_err();
        assert!(matches!(err, EngineError::UnsupportedGate(s) if s == "CCZ"));
    }

    #[test]
    fn test_t_squared_is_s() {
        let t = Unitary2x2::t();
        let tt = t.mul(&t);
        for (got, want) in tt.data.iter().zip(Unitary2x2::s().data.iter()) {
            assert!((got - want).norm() < EPSILON);
        }
    }

    #[test]
    fn test_z_is_involution() {
        let zz = Unitary2x2::z().mul(&Unitary2x2::z());
        assert_eq!(zz, Unitary2x2::identity());
    }

    #[test]
    fn test_serde_symbol() {
        let json = serde_json::to_string(&ElementaryGate::S).unwrap();
        assert_eq!(json, "\"S\"");
        let gate: ElementaryGate = serde_json::from_str("\"Y\"").unwrap();
        assert_eq!(gate, ElementaryGate::Y);
    }
}
