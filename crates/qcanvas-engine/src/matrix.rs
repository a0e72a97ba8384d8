//! Dense full-system operators.
//!
//! Every operator the evaluator applies is materialised as a
//! `2^n x 2^n` [`DenseMatrix`]. Construction is O(4^n) in time and memory,
//! which is the scalability ceiling of the engine; see
//! [`SimulatorConfig::max_qubits`](crate::SimulatorConfig::max_qubits).

use ndarray::Array2;
use num_complex::Complex64;

use crate::complex::{ONE, ZERO};

/// A square complex matrix indexed `[row, col]`.
pub type DenseMatrix = Array2<Complex64>;

/// Position of `qubit`'s bit inside a basis index.
///
/// Qubit 0 is the most significant bit, so the position is `n - 1 - qubit`.
#[inline]
pub fn bit_position(qubit: usize, num_qubits: usize) -> usize {
    num_qubits - 1 - qubit
}

/// Single-bit mask for `qubit`.
#[inline]
pub fn qubit_mask(qubit: usize, num_qubits: usize) -> usize {
    1 << bit_position(qubit, num_qubits)
}

/// Side length of the operator for `num_qubits` wires.
#[inline]
pub fn dimension(num_qubits: usize) -> usize {
    1 << num_qubits
}

/// `dim x dim` identity.
pub fn identity(dim: usize) -> DenseMatrix {
    let mut m = Array2::from_elem((dim, dim), ZERO);
    for i in 0..dim {
        m[[i, i]] = ONE;
    }
    m
}

/// Conjugate transpose.
pub fn dagger(m: &DenseMatrix) -> DenseMatrix {
    m.t().mapv(|z| z.conj())
}

/// True when the matrix is square and `M M† = I` within `tolerance`.
pub fn is_unitary(m: &DenseMatrix, tolerance: f64) -> bool {
    let (rows, cols) = m.dim();
    if rows != cols {
        return false;
    }
    let product = m.dot(&dagger(m));
    product
        .indexed_iter()
        .all(|((i, j), z)| {
            let want = if i == j { ONE } else { ZERO };
            (z - want).norm() < tolerance
        })
}

/// Maximum entry-wise distance between two equally shaped matrices.
pub fn max_abs_diff(a: &DenseMatrix, b: &DenseMatrix) -> f64 {
    if a.dim() != b.dim() {
        return f64::INFINITY;
    }
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).norm())
        .fold(0.0, f64::max)
}
