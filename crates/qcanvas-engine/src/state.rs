//! State-vector representation and the matrix application primitive.

use ndarray::Array1;
use num_complex::Complex64;

use crate::complex::{self, ONE, ZERO};
use crate::error::{EngineError, EngineResult};
use crate::matrix::DenseMatrix;

/// An n-qubit pure state as `2^n` complex amplitudes.
///
/// Index `i` read as an n-bit number is the basis state, with qubit 0 in the
/// most significant bit.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantumState {
    amplitudes: Array1<Complex64>,
    num_qubits: usize,
}

impl QuantumState {
    /// |0...0⟩ on `num_qubits` wires.
    pub fn zero(num_qubits: usize) -> Self {
        Self::basis(num_qubits, 0)
    }

    /// The computational basis state `index`, taken modulo `2^n`.
    pub fn basis(num_qubits: usize, index: usize) -> Self {
        let size = 1 << num_qubits;
        let mut amplitudes = Array1::from_elem(size, ZERO);
        amplitudes[index % size] = ONE;
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Wrap an explicit amplitude vector. The length must be `2^n` with `n >= 1`.
    pub fn from_amplitudes(amplitudes: Vec<Complex64>) -> EngineResult<Self> {
        let len = amplitudes.len();
        if len < 2 || !len.is_power_of_two() {
            return Err(EngineError::InvalidStateLength(len));
        }
        Ok(Self {
            amplitudes: Array1::from_vec(amplitudes),
            num_qubits: len.trailing_zeros() as usize,
        })
    }

    /// Number of wires.
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of amplitudes (`2^n`).
    #[inline]
    pub fn len(&self) -> usize {
        self.amplitudes.len()
    }

    /// Always false; a state has at least two amplitudes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.amplitudes.is_empty()
    }

    /// Amplitude of basis state `index`.
    #[inline]
    pub fn amplitude(&self, index: usize) -> Complex64 {
        self.amplitudes[index]
    }

    /// All amplitudes in basis order.
    pub fn amplitudes(&self) -> &Array1<Complex64> {
        &self.amplitudes
    }

    /// `Σ |a_i|²`; 1 for any state reachable from |0...0⟩ by unitaries.
    pub fn norm_squared(&self) -> f64 {
        self.amplitudes
            .iter()
            .map(|a| complex::magnitude_squared(*a))
            .sum()
    }

    /// Replace the amplitudes with `M · self`.
    ///
    /// This is the only way the evaluator changes a state.
    pub fn apply(&mut self, matrix: &DenseMatrix) -> EngineResult<()> {
        self.amplitudes = apply_matrix(matrix, &self.amplitudes)?;
        Ok(())
    }

    /// Kronecker product `self ⊗ other`; `self` supplies the high-order bits.
    pub fn tensor_product(&self, other: &QuantumState) -> QuantumState {
        let amplitudes = self
            .amplitudes
            .iter()
            .flat_map(|a| {
                other
                    .amplitudes
                    .iter()
                    .map(move |b| complex::multiply(*a, *b))
            })
            .collect::<Array1<_>>();
        QuantumState {
            amplitudes,
            num_qubits: self.num_qubits + other.num_qubits,
        }
    }

    /// Entry-wise comparison within `tolerance`.
    pub fn approx_eq(&self, other: &QuantumState, tolerance: f64) -> bool {
        self.len() == other.len()
            && self
                .amplitudes
                .iter()
                .zip(other.amplitudes.iter())
                .all(|(a, b)| (a - b).norm() < tolerance)
    }
}

/// Matrix-vector product `result[i] = Σ_j M[i][j] * state[j]`.
///
/// Fails with [`EngineError::DimensionMismatch`] unless `M` is square with side
/// equal to the state length.
pub fn apply_matrix(
    matrix: &DenseMatrix,
    state: &Array1<Complex64>,
) -> EngineResult<Array1<Complex64>> {
    let (rows, cols) = matrix.dim();
    let state_len = state.len();
    if rows != state_len || cols != state_len {
        return Err(EngineError::DimensionMismatch {
            rows,
            cols,
            state_len,
        });
    }
    Ok(matrix.dot(state))
}

/// Free-standing form of [`QuantumState::tensor_product`].
pub fn tensor_product(first: &QuantumState, second: &QuantumState) -> QuantumState {
    first.tensor_product(second)
}
