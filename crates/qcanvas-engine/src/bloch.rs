//! Reduced single-qubit Bloch vectors.

use serde::{Deserialize, Serialize};

use crate::complex;
use crate::matrix::qubit_mask;
use crate::state::QuantumState;

/// Bloch vector of one qubit's reduced density matrix.
///
/// `magnitude` is 1 for a qubit in a pure product state and below 1 when the
/// qubit is entangled with the rest of the register.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlochVector {
    /// Wire index, or `None` for an aggregate over several wires.
    pub qubit: Option<usize>,
    /// ⟨X⟩.
    pub x: f64,
    /// ⟨Y⟩.
    pub y: f64,
    /// ⟨Z⟩.
    pub z: f64,
    /// Vector length, clamped to [0, 1].
    pub magnitude: f64,
}

impl BlochVector {
    fn new(qubit: Option<usize>, x: f64, y: f64, z: f64) -> Self {
        let magnitude = (x * x + y * y + z * z).sqrt().clamp(0.0, 1.0);
        Self {
            qubit,
            x,
            y,
            z,
            magnitude,
        }
    }

    /// |0⟩, the north pole.
    pub fn north_pole() -> Self {
        Self::new(None, 0.0, 0.0, 1.0)
    }
}

/// Bloch vector of `qubit`, tracing out every other wire.
///
/// Pairs each basis index with its partner that differs only in `qubit` and
/// accumulates `p0`, `p1` and the coherence `conj(a0) * a1`.
pub fn bloch_vector(state: &QuantumState, qubit: usize) -> BlochVector {
    let mask = qubit_mask(qubit, state.num_qubits());
    let amplitudes = state.amplitudes();

    let (mut p0, mut p1) = (0.0, 0.0);
    let (mut cross_re, mut cross_im) = (0.0, 0.0);
    for i in (0..state.len()).filter(|i| i & mask == 0) {
        let a0 = amplitudes[i];
        let a1 = amplitudes[i | mask];
        p0 += complex::magnitude_squared(a0);
        p1 += complex::magnitude_squared(a1);
        let coherence = complex::multiply(complex::conjugate(a0), a1);
        cross_re += coherence.re;
        cross_im += coherence.im;
    }

    BlochVector::new(Some(qubit), 2.0 * cross_re, 2.0 * cross_im, p0 - p1)
}

/// Bloch vector for every wire, in wire order.
pub fn bloch_vectors(state: &QuantumState) -> Vec<BlochVector> {
    (0..state.num_qubits())
        .map(|q| bloch_vector(state, q))
        .collect()
}

/// Component-wise mean of several vectors; the north pole when empty.
pub fn overall_bloch_vector(vectors: &[BlochVector]) -> BlochVector {
    if vectors.is_empty() {
        return BlochVector::north_pole();
    }
    let n = vectors.len() as f64;
    let (x, y, z) = vectors.iter().fold((0.0, 0.0, 0.0), |(x, y, z), v| {
        (x + v.x, y + v.y, z + v.z)
    });
    BlochVector::new(None, x / n, y / n, z / n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;
    use std::f64::consts::FRAC_1_SQRT_2;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_basis_states_sit_on_the_poles() {
        let state = QuantumState::basis(2, 0b01);
        let q0 = bloch_vector(&state, 0);
        let q1 = bloch_vector(&state, 1);
        assert!(close(q0.z, 1.0));
        assert!(close(q1.z, -1.0));
        assert!(close(q1.magnitude, 1.0));
    }

    #[test]
    fn test_plus_i_state_points_along_y() {
        let state = QuantumState::from_amplitudes(vec![
            Complex64::new(FRAC_1_SQRT_2, 0.0),
            Complex64::new(0.0, FRAC_1_SQRT_2),
        ])
        .unwrap();
        let v = bloch_vector(&state, 0);
        assert!(close(v.x, 0.0));
        assert!(close(v.y, 1.0));
        assert!(close(v.z, 0.0));
    }

    #[test]
    fn test_entangled_qubit_is_mixed() {
        let h = Complex64::new(FRAC_1_SQRT_2, 0.0);
        let z = Complex64::new(0.0, 0.0);
        let bell = QuantumState::from_amplitudes(vec![h, z, z, h]).unwrap();
        for v in bloch_vectors(&bell) {
            assert!(close(v.magnitude, 0.0));
        }
    }

    #[test]
    fn test_overall_vector() {
        assert_eq!(overall_bloch_vector(&[]), BlochVector::north_pole());
        let state = QuantumState::basis(2, 0b01);
        let mean = overall_bloch_vector(&bloch_vectors(&state));
        assert!(close(mean.z, 0.0));
        assert_eq!(mean.qubit, None);
    }
}
