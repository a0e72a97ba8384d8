//! Multi-controlled unitary synthesis.
//!
//! Generalises CNOT and Toffoli: a 2x2 operator is applied to every target
//! wire, but only on basis states where all control wires read 1. The
//! full-system matrix is written directly from bit masks rather than by
//! composing embedded single-qubit operators.

use rustc_hash::FxHashSet;

use crate::complex::{self, ONE, ZERO};
use crate::error::{EngineError, EngineResult};
use crate::gate::Unitary2x2;
use crate::matrix::{DenseMatrix, dimension, qubit_mask};

/// Build the `2^n x 2^n` operator for "apply `u` to each of `targets` when every
/// wire in `controls` is 1".
///
/// For a source basis index whose controls are not all set, the column is the
/// identity column. Otherwise, for every assignment of output bits on the
/// target wires, the entry is the product over targets of
/// `u[dest_bit][src_bit]`, i.e. `u ⊗ .. ⊗ u` acting on the targets. Zero
/// products are not stored. With `u = X` this is the usual single flipped
/// destination (CNOT, Toffoli, multi-target fan-out). For `u = Y` the
/// phases follow the operator, `|1⟩|0⟩ -> i|1⟩|1⟩`, which is the conjugate of
/// the `u[bit][1 - bit]` single-flip rule.
///
/// Control and target sets must be non-empty, disjoint, duplicate-free and in
/// range.
pub fn build_multi_controlled_u_matrix(
    controls: &[usize],
    targets: &[usize],
    u: &Unitary2x2,
    num_qubits: usize,
) -> EngineResult<DenseMatrix> {
    validate_wire_sets(controls, targets, num_qubits)?;

    let control_mask = controls
        .iter()
        .fold(0usize, |m, &q| m | qubit_mask(q, num_qubits));
    let target_masks: Vec<usize> = targets
        .iter()
        .map(|&q| qubit_mask(q, num_qubits))
        .collect();
    let target_mask = target_masks.iter().fold(0usize, |m, &t| m | t);

    let dim = dimension(num_qubits);
    let patterns = 1usize << target_masks.len();
    let mut m = DenseMatrix::from_elem((dim, dim), ZERO);

    for src in 0..dim {
        if src & control_mask != control_mask {
            m[[src, src]] = ONE;
            continue;
        }

        for pattern in 0..patterns {
            let mut dest = src & !target_mask;
            let mut amp = ONE;
            for (t, &mask) in target_masks.iter().enumerate() {
                let src_bit = usize::from(src & mask != 0);
                let dest_bit = (pattern >> t) & 1;
                if dest_bit == 1 {
                    dest |= mask;
                }
                amp = complex::multiply(amp, u.get(dest_bit, src_bit));
                if complex::is_exact_zero(amp) {
                    break;
                }
            }
            if !complex::is_exact_zero(amp) {
                m[[dest, src]] = amp;
            }
        }
    }

    Ok(m)
}

/// Check the invariants the upstream editor is supposed to guarantee.
pub fn validate_wire_sets(
    controls: &[usize],
    targets: &[usize],
    num_qubits: usize,
) -> EngineResult<()> {
    if controls.is_empty() {
        return Err(EngineError::MalformedControlledGate(
            "no control wires".to_string(),
        ));
    }
    if targets.is_empty() {
        return Err(EngineError::MalformedControlledGate(
            "no target wires".to_string(),
        ));
    }

    let mut seen = FxHashSet::default();
    for &q in controls.iter().chain(targets) {
        if q >= num_qubits {
            return Err(EngineError::QubitOutOfRange {
                qubit: q,
                num_qubits,
            });
        }
        if !seen.insert(q) {
            return Err(EngineError::MalformedControlledGate(format!(
                "wire {q} appears more than once across controls and targets"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embed::extend_gate_matrix;
    use crate::gate::ElementaryGate;
    use crate::matrix::{is_unitary, max_abs_diff};
    use num_complex::Complex64;

    /// Column `src` of `m` has a single 1 at row `dest`.
    fn maps(m: &DenseMatrix, src: usize, dest: usize) -> bool {
        (0..m.nrows()).all(|row| {
            let want = if row == dest { ONE } else { ZERO };
            (m[[row, src]] - want).norm() < 1e-12
        })
    }

    #[test]
    fn test_cnot_truth_table() {
        let m = build_multi_controlled_u_matrix(&[0], &[1], &Unitary2x2::x(), 2).unwrap();
        assert!(maps(&m, 0b00, 0b00));
        assert!(maps(&m, 0b01, 0b01));
        assert!(maps(&m, 0b10, 0b11));
        assert!(maps(&m, 0b11, 0b10));
    }

    #[test]
    fn test_reversed_cnot() {
        let m = build_multi_controlled_u_matrix(&[1], &[0], &Unitary2x2::x(), 2).unwrap();
        assert!(maps(&m, 0b00, 0b00));
        assert!(maps(&m, 0b01, 0b11));
        assert!(maps(&m, 0b10, 0b10));
        assert!(maps(&m, 0b11, 0b01));
    }

    #[test]
    fn test_toffoli_only_fires_when_both_controls_set() {
        let m = build_multi_controlled_u_matrix(&[0, 1], &[2], &Unitary2x2::x(), 3).unwrap();
        for src in 0..8 {
            let dest = if src & 0b110 == 0b110 { src ^ 1 } else { src };
            assert!(maps(&m, src, dest), "src {src:03b}");
        }
    }

    #[test]
    fn test_fan_out_flips_every_target() {
        let m = build_multi_controlled_u_matrix(&[0], &[1, 2], &Unitary2x2::x(), 3).unwrap();
        assert!(maps(&m, 0b100, 0b111));
        assert!(maps(&m, 0b101, 0b110));
        assert!(maps(&m, 0b011, 0b011));
    }

    #[test]
    fn test_controlled_z_is_diagonal_phase() {
        let m = build_multi_controlled_u_matrix(&[0], &[1], &Unitary2x2::z(), 2).unwrap();
        assert_eq!(m[[0b00, 0b00]], ONE);
        assert_eq!(m[[0b01, 0b01]], ONE);
        assert_eq!(m[[0b10, 0b10]], ONE);
        assert_eq!(m[[0b11, 0b11]], Complex64::new(-1.0, 0.0));
        assert!(is_unitary(&m, 1e-12));
    }

    #[test]
    fn test_controlled_y_matches_operator_orientation() {
        let m = build_multi_controlled_u_matrix(&[0], &[1], &Unitary2x2::y(), 2).unwrap();
        // Y|0⟩ = i|1⟩, Y|1⟩ = -i|0⟩ on the target when the control is set.
        assert_eq!(m[[0b11, 0b10]], Complex64::new(0.0, 1.0));
        assert_eq!(m[[0b10, 0b11]], Complex64::new(0.0, -1.0));
    }

    #[test]
    fn test_every_catalog_operator_yields_unitary() {
        for gate in ElementaryGate::ALL {
            let m =
                build_multi_controlled_u_matrix(&[2], &[0, 3], &gate.matrix(), 4).unwrap();
            assert!(is_unitary(&m, 1e-10), "controlled-{gate}");
        }
    }

    #[test]
    fn test_controls_satisfied_block_matches_embedding() {
        // With the control forced to 1, controlled-H on q1 acts like H on q1.
        let controlled =
            build_multi_controlled_u_matrix(&[0], &[1], &Unitary2x2::h(), 2).unwrap();
        let embedded = extend_gate_matrix(&Unitary2x2::h(), 1, 2).unwrap();
        let upper = controlled.slice(ndarray::s![2..4, 2..4]).to_owned();
        let reference = embedded.slice(ndarray::s![2..4, 2..4]).to_owned();
        assert!(max_abs_diff(&upper, &reference) < 1e-12);
    }

    #[test]
    fn test_rejects_malformed_sets() {
        let x = Unitary2x2::x();
        assert!(matches!(
            build_multi_controlled_u_matrix(&[], &[1], &x, 2),
            Err(EngineError::MalformedControlledGate(_))
        ));
        assert!(matches!(
            build_multi_controlled_u_matrix(&[0], &[], &x, 2),
            Err(EngineError::MalformedControlledGate(_))
        ));
        assert!(matches!(
            build_multi_controlled_u_matrix(&[0], &[0], &x, 2),
            Err(EngineError::MalformedControlledGate(_))
        ));
        assert!(matches!(
            build_multi_controlled_u_matrix(&[0], &[2], &x, 2),
            Err(EngineError::QubitOutOfRange { qubit: 2, .. })
        ));
    }
}
