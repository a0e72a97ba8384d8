//! Embedding a single-qubit operator into the full register.

use crate::error::{EngineError, EngineResult};
use crate::gate::Unitary2x2;
use crate::matrix::{DenseMatrix, bit_position, dimension, identity};

/// Build the `2^n x 2^n` operator that applies `u` to `qubit` and identity to
/// every other wire.
///
/// Entry `(i, j)` is `u[bit_i][bit_j]` when `i` and `j` agree on every bit
/// except `qubit`'s, and keeps its identity value otherwise. This is
/// `I ⊗ .. ⊗ U ⊗ .. ⊗ I` written out densely without forming the
/// intermediate factors, so it costs O(4^n).
pub fn extend_gate_matrix(
    u: &Unitary2x2,
    qubit: usize,
    num_qubits: usize,
) -> EngineResult<DenseMatrix> {
    if qubit >= num_qubits {
        return Err(EngineError::QubitOutOfRange { qubit, num_qubits });
    }

    let dim = dimension(num_qubits);
    let pos = bit_position(qubit, num_qubits);
    let mask = 1 << pos;
    let mut m = identity(dim);

    for i in 0..dim {
        let bit_i = (i >> pos) & 1;
        for j in 0..dim {
            if (i & !mask) != (j & !mask) {
                continue;
            }
            let bit_j = (j >> pos) & 1;
            m[[i, j]] = u.get(bit_i, bit_j);
        }
    }

    Ok(m)
}
