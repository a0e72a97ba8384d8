//! Error types for the engine crate.

use thiserror::Error;

/// Errors that abort a simulation call.
///
/// Recoverable per-gate problems (unsupported symbols, malformed controlled
/// gates) are not errors at the run level; the evaluator records them as
/// [`Diagnostic`](crate::Diagnostic)s and keeps going.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EngineError {
    /// Operator side length does not match the state length.
    #[error("Matrix is {rows}x{cols} but state has {state_len} amplitudes")]
    DimensionMismatch {
        /// Number of matrix rows.
        rows: usize,
        /// Number of matrix columns.
        cols: usize,
        /// Number of amplitudes in the state.
        state_len: usize,
    },

    /// Circuit declares no qubits.
    #[error("Circuit must have at least one qubit")]
    NoQubits,

    /// Multi-qubit evaluation requested on a circuit that is too narrow.
    #[error("Multi-qubit evaluation requires at least {required} qubits, got {got}")]
    InsufficientQubits {
        /// Minimum qubit count for the path.
        required: usize,
        /// Qubit count supplied.
        got: usize,
    },

    /// Circuit exceeds the configured dense-matrix ceiling.
    #[error("Circuit has {requested} qubits but the engine is limited to {limit}")]
    TooManyQubits {
        /// Qubit count supplied.
        requested: usize,
        /// Configured ceiling.
        limit: usize,
    },

    /// A wire index lies outside `[0, num_qubits)`.
    #[error("Qubit {qubit} out of range for a {num_qubits}-qubit circuit")]
    QubitOutOfRange {
        /// The offending wire.
        qubit: usize,
        /// Circuit width.
        num_qubits: usize,
    },

    /// Gate symbol is not in the elementary catalog.
    #[error("Unsupported gate '{0}'")]
    UnsupportedGate(String),

    /// Controlled gate with empty, overlapping or out-of-range control/target sets.
    #[error("Malformed controlled gate: {0}")]
    MalformedControlledGate(String),

    /// Amplitude vector length is not a power of two.
    #[error("State length {0} is not a power of two (>= 2)")]
    InvalidStateLength(usize),

    /// Circuit description could not be (de)serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
