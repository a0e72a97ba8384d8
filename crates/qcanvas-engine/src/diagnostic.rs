//! Per-gate diagnostics for gates the evaluator skipped.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::EngineError;

/// Why a gate was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Symbol outside the elementary catalog.
    UnsupportedGate {
        /// The symbol as written.
        symbol: String,
    },
    /// Wire index outside the register.
    WireOutOfRange {
        /// The offending wire.
        wire: usize,
    },
    /// Empty, overlapping or mis-indexed control/target sets.
    MalformedControlled {
        /// Human-readable reason.
        reason: String,
    },
    /// A controlled gate on a one-wire circuit.
    ControlledOnSingleWire,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::UnsupportedGate { symbol } => write!(f, "unsupported gate '{symbol}'"),
            DiagnosticKind::WireOutOfRange { wire } => write!(f, "wire {wire} out of range"),
            DiagnosticKind::MalformedControlled { reason } => {
                write!(f, "malformed controlled gate: {reason}")
            }
            DiagnosticKind::ControlledOnSingleWire => {
                f.write_str("controlled gate on a single-wire circuit")
            }
        }
    }
}

/// A skipped gate, identified by its position in the circuit description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    /// Index into `CircuitDescription::gates`.
    pub gate_index: usize,
    /// Column the gate was placed in.
    pub column: usize,
    /// What was wrong with it.
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    /// Classify a resolution error as a skip diagnostic.
    ///
    /// Returns the error back when it is not a per-gate problem.
    pub fn from_error(
        gate_index: usize,
        column: usize,
        error: EngineError,
    ) -> Result<Self, EngineError> {
        let kind = match error {
            EngineError::UnsupportedGate(symbol) => DiagnosticKind::UnsupportedGate { symbol },
            EngineError::QubitOutOfRange { qubit, .. } => {
                DiagnosticKind::WireOutOfRange { wire: qubit }
            }
            EngineError::MalformedControlledGate(reason) => {
                DiagnosticKind::MalformedControlled { reason }
            }
            other => return Err(other),
        };
        Ok(Self {
            gate_index,
            column,
            kind,
        })
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "gate #{} (column {}): {}",
            self.gate_index, self.column, self.kind
        )
    }
}
