//! Circuit descriptions as handed over by the editor.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::controlled::validate_wire_sets;
use crate::error::{EngineError, EngineResult};
use crate::gate::{ElementaryGate, Unitary2x2};

/// One gate occurrence on the circuit grid.
///
/// Symbols are kept as strings so that a gate outside the catalog still
/// reaches the evaluator, which skips it with a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlacedGate {
    /// A catalog gate on a single wire.
    Elementary {
        /// Catalog symbol (`"X"`, `"H"`, ...).
        symbol: String,
        /// Wire the gate sits on.
        wire: usize,
        /// Time column.
        column: usize,
    },
    /// A catalog gate applied to `targets` when all `controls` read 1.
    Controlled {
        /// Catalog symbol of the wrapped operator.
        base: String,
        /// Wires occupied by the gate.
        wires: Vec<usize>,
        /// Time column.
        column: usize,
        /// Indices into `wires` acting as controls.
        controls: Vec<usize>,
        /// Indices into `wires` acting as targets.
        targets: Vec<usize>,
    },
}

impl PlacedGate {
    /// A single-wire catalog gate.
    pub fn elementary(gate: ElementaryGate, wire: usize, column: usize) -> Self {
        PlacedGate::Elementary {
            symbol: gate.symbol().to_string(),
            wire,
            column,
        }
    }

    /// A controlled gate. `controls` and `targets` index into `wires`.
    pub fn controlled(
        base: ElementaryGate,
        wires: Vec<usize>,
        controls: Vec<usize>,
        targets: Vec<usize>,
        column: usize,
    ) -> Self {
        PlacedGate::Controlled {
            base: base.symbol().to_string(),
            wires,
            column,
            controls,
            targets,
        }
    }

    /// CNOT from `control` to `target`.
    pub fn cnot(control: usize, target: usize, column: usize) -> Self {
        Self::controlled(
            ElementaryGate::X,
            vec![control, target],
            vec![0],
            vec![1],
            column,
        )
    }

    /// Toffoli with two controls and one target.
    pub fn toffoli(c1: usize, c2: usize, target: usize, column: usize) -> Self {
        Self::controlled(
            ElementaryGate::X,
            vec![c1, c2, target],
            vec![0, 1],
            vec![2],
            column,
        )
    }

    /// Time column of this gate.
    #[inline]
    pub fn column(&self) -> usize {
        match self {
            PlacedGate::Elementary { column, .. } | PlacedGate::Controlled { column, .. } => {
                *column
            }
        }
    }

    /// Catalog symbol (the base symbol for controlled gates).
    pub fn symbol(&self) -> &str {
        match self {
            PlacedGate::Elementary { symbol, .. } => symbol,
            PlacedGate::Controlled { base, .. } => base,
        }
    }

    /// True for the controlled variant.
    pub fn is_controlled(&self) -> bool {
        matches!(self, PlacedGate::Controlled { .. })
    }

    /// Look up the operator and map gate-local indices to wire numbers,
    /// re-checking the editor's placement invariants.
    pub fn resolve(&self, num_qubits: usize) -> EngineResult<ResolvedGate> {
        match self {
            PlacedGate::Elementary { symbol, wire, .. } => {
                let gate: ElementaryGate = symbol.parse()?;
                if *wire >= num_qubits {
                    return Err(EngineError::QubitOutOfRange {
                        qubit: *wire,
                        num_qubits,
                    });
                }
                Ok(ResolvedGate::Single {
                    gate,
                    operator: gate.matrix(),
                    wire: *wire,
                })
            }
            PlacedGate::Controlled {
                base,
                wires,
                controls,
                targets,
                ..
            } => {
                let gate: ElementaryGate = base.parse()?;
                check_gate_wires(wires, num_qubits)?;
                let control_wires = local_to_wires(wires, controls)?;
                let target_wires = local_to_wires(wires, targets)?;
                validate_wire_sets(&control_wires, &target_wires, num_qubits)?;
                Ok(ResolvedGate::Controlled {
                    gate,
                    operator: gate.matrix(),
                    controls: control_wires,
                    targets: target_wires,
                })
            }
        }
    }
}

/// Every wire a controlled gate occupies must be in range and listed once,
/// including wires no control or target index refers to.
fn check_gate_wires(wires: &[usize], num_qubits: usize) -> EngineResult<()> {
    let mut seen = FxHashSet::default();
    for &wire in wires {
        if wire >= num_qubits {
            return Err(EngineError::QubitOutOfRange {
                qubit: wire,
                num_qubits,
            });
        }
        if !seen.insert(wire) {
            return Err(EngineError::MalformedControlledGate(format!(
                "wire {wire} listed more than once"
            )));
        }
    }
    Ok(())
}

/// Map gate-local indices onto the gate's wire list.
fn local_to_wires(wires: &[usize], local: &[usize]) -> EngineResult<Vec<usize>> {
    local
        .iter()
        .map(|&i| {
            wires.get(i).copied().ok_or_else(|| {
                EngineError::MalformedControlledGate(format!(
                    "local index {i} outside a {}-wire gate",
                    wires.len()
                ))
            })
        })
        .collect()
}

/// A placed gate with its operator looked up and its wires made absolute.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedGate {
    /// Single-qubit operator on one wire.
    Single {
        /// Catalog entry.
        gate: ElementaryGate,
        /// Its 2x2 matrix.
        operator: Unitary2x2,
        /// Absolute wire.
        wire: usize,
    },
    /// Multi-controlled operator.
    Controlled {
        /// Catalog entry of the wrapped operator.
        gate: ElementaryGate,
        /// Its 2x2 matrix.
        operator: Unitary2x2,
        /// Absolute control wires.
        controls: Vec<usize>,
        /// Absolute target wires.
        targets: Vec<usize>,
    },
}

/// Qubit count plus an unordered collection of placed gates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircuitDescription {
    /// Number of wires.
    pub num_qubits: usize,
    /// Gates in any order; evaluation order comes from their columns.
    #[serde(default)]
    pub gates: Vec<PlacedGate>,
}

impl CircuitDescription {
    /// An empty circuit on `num_qubits` wires.
    pub fn new(num_qubits: usize) -> Self {
        Self {
            num_qubits,
            gates: Vec::new(),
        }
    }

    /// Builder-style [`push`](Self::push).
    #[must_use]
    pub fn with_gate(mut self, gate: PlacedGate) -> Self {
        self.gates.push(gate);
        self
    }

    /// Append a gate.
    pub fn push(&mut self, gate: PlacedGate) {
        self.gates.push(gate);
    }

    /// Number of distinct occupied columns.
    pub fn depth(&self) -> usize {
        let mut columns: Vec<usize> = self.gates.iter().map(PlacedGate::column).collect();
        columns.sort_unstable();
        columns.dedup();
        columns.len()
    }

    /// Parse a JSON description.
    pub fn from_json(json: &str) -> EngineResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> EngineResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
