//! Column-ordered circuit evaluation.
//!
//! Evaluation runs in two phases. The collecting phase resolves every placed
//! gate and groups it by column, turning bad gates into diagnostics. The
//! applying phase folds a fresh |0...0⟩ state through the columns in
//! ascending order; inside a column the single-qubit pass runs before the
//! controlled pass.

use std::collections::BTreeMap;
use std::time::Instant;

use tracing::{debug, instrument, warn};

use crate::circuit::{CircuitDescription, PlacedGate, ResolvedGate};
use crate::config::{HARD_QUBIT_LIMIT, SimulatorConfig};
use crate::controlled::build_multi_controlled_u_matrix;
use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::embed::extend_gate_matrix;
use crate::error::{EngineError, EngineResult};
use crate::matrix::DenseMatrix;
use crate::measurement::SimulationResult;
use crate::state::QuantumState;

/// Minimum width of the multi-qubit path.
pub const MIN_MULTI_QUBITS: usize = 2;

/// Final state of a run plus the gates that were skipped on the way.
#[derive(Debug, Clone)]
pub struct Evaluation {
    /// State after every applicable gate.
    pub state: QuantumState,
    /// Skipped gates, in the order they were encountered.
    pub diagnostics: Vec<Diagnostic>,
}

/// Gates of one column, split into the two passes.
#[derive(Debug, Default)]
struct ColumnPlan {
    plain: Vec<ResolvedGate>,
    controlled: Vec<ResolvedGate>,
}

/// Stateless circuit evaluator.
///
/// Each call allocates its own state and discards it afterwards, so one
/// `Simulator` can be shared freely between threads.
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    config: SimulatorConfig,
}

impl Simulator {
    /// Simulator with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulator with explicit settings.
    pub fn with_config(config: SimulatorConfig) -> Self {
        Self { config }
    }

    /// Active settings.
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Run the circuit and summarise it into probabilities.
    pub fn run(&self, circuit: &CircuitDescription) -> EngineResult<SimulationResult> {
        let evaluation = self.evaluate(circuit)?;
        Ok(SimulationResult::from_evaluation(evaluation, &self.config))
    }

    /// Run the circuit and return its final state.
    #[instrument(
        skip(self, circuit),
        fields(num_qubits = circuit.num_qubits, gates = circuit.gates.len())
    )]
    pub fn evaluate(&self, circuit: &CircuitDescription) -> EngineResult<Evaluation> {
        let start = Instant::now();
        self.check_width(circuit.num_qubits)?;

        let evaluation = if circuit.num_qubits == 1 {
            self.evaluate_single_wire(circuit)?
        } else {
            self.evaluate_multi_qubit(circuit)?
        };

        debug!(
            "Simulation completed in {:?} ({} gates skipped)",
            start.elapsed(),
            evaluation.diagnostics.len()
        );
        Ok(evaluation)
    }

    /// Column-grouped evaluation for circuits of two or more wires.
    ///
    /// Fails with [`EngineError::InsufficientQubits`] before allocating
    /// anything when the circuit is narrower than [`MIN_MULTI_QUBITS`].
    pub fn evaluate_multi_qubit(&self, circuit: &CircuitDescription) -> EngineResult<Evaluation> {
        let n = circuit.num_qubits;
        if n < MIN_MULTI_QUBITS {
            return Err(EngineError::InsufficientQubits {
                required: MIN_MULTI_QUBITS,
                got: n,
            });
        }
        self.check_width(n)?;

        let mut diagnostics = Vec::new();
        let columns = collect_columns(circuit, &mut diagnostics)?;

        let mut state = QuantumState::zero(n);
        for (column, plan) in &columns {
            debug!(
                column,
                plain = plan.plain.len(),
                controlled = plan.controlled.len(),
                "Applying column"
            );
            for gate in plan.plain.iter().chain(plan.controlled.iter()) {
                state.apply(&operator_matrix(gate, n)?)?;
            }
        }

        Ok(Evaluation { state, diagnostics })
    }

    /// One wire: no controls are possible, so the gates are folded in column
    /// order without the two-pass split.
    fn evaluate_single_wire(&self, circuit: &CircuitDescription) -> EngineResult<Evaluation> {
        let mut ordered: Vec<(usize, &PlacedGate)> = circuit.gates.iter().enumerate().collect();
        ordered.sort_by_key(|(_, gate)| gate.column());

        let mut diagnostics = Vec::new();
        let mut state = QuantumState::zero(1);
        for (index, gate) in ordered {
            if gate.is_controlled() {
                record(
                    &mut diagnostics,
                    Diagnostic {
                        gate_index: index,
                        column: gate.column(),
                        kind: DiagnosticKind::ControlledOnSingleWire,
                    },
                );
                continue;
            }
            match gate.resolve(1) {
                Ok(resolved) => state.apply(&operator_matrix(&resolved, 1)?)?,
                Err(e) => record(
                    &mut diagnostics,
                    Diagnostic::from_error(index, gate.column(), e)?,
                ),
            }
        }

        Ok(Evaluation { state, diagnostics })
    }

    fn check_width(&self, num_qubits: usize) -> EngineResult<()> {
        if num_qubits == 0 {
            return Err(EngineError::NoQubits);
        }
        // Configs built in code never pass through `validate()`.
        let limit = self.config.max_qubits.min(HARD_QUBIT_LIMIT);
        if num_qubits > limit {
            return Err(EngineError::TooManyQubits {
                requested: num_qubits,
                limit,
            });
        }
        Ok(())
    }
}

/// Run `circuit` with the default configuration.
pub fn simulate(circuit: &CircuitDescription) -> EngineResult<SimulationResult> {
    Simulator::new().run(circuit)
}

/// Collecting phase: resolve gates and bucket them by column.
fn collect_columns(
    circuit: &CircuitDescription,
    diagnostics: &mut Vec<Diagnostic>,
) -> EngineResult<BTreeMap<usize, ColumnPlan>> {
    let mut columns: BTreeMap<usize, ColumnPlan> = BTreeMap::new();

    for (index, gate) in circuit.gates.iter().enumerate() {
        let column = gate.column();
        match gate.resolve(circuit.num_qubits) {
            Ok(resolved @ ResolvedGate::Single { .. }) => {
                columns.entry(column).or_default().plain.push(resolved);
            }
            Ok(resolved @ ResolvedGate::Controlled { .. }) => {
                columns.entry(column).or_default().controlled.push(resolved);
            }
            Err(e) => record(diagnostics, Diagnostic::from_error(index, column, e)?),
        }
    }

    Ok(columns)
}

/// Full-system matrix for a resolved gate.
fn operator_matrix(gate: &ResolvedGate, num_qubits: usize) -> EngineResult<DenseMatrix> {
    match gate {
        ResolvedGate::Single { operator, wire, .. } => {
            extend_gate_matrix(operator, *wire, num_qubits)
        }
        ResolvedGate::Controlled {
            operator,
            controls,
            targets,
            ..
        } => build_multi_controlled_u_matrix(controls, targets, operator, num_qubits),
    }
}

fn record(diagnostics: &mut Vec<Diagnostic>, diagnostic: Diagnostic) {
    warn!(
        gate_index = diagnostic.gate_index,
        column = diagnostic.column,
        "Skipping gate: {}",
        diagnostic.kind
    );
    diagnostics.push(diagnostic);
}
