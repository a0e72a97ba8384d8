//! qcanvas State-Vector Engine
//!
//! This crate turns a circuit description assembled in the qcanvas editor into
//! exact measurement probabilities. It is a pure, synchronous function from a
//! [`CircuitDescription`] to a [`SimulationResult`]: every run allocates a
//! fresh |0...0⟩ state, applies the placed gates column by column and
//! discards the state once the probabilities are extracted.
//!
//! # Core Components
//!
//! - **Complex arithmetic**: [`complex`] helpers over `num_complex::Complex64`
//! - **Gate catalog**: [`ElementaryGate`] and its [`Unitary2x2`] operators
//! - **State vectors**: [`QuantumState`], [`apply_matrix`], [`tensor_product`]
//! - **Embedding**: [`extend_gate_matrix`] lifts a 2x2 operator to `2^n x 2^n`
//! - **Controlled synthesis**: [`build_multi_controlled_u_matrix`] for
//!   CNOT/Toffoli-style gates with any number of controls and targets
//! - **Evaluator**: [`Simulator`] orders gates by column and applies them
//! - **Measurement**: [`probabilities`], state renderings and Bloch vectors
//!
//! # Example: Bell pair
//!
//! ```rust
//! use qcanvas_engine::{CircuitDescription, ElementaryGate, PlacedGate, simulate};
//!
//! let circuit = CircuitDescription::new(2)
//!     .with_gate(PlacedGate::elementary(ElementaryGate::H, 0, 0))
//!     .with_gate(PlacedGate::cnot(0, 1, 1));
//!
//! let result = simulate(&circuit).unwrap();
//! assert!((result.probability("00") - 0.5).abs() < 1e-9);
//! assert!((result.probability("11") - 0.5).abs() < 1e-9);
//! ```
//!
//! # Scaling
//!
//! Every gate is materialised as a dense `2^n x 2^n` matrix, so time and
//! memory grow as O(4^n). Circuits wider than
//! [`SimulatorConfig::max_qubits`] are rejected up front.
//!
//! | Qubits | Matrix entries | Matrix memory |
//! |--------|----------------|---------------|
//! | 4 | 256 | 4 KB |
//! | 8 | 65 536 | 1 MB |
//! | 10 | ~1 M | 16 MB |
//! | 12 | ~16 M | 256 MB |
//! | 14 | ~268 M | 4 GB |

pub mod bloch;
pub mod circuit;
pub mod complex;
pub mod config;
pub mod controlled;
pub mod diagnostic;
pub mod embed;
pub mod error;
pub mod gate;
pub mod matrix;
pub mod measurement;
pub mod simulator;
pub mod state;

pub use bloch::{BlochVector, bloch_vector, bloch_vectors, overall_bloch_vector};
pub use circuit::{CircuitDescription, PlacedGate, ResolvedGate};
pub use config::{ConfigError, HARD_QUBIT_LIMIT, SimulatorConfig};
pub use controlled::build_multi_controlled_u_matrix;
pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use embed::extend_gate_matrix;
pub use error::{EngineError, EngineResult};
pub use gate::{ElementaryGate, Unitary2x2, lookup};
pub use matrix::DenseMatrix;
pub use measurement::{
    SimulationResult, bitstring, format_state, format_state_approximate, format_state_polar,
    probabilities,
};
pub use simulator::{Evaluation, Simulator, simulate};
pub use state::{QuantumState, apply_matrix, tensor_product};
