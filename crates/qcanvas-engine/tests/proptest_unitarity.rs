//! Property-based tests for operator synthesis and evaluation.
//!
//! Every embedded or controlled operator must be unitary, and every circuit
//! built from catalog gates must conserve total probability.

use proptest::prelude::*;
use qcanvas_engine::matrix::{is_unitary, max_abs_diff};
use qcanvas_engine::{
    CircuitDescription, ElementaryGate, PlacedGate, build_multi_controlled_u_matrix,
    extend_gate_matrix, simulate,
};

const TOL: f64 = 1e-9;

fn arb_gate() -> impl Strategy<Value = ElementaryGate> {
    prop::sample::select(ElementaryGate::ALL.to_vec())
}

/// Disjoint, non-empty control and target sets on 2-5 qubits.
fn arb_wire_split() -> impl Strategy<Value = (usize, Vec<usize>, Vec<usize>)> {
    (2_usize..=5).prop_flat_map(|n| {
        (Just(n), Just((0..n).collect::<Vec<_>>()).prop_shuffle(), 1..n).prop_flat_map(
            |(n, wires, split)| {
                let max_targets = n - split;
                (1..=max_targets).prop_map(move |num_targets| {
                    let controls = wires[..split].to_vec();
                    let targets = wires[split..split + num_targets].to_vec();
                    (n, controls, targets)
                })
            },
        )
    })
}

/// Gate placements for random circuits.
#[derive(Debug, Clone)]
enum GateOp {
    Single(ElementaryGate, usize, usize),
    Controlled(ElementaryGate, Vec<usize>, usize, usize),
}

impl GateOp {
    fn place(self) -> PlacedGate {
        match self {
            GateOp::Single(gate, wire, column) => PlacedGate::elementary(gate, wire, column),
            GateOp::Controlled(gate, wires, split, column) => {
                let controls = (0..split).collect();
                let targets = (split..wires.len()).collect();
                PlacedGate::controlled(gate, wires, controls, targets, column)
            }
        }
    }
}

fn arb_gate_op(num_qubits: usize) -> impl Strategy<Value = GateOp> {
    let single = (arb_gate(), 0..num_qubits, 0_usize..8)
        .prop_map(|(g, w, c)| GateOp::Single(g, w, c))
        .boxed();
    if num_qubits < 2 {
        return single;
    }
    let controlled = (
        arb_gate(),
        Just((0..num_qubits).collect::<Vec<_>>()).prop_shuffle(),
        2..=num_qubits,
        0_usize..8,
    )
        .prop_flat_map(|(g, wires, used, c)| {
            (1..used).prop_map(move |split| {
                GateOp::Controlled(g, wires[..used].to_vec(), split, c)
            })
        })
        .boxed();
    prop_oneof![single, controlled].boxed()
}

fn arb_circuit() -> impl Strategy<Value = CircuitDescription> {
    (1_usize..=5).prop_flat_map(|n| {
        prop::collection::vec(arb_gate_op(n), 0..=12).prop_map(move |ops| {
            let mut circuit = CircuitDescription::new(n);
            for op in ops {
                circuit.push(op.place());
            }
            circuit
        })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn embedded_operator_is_unitary(
        gate in arb_gate(),
        (n, q) in (1_usize..=5).prop_flat_map(|n| (Just(n), 0..n)),
    ) {
        let m = extend_gate_matrix(&gate.matrix(), q, n).unwrap();
        prop_assert!(is_unitary(&m, TOL), "{gate} on q{q} of {n}");
    }

    #[test]
    fn controlled_operator_is_unitary(
        gate in arb_gate(),
        (n, controls, targets) in arb_wire_split(),
    ) {
        let m = build_multi_controlled_u_matrix(&controls, &targets, &gate.matrix(), n).unwrap();
        prop_assert!(
            is_unitary(&m, TOL),
            "C-{gate} controls={controls:?} targets={targets:?} n={n}"
        );
    }

    #[test]
    fn single_target_controlled_matches_embedding_on_active_block(
        gate in arb_gate(),
        (n, controls, targets) in arb_wire_split(),
    ) {
        // Where every control reads 1 the controlled operator acts as the
        // embedded one; everywhere else it is the identity.
        let target = targets[0];
        let controlled =
            build_multi_controlled_u_matrix(&controls, &[target], &gate.matrix(), n).unwrap();
        let embedded = extend_gate_matrix(&gate.matrix(), target, n).unwrap();
        let control_mask = controls.iter().fold(0usize, |m, &c| m | (1 << (n - 1 - c)));
        for src in 0..(1usize << n) {
            for dest in 0..(1usize << n) {
                let expected = if src & control_mask == control_mask {
                    embedded[[dest, src]]
                } else if dest == src {
                    num_complex::Complex64::new(1.0, 0.0)
                } else {
                    num_complex::Complex64::new(0.0, 0.0)
                };
                prop_assert!((controlled[[dest, src]] - expected).norm() < TOL);
            }
        }
    }

    #[test]
    fn circuits_conserve_probability(circuit in arb_circuit()) {
        let result = simulate(&circuit).unwrap();
        prop_assert_eq!(result.probabilities.len(), 1usize << circuit.num_qubits);
        prop_assert!(
            (result.total_probability() - 1.0).abs() < TOL,
            "total = {}",
            result.total_probability()
        );
        prop_assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn gate_insertion_order_within_distinct_columns_is_irrelevant(circuit in arb_circuit()) {
        // Stable grouping by column means reversing the list only reorders
        // gates that share a column, so restrict to one gate per column.
        let mut seen = std::collections::HashSet::new();
        let mut unique = CircuitDescription::new(circuit.num_qubits);
        for gate in circuit.gates.iter().filter(|g| seen.insert(g.column())) {
            unique.push(gate.clone());
        }
        let mut reversed = unique.clone();
        reversed.gates.reverse();

        let a = simulate(&unique).unwrap();
        let b = simulate(&reversed).unwrap();
        for (bits, p) in &a.probabilities {
            prop_assert!((p - b.probability(bits)).abs() < TOL);
        }
    }
}

#[test]
fn max_abs_diff_detects_dagger_pairs() {
    // S · S† = I for every qubit of a 3-wire register.
    for q in 0..3 {
        let s = extend_gate_matrix(&ElementaryGate::S.matrix(), q, 3).unwrap();
        let s_dag = extend_gate_matrix(&ElementaryGate::S.matrix().dagger(), q, 3).unwrap();
        let product = s.dot(&s_dag);
        let id = qcanvas_engine::matrix::identity(8);
        assert!(max_abs_diff(&product, &id) < TOL);
    }
}
