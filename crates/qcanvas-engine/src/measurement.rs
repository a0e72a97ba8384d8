//! Measurement statistics and state rendering.
//!
//! Probabilities are exact (`|amplitude|²`); there is no sampling or
//! collapse. The string renderings are display helpers only.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::f64::consts::FRAC_1_SQRT_2;

use crate::bloch::{BlochVector, bloch_vectors};
use crate::complex::{self, format_complex};
use crate::config::SimulatorConfig;
use crate::diagnostic::Diagnostic;
use crate::simulator::Evaluation;
use crate::state::QuantumState;

/// Basis index written MSB-first and zero-padded to `num_qubits` characters,
/// so qubit 0 is the leftmost character.
pub fn bitstring(index: usize, num_qubits: usize) -> String {
    format!("{index:0num_qubits$b}")
}

/// `|amplitude|²` for every basis state, keyed by bitstring.
pub fn probabilities(state: &QuantumState) -> BTreeMap<String, f64> {
    let n = state.num_qubits();
    state
        .amplitudes()
        .iter()
        .enumerate()
        .map(|(i, a)| (bitstring(i, n), complex::magnitude_squared(*a)))
        .collect()
}

/// Sum-of-terms rendering, e.g. `(0.71)|00⟩ + (0.71)|11⟩`.
///
/// Terms whose amplitude is below `tolerance` are left out.
pub fn format_state(state: &QuantumState, precision: usize, tolerance: f64) -> String {
    let n = state.num_qubits();
    state
        .amplitudes()
        .iter()
        .enumerate()
        .filter(|(_, a)| !complex::is_negligible(**a, tolerance))
        .map(|(i, a)| {
            format!(
                "{}|{}⟩",
                format_complex(*a, precision, tolerance),
                bitstring(i, n)
            )
        })
        .collect::<Vec<_>>()
        .join(" + ")
}

/// Polar rendering, e.g. `|1⟩: 1.00e^(i * 90.00°)`.
///
/// Terms whose magnitude rounds to zero at `precision` are left out.
pub fn format_state_polar(state: &QuantumState, precision: usize) -> String {
    let n = state.num_qubits();
    let cutoff = 0.5 * 10f64.powi(-i32::try_from(precision).unwrap_or(i32::MAX));
    state
        .amplitudes()
        .iter()
        .enumerate()
        .filter_map(|(i, a)| {
            let magnitude = complex::magnitude(*a);
            if magnitude < cutoff {
                return None;
            }
            let phase = a.im.atan2(a.re).to_degrees();
            Some(format!(
                "|{}⟩: {magnitude:.precision$}e^(i * {phase:.precision$}°)",
                bitstring(i, n)
            ))
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Compact rendering that spells `±1/√2` symbolically and labels terms by
/// decimal index, e.g. `1/√2|0⟩ + -1/√2|3⟩`. An all-zero state renders as `0`.
pub fn format_state_approximate(state: &QuantumState, tolerance: f64) -> String {
    let label = |x: f64| -> String {
        if (x.abs() - FRAC_1_SQRT_2).abs() < tolerance {
            "1/√2".to_string()
        } else {
            format!("{:.2}", x.abs())
        }
    };

    let terms: Vec<String> = state
        .amplitudes()
        .iter()
        .enumerate()
        .filter(|(_, a)| !complex::is_negligible(**a, tolerance))
        .map(|(i, a)| {
            let mut coeff = String::new();
            if a.re.abs() >= tolerance {
                if a.re < 0.0 {
                    coeff.push('-');
                }
                coeff.push_str(&label(a.re));
            }
            if a.im.abs() >= tolerance {
                match (coeff.is_empty(), a.im < 0.0) {
                    (_, true) => coeff.push('-'),
                    (false, false) => coeff.push('+'),
                    (true, false) => {}
                }
                coeff.push_str(&label(a.im));
                coeff.push('i');
            }
            format!("{coeff}|{i}⟩")
        })
        .collect();

    if terms.is_empty() {
        "0".to_string()
    } else {
        terms.join(" + ")
    }
}

/// Outcome of one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    /// Circuit width.
    pub num_qubits: usize,
    /// Probability per basis bitstring (qubit 0 leftmost).
    pub probabilities: BTreeMap<String, f64>,
    /// Sum-of-terms rendering of the final state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_state: Option<String>,
    /// Polar rendering of the final state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_state_polar: Option<String>,
    /// Reduced Bloch vector per qubit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bloch: Option<Vec<BlochVector>>,
    /// Gates that were skipped.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

impl SimulationResult {
    /// Summarise a final state according to `config`.
    pub fn from_state(
        state: &QuantumState,
        diagnostics: Vec<Diagnostic>,
        config: &SimulatorConfig,
    ) -> Self {
        Self {
            num_qubits: state.num_qubits(),
            probabilities: probabilities(state),
            formatted_state: config
                .render_state
                .then(|| format_state(state, config.precision, config.zero_tolerance)),
            formatted_state_polar: config
                .render_polar
                .then(|| format_state_polar(state, config.precision)),
            bloch: config.render_bloch.then(|| bloch_vectors(state)),
            diagnostics,
        }
    }

    /// Summarise an evaluation, consuming its state.
    pub fn from_evaluation(evaluation: Evaluation, config: &SimulatorConfig) -> Self {
        Self::from_state(&evaluation.state, evaluation.diagnostics, config)
    }

    /// Probability of `bits`, 0 when the bitstring is unknown.
    pub fn probability(&self, bits: &str) -> f64 {
        self.probabilities.get(bits).copied().unwrap_or(0.0)
    }

    /// Sum over all outcomes; 1 up to rounding.
    pub fn total_probability(&self) -> f64 {
        self.probabilities.values().sum()
    }

    /// Highest-probability outcome. Ties go to the smallest bitstring.
    pub fn most_likely(&self) -> Option<(&str, f64)> {
        self.probabilities
            .iter()
            .fold(None, |best: Option<(&str, f64)>, (bits, &p)| match best {
                Some((_, bp)) if bp >= p => best,
                _ => Some((bits.as_str(), p)),
            })
    }

    /// Outcomes sorted by descending probability.
    pub fn sorted(&self) -> Vec<(&str, f64)> {
        let mut out: Vec<(&str, f64)> = self
            .probabilities
            .iter()
            .map(|(bits, &p)| (bits.as_str(), p))
            .collect();
        out.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;

    fn bell() -> QuantumState {
        let h = Complex64::new(FRAC_1_SQRT_2, 0.0);
        let z = Complex64::new(0.0, 0.0);
        QuantumState::from_amplitudes(vec![h, z, z, h]).unwrap()
    }

    #[test]
    fn test_bitstring_padding() {
        assert_eq!(bitstring(0, 3), "000");
        assert_eq!(bitstring(1, 3), "001");
        assert_eq!(bitstring(4, 3), "100");
        assert_eq!(bitstring(1, 1), "1");
    }

    #[test]
    fn test_probabilities_cover_every_basis_state() {
        let probs = probabilities(&bell());
        assert_eq!(probs.len(), 4);
        assert!((probs["00"] - 0.5).abs() < 1e-12);
        assert!(probs["01"].abs() < 1e-12);
        assert!(probs["10"].abs() < 1e-12);
        assert!((probs["11"] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_format_state() {
        assert_eq!(format_state(&bell(), 2, 1e-10), "(0.71)|00⟩ + (0.71)|11⟩");
        let one = QuantumState::basis(1, 1);
        assert_eq!(format_state(&one, 2, 1e-10), "(1.00)|1⟩");
    }

    #[test]
    fn test_format_state_polar() {
        let i_state =
            QuantumState::from_amplitudes(vec![Complex64::new(0.0, 0.0), Complex64::new(0.0, 1.0)])
                .unwrap();
        assert_eq!(format_state_polar(&i_state, 2), "|1⟩: 1.00e^(i * 90.00°)");
        assert_eq!(
            format_state_polar(&bell(), 2),
            "|00⟩: 0.71e^(i * 0.00°), |11⟩: 0.71e^(i * 0.00°)"
        );
    }

    #[test]
    fn test_format_state_approximate() {
        assert_eq!(format_state_approximate(&bell(), 1e-10), "1/√2|0⟩ + 1/√2|3⟩");
        let minus = QuantumState::from_amplitudes(vec![
            Complex64::new(FRAC_1_SQRT_2, 0.0),
            Complex64::new(-FRAC_1_SQRT_2, 0.0),
        ])
        .unwrap();
        assert_eq!(format_state_approximate(&minus, 1e-10), "1/√2|0⟩ + -1/√2|1⟩");
        let phased = QuantumState::from_amplitudes(vec![
            Complex64::new(0.0, 0.0),
            Complex64::new(0.5, -0.5),
        ])
        .unwrap();
        assert_eq!(format_state_approximate(&phased, 1e-10), "0.50-0.50i|1⟩");
        let empty = QuantumState::from_amplitudes(vec![Complex64::new(0.0, 0.0); 2]).unwrap();
        assert_eq!(format_state_approximate(&empty, 1e-10), "0");
    }

    #[test]
    fn test_result_helpers() {
        let result = SimulationResult::from_state(&bell(), vec![], &SimulatorConfig::default());
        assert!((result.total_probability() - 1.0).abs() < 1e-12);
        assert_eq!(result.most_likely().map(|(b, _)| b), Some("00"));
        assert_eq!(result.probability("nope"), 0.0);
        assert_eq!(result.sorted()[1].0, "11");
        assert!(result.formatted_state.is_some());
        assert!(result.bloch.is_none());
    }

    #[test]
    fn test_result_json_uses_camel_case() {
        let result = SimulationResult::from_state(&bell(), vec![], &SimulatorConfig::default());
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("formattedState").is_some());
        assert!(json.get("formattedStatePolar").is_some());
        assert!(json.get("diagnostics").is_none());
        assert!((json["probabilities"]["11"].as_f64().unwrap() - 0.5).abs() < 1e-12);
    }
}
