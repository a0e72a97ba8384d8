//! Shared helpers for CLI commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use qcanvas_engine::{CircuitDescription, SimulationResult, SimulatorConfig};

/// Largest number of outcomes printed in the table view.
const MAX_ROWS: usize = 16;

/// Load a circuit description from a JSON file.
pub fn load_circuit(path: &str) -> Result<CircuitDescription> {
    let path_obj = Path::new(path);

    if !path_obj.exists() {
        anyhow::bail!("File not found: {path}");
    }

    let source =
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))?;

    CircuitDescription::from_json(&source).map_err(|e| anyhow::anyhow!("Parse error: {e}"))
}

/// Build the simulator configuration: YAML file if given, environment
/// overrides on top, defaults otherwise.
pub fn load_config(path: Option<&str>) -> Result<SimulatorConfig> {
    match path {
        Some(p) => SimulatorConfig::from_file(p)
            .with_context(|| format!("Failed to load configuration: {p}")),
        None => SimulatorConfig::from_env().context("Invalid environment configuration"),
    }
}

/// Print probabilities as a table with bars, plus any renderings and
/// diagnostics the result carries.
pub fn print_results(result: &SimulationResult) {
    println!(
        "\n{} Probabilities ({} qubits):",
        style("✓").green().bold(),
        result.num_qubits
    );

    let sorted = result.sorted();
    for (bitstring, prob) in sorted.iter().take(MAX_ROWS) {
        let percent = prob * 100.0;
        let bar_len = (percent / 2.0).round() as usize;
        let bar: String = "█".repeat(bar_len);

        println!(
            "  {}: {:>7.3}% {}",
            style(bitstring).cyan(),
            percent,
            style(bar).green()
        );
    }

    if sorted.len() > MAX_ROWS {
        println!("  ... and {} more outcomes", sorted.len() - MAX_ROWS);
    }

    if let Some(state) = &result.formatted_state {
        println!("\n  State: {}", style(state).yellow());
    }
    if let Some(polar) = &result.formatted_state_polar {
        println!("  Polar: {polar}");
    }

    if let Some(vectors) = &result.bloch {
        println!("\n  Bloch vectors:");
        for v in vectors {
            let label = v.qubit.map_or_else(|| "all".to_string(), |q| format!("q{q}"));
            println!(
                "    {:>4}: x={:+.3} y={:+.3} z={:+.3} |r|={:.3}",
                style(label).cyan(),
                v.x,
                v.y,
                v.z,
                v.magnitude
            );
        }
    }

    if !result.diagnostics.is_empty() {
        println!(
            "\n{} {} gate(s) skipped:",
            style("!").yellow().bold(),
            result.diagnostics.len()
        );
        for d in &result.diagnostics {
            println!("  {d}");
        }
    }
}
