//! Simulate command implementation.

use anyhow::{Context, Result};
use console::style;
use tracing::info;

use qcanvas_engine::Simulator;

use super::common::{load_circuit, load_config, print_results};

/// Execute the simulate command.
pub fn execute(input: &str, config: Option<&str>, format: &str, bloch: bool) -> Result<()> {
    let json = match format.to_lowercase().as_str() {
        "table" => false,
        "json" => true,
        other => anyhow::bail!("Unknown format: '{other}'. Available: table, json"),
    };

    let mut settings = load_config(config)?;
    if bloch {
        settings.render_bloch = true;
    }

    let circuit = load_circuit(input)?;
    info!(
        num_qubits = circuit.num_qubits,
        gates = circuit.gates.len(),
        "Loaded circuit from {input}"
    );

    if !json {
        println!(
            "{} Simulating {}",
            style("→").cyan().bold(),
            style(input).green()
        );
        println!(
            "  Loaded: {} qubits, {} gates, depth {}",
            circuit.num_qubits,
            circuit.gates.len(),
            circuit.depth()
        );
    }

    let result = Simulator::with_config(settings)
        .run(&circuit)
        .context("Simulation failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_results(&result);
    }

    Ok(())
}
