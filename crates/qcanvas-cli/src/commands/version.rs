//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - dense state-vector circuit simulation",
        style("qcanvas").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qcanvas-engine  Gate catalog, operator synthesis and evaluator");
    println!("  qcanvas-cli     Command-line interface");
    println!();
    println!(
        "Max qubits: {} (hard limit {})",
        qcanvas_engine::SimulatorConfig::default().max_qubits,
        qcanvas_engine::HARD_QUBIT_LIMIT
    );
    println!("License:    {}", style("Apache-2.0").dim());
}
