//! Gates command implementation.

use console::style;

use qcanvas_engine::ElementaryGate;

/// Execute the gates command.
pub fn execute() {
    println!("{}", style("Supported gates:").bold());
    println!();
    for gate in ElementaryGate::ALL {
        println!(
            "  {}  {}",
            style(format!("{:<2}", gate.symbol())).cyan().bold(),
            gate.name()
        );
        for line in gate.matrix().to_string().lines() {
            println!("      {}", style(line).dim());
        }
    }
    println!();
    println!(
        "Every gate can also be placed as a controlled gate with any number of\n\
         controls and targets (CNOT, Toffoli, CZ, ...)."
    );
}
