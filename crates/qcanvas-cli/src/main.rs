//! qcanvas Command-Line Interface
//!
//! Runs circuit descriptions exported from the qcanvas editor through the
//! state-vector engine and prints the measurement probabilities.
//!
//! ```text
//! qcanvas simulate -i demos/circuits/bell.json
//! qcanvas simulate -i circuit.json --format json --bloch
//! qcanvas gates
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{gates, simulate, version};

/// qcanvas - dense state-vector simulation of editor circuits
#[derive(Parser)]
#[command(name = "qcanvas")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a circuit description and print its probabilities
    Simulate {
        /// Input file (JSON circuit description)
        #[arg(short, long)]
        input: String,

        /// Optional YAML configuration file
        #[arg(short, long)]
        config: Option<String>,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,

        /// Include per-qubit Bloch vectors
        #[arg(long)]
        bloch: bool,
    },

    /// List the supported gates
    Gates,

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Simulate {
            input,
            config,
            format,
            bloch,
        } => simulate::execute(&input, config.as_deref(), &format, bloch),

        Commands::Gates => {
            gates::execute();
            Ok(())
        }

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
