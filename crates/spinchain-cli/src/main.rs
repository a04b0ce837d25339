//! spinchain Command-Line Interface
//!
//! Simulates a transverse-field Ising chain with Trotterised statevector
//! evolution and renders the magnetisation dynamics as an animated GIF.
//!
//! ```text
//! spinchain                      # default run, writes spin_chain_dynamics.gif
//! spinchain run -n 6 --field 0.8 --export trajectory.json
//! spinchain slice -n 3           # print one Trotter slice
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::common::{RunArgs, SliceArgs};
use commands::{run, slice, version};
use config::{Config, LoggingConfig};

/// spinchain - transverse-field Ising dynamics, Trotterised and animated
#[derive(Parser)]
#[command(name = "spinchain")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// YAML configuration file
    #[arg(short, long, global = true, env = "SPINCHAIN_CONFIG")]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate the chain and write the animation (default)
    Run(RunArgs),

    /// Print the gate sequence of one Trotter slice
    Slice(SliceArgs),

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let result = execute(cli);

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

fn execute(cli: Cli) -> anyhow::Result<()> {
    let command = cli
        .command
        .unwrap_or_else(|| Commands::Run(RunArgs::default()));
    if let Commands::Version = command {
        version::execute();
        return Ok(());
    }

    let config = Config::load(cli.config.as_deref())?;
    init_logging(cli.verbose, &config.logging);

    match command {
        Commands::Run(args) => run::execute(config, &args),
        Commands::Slice(args) => slice::execute(config, &args),
        Commands::Version => Ok(()),
    }
}

/// `-v` flags win over the configured level.
fn log_filter(verbose: u8, logging: &LoggingConfig) -> String {
    match (verbose, &logging.level) {
        (0, Some(level)) => level.clone(),
        (0, None) => "warn".to_string(),
        (1, _) => "info".to_string(),
        (2, _) => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

fn init_logging(verbose: u8, logging: &LoggingConfig) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_filter(verbose, logging)))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
