//! `rto` command-line entry point.

use std::process;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use rto_engine::cli::{run, Cli};

fn main() {
    init_tracing();

    if let Err(e) = execute() {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn execute() -> Result<()> {
    let cli = Cli::parse();
    let today = chrono::Local::now().date_naive();

    let output = run(cli, today)?;
    println!("{}", output);
    Ok(())
}

/// Logs go to stderr at `warn` unless `RUST_LOG` says otherwise.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
