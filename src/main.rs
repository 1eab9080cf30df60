//! Sake CLI: tasks as code.

use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = sake::cli::Cli::parse();
    init_tracing(cli.verbose);
    if let Err(e) = sake::cli::dispatch(cli.command, cli.verbose) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "sake=debug" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
