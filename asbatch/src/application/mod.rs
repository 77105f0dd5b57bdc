pub mod handlers;

use crate::presentation::cli::{Cli, Commands};
use asbatch_core::error::Result;
use asbatch_core::report::local_now;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

pub fn run() -> Result<()> {
    // Read the clock while still single-threaded so the local offset resolves.
    let started = local_now();
    let cli = Cli::parse();
    init_tracing();

    let opts = handlers::RunOptions {
        out_dir: cli.out_dir,
        workers: cli.workers,
        started,
    };
    match cli.command {
        Commands::EadLocations {
            config,
            environment,
        } => handlers::handle_ead_locations(config, environment, opts),
        Commands::TopContainers { config } => handlers::handle_top_containers(config, opts),
    }
}
