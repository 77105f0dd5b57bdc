use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "asbatch: bulk maintenance for ArchivesSpace", long_about = None)]
pub struct Cli {
    /// Directory the .tsv report is written to
    #[arg(long, global = true, default_value = ".")]
    pub out_dir: PathBuf,

    /// Override the configured worker count
    #[arg(long, global = true)]
    pub workers: Option<usize>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set ead_location on every published resource
    EadLocations {
        #[arg(long)]
        config: PathBuf,
        /// Environment name from the config (defaults to default_environment)
        #[arg(long)]
        environment: Option<String>,
    },

    /// Delete top containers whose label matches the delete pattern
    TopContainers {
        #[arg(short, long)]
        config: PathBuf,
    },
}
