use std::path::PathBuf;
use std::sync::Arc;

use asbatch_core::client::ArchivesClient;
use asbatch_core::client_factory::{Backend, open_client};
use asbatch_core::error::{BatchError, Result};
use asbatch_core::jobs::{EadLocationJob, Job, TopContainerPurgeJob};
use asbatch_core::{Config, RunContext, RunSummary, run};
use time::OffsetDateTime;
use tracing::info;

pub struct RunOptions {
    pub out_dir: PathBuf,
    pub workers: Option<usize>,
    pub started: OffsetDateTime,
}

/// CLI override wins over the config; zero is rejected either way.
fn resolve_workers(cfg: &Config, flag: Option<usize>) -> Result<usize> {
    match flag.unwrap_or(cfg.workers) {
        0 => Err(BatchError::Config("--workers must be at least 1".into())),
        n => Ok(n),
    }
}

fn client_for(cfg: &Config, environment: Option<&str>) -> Result<Arc<dyn ArchivesClient>> {
    let env = cfg.environment(environment)?;
    info!(url = %env.url, "connecting");
    open_client(Backend::Http, env.connect_params())
}

fn execute(
    cfg: &Config,
    client: Arc<dyn ArchivesClient>,
    job: Arc<dyn Job>,
    opts: RunOptions,
) -> Result<()> {
    let ctx = RunContext {
        client,
        job,
        workers: resolve_workers(cfg, opts.workers)?,
        repositories: cfg.repositories.clone(),
        out_dir: opts.out_dir,
        started: opts.started,
    };
    let summary = run(ctx)?;
    print_summary(&summary);
    Ok(())
}

fn print_summary(summary: &RunSummary) {
    println!(
        "report: {} ({} records from {} workers)",
        summary.report_path.display(),
        summary.tally.total(),
        summary.batches
    );
    println!("{}", summary.tally);
}

pub fn handle_ead_locations(
    config: PathBuf,
    environment: Option<String>,
    opts: RunOptions,
) -> Result<()> {
    let cfg = Config::load(&config)?;
    let client = client_for(&cfg, environment.as_deref())?;
    let job = Arc::new(EadLocationJob::from_config(&cfg));
    execute(&cfg, client, job, opts)
}

pub fn handle_top_containers(config: PathBuf, opts: RunOptions) -> Result<()> {
    let cfg = Config::load(&config)?;
    let job = Arc::new(TopContainerPurgeJob::new(&cfg.delete_pattern)?);
    let client = client_for(&cfg, None)?;
    execute(&cfg, client, job, opts)
}
