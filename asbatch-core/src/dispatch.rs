use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crossbeam::channel;
use rayon::ThreadPoolBuilder;
use time::OffsetDateTime;
use tracing::{error, info, warn};

use crate::chunk::split_even;
use crate::client::ArchivesClient;
use crate::domain::{Batch, ObjectId, RecordKind, ResultCode};
use crate::error::{BatchError, Result};
use crate::jobs::Job;
use crate::report::ReportWriter;
use crate::worker::run_worker;

/// Everything one run needs, built by the caller and consumed by [`run`].
pub struct RunContext {
    pub client: Arc<dyn ArchivesClient>,
    pub job: Arc<dyn Job>,
    pub workers: usize,
    pub repositories: Vec<i64>,
    pub out_dir: PathBuf,
    /// Run start time; names the report file.
    pub started: OffsetDateTime,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tally(BTreeMap<ResultCode, usize>);

impl Tally {
    pub fn record(&mut self, code: ResultCode) {
        *self.0.entry(code).or_default() += 1;
    }

    pub fn count(&self, code: ResultCode) -> usize {
        self.0.get(&code).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.0.values().sum()
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<_> = ResultCode::ALL
            .iter()
            .map(|c| format!("{c}={}", self.count(*c)))
            .collect();
        f.write_str(&parts.join(" "))
    }
}

#[derive(Debug)]
pub struct RunSummary {
    pub report_path: PathBuf,
    pub batches: usize,
    pub tally: Tally,
}

/// Enumerate every id of `kind` in `repositories`, in repository order.
/// Duplicates reported by the remote are kept.
pub fn list_ids(
    client: &dyn ArchivesClient,
    kind: RecordKind,
    repositories: &[i64],
) -> Result<Vec<ObjectId>> {
    let mut ids = Vec::new();
    for &repo in repositories {
        let found = client.list_object_ids(kind, repo)?;
        info!(repository = repo, count = found.len(), kind = kind.segment(), "listed ids");
        ids.extend(found.into_iter().map(|oid| ObjectId::new(repo, oid)));
    }
    Ok(ids)
}

/// Run one job end to end: list, chunk, create the report, fan out one
/// worker per chunk, then write each batch to the report as it arrives.
pub fn run(ctx: RunContext) -> Result<RunSummary> {
    let ids = list_ids(ctx.client.as_ref(), ctx.job.kind(), &ctx.repositories)?;
    let chunks = split_even(&ids, ctx.workers)?;
    info!(job = ctx.job.name(), records = ids.len(), workers = ctx.workers, "dispatching");

    // No worker may touch the remote until there is somewhere to record it.
    let mut report = ReportWriter::create(&ctx.out_dir, ctx.job.name(), ctx.started)?;

    let pool = ThreadPoolBuilder::new()
        .num_threads(ctx.workers)
        .thread_name(|i| format!("asbatch-worker-{}", i + 1))
        .panic_handler(|_| error!("worker thread panicked outside record processing"))
        .build()?;
    let (tx, rx) = channel::unbounded::<Batch>();

    for (i, chunk) in chunks.into_iter().enumerate() {
        let worker_id = i + 1;
        let tx = tx.clone();
        let client = Arc::clone(&ctx.client);
        let job = Arc::clone(&ctx.job);
        pool.spawn(move || {
            let outcomes = run_worker(&chunk, worker_id, client.as_ref(), job.as_ref());
            if tx.send(Batch { worker_id, outcomes }).is_err() {
                warn!(worker_id, "receiver gone, batch dropped");
            }
        });
    }
    drop(tx);

    let mut tally = Tally::default();
    for received in 0..ctx.workers {
        let batch = rx.recv().map_err(|_| {
            BatchError::Dispatch(format!(
                "workers exited after {received} of {} batches",
                ctx.workers
            ))
        })?;
        report.write_batch(&batch.outcomes)?;
        for o in &batch.outcomes {
            tally.record(o.code);
        }
        info!(worker_id = batch.worker_id, records = batch.outcomes.len(), "batch written");
    }

    Ok(RunSummary {
        report_path: report.path().to_path_buf(),
        batches: ctx.workers,
        tally,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tally_counts_and_renders_every_code() {
        let mut t = Tally::default();
        t.record(ResultCode::Success);
        t.record(ResultCode::Success);
        t.record(ResultCode::Error);
        assert_eq!(t.count(ResultCode::Success), 2);
        assert_eq!(t.count(ResultCode::Deleted), 0);
        assert_eq!(t.total(), 3);
        assert_eq!(t.to_string(), "SUCCESS=2 SKIPPED=0 ERROR=1 DELETED=0");
    }
}
