use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use tracing::debug;

use crate::client::ArchivesClient;
use crate::domain::{ObjectId, Outcome, ResultCode};
use crate::jobs::Job;

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "unknown panic"
    }
}

/// Process one chunk sequentially and return one outcome per id, in chunk
/// order. A record that fails (or panics) becomes an ERROR outcome and the
/// loop moves on.
pub fn run_worker(
    chunk: &[ObjectId],
    worker_id: usize,
    client: &dyn ArchivesClient,
    job: &dyn Job,
) -> Vec<Outcome> {
    println!(
        "* worker {worker_id} started, processing {} {}",
        chunk.len(),
        job.noun()
    );
    let every = job.progress_every().max(1);
    let mut outcomes = Vec::with_capacity(chunk.len());

    for (i, &id) in chunk.iter().enumerate() {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| job.process(client, id, worker_id)))
            .unwrap_or_else(|payload| {
                Outcome::new(
                    ResultCode::Error,
                    id.uri(job.kind()),
                    format!("panic while processing: {}", panic_message(payload.as_ref())),
                    worker_id,
                )
            });
        outcomes.push(outcome);

        let done = i + 1;
        if done % every == 0 {
            println!("* worker {worker_id} completed {done} {}", job.noun());
        }
    }

    debug!(worker_id, records = outcomes.len(), "chunk finished");
    outcomes
}
