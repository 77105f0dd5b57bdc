use std::fmt::Display;

use tracing::warn;

use crate::client::ArchivesClient;
use crate::domain::{ObjectId, Outcome, RecordKind, ResultCode};

/// Per-record policy a worker applies to each id in its chunk.
///
/// `process` must always return an outcome; failures become
/// [`ResultCode::Error`] outcomes instead of propagating.
pub trait Job: Send + Sync {
    /// Report file prefix, e.g. `ead-locations`.
    fn name(&self) -> &'static str;

    fn kind(&self) -> RecordKind;

    /// Plural noun used in console progress lines.
    fn noun(&self) -> &'static str;

    /// Print progress every this many records.
    fn progress_every(&self) -> usize;

    fn process(&self, client: &dyn ArchivesClient, id: ObjectId, worker_id: usize) -> Outcome;
}

pub(crate) fn failed(id: ObjectId, uri: &str, err: impl Display, worker_id: usize) -> Outcome {
    let outcome = Outcome::new(ResultCode::Error, uri, err.to_string(), worker_id);
    warn!(worker_id, object = %id, error = %outcome.message, "record failed");
    outcome
}

pub mod ead_location;
pub mod top_container;

pub use ead_location::EadLocationJob;
pub use top_container::TopContainerPurgeJob;
