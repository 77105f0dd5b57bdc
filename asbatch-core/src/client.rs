// asbatch_core/src/client.rs
use std::time::Duration;

use crate::domain::{ObjectId, Record, RecordKind};
use crate::error::Result;

#[derive(Clone, Debug)]
pub struct ConnectParams {
    pub url: String,
    pub username: String,
    pub password: String,
    pub timeout: Duration,
}

/// The remote repository as the workers see it. Shared across worker
/// threads, so implementations must be callable concurrently.
pub trait ArchivesClient: Send + Sync {
    fn list_object_ids(&self, kind: RecordKind, repository_id: i64) -> Result<Vec<i64>>;

    fn fetch_record(&self, kind: RecordKind, id: ObjectId) -> Result<Record>;

    /// Returns the HTTP status and the response message.
    fn update_record(&self, kind: RecordKind, id: ObjectId, json: &[u8]) -> Result<(u16, String)>;

    fn delete_record(&self, kind: RecordKind, id: ObjectId) -> Result<String>;
}
