// asbatch_core/src/domain.rs
use std::fmt;

use time::OffsetDateTime;

use crate::util::sanitize::one_line;

/// Which family of records a job walks; selects the API path segment.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Resource,
    TopContainer,
}

impl RecordKind {
    pub fn segment(self) -> &'static str {
        match self {
            RecordKind::Resource => "resources",
            RecordKind::TopContainer => "top_containers",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ObjectId {
    pub repository_id: i64,
    pub object_id: i64,
}

impl ObjectId {
    pub fn new(repository_id: i64, object_id: i64) -> Self {
        Self {
            repository_id,
            object_id,
        }
    }

    /// API path of this object, e.g. `/repositories/2/resources/55`.
    pub fn uri(self, kind: RecordKind) -> String {
        format!(
            "/repositories/{}/{}/{}",
            self.repository_id,
            kind.segment(),
            self.object_id
        )
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.repository_id, self.object_id)
    }
}

/// A fetched record, reduced to what the jobs inspect plus the raw payload.
#[derive(Clone, Debug, Default)]
pub struct Record {
    pub publish: bool,
    pub uri: String,
    pub json: Vec<u8>,
    pub display_label: String,
    pub identifier_parts: Vec<String>,
}

impl Record {
    /// Join the non-empty identifier parts with `sep`.
    pub fn merged_identifier(&self, sep: &str) -> String {
        self.identifier_parts
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join(sep)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResultCode {
    Success,
    Skipped,
    Error,
    Deleted,
}

impl ResultCode {
    pub const ALL: [ResultCode; 4] = [
        ResultCode::Success,
        ResultCode::Skipped,
        ResultCode::Error,
        ResultCode::Deleted,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ResultCode::Success => "SUCCESS",
            ResultCode::Skipped => "SKIPPED",
            ResultCode::Error => "ERROR",
            ResultCode::Deleted => "DELETED",
        }
    }
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of processing one record. One per object id, never mutated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outcome {
    pub code: ResultCode,
    pub uri: String,
    pub message: String,
    pub timestamp: OffsetDateTime,
    pub worker_id: usize,
}

impl Outcome {
    pub fn new(
        code: ResultCode,
        uri: impl Into<String>,
        message: impl AsRef<str>,
        worker_id: usize,
    ) -> Self {
        Self::at(code, uri, message, worker_id, OffsetDateTime::now_utc())
    }

    pub fn at(
        code: ResultCode,
        uri: impl Into<String>,
        message: impl AsRef<str>,
        worker_id: usize,
        timestamp: OffsetDateTime,
    ) -> Self {
        Self {
            code,
            uri: uri.into(),
            message: one_line(message.as_ref()),
            timestamp,
            worker_id,
        }
    }
}

/// Everything one worker produced for its chunk, sent as a single message.
#[derive(Debug)]
pub struct Batch {
    pub worker_id: usize,
    pub outcomes: Vec<Outcome>,
}
