use regex::{Regex, RegexBuilder};
use tracing::info;

use crate::client::ArchivesClient;
use crate::domain::{ObjectId, Outcome, RecordKind, ResultCode};
use crate::error::{BatchError, Result};
use crate::jobs::{Job, failed};

/// Deletes top containers whose display label matches a pattern.
pub struct TopContainerPurgeJob {
    pattern: Regex,
}

impl TopContainerPurgeJob {
    /// `pattern` is a regular expression matched case-insensitively anywhere
    /// in the label.
    pub fn new(pattern: &str) -> Result<Self> {
        let pattern = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| BatchError::Config(format!("delete pattern: {e}")))?;
        Ok(Self { pattern })
    }

    pub fn is_candidate(&self, label: &str) -> bool {
        self.pattern.is_match(label)
    }
}

impl Job for TopContainerPurgeJob {
    fn name(&self) -> &'static str {
        "topcontainers"
    }

    fn kind(&self) -> RecordKind {
        RecordKind::TopContainer
    }

    fn noun(&self) -> &'static str {
        "top containers"
    }

    fn progress_every(&self) -> usize {
        100
    }

    fn process(&self, client: &dyn ArchivesClient, id: ObjectId, worker_id: usize) -> Outcome {
        let tc = match client.fetch_record(self.kind(), id) {
            Ok(r) => r,
            Err(e) => return failed(id, "", e, worker_id),
        };
        if !self.is_candidate(&tc.display_label) {
            return Outcome::new(ResultCode::Skipped, tc.uri, "", worker_id);
        }

        match client.delete_record(self.kind(), id) {
            Ok(msg) => {
                let outcome = Outcome::new(ResultCode::Deleted, tc.uri, msg, worker_id);
                info!(worker_id, uri = %outcome.uri, message = %outcome.message, "deleted");
                outcome
            }
            Err(e) => failed(id, &tc.uri, e, worker_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_ignores_case_and_position() {
        let job = TopContainerPurgeJob::new("electronic records").unwrap();
        assert!(job.is_candidate("Electronic Records, Box 1"));
        assert!(job.is_candidate("Box 4 [ELECTRONIC RECORDS]"));
        assert!(!job.is_candidate("Electronic Media, Box 2"));
        assert!(!job.is_candidate(""));
    }

    #[test]
    fn invalid_pattern_is_config_error() {
        assert!(matches!(
            TopContainerPurgeJob::new("(unclosed"),
            Err(BatchError::Config(_))
        ));
    }
}
