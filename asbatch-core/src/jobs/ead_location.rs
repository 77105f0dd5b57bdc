use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::info;

use crate::client::ArchivesClient;
use crate::config::Config;
use crate::domain::{ObjectId, Outcome, Record, RecordKind, ResultCode};
use crate::error::BatchError;
use crate::jobs::{Job, failed};

pub const NOT_PUBLISHED: &str = "Resource not set to Publish";

/// Points each published resource's `ead_location` at its finding aid.
pub struct EadLocationJob {
    base: String,
    repository_codes: BTreeMap<i64, String>,
}

impl EadLocationJob {
    pub fn new(base: impl Into<String>, repository_codes: BTreeMap<i64, String>) -> Self {
        Self {
            base: base.into(),
            repository_codes,
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(cfg.finding_aids_base.clone(), cfg.repository_codes.clone())
    }

    /// `{base}/{repo code}/{lowercased identifier parts joined by "_"}`;
    /// `None` when the repository has no code.
    pub fn location_for(&self, repository_id: i64, record: &Record) -> Option<String> {
        let code = self.repository_codes.get(&repository_id)?;
        Some(format!(
            "{}/{}/{}",
            self.base.trim_end_matches('/'),
            code,
            record.merged_identifier("_").to_lowercase()
        ))
    }
}

impl Job for EadLocationJob {
    fn name(&self) -> &'static str {
        "ead-locations"
    }

    fn kind(&self) -> RecordKind {
        RecordKind::Resource
    }

    fn noun(&self) -> &'static str {
        "resources"
    }

    fn progress_every(&self) -> usize {
        25
    }

    fn process(&self, client: &dyn ArchivesClient, id: ObjectId, worker_id: usize) -> Outcome {
        let record = match client.fetch_record(self.kind(), id) {
            Ok(r) => r,
            Err(e) => return failed(id, "", e, worker_id),
        };
        if !record.publish {
            return Outcome::new(ResultCode::Skipped, record.uri, NOT_PUBLISHED, worker_id);
        }

        let Some(location) = self.location_for(id.repository_id, &record) else {
            let err = BatchError::Record(format!(
                "no repository code for repository {}",
                id.repository_id
            ));
            return failed(id, &record.uri, err, worker_id);
        };

        let mut payload: Map<String, Value> = match serde_json::from_slice(&record.json) {
            Ok(p) => p,
            Err(e) => return failed(id, &record.uri, e, worker_id),
        };
        payload.insert("ead_location".to_string(), Value::String(location));
        let body = match serde_json::to_vec(&payload) {
            Ok(b) => b,
            Err(e) => return failed(id, &record.uri, e, worker_id),
        };

        match client.update_record(self.kind(), id, &body) {
            Ok((status, msg)) => {
                let outcome = Outcome::new(
                    ResultCode::Success,
                    record.uri,
                    format!("{status}: {msg}"),
                    worker_id,
                );
                info!(worker_id, uri = %outcome.uri, message = %outcome.message, "updated");
                outcome
            }
            Err(e) => failed(id, &record.uri, e, worker_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job() -> EadLocationJob {
        EadLocationJob::new(
            "https://findingaids.example.edu/",
            BTreeMap::from([(3, "fales".to_string())]),
        )
    }

    #[test]
    fn location_lowercases_and_joins_identifiers() {
        let r = Record {
            identifier_parts: vec!["MSS".into(), "042".into(), "".into(), "".into()],
            ..Default::default()
        };
        assert_eq!(
            job().location_for(3, &r).as_deref(),
            Some("https://findingaids.example.edu/fales/mss_042")
        );
    }

    #[test]
    fn unknown_repository_has_no_location() {
        assert_eq!(job().location_for(9, &Record::default()), None);
    }
}
