#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use asbatch_core::client::ArchivesClient;
use asbatch_core::error::{BatchError, Result};
use asbatch_core::{ObjectId, Record, RecordKind};

/// In-memory stand-in for the remote repository.
#[derive(Default)]
pub struct FakeClient {
    pub ids: BTreeMap<i64, Vec<i64>>,
    pub records: HashMap<ObjectId, Record>,
    pub fail_list: bool,
    pub fail_fetch: HashSet<ObjectId>,
    pub fail_update: HashSet<ObjectId>,
    pub fail_delete: HashSet<ObjectId>,
    pub panic_on: HashSet<ObjectId>,
    /// Fetches of these ids sleep first, to hold a worker back.
    pub delay: HashMap<ObjectId, Duration>,
    pub updates: Mutex<Vec<(ObjectId, Vec<u8>)>>,
    pub deletes: Mutex<Vec<ObjectId>>,
}

impl FakeClient {
    pub fn add(&mut self, id: ObjectId, record: Record) {
        self.ids.entry(id.repository_id).or_default().push(id.object_id);
        self.records.insert(id, record);
    }

    pub fn updated(&self) -> Vec<(ObjectId, Vec<u8>)> {
        self.updates.lock().unwrap().clone()
    }

    pub fn deleted(&self) -> Vec<ObjectId> {
        self.deletes.lock().unwrap().clone()
    }
}

pub fn resource(id: ObjectId, publish: bool, ids: &[&str]) -> Record {
    let uri = id.uri(RecordKind::Resource);
    let json = serde_json::json!({
        "uri": uri,
        "publish": publish,
        "title": format!("Resource {}", id.object_id),
    });
    Record {
        publish,
        uri,
        json: serde_json::to_vec(&json).unwrap(),
        display_label: format!("Resource {}", id.object_id),
        identifier_parts: ids.iter().map(|s| s.to_string()).collect(),
    }
}

pub fn top_container(id: ObjectId, label: &str) -> Record {
    let uri = id.uri(RecordKind::TopContainer);
    Record {
        publish: false,
        uri: uri.clone(),
        json: serde_json::to_vec(&serde_json::json!({ "uri": uri, "display_string": label }))
            .unwrap(),
        display_label: label.to_string(),
        identifier_parts: Vec::new(),
    }
}

fn remote_error(body: &str) -> BatchError {
    BatchError::Remote {
        status: 500,
        body: body.to_string(),
    }
}

impl ArchivesClient for FakeClient {
    fn list_object_ids(&self, _kind: RecordKind, repository_id: i64) -> Result<Vec<i64>> {
        if self.fail_list {
            return Err(remote_error("listing unavailable"));
        }
        Ok(self.ids.get(&repository_id).cloned().unwrap_or_default())
    }

    fn fetch_record(&self, _kind: RecordKind, id: ObjectId) -> Result<Record> {
        if let Some(d) = self.delay.get(&id) {
            thread::sleep(*d);
        }
        if self.panic_on.contains(&id) {
            panic!("fake client exploded on {id}");
        }
        if self.fail_fetch.contains(&id) {
            return Err(remote_error("Record not found\nsee server log"));
        }
        self.records
            .get(&id)
            .cloned()
            .ok_or_else(|| remote_error("no such record"))
    }

    fn update_record(&self, _kind: RecordKind, id: ObjectId, json: &[u8]) -> Result<(u16, String)> {
        if self.fail_update.contains(&id) {
            return Err(remote_error("update rejected"));
        }
        self.updates.lock().unwrap().push((id, json.to_vec()));
        Ok((200, "{\"status\":\"Updated\"}\n".to_string()))
    }

    fn delete_record(&self, _kind: RecordKind, id: ObjectId) -> Result<String> {
        if self.fail_delete.contains(&id) {
            return Err(remote_error("delete rejected"));
        }
        self.deletes.lock().unwrap().push(id);
        Ok("{\"status\":\"Deleted\",\n\"id\":1}".to_string())
    }
}
