use reqwest::blocking::{Client, Response};
use serde::Deserialize;
use tracing::debug;

use crate::client::{ArchivesClient, ConnectParams};
use crate::domain::{ObjectId, Record, RecordKind};
use crate::error::{BatchError, Result};

const SESSION_HEADER: &str = "X-ArchivesSpace-Session";

#[derive(Deserialize)]
struct LoginResponse {
    session: String,
}

/// The handful of record fields the jobs look at. Everything else stays in
/// the raw payload.
#[derive(Deserialize, Default)]
struct RecordFields {
    #[serde(default)]
    publish: bool,
    #[serde(default)]
    uri: String,
    id_0: Option<String>,
    id_1: Option<String>,
    id_2: Option<String>,
    id_3: Option<String>,
    display_string: Option<String>,
    title: Option<String>,
}

pub(crate) fn record_from_json(body: Vec<u8>) -> Result<Record> {
    let f: RecordFields = serde_json::from_slice(&body)?;
    let identifier_parts = [f.id_0, f.id_1, f.id_2, f.id_3]
        .into_iter()
        .map(Option::unwrap_or_default)
        .collect();
    Ok(Record {
        publish: f.publish,
        uri: f.uri,
        json: body,
        display_label: f.display_string.or(f.title).unwrap_or_default(),
        identifier_parts,
    })
}

/// Blocking client for an ArchivesSpace-style REST API. The session token is
/// obtained once at connect time and reused by every worker.
pub struct HttpArchivesClient {
    http: Client,
    base: String,
    session: String,
}

impl HttpArchivesClient {
    pub fn connect(params: ConnectParams) -> Result<Self> {
        let http = Client::builder().timeout(params.timeout).build()?;
        let base = params.url.trim_end_matches('/').to_string();
        let resp = http
            .post(format!("{base}/users/{}/login", params.username))
            .form(&[("password", params.password.as_str())])
            .send()?;
        let login: LoginResponse = ensure_success(resp)?.json()?;
        debug!(url = %base, user = %params.username, "logged in");
        Ok(Self {
            http,
            base,
            session: login.session,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }
}

fn ensure_success(resp: Response) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().unwrap_or_default();
    Err(BatchError::Remote {
        status: status.as_u16(),
        body,
    })
}

impl ArchivesClient for HttpArchivesClient {
    fn list_object_ids(&self, kind: RecordKind, repository_id: i64) -> Result<Vec<i64>> {
        let path = format!("/repositories/{repository_id}/{}", kind.segment());
        let resp = self
            .http
            .get(self.url(&path))
            .header(SESSION_HEADER, &self.session)
            .query(&[("all_ids", "true")])
            .send()?;
        Ok(ensure_success(resp)?.json()?)
    }

    fn fetch_record(&self, kind: RecordKind, id: ObjectId) -> Result<Record> {
        let resp = self
            .http
            .get(self.url(&id.uri(kind)))
            .header(SESSION_HEADER, &self.session)
            .send()?;
        let body = ensure_success(resp)?.bytes()?;
        record_from_json(body.to_vec())
    }

    fn update_record(&self, kind: RecordKind, id: ObjectId, json: &[u8]) -> Result<(u16, String)> {
        let resp = self
            .http
            .post(self.url(&id.uri(kind)))
            .header(SESSION_HEADER, &self.session)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(json.to_vec())
            .send()?;
        let resp = ensure_success(resp)?;
        let status = resp.status().as_u16();
        Ok((status, resp.text()?))
    }

    fn delete_record(&self, kind: RecordKind, id: ObjectId) -> Result<String> {
        let resp = self
            .http
            .delete(self.url(&id.uri(kind)))
            .header(SESSION_HEADER, &self.session)
            .send()?;
        Ok(ensure_success(resp)?.text()?)
    }
}
