use std::sync::Arc;

use crate::client::{ArchivesClient, ConnectParams};
use crate::client_http::HttpArchivesClient;
use crate::error::Result;

pub enum Backend {
    Http,
}

pub fn open_client(backend: Backend, p: ConnectParams) -> Result<Arc<dyn ArchivesClient>> {
    match backend {
        Backend::Http => Ok(Arc::new(HttpArchivesClient::connect(p)?)),
    }
}
