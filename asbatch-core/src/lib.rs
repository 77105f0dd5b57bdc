#![forbid(unsafe_code)]

pub mod config;
pub mod domain;
pub mod error;

pub mod util {
    pub mod sanitize;
}

pub mod client;
pub mod client_factory;
pub mod client_http;

pub mod chunk;
pub mod jobs;
pub mod report;
pub mod worker;

pub mod dispatch;

// Re-exports: stable API surface
pub use config::Config;
pub use dispatch::{RunContext, RunSummary, run};
pub use domain::{ObjectId, Outcome, Record, RecordKind, ResultCode};
pub use jobs::Job;
