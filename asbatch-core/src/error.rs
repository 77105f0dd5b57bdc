use thiserror::Error;

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Time format error: {0}")]
    Time(#[from] time::error::Format),

    #[error("Worker pool error: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Remote returned {status}: {body}")]
    Remote { status: u16, body: String },

    #[error("Record error: {0}")]
    Record(String),

    #[error("Dispatch error: {0}")]
    Dispatch(String),
}

// Convenient crate-wide result type
pub type Result<T> = std::result::Result<T, BatchError>;
