use thiserror::Error;

pub type Result<T> = std::result::Result<T, DigestError>;

/// Error taxonomy for a digest run.
///
/// Configuration and remote-query failures are fatal: the run aborts before
/// any summary file is written. Shape irregularities inside the fetched
/// dataset are absorbed by the aggregator with safe defaults and never
/// surface here.
#[derive(Error, Debug)]
pub enum DigestError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("GitHub query failed: {0}")]
    RemoteQuery(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
