//! Worker client error types.

use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

/// Errors surfaced at the client call boundary.
///
/// Transport and worker-reported failures during a job do not appear here;
/// they end the job as a `Failed` state on its watch channel.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("a job is already in flight")]
    JobInFlight,

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

pub type DeliveryResult<T> = Result<T, DeliveryError>;

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("artifact request failed: {0}")]
    RequestFailed(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
