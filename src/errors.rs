use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContextStoreError {
    /// The request to the store failed or the reading of the response
    /// failed.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The store returned a non-success status code.
    #[error("Status error: {1} (Status {0})")]
    StatusCode(reqwest::StatusCode, String),
    /// The store returned a success status with a body that does not match
    /// the contract.
    #[error("Malformed response: {0}")]
    Malformed(#[from] serde_json::Error),
    /// The store accepted the request but reported an error outcome
    /// (e.g. a duplicate entry).
    #[error("{0}")]
    Rejected(String),
}

pub type ContextStoreResult<T> = Result<T, ContextStoreError>;
