use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("missing configuration: {0}")]
    MissingConfiguration(String),
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    #[error("network error: {0}")]
    Transport(String),
    #[error("api error: {0}")]
    Api(String),
    #[error("configuration error: {0}")]
    Config(String),
}

pub type SyncResult<T> = Result<T, SyncError>;
