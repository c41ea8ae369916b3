use thiserror::Error;

use crate::session::SessionError;

#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The API rejected the stored token. The session has already been cleared.
    #[error("Unauthorized")]
    Unauthorized,

    /// Non-success response carrying the server's own message.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Connection error: {0}")]
    Transport(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl From<reqwest::Error> for RepositoryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RepositoryError::InvalidResponse(err.to_string())
        } else {
            RepositoryError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::InvalidResponse(err.to_string())
    }
}
