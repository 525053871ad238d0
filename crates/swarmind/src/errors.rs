use std::time::Duration;

use thiserror::Error;

pub type TransportError = Box<dyn std::error::Error + Send + Sync>;

#[non_exhaustive]
#[derive(Error, Debug)]
pub enum SwarmindError {
    #[error("failed to process request URL: {0}")]
    InvalidUrl(String),

    #[error("failed to create request: {0}")]
    InvalidRequest(String),

    #[error("doing request: {0}")]
    Transport(#[source] TransportError),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("{status} status code response: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("marshaling messages: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("decoding response body: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("message {id} has no content")]
    MissingContent { id: String },
}

impl SwarmindError {
    /// The HTTP status code, if the store answered with an unexpected one
    pub fn status(&self) -> Option<u16> {
        match self {
            SwarmindError::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<url::ParseError> for SwarmindError {
    fn from(err: url::ParseError) -> Self {
        SwarmindError::InvalidUrl(err.to_string())
    }
}

pub type SwarmindResult<T> = Result<T, SwarmindError>;
