//! Error types shared across the library
//!
//! Every variant here is recoverable: the engine turns them into a status
//! message. A failed load leaves the engine `Empty` and a rejected request
//! leaves it as it was.

use thiserror::Error;

/// Failure talking to the boundary data source
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SourceError {
    #[error("bad request (HTTP 400)")]
    BadRequest,
    #[error("rate limited (HTTP 429)")]
    RateLimited,
    #[error("request timed out")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected HTTP status {0}")]
    Http(u16),
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl SourceError {
    /// Classify a non-success HTTP status code
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => SourceError::BadRequest,
            429 => SourceError::RateLimited,
            408 | 504 => SourceError::Timeout,
            other => SourceError::Http(other),
        }
    }

    /// Short human-readable advice for the status line
    pub fn advice(&self) -> String {
        match self {
            SourceError::BadRequest => {
                "Invalid query. Try moving to a different location.".to_string()
            }
            SourceError::RateLimited => {
                "Too many requests. Please wait a moment and try again.".to_string()
            }
            SourceError::Timeout => "Server timeout. Try again later.".to_string(),
            SourceError::Network(_) => "Network error. Check your internet connection.".to_string(),
            SourceError::Http(status) => format!("HTTP {}", status),
            SourceError::Decode(msg) => format!("Unreadable response: {}", msg),
        }
    }
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SourceError::Timeout
        } else if err.is_decode() {
            SourceError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            SourceError::from_status(status.as_u16())
        } else {
            SourceError::Network(err.to_string())
        }
    }
}

/// A relation whose boundary could not be turned into rings
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    #[error("relation {relation_id} has no outer members")]
    NoOuterMembers { relation_id: u64 },
    #[error("relation {relation_id}: outer members did not assemble into a ring")]
    Unassembled { relation_id: u64 },
    #[error("ring is not closed")]
    OpenRing,
    #[error("ring has {0} points, at least 4 are required")]
    TooShort(usize),
}

/// Why `load_near` produced no feature set
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LoadError {
    #[error("no counties found in this area")]
    NoDataFound,
    #[error("a boundary load is already in progress")]
    InFlight,
    #[error("counties are already loaded; deactivate before reloading")]
    AlreadyLoaded,
    #[error(transparent)]
    Source(#[from] SourceError),
}

/// Invalid request against the current selection
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SelectionError {
    #[error("no counties are loaded")]
    NotPopulated,
    #[error("county {0} is not part of the current selection")]
    UnknownFeature(u64),
}
