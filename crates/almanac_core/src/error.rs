//! Error types for oracle sampling.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::body::Body;

/// Failure reported by a position oracle for a single request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct OracleError {
    pub message: String,
}

impl OracleError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors from the sampling layer.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum CoreError {
    /// Observer coordinates are out of range.
    #[error("invalid observer: {0}")]
    InvalidObserver(&'static str),
    /// The oracle failed for one (body, instant).
    #[error("oracle failed for {body} at {instant}: {source}")]
    Oracle {
        body: Body,
        instant: DateTime<Utc>,
        #[source]
        source: OracleError,
    },
    /// The oracle returned NaN or infinity.
    #[error("oracle returned a non-finite longitude for {body} at {instant}")]
    NonFiniteLongitude { body: Body, instant: DateTime<Utc> },
    /// A derived sample instant fell outside the supported date range.
    #[error("sample instant out of range near {instant}")]
    InstantOutOfRange { instant: DateTime<Utc> },
}

impl CoreError {
    /// The body whose sample failed, if the error is sample-specific.
    pub fn body(&self) -> Option<Body> {
        match self {
            Self::Oracle { body, .. } | Self::NonFiniteLongitude { body, .. } => Some(*body),
            Self::InvalidObserver(_) | Self::InstantOutOfRange { .. } => None,
        }
    }
}
