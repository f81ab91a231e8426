//! Error types for event search.

use almanac_core::CoreError;
use thiserror::Error;

/// Errors from detector setup. Per-sample oracle failures are not errors
/// here; they are recorded in [`crate::Diagnostics`].
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum SearchError {
    /// Invalid window or detector parameter.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
    /// Sampling failed where no partial result is possible.
    #[error(transparent)]
    Core(#[from] CoreError),
}
