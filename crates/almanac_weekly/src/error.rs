//! Error types for weekly generation.

use almanac_core::CoreError;
use almanac_search::SearchError;
use thiserror::Error;

/// Rejected inputs. Always returned before any sampling begins.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConfigurationError {
    #[error("invalid observer: {0}")]
    InvalidObserver(&'static str),
    #[error("body list is empty")]
    EmptyBodyList,
    #[error("window start is after window end")]
    InvertedWindow,
    #[error("window lies too close to the supported date range")]
    WindowOutOfRange,
    #[error("window spans {days} days, at most {max} allowed")]
    WindowTooLong { days: i64, max: u32 },
    #[error("invalid aspect table: {0}")]
    InvalidAspectTable(&'static str),
    #[error("invalid sampling: {0}")]
    InvalidSampling(&'static str),
    #[error("invalid scoring table: {0}")]
    InvalidScoring(&'static str),
    /// TOML syntax or schema error, with the parser's message.
    #[error("config parse error: {0}")]
    Toml(String),
}

impl From<toml::de::Error> for ConfigurationError {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml(e.to_string())
    }
}

/// Errors from [`crate::generate`].
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum EngineError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    /// Every sample in the window failed; nothing could be computed.
    #[error("position oracle unavailable: all {attempted} samples failed")]
    OracleUnavailable {
        attempted: u64,
        /// Message of the first recorded failure.
        first_error: Option<String>,
    },
    #[error(transparent)]
    Search(#[from] SearchError),
}

impl From<CoreError> for EngineError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::InvalidObserver(msg) => {
                Self::Configuration(ConfigurationError::InvalidObserver(msg))
            }
            other => Self::Search(SearchError::Core(other)),
        }
    }
}
