//! Error types for the smartcab crate

use thiserror::Error;

/// Main error type for the smartcab crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("state {state} was read before being ensured in the Q-table")]
    UnseenState { state: String },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("grid dimension {dimension}={value} is too small (minimum {minimum})")]
    InvalidGridDimension {
        dimension: &'static str,
        value: usize,
        minimum: usize,
    },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
