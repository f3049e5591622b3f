use thiserror::Error as ThisError;

mod tracing_error;
pub use tracing_error::TracingError;

use crate::wordle::words;

/// Errors from the command-line word management commands.
#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Words(#[from] words::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("couldn't write json: {0}")]
    Json(#[from] serde_json::Error),
}

impl TracingError for Error {
    fn trace(&self) {
        match self {
            Self::Words(err) => err.trace(),
            Self::Io(err) => tracing::error!(%err, "io error"),
            Self::Json(err) => tracing::error!(%err, "json error"),
        }
    }
}
