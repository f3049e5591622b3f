use thiserror::Error;

use crate::{errors::TracingError, wordle::core::ParseWordError};

use super::WordId;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid word: {0}")]
    InvalidInput(#[from] ParseWordError),

    #[error("no word with id {0}")]
    NotFound(WordId),

    #[error("there are no {}words in the word store", sized(.length))]
    EmptyStore { length: Option<usize> },

    #[error("word store unavailable: {0}")]
    Unavailable(#[source] Box<dyn std::error::Error + Send + Sync>),
}

fn sized(length: &Option<usize>) -> String {
    length.map_or_else(String::new, |length| format!("{length}-letter "))
}

impl Error {
    pub fn unavailable(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Box::new(error))
    }

    /// Whether the caller did something wrong, as opposed to the store failing.
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::InvalidInput(_) | Self::NotFound(_))
    }
}

impl TracingError for Error {
    fn trace(&self) {
        if self.is_user_error() {
            tracing::warn!(err = %self, "rejected request");
        } else {
            tracing::error!(err = %self, "word store error");
        }
    }
}
