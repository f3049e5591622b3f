use thiserror::Error;

use crate::{
    errors::TracingError,
    wordle::{
        core::{LengthMismatch, ParseWordError},
        words,
    },
};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Words(#[from] words::Error),

    #[error("target word can't be played: {0}")]
    InvalidTarget(#[from] ParseWordError),

    #[error(transparent)]
    LengthMismatch(#[from] LengthMismatch),

    #[error("the word store checks {store}-letter words but the game uses {game}")]
    StoreLengthMismatch { store: usize, game: usize },
}

impl TracingError for Error {
    fn trace(&self) {
        match self {
            Self::Words(err) => err.trace(),
            other => tracing::error!(err = %other, "session error"),
        }
    }
}
