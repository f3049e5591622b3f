use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod core;
pub mod session;
pub mod words;

pub use session::Session;

/// The shape of a game: how long the words are and how many rows the grid has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dimensions {
    pub word_length: usize,
    pub attempts: usize,
}

impl Dimensions {
    pub const CLASSIC: Self = Self {
        word_length: 5,
        attempts: 6,
    };

    pub fn new(word_length: usize, attempts: usize) -> Result<Self, InvalidDimensions> {
        if word_length == 0 || attempts == 0 {
            return Err(InvalidDimensions {
                word_length,
                attempts,
            });
        }

        Ok(Self {
            word_length,
            attempts,
        })
    }

    pub fn validated(self) -> Result<Self, InvalidDimensions> {
        Self::new(self.word_length, self.attempts)
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self::CLASSIC
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("a game needs at least one letter and one attempt (got {word_length} letters, {attempts} attempts)")]
pub struct InvalidDimensions {
    word_length: usize,
    attempts: usize,
}
