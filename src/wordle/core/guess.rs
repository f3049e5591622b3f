use std::{
    ops::{Index, IndexMut},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Word;

/// A scored guess: each letter paired with its verdict.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guess {
    letters: Vec<(char, Verdict)>,
}

impl Guess {
    pub(super) fn unscored(word: &Word) -> Self {
        let letters = word
            .iter()
            .map(|ch| (ch.to_ascii_lowercase(), Verdict::Absent))
            .collect();

        Self { letters }
    }

    pub fn is_correct(&self) -> bool {
        self.letters
            .iter()
            .all(|(_, verdict)| *verdict == Verdict::Correct)
    }

    pub fn verdicts(&self) -> impl Iterator<Item = Verdict> + '_ {
        self.letters.iter().map(|(_, verdict)| *verdict)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(char, Verdict)> + '_ {
        self.letters.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut (char, Verdict)> + '_ {
        self.letters.iter_mut()
    }
}

impl IntoIterator for Guess {
    type Item = (char, Verdict);
    type IntoIter = std::vec::IntoIter<(char, Verdict)>;

    fn into_iter(self) -> Self::IntoIter {
        self.letters.into_iter()
    }
}

impl Index<usize> for Guess {
    type Output = (char, Verdict);

    fn index(&self, index: usize) -> &Self::Output {
        self.letters.index(index)
    }
}

impl IndexMut<usize> for Guess {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        self.letters.index_mut(index)
    }
}

/// Renders the verdict codes, e.g. `O.o..`.
impl std::fmt::Display for Guess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for verdict in self.verdicts() {
            write!(f, "{verdict}")?;
        }

        Ok(())
    }
}

impl PartialEq<&str> for Guess {
    fn eq(&self, other: &&str) -> bool {
        &self.to_string() == other
    }
}

/// How a single letter of a guess scored.
///
/// Ordered by strength, so the best verdict for a letter is simply the max.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize,
)]
pub enum Verdict {
    /// Not in the answer, or every copy in the answer is already accounted for.
    #[default]
    Absent,
    /// In the answer, somewhere else.
    Present,
    /// Right letter, right place.
    Correct,
}

impl Verdict {
    pub const fn code(self) -> char {
        match self {
            Self::Correct => 'O',
            Self::Present => 'o',
            Self::Absent => '.',
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("`{0}` is not a verdict code, expected `O`, `o` or `.`")]
pub struct ParseVerdictError(String);

impl FromStr for Verdict {
    type Err = ParseVerdictError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "O" => Ok(Self::Correct),
            "o" => Ok(Self::Present),
            "." => Ok(Self::Absent),
            other => Err(ParseVerdictError(other.to_owned())),
        }
    }
}
