use std::{collections::HashMap, ops::Index, slice::Iter, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace};

use super::guess::{Guess, Verdict};

/// A lowercase, purely alphabetic word.
///
/// Keeps a count of each letter so that scoring a guess doesn't have to
/// rebuild the multiset every time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Word {
    letters: Vec<char>,
    letter_counts: HashMap<char, usize>,
}

impl Word {
    /// Parses `s` and checks that it has exactly `length` letters.
    pub fn with_length(s: &str, length: usize) -> Result<Self, ParseWordError> {
        let word = Self::from_str(s)?;

        if word.len() != length {
            return Err(ParseWordError::WrongLength {
                word: s.to_owned(),
                expected: length,
                actual: word.len(),
            });
        }

        Ok(word)
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn iter(&self) -> Iter<'_, char> {
        self.letters.iter()
    }

    pub fn to_uppercase(&self) -> String {
        self.to_string().to_uppercase()
    }

    /// Scores `guess` against this word.
    ///
    /// Exact matches are taken out of the letter counts before anything is
    /// marked present, so a duplicated letter in the guess only earns as many
    /// hints as the answer actually has copies of it.
    pub fn guess(&self, guess: &Word) -> Result<Guess, LengthMismatch> {
        if guess.len() != self.len() {
            return Err(LengthMismatch {
                guess: guess.len(),
                answer: self.len(),
            });
        }

        let mut scored = Guess::unscored(guess);
        trace!(answer = %self, guess = %guess);

        let mut letter_counts = self.letter_counts.clone();

        for (index, (letter, verdict)) in scored.iter_mut().enumerate() {
            let letter = *letter;
            if self[index] == letter {
                *verdict = Verdict::Correct;
                if let Some(count) = letter_counts.get_mut(&letter) {
                    *count = count.saturating_sub(1);
                }
            }
        }

        debug!(remaining = ?letter_counts);

        for (letter, verdict) in scored.iter_mut() {
            let letter = *letter;
            if *verdict == Verdict::Correct {
                continue;
            }

            if let Some(count) = letter_counts.get_mut(&letter).filter(|count| **count > 0) {
                trace!("{letter}: present");
                *verdict = Verdict::Present;
                *count -= 1;
            }
        }

        Ok(scored)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseWordError {
    #[error("word must not be empty")]
    Empty,

    #[error("word `{0}` must only contain letters a-z")]
    NotAlphabetic(String),

    #[error("word `{word}` must have {expected} letters but has {actual}")]
    WrongLength {
        word: String,
        expected: usize,
        actual: usize,
    },
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("guess has {guess} letters but the answer has {answer}")]
pub struct LengthMismatch {
    pub guess: usize,
    pub answer: usize,
}

impl FromStr for Word {
    type Err = ParseWordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(ParseWordError::Empty);
        }

        if !trimmed.chars().all(|ch| ch.is_ascii_alphabetic()) {
            return Err(ParseWordError::NotAlphabetic(s.to_owned()));
        }

        let letters = trimmed.to_ascii_lowercase().chars().collect::<Vec<char>>();

        let mut letter_counts: HashMap<char, usize> = HashMap::new();
        for letter in &letters {
            *letter_counts.entry(*letter).or_default() += 1;
        }

        Ok(Self {
            letters,
            letter_counts,
        })
    }
}

impl TryFrom<String> for Word {
    type Error = ParseWordError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str(&value)
    }
}

impl From<Word> for String {
    fn from(value: Word) -> Self {
        value.to_string()
    }
}

impl std::fmt::Display for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letters.iter().collect::<String>())
    }
}

impl Index<usize> for Word {
    type Output = char;

    fn index(&self, index: usize) -> &Self::Output {
        self.letters.index(index)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use pretty_assertions::assert_eq;

    use super::{ParseWordError, Word};

    #[test]
    fn lowercases() {
        let word = Word::from_str("AmBeR").unwrap();
        assert_eq!(word.to_string(), "amber");
        assert_eq!(word.to_uppercase(), "AMBER");
    }

    #[test]
    fn rejects_symbols() {
        assert_eq!(
            Word::from_str("am-er"),
            Err(ParseWordError::NotAlphabetic("am-er".to_owned()))
        );
        assert_eq!(Word::from_str("   "), Err(ParseWordError::Empty));
    }

    #[test]
    fn checks_length() {
        assert!(Word::with_length("amber", 5).is_ok());
        assert_eq!(
            Word::with_length("amberly", 5),
            Err(ParseWordError::WrongLength {
                word: "amberly".to_owned(),
                expected: 5,
                actual: 7
            })
        );
    }

    #[test]
    fn length_mismatch() {
        let answer = Word::from_str("amber").unwrap();
        let guess = Word::from_str("amb").unwrap();
        let err = answer.guess(&guess).unwrap_err();
        assert_eq!((err.guess, err.answer), (3, 5));
    }
}
