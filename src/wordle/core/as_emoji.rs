use std::borrow::Cow;

use super::{Guess, Verdict};

pub trait AsEmoji {
    fn as_emoji(&self) -> Cow<'_, str>;
}

impl AsEmoji for Verdict {
    fn as_emoji(&self) -> Cow<'_, str> {
        match self {
            Self::Correct => "🟩", // green square
            Self::Present => "🟨", // yellow square
            Self::Absent => "⬛",  // black square
        }
        .into()
    }
}

impl AsEmoji for Guess {
    fn as_emoji(&self) -> Cow<'_, str> {
        self.iter()
            .map(|(_, verdict)| verdict.as_emoji())
            .collect::<String>()
            .into()
    }
}

/// One line per guess.
impl AsEmoji for [Guess] {
    fn as_emoji(&self) -> Cow<'_, str> {
        self.iter()
            .map(|guess| guess.as_emoji())
            .collect::<Vec<_>>()
            .join("\n")
            .into()
    }
}
