mod as_emoji;
pub use as_emoji::AsEmoji;

pub mod guess;
pub use guess::{Guess, Verdict};

mod hints;
pub use hints::KeyHints;

mod word;
pub use word::{LengthMismatch, ParseWordError, Word};
