use std::collections::BTreeMap;

use super::{Guess, Verdict};

/// The best verdict seen so far for every letter that has been guessed.
///
/// Used to colour the keyboard. A letter never moves down the
/// `Correct > Present > Absent` ladder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyHints(BTreeMap<char, Verdict>);

impl KeyHints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, guess: &Guess) {
        for &(letter, verdict) in guess.iter() {
            self.0
                .entry(letter)
                .and_modify(|best| *best = (*best).max(verdict))
                .or_insert(verdict);
        }
    }

    pub fn get(&self, letter: char) -> Option<Verdict> {
        self.0.get(&letter.to_ascii_lowercase()).copied()
    }

}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::{super::Word, KeyHints, Verdict};

    fn score(answer: &str, guess: &str) -> super::Guess {
        Word::from_str(answer)
            .unwrap()
            .guess(&Word::from_str(guess).unwrap())
            .unwrap()
    }

    #[test]
    fn keeps_best_verdict() {
        let mut hints = KeyHints::new();

        hints.record(&score("amber", "arbor"));
        assert_eq!(hints.get('r'), Some(Verdict::Correct));
        assert_eq!(hints.get('o'), Some(Verdict::Absent));

        // r is present-but-misplaced here; it must stay correct
        hints.record(&score("amber", "rumba"));
        assert_eq!(hints.get('r'), Some(Verdict::Correct));
        assert_eq!(hints.get('u'), Some(Verdict::Absent));
        assert_eq!(hints.get('m'), Some(Verdict::Present));
    }

    #[test]
    fn correct_is_never_downgraded() {
        let mut hints = KeyHints::new();

        hints.record(&score("allow", "lolly"));
        assert_eq!(hints.get('L'), Some(Verdict::Correct));

        for guess in ["llama", "hello", "skill", "plumb"] {
            hints.record(&score("allow", guess));
            assert_eq!(hints.get('l'), Some(Verdict::Correct), "after {guess}");
        }
    }

    #[test]
    fn duplicate_letters_in_one_guess() {
        let mut hints = KeyHints::new();

        // the second l scores absent, the third correct: the key shows correct
        hints.record(&score("allow", "lolly"));
        assert_eq!(hints.get('l'), Some(Verdict::Correct));
        assert_eq!(hints.get('y'), Some(Verdict::Absent));
        assert_eq!(hints.get('a'), None);

        // recording the same guess again changes nothing
        let once = hints.clone();
        hints.record(&score("allow", "lolly"));
        assert_eq!(hints, once);
    }
}
