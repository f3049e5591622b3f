use tracing::{debug, info, instrument};

use super::{
    core::{AsEmoji, Guess, KeyHints, Word},
    words::{Backend, Words},
    Dimensions,
};

mod error;
pub use error::Error;

mod grid;
pub use grid::{Cell, Grid};

pub type Result<T, E = Error> = std::result::Result<T, E>;

pub const WIN_MESSAGE: &str = "you guessed it";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Playing,
    Won,
    Lost,
}

/// What the player asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Letter(char),
    Delete,
    Submit,
    NewGame,
}

/// What a command did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The command wasn't valid in the current state and changed nothing.
    Ignored,
    Typed(char),
    Deleted,
    /// The guess isn't in the word store; the row was cleared for another try.
    NotAWord(String),
    Scored(Guess),
    Won(Guess),
    Lost(Guess),
    NewGame,
}

/// One game in progress.
///
/// Commands that reach the word store take `&mut self` over the lookup and
/// only touch the session once it has answered, so a failed or abandoned
/// lookup leaves the session exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    dimensions: Dimensions,
    grid: Grid,
    row: usize,
    col: usize,
    target: Word,
    state: State,
    submitted: Vec<bool>,
    hints: KeyHints,
    guesses: Vec<Guess>,
    message: String,
}

impl Session {
    /// Starts a game against a random word from `words`.
    #[instrument(skip(words))]
    pub async fn start<B: Backend>(words: &Words<B>, dimensions: Dimensions) -> Result<Self> {
        let target = Self::fetch_target(words, dimensions).await?;
        Ok(Self::fresh(target, dimensions))
    }

    #[cfg(test)]
    pub fn with_target(target: &str, dimensions: Dimensions) -> Result<Self> {
        let target = Word::with_length(target, dimensions.word_length)?;
        Ok(Self::fresh(target, dimensions))
    }

    fn fresh(target: Word, dimensions: Dimensions) -> Self {
        Self {
            dimensions,
            grid: Grid::new(dimensions),
            row: 0,
            col: 0,
            target,
            state: State::Playing,
            submitted: vec![false; dimensions.attempts],
            hints: KeyHints::new(),
            guesses: Vec::with_capacity(dimensions.attempts),
            message: String::new(),
        }
    }

    async fn fetch_target<B: Backend>(words: &Words<B>, dimensions: Dimensions) -> Result<Word> {
        if words.word_length() != dimensions.word_length {
            return Err(Error::StoreLengthMismatch {
                store: words.word_length(),
                game: dimensions.word_length,
            });
        }

        let record = words
            .pick_random_of_length(dimensions.word_length)
            .await?;

        debug!(id = %record.id(), "picked target");
        Ok(Word::with_length(record.content(), dimensions.word_length)?)
    }

    pub async fn apply<B: Backend>(
        &mut self,
        command: Command,
        words: &Words<B>,
    ) -> Result<Outcome> {
        match command {
            Command::Letter(letter) => Ok(self.push_letter(letter)),
            Command::Delete => Ok(self.delete()),
            Command::Submit => self.submit(words).await,
            Command::NewGame => self.new_game(words).await,
        }
    }

    fn accepts_input(&self) -> bool {
        self.state == State::Playing && !self.submitted[self.row]
    }

    pub fn push_letter(&mut self, letter: char) -> Outcome {
        if !self.accepts_input()
            || self.col >= self.dimensions.word_length
            || !letter.is_ascii_alphabetic()
        {
            return Outcome::Ignored;
        }

        let letter = letter.to_ascii_lowercase();
        self.grid.set(self.row, self.col, Cell::Letter(letter));
        self.col += 1;
        self.message.clear();

        Outcome::Typed(letter)
    }

    pub fn delete(&mut self) -> Outcome {
        if !self.accepts_input() || self.col == 0 {
            return Outcome::Ignored;
        }

        self.col -= 1;
        self.grid.set(self.row, self.col, Cell::Empty);
        self.message.clear();

        Outcome::Deleted
    }

    /// Scores the current row.
    ///
    /// Guessing the target wins without asking the word store. Any other
    /// guess has to be in the store; if it isn't, the row is cleared and
    /// the attempt doesn't count.
    #[instrument(skip_all, fields(row = self.row))]
    pub async fn submit<B: Backend>(&mut self, words: &Words<B>) -> Result<Outcome> {
        if !self.accepts_input() || self.col != self.dimensions.word_length {
            return Ok(Outcome::Ignored);
        }

        let guess = Word::with_length(
            &self.grid.word_in_row(self.row),
            self.dimensions.word_length,
        )?;

        if guess == self.target {
            return self.score(&guess);
        }

        if !words.check_exists(&guess.to_string()).await? {
            debug!(%guess, "not in word list");

            self.grid.clear_row(self.row);
            self.col = 0;
            self.message = format!("{} is not in the word list", guess.to_uppercase());

            return Ok(Outcome::NotAWord(guess.to_string()));
        }

        self.score(&guess)
    }

    fn score(&mut self, guess: &Word) -> Result<Outcome> {
        let scored = self.target.guess(guess)?;

        self.grid.score_row(self.row, &scored);
        self.submitted[self.row] = true;
        self.hints.record(&scored);
        self.guesses.push(scored.clone());

        if scored.is_correct() {
            info!(guesses = self.guesses.len(), "won");
            self.state = State::Won;
            self.message = WIN_MESSAGE.to_owned();
            Ok(Outcome::Won(scored))
        } else if self.row + 1 == self.dimensions.attempts {
            info!(answer = %self.target, "lost");
            self.state = State::Lost;
            self.message = format!("the word was {}", self.target.to_uppercase());
            Ok(Outcome::Lost(scored))
        } else {
            self.row += 1;
            self.col = 0;
            self.message.clear();
            Ok(Outcome::Scored(scored))
        }
    }

    /// Replaces this game with a fresh one. The new target is fetched first,
    /// so on failure the current game carries on untouched.
    #[instrument(skip_all)]
    pub async fn new_game<B: Backend>(&mut self, words: &Words<B>) -> Result<Outcome> {
        let target = Self::fetch_target(words, self.dimensions).await?;
        *self = Self::fresh(target, self.dimensions);

        info!("new game");
        Ok(Outcome::NewGame)
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn is_over(&self) -> bool {
        self.state != State::Playing
    }

    pub fn is_row_submitted(&self, row: usize) -> bool {
        self.submitted.get(row).copied().unwrap_or(false)
    }

    pub fn hints(&self) -> &KeyHints {
        &self.hints
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The classic spoiler-free result grid, once the game is over.
    pub fn share_text(&self) -> Option<String> {
        let score = match self.state {
            State::Playing => return None,
            State::Won => self.guesses.len().to_string(),
            State::Lost => "X".to_owned(),
        };

        Some(format!(
            "wordle {score}/{attempts}\n\n{grid}",
            attempts = self.dimensions.attempts,
            grid = self.guesses.as_emoji()
        ))
    }
}
