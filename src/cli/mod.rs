use std::path::PathBuf;

use crate::{framework::config::PATH_VAR, wordle::words::WordId};

#[derive(clap::Parser, Debug)]
#[command(version, about = "Wordle in the terminal, with a word store in MongoDB")]
pub struct Cli {
    /// TOML config file; defaults to ./wordle.toml when present
    #[arg(long, short, env = PATH_VAR)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Play a game in the terminal
    Play {
        /// Play against a newline-separated word list instead of the database
        #[arg(long)]
        words_file: Option<PathBuf>,
    },

    /// Manage the word store
    #[command(subcommand)]
    Words(WordsCommand),

    /// Print the loaded configuration
    Config,
}

impl Command {
    /// Whether the command draws over the whole terminal.
    pub fn is_play(&self) -> bool {
        matches!(self, Self::Play { .. })
    }
}

#[derive(clap::Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum WordsCommand {
    /// Store new words
    Add {
        #[arg(required = true)]
        words: Vec<String>,
    },

    /// List every stored word
    List {
        #[arg(long)]
        json: bool,
    },

    /// Replace the content of a stored word
    Update { id: WordId, word: String },

    /// Check whether a word is in the store
    Check { word: String },

    /// Pick a random word
    Random {
        /// Only pick words of this length
        #[arg(long)]
        length: Option<usize>,
    },

    /// Add the words from a newline-separated file, skipping ones already stored
    Import { path: PathBuf },
}
