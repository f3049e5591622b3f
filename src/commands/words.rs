use std::io::Write;

use serde::Serialize;
use tracing::instrument;

use crate::{
    cli::WordsCommand,
    errors::Error,
    wordle::words::{Backend, WordRecord, Words},
};

/// What `words list --json` prints for each record.
#[derive(Serialize, Debug)]
struct WordJson<'a> {
    id: String,
    content: &'a str,
    length: usize,
}

impl<'a> From<&'a WordRecord> for WordJson<'a> {
    fn from(record: &'a WordRecord) -> Self {
        Self {
            id: record.id().to_hex(),
            content: record.content(),
            length: record.length(),
        }
    }
}

#[instrument(skip(words, out))]
pub async fn run<B: Backend>(
    command: WordsCommand,
    words: &Words<B>,
    out: &mut impl Write,
) -> Result<(), Error> {
    match command {
        WordsCommand::Add { words: contents } => {
            for content in contents {
                let record = words.create(&content).await?;
                writeln!(out, "added {} ({})", record.content(), record.id())?;
            }
        }

        WordsCommand::List { json } => {
            let records = words.list().await?;

            if json {
                let records: Vec<WordJson> = records.iter().map(WordJson::from).collect();
                serde_json::to_writer_pretty(&mut *out, &records)?;
                writeln!(out)?;
            } else {
                for record in &records {
                    writeln!(out, "{}  {}  {}", record.id(), record.content(), record.length())?;
                }
            }
        }

        WordsCommand::Update { id, word } => {
            let record = words.update(id, &word).await?;
            writeln!(out, "updated {} to {}", record.id(), record.content())?;
        }

        WordsCommand::Check { word } => {
            let verdict = if words.check_exists(&word).await? {
                "is"
            } else {
                "is not"
            };
            writeln!(out, "{} {verdict} in the word list", word.to_uppercase())?;
        }

        WordsCommand::Random { length } => {
            let record = match length {
                Some(length) => words.pick_random_of_length(length).await?,
                None => words.pick_random().await?,
            };
            writeln!(out, "{}", record.content())?;
        }

        WordsCommand::Import { path } => {
            let contents = tokio::fs::read_to_string(&path).await?;
            let summary = words.import(contents.lines()).await?;
            writeln!(
                out,
                "added {}, {} already stored, {} invalid",
                summary.added, summary.existing, summary.invalid
            )?;
        }
    }

    Ok(())
}
