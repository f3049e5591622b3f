#![warn(clippy::perf)]
#![warn(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info, trace};

mod cli;
use cli::{Cli, Command};

mod commands;

mod errors;
use errors::TracingError;

mod framework;
use framework::Config;

mod play;

mod wordle;
use wordle::words::{Memory, MongoDb, Words};

async fn mongo_words(config: &Config) -> anyhow::Result<Words<MongoDb>> {
    let db = framework::db::database(&config.db)
        .await
        .context("couldn't set up the db client")?;
    let backend = MongoDb::from_database(&db, config.db.collection());

    Ok(Words::new(backend, config.game.word_length).retry_for(config.store.retry_for()))
}

async fn file_words(config: &Config, path: &std::path::Path) -> anyhow::Result<Words<Memory>> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("couldn't read {}", path.display()))?;

    let words = Words::new(Memory::default(), config.game.word_length)
        .retry_for(config.store.retry_for());
    let summary = words.import(contents.lines()).await?;
    debug!(?summary, ?path, "loaded words file");

    Ok(words)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref()).context("couldn't load configuration")?;
    framework::logging::init_tracing(&config.logs, cli.command.is_play())?;

    info!(version = env!("CARGO_PKG_VERSION"), "starting");
    config.log_sources();

    let share = match cli.command {
        Command::Config => {
            print!("{}", toml::to_string_pretty(&config)?);
            None
        }

        Command::Words(command) => {
            let words = mongo_words(&config).await?;
            let result = commands::words::run(command, &words, &mut std::io::stdout().lock()).await;

            if let Err(err) = result {
                err.trace();
                return Err(err.into());
            }
            None
        }

        Command::Play {
            words_file: Some(path),
        } => play::run(file_words(&config, &path).await?, config.dimensions()).await?,

        Command::Play { words_file: None } => {
            play::run(mongo_words(&config).await?, config.dimensions()).await?
        }
    };

    if let Some(share) = share {
        println!("{share}");
    }

    trace!("finished");
    Ok(())
}
