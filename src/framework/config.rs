use std::{
    env,
    path::{Path, PathBuf},
    time::Duration,
};

use ::config::{builder::DefaultState, ConfigBuilder, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;
use tracing::{debug, trace};

use crate::wordle::{Dimensions, InvalidDimensions};

/// Environment variable naming the config file when `--config` isn't given.
pub const PATH_VAR: &str = "WORDLE_TOML";
pub const DEFAULT_PATH: &str = "wordle.toml";

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("couldn't load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("invalid [game] section: {0}")]
    Game(#[from] InvalidDimensions),
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub db: DbConfig,
    #[serde(default)]
    pub game: Dimensions,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub logs: LogsConfig,

    /// Where the settings came from, kept until tracing is up to log it.
    #[serde(skip)]
    sources: Sources,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Sources {
    file: Option<PathBuf>,
    dotenv: Option<PathBuf>,
}

impl Config {
    /// Reads the TOML file at `path` (or `$WORDLE_TOML`, or `./wordle.toml`
    /// if it exists), then applies `WORDLE__SECTION__KEY` overrides.
    ///
    /// This runs before tracing is set up, so nothing is logged here; call
    /// [`Config::log_sources`] once it is.
    pub fn load(path: Option<&Path>) -> Result<Self, Error> {
        let dotenv = dotenvy::dotenv().ok();

        let (path, required) = match path {
            Some(path) => (path.to_owned(), true),
            None => match env::var(PATH_VAR) {
                Ok(path) => (PathBuf::from(path), true),
                Err(_) => (PathBuf::from(DEFAULT_PATH), false),
            },
        };

        let mut config = Self::from_builder(
            ::config::Config::builder()
                .add_source(File::from(path.as_path()).format(FileFormat::Toml).required(required)),
        )?;

        config.sources = Sources {
            file: (required || path.exists()).then_some(path),
            dotenv,
        };
        Ok(config)
    }

    pub fn source_file(&self) -> Option<&Path> {
        self.sources.file.as_deref()
    }

    pub fn log_sources(&self) {
        match self.source_file() {
            Some(path) => debug!(?path, "read config file"),
            None => debug!("no config file, using defaults and environment"),
        }

        if let Some(path) = &self.sources.dotenv {
            trace!(?path, "loaded .env");
        }
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, Error> {
        let config: Self = builder
            .add_source(
                Environment::with_prefix("WORDLE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.game.validated()?;
        Ok(config)
    }

    pub fn dimensions(&self) -> Dimensions {
        self.game
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct DbConfig {
    url: String,
    database: String,
    collection: String,
    username: Option<String>,
    #[serde(skip_serializing)]
    password: Option<String>,
    server_selection_timeout_secs: u64,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            url: "localhost:27017".to_owned(),
            database: "wordle".to_owned(),
            collection: "words".to_owned(),
            username: None,
            password: None,
            server_selection_timeout_secs: 5,
        }
    }
}

impl DbConfig {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Both halves of the credential, or nothing.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => Some((username, password)),
            (Some(_), None) | (None, Some(_)) => {
                tracing::warn!("db username and password must be set together, connecting without credentials");
                None
            }
            (None, None) => None,
        }
    }

    pub fn server_selection_timeout(&self) -> Duration {
        Duration::from_secs(self.server_selection_timeout_secs)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct StoreConfig {
    retry_max_elapsed_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            retry_max_elapsed_ms: 2000,
        }
    }
}

impl StoreConfig {
    pub fn retry_for(&self) -> Duration {
        Duration::from_millis(self.retry_max_elapsed_ms)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(default)]
pub struct LogsConfig {
    filter: Option<String>,
    file: Option<PathBuf>,
}

impl LogsConfig {
    pub const DEFAULT_FILTER: &'static str = "wordle=info";

    pub fn filter(&self) -> &str {
        self.filter.as_deref().unwrap_or(Self::DEFAULT_FILTER)
    }

    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }
}
