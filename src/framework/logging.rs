use std::{fs::OpenOptions, sync::Mutex};

use tracing_subscriber::{
    fmt, prelude::__tracing_subscriber_SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

use tracing::{instrument, trace};

use super::config::LogsConfig;

/// Installs the global subscriber.
///
/// `RUST_LOG` wins over the configured filter. Logs go to the configured
/// file when there is one, otherwise to stderr, unless `owns_terminal` is set
/// in which case there is nowhere safe to write them and they are dropped.
#[instrument(skip(config))]
pub fn init_tracing(config: &LogsConfig, owns_terminal: bool) -> anyhow::Result<()> {
    let filter = match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(directives) => EnvFilter::try_new(directives)?,
        Err(_) => EnvFilter::try_new(config.filter())?,
    };

    let file = config
        .file()
        .map(|path| OpenOptions::new().create(true).append(true).open(path))
        .transpose()?;

    let stderr_layer = (file.is_none() && !owns_terminal)
        .then(|| fmt::layer().with_writer(std::io::stderr));
    let file_layer = file.map(|file| fmt::layer().with_ansi(false).with_writer(Mutex::new(file)));

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()?;

    trace!("finished");
    Ok(())
}
