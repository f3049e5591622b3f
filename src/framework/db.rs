use mongodb::{
    options::{ClientOptions, Credential, ServerAddress},
    Client, Database,
};
use tracing::debug;

use super::config::DbConfig;

/// Connects lazily: nothing is sent to the server until the first operation.
///
/// `url` is either a bare `host:port` or a full `mongodb://` connection string.
#[tracing::instrument(skip_all, fields(url = config.url()))]
pub async fn database(config: &DbConfig) -> mongodb::error::Result<Database> {
    let mut options = if config.url().starts_with("mongodb") {
        ClientOptions::parse(config.url()).await?
    } else {
        ClientOptions::builder()
            .hosts(vec![ServerAddress::parse(config.url())?])
            .build()
    };

    options.app_name = Some(env!("CARGO_PKG_NAME").to_owned());
    options.server_selection_timeout = Some(config.server_selection_timeout());

    if let Some((username, password)) = config.credentials() {
        options.credential = Some(
            Credential::builder()
                .username(username.to_owned())
                .password(password.to_owned())
                .build(),
        );
    }

    let database = Client::with_options(options)?.database(config.database());
    debug!(database = database.name(), "db client ready");

    Ok(database)
}
