use std::{future::Future, str::FromStr, sync::Arc, time::Duration};

use backoff::ExponentialBackoff;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use super::core::Word;

mod error;
pub use error::Error;

mod memory;
pub use memory::Memory;

mod mongodb;
pub use self::mongodb::MongoDb;

#[cfg(test)]
pub(crate) mod testing;

pub type Result<T, E = Error> = std::result::Result<T, E>;

pub type WordId = ::mongodb::bson::oid::ObjectId;

/// A stored word. Field names match the `words` collection documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordRecord {
    #[serde(rename = "_id")]
    id: WordId,
    #[serde(rename = "word_content")]
    content: String,
    #[serde(rename = "word_length")]
    length: u32,
}

impl WordRecord {
    pub fn new(word: &Word) -> Self {
        Self::with_id(WordId::new(), word)
    }

    pub fn with_id(id: WordId, word: &Word) -> Self {
        Self {
            id,
            content: word.to_string(),
            length: u32::try_from(word.len()).unwrap_or(u32::MAX),
        }
    }

    pub fn id(&self) -> WordId {
        self.id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn length(&self) -> usize {
        self.length as usize
    }
}

/// Storage for [`WordRecord`]s.
///
/// Backends only report their own failures; "not found" and "empty" come
/// back as `None` and are turned into errors by [`Words`].
#[allow(async_fn_in_trait)]
pub trait Backend {
    type Error: std::error::Error + Send + Sync + 'static;

    // create
    async fn insert(&self, record: WordRecord) -> Result<(), Self::Error>;

    // read
    async fn all(&self) -> Result<Vec<WordRecord>, Self::Error>;
    async fn contains(&self, content: &str) -> Result<bool, Self::Error>;
    async fn random(&self, length: Option<usize>) -> Result<Option<WordRecord>, Self::Error>;

    // update
    async fn replace(&self, record: WordRecord) -> Result<Option<WordRecord>, Self::Error>;
}

/// The word store, as seen by the game and the CLI.
#[derive(Debug)]
pub struct Words<B> {
    backend: Arc<B>,
    word_length: usize,
    retry_for: Duration,
}

impl<B> Clone for Words<B> {
    fn clone(&self) -> Self {
        Self {
            backend: self.backend.clone(),
            word_length: self.word_length,
            retry_for: self.retry_for,
        }
    }
}

impl<B> Words<B> {
    pub fn new(backend: B, word_length: usize) -> Self {
        Self {
            backend: Arc::new(backend),
            word_length,
            retry_for: Duration::from_secs(2),
        }
    }

    /// How long read operations keep retrying a failing backend.
    pub fn retry_for(mut self, duration: Duration) -> Self {
        self.retry_for = duration;
        self
    }

    pub fn word_length(&self) -> usize {
        self.word_length
    }
}

impl<B: Backend> Words<B> {
    #[instrument(skip(self))]
    pub async fn create(&self, content: &str) -> Result<WordRecord> {
        let word = Word::from_str(content)?;
        let record = WordRecord::new(&word);

        self.backend
            .insert(record.clone())
            .await
            .map_err(Error::unavailable)?;

        info!(id = %record.id, word = %record.content, "created word");
        Ok(record)
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<WordRecord>> {
        self.read("list", || self.backend.all()).await
    }

    #[instrument(skip(self))]
    pub async fn update(&self, id: WordId, content: &str) -> Result<WordRecord> {
        let word = Word::from_str(content)?;

        let updated = self
            .backend
            .replace(WordRecord::with_id(id, &word))
            .await
            .map_err(Error::unavailable)?
            .ok_or(Error::NotFound(id))?;

        info!(%id, word = %updated.content, "updated word");
        Ok(updated)
    }

    /// Case-insensitive dictionary lookup. The word must have the store's
    /// configured length.
    #[instrument(skip(self))]
    pub async fn check_exists(&self, word: &str) -> Result<bool> {
        let word = Word::with_length(word, self.word_length)?.to_string();

        let exists = self
            .read("check_exists", || self.backend.contains(&word))
            .await?;

        debug!(word, exists);
        Ok(exists)
    }

    /// Uniform pick over every stored word.
    #[instrument(skip(self))]
    pub async fn pick_random(&self) -> Result<WordRecord> {
        self.pick(None).await
    }

    /// Uniform pick over the words that fit a game of `length` letters.
    #[instrument(skip(self))]
    pub async fn pick_random_of_length(&self, length: usize) -> Result<WordRecord> {
        self.pick(Some(length)).await
    }

    async fn pick(&self, length: Option<usize>) -> Result<WordRecord> {
        self.read("pick_random", || self.backend.random(length))
            .await?
            .ok_or(Error::EmptyStore { length })
    }

    /// Adds every valid word from `lines` that isn't stored yet.
    #[instrument(skip_all)]
    pub async fn import(
        &self,
        lines: impl IntoIterator<Item = impl AsRef<str>>,
    ) -> Result<ImportSummary> {
        let mut summary = ImportSummary::default();

        for line in lines {
            let line = line.as_ref().trim();
            if line.is_empty() {
                continue;
            }

            let word = match Word::from_str(line) {
                Ok(word) => word,
                Err(err) => {
                    warn!(%err, "skipping line");
                    summary.invalid += 1;
                    continue;
                }
            };

            let content = word.to_string();
            if self.read("import", || self.backend.contains(&content)).await? {
                summary.existing += 1;
                continue;
            }

            self.backend
                .insert(WordRecord::new(&word))
                .await
                .map_err(Error::unavailable)?;
            summary.added += 1;
        }

        info!(?summary, "import finished");
        Ok(summary)
    }

    /// Runs a read against the backend, retrying failures with exponential
    /// backoff until `retry_for` has elapsed. Writes are never retried.
    async fn read<T, F, Fut>(&self, operation: &'static str, mut f: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = std::result::Result<T, B::Error>>,
    {
        let policy: ExponentialBackoff = ExponentialBackoff {
            current_interval: Duration::from_millis(50),
            initial_interval: Duration::from_millis(50),
            max_elapsed_time: Some(self.retry_for),
            ..ExponentialBackoff::default()
        };

        backoff::future::retry_notify(
            policy,
            || {
                let attempt = f();
                async move { attempt.await.map_err(backoff::Error::transient) }
            },
            |err: B::Error, delay: Duration| {
                warn!(operation, %err, ?delay, "word store read failed, retrying");
            },
        )
        .await
        .map_err(Error::unavailable)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub added: usize,
    pub existing: usize,
    pub invalid: usize,
}

#[cfg(test)]
mod tests {
    use super::{testing::Unavailable, Error, WordId, Words};

    type Result<T = ()> = std::result::Result<T, Box<dyn std::error::Error>>;

    #[tokio::test]
    async fn unavailable_store_is_reported() {
        let words = Unavailable::words();

        assert!(matches!(
            words.check_exists("amber").await,
            Err(Error::Unavailable(_))
        ));
        assert!(matches!(
            words.pick_random().await,
            Err(Error::Unavailable(_))
        ));
        assert!(matches!(
            words.create("amber").await,
            Err(Error::Unavailable(_))
        ));
    }

    #[tokio::test]
    async fn input_is_checked_before_the_store() {
        let words = Unavailable::words();

        assert!(matches!(
            words.check_exists("ambers").await,
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            words.create("").await,
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            words.update(WordId::new(), "4mber").await,
            Err(Error::InvalidInput(_))
        ));
    }

    macro_rules! test_backends {
        {$($backend:ty as $mod_name:ident $(#[$attr:meta])* $block:block)+} => {
            $(
            paste::paste! {
                mod [<$mod_name _backend>] {
                    use super::Result;
                    use super::Error;
                    use pretty_assertions::assert_eq;
                    type Words = super::Words<$backend>;

                    #[tracing_test::traced_test]
                    #[tokio::test]
                    $(#[$attr])*
                    async fn create_and_list() -> Result {
                        let (words, _db): (Words, _) = $block;

                        let amber = words.create("Amber").await?;
                        assert_eq!(amber.content(), "amber");
                        assert_eq!(amber.length(), 5);

                        words.create("opals").await?;

                        let listed = words.list().await?;
                        assert_eq!(listed.len(), 2);
                        assert!(listed.contains(&amber));

                        Ok(())
                    }

                    #[tracing_test::traced_test]
                    #[tokio::test]
                    $(#[$attr])*
                    async fn length_follows_content() -> Result {
                        let (words, _db): (Words, _) = $block;

                        let record = words.create("cat").await?;
                        assert_eq!(record.length(), 3);

                        let record = words.update(record.id(), "tiger").await?;
                        assert_eq!(record.length(), 5);
                        assert_eq!(record.content(), "tiger");

                        Ok(())
                    }

                    #[tracing_test::traced_test]
                    #[tokio::test]
                    $(#[$attr])*
                    async fn update_missing() -> Result {
                        let (words, _db): (Words, _) = $block;

                        let id = super::WordId::new();
                        let err = words.update(id, "amber").await.expect_err("store is empty");
                        assert!(matches!(err, Error::NotFound(missing) if missing == id));

                        Ok(())
                    }

                    #[tracing_test::traced_test]
                    #[tokio::test]
                    $(#[$attr])*
                    async fn check_is_case_insensitive() -> Result {
                        let (words, _db): (Words, _) = $block;

                        words.create("amber").await?;

                        assert!(words.check_exists("AMBER").await?);
                        assert!(words.check_exists("amber").await?);
                        assert!(!words.check_exists("opals").await?);
                        assert!(matches!(
                            words.check_exists("amb").await,
                            Err(Error::InvalidInput(_))
                        ));

                        Ok(())
                    }

                    #[tracing_test::traced_test]
                    #[tokio::test]
                    $(#[$attr])*
                    async fn random_pick() -> Result {
                        let (words, _db): (Words, _) = $block;

                        assert!(matches!(
                            words.pick_random().await,
                            Err(Error::EmptyStore { length: None })
                        ));

                        let stored = ["amber", "mummy", "opals", "sonar", "today"];
                        for word in stored {
                            words.create(word).await?;
                        }
                        words.create("cat").await?;

                        for _ in 0..10 {
                            let pick = words.pick_random_of_length(5).await?;
                            assert!(stored.contains(&pick.content()));
                        }

                        assert_eq!(words.pick_random_of_length(3).await?.content(), "cat");
                        assert!(matches!(
                            words.pick_random_of_length(7).await,
                            Err(Error::EmptyStore { length: Some(7) })
                        ));

                        Ok(())
                    }

                    #[tracing_test::traced_test]
                    #[tokio::test]
                    $(#[$attr])*
                    async fn import_skips_duplicates() -> Result {
                        let (words, _db): (Words, _) = $block;

                        words.create("amber").await?;

                        let summary = words
                            .import(["amber", "", "opals", "op4ls", "OPALS", "today"])
                            .await?;

                        assert_eq!(summary.added, 2);
                        assert_eq!(summary.existing, 2);
                        assert_eq!(summary.invalid, 1);
                        assert_eq!(words.list().await?.len(), 3);

                        Ok(())
                    }
                }
            }
            )+
        };
    }

    test_backends! {
        crate::wordle::words::Memory as memory {
            (Words::new(crate::wordle::words::Memory::default(), 5), ())
        }

        crate::wordle::words::MongoDb as mongodb #[ignore = "needs a local mongod binary"] {
            let mongodb = temp_mongo::TempMongo::new()
                .await
                .expect("setting up db should not fail");
            let collection = mongodb.client().database("wordle_test").collection("words");
            (Words::new(crate::wordle::words::MongoDb::new(collection), 5), mongodb)
        }
    }
}
