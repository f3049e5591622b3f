use std::time::Duration;

use super::{Backend, Memory, WordRecord, Words};

/// A backend whose every call fails, for checking error paths.
#[derive(Debug, Default)]
pub(crate) struct Unavailable;

impl Unavailable {
    fn error() -> std::io::Error {
        std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "store is down")
    }

    pub(crate) fn words() -> Words<Self> {
        Words::new(Self, 5).retry_for(Duration::ZERO)
    }
}

impl Backend for Unavailable {
    type Error = std::io::Error;

    async fn insert(&self, _: WordRecord) -> std::io::Result<()> {
        Err(Self::error())
    }

    async fn all(&self) -> std::io::Result<Vec<WordRecord>> {
        Err(Self::error())
    }

    async fn contains(&self, _: &str) -> std::io::Result<bool> {
        Err(Self::error())
    }

    async fn random(&self, _: Option<usize>) -> std::io::Result<Option<WordRecord>> {
        Err(Self::error())
    }

    async fn replace(&self, _: WordRecord) -> std::io::Result<Option<WordRecord>> {
        Err(Self::error())
    }
}

/// An in-memory store holding `words`.
pub(crate) async fn memory_words(words: &[&str]) -> Words<Memory> {
    let store = Words::new(Memory::default(), 5);

    for word in words {
        store
            .create(word)
            .await
            .expect("memory store should accept test words");
    }

    store
}
