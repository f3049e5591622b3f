use std::{collections::HashMap, convert::Infallible};

use rand::seq::IteratorRandom;
use tokio::sync::RwLock;

use super::{Backend, WordRecord};

/// Words kept in memory, in insertion order, with an index of their contents
/// so lookups don't scan every record.
#[derive(Debug, Default)]
pub struct Memory(RwLock<Records>);

#[derive(Debug, Default)]
struct Records {
    records: Vec<WordRecord>,
    /// How many records hold each content.
    contents: HashMap<String, usize>,
}

impl Records {
    fn index(&mut self, content: &str) {
        *self.contents.entry(content.to_owned()).or_default() += 1;
    }

    fn unindex(&mut self, content: &str) {
        if let Some(count) = self.contents.get_mut(content) {
            *count -= 1;
            if *count == 0 {
                self.contents.remove(content);
            }
        }
    }
}

impl Backend for Memory {
    type Error = Infallible;

    async fn insert(&self, record: WordRecord) -> Result<(), Self::Error> {
        let mut guard = self.0.write().await;
        guard.index(&record.content);
        guard.records.push(record);
        Ok(())
    }

    async fn all(&self) -> Result<Vec<WordRecord>, Self::Error> {
        let guard = self.0.read().await;
        Ok(guard.records.clone())
    }

    async fn contains(&self, content: &str) -> Result<bool, Self::Error> {
        let guard = self.0.read().await;
        Ok(guard.contents.contains_key(content))
    }

    async fn random(&self, length: Option<usize>) -> Result<Option<WordRecord>, Self::Error> {
        let guard = self.0.read().await;
        Ok(guard
            .records
            .iter()
            .filter(|record| length.map_or(true, |length| record.length() == length))
            .choose(&mut rand::thread_rng())
            .cloned())
    }

    async fn replace(&self, record: WordRecord) -> Result<Option<WordRecord>, Self::Error> {
        let mut guard = self.0.write().await;

        let Some(position) = guard.records.iter().position(|stored| stored.id == record.id) else {
            return Ok(None);
        };

        let old = std::mem::replace(&mut guard.records[position], record);
        guard.unindex(&old.content);

        let updated = guard.records[position].clone();
        guard.index(&updated.content);

        Ok(Some(updated))
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::Memory;
    use crate::wordle::{
        core::Word,
        words::{Backend, WordRecord},
    };

    fn record(content: &str) -> WordRecord {
        WordRecord::new(&Word::from_str(content).unwrap())
    }

    #[tokio::test]
    async fn index_follows_updates() {
        let memory = Memory::default();
        let cat = record("cat");
        memory.insert(cat.clone()).await.unwrap();

        assert!(memory.contains("cat").await.unwrap());

        let tiger = WordRecord::with_id(cat.id(), &Word::from_str("tiger").unwrap());
        memory.replace(tiger).await.unwrap();

        assert!(!memory.contains("cat").await.unwrap());
        assert!(memory.contains("tiger").await.unwrap());
    }

    #[tokio::test]
    async fn duplicate_contents_are_counted() {
        let memory = Memory::default();
        let first = record("amber");
        memory.insert(first.clone()).await.unwrap();
        memory.insert(record("amber")).await.unwrap();

        let opals = WordRecord::with_id(first.id(), &Word::from_str("opals").unwrap());
        memory.replace(opals).await.unwrap();

        // the second amber is still stored
        assert!(memory.contains("amber").await.unwrap());
        assert!(memory.contains("opals").await.unwrap());
    }

    #[tokio::test]
    async fn large_import_stays_deduplicated() {
        let words = crate::wordle::words::Words::new(Memory::default(), 5);

        let lines: Vec<String> = (0..2000)
            .map(|i| {
                let letter = |n: usize| char::from(b'a' + (n % 26) as u8);
                [i, i / 26, i / 676, 0, 0].map(letter).iter().collect()
            })
            .collect();

        let summary = words.import(lines.iter().chain(lines.iter())).await.unwrap();

        assert_eq!(summary.added, 2000);
        assert_eq!(summary.existing, 2000);
        assert_eq!(words.list().await.unwrap().len(), 2000);
    }
}
