use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    options::{FindOneAndUpdateOptions, FindOneOptions, ReturnDocument},
    Collection,
};
use rand::Rng;
use tracing::trace;

use super::{Backend, WordRecord};

#[derive(Debug, Clone)]
pub struct MongoDb {
    collection: Collection<WordRecord>,
}

impl MongoDb {
    pub fn new(collection: Collection<WordRecord>) -> Self {
        Self { collection }
    }

    pub fn from_database(db: &mongodb::Database, collection: &str) -> Self {
        Self::new(db.collection(collection))
    }
}

fn length_filter(length: Option<usize>) -> Option<Document> {
    length.map(|length| doc! { "word_length": length as i64 })
}

impl Backend for MongoDb {
    type Error = mongodb::error::Error;

    async fn insert(&self, record: WordRecord) -> Result<(), Self::Error> {
        self.collection.insert_one(record, None).await.map(|_| ())
    }

    async fn all(&self) -> Result<Vec<WordRecord>, Self::Error> {
        self.collection
            .find(None, None)
            .await?
            .try_collect::<Vec<_>>()
            .await
    }

    async fn contains(&self, content: &str) -> Result<bool, Self::Error> {
        self.collection
            .find_one(doc! { "word_content": content }, None)
            .await
            .map(|record| record.is_some())
    }

    async fn random(&self, length: Option<usize>) -> Result<Option<WordRecord>, Self::Error> {
        let filter = length_filter(length);

        let count = self
            .collection
            .count_documents(filter.clone(), None)
            .await?;

        trace!(count, ?length, "picking a random word");

        if count == 0 {
            return Ok(None);
        }

        let skip = rand::thread_rng().gen_range(0..count);

        self.collection
            .find_one(filter, FindOneOptions::builder().skip(skip).build())
            .await
    }

    async fn replace(&self, record: WordRecord) -> Result<Option<WordRecord>, Self::Error> {
        self.collection
            .find_one_and_update(
                doc! { "_id": record.id },
                doc! { "$set": {
                    "word_content": record.content,
                    "word_length": record.length as i64,
                } },
                FindOneAndUpdateOptions::builder()
                    .return_document(ReturnDocument::After)
                    .build(),
            )
            .await
    }
}
