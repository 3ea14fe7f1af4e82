use async_trait::async_trait;
use bson::{doc, Document};
use mongodb::{Client, Collection};

use crate::error::CleanupResult;

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn list_collections(&self, database: &str) -> CleanupResult<Vec<String>>;

    async fn count_documents(&self, database: &str, collection: &str) -> CleanupResult<u64>;

    /// Removes every document and returns how many the server deleted.
    async fn delete_all(&self, database: &str, collection: &str) -> CleanupResult<u64>;
}

pub struct CollectionCrud {
    client: Client,
}

impl CollectionCrud {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn collection(&self, database: &str, collection: &str) -> Collection<Document> {
        self.client.database(database).collection(collection)
    }

    pub async fn shutdown(self) {
        self.client.shutdown().await;
    }
}

#[async_trait]
impl DocumentStore for CollectionCrud {
    async fn list_collections(&self, database: &str) -> CleanupResult<Vec<String>> {
        Ok(self.client.database(database).list_collection_names().await?)
    }

    async fn count_documents(&self, database: &str, collection: &str) -> CleanupResult<u64> {
        Ok(self
            .collection(database, collection)
            .count_documents(doc! {})
            .await?)
    }

    async fn delete_all(&self, database: &str, collection: &str) -> CleanupResult<u64> {
        let result = self
            .collection(database, collection)
            .delete_many(doc! {})
            .await?;
        Ok(result.deleted_count)
    }
}
