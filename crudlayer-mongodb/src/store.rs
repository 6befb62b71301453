use async_trait::async_trait;
use bson::{Bson, Document, Uuid, doc};
use futures::TryStreamExt;
use mongodb::{
    Client, Collection as MongoCollection, IndexModel,
    options::{ClientOptions, FindOptions, IndexOptions},
};
use tracing::debug;

use crudlayer_core::{
    mapper::RawStoreError,
    store::{EntityStore, RawResult},
};

use crate::raw::raw_from_driver;

/// MongoDB-backed entity store.
///
/// Entities are stored one per document, with the entity id doubling as the
/// document `_id`. Queries sort on `_id` so pagination is stable across
/// requests.
#[derive(Debug, Clone)]
pub struct MongoStore {
    client: Client,
    database: String,
}

impl MongoStore {
    pub fn new(client: Client, database: String) -> Self {
        Self { client, database }
    }

    pub fn builder(dsn: &str, database: &str) -> MongoStoreBuilder {
        MongoStoreBuilder::new(dsn, database)
    }

    fn get_collection(&self, collection_name: &str) -> MongoCollection<Document> {
        self.client
            .database(&self.database)
            .collection(collection_name)
    }

    /// Rewrites an entity document for storage, installing the id as `_id`.
    fn prepare_document(&self, id: &Uuid, document: &Bson) -> RawResult<Document> {
        let fields = document
            .as_document()
            .cloned()
            .ok_or_else(|| RawStoreError::new("InvalidArgument", "expected a document"))?;

        Ok(Document::from_iter(
            fields
                .into_iter()
                .chain(vec![("_id".to_string(), id.into())]),
        ))
    }

    /// Strips the storage-only `_id` field before handing a document back.
    fn restore_document(&self, document: Document) -> Bson {
        Bson::Document(Document::from_iter(
            document.into_iter().filter(|(k, _)| k != "_id"),
        ))
    }

    /// Creates a unique index on a field of a collection, so that writes
    /// duplicating an existing value fail with the server's duplicate-key
    /// code.
    pub async fn ensure_unique_index(&self, collection: &str, field: &str) -> RawResult<()> {
        self.get_collection(collection)
            .create_index(
                IndexModel::builder()
                    .keys(doc! { field: 1 })
                    .options(IndexOptions::builder().unique(true).build())
                    .build(),
            )
            .await
            .map_err(|e| raw_from_driver(&e))?;

        debug!(collection, field, "ensured unique index");

        Ok(())
    }

    pub async fn shutdown(self) {
        self.client.shutdown().await;
    }
}

#[async_trait]
impl EntityStore for MongoStore {
    async fn insert_one(&self, id: Uuid, document: Bson, collection: &str) -> RawResult<()> {
        self.get_collection(collection)
            .insert_one(self.prepare_document(&id, &document)?)
            .await
            .map_err(|e| raw_from_driver(&e))?;

        Ok(())
    }

    async fn replace_one(&self, id: Uuid, document: Bson, collection: &str) -> RawResult<bool> {
        let result = self
            .get_collection(collection)
            .replace_one(doc! { "_id": id }, self.prepare_document(&id, &document)?)
            .await
            .map_err(|e| raw_from_driver(&e))?;

        Ok(result.matched_count > 0)
    }

    async fn delete_one(&self, id: Uuid, collection: &str) -> RawResult<bool> {
        let result = self
            .get_collection(collection)
            .delete_one(doc! { "_id": id })
            .await
            .map_err(|e| raw_from_driver(&e))?;

        Ok(result.deleted_count > 0)
    }

    async fn find_by_id(&self, id: Uuid, collection: &str) -> RawResult<Option<Bson>> {
        Ok(self
            .get_collection(collection)
            .find_one(doc! { "_id": id })
            .await
            .map_err(|e| raw_from_driver(&e))?
            .map(|doc| self.restore_document(doc)))
    }

    async fn find_one(&self, filter: Document, collection: &str) -> RawResult<Option<Bson>> {
        Ok(self
            .get_collection(collection)
            .find_one(filter)
            .await
            .map_err(|e| raw_from_driver(&e))?
            .map(|doc| self.restore_document(doc)))
    }

    async fn find_many(
        &self,
        filter: Document,
        skip: Option<u64>,
        limit: Option<i64>,
        collection: &str,
    ) -> RawResult<Vec<Bson>> {
        let mut options = FindOptions::default();
        options.skip = skip;
        options.limit = limit;
        options.sort = Some(doc! { "_id": 1 });

        Ok(self
            .get_collection(collection)
            .find(filter)
            .with_options(options)
            .await
            .map_err(|e| raw_from_driver(&e))?
            .try_collect::<Vec<Document>>()
            .await
            .map_err(|e| raw_from_driver(&e))?
            .into_iter()
            .map(|doc| self.restore_document(doc))
            .collect())
    }

    async fn count(&self, filter: Document, collection: &str) -> RawResult<u64> {
        self.get_collection(collection)
            .count_documents(filter)
            .await
            .map_err(|e| raw_from_driver(&e))
    }
}

pub struct MongoStoreBuilder {
    dsn: String,
    database: String,
    unique_indexes: Vec<(String, String)>,
}

impl MongoStoreBuilder {
    pub fn new(dsn: &str, database: &str) -> Self {
        Self {
            dsn: dsn.to_string(),
            database: database.to_string(),
            unique_indexes: Vec::new(),
        }
    }

    /// Queues a unique index to be created when the store connects.
    pub fn unique_index(mut self, collection: &str, field: &str) -> Self {
        self.unique_indexes
            .push((collection.to_string(), field.to_string()));
        self
    }

    pub async fn build(self) -> RawResult<MongoStore> {
        let options = ClientOptions::parse(&self.dsn)
            .await
            .map_err(|e| raw_from_driver(&e))?;
        let client = Client::with_options(options).map_err(|e| raw_from_driver(&e))?;

        debug!(database = %self.database, "connected to store");

        let store = MongoStore::new(client, self.database);
        for (collection, field) in &self.unique_indexes {
            store.ensure_unique_index(collection, field).await?;
        }

        Ok(store)
    }
}
