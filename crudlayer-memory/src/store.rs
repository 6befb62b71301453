//! In-memory storage implementation of the entity store seam.
//!
//! Documents are held as BSON values in HashMaps behind an async-aware
//! read-write lock. Unique indexes can be declared per collection so the
//! duplicate-key failure path behaves like a real store, including the
//! E11000-style error signature the mapper recognizes.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use bson::{Bson, Document, Uuid};
use mea::rwlock::RwLock;

use crudlayer_core::{
    mapper::RawStoreError,
    store::{EntityStore, RawResult},
};

use crate::filter::matches;

type CollectionMap = HashMap<String, Bson>;
type StoreMap = HashMap<String, CollectionMap>;

/// Server code reported for a unique-index violation.
const DUPLICATE_KEY_CODE: i32 = 11000;

/// Thread-safe in-memory entity store.
///
/// Cloneable; clones share the same underlying data. Queries scan the whole
/// collection, which is fine for development and tests. Results are ordered
/// by id so pagination over this backend is deterministic.
///
/// # Example
///
/// ```ignore
/// use crudlayer_memory::InMemoryStore;
///
/// let store = InMemoryStore::new().unique_index("users", "email");
/// ```
#[derive(Default, Clone, Debug)]
pub struct InMemoryStore {
    /// collection name -> (document id -> document)
    store: Arc<RwLock<StoreMap>>,
    /// collection name -> fields with a unique index. Declared up front,
    /// immutable afterwards.
    unique_indexes: Arc<HashMap<String, Vec<String>>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a unique index on a field of a collection.
    ///
    /// Subsequent inserts or replacements that would duplicate an existing
    /// value on that field fail with the store's duplicate-key signature.
    pub fn unique_index(mut self, collection: &str, field: &str) -> Self {
        let mut indexes = (*self.unique_indexes).clone();
        indexes
            .entry(collection.to_string())
            .or_default()
            .push(field.to_string());
        self.unique_indexes = Arc::new(indexes);

        self
    }

    /// Checks declared unique indexes before a write lands. `exclude` skips
    /// the document being replaced so updates do not collide with themselves.
    fn check_unique(
        &self,
        collection_map: &CollectionMap,
        collection: &str,
        document: &Bson,
        exclude: Option<&str>,
    ) -> RawResult<()> {
        let Some(fields) = self.unique_indexes.get(collection) else {
            return Ok(());
        };
        let Some(doc) = document.as_document() else {
            return Ok(());
        };

        for field in fields {
            let Some(value) = doc.get(field) else {
                continue;
            };

            let collides = collection_map
                .iter()
                .filter(|(key, _)| exclude != Some(key.as_str()))
                .filter_map(|(_, stored)| stored.as_document())
                .any(|stored| stored.get(field) == Some(value));

            if collides {
                return Err(RawStoreError::new(
                    "Write",
                    format!(
                        "E11000 duplicate key error collection: {collection} index: {field}_1 dup key: {value}"
                    ),
                )
                .with_code(DUPLICATE_KEY_CODE));
            }
        }

        Ok(())
    }
}

#[async_trait]
impl EntityStore for InMemoryStore {
    async fn insert_one(&self, id: Uuid, document: Bson, collection: &str) -> RawResult<()> {
        let mut store = self.store.write().await;
        let collection_map = store
            .entry(collection.to_string())
            .or_default();

        let key = id.to_string();
        if collection_map.contains_key(&key) {
            return Err(RawStoreError::new(
                "Write",
                format!("E11000 duplicate key error collection: {collection} dup key: _id {key}"),
            )
            .with_code(DUPLICATE_KEY_CODE));
        }

        self.check_unique(collection_map, collection, &document, None)?;
        collection_map.insert(key, document);

        Ok(())
    }

    async fn replace_one(&self, id: Uuid, document: Bson, collection: &str) -> RawResult<bool> {
        let mut store = self.store.write().await;
        let Some(collection_map) = store.get_mut(collection) else {
            return Ok(false);
        };

        let key = id.to_string();
        if !collection_map.contains_key(&key) {
            return Ok(false);
        }

        self.check_unique(collection_map, collection, &document, Some(&key))?;
        collection_map.insert(key, document);

        Ok(true)
    }

    async fn delete_one(&self, id: Uuid, collection: &str) -> RawResult<bool> {
        let mut store = self.store.write().await;
        let Some(collection_map) = store.get_mut(collection) else {
            return Ok(false);
        };

        Ok(collection_map
            .remove(&id.to_string())
            .is_some())
    }

    async fn find_by_id(&self, id: Uuid, collection: &str) -> RawResult<Option<Bson>> {
        let store = self.store.read().await;

        Ok(store
            .get(collection)
            .and_then(|collection_map| collection_map.get(&id.to_string()))
            .cloned())
    }

    async fn find_one(&self, filter: Document, collection: &str) -> RawResult<Option<Bson>> {
        let store = self.store.read().await;
        let Some(collection_map) = store.get(collection) else {
            return Ok(None);
        };

        let mut entries = collection_map.iter().collect::<Vec<_>>();
        entries.sort_by(|(a, _), (b, _)| a.cmp(b));

        Ok(entries
            .into_iter()
            .map(|(_, doc)| doc)
            .find(|doc| matches(doc, &filter))
            .cloned())
    }

    async fn find_many(
        &self,
        filter: Document,
        skip: Option<u64>,
        limit: Option<i64>,
        collection: &str,
    ) -> RawResult<Vec<Bson>> {
        let store = self.store.read().await;
        let Some(collection_map) = store.get(collection) else {
            return Ok(vec![]);
        };

        let mut entries = collection_map
            .iter()
            .filter(|(_, doc)| matches(doc, &filter))
            .collect::<Vec<_>>();
        entries.sort_by(|(a, _), (b, _)| a.cmp(b));

        Ok(entries
            .into_iter()
            .map(|(_, doc)| doc.clone())
            .skip(skip.unwrap_or(0) as usize)
            .take(limit.map_or(usize::MAX, |l| l.max(0) as usize))
            .collect())
    }

    async fn count(&self, filter: Document, collection: &str) -> RawResult<u64> {
        let store = self.store.read().await;
        let Some(collection_map) = store.get(collection) else {
            return Ok(0);
        };

        Ok(collection_map
            .values()
            .filter(|doc| matches(doc, &filter))
            .count() as u64)
    }
}

#[cfg(test)]
mod tests {
    use bson::doc;

    use super::*;

    fn entity(email: &str) -> (Uuid, Bson) {
        let id = Uuid::new();
        let doc = Bson::Document(doc! { "id": id, "email": email });
        (id, doc)
    }

    #[tokio::test]
    async fn insert_then_find_by_id_round_trips() {
        let store = InMemoryStore::new();
        let (id, doc) = entity("alice@example.com");

        store.insert_one(id, doc.clone(), "users").await.unwrap();
        let found = store.find_by_id(id, "users").await.unwrap();

        assert_eq!(found, Some(doc));
    }

    #[tokio::test]
    async fn insert_with_existing_id_reports_duplicate_key() {
        let store = InMemoryStore::new();
        let (id, doc) = entity("alice@example.com");

        store.insert_one(id, doc.clone(), "users").await.unwrap();
        let err = store.insert_one(id, doc, "users").await.unwrap_err();

        assert_eq!(err.code, Some(11000));
        assert!(err.message.contains("E11000"));
    }

    #[tokio::test]
    async fn unique_index_rejects_colliding_field_value() {
        let store = InMemoryStore::new().unique_index("users", "email");
        let (id_a, doc_a) = entity("alice@example.com");
        let (_, doc_b) = entity("alice@example.com");

        store.insert_one(id_a, doc_a, "users").await.unwrap();
        let err = store
            .insert_one(Uuid::new(), doc_b, "users")
            .await
            .unwrap_err();

        assert_eq!(err.code, Some(11000));
        assert!(err.message.contains("email_1"));
    }

    #[tokio::test]
    async fn replace_does_not_collide_with_itself() {
        let store = InMemoryStore::new().unique_index("users", "email");
        let (id, doc) = entity("alice@example.com");

        store.insert_one(id, doc.clone(), "users").await.unwrap();
        let replaced = store.replace_one(id, doc, "users").await.unwrap();

        assert!(replaced);
    }

    #[tokio::test]
    async fn replace_missing_document_matches_nothing() {
        let store = InMemoryStore::new();
        let (id, doc) = entity("alice@example.com");

        assert!(!store.replace_one(id, doc, "users").await.unwrap());
    }

    #[tokio::test]
    async fn find_many_applies_filter_skip_and_limit() {
        let store = InMemoryStore::new();
        for index in 0..5 {
            let id = Uuid::new();
            let doc = Bson::Document(doc! { "id": id, "role": "member", "seq": index });
            store.insert_one(id, doc, "users").await.unwrap();
        }

        let all = store
            .find_many(doc! { "role": "member" }, None, None, "users")
            .await
            .unwrap();
        let page = store
            .find_many(doc! { "role": "member" }, Some(2), Some(2), "users")
            .await
            .unwrap();

        assert_eq!(all.len(), 5);
        assert_eq!(page, all[2..4].to_vec());
    }

    #[tokio::test]
    async fn count_honors_filter() {
        let store = InMemoryStore::new();
        for role in ["admin", "member", "member"] {
            let id = Uuid::new();
            let doc = Bson::Document(doc! { "id": id, "role": role });
            store.insert_one(id, doc, "users").await.unwrap();
        }

        assert_eq!(store.count(doc! { "role": "member" }, "users").await.unwrap(), 2);
        assert_eq!(store.count(doc! {}, "users").await.unwrap(), 3);
    }

    #[tokio::test]
    async fn delete_one_reports_whether_anything_matched() {
        let store = InMemoryStore::new();
        let (id, doc) = entity("alice@example.com");

        store.insert_one(id, doc, "users").await.unwrap();

        assert!(store.delete_one(id, "users").await.unwrap());
        assert!(!store.delete_one(id, "users").await.unwrap());
    }
}
