//! Storage seam for entity persistence.
//!
//! The [`EntityStore`] trait abstracts over concrete document stores
//! (in-memory, MongoDB, ...). It is the isolation boundary for driver
//! errors: every method reports failure as the structural
//! [`RawStoreError`](crate::mapper::RawStoreError) shape, and only the
//! repository translates those into the application taxonomy. Nothing above
//! this trait depends on a driver crate.
//!
//! Filters are opaque `bson::Document` values of shape
//! `{field: matchCriterion}`; their interpretation belongs to the backend.

use std::{fmt::Debug, sync::Arc};

use async_trait::async_trait;
use bson::{Bson, Document, Uuid};

use crate::mapper::RawStoreError;

/// Result type for raw store operations, before error mapping.
pub type RawResult<T> = Result<T, RawStoreError>;

/// Abstract interface for document storage backends.
///
/// Implementations must be thread-safe and support concurrent access from
/// multiple async tasks. The store call is the only suspension point of a
/// repository operation; no resource is held across it by this layer.
///
/// Backends perform no retries: conflicts and connectivity failures are
/// reported as-is and surfaced to the caller as terminal for the attempt.
#[async_trait]
pub trait EntityStore: Send + Sync + Debug {
    /// Inserts a new document into a collection under the given id.
    ///
    /// A unique-index violation is reported as a raw error with the store's
    /// duplicate-key signature.
    async fn insert_one(&self, id: Uuid, document: Bson, collection: &str) -> RawResult<()>;

    /// Replaces the document with the given id, returning whether a
    /// document was matched.
    async fn replace_one(&self, id: Uuid, document: Bson, collection: &str) -> RawResult<bool>;

    /// Deletes the document with the given id, returning whether a document
    /// was matched.
    async fn delete_one(&self, id: Uuid, collection: &str) -> RawResult<bool>;

    /// Fetches a document by id. Absence is `Ok(None)` at this layer; the
    /// repository turns it into a typed not-found error.
    async fn find_by_id(&self, id: Uuid, collection: &str) -> RawResult<Option<Bson>>;

    /// Fetches the first document matching a filter.
    async fn find_one(&self, filter: Document, collection: &str) -> RawResult<Option<Bson>>;

    /// Fetches documents matching a filter, optionally skipping and bounding
    /// the result for pagination.
    async fn find_many(
        &self,
        filter: Document,
        skip: Option<u64>,
        limit: Option<i64>,
        collection: &str,
    ) -> RawResult<Vec<Bson>>;

    /// Counts documents matching a filter.
    async fn count(&self, filter: Document, collection: &str) -> RawResult<u64>;
}

#[async_trait]
impl<S> EntityStore for &S
where
    S: EntityStore,
{
    async fn insert_one(&self, id: Uuid, document: Bson, collection: &str) -> RawResult<()> {
        (*self)
            .insert_one(id, document, collection)
            .await
    }

    async fn replace_one(&self, id: Uuid, document: Bson, collection: &str) -> RawResult<bool> {
        (*self)
            .replace_one(id, document, collection)
            .await
    }

    async fn delete_one(&self, id: Uuid, collection: &str) -> RawResult<bool> {
        (*self)
            .delete_one(id, collection)
            .await
    }

    async fn find_by_id(&self, id: Uuid, collection: &str) -> RawResult<Option<Bson>> {
        (*self)
            .find_by_id(id, collection)
            .await
    }

    async fn find_one(&self, filter: Document, collection: &str) -> RawResult<Option<Bson>> {
        (*self)
            .find_one(filter, collection)
            .await
    }

    async fn find_many(
        &self,
        filter: Document,
        skip: Option<u64>,
        limit: Option<i64>,
        collection: &str,
    ) -> RawResult<Vec<Bson>> {
        (*self)
            .find_many(filter, skip, limit, collection)
            .await
    }

    async fn count(&self, filter: Document, collection: &str) -> RawResult<u64> {
        (*self).count(filter, collection).await
    }
}

#[async_trait]
impl<S> EntityStore for Arc<S>
where
    S: EntityStore + ?Sized,
{
    async fn insert_one(&self, id: Uuid, document: Bson, collection: &str) -> RawResult<()> {
        self.as_ref()
            .insert_one(id, document, collection)
            .await
    }

    async fn replace_one(&self, id: Uuid, document: Bson, collection: &str) -> RawResult<bool> {
        self.as_ref()
            .replace_one(id, document, collection)
            .await
    }

    async fn delete_one(&self, id: Uuid, collection: &str) -> RawResult<bool> {
        self.as_ref()
            .delete_one(id, collection)
            .await
    }

    async fn find_by_id(&self, id: Uuid, collection: &str) -> RawResult<Option<Bson>> {
        self.as_ref()
            .find_by_id(id, collection)
            .await
    }

    async fn find_one(&self, filter: Document, collection: &str) -> RawResult<Option<Bson>> {
        self.as_ref()
            .find_one(filter, collection)
            .await
    }

    async fn find_many(
        &self,
        filter: Document,
        skip: Option<u64>,
        limit: Option<i64>,
        collection: &str,
    ) -> RawResult<Vec<Bson>> {
        self.as_ref()
            .find_many(filter, skip, limit, collection)
            .await
    }

    async fn count(&self, filter: Document, collection: &str) -> RawResult<u64> {
        self.as_ref().count(filter, collection).await
    }
}
