//! Generic data-access layer over an [`EntityStore`].
//!
//! A [`Repository`] wraps every store call in a failure boundary: raw store
//! errors are translated through [`map_store_error`] before they propagate,
//! so callers never observe driver errors. Absence on point lookups is an
//! explicit [`AppError::NotFound`], never a silent `None`.
//!
//! Concrete repositories extend by composition: wrap a `Repository` and
//! build entity-specific queries on top of [`find`](Repository::find) and
//! [`find_one`](Repository::find_one), which keeps the error-mapping
//! guarantee intact.

use std::marker::PhantomData;

use bson::{Document, Uuid, doc};

use crate::{
    entity::{Entity, EntityExt},
    error::{AppError, AppResult},
    mapper::map_store_error,
    page::{MAX_PAGE_LIMIT, Page, PageInfo, PageRequest},
    store::EntityStore,
};

/// Generic CRUD operations for one entity type over an injected store.
///
/// The store handle is provided at construction (process start) and shared
/// by cloning; there is no global state. `Repository` is cheap to clone
/// when the store handle is (e.g. an `Arc`-backed backend).
///
/// # Example
///
/// ```ignore
/// let store = InMemoryStore::new();
/// let users: Repository<User, _> = Repository::new(store.clone());
/// let user = users.create(User::new("alice@example.com")).await?;
/// ```
#[derive(Debug)]
pub struct Repository<E: Entity, S: EntityStore> {
    store: S,
    max_limit: u64,
    _marker: PhantomData<fn() -> E>,
}

impl<E: Entity, S: EntityStore + Clone> Clone for Repository<E, S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            max_limit: self.max_limit,
            _marker: PhantomData,
        }
    }
}

impl<E: Entity, S: EntityStore> Repository<E, S> {
    /// Creates a repository over the given store handle.
    pub fn new(store: S) -> Self {
        Self {
            store,
            max_limit: MAX_PAGE_LIMIT,
            _marker: PhantomData,
        }
    }

    /// Overrides the pagination limit ceiling for this repository.
    pub fn with_max_limit(mut self, max_limit: u64) -> Self {
        self.max_limit = max_limit;
        self
    }

    /// The collection backing this repository.
    pub fn collection(&self) -> &'static str {
        E::collection_name()
    }

    /// Inserts a new entity and returns it.
    ///
    /// A unique-index violation surfaces as
    /// [`DatabaseErrorKind::DuplicateKey`](crate::error::DatabaseErrorKind).
    pub async fn create(&self, entity: E) -> AppResult<E> {
        self.store
            .insert_one(*entity.id(), entity.to_bson()?, self.collection())
            .await
            .map_err(map_store_error)?;

        Ok(entity)
    }

    /// Replaces an existing entity, matched by its id, and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when no record has the entity's id.
    pub async fn update(&self, entity: E) -> AppResult<E> {
        let matched = self
            .store
            .replace_one(*entity.id(), entity.to_bson()?, self.collection())
            .await
            .map_err(map_store_error)?;

        if !matched {
            return Err(AppError::not_found(self.collection(), entity.id()));
        }

        Ok(entity)
    }

    /// Deletes the entity with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when no record has the id.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let matched = self
            .store
            .delete_one(id, self.collection())
            .await
            .map_err(map_store_error)?;

        if !matched {
            return Err(AppError::not_found(self.collection(), id));
        }

        Ok(())
    }

    /// Fetches the entity with the given id.
    ///
    /// Absence is always an error at this layer, so callers cannot forget a
    /// null-check.
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<E> {
        let found = self
            .store
            .find_by_id(id, self.collection())
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| AppError::not_found(self.collection(), id))?;

        E::from_bson(found)
    }

    /// Fetches the first entity matching a filter.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when nothing matches.
    pub async fn find_one(&self, filter: Document) -> AppResult<E> {
        let found = self
            .store
            .find_one(filter, self.collection())
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| AppError::not_found(self.collection(), "<filter>"))?;

        E::from_bson(found)
    }

    /// Fetches all entities matching a filter.
    pub async fn find(&self, filter: Document) -> AppResult<Vec<E>> {
        self.store
            .find_many(filter, None, None, self.collection())
            .await
            .map_err(map_store_error)?
            .into_iter()
            .map(E::from_bson)
            .collect()
    }

    /// Fetches every entity in the collection.
    pub async fn get_all(&self) -> AppResult<Vec<E>> {
        self.find(doc! {}).await
    }

    /// Fetches one page of entities matching a filter.
    ///
    /// The request is normalized first (defaults for omitted or
    /// non-positive values, limit clamped to the ceiling), then a bounded
    /// fetch and a count run against the store.
    pub async fn paginate(&self, filter: Document, request: PageRequest) -> AppResult<Page<E>> {
        let (page, limit) = request.normalize(self.max_limit);
        // Saturating: a page number near u64::MAX must not wrap the skip.
        let skip = page.saturating_sub(1).saturating_mul(limit);

        let items = self
            .store
            .find_many(filter.clone(), Some(skip), Some(limit as i64), self.collection())
            .await
            .map_err(map_store_error)?
            .into_iter()
            .map(E::from_bson)
            .collect::<AppResult<Vec<E>>>()?;

        let total_items = self
            .store
            .count(filter, self.collection())
            .await
            .map_err(map_store_error)?;

        Ok(Page::new(items, PageInfo::compute(page, limit, total_items)))
    }
}
