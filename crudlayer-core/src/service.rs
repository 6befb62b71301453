//! Business-logic layer delegating to a repository.
//!
//! [`Service`] mirrors the repository's operation surface one-to-one and
//! adds no error handling of its own: service errors are exactly the
//! repository's typed errors. Concrete services wrap a `Service` and
//! compose the base operations into business rules (for example a
//! read-modify-write that derives a new field value); the base guarantees
//! the composed primitives uphold the repository-level invariants, so
//! extensions never re-validate them.

use bson::{Document, Uuid};

use crate::{
    entity::Entity,
    error::AppResult,
    page::{Page, PageRequest},
    repository::Repository,
    store::EntityStore,
};

/// Generic business-logic operations for one entity type.
///
/// Constructed with an injected [`Repository`] at process start and passed
/// down explicitly; no module-level singletons.
#[derive(Debug)]
pub struct Service<E: Entity, S: EntityStore> {
    repository: Repository<E, S>,
}

impl<E: Entity, S: EntityStore + Clone> Clone for Service<E, S> {
    fn clone(&self) -> Self {
        Self { repository: self.repository.clone() }
    }
}

impl<E: Entity, S: EntityStore> Service<E, S> {
    /// Creates a service delegating to the given repository.
    pub fn new(repository: Repository<E, S>) -> Self {
        Self { repository }
    }

    /// The underlying repository, for extension services composing custom
    /// queries.
    pub fn repository(&self) -> &Repository<E, S> {
        &self.repository
    }

    /// Creates a new entity.
    pub async fn create(&self, entity: E) -> AppResult<E> {
        self.repository.create(entity).await
    }

    /// Updates an existing entity.
    pub async fn update(&self, entity: E) -> AppResult<E> {
        self.repository.update(entity).await
    }

    /// Deletes the entity with the given id.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.repository.delete(id).await
    }

    /// Fetches the entity with the given id.
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<E> {
        self.repository.get_by_id(id).await
    }

    /// Fetches the first entity matching a filter.
    pub async fn find_one(&self, filter: Document) -> AppResult<E> {
        self.repository.find_one(filter).await
    }

    /// Fetches all entities matching a filter.
    pub async fn find(&self, filter: Document) -> AppResult<Vec<E>> {
        self.repository.find(filter).await
    }

    /// Fetches every entity in the collection.
    pub async fn get_all(&self) -> AppResult<Vec<E>> {
        self.repository.get_all().await
    }

    /// Fetches one page of entities matching a filter.
    pub async fn paginate(&self, filter: Document, request: PageRequest) -> AppResult<Page<E>> {
        self.repository
            .paginate(filter, request)
            .await
    }
}
