//! Main crudlayer crate providing a convention layer for CRUD services.
//!
//! This crate is the primary entry point for users of the crudlayer
//! framework. It re-exports the core types from the sub-crates and provides
//! convenient access to the storage backends and the HTTP boundary.
//!
//! The goal is to collapse the per-resource boilerplate of a document-backed
//! REST service into reusable layers: define an entity, get a repository,
//! wrap it in a service, validate payloads once, and let the boundary render
//! every success and failure the same way.
//!
//! # Features
//!
//! - **Typed entities** - Define your data structures with Serde and store them safely
//! - **Repository conventions** - CRUD, lookups and pagination with uniform
//!   error semantics; absence is always a not-found error, never a `None`
//! - **Error taxonomy** - One closed error set from the driver to the client,
//!   with raw store failures classified by a pure mapper
//! - **Multiple backends** - In-memory and MongoDB storage behind one trait
//! - **HTTP envelopes** - Success and failure response shapes, rendered once
//!   at the boundary (requires the `http` feature)
//!
//! # Quick Start
//!
//! ```ignore
//! use crudlayer::{prelude::*, memory::InMemoryStore};
//! use bson::{Uuid, doc};
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! pub struct User {
//!     pub id: Uuid,
//!     pub email: String,
//! }
//!
//! impl Entity for User {
//!     fn id(&self) -> &Uuid { &self.id }
//!     fn collection_name() -> &'static str { "users" }
//! }
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let store = InMemoryStore::new().unique_index("users", "email");
//!     let users = Service::new(Repository::<User, _>::new(store));
//!
//!     let user = User {
//!         id: Uuid::new(),
//!         email: "alice@example.com".to_string(),
//!     };
//!
//!     users.create(user).await?;
//!
//!     let found = users.find_one(doc! { "email": "alice@example.com" }).await?;
//!     let page = users.paginate(doc! {}, PageRequest::new(1, 10)).await?;
//!
//!     println!("found {:?}, {} total", found, page.pagination.total_items);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Backends
//!
//! - [`memory`] - Fast in-memory storage for development and testing
//! - [`mongodb`] - Persistent MongoDB backend (requires the `mongodb` feature)

pub mod prelude;

pub use crudlayer_core::{entity, error, mapper, page, repository, service, store, validate};

// Re-export BSON types for convenience
pub use bson;

/// In-memory storage backend implementations.
pub mod memory {
    pub use crudlayer_memory::InMemoryStore;
}

/// MongoDB storage backend implementations.
///
/// This module is only available when the `mongodb` feature is enabled.
#[cfg(feature = "mongodb")]
pub mod mongodb {
    pub use crudlayer_mongodb::{MongoStore, MongoStoreBuilder};
}

/// HTTP boundary types built on axum.
///
/// This module is only available when the `http` feature is enabled.
#[cfg(feature = "http")]
pub mod http {
    pub use crudlayer_http::{ApiError, ApiResponse, PageQuery};
}
