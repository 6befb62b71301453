//! In-memory storage backend for crudlayer.
//!
//! This crate provides a thread-safe, in-memory implementation of the
//! `EntityStore` trait. It uses async-aware read-write locks for concurrent
//! access and is ideal for development, testing, and small-scale deployments.
//!
//! # Features
//!
//! - **Thread-safe access** - Concurrent reads and writes using async-aware RwLock
//! - **Type-erased storage** - Stores entities as BSON for flexibility
//! - **Equality filters** - Supports field-equality filtering with skip/limit
//! - **Unique indexes** - Declared per collection, failing writes with the
//!   same duplicate-key signature a real document store reports
//!
//! # Quick Start
//!
//! ```ignore
//! use crudlayer::{Entity, Repository, memory::InMemoryStore};
//! use bson::Uuid;
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
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = InMemoryStore::new().unique_index("users", "email");
//!     let users = Repository::<User, _>::new(store);
//!
//!     let user = User {
//!         id: Uuid::new(),
//!         email: "alice@example.com".to_string(),
//!     };
//!
//!     users.create(user).await?;
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as crudlayer_memory;

mod filter;
pub mod store;

pub use store::InMemoryStore;
