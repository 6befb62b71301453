//! MongoDB backend implementation for crudlayer.
//!
//! This crate provides a MongoDB-based implementation of the `EntityStore`
//! trait, giving repositories persistent storage with server-side filtering,
//! pagination and unique indexes.
//!
//! To use this backend, include the `mongodb` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! crudlayer = { version = "x.y.z", features = ["mongodb"] }
//! ```
//!
//! # Features
//!
//! - **Persistent storage** - Data is persisted to MongoDB Atlas or self-hosted MongoDB
//! - **Server-side queries** - Filtering, skip/limit and counting run on the server
//! - **Async/await** - Fully asynchronous API built on MongoDB's async driver
//! - **Unique indexes** - Declared on the builder and created at connect time
//! - **Uniform failures** - Driver errors are reduced to the store-neutral
//!   error shape the core mapper classifies
//!
//! # Connection
//!
//! To use this backend, you need a MongoDB connection string. This can be
//! provided through the builder pattern.
//!
//! # Example
//!
//! ```ignore
//! use crudlayer::mongodb::MongoStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = MongoStore::builder("mongodb://localhost:27017", "my_database")
//!         .unique_index("users", "email")
//!         .build()
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as crudlayer_mongodb;

pub mod raw;
pub mod store;

pub use store::{MongoStore, MongoStoreBuilder};
