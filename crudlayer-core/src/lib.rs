//! A convention layer for building document-backed CRUD services.
//!
//! This crate is the core of the crudlayer project and provides:
//!
//! - **Entity traits** ([`entity`]) - Core traits for defining and serializing stored records
//! - **Error taxonomy** ([`error`]) - Typed operational errors with stable names and status codes
//! - **Driver-error mapper** ([`mapper`]) - Pure translation of raw store failures into the taxonomy
//! - **Pagination contract** ([`page`]) - Bounded page requests and navigation metadata
//! - **Store seam** ([`store`]) - The backend trait concrete stores implement
//! - **Repository** ([`repository`]) - Generic CRUD data access with uniform error mapping
//! - **Service** ([`service`]) - Business-logic layer delegating to a repository
//! - **Validation** ([`validate`]) - Parse-or-fail payload handling with field-level detail
//!
//! # Example
//!
//! ```ignore
//! use crudlayer_core::{entity::Entity, repository::Repository};
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
//!     fn id(&self) -> &Uuid {
//!         &self.id
//!     }
//!
//!     fn collection_name() -> &'static str {
//!         "users"
//!     }
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as crudlayer_core;

pub mod entity;
pub mod error;
pub mod mapper;
pub mod page;
pub mod repository;
pub mod service;
pub mod store;
pub mod validate;
