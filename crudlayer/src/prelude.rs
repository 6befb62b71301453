//! Convenient re-exports of commonly used types from crudlayer.
//!
//! Import this prelude module to quickly access the most frequently used
//! types and traits without needing to import from multiple sub-modules:
//!
//! ```ignore
//! use crudlayer::prelude::*;
//! ```
//!
//! This provides access to:
//! - Entity traits and repository/service layers
//! - The store seam and its raw error shape
//! - Validation traits and rules
//! - Pagination types
//! - Error types

pub use crudlayer_core::{
    entity::{Entity, EntityExt, parse_id},
    error::{AppError, AppResult, DatabaseErrorKind, FieldErrors},
    mapper::{RawStoreError, map_store_error},
    page::{Page, PageInfo, PageRequest},
    repository::Repository,
    service::Service,
    store::{EntityStore, RawResult},
    validate::{Validate, parse},
};
