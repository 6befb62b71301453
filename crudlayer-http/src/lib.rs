//! HTTP boundary conventions for crudlayer services.
//!
//! This crate defines the two response envelopes every endpoint speaks and
//! the centralized translation of application errors into responses, built
//! on axum.
//!
//! - [`ApiResponse`] wraps successful payloads as
//!   `{ statusCode, data, message, success: true }`.
//! - [`ApiError`] wraps an `AppError` and renders
//!   `{ success: false, error: { name, message, details } }`, logging and
//!   masking anything non-operational as a generic 500.
//! - [`PageQuery`] deserializes the `?page=&limit=` pair for list endpoints.
//!
//! Handlers return `Result<ApiResponse<T>, ApiError>` and use `?` on any
//! service call; no per-route error handling is needed.

#[allow(unused_extern_crates)]
extern crate self as crudlayer_http;

pub mod error;
pub mod query;
pub mod response;

pub use error::ApiError;
pub use query::PageQuery;
pub use response::ApiResponse;
