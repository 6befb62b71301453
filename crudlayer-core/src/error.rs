//! Error types and result types for CRUD service operations.
//!
//! This module defines the application error taxonomy shared by every layer.
//! Use [`AppResult<T>`] as the return type for fallible operations.
//!
//! Errors are constructed at the point of failure, propagated unchanged with
//! `?`, and rendered exactly once at the outermost boundary. Operational
//! errors carry a safe, user-facing message; non-operational errors
//! ([`AppError::Internal`]) must never leak their payload to a client.

use std::collections::BTreeMap;

use serde_json::{Value, json};
use thiserror::Error;

/// Represents all failure conditions surfaced by a CRUD service.
///
/// This is a closed set. Each variant fixes a machine-readable name and an
/// HTTP status code; [`AppError::Database`] refines its status through a
/// [`DatabaseErrorKind`] subkind.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    /// Unexpected defect (programming error, broken invariant). The payload
    /// is for logs only and must never reach a client.
    #[error("internal server error")]
    Internal(String),
    /// The request was malformed in a way detected before validation rules.
    #[error("{0}")]
    BadRequest(String),
    /// Input failed validation. Carries a field path to messages map.
    #[error("validation failed")]
    Validation(FieldErrors),
    /// A persistence-layer failure, already translated from the raw driver
    /// error by the mapper.
    #[error("{}", .kind.description())]
    Database {
        /// The translated subkind of the failure.
        kind: DatabaseErrorKind,
        /// Detail retained from the raw error, for logs and debugging.
        message: String,
    },
    /// The caller is not permitted to perform the operation.
    #[error("{0}")]
    Unauthorized(String),
    /// The requested record does not exist. Absence at the repository layer
    /// is always this error, never a silent `None`.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The entity kind that was looked up (e.g. "user").
        entity: &'static str,
        /// The identifier used for the lookup.
        id: String,
    },
}

/// A specialized `Result` type for CRUD service operations.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Creates a not-found error for a missing record.
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        AppError::NotFound { entity, id: id.to_string() }
    }

    /// Creates a database error for a malformed identifier, without going
    /// through the driver-error mapper. Used when an id fails to parse
    /// before any store call is made.
    pub fn invalid_id(raw: impl AsRef<str>) -> Self {
        AppError::Database {
            kind: DatabaseErrorKind::InvalidId,
            message: format!("cannot interpret {:?} as an identifier", raw.as_ref()),
        }
    }

    /// The stable machine-readable name of this error kind.
    pub fn name(&self) -> &'static str {
        match self {
            AppError::Internal(_) => "API_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Database { .. } => "DATABASE_ERROR",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::NotFound { .. } => "NOT_FOUND",
        }
    }

    /// The HTTP status code this error renders with.
    pub fn status_code(&self) -> u16 {
        match self {
            AppError::Internal(_) => 500,
            AppError::BadRequest(_) => 400,
            AppError::Validation(_) => 400,
            AppError::Database { kind, .. } => kind.status_code(),
            AppError::Unauthorized(_) => 403,
            AppError::NotFound { .. } => 404,
        }
    }

    /// Whether this error is an anticipated, handled condition with a safe
    /// user-facing message. `false` marks a defect whose detail must be
    /// masked at the boundary.
    pub fn is_operational(&self) -> bool {
        !matches!(self, AppError::Internal(_))
    }

    /// Structured detail payload for the error envelope, if any.
    ///
    /// Validation errors expose their field map; database errors expose the
    /// subkind tag. Other variants carry no detail beyond the message.
    pub fn details(&self) -> Option<Value> {
        match self {
            AppError::Validation(errors) => serde_json::to_value(errors).ok(),
            AppError::Database { kind, .. } => Some(json!({ "kind": kind.name() })),
            _ => None,
        }
    }
}

impl From<FieldErrors> for AppError {
    fn from(errors: FieldErrors) -> Self {
        AppError::Validation(errors)
    }
}

/// Refinement of [`AppError::Database`] into a closed set of store failure
/// classes. Every subkind maps to exactly one status code and one stable
/// description template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseErrorKind {
    /// A unique-index violation.
    DuplicateKey,
    /// A malformed identifier or cast failure.
    InvalidId,
    /// The store rejected the document against its own schema rules.
    SchemaViolation,
    /// A concurrent write conflict. Terminal for this attempt; retry policy
    /// belongs to the caller.
    WriteConflict,
    /// Connectivity or timeout failure talking to the store.
    Unavailable,
    /// Anything the mapper did not recognize.
    Unknown,
}

impl DatabaseErrorKind {
    /// The stable machine-readable tag for this subkind.
    pub fn name(&self) -> &'static str {
        match self {
            DatabaseErrorKind::DuplicateKey => "DUPLICATE_KEY",
            DatabaseErrorKind::InvalidId => "INVALID_ID",
            DatabaseErrorKind::SchemaViolation => "DB_VALIDATION_ERROR",
            DatabaseErrorKind::WriteConflict => "WRITE_CONFLICT",
            DatabaseErrorKind::Unavailable => "DATABASE_UNAVAILABLE",
            DatabaseErrorKind::Unknown => "DATABASE_ERROR",
        }
    }

    /// The HTTP status code fixed for this subkind.
    pub fn status_code(&self) -> u16 {
        match self {
            DatabaseErrorKind::DuplicateKey => 400,
            DatabaseErrorKind::InvalidId => 400,
            DatabaseErrorKind::SchemaViolation => 400,
            DatabaseErrorKind::WriteConflict => 409,
            DatabaseErrorKind::Unavailable => 500,
            DatabaseErrorKind::Unknown => 500,
        }
    }

    /// The stable user-facing description template for this subkind.
    pub fn description(&self) -> &'static str {
        match self {
            DatabaseErrorKind::DuplicateKey => "duplicate value for a unique field",
            DatabaseErrorKind::InvalidId => "malformed identifier",
            DatabaseErrorKind::SchemaViolation => "document failed database validation",
            DatabaseErrorKind::WriteConflict => "write conflict, retry the operation",
            DatabaseErrorKind::Unavailable => "database unavailable",
            DatabaseErrorKind::Unknown => "unexpected database error",
        }
    }
}

/// An ordered mapping from field path to the list of violation messages
/// collected for that field.
///
/// Validation collects every violation before failing, so a payload with
/// three bad fields reports all three. The map is ordered (BTreeMap) so
/// serialized output is deterministic.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    /// Creates an empty violation set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a violation message against a field path.
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// Returns true when no violations have been recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the messages recorded for a field, if any.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Number of fields with at least one violation.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Converts the collected violations into a result: `Ok(())` when empty,
    /// otherwise `Err(self)`.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal(format!("serialization error: {err}"))
    }
}

impl From<bson::error::Error> for AppError {
    fn from(err: bson::error::Error) -> Self {
        AppError::Internal(format!("serialization error: {err}"))
    }
}
