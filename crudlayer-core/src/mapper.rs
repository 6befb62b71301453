//! Translation of raw store errors into the application taxonomy.
//!
//! Backends reduce their driver errors to the opaque [`RawStoreError`] shape
//! (numeric code, error class, message, labels) and the repository funnels
//! every failure through [`map_store_error`]. The mapping is pure and total:
//! it always produces an [`AppError::Database`] value and never re-throws the
//! raw error, so callers above the repository never observe driver types.

use std::fmt;

use crate::error::{AppError, DatabaseErrorKind};

/// Server error codes recognized as a unique-index violation.
const DUPLICATE_KEY_CODES: [i32; 3] = [11000, 11001, 12582];
/// Server error code for a document failing store-side validation.
const DOCUMENT_VALIDATION_CODE: i32 = 121;
/// Server error code for a concurrent write conflict.
const WRITE_CONFLICT_CODE: i32 = 112;
/// Error label attached by the server to transient transaction failures.
const TRANSIENT_TRANSACTION_LABEL: &str = "TransientTransactionError";

/// Error classes that indicate the store could not be reached at all.
const UNAVAILABLE_KINDS: [&str; 4] = ["ServerSelection", "Io", "ConnectionPoolCleared", "DnsResolve"];
/// Error classes that indicate a value could not be cast for the store.
const CAST_KINDS: [&str; 3] = ["BsonSerialization", "BsonDeserialization", "InvalidArgument"];

/// The structural shape of a persistence-layer failure.
///
/// This is the isolation boundary between storage drivers and the rest of
/// the stack: backends inspect their own error types and produce this, and
/// nothing above the store seam depends on a driver crate. The fields are a
/// lowest common denominator of what document-store drivers report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawStoreError {
    /// Server or driver error code, when one was reported.
    pub code: Option<i32>,
    /// The driver's error class name (e.g. "Write", "ServerSelection").
    pub kind: String,
    /// Human-readable message from the driver.
    pub message: String,
    /// Error labels attached by the server (e.g. transient-transaction).
    pub labels: Vec<String>,
}

impl RawStoreError {
    /// Creates a raw error from an error class and message, with no code.
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: None,
            kind: kind.into(),
            message: message.into(),
            labels: Vec::new(),
        }
    }

    /// Sets the server error code.
    pub fn with_code(mut self, code: i32) -> Self {
        self.code = Some(code);
        self
    }

    /// Attaches a server error label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }

    fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    fn message_contains(&self, needle: &str) -> bool {
        self.message.to_ascii_lowercase().contains(needle)
    }
}

impl fmt::Display for RawStoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "{} ({}): {}", self.kind, code, self.message),
            None => write!(f, "{}: {}", self.kind, self.message),
        }
    }
}

impl std::error::Error for RawStoreError {}

/// Translates a raw store error into the application taxonomy.
///
/// Deterministic first-match classification; the fallback arm makes the
/// function total. The resulting [`AppError::Database`] keeps the raw
/// message for logs while the user-facing description comes from the
/// subkind template.
pub fn map_store_error(raw: RawStoreError) -> AppError {
    let kind = classify(&raw);

    AppError::Database { kind, message: raw.to_string() }
}

fn classify(raw: &RawStoreError) -> DatabaseErrorKind {
    if raw.code.is_some_and(|c| DUPLICATE_KEY_CODES.contains(&c))
        || raw.message_contains("duplicate key")
    {
        DatabaseErrorKind::DuplicateKey
    } else if CAST_KINDS.contains(&raw.kind.as_str())
        || raw.message_contains("malformed")
        || raw.message_contains("invalid id")
    {
        DatabaseErrorKind::InvalidId
    } else if raw.code == Some(DOCUMENT_VALIDATION_CODE) {
        DatabaseErrorKind::SchemaViolation
    } else if raw.code == Some(WRITE_CONFLICT_CODE) || raw.has_label(TRANSIENT_TRANSACTION_LABEL) {
        DatabaseErrorKind::WriteConflict
    } else if UNAVAILABLE_KINDS.contains(&raw.kind.as_str()) || raw.message_contains("timed out") {
        DatabaseErrorKind::Unavailable
    } else {
        DatabaseErrorKind::Unknown
    }
}
