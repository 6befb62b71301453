//! Reduction of MongoDB driver errors to the store-neutral error shape.
//!
//! The driver's error type is a deep tree of kinds and nested failure
//! structs. This module flattens it into a [`RawStoreError`] by structural
//! inspection, so classification stays in the core mapper and no driver
//! type leaks past the store seam.

use crudlayer_core::mapper::RawStoreError;
use mongodb::error::{Error as DriverError, ErrorKind, WriteFailure};

/// Flattens a driver error into the store-neutral shape.
///
/// The kind string mirrors the driver's `ErrorKind` variant name, the code
/// is taken from the innermost failure that carries one, and server error
/// labels are copied over verbatim.
pub fn raw_from_driver(err: &DriverError) -> RawStoreError {
    let (kind, code, message) = match &*err.kind {
        ErrorKind::Write(WriteFailure::WriteError(write)) => {
            ("Write", Some(write.code), write.message.clone())
        }
        ErrorKind::Write(WriteFailure::WriteConcernError(concern)) => {
            ("Write", Some(concern.code), concern.message.clone())
        }
        ErrorKind::Command(command) => ("Command", Some(command.code), command.message.clone()),
        ErrorKind::ServerSelection { message, .. } => ("ServerSelection", None, message.clone()),
        ErrorKind::Io(io) => ("Io", None, io.to_string()),
        ErrorKind::ConnectionPoolCleared { message, .. } => {
            ("ConnectionPoolCleared", None, message.clone())
        }
        ErrorKind::DnsResolve { message, .. } => ("DnsResolve", None, message.clone()),
        ErrorKind::BsonSerialization(inner) => ("BsonSerialization", None, inner.to_string()),
        ErrorKind::BsonDeserialization(inner) => ("BsonDeserialization", None, inner.to_string()),
        ErrorKind::InvalidArgument { message, .. } => ("InvalidArgument", None, message.clone()),
        ErrorKind::Transaction { message, .. } => ("Transaction", None, message.clone()),
        ErrorKind::Authentication { message, .. } => ("Authentication", None, message.clone()),
        other => ("Unknown", None, other.to_string()),
    };

    let mut raw = RawStoreError::new(kind, message);
    if let Some(code) = code {
        raw = raw.with_code(code);
    }
    for label in err.labels() {
        raw = raw.with_label(label.clone());
    }

    raw
}

#[cfg(test)]
mod tests {
    use crudlayer_core::error::DatabaseErrorKind;
    use crudlayer_core::mapper::map_store_error;

    use super::*;

    #[test]
    fn io_errors_classify_as_unavailable() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused");
        let err = DriverError::from(io);

        let raw = raw_from_driver(&err);

        assert_eq!(raw.kind, "Io");
        assert_eq!(raw.code, None);
        match map_store_error(raw) {
            crudlayer_core::error::AppError::Database { kind, .. } => {
                assert_eq!(kind, DatabaseErrorKind::Unavailable);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
