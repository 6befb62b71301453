//! Core traits for entity representation and serialization.
//!
//! Every record managed by a repository implements [`Entity`]: it owns a
//! UUID identifier and names the collection it lives in. Serialization
//! helpers are provided through the blanket [`EntityExt`] trait.

use bson::{Bson, Uuid, de::deserialize_from_bson, ser::serialize_to_bson};
use serde::{Deserialize, Serialize};
use serde_json::{Value, from_value, to_value};

use crate::error::{AppError, AppResult};

/// Trait implemented by every stored record type.
///
/// # Example
///
/// ```ignore
/// use crudlayer::entity::Entity;
/// use bson::Uuid;
/// use serde::{Serialize, Deserialize};
///
/// #[derive(Debug, Clone, Serialize, Deserialize)]
/// pub struct User {
///     pub id: Uuid,
///     pub email: String,
/// }
///
/// impl Entity for User {
///     fn id(&self) -> &Uuid {
///         &self.id
///     }
///
///     fn collection_name() -> &'static str {
///         "users"
///     }
/// }
/// ```
pub trait Entity: Serialize + for<'de> Deserialize<'de> + Send + Sync + Clone + 'static {
    /// Returns a reference to this entity's unique identifier.
    fn id(&self) -> &Uuid;

    /// Returns the name of the collection this entity belongs to.
    ///
    /// This should be a static, lowercase identifier (e.g. "users",
    /// "products").
    fn collection_name() -> &'static str;
}

/// Parses a path or query identifier into a [`Uuid`].
///
/// Ids are typed `Uuid` everywhere past this point; this is the one place
/// a caller-supplied string becomes an id. Malformed input maps to the
/// invalid-id database subkind, which renders as a 400.
///
/// ```ignore
/// let id = parse_id(&path_param)?;
/// let user = users.get_by_id(id).await?;
/// ```
pub fn parse_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::invalid_id(raw))
}

/// Serialization utilities automatically implemented for every [`Entity`].
pub trait EntityExt: Entity {
    /// Converts this entity to a BSON value for storage.
    fn to_bson(&self) -> AppResult<Bson>;

    /// Reconstructs an entity from a stored BSON value.
    fn from_bson(bson: Bson) -> AppResult<Self>;

    /// Converts this entity to a JSON value.
    fn to_json(&self) -> AppResult<Value>;

    /// Reconstructs an entity from a JSON value.
    fn from_json(value: Value) -> AppResult<Self>;
}

impl<E: Entity> EntityExt for E {
    fn to_bson(&self) -> AppResult<Bson> {
        Ok(serialize_to_bson(self)?)
    }

    fn from_bson(bson: Bson) -> AppResult<Self> {
        Ok(deserialize_from_bson(bson)?)
    }

    fn to_json(&self) -> AppResult<Value> {
        Ok(to_value(self)?)
    }

    fn from_json(value: Value) -> AppResult<Self> {
        Ok(from_value(value)?)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::{AppError, DatabaseErrorKind};

    use super::*;

    #[test]
    fn parse_id_accepts_canonical_uuids() {
        let id = Uuid::new();
        assert_eq!(parse_id(&id.to_string()).unwrap(), id);
    }

    #[test]
    fn parse_id_rejects_malformed_input_as_invalid_id() {
        let err = parse_id("not-a-uuid").unwrap_err();

        match err {
            AppError::Database { kind, message } => {
                assert_eq!(kind, DatabaseErrorKind::InvalidId);
                assert!(message.contains("not-a-uuid"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(
            AppError::Database {
                kind: DatabaseErrorKind::InvalidId,
                message: String::new(),
            }
            .status_code(),
            400
        );
    }
}
