//! Input parsing and validation for inbound payloads.
//!
//! [`parse`] deserializes a raw JSON value into a payload type and runs its
//! [`Validate`] implementation. Unknown fields are stripped silently (they
//! are never an error); recognized fields are type-checked by serde and
//! constraint-checked by the payload's rules. All violations are collected
//! before failing, so a payload with three bad fields reports all three
//! through [`AppError::Validation`].
//!
//! The [`rules`] module holds the small checks payload types compose in
//! their `validate` impls.

use serde::de::DeserializeOwned;

use crate::error::{AppResult, FieldErrors};

/// Constraint checks for a parsed payload.
///
/// Implementations should record every violation into a [`FieldErrors`]
/// rather than returning at the first failure.
///
/// # Example
///
/// ```ignore
/// #[derive(Deserialize, Serialize)]
/// struct RegisterPayload {
///     email: String,
///     password: String,
/// }
///
/// impl Validate for RegisterPayload {
///     fn validate(&self) -> Result<(), FieldErrors> {
///         let mut errors = FieldErrors::new();
///         rules::email(&mut errors, "email", &self.email);
///         rules::min_len(&mut errors, "password", &self.password, 8);
///         errors.into_result()
///     }
/// }
/// ```
pub trait Validate {
    /// Checks the payload's constraints, collecting every violation.
    fn validate(&self) -> Result<(), FieldErrors>;
}

/// Parses and validates a raw JSON value into a payload.
///
/// Deserialization failures (wrong types, missing required fields) surface
/// as a validation error keyed under `"payload"`. Parsing is idempotent:
/// serializing the result and parsing it again yields the same value.
pub fn parse<T>(raw: serde_json::Value) -> AppResult<T>
where
    T: DeserializeOwned + Validate,
{
    let payload: T = serde_json::from_value(raw).map_err(|err| {
        let mut errors = FieldErrors::new();
        errors.push("payload", err.to_string());
        errors
    })?;

    payload.validate()?;

    Ok(payload)
}

/// Reusable field checks for [`Validate`] implementations.
///
/// Each rule records its violation into the shared [`FieldErrors`] and
/// returns, so rules can be stacked and every failure is reported.
pub mod rules {
    use crate::error::FieldErrors;

    /// The string must not be empty or whitespace-only.
    pub fn required(errors: &mut FieldErrors, field: &str, value: &str) {
        if value.trim().is_empty() {
            errors.push(field, format!("{field} must not be empty"));
        }
    }

    /// The string must be at least `min` characters long.
    pub fn min_len(errors: &mut FieldErrors, field: &str, value: &str, min: usize) {
        if value.chars().count() < min {
            errors.push(field, format!("{field} must be at least {min} characters"));
        }
    }

    /// The string must be at most `max` characters long.
    pub fn max_len(errors: &mut FieldErrors, field: &str, value: &str, max: usize) {
        if value.chars().count() > max {
            errors.push(field, format!("{field} must be at most {max} characters"));
        }
    }

    /// The string must look like an email address. Deliberately loose:
    /// one `@` with a dot somewhere after it.
    pub fn email(errors: &mut FieldErrors, field: &str, value: &str) {
        let valid = value
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));

        if !valid {
            errors.push(field, format!("{field} must be a valid email address"));
        }
    }

    /// The number must lie within `min..=max`.
    pub fn range(errors: &mut FieldErrors, field: &str, value: i64, min: i64, max: i64) {
        if value < min || value > max {
            errors.push(field, format!("{field} must be between {min} and {max}"));
        }
    }

    /// For partial-update payloads: at least one optional field must be
    /// set. `provided` holds an `is_some` flag per recognized field.
    pub fn at_least_one(errors: &mut FieldErrors, provided: &[bool]) {
        if !provided.contains(&true) {
            errors.push("payload", "at least one field must be provided");
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    use super::*;
    use crate::error::AppError;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct RegisterPayload {
        email: String,
        password: String,
        display_name: String,
    }

    impl Validate for RegisterPayload {
        fn validate(&self) -> Result<(), FieldErrors> {
            let mut errors = FieldErrors::new();
            rules::email(&mut errors, "email", &self.email);
            rules::min_len(&mut errors, "password", &self.password, 8);
            rules::required(&mut errors, "display_name", &self.display_name);
            rules::max_len(&mut errors, "display_name", &self.display_name, 32);
            errors.into_result()
        }
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct UpdateProfilePayload {
        display_name: Option<String>,
        bio: Option<String>,
    }

    impl Validate for UpdateProfilePayload {
        fn validate(&self) -> Result<(), FieldErrors> {
            let mut errors = FieldErrors::new();
            rules::at_least_one(
                &mut errors,
                &[self.display_name.is_some(), self.bio.is_some()],
            );
            if let Some(name) = &self.display_name {
                rules::required(&mut errors, "display_name", name);
            }
            errors.into_result()
        }
    }

    #[test]
    fn unknown_fields_are_stripped_silently() {
        let parsed: RegisterPayload = parse(json!({
            "email": "alice@example.com",
            "password": "hunter2hunter2",
            "display_name": "Alice",
            "role": "admin",
            "is_admin": true,
        }))
        .unwrap();

        assert_eq!(parsed.email, "alice@example.com");
        // The extra fields do not survive the parse.
        let round_trip = serde_json::to_value(&parsed).unwrap();
        assert!(round_trip.get("role").is_none());
    }

    #[test]
    fn parsing_sanitized_output_is_idempotent() {
        let first: RegisterPayload = parse(json!({
            "email": "alice@example.com",
            "password": "hunter2hunter2",
            "display_name": "Alice",
            "extra": 1,
        }))
        .unwrap();

        let second: RegisterPayload = parse(serde_json::to_value(&first).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn all_violations_are_collected_not_just_the_first() {
        let result: AppResult<RegisterPayload> = parse(json!({
            "email": "not-an-email",
            "password": "short",
            "display_name": "",
        }));

        match result {
            Err(AppError::Validation(errors)) => {
                assert_eq!(errors.len(), 3);
                assert!(errors.get("email").is_some());
                assert!(errors.get("password").is_some());
                assert!(errors.get("display_name").is_some());
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn type_mismatch_is_a_validation_error() {
        let result: AppResult<RegisterPayload> = parse(json!({
            "email": 42,
            "password": "hunter2hunter2",
            "display_name": "Alice",
        }));

        match result {
            Err(AppError::Validation(errors)) => assert!(errors.get("payload").is_some()),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn empty_update_payload_is_rejected_before_any_call() {
        let result: AppResult<UpdateProfilePayload> = parse(json!({}));

        match result {
            Err(AppError::Validation(errors)) => {
                let messages = errors.get("payload").unwrap();
                assert!(messages[0].contains("at least one field must be provided"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn update_payload_with_one_field_passes() {
        let parsed: UpdateProfilePayload =
            parse(json!({ "bio": "hello", "leftover": null })).unwrap();
        assert_eq!(parsed.bio.as_deref(), Some("hello"));
        assert!(parsed.display_name.is_none());
    }
}
