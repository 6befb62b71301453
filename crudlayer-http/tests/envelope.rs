//! Envelope rendering tests: every response a service emits, success or
//! failure, flows through the two envelope types and must keep their shape.

use axum::body::to_bytes;
use axum::response::IntoResponse;
use crudlayer_core::error::{AppError, DatabaseErrorKind, FieldErrors};
use crudlayer_http::{ApiError, ApiResponse};
use serde_json::{Value, json};

async fn render(response: axum::response::Response) -> (u16, Value) {
    let status = response.status().as_u16();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap();

    (status, body)
}

#[tokio::test]
async fn success_envelope_wraps_payload() {
    let response = ApiResponse::ok(json!({ "id": 7 })).into_response();
    let (status, body) = render(response).await;

    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!({
            "statusCode": 200,
            "data": { "id": 7 },
            "message": "success",
            "success": true,
        })
    );
}

#[tokio::test]
async fn created_envelope_uses_201_and_custom_message() {
    let response = ApiResponse::created(json!({ "id": 7 }))
        .with_message("user registered")
        .into_response();
    let (status, body) = render(response).await;

    assert_eq!(status, 201);
    assert_eq!(body["statusCode"], 201);
    assert_eq!(body["message"], "user registered");
}

#[tokio::test]
async fn unrepresentable_status_code_falls_back_consistently() {
    let response = ApiResponse::new(42, json!(null), "odd").into_response();
    let (status, body) = render(response).await;

    // Body and status line degrade together, never apart.
    assert_eq!(status, 500);
    assert_eq!(body["statusCode"], 500);
}

#[tokio::test]
async fn not_found_renders_operational_envelope() {
    let err = ApiError(AppError::not_found("user", "123"));
    let (status, body) = render(err.into_response()).await;

    assert_eq!(status, 404);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"]["name"], "NOT_FOUND");
    assert_eq!(body["error"]["message"], "user not found: 123");
    assert!(body["error"].get("details").is_none());
}

#[tokio::test]
async fn validation_error_exposes_field_map() {
    let mut errors = FieldErrors::new();
    errors.push("email", "must be a valid email address");
    errors.push("password", "must be at least 8 characters");
    errors.push("password", "is required");

    let err = ApiError(AppError::from(errors));
    let (status, body) = render(err.into_response()).await;

    assert_eq!(status, 400);
    assert_eq!(body["error"]["name"], "VALIDATION_ERROR");
    assert_eq!(
        body["error"]["details"],
        json!({
            "email": ["must be a valid email address"],
            "password": ["must be at least 8 characters", "is required"],
        })
    );
}

#[tokio::test]
async fn duplicate_key_renders_400_database_envelope() {
    let err = ApiError(AppError::Database {
        kind: DatabaseErrorKind::DuplicateKey,
        message: "Write (11000): E11000 duplicate key error collection: users".to_string(),
    });
    let (status, body) = render(err.into_response()).await;

    assert_eq!(status, 400);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"]["name"], "DATABASE_ERROR");
    assert_eq!(body["error"]["message"], "duplicate value for a unique field");
    assert_eq!(body["error"]["details"], json!({ "kind": "DUPLICATE_KEY" }));
}

#[tokio::test]
async fn database_error_renders_subkind_status_and_tag() {
    let err = ApiError(AppError::Database {
        kind: DatabaseErrorKind::WriteConflict,
        message: "Write (112): WriteConflict".to_string(),
    });
    let (status, body) = render(err.into_response()).await;

    assert_eq!(status, 409);
    assert_eq!(body["error"]["name"], "DATABASE_ERROR");
    assert_eq!(body["error"]["message"], "write conflict, retry the operation");
    assert_eq!(body["error"]["details"], json!({ "kind": "WRITE_CONFLICT" }));
}

#[tokio::test]
async fn internal_defect_is_masked() {
    let err = ApiError(AppError::Internal("db password is hunter2".to_string()));
    let (status, body) = render(err.into_response()).await;

    assert_eq!(status, 500);
    assert_eq!(
        body,
        json!({
            "success": false,
            "error": {
                "name": "API_ERROR",
                "message": "internal server error",
            },
        })
    );
}
