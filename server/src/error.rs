//! Translation of handler failures into HTTP error responses.
//!
//! Handlers return [`ApiError`]; its `IntoResponse` impl is the only place a
//! failure kind is mapped to a status code and message. The
//! [`attach_error_trace`] middleware adds diagnostic detail in development.

use crate::api::ErrorResponse;
use crate::AppState;
use axum::{
    body::Body,
    extract::{
        rejection::{JsonRejection, QueryRejection},
        State,
    },
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use recipe_core::{FieldViolation, InvalidRecipeId, StoreError, ValidationError};
use std::fmt::Write;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid {field}: {value}")]
    MalformedId { field: &'static str, value: String },

    #[error("Duplicate field value for {field}. Please use another value.")]
    DuplicateKey { field: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Recipe not found with id: {0}")]
    NotFound(String),

    #[error("{0}")]
    Store(#[source] StoreError),

    #[error("{}", .message.as_deref().unwrap_or("Server Error"))]
    Other {
        status: Option<StatusCode>,
        message: Option<String>,
    },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MalformedId { .. }
            | ApiError::DuplicateKey { .. }
            | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Other { status, .. } => status.unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }

    /// Debug rendering followed by the source chain.
    fn trace(&self) -> String {
        let mut trace = format!("{:?}", self);
        let mut source = std::error::Error::source(self);
        while let Some(err) = source {
            let _ = write!(trace, "\ncaused by: {}", err);
            source = err.source();
        }
        trace
    }
}

impl From<InvalidRecipeId> for ApiError {
    fn from(err: InvalidRecipeId) -> Self {
        ApiError::MalformedId {
            field: "id",
            value: err.value,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateKey { field } => ApiError::DuplicateKey { field },
            other => ApiError::Store(other),
        }
    }
}

const JSON_DATA_PREFIX: &str = "Failed to deserialize the JSON body into the target type: ";

/// Turn a serde data error such as `prepTime: invalid type: string "ten",
/// expected i64 at line 1 column 9` into a field violation message.
fn cast_failure_message(body_text: &str) -> String {
    let detail = body_text
        .strip_prefix(JSON_DATA_PREFIX)
        .unwrap_or(body_text);
    let detail = match detail.rfind(" at line ") {
        Some(pos) => &detail[..pos],
        None => detail,
    };

    match detail.split_once(": ") {
        Some((path, reason)) if !path.contains(' ') => {
            format!("Invalid value for {path}: {reason}")
        }
        _ => format!("Invalid recipe body: {detail}"),
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(err) => {
                ApiError::Validation(ValidationError::new(vec![FieldViolation {
                    field: "body",
                    message: cast_failure_message(&err.body_text()),
                }]))
            }
            JsonRejection::JsonSyntaxError(err) => ApiError::Other {
                status: Some(StatusCode::BAD_REQUEST),
                message: Some(err.body_text()),
            },
            other => ApiError::Other {
                status: Some(other.status()),
                message: Some(other.body_text()),
            },
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Other {
            status: Some(rejection.status()),
            message: Some(rejection.body_text()),
        }
    }
}

/// Details of a translated failure, carried in response extensions so the
/// trace middleware can re-render the body.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub message: String,
    pub trace: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(status = %status.as_u16(), error = ?self, "{}", message);
        } else {
            tracing::warn!(status = %status.as_u16(), error = ?self, "{}", message);
        }

        let report = ErrorReport {
            message: message.clone(),
            trace: self.trace(),
        };

        let mut response = (status, Json(ErrorResponse::new(message))).into_response();
        response.extensions_mut().insert(report);
        response
    }
}

/// Middleware that adds a `stack` field to error bodies when the runtime
/// mode allows it.
pub async fn attach_error_trace(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let response = next.run(request).await;

    if !state.mode.exposes_traces() {
        return response;
    }

    let Some(report) = response.extensions().get::<ErrorReport>().cloned() else {
        return response;
    };

    let (mut parts, _) = response.into_parts();
    parts.headers.remove(axum::http::header::CONTENT_LENGTH);
    let body = Json(ErrorResponse::new(report.message).with_stack(report.trace));

    (parts, body).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_id_is_bad_request() {
        let err: ApiError = "abc".parse::<recipe_core::RecipeId>().unwrap_err().into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Invalid id: abc");
    }

    #[test]
    fn test_duplicate_key_names_field() {
        let err: ApiError = StoreError::DuplicateKey {
            field: "name".to_string(),
        }
        .into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.to_string(),
            "Duplicate field value for name. Please use another value."
        );
    }

    #[test]
    fn test_validation_joins_messages() {
        let err: ApiError = ValidationError::new(vec![
            FieldViolation {
                field: "name",
                message: "Recipe name is required".to_string(),
            },
            FieldViolation {
                field: "servings",
                message: "Servings must be at least 1".to_string(),
            },
        ])
        .into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.to_string(),
            "Recipe name is required, Servings must be at least 1"
        );
    }

    #[test]
    fn test_store_failure_is_server_error() {
        let err: ApiError = StoreError::Unavailable("pool timed out".to_string()).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.trace().contains("caused by: Store unavailable: pool timed out"));
    }

    #[test]
    fn test_other_defaults() {
        let err = ApiError::Other {
            status: None,
            message: None,
        };
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Server Error");

        let err = ApiError::Other {
            status: Some(StatusCode::PAYLOAD_TOO_LARGE),
            message: Some("Body too large".to_string()),
        };
        assert_eq!(err.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(err.to_string(), "Body too large");
    }

    #[test]
    fn test_cast_failure_names_field() {
        assert_eq!(
            cast_failure_message(
                "Failed to deserialize the JSON body into the target type: prepTime: \
                 invalid type: string \"ten\", expected i64 at line 1 column 20"
            ),
            "Invalid value for prepTime: invalid type: string \"ten\", expected i64"
        );
        assert_eq!(
            cast_failure_message(
                "Failed to deserialize the JSON body into the target type: \
                 invalid type: sequence, expected struct RecipeCandidate at line 1 column 0"
            ),
            "Invalid recipe body: invalid type: sequence, expected struct RecipeCandidate"
        );
    }

    #[test]
    fn test_response_carries_report() {
        let response = ApiError::NotFound("abc".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let report = response.extensions().get::<ErrorReport>().unwrap();
        assert_eq!(report.message, "Recipe not found with id: abc");
    }
}
