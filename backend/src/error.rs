//! Errors surfaced to API clients
//!
//! One error type serves both surfaces: GraphQL resolvers convert it into an
//! `async_graphql::Error` with an `extensions.code`, REST handlers turn it
//! into a status code and a `{ "error": ... }` body.

use async_graphql::ErrorExtensions;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use crate::orm::QueryError;
use crate::validation::FieldError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Unauthenticated(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Query(QueryError),

    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

impl ApiError {
    pub fn not_found(what: &str) -> Self {
        ApiError::NotFound(format!("{} not found", what))
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Unauthenticated(_) => "UNAUTHENTICATED",
            ApiError::Forbidden(_) => "FORBIDDEN",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Validation(_) | ApiError::BadRequest(_) => "BAD_USER_INPUT",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::Query(_) | ApiError::Database(_) | ApiError::Internal(_) => {
                "INTERNAL_SERVER_ERROR"
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Query(_) | ApiError::Database(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message safe to show a client; storage failures are logged and masked.
    fn public_message(&self) -> String {
        match self {
            ApiError::Query(_) | ApiError::Database(_) | ApiError::Internal(_) => {
                tracing::error!(error = %self, "Request failed");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        match err {
            // Descriptor misses come from client-chosen filter fields
            QueryError::UnknownField { .. }
            | QueryError::UnknownRelation { .. }
            | QueryError::RelationNotJoined(_) => ApiError::BadRequest(err.to_string()),
            err if err.is_unique_violation() => {
                ApiError::Conflict("A record with the same unique value already exists".into())
            }
            err => ApiError::Query(err),
        }
    }
}

impl ErrorExtensions for ApiError {
    fn extend(&self) -> async_graphql::Error {
        let code = self.code();
        let fields = match self {
            ApiError::Validation(fields) => Some(fields.clone()),
            _ => None,
        };

        async_graphql::Error::new(self.public_message()).extend_with(move |_, e| {
            e.set("code", code);
            if let Some(Ok(list)) = fields.as_ref().map(async_graphql::to_value) {
                e.set("fields", list);
            }
        })
    }
}

impl From<ApiError> for async_graphql::Error {
    fn from(err: ApiError) -> Self {
        err.extend()
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<Vec<FieldError>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let fields = match &self {
            ApiError::Validation(fields) => Some(fields.clone()),
            _ => None,
        };
        let body = ErrorBody {
            error: self.public_message(),
            fields,
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_miss_is_a_client_error() {
        let err = ApiError::from(QueryError::UnknownField {
            entity: "Route",
            field: "colour".into(),
        });
        assert_eq!(err.code(), "BAD_USER_INPUT");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_internal_message_is_masked() {
        let err = ApiError::Internal(anyhow::anyhow!("disk on fire"));
        let gql = err.extend();
        assert_eq!(gql.message, "Internal server error");
    }

    #[test]
    fn test_validation_carries_fields() {
        let err = ApiError::Validation(vec![FieldError::new("title", "too short")]);
        let gql = err.extend();
        let extensions = gql.extensions.unwrap();
        assert_eq!(
            extensions.get("code"),
            Some(&async_graphql::Value::from("BAD_USER_INPUT"))
        );
        assert!(extensions.get("fields").is_some());
    }
}
