//! REST route definitions
//!
//! The primary API is GraphQL at /graphql. REST covers health probes, login
//! and admin user management.

pub mod auth;
pub mod health;
pub mod users;

use axum::Router;
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;

use crate::AppState;
use crate::error::{ApiError, ApiResult};
use crate::services::AuthUser;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/api/auth", auth::router())
        .nest("/api/users", users::router())
}

/// Extract bearer token from Authorization header
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Bearer header first, then the `?token=` query parameter
pub fn request_token(headers: &HeaderMap, query_token: Option<&str>) -> Option<String> {
    extract_token(headers).or_else(|| {
        query_token
            .filter(|t| !t.is_empty())
            .map(str::to_string)
    })
}

/// Verify the caller's token and require the admin role
pub(crate) fn require_admin(
    state: &AppState,
    headers: &HeaderMap,
    query_token: Option<&str>,
) -> ApiResult<AuthUser> {
    let token = request_token(headers, query_token)
        .ok_or_else(|| ApiError::Unauthenticated("JWT not present in the request.".into()))?;
    let user = state.auth.verify_access_token(&token)?;
    if !user.is_admin() {
        tracing::warn!(user_id = user.id, "Rejected non-admin REST request");
        return Err(ApiError::Forbidden("Access denied.".into()));
    }
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_bearer_header_wins_over_query() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        assert_eq!(request_token(&headers, Some("xyz")), Some("abc".into()));
    }

    #[test]
    fn test_query_token_fallback() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcg=="));
        assert_eq!(request_token(&headers, Some("xyz")), Some("xyz".into()));
        assert_eq!(request_token(&HeaderMap::new(), Some("")), None);
        assert_eq!(request_token(&HeaderMap::new(), None), None);
    }
}
