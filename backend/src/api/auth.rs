//! Login endpoint - "POST /api/auth/login"

use axum::{Json, Router, extract::State, routing::post};
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::entities::{User, UserRole};
use crate::error::{ApiError, ApiResult};

pub const PARAM_MISSING_ERROR: &str = "One or more of the required parameters was missing.";
pub const LOGIN_FAILED_ERROR: &str = "Login failed";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginUser {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub role: UserRole,
}

impl From<User> for LoginUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
            role: user.role,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub refresh_token: String,
    pub user: LoginUser,
}

async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let (Some(email), Some(password)) = (
        body.email.filter(|e| !e.is_empty()),
        body.password.filter(|p| !p.is_empty()),
    ) else {
        return Err(ApiError::BadRequest(PARAM_MISSING_ERROR.into()));
    };

    let result = state
        .auth
        .login(&email, &password)
        .await
        .map_err(|e| match e {
            ApiError::Unauthenticated(_) => ApiError::Unauthenticated(LOGIN_FAILED_ERROR.into()),
            other => other,
        })?;

    Ok(Json(LoginResponse {
        token: result.tokens.access_token,
        refresh_token: result.tokens.refresh_token,
        user: result.user.into(),
    }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/login", post(login))
}
