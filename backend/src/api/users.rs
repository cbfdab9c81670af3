//! Admin user management - "/api/users"

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::get,
};
use serde::Deserialize;

use super::require_admin;
use crate::AppState;
use crate::entities::{USER_RELATIONS, User};
use crate::error::{ApiError, ApiResult};
use crate::orm::{self, Changes, FilterSet, Paginated, PaginationRequest};
use crate::services::RegisterInput;
use crate::validation::{FieldError, Validate, Validator, ensure_valid};

#[derive(Debug, Default, Deserialize)]
pub struct TokenQuery {
    pub token: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub number: Option<i64>,
    pub size: Option<i64>,
    pub token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Absent fields are left alone; an empty password keeps the current one
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl UpdateUserRequest {
    fn new_password(&self) -> Option<&str> {
        self.password.as_deref().filter(|p| !p.is_empty())
    }
}

impl Validate for UpdateUserRequest {
    fn validate(&self) -> Vec<FieldError> {
        Validator::new()
            .length("username", self.username.as_deref(), 4, 100)
            .email("email", self.email.as_deref())
            .length("password", self.new_password(), 6, 100)
            .finish()
    }
}

async fn find_user(state: &AppState, id: i64) -> ApiResult<User> {
    orm::find_one::<User>(state.db.pool(), id, USER_RELATIONS)
        .await?
        .filter(|user| !user.is_deleted)
        .ok_or_else(|| ApiError::not_found("User"))
}

/// GET /api/users?number=&size=
async fn list_users(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Paginated<User>>> {
    require_admin(&state, &headers, query.token.as_deref())?;
    let pagination = PaginationRequest::from_parts(query.number, query.size);
    let filters = FilterSet::new().with("is_deleted", false);
    let page =
        orm::paginate::<User>(state.db.pool(), USER_RELATIONS, &filters, pagination.as_ref())
            .await?;
    Ok(Json(page))
}

/// GET /api/users/{id}
async fn get_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Query(query): Query<TokenQuery>,
) -> ApiResult<Json<User>> {
    require_admin(&state, &headers, query.token.as_deref())?;
    Ok(Json(find_user(&state, id).await?))
}

/// POST /api/users
async fn create_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<TokenQuery>,
    Json(body): Json<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let admin = require_admin(&state, &headers, query.token.as_deref())?;
    let user = state
        .auth
        .create_user(RegisterInput {
            username: body.username,
            email: body.email,
            password: body.password,
        })
        .await?;
    tracing::info!(admin_id = admin.id, user_id = user.id, "User created via REST");
    Ok((StatusCode::CREATED, Json(user)))
}

/// PUT /api/users/{id}
async fn update_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Query(query): Query<TokenQuery>,
    Json(body): Json<UpdateUserRequest>,
) -> ApiResult<Json<User>> {
    require_admin(&state, &headers, query.token.as_deref())?;
    find_user(&state, id).await?;
    ensure_valid(&body)?;

    let password_hash = body
        .new_password()
        .map(|p| state.auth.hash_password(p))
        .transpose()?;
    let changes = Changes::new()
        .set_opt("username", body.username.clone())
        .set_opt("email", body.email.clone())
        .set_opt("password", password_hash);
    orm::update::<User>(state.db.pool(), id, changes).await?;

    Ok(Json(find_user(&state, id).await?))
}

/// DELETE /api/users/{id}
async fn delete_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Query(query): Query<TokenQuery>,
) -> ApiResult<StatusCode> {
    require_admin(&state, &headers, query.token.as_deref())?;
    find_user(&state, id).await?;

    let users = state.db.users();
    users.soft_delete(id).await?;
    users.delete_user_refresh_tokens(id).await?;
    Ok(StatusCode::OK)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/{id}", get(get_user).put(update_user).delete(delete_user))
}
