//! GraphQL authentication and authorization
//!
//! The HTTP handler verifies the access token and attaches the resulting
//! [`AuthUser`] to the request data; resolvers read it back through
//! [`AuthExt`].
//!
//! ## Guards
//!
//! Use `AuthGuard` to require a logged-in user:
//!
//! ```ignore
//! #[graphql(guard = "AuthGuard")]
//! async fn me(&self, ctx: &Context<'_>) -> Result<User> { ... }
//! ```
//!
//! Use `RoleGuard` to require a specific role:
//!
//! ```ignore
//! #[graphql(guard = "RoleGuard::new(UserRole::Admin)")]
//! async fn delete_route(&self, ctx: &Context<'_>, id: i64) -> Result<bool> { ... }
//! ```

use async_graphql::{Context, Result};

use crate::entities::UserRole;
use crate::error::ApiError;
use crate::services::AuthUser;

pub const FORBIDDEN_MESSAGE: &str = "You are not allowed to access this.";

/// Extension trait to get the authenticated user from the GraphQL context
pub trait AuthExt {
    /// Get the authenticated user, or return an error if not authenticated
    fn auth_user(&self) -> Result<&AuthUser>;

    /// Get the authenticated user if present
    fn try_auth_user(&self) -> Option<&AuthUser>;

    /// Require an admin, or the user whose id is `owner_id`
    fn require_owner_or_admin(&self, owner_id: Option<i64>) -> Result<&AuthUser>;
}

impl<'a> AuthExt for Context<'a> {
    fn auth_user(&self) -> Result<&AuthUser> {
        self.data_opt::<AuthUser>().ok_or_else(|| {
            ApiError::Unauthenticated("User is not authenticated!".into()).into()
        })
    }

    fn try_auth_user(&self) -> Option<&AuthUser> {
        self.data_opt::<AuthUser>()
    }

    fn require_owner_or_admin(&self, owner_id: Option<i64>) -> Result<&AuthUser> {
        let user = self.auth_user()?;
        if user.is_admin() || owner_id == Some(user.id) {
            Ok(user)
        } else {
            Err(ApiError::Forbidden(FORBIDDEN_MESSAGE.into()).into())
        }
    }
}

/// Guard that requires authentication.
pub struct AuthGuard;

impl async_graphql::Guard for AuthGuard {
    fn check(&self, ctx: &Context<'_>) -> impl std::future::Future<Output = Result<()>> + Send {
        let result = ctx.auth_user().map(|_| ());
        async move { result }
    }
}

/// Guard that requires a specific role.
///
/// Anonymous callers get `UNAUTHENTICATED`, logged-in callers with another
/// role get `FORBIDDEN`.
pub struct RoleGuard {
    pub role: UserRole,
}

impl RoleGuard {
    pub fn new(role: UserRole) -> Self {
        Self { role }
    }
}

impl async_graphql::Guard for RoleGuard {
    fn check(&self, ctx: &Context<'_>) -> impl std::future::Future<Output = Result<()>> + Send {
        let result = ctx.auth_user().and_then(|user| {
            if user.role == self.role {
                Ok(())
            } else {
                Err(ApiError::Forbidden(FORBIDDEN_MESSAGE.into()).into())
            }
        });
        async move { result }
    }
}
