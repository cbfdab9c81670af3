//! GraphQL authentication mutations
//!
//! register, login, refreshToken and logout need no prior authentication.

use async_graphql::{Context, InputObject, Object, Result};

use crate::graphql::types::AuthResponse;
use crate::services::{AuthService, RegisterInput};

// ============================================================================
// Input Types
// ============================================================================

/// Input for user registration
#[derive(Debug, InputObject)]
pub struct RegisterUserInput {
    pub username: String,
    /// Email address (login identifier)
    pub email: String,
    /// Password (will be hashed)
    pub password: String,
}

/// Input for user login
#[derive(Debug, InputObject)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

// ============================================================================
// Mutations
// ============================================================================

#[derive(Default)]
pub struct AuthMutations;

#[Object]
impl AuthMutations {
    /// Register a new user account
    ///
    /// The first registered user becomes an admin.
    async fn register(&self, ctx: &Context<'_>, params: RegisterUserInput) -> Result<AuthResponse> {
        let auth = ctx.data_unchecked::<AuthService>();
        let result = auth
            .register(RegisterInput {
                username: params.username,
                email: params.email,
                password: params.password,
            })
            .await?;

        tracing::info!(
            user_id = result.user.id,
            username = %result.user.username,
            "User registered successfully"
        );
        Ok(result.into())
    }

    /// Authenticate with email and password
    async fn login(&self, ctx: &Context<'_>, params: LoginInput) -> Result<AuthResponse> {
        let auth = ctx.data_unchecked::<AuthService>();
        let result = auth.login(&params.email, &params.password).await?;
        tracing::info!(user_id = result.user.id, "User logged in");
        Ok(result.into())
    }

    /// Exchange a refresh token for a new token pair
    async fn refresh_token(&self, ctx: &Context<'_>, refresh_token: String) -> Result<AuthResponse> {
        let auth = ctx.data_unchecked::<AuthService>();
        Ok(auth.refresh(&refresh_token).await?.into())
    }

    /// Invalidate a refresh token. Returns false when it was already unknown.
    async fn logout(&self, ctx: &Context<'_>, refresh_token: String) -> Result<bool> {
        let auth = ctx.data_unchecked::<AuthService>();
        Ok(auth.logout(&refresh_token).await?)
    }
}
