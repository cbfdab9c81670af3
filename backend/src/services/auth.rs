//! Authentication service for user management and JWT handling
//!
//! Provides:
//! - User registration and login
//! - Password hashing with bcrypt
//! - Access token issuing and verification (HS256)
//! - Refresh token rotation

use bcrypt::{hash, verify};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::Rng;
use rand::distributions::Alphanumeric;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::config::Config;
use crate::db::sqlite_helpers::{expires_in, str_to_datetime};
use crate::db::{CreateUser, Database};
use crate::entities::{User, UserRole};
use crate::error::{ApiError, ApiResult};
use crate::validation::{FieldError, Validate, Validator, ensure_valid};

/// Length of the opaque refresh token handed to clients
pub const REFRESH_TOKEN_LENGTH: usize = 200;

// ============================================================================
// JWT Claims
// ============================================================================

/// Claims structure for access tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// User ID (subject)
    pub sub: i64,
    pub username: String,
    /// 1 admin, 2 standard
    pub role: i64,
    /// Expiration timestamp
    pub exp: i64,
    /// Issued at timestamp
    pub iat: i64,
}

// ============================================================================
// Auth Types
// ============================================================================

/// The caller behind a verified access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: i64,
    pub username: String,
    pub role: UserRole,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// Token pair returned after successful authentication
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthTokens {
    /// Short-lived access token
    pub access_token: String,
    /// Long-lived refresh token
    pub refresh_token: String,
    /// Access token expiration in seconds
    pub expires_in: i64,
}

/// Login result
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub user: User,
    pub tokens: AuthTokens,
}

/// Registration input
#[derive(Debug, Clone)]
pub struct RegisterInput {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl Validate for RegisterInput {
    fn validate(&self) -> Vec<FieldError> {
        Validator::new()
            .length("username", Some(self.username.as_str()), 4, 100)
            .email("email", Some(self.email.as_str()))
            .length("password", Some(self.password.as_str()), 6, 100)
            .finish()
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Auth service configuration
#[derive(Clone)]
pub struct AuthConfig {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    /// Access token lifetime in seconds
    pub access_token_lifetime: i64,
    /// Refresh token lifetime in seconds
    pub refresh_token_lifetime: i64,
    pub bcrypt_cost: u32,
}

impl AuthConfig {
    pub fn from_config(config: &Config) -> Self {
        let secret = config.jwt_secret.trim().as_bytes();
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            access_token_lifetime: config.access_token_lifetime,
            refresh_token_lifetime: config.refresh_token_lifetime,
            bcrypt_cost: config.bcrypt_cost,
        }
    }
}

// ============================================================================
// Auth Service
// ============================================================================

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    db: Database,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(db: Database, config: AuthConfig) -> Self {
        Self { db, config }
    }

    // ========================================================================
    // Registration and login
    // ========================================================================

    /// Register a new user and log them in. The first account becomes an admin.
    pub async fn register(&self, input: RegisterInput) -> ApiResult<LoginResult> {
        let user = self.create_user(input).await?;
        let tokens = self.issue_tokens(&user).await?;
        Ok(LoginResult { user, tokens })
    }

    /// Create an active account without issuing tokens. The first account becomes an admin.
    pub async fn create_user(&self, input: RegisterInput) -> ApiResult<User> {
        ensure_valid(&input)?;
        let users = self.db.users();

        if users.get_by_email(&input.email).await?.is_some() {
            return Err(ApiError::Conflict("Email already registered".into()));
        }
        if users.get_by_username(&input.username).await?.is_some() {
            return Err(ApiError::Conflict("Username already taken".into()));
        }

        let role = if users.count().await? == 0 {
            tracing::info!(email = %input.email, "Creating first admin user");
            UserRole::Admin
        } else {
            UserRole::Standard
        };

        let password_hash = self.hash_password(&input.password)?;
        let user = users
            .create(CreateUser {
                username: input.username,
                email: input.email,
                password_hash,
                role,
                active: true,
            })
            .await?;

        tracing::info!(user_id = user.id, role = ?user.role, "User created");
        Ok(user)
    }

    /// Login with email and password. Inactive and deleted users cannot log in.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<LoginResult> {
        let user = self
            .db
            .users()
            .get_by_email(email)
            .await?
            .filter(|u| u.active && !u.is_deleted);

        let Some(user) = user else {
            tracing::warn!(email = %email, "Login rejected: unknown or inactive user");
            return Err(ApiError::Unauthenticated("User doesn't exist".into()));
        };

        if !self.verify_password(password, &user.password)? {
            tracing::warn!(user_id = user.id, "Login rejected: wrong password");
            return Err(ApiError::Unauthenticated("Incorrect password".into()));
        }

        let tokens = self.issue_tokens(&user).await?;
        Ok(LoginResult { user, tokens })
    }

    // ========================================================================
    // Token Management
    // ========================================================================

    /// Exchange a refresh token for a new pair. The old token is revoked.
    pub async fn refresh(&self, refresh_token: &str) -> ApiResult<LoginResult> {
        let invalid = || ApiError::Unauthenticated("Invalid refresh token".into());
        let users = self.db.users();

        let stored = users
            .get_refresh_token_by_hash(&hash_token(refresh_token))
            .await?
            .ok_or_else(invalid)?;

        // Rotation: the presented token is single-use whatever happens next
        users.delete_refresh_token(stored.id).await?;

        let expired = str_to_datetime(&stored.expires_at)
            .map(|at| at <= Utc::now())
            .unwrap_or(true);
        if expired {
            return Err(invalid());
        }

        let user = users
            .get_by_id(stored.user_id)
            .await?
            .filter(|u| u.active && !u.is_deleted)
            .ok_or_else(invalid)?;

        let tokens = self.issue_tokens(&user).await?;
        Ok(LoginResult { user, tokens })
    }

    /// Logout - invalidate refresh token
    pub async fn logout(&self, refresh_token: &str) -> ApiResult<bool> {
        let users = self.db.users();
        match users.get_refresh_token_by_hash(&hash_token(refresh_token)).await? {
            Some(stored) => Ok(users.delete_refresh_token(stored.id).await?),
            None => Ok(false),
        }
    }

    /// Verify an access token and return its caller
    pub fn verify_access_token(&self, token: &str) -> ApiResult<AuthUser> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        let token_data = decode::<AccessTokenClaims>(token, &self.config.decoding_key, &validation)
            .map_err(|e| {
                tracing::debug!("JWT verification failed: {}", e);
                ApiError::Unauthenticated("Invalid or expired token".into())
            })?;

        let claims = token_data.claims;
        let role = UserRole::try_from(claims.role)
            .map_err(|_| ApiError::Unauthenticated("Invalid or expired token".into()))?;

        Ok(AuthUser {
            id: claims.sub,
            username: claims.username,
            role,
        })
    }

    /// Hash a password with the configured bcrypt cost
    pub fn hash_password(&self, password: &str) -> ApiResult<String> {
        hash(password, self.config.bcrypt_cost)
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("Failed to hash password: {}", e)))
    }

    fn verify_password(&self, password: &str, hash: &str) -> ApiResult<bool> {
        verify(password, hash)
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("Failed to verify password: {}", e)))
    }

    fn sign_access_token(&self, user: &User) -> ApiResult<String> {
        let now = Utc::now();
        let claims = AccessTokenClaims {
            sub: user.id,
            username: user.username.clone(),
            role: user.role.as_i64(),
            exp: (now + Duration::seconds(self.config.access_token_lifetime)).timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.config.encoding_key)
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("Failed to create access token: {}", e)))
    }

    /// Sign an access token and store a fresh refresh token for `user`
    async fn issue_tokens(&self, user: &User) -> ApiResult<AuthTokens> {
        let access_token = self.sign_access_token(user)?;

        let refresh_token = generate_refresh_token();
        let expires_at = expires_in(self.config.refresh_token_lifetime);
        self.db
            .users()
            .create_refresh_token(user.id, &hash_token(&refresh_token), &expires_at)
            .await?;

        Ok(AuthTokens {
            access_token,
            refresh_token,
            expires_in: self.config.access_token_lifetime,
        })
    }
}

/// Hash a token for storage (using SHA-256)
fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn generate_refresh_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(REFRESH_TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    async fn service() -> AuthService {
        let db = Database::in_memory().await.unwrap();
        AuthService::new(db, AuthConfig::from_config(&Config::for_tests()))
    }

    fn input(username: &str, email: &str) -> RegisterInput {
        RegisterInput {
            username: username.into(),
            email: email.into(),
            password: "correct horse".into(),
        }
    }

    #[tokio::test]
    async fn test_first_user_is_admin() {
        let auth = service().await;
        let first = auth.register(input("alice", "alice@example.com")).await.unwrap();
        let second = auth.register(input("bobby", "bob@example.com")).await.unwrap();
        assert_eq!(first.user.role, UserRole::Admin);
        assert_eq!(second.user.role, UserRole::Standard);
        assert_eq!(first.tokens.refresh_token.len(), REFRESH_TOKEN_LENGTH);
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let auth = service().await;
        auth.register(input("alice", "alice@example.com")).await.unwrap();
        let result = auth.register(input("alice2", "alice@example.com")).await;
        assert_matches!(result, Err(ApiError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_register_validates_input() {
        let auth = service().await;
        let result = auth.register(input("al", "nope")).await;
        assert_matches!(result, Err(ApiError::Validation(fields)) if fields.len() == 2);
    }

    #[tokio::test]
    async fn test_login_and_token_round_trip() {
        let auth = service().await;
        auth.register(input("alice", "alice@example.com")).await.unwrap();

        let result = auth.login("alice@example.com", "correct horse").await.unwrap();
        let caller = auth.verify_access_token(&result.tokens.access_token).unwrap();
        assert_eq!(caller.username, "alice");
        assert!(caller.is_admin());

        assert_matches!(
            auth.login("alice@example.com", "wrong").await,
            Err(ApiError::Unauthenticated(m)) if m == "Incorrect password"
        );
        assert_matches!(
            auth.login("nobody@example.com", "x").await,
            Err(ApiError::Unauthenticated(m)) if m == "User doesn't exist"
        );
    }

    #[tokio::test]
    async fn test_deleted_user_cannot_login() {
        let auth = service().await;
        let registered = auth.register(input("alice", "alice@example.com")).await.unwrap();
        auth.db.users().soft_delete(registered.user.id).await.unwrap();

        assert_matches!(
            auth.login("alice@example.com", "correct horse").await,
            Err(ApiError::Unauthenticated(_))
        );
    }

    #[tokio::test]
    async fn test_expired_access_token_is_rejected() {
        let db = Database::in_memory().await.unwrap();
        let mut config = Config::for_tests();
        config.access_token_lifetime = -120;
        let auth = AuthService::new(db, AuthConfig::from_config(&config));

        let registered = auth.register(input("alice", "alice@example.com")).await.unwrap();
        assert_matches!(
            auth.verify_access_token(&registered.tokens.access_token),
            Err(ApiError::Unauthenticated(_))
        );
    }

    #[tokio::test]
    async fn test_token_signed_with_other_secret_is_rejected() {
        let auth = service().await;
        let registered = auth.register(input("alice", "alice@example.com")).await.unwrap();

        let mut other = Config::for_tests();
        other.jwt_secret = "another-secret".into();
        let other = AuthService::new(auth.db.clone(), AuthConfig::from_config(&other));
        assert!(other.verify_access_token(&registered.tokens.access_token).is_err());
    }

    #[tokio::test]
    async fn test_refresh_rotates_token() {
        let auth = service().await;
        let registered = auth.register(input("alice", "alice@example.com")).await.unwrap();
        let old = registered.tokens.refresh_token;

        let refreshed = auth.refresh(&old).await.unwrap();
        assert_ne!(refreshed.tokens.refresh_token, old);
        assert_matches!(auth.refresh(&old).await, Err(ApiError::Unauthenticated(_)));
        assert!(auth.refresh(&refreshed.tokens.refresh_token).await.is_ok());
    }

    #[tokio::test]
    async fn test_logout_revokes_refresh_token() {
        let auth = service().await;
        let registered = auth.register(input("alice", "alice@example.com")).await.unwrap();
        let token = registered.tokens.refresh_token;

        assert!(auth.logout(&token).await.unwrap());
        assert!(!auth.logout(&token).await.unwrap());
        assert!(auth.refresh(&token).await.is_err());
    }

    #[tokio::test]
    async fn test_refresh_token_expires_after_configured_lifetime() {
        let auth = service().await;
        let registered = auth.register(input("alice", "alice@example.com")).await.unwrap();

        let record = auth
            .db
            .users()
            .get_refresh_token_by_hash(&hash_token(&registered.tokens.refresh_token))
            .await
            .unwrap()
            .unwrap();
        let expires_at = str_to_datetime(&record.expires_at).unwrap();
        let remaining = (expires_at - Utc::now()).num_seconds();
        let lifetime = auth.config.refresh_token_lifetime;
        assert!(remaining > lifetime - 60 && remaining <= lifetime, "{remaining}");
    }
}
