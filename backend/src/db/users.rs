//! Users repository for authentication and authorization
//!
//! Handles user accounts and their refresh tokens.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use super::sqlite_helpers::{bool_to_int, now_iso8601};
use crate::entities::{User, UserRole};
use crate::orm::{self, Changes, EntityQuery, FilterSet};

// ============================================================================
// Records
// ============================================================================

#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct RefreshTokenRecord {
    pub id: i64,
    pub user_id: i64,
    pub token_hash: String,
    pub expires_at: String,
    pub created_at: String,
}

// ============================================================================
// Repository
// ============================================================================

pub struct UsersRepository {
    pool: SqlitePool,
}

impl UsersRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ========================================================================
    // User CRUD
    // ========================================================================

    /// Create a user and return it
    pub async fn create(&self, user: CreateUser) -> Result<User> {
        let id = orm::insert::<User>(
            &self.pool,
            Changes::new()
                .set("username", user.username)
                .set("email", user.email)
                .set("password", user.password_hash)
                .set("role", user.role.as_i64())
                .set("active", user.active),
        )
        .await?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("User {} vanished after insert", id))
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<User>> {
        Ok(orm::find_one::<User>(&self.pool, id, &[]).await?)
    }

    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        self.find_by("email", email).await
    }

    pub async fn get_by_username(&self, username: &str) -> Result<Option<User>> {
        self.find_by("username", username).await
    }

    async fn find_by(&self, field: &str, value: &str) -> Result<Option<User>> {
        let filters = FilterSet::new().with(field, value);
        Ok(EntityQuery::<User>::new()
            .add_filters(&filters, &[])?
            .fetch_one(&self.pool)
            .await?)
    }

    /// Mark a user deleted and inactive; the row is kept
    pub async fn soft_delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE users SET is_deleted = ?, active = ?, updated_at = ? WHERE id = ?",
        )
        .bind(bool_to_int(true))
        .bind(bool_to_int(false))
        .bind(now_iso8601())
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn count(&self) -> Result<i64> {
        let row = sqlx::query_as::<_, (i64,)>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }

    // ========================================================================
    // Refresh tokens
    // ========================================================================

    pub async fn create_refresh_token(
        &self,
        user_id: i64,
        token_hash: &str,
        expires_at: &str,
    ) -> Result<i64> {
        let result = sqlx::query(
            "INSERT INTO user_tokens (user_id, token_hash, expires_at, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(token_hash)
        .bind(expires_at)
        .bind(now_iso8601())
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn get_refresh_token_by_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<RefreshTokenRecord>> {
        let record = sqlx::query_as::<_, RefreshTokenRecord>(
            "SELECT id, user_id, token_hash, expires_at, created_at FROM user_tokens WHERE token_hash = ?",
        )
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    pub async fn delete_refresh_token(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM user_tokens WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_user_refresh_tokens(&self, user_id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM user_tokens WHERE user_id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Drop refresh tokens whose expiry has passed
    pub async fn cleanup_expired_refresh_tokens(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM user_tokens WHERE expires_at < ?")
            .bind(now_iso8601())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::db::sqlite_helpers::expires_in;

    fn alice() -> CreateUser {
        CreateUser {
            username: "alice".into(),
            email: "alice@example.com".into(),
            password_hash: "$2b$04$hash".into(),
            role: UserRole::Admin,
            active: true,
        }
    }

    #[tokio::test]
    async fn test_create_and_lookup() {
        let db = Database::in_memory().await.unwrap();
        let users = db.users();

        let created = users.create(alice()).await.unwrap();
        assert_eq!(created.role, UserRole::Admin);
        assert!(created.active);
        assert!(!created.is_deleted);

        let by_email = users.get_by_email("alice@example.com").await.unwrap().unwrap();
        assert_eq!(by_email.id, created.id);
        assert_eq!(by_email.password, "$2b$04$hash");
        assert!(users.get_by_username("bob").await.unwrap().is_none());
        assert_eq!(users.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_soft_delete_keeps_row() {
        let db = Database::in_memory().await.unwrap();
        let users = db.users();
        let created = users.create(alice()).await.unwrap();

        assert!(users.soft_delete(created.id).await.unwrap());
        let user = users.get_by_id(created.id).await.unwrap().unwrap();
        assert!(user.is_deleted);
        assert!(!user.active);
    }

    #[tokio::test]
    async fn test_refresh_token_lifecycle() {
        let db = Database::in_memory().await.unwrap();
        let users = db.users();
        let user = users.create(alice()).await.unwrap();

        let id = users
            .create_refresh_token(user.id, "abc123", &expires_in(60))
            .await
            .unwrap();
        users
            .create_refresh_token(user.id, "stale", &expires_in(-60))
            .await
            .unwrap();

        assert_eq!(users.cleanup_expired_refresh_tokens().await.unwrap(), 1);
        let record = users.get_refresh_token_by_hash("abc123").await.unwrap().unwrap();
        assert_eq!(record.id, id);
        assert!(users.delete_refresh_token(id).await.unwrap());
        assert!(users.get_refresh_token_by_hash("abc123").await.unwrap().is_none());
    }
}
