use async_graphql::{Enum, SimpleObject};
use serde::{Deserialize, Serialize};

use super::{CREATED_AT, Review, UPDATED_AT};
use crate::orm::{ColumnDef, ColumnType, DatabaseEntity, EntitySchema, RelationDef, RelationKind};

pub const USER_RELATIONS: &[&str] = &[];

/// Access level, stored as an integer (1 admin, 2 standard).
#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum UserRole {
    Admin,
    Standard,
}

impl UserRole {
    pub fn as_i64(self) -> i64 {
        match self {
            UserRole::Admin => 1,
            UserRole::Standard => 2,
        }
    }
}

impl From<UserRole> for i64 {
    fn from(role: UserRole) -> Self {
        role.as_i64()
    }
}

impl TryFrom<i64> for UserRole {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(UserRole::Admin),
            2 => Ok(UserRole::Standard),
            other => Err(format!("invalid user role {}", other)),
        }
    }
}

#[derive(Debug, Clone, SimpleObject, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    /// bcrypt hash, never exposed
    #[graphql(skip)]
    #[serde(skip_serializing, default)]
    pub password: String,
    pub role: UserRole,
    pub active: bool,
    pub is_deleted: bool,
    #[serde(default)]
    pub reviews: Vec<Review>,
    pub created_at: String,
    pub updated_at: String,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

static COLUMNS: &[ColumnDef] = &[
    ColumnDef::primary_key("id"),
    ColumnDef::new("username", ColumnType::Text).unique(),
    ColumnDef::new("email", ColumnType::Text).unique(),
    ColumnDef::new("password", ColumnType::Text),
    ColumnDef::new("role", ColumnType::Integer).with_default("2"),
    ColumnDef::new("active", ColumnType::Boolean).with_default("0"),
    ColumnDef::new("is_deleted", ColumnType::Boolean).with_default("0"),
    CREATED_AT,
    UPDATED_AT,
];

static RELATIONS: &[RelationDef] = &[RelationDef {
    name: "reviews",
    target: <Review as DatabaseEntity>::schema,
    kind: RelationKind::HasMany { foreign_key: "user_id" },
}];

static SCHEMA: EntitySchema = EntitySchema {
    name: "User",
    table: "users",
    alias: "user",
    primary_key: "id",
    columns: COLUMNS,
    relations: RELATIONS,
    timestamps: true,
};

impl DatabaseEntity for User {
    fn schema() -> &'static EntitySchema {
        &SCHEMA
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trips_through_integer() {
        assert_eq!(UserRole::try_from(1), Ok(UserRole::Admin));
        assert_eq!(i64::from(UserRole::Standard), 2);
        assert!(UserRole::try_from(7).is_err());
    }

    #[test]
    fn test_password_is_not_serialized() {
        let user: User = serde_json::from_value(serde_json::json!({
            "id": 1,
            "username": "alice",
            "email": "alice@example.com",
            "password": "$2b$12$hash",
            "role": 1,
            "active": true,
            "is_deleted": false,
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z"
        }))
        .unwrap();
        assert!(user.is_admin());
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password").is_none());
    }
}
