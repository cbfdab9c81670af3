use async_graphql::SimpleObject;
use serde::{Deserialize, Serialize};

use super::{CREATED_AT, Route, UPDATED_AT, User};
use crate::orm::{ColumnDef, ColumnType, DatabaseEntity, EntitySchema, RelationDef, RelationKind};

pub const REVIEW_RELATIONS: &[&str] = &["user", "route"];

#[derive(Debug, Clone, SimpleObject, Serialize, Deserialize)]
pub struct Review {
    pub id: i64,
    pub title: String,
    pub text: Option<String>,
    pub rate: i64,
    pub user_id: Option<i64>,
    pub route_id: Option<i64>,
    #[serde(default)]
    pub user: Option<Box<User>>,
    #[serde(default)]
    pub route: Option<Box<Route>>,
    pub created_at: String,
    pub updated_at: String,
}

static COLUMNS: &[ColumnDef] = &[
    ColumnDef::primary_key("id"),
    ColumnDef::new("title", ColumnType::Text).unique(),
    ColumnDef::new("text", ColumnType::Text).nullable(),
    ColumnDef::new("rate", ColumnType::Integer),
    ColumnDef::new("user_id", ColumnType::Integer).nullable(),
    ColumnDef::new("route_id", ColumnType::Integer).nullable(),
    CREATED_AT,
    UPDATED_AT,
];

static RELATIONS: &[RelationDef] = &[
    RelationDef {
        name: "user",
        target: <User as DatabaseEntity>::schema,
        kind: RelationKind::BelongsTo { foreign_key: "user_id" },
    },
    RelationDef {
        name: "route",
        target: <Route as DatabaseEntity>::schema,
        kind: RelationKind::BelongsTo { foreign_key: "route_id" },
    },
];

static SCHEMA: EntitySchema = EntitySchema {
    name: "Review",
    table: "reviews",
    alias: "review",
    primary_key: "id",
    columns: COLUMNS,
    relations: RELATIONS,
    timestamps: true,
};

impl DatabaseEntity for Review {
    fn schema() -> &'static EntitySchema {
        &SCHEMA
    }
}
