use async_graphql::SimpleObject;
use serde::{Deserialize, Serialize};

use super::{CREATED_AT, Route, UPDATED_AT};
use crate::orm::{ColumnDef, ColumnType, DatabaseEntity, EntitySchema, RelationDef, RelationKind};

pub const CLIENT_RELATIONS: &[&str] = &[];
pub const CLIENT_DETAIL_RELATIONS: &[&str] = &["routes"];

/// A tour operator offering routes.
#[derive(Debug, Clone, SimpleObject, Serialize, Deserialize)]
pub struct Client {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub address: String,
    #[serde(default)]
    pub routes: Vec<Route>,
    pub created_at: String,
    pub updated_at: String,
}

static COLUMNS: &[ColumnDef] = &[
    ColumnDef::primary_key("id"),
    ColumnDef::new("name", ColumnType::Text).unique(),
    ColumnDef::new("email", ColumnType::Text).unique(),
    ColumnDef::new("address", ColumnType::Text),
    CREATED_AT,
    UPDATED_AT,
];

static RELATIONS: &[RelationDef] = &[RelationDef {
    name: "routes",
    target: <Route as DatabaseEntity>::schema,
    kind: RelationKind::HasMany { foreign_key: "client_id" },
}];

static SCHEMA: EntitySchema = EntitySchema {
    name: "Client",
    table: "clients",
    alias: "client",
    primary_key: "id",
    columns: COLUMNS,
    relations: RELATIONS,
    timestamps: true,
};

impl DatabaseEntity for Client {
    fn schema() -> &'static EntitySchema {
        &SCHEMA
    }
}
