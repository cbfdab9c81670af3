use async_graphql::SimpleObject;
use serde::{Deserialize, Serialize};

use super::{CREATED_AT, Event, Route, UPDATED_AT};
use crate::orm::{ColumnDef, ColumnType, DatabaseEntity, EntitySchema, RelationDef, RelationKind};

pub const LOCATION_RELATIONS: &[&str] = &[];
pub const LOCATION_DETAIL_RELATIONS: &[&str] = &["routes"];

#[derive(Debug, Clone, SimpleObject, Serialize, Deserialize)]
pub struct Location {
    pub id: i64,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub routes: Vec<Route>,
    #[serde(default)]
    pub events: Vec<Event>,
    pub created_at: String,
    pub updated_at: String,
}

static COLUMNS: &[ColumnDef] = &[
    ColumnDef::primary_key("id"),
    ColumnDef::new("title", ColumnType::Text).unique(),
    ColumnDef::new("description", ColumnType::Text),
    CREATED_AT,
    UPDATED_AT,
];

static RELATIONS: &[RelationDef] = &[
    RelationDef {
        name: "routes",
        target: <Route as DatabaseEntity>::schema,
        kind: RelationKind::HasMany { foreign_key: "location_id" },
    },
    RelationDef {
        name: "events",
        target: <Event as DatabaseEntity>::schema,
        kind: RelationKind::HasMany { foreign_key: "location_id" },
    },
];

static SCHEMA: EntitySchema = EntitySchema {
    name: "Location",
    table: "locations",
    alias: "location",
    primary_key: "id",
    columns: COLUMNS,
    relations: RELATIONS,
    timestamps: true,
};

impl DatabaseEntity for Location {
    fn schema() -> &'static EntitySchema {
        &SCHEMA
    }
}
