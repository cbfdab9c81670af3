use async_graphql::SimpleObject;
use serde::{Deserialize, Serialize};

use super::{CREATED_AT, Event, Route, UPDATED_AT};
use crate::orm::{ColumnDef, ColumnType, DatabaseEntity, EntitySchema, RelationDef, RelationKind};

pub const CATEGORY_RELATIONS: &[&str] = &[];
pub const CATEGORY_DETAIL_RELATIONS: &[&str] = &["routes"];

#[derive(Debug, Clone, SimpleObject, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub title: String,
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
    CREATED_AT,
    UPDATED_AT,
];

static RELATIONS: &[RelationDef] = &[
    RelationDef {
        name: "routes",
        target: <Route as DatabaseEntity>::schema,
        kind: RelationKind::ManyToMany {
            join_table: "category_route",
            owner_key: "category_id",
            target_key: "route_id",
        },
    },
    RelationDef {
        name: "events",
        target: <Event as DatabaseEntity>::schema,
        kind: RelationKind::HasMany { foreign_key: "category_id" },
    },
];

static SCHEMA: EntitySchema = EntitySchema {
    name: "Category",
    table: "categories",
    alias: "category",
    primary_key: "id",
    columns: COLUMNS,
    relations: RELATIONS,
    timestamps: true,
};

impl DatabaseEntity for Category {
    fn schema() -> &'static EntitySchema {
        &SCHEMA
    }
}
