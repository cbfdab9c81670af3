use async_graphql::SimpleObject;
use serde::{Deserialize, Serialize};

use super::{CREATED_AT, Category, Location, Price, UPDATED_AT};
use crate::orm::{ColumnDef, ColumnType, DatabaseEntity, EntitySchema, RelationDef, RelationKind};

pub const EVENT_RELATIONS: &[&str] = &["category", "location", "prices"];

/// A dated happening, priced separately from routes.
#[derive(Debug, Clone, SimpleObject, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub text: String,
    pub category_id: Option<i64>,
    pub location_id: Option<i64>,
    #[serde(default)]
    pub category: Option<Box<Category>>,
    #[serde(default)]
    pub location: Option<Box<Location>>,
    #[serde(default)]
    pub prices: Vec<Price>,
    pub created_at: String,
    pub updated_at: String,
}

static COLUMNS: &[ColumnDef] = &[
    ColumnDef::primary_key("id"),
    ColumnDef::new("title", ColumnType::Text).unique(),
    ColumnDef::new("text", ColumnType::Text),
    ColumnDef::new("category_id", ColumnType::Integer).nullable(),
    ColumnDef::new("location_id", ColumnType::Integer).nullable(),
    CREATED_AT,
    UPDATED_AT,
];

static RELATIONS: &[RelationDef] = &[
    RelationDef {
        name: "category",
        target: <Category as DatabaseEntity>::schema,
        kind: RelationKind::BelongsTo { foreign_key: "category_id" },
    },
    RelationDef {
        name: "location",
        target: <Location as DatabaseEntity>::schema,
        kind: RelationKind::BelongsTo { foreign_key: "location_id" },
    },
    RelationDef {
        name: "prices",
        target: <Price as DatabaseEntity>::schema,
        kind: RelationKind::HasMany { foreign_key: "event_id" },
    },
];

static SCHEMA: EntitySchema = EntitySchema {
    name: "Event",
    table: "events",
    alias: "event",
    primary_key: "id",
    columns: COLUMNS,
    relations: RELATIONS,
    timestamps: true,
};

impl DatabaseEntity for Event {
    fn schema() -> &'static EntitySchema {
        &SCHEMA
    }
}
