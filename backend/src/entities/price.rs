use async_graphql::SimpleObject;
use serde::{Deserialize, Serialize};

use super::{CREATED_AT, Event, Route, UPDATED_AT};
use crate::orm::{ColumnDef, ColumnType, DatabaseEntity, EntitySchema, RelationDef, RelationKind};

pub const PRICE_RELATIONS: &[&str] = &["route", "event"];

/// A price band for a route or an event.
#[derive(Debug, Clone, SimpleObject, Serialize, Deserialize)]
pub struct Price {
    pub id: i64,
    pub amount: f64,
    pub valid_from: Option<String>,
    pub valid_to: Option<String>,
    pub people_min: Option<i64>,
    pub people_max: i64,
    pub route_id: Option<i64>,
    pub event_id: Option<i64>,
    #[serde(default)]
    pub route: Option<Box<Route>>,
    #[serde(default)]
    pub event: Option<Box<Event>>,
    pub created_at: String,
    pub updated_at: String,
}

static COLUMNS: &[ColumnDef] = &[
    ColumnDef::primary_key("id"),
    ColumnDef::new("amount", ColumnType::Real),
    ColumnDef::new("valid_from", ColumnType::Text).nullable(),
    ColumnDef::new("valid_to", ColumnType::Text).nullable(),
    ColumnDef::new("people_min", ColumnType::Integer).nullable(),
    ColumnDef::new("people_max", ColumnType::Integer),
    ColumnDef::new("route_id", ColumnType::Integer).nullable(),
    ColumnDef::new("event_id", ColumnType::Integer).nullable(),
    CREATED_AT,
    UPDATED_AT,
];

static RELATIONS: &[RelationDef] = &[
    RelationDef {
        name: "route",
        target: <Route as DatabaseEntity>::schema,
        kind: RelationKind::BelongsTo { foreign_key: "route_id" },
    },
    RelationDef {
        name: "event",
        target: <Event as DatabaseEntity>::schema,
        kind: RelationKind::BelongsTo { foreign_key: "event_id" },
    },
];

static SCHEMA: EntitySchema = EntitySchema {
    name: "Price",
    table: "prices",
    alias: "price",
    primary_key: "id",
    columns: COLUMNS,
    relations: RELATIONS,
    timestamps: true,
};

impl DatabaseEntity for Price {
    fn schema() -> &'static EntitySchema {
        &SCHEMA
    }
}
