use async_graphql::SimpleObject;
use serde::{Deserialize, Serialize};

use super::{CREATED_AT, Day, Route, UPDATED_AT};
use crate::orm::{ColumnDef, ColumnType, DatabaseEntity, EntitySchema, RelationDef, RelationKind};

pub const TEHNICAL_INFO_RELATIONS: &[&str] = &["route", "day"];

/// Elevation and effort figures attached to either a route or a single day.
#[derive(Debug, Clone, SimpleObject, Serialize, Deserialize)]
pub struct TehnicalInfo {
    pub id: i64,
    pub elevation_min: Option<i64>,
    pub elevation_max: Option<i64>,
    pub length: Option<i64>,
    pub duration: Option<i64>,
    #[serde(default)]
    pub route: Option<Box<Route>>,
    #[serde(default)]
    pub day: Option<Box<Day>>,
    pub created_at: String,
    pub updated_at: String,
}

static COLUMNS: &[ColumnDef] = &[
    ColumnDef::primary_key("id"),
    ColumnDef::new("elevation_min", ColumnType::Integer).nullable(),
    ColumnDef::new("elevation_max", ColumnType::Integer).nullable(),
    ColumnDef::new("length", ColumnType::Integer).nullable(),
    ColumnDef::new("duration", ColumnType::Integer).nullable(),
    CREATED_AT,
    UPDATED_AT,
];

static RELATIONS: &[RelationDef] = &[
    RelationDef {
        name: "route",
        target: <Route as DatabaseEntity>::schema,
        kind: RelationKind::HasOne { foreign_key: "tehnical_info_id" },
    },
    RelationDef {
        name: "day",
        target: <Day as DatabaseEntity>::schema,
        kind: RelationKind::HasOne { foreign_key: "tehnical_info_id" },
    },
];

static SCHEMA: EntitySchema = EntitySchema {
    name: "TehnicalInfo",
    table: "tehnical_info",
    alias: "tehnical_info",
    primary_key: "id",
    columns: COLUMNS,
    relations: RELATIONS,
    timestamps: true,
};

impl DatabaseEntity for TehnicalInfo {
    fn schema() -> &'static EntitySchema {
        &SCHEMA
    }
}
