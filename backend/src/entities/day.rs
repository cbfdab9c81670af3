use async_graphql::SimpleObject;
use serde::{Deserialize, Serialize};

use super::{CREATED_AT, Route, TehnicalInfo, UPDATED_AT};
use crate::orm::{ColumnDef, ColumnType, DatabaseEntity, EntitySchema, RelationDef, RelationKind};

pub const DAY_RELATIONS: &[&str] = &["route", "tehnical_info"];

/// One day of a multi-day route.
#[derive(Debug, Clone, SimpleObject, Serialize, Deserialize)]
pub struct Day {
    pub id: i64,
    pub title: String,
    pub text: String,
    pub route_id: Option<i64>,
    pub tehnical_info_id: Option<i64>,
    #[serde(default)]
    pub route: Option<Box<Route>>,
    #[serde(default)]
    pub tehnical_info: Option<Box<TehnicalInfo>>,
    pub created_at: String,
    pub updated_at: String,
}

static COLUMNS: &[ColumnDef] = &[
    ColumnDef::primary_key("id"),
    ColumnDef::new("title", ColumnType::Text).unique(),
    ColumnDef::new("text", ColumnType::Text),
    ColumnDef::new("route_id", ColumnType::Integer).nullable(),
    ColumnDef::new("tehnical_info_id", ColumnType::Integer).nullable(),
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
        name: "tehnical_info",
        target: <TehnicalInfo as DatabaseEntity>::schema,
        kind: RelationKind::BelongsTo { foreign_key: "tehnical_info_id" },
    },
];

static SCHEMA: EntitySchema = EntitySchema {
    name: "Day",
    table: "days",
    alias: "day",
    primary_key: "id",
    columns: COLUMNS,
    relations: RELATIONS,
    timestamps: true,
};

impl DatabaseEntity for Day {
    fn schema() -> &'static EntitySchema {
        &SCHEMA
    }
}
