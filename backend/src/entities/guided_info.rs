use async_graphql::SimpleObject;
use serde::{Deserialize, Serialize};

use super::{CREATED_AT, Route, UPDATED_AT};
use crate::orm::{ColumnDef, ColumnType, DatabaseEntity, EntitySchema, RelationDef, RelationKind};

pub const GUIDED_INFO_RELATIONS: &[&str] = &["route"];

/// What a guided route includes.
#[derive(Debug, Clone, SimpleObject, Serialize, Deserialize)]
pub struct GuidedInfo {
    pub id: i64,
    pub age_min: Option<i64>,
    pub age_max: Option<i64>,
    pub people_min: Option<i64>,
    pub people_max: Option<i64>,
    pub starts_from: Option<String>,
    pub accommodation: Option<String>,
    pub meals: Option<String>,
    pub transfer: Option<String>,
    pub equipment: Option<String>,
    pub insurance: Option<String>,
    pub discount: Option<String>,
    pub cancelation_policy: Option<String>,
    pub not_include: Option<String>,
    pub additional_charge: Option<String>,
    pub availability_from: Option<String>,
    pub availability_to: Option<String>,
    #[serde(default)]
    pub route: Option<Box<Route>>,
    pub created_at: String,
    pub updated_at: String,
}

static COLUMNS: &[ColumnDef] = &[
    ColumnDef::primary_key("id"),
    ColumnDef::new("age_min", ColumnType::Integer).nullable(),
    ColumnDef::new("age_max", ColumnType::Integer).nullable(),
    ColumnDef::new("people_min", ColumnType::Integer).nullable(),
    ColumnDef::new("people_max", ColumnType::Integer).nullable(),
    ColumnDef::new("starts_from", ColumnType::Text).nullable(),
    ColumnDef::new("accommodation", ColumnType::Text).nullable(),
    ColumnDef::new("meals", ColumnType::Text).nullable(),
    ColumnDef::new("transfer", ColumnType::Text).nullable(),
    ColumnDef::new("equipment", ColumnType::Text).nullable(),
    ColumnDef::new("insurance", ColumnType::Text).nullable(),
    ColumnDef::new("discount", ColumnType::Text).nullable(),
    ColumnDef::new("cancelation_policy", ColumnType::Text).nullable(),
    ColumnDef::new("not_include", ColumnType::Text).nullable(),
    ColumnDef::new("additional_charge", ColumnType::Text).nullable(),
    ColumnDef::new("availability_from", ColumnType::Text).nullable(),
    ColumnDef::new("availability_to", ColumnType::Text).nullable(),
    CREATED_AT,
    UPDATED_AT,
];

static RELATIONS: &[RelationDef] = &[RelationDef {
    name: "route",
    target: <Route as DatabaseEntity>::schema,
    kind: RelationKind::HasOne { foreign_key: "guided_info_id" },
}];

static SCHEMA: EntitySchema = EntitySchema {
    name: "GuidedInfo",
    table: "guided_info",
    alias: "guided_info",
    primary_key: "id",
    columns: COLUMNS,
    relations: RELATIONS,
    timestamps: true,
};

impl DatabaseEntity for GuidedInfo {
    fn schema() -> &'static EntitySchema {
        &SCHEMA
    }
}
