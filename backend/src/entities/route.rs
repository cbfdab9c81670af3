use async_graphql::SimpleObject;
use serde::{Deserialize, Serialize};

use super::{CREATED_AT, Category, Client, Day, GuidedInfo, Location, Price, Review, TehnicalInfo, UPDATED_AT};
use crate::orm::{ColumnDef, ColumnType, DatabaseEntity, EntitySchema, RelationDef, RelationKind};

/// Relations eager-loaded by route list queries.
pub const ROUTE_RELATIONS: &[&str] = &[
    "location",
    "categories",
    "client",
    "days",
    "days.tehnical_info",
    "tehnical_info",
    "guided_info",
];

/// Relations loaded for a single route.
pub const ROUTE_DETAIL_RELATIONS: &[&str] = &[
    "location",
    "categories",
    "client",
    "days",
    "days.tehnical_info",
    "tehnical_info",
    "guided_info",
    "prices",
];

/// A bookable tour.
#[derive(Debug, Clone, SimpleObject, Serialize, Deserialize)]
pub struct Route {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub details: String,
    pub average_rate: Option<f64>,
    pub fitness_level: Option<i64>,
    pub experience: Option<i64>,
    pub note: Option<String>,
    pub active: bool,
    pub location_id: Option<i64>,
    pub client_id: Option<i64>,
    pub tehnical_info_id: Option<i64>,
    pub guided_info_id: Option<i64>,
    #[serde(default)]
    pub location: Option<Box<Location>>,
    #[serde(default)]
    pub client: Option<Box<Client>>,
    #[serde(default)]
    pub tehnical_info: Option<Box<TehnicalInfo>>,
    #[serde(default)]
    pub guided_info: Option<Box<GuidedInfo>>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub days: Vec<Day>,
    #[serde(default)]
    pub prices: Vec<Price>,
    #[serde(default)]
    pub reviews: Vec<Review>,
    pub created_at: String,
    pub updated_at: String,
}

static COLUMNS: &[ColumnDef] = &[
    ColumnDef::primary_key("id"),
    ColumnDef::new("title", ColumnType::Text).unique(),
    ColumnDef::new("description", ColumnType::Text),
    ColumnDef::new("details", ColumnType::Text),
    ColumnDef::new("average_rate", ColumnType::Real).nullable(),
    ColumnDef::new("fitness_level", ColumnType::Integer).nullable(),
    ColumnDef::new("experience", ColumnType::Integer).nullable(),
    ColumnDef::new("note", ColumnType::Text).nullable(),
    ColumnDef::new("active", ColumnType::Boolean).with_default("1"),
    ColumnDef::new("location_id", ColumnType::Integer).nullable(),
    ColumnDef::new("client_id", ColumnType::Integer).nullable(),
    ColumnDef::new("tehnical_info_id", ColumnType::Integer).nullable(),
    ColumnDef::new("guided_info_id", ColumnType::Integer).nullable(),
    CREATED_AT,
    UPDATED_AT,
];

static RELATIONS: &[RelationDef] = &[
    RelationDef {
        name: "location",
        target: <Location as DatabaseEntity>::schema,
        kind: RelationKind::BelongsTo { foreign_key: "location_id" },
    },
    RelationDef {
        name: "client",
        target: <Client as DatabaseEntity>::schema,
        kind: RelationKind::BelongsTo { foreign_key: "client_id" },
    },
    RelationDef {
        name: "tehnical_info",
        target: <TehnicalInfo as DatabaseEntity>::schema,
        kind: RelationKind::BelongsTo { foreign_key: "tehnical_info_id" },
    },
    RelationDef {
        name: "guided_info",
        target: <GuidedInfo as DatabaseEntity>::schema,
        kind: RelationKind::BelongsTo { foreign_key: "guided_info_id" },
    },
    RelationDef {
        name: "categories",
        target: <Category as DatabaseEntity>::schema,
        kind: RelationKind::ManyToMany {
            join_table: "category_route",
            owner_key: "route_id",
            target_key: "category_id",
        },
    },
    RelationDef {
        name: "days",
        target: <Day as DatabaseEntity>::schema,
        kind: RelationKind::HasMany { foreign_key: "route_id" },
    },
    RelationDef {
        name: "prices",
        target: <Price as DatabaseEntity>::schema,
        kind: RelationKind::HasMany { foreign_key: "route_id" },
    },
    RelationDef {
        name: "reviews",
        target: <Review as DatabaseEntity>::schema,
        kind: RelationKind::HasMany { foreign_key: "route_id" },
    },
];

static SCHEMA: EntitySchema = EntitySchema {
    name: "Route",
    table: "routes",
    alias: "route",
    primary_key: "id",
    columns: COLUMNS,
    relations: RELATIONS,
    timestamps: true,
};

impl DatabaseEntity for Route {
    fn schema() -> &'static EntitySchema {
        &SCHEMA
    }
}
