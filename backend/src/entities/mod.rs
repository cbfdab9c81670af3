//! Domain entities and their schema descriptors
//!
//! Each entity is a GraphQL object, a JSON record and a table at once. Relation
//! fields are filled only when the query joined them and default to empty.

mod category;
mod client;
mod day;
mod event;
mod guided_info;
mod location;
mod price;
mod review;
mod route;
mod tehnical_info;
mod user;

pub use category::{CATEGORY_DETAIL_RELATIONS, CATEGORY_RELATIONS, Category};
pub use client::{CLIENT_DETAIL_RELATIONS, CLIENT_RELATIONS, Client};
pub use day::{DAY_RELATIONS, Day};
pub use event::{EVENT_RELATIONS, Event};
pub use guided_info::{GUIDED_INFO_RELATIONS, GuidedInfo};
pub use location::{LOCATION_DETAIL_RELATIONS, LOCATION_RELATIONS, Location};
pub use price::{PRICE_RELATIONS, Price};
pub use review::{REVIEW_RELATIONS, Review};
pub use route::{ROUTE_DETAIL_RELATIONS, ROUTE_RELATIONS, Route};
pub use tehnical_info::{TEHNICAL_INFO_RELATIONS, TehnicalInfo};
pub use user::{USER_RELATIONS, User, UserRole};

use crate::orm::{ColumnDef, ColumnType, DatabaseEntity, EntitySchema};

pub(crate) const CREATED_AT: ColumnDef = ColumnDef::new("created_at", ColumnType::Text);
pub(crate) const UPDATED_AT: ColumnDef = ColumnDef::new("updated_at", ColumnType::Text);

/// Every entity table, in creation order.
pub fn all_schemas() -> Vec<&'static EntitySchema> {
    vec![
        Location::schema(),
        Category::schema(),
        Client::schema(),
        TehnicalInfo::schema(),
        GuidedInfo::schema(),
        Route::schema(),
        Day::schema(),
        Event::schema(),
        Price::schema(),
        User::schema(),
        Review::schema(),
    ]
}
