pub mod categories;
pub mod clients;
pub mod days;
pub mod events;
pub mod guided_info;
pub mod locations;
pub mod prices;
pub mod reviews;
pub mod routes;
pub mod tehnical_info;
pub mod user;

pub use categories::CategoryQueries;
pub use clients::ClientQueries;
pub use days::DayQueries;
pub use events::EventQueries;
pub use guided_info::GuidedInfoQueries;
pub use locations::LocationQueries;
pub use prices::PriceQueries;
pub use reviews::ReviewQueries;
pub use routes::RouteQueries;
pub use tehnical_info::TehnicalInfoQueries;
pub use user::UserQueries;

pub(crate) mod prelude {
    pub(crate) use async_graphql::{Context, Object, Result};

    pub(crate) use crate::db::Database;
    pub(crate) use crate::entities::*;
    pub(crate) use crate::error::ApiError;
    pub(crate) use crate::graphql::auth::{AuthExt, AuthGuard, RoleGuard};
    pub(crate) use crate::graphql::filters::*;
    pub(crate) use crate::graphql::helpers::*;
    pub(crate) use crate::graphql::types::*;
    pub(crate) use crate::orm::PaginationRequest;
}
