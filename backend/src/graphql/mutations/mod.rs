pub mod auth;
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

pub use auth::AuthMutations;
pub use categories::CategoryMutations;
pub use clients::ClientMutations;
pub use days::DayMutations;
pub use events::EventMutations;
pub use guided_info::GuidedInfoMutations;
pub use locations::LocationMutations;
pub use prices::PriceMutations;
pub use reviews::ReviewMutations;
pub use routes::RouteMutations;
pub use tehnical_info::TehnicalInfoMutations;
pub use user::UserMutations;

pub(crate) mod prelude {
    pub(crate) use async_graphql::{Context, Object, Result};

    pub(crate) use crate::db::Database;
    pub(crate) use crate::entities::*;
    pub(crate) use crate::error::ApiError;
    pub(crate) use crate::graphql::auth::{AuthExt, AuthGuard, RoleGuard};
    pub(crate) use crate::graphql::helpers::*;
    pub(crate) use crate::graphql::inputs::*;
    pub(crate) use crate::validation::ensure_valid;
}
