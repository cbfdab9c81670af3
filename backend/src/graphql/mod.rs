//! GraphQL API
//!
//! Each domain defines its resolvers in `queries/` and `mutations/` as a
//! `#[derive(Default)]` struct with an `#[Object]` impl; `schema.rs` merges
//! them into the query and mutation roots with `#[derive(MergedObject)]`.
//!
//! ```rust,ignore
//! // queries/routes.rs
//! #[derive(Default)]
//! pub struct RouteQueries;
//!
//! #[Object]
//! impl RouteQueries {
//!     async fn routes(&self, ctx: &Context<'_>, ...) -> Result<RoutePage> { ... }
//! }
//! ```

pub mod auth;
pub mod filters;
mod helpers;
pub mod inputs;
pub mod mutations;
pub mod queries;
mod schema;
pub mod types;

pub use auth::{AuthGuard, AuthExt, RoleGuard};
pub use schema::{MutationRoot, QueryRoot, TourbookSchema, build_schema};
