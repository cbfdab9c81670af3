//! GraphQL schema definition
//!
//! Reads are public unless a resolver's guard says otherwise; every write
//! needs a logged-in caller and most need an admin.

use async_graphql::{EmptySubscription, MergedObject, Schema};

use crate::db::Database;
use crate::services::AuthService;

use super::mutations::*;
use super::queries::*;

/// The GraphQL schema type
pub type TourbookSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

#[derive(MergedObject, Default)]
pub struct QueryRoot(
    RouteQueries,
    LocationQueries,
    CategoryQueries,
    ClientQueries,
    EventQueries,
    DayQueries,
    TehnicalInfoQueries,
    GuidedInfoQueries,
    PriceQueries,
    ReviewQueries,
    UserQueries,
);

#[derive(MergedObject, Default)]
pub struct MutationRoot(
    AuthMutations,
    RouteMutations,
    LocationMutations,
    CategoryMutations,
    ClientMutations,
    EventMutations,
    DayMutations,
    TehnicalInfoMutations,
    GuidedInfoMutations,
    PriceMutations,
    ReviewMutations,
    UserMutations,
);

/// Build the GraphQL schema with all resolvers
pub fn build_schema(db: Database, auth_service: AuthService) -> TourbookSchema {
    Schema::build(QueryRoot::default(), MutationRoot::default(), EmptySubscription)
        .data(db)
        .data(auth_service)
        .finish()
}
