//! Relational query layer
//!
//! Entities describe themselves with an [`EntitySchema`]; [`EntityQuery`]
//! joins relation paths, turns sparse filter sets into predicates and pages
//! the result, and the repository functions wrap it for resolvers.

mod builder;
mod error;
mod filters;
mod hydrate;
mod pagination;
mod repository;
mod traits;

pub use builder::{EntityQuery, FilterMode, Join, Predicate};
pub use error::QueryError;
pub use filters::{FilterScalar, FilterSet, FilterValue, WILDCARD};
pub use pagination::{
    DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, OffsetLimit, Paginated, PaginationMeta,
    PaginationRequest, to_meta, to_offset_limit,
};
pub use repository::{Changes, delete, exists, find_one, insert, paginate, replace_links, update};
pub use traits::{
    ColumnDef, ColumnType, DatabaseEntity, EntitySchema, RelationDef, RelationKind, SqlValue,
    quote_ident,
};
