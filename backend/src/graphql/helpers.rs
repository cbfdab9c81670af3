// Helper functions shared across GraphQL query/mutation modules.

use crate::db::Database;
use crate::error::{ApiError, ApiResult};
use crate::orm::{self, Changes, DatabaseEntity, FilterSet, Paginated, PaginationRequest};

/// One page of `E` through the generic query path
pub(crate) async fn list_records<E: DatabaseEntity>(
    db: &Database,
    relations: &[&str],
    filters: &FilterSet,
    pagination: Option<&PaginationRequest>,
) -> ApiResult<Paginated<E>> {
    Ok(orm::paginate::<E>(db.pool(), relations, filters, pagination).await?)
}

/// Load `E` by id or fail with `NOT_FOUND`
pub(crate) async fn fetch_record<E: DatabaseEntity>(
    db: &Database,
    id: i64,
    relations: &[&str],
) -> ApiResult<E> {
    orm::find_one::<E>(db.pool(), id, relations)
        .await?
        .ok_or_else(|| ApiError::not_found(E::schema().name))
}

/// Reject a reference to a row that does not exist
pub(crate) async fn ensure_reference<E: DatabaseEntity>(
    db: &Database,
    field: &str,
    id: Option<i64>,
) -> ApiResult<()> {
    if let Some(id) = id {
        if !orm::exists::<E>(db.pool(), id).await? {
            return Err(ApiError::BadRequest(format!(
                "Provided {} doesn't exist",
                field
            )));
        }
    }
    Ok(())
}

/// Insert a row and return its id. Callers validate their input first.
pub(crate) async fn insert_record<E: DatabaseEntity>(db: &Database, changes: Changes) -> ApiResult<i64> {
    let id = orm::insert::<E>(db.pool(), changes).await?;
    tracing::info!(entity = E::schema().name, id, "Record created");
    Ok(id)
}

/// Write `changes` to row `id`, failing with `NOT_FOUND` when it is missing
pub(crate) async fn update_record<E: DatabaseEntity>(
    db: &Database,
    id: i64,
    changes: Changes,
) -> ApiResult<()> {
    if !orm::update::<E>(db.pool(), id, changes).await? {
        return Err(ApiError::not_found(E::schema().name));
    }
    tracing::info!(entity = E::schema().name, id, "Record updated");
    Ok(())
}

pub(crate) async fn delete_record<E: DatabaseEntity>(db: &Database, id: i64) -> ApiResult<bool> {
    if !orm::delete::<E>(db.pool(), id).await? {
        return Err(ApiError::not_found(E::schema().name));
    }
    tracing::info!(entity = E::schema().name, id, "Record deleted");
    Ok(true)
}
