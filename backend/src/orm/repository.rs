//! Generic entity access shared by GraphQL resolvers and REST handlers
//!
//! ```rust,ignore
//! let page = paginate::<Route>(&pool, ROUTE_RELATIONS, &filters, pagination.as_ref()).await?;
//! let route = find_one::<Route>(&pool, id, ROUTE_DETAIL_RELATIONS).await?;
//! ```

use sqlx::SqlitePool;
use sqlx::sqlite::SqliteQueryResult;

use super::builder::EntityQuery;
use super::error::QueryError;
use super::filters::FilterSet;
use super::pagination::{Paginated, PaginationRequest, to_meta, to_offset_limit};
use super::traits::{DatabaseEntity, EntitySchema, RelationKind, SqlValue, quote_ident};
use crate::db::sqlite_helpers::now_iso8601;

// ============================================================================
// Reads
// ============================================================================

/// Load one page of `E` with `relations` joined and `filters` applied.
///
/// An absent request pages with the defaults (first page of ten).
pub async fn paginate<E: DatabaseEntity>(
    pool: &SqlitePool,
    relations: &[&str],
    filters: &FilterSet,
    pagination: Option<&PaginationRequest>,
) -> Result<Paginated<E>, QueryError> {
    let (data, total) = EntityQuery::<E>::new()
        .add_relations(relations)?
        .add_filters(filters, relations)?
        .add_pagination(&to_offset_limit(pagination))
        .fetch_many_and_count(pool)
        .await?;

    Ok(Paginated {
        data,
        pagination: to_meta(pagination, total),
    })
}

/// Load a single `E` by id with `relations` hydrated.
pub async fn find_one<E: DatabaseEntity>(
    pool: &SqlitePool,
    id: i64,
    relations: &[&str],
) -> Result<Option<E>, QueryError> {
    EntityQuery::<E>::new()
        .add_relations(relations)?
        .where_id(id)
        .fetch_one(pool)
        .await
}

// ============================================================================
// Writes
// ============================================================================

/// Column values for an insert or update, in the order they were set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Changes {
    values: Vec<(&'static str, SqlValue)>,
}

impl Changes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, column: &'static str, value: impl Into<SqlValue>) -> Self {
        let value = value.into();
        match self.values.iter_mut().find(|(c, _)| *c == column) {
            Some(entry) => entry.1 = value,
            None => self.values.push((column, value)),
        }
        self
    }

    /// Set only when present; `None` leaves the column untouched.
    pub fn set_opt<V: Into<SqlValue>>(self, column: &'static str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.set(column, value),
            None => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn check(&self, schema: &EntitySchema) -> Result<(), QueryError> {
        for (column, _) in &self.values {
            if schema.column(column).is_none() || *column == schema.primary_key {
                return Err(QueryError::UnknownField {
                    entity: schema.name,
                    field: column.to_string(),
                });
            }
        }
        Ok(())
    }
}

async fn execute(
    pool: &SqlitePool,
    sql: &str,
    values: &[SqlValue],
) -> Result<SqliteQueryResult, QueryError> {
    tracing::debug!(sql = %sql, "Executing write");
    let mut query = sqlx::query(sql);
    for value in values {
        query = value.bind_to_query(query);
    }
    Ok(query.execute(pool).await?)
}

/// Insert a row for `E` and return its id.
pub async fn insert<E: DatabaseEntity>(
    pool: &SqlitePool,
    changes: Changes,
) -> Result<i64, QueryError> {
    let schema = E::schema();
    changes.check(schema)?;

    let mut changes = changes;
    if schema.timestamps {
        let now = now_iso8601();
        changes = changes
            .set("created_at", now.clone())
            .set("updated_at", now);
    }

    let (columns, values): (Vec<_>, Vec<_>) = changes.values.into_iter().unzip();
    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quote_ident(schema.table),
        columns
            .iter()
            .map(|c| quote_ident(c))
            .collect::<Vec<_>>()
            .join(", "),
        vec!["?"; columns.len()].join(", ")
    );

    let result = execute(pool, &sql, &values).await?;
    Ok(result.last_insert_rowid())
}

/// Update the row of `E` with `id`. Returns false when no such row exists.
pub async fn update<E: DatabaseEntity>(
    pool: &SqlitePool,
    id: i64,
    changes: Changes,
) -> Result<bool, QueryError> {
    let schema = E::schema();
    changes.check(schema)?;

    let mut changes = changes;
    if schema.timestamps {
        changes = changes.set("updated_at", now_iso8601());
    }
    if changes.is_empty() {
        return exists::<E>(pool, id).await;
    }

    let (columns, mut values): (Vec<_>, Vec<_>) = changes.values.into_iter().unzip();
    let assignments: Vec<String> = columns
        .iter()
        .map(|c| format!("{} = ?", quote_ident(c)))
        .collect();
    let sql = format!(
        "UPDATE {} SET {} WHERE {} = ?",
        quote_ident(schema.table),
        assignments.join(", "),
        quote_ident(schema.primary_key)
    );
    values.push(SqlValue::Int(id));

    let result = execute(pool, &sql, &values).await?;
    Ok(result.rows_affected() > 0)
}

/// Delete the row of `E` with `id` along with its many-to-many links.
pub async fn delete<E: DatabaseEntity>(pool: &SqlitePool, id: i64) -> Result<bool, QueryError> {
    let schema = E::schema();
    let mut tx = pool.begin().await?;

    for relation in schema.relations {
        if let RelationKind::ManyToMany {
            join_table,
            owner_key,
            ..
        } = relation.kind
        {
            let sql = format!(
                "DELETE FROM {} WHERE {} = ?",
                quote_ident(join_table),
                quote_ident(owner_key)
            );
            sqlx::query(&sql).bind(id).execute(&mut *tx).await?;
        }
    }

    let sql = format!(
        "DELETE FROM {} WHERE {} = ?",
        quote_ident(schema.table),
        quote_ident(schema.primary_key)
    );
    let result = sqlx::query(&sql).bind(id).execute(&mut *tx).await?;
    tx.commit().await?;

    Ok(result.rows_affected() > 0)
}

/// Replace every link of a many-to-many `relation` of `E` row `id` with `target_ids`.
pub async fn replace_links<E: DatabaseEntity>(
    pool: &SqlitePool,
    id: i64,
    relation: &str,
    target_ids: &[i64],
) -> Result<(), QueryError> {
    let schema = E::schema();
    let unknown = || QueryError::UnknownRelation {
        entity: schema.name,
        relation: relation.to_string(),
    };
    let Some(RelationKind::ManyToMany {
        join_table,
        owner_key,
        target_key,
    }) = schema.relation(relation).map(|r| r.kind)
    else {
        return Err(unknown());
    };

    let mut tx = pool.begin().await?;
    let clear = format!(
        "DELETE FROM {} WHERE {} = ?",
        quote_ident(join_table),
        quote_ident(owner_key)
    );
    sqlx::query(&clear).bind(id).execute(&mut *tx).await?;

    let link = format!(
        "INSERT OR IGNORE INTO {} ({}, {}) VALUES (?, ?)",
        quote_ident(join_table),
        quote_ident(owner_key),
        quote_ident(target_key)
    );
    for target in target_ids {
        sqlx::query(&link)
            .bind(id)
            .bind(*target)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;

    Ok(())
}

/// Whether a row of `E` with `id` exists.
pub async fn exists<E: DatabaseEntity>(pool: &SqlitePool, id: i64) -> Result<bool, QueryError> {
    let schema = E::schema();
    let sql = format!(
        "SELECT COUNT(*) FROM {} WHERE {} = ?",
        quote_ident(schema.table),
        quote_ident(schema.primary_key)
    );
    let count: i64 = sqlx::query_scalar(&sql).bind(id).fetch_one(pool).await?;
    Ok(count > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;

    use crate::db::Database;
    use crate::entities::{Category, Day, Location, ROUTE_RELATIONS, Route, TehnicalInfo};

    async fn seed_location(pool: &SqlitePool, title: &str) -> i64 {
        insert::<Location>(
            pool,
            Changes::new()
                .set("title", title)
                .set("description", "A long enough description of the place"),
        )
        .await
        .unwrap()
    }

    async fn seed_route(pool: &SqlitePool, title: &str, location_id: i64) -> i64 {
        insert::<Route>(
            pool,
            Changes::new()
                .set("title", title)
                .set("description", "Short description")
                .set("details", "Details that are at least twenty characters")
                .set("location_id", location_id),
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_paginate_counts_roots_not_joined_rows() {
        let db = Database::in_memory().await.unwrap();
        let pool = db.pool();
        let location = seed_location(pool, "Dolomites").await;

        for i in 0..12 {
            let route = seed_route(pool, &format!("Route {i:02}"), location).await;
            // Two days per route would double the rows if LIMIT applied to joined rows
            for d in 0..2 {
                insert::<Day>(
                    pool,
                    Changes::new()
                        .set("title", format!("Day {i}-{d}"))
                        .set("text", "Walking along the ridge all day long")
                        .set("route_id", route),
                )
                .await
                .unwrap();
            }
        }

        let filters = FilterSet::new().with("location", location);
        let request = PaginationRequest { number: 2, size: 5 };
        let page = paginate::<Route>(pool, ROUTE_RELATIONS, &filters, Some(&request))
            .await
            .unwrap();

        assert_eq!(page.data.len(), 5);
        assert_eq!(page.pagination.total, 12);
        assert_eq!(page.pagination.next_page, Some(3));
        assert_eq!(page.pagination.previous_page, Some(1));
        assert_eq!(page.pagination.total_pages, 3);
        assert!(page.data.iter().all(|r| r.days.len() == 2));
        assert_eq!(page.data[0].title, "Route 05");
        assert_eq!(
            page.data[0].location.as_ref().map(|l| l.title.as_str()),
            Some("Dolomites")
        );
    }

    #[tokio::test]
    async fn test_nested_relation_hydrates_inside_parent() {
        let db = Database::in_memory().await.unwrap();
        let pool = db.pool();
        let location = seed_location(pool, "Julian Alps").await;
        let route = seed_route(pool, "Triglav", location).await;
        let info = insert::<TehnicalInfo>(pool, Changes::new().set("elevation_max", 2864))
            .await
            .unwrap();
        insert::<Day>(
            pool,
            Changes::new()
                .set("title", "Summit day")
                .set("text", "From the hut to the summit and back")
                .set("route_id", route)
                .set("tehnical_info_id", info),
        )
        .await
        .unwrap();

        let found = find_one::<Route>(pool, route, &["days.tehnical_info", "tehnical_info"])
            .await
            .unwrap()
            .unwrap();

        assert_eq!(found.days.len(), 1);
        let day_info = found.days[0].tehnical_info.as_ref().unwrap();
        assert_eq!(day_info.elevation_max, Some(2864));
        assert!(found.tehnical_info.is_none());
    }

    #[tokio::test]
    async fn test_many_to_many_links_replace_and_load() {
        let db = Database::in_memory().await.unwrap();
        let pool = db.pool();
        let location = seed_location(pool, "Tatras").await;
        let route = seed_route(pool, "Rysy", location).await;
        let hiking = insert::<Category>(pool, Changes::new().set("title", "Hiking"))
            .await
            .unwrap();
        let climbing = insert::<Category>(pool, Changes::new().set("title", "Climbing"))
            .await
            .unwrap();

        replace_links::<Route>(pool, route, "categories", &[hiking, climbing])
            .await
            .unwrap();
        replace_links::<Route>(pool, route, "categories", &[climbing])
            .await
            .unwrap();

        let found = find_one::<Route>(pool, route, &["categories"])
            .await
            .unwrap()
            .unwrap();
        let titles: Vec<&str> = found.categories.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Climbing"]);

        let category = find_one::<Category>(pool, climbing, &["routes"])
            .await
            .unwrap()
            .unwrap();
        assert_eq!(category.routes.len(), 1);
    }

    #[tokio::test]
    async fn test_replace_links_rejects_non_link_relation() {
        let db = Database::in_memory().await.unwrap();
        let result = replace_links::<Route>(db.pool(), 1, "days", &[1]).await;
        assert_matches!(result, Err(QueryError::UnknownRelation { .. }));
    }

    #[tokio::test]
    async fn test_update_and_delete_report_missing_rows() {
        let db = Database::in_memory().await.unwrap();
        let pool = db.pool();
        let location = seed_location(pool, "Pirin").await;

        let updated = update::<Location>(pool, location, Changes::new().set("title", "Pirin Mountains"))
            .await
            .unwrap();
        assert!(updated);
        assert!(!update::<Location>(pool, 999, Changes::new().set("title", "Nowhere"))
            .await
            .unwrap());

        assert!(delete::<Location>(pool, location).await.unwrap());
        assert!(!delete::<Location>(pool, location).await.unwrap());
        assert!(!exists::<Location>(pool, location).await.unwrap());
    }

    #[tokio::test]
    async fn test_unique_violation_is_detected() {
        let db = Database::in_memory().await.unwrap();
        let pool = db.pool();
        seed_location(pool, "Rila").await;

        let result = insert::<Location>(
            pool,
            Changes::new()
                .set("title", "Rila")
                .set("description", "Another description that is long"),
        )
        .await;
        assert!(result.unwrap_err().is_unique_violation());
    }

    #[tokio::test]
    async fn test_unknown_column_is_rejected_before_sql() {
        let db = Database::in_memory().await.unwrap();
        let result = insert::<Location>(db.pool(), Changes::new().set("colour", "red")).await;
        assert_matches!(result, Err(QueryError::UnknownField { field, .. }) if field == "colour");
    }

    #[tokio::test]
    async fn test_empty_filter_result_has_no_pages() {
        let db = Database::in_memory().await.unwrap();
        let page = paginate::<Route>(db.pool(), ROUTE_RELATIONS, &FilterSet::new(), None)
            .await
            .unwrap();
        assert!(page.data.is_empty());
        assert_eq!(page.pagination.total, 0);
        assert_eq!(page.pagination.total_pages, 0);
        assert_eq!(page.pagination.per_page, 10);
    }
}
