//! Route search

use sqlx::SqlitePool;

use crate::entities::{ROUTE_RELATIONS, Route};
use crate::orm::{
    EntityQuery, FilterSet, Paginated, PaginationRequest, QueryError, to_meta, to_offset_limit,
};

pub struct RouteRepository {
    pool: SqlitePool,
}

impl RouteRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Page through routes with every list relation loaded.
    pub async fn search(
        &self,
        filters: &FilterSet,
        pagination: Option<&PaginationRequest>,
    ) -> Result<Paginated<Route>, QueryError> {
        let (data, total) = EntityQuery::<Route>::new()
            .add_relations(ROUTE_RELATIONS)?
            .add_filters(filters, ROUTE_RELATIONS)?
            .add_pagination(&to_offset_limit(pagination))
            .fetch_many_and_count(&self.pool)
            .await?;

        Ok(Paginated {
            data,
            pagination: to_meta(pagination, total),
        })
    }

    /// Give `route_id` the guided info `guided_info_id`, taking it away from any other route.
    pub async fn attach_guided_info(
        &self,
        route_id: i64,
        guided_info_id: i64,
    ) -> Result<(), QueryError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("UPDATE routes SET guided_info_id = NULL WHERE guided_info_id = ?")
            .bind(guided_info_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("UPDATE routes SET guided_info_id = ? WHERE id = ?")
            .bind(guided_info_id)
            .bind(route_id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    use crate::db::Database;
    use crate::entities::{GuidedInfo, Location};
    use crate::orm::{Changes, insert};

    #[tokio::test]
    async fn test_search_filters_by_wildcard_title() {
        let db = Database::in_memory().await.unwrap();
        let pool = db.pool();
        let location = insert::<Location>(
            pool,
            Changes::new()
                .set("title", "Olympus")
                .set("description", "Home of the gods, mostly rock"),
        )
        .await
        .unwrap();
        for title in ["Mytikas ridge", "Skolio ridge", "Enipeas gorge"] {
            insert::<Route>(
                pool,
                Changes::new()
                    .set("title", title)
                    .set("description", "Short description")
                    .set("details", "Details that are at least twenty characters")
                    .set("location_id", location),
            )
            .await
            .unwrap();
        }

        let filters = FilterSet::new().with("title", "%ridge");
        let page = db.routes().search(&filters, None).await.unwrap();

        let titles: Vec<&str> = page.data.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Mytikas ridge", "Skolio ridge"]);
        assert_eq!(page.pagination.total, 2);
        assert_eq!(page.pagination.total_pages, 1);
    }

    #[tokio::test]
    async fn test_guided_info_has_a_single_route() {
        let db = Database::in_memory().await.unwrap();
        let pool = db.pool();
        let guided = insert::<GuidedInfo>(pool, Changes::new().set("age_min", 12))
            .await
            .unwrap();
        let mut routes = Vec::new();
        for title in ["Triglav north face", "Triglav lakes"] {
            let id = insert::<Route>(
                pool,
                Changes::new()
                    .set("title", title)
                    .set("description", "Short description")
                    .set("details", "Details that are at least twenty characters"),
            )
            .await
            .unwrap();
            routes.push(id);
        }

        db.routes().attach_guided_info(routes[0], guided).await.unwrap();
        db.routes().attach_guided_info(routes[1], guided).await.unwrap();

        let page = db.routes().search(&FilterSet::new(), None).await.unwrap();
        let owners: Vec<Option<i64>> = page.data.iter().map(|r| r.guided_info_id).collect();
        assert_eq!(owners, vec![None, Some(guided)]);
    }
}
