//! Event search

use sqlx::SqlitePool;

use crate::entities::{EVENT_RELATIONS, Event};
use crate::orm::{
    EntityQuery, FilterSet, Paginated, PaginationRequest, QueryError, to_meta, to_offset_limit,
};

pub struct EventRepository {
    pool: SqlitePool,
}

impl EventRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Page through events with category, location and prices loaded.
    pub async fn search(
        &self,
        filters: &FilterSet,
        pagination: Option<&PaginationRequest>,
    ) -> Result<Paginated<Event>, QueryError> {
        let (data, total) = EntityQuery::<Event>::new()
            .add_relations(EVENT_RELATIONS)?
            .add_filters(filters, EVENT_RELATIONS)?
            .add_pagination(&to_offset_limit(pagination))
            .fetch_many_and_count(&self.pool)
            .await?;

        Ok(Paginated {
            data,
            pagination: to_meta(pagination, total),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::db::Database;
    use crate::entities::{Category, Price};
    use crate::orm::{Changes, insert};

    #[tokio::test]
    async fn test_search_by_category_loads_prices() {
        let db = Database::in_memory().await.unwrap();
        let pool = db.pool();
        let festival = insert::<Category>(pool, Changes::new().set("title", "Festival"))
            .await
            .unwrap();
        let other = insert::<Category>(pool, Changes::new().set("title", "Workshop"))
            .await
            .unwrap();

        let event = insert::<Event>(
            pool,
            Changes::new()
                .set("title", "Mountain film night")
                .set("text", "Screening of climbing films in the hall")
                .set("category_id", festival),
        )
        .await
        .unwrap();
        insert::<Event>(
            pool,
            Changes::new()
                .set("title", "Knots for beginners")
                .set("text", "Learn the eight basic knots with a guide")
                .set("category_id", other),
        )
        .await
        .unwrap();
        for amount in [10.0, 15.0] {
            insert::<Price>(
                pool,
                Changes::new()
                    .set("amount", amount)
                    .set("people_max", 20)
                    .set("event_id", event),
            )
            .await
            .unwrap();
        }

        let filters = FilterSet::new().with("category", festival);
        let page = db.events().search(&filters, None).await.unwrap();

        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].prices.len(), 2);
        assert_eq!(
            page.data[0].category.as_ref().map(|c| c.id),
            Some(festival)
        );
    }
}
