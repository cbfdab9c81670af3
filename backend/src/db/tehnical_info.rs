//! Technical info search

use sqlx::SqlitePool;

use crate::entities::{TEHNICAL_INFO_RELATIONS, TehnicalInfo};
use crate::orm::{
    EntityQuery, FilterSet, Paginated, PaginationRequest, QueryError, to_meta, to_offset_limit,
};

/// The record a technical info row describes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TehnicalInfoOwner {
    Route(i64),
    Day(i64),
}

impl TehnicalInfoOwner {
    fn table(self) -> &'static str {
        match self {
            TehnicalInfoOwner::Route(_) => "routes",
            TehnicalInfoOwner::Day(_) => "days",
        }
    }

    fn id(self) -> i64 {
        match self {
            TehnicalInfoOwner::Route(id) | TehnicalInfoOwner::Day(id) => id,
        }
    }
}

pub struct TehnicalInfoRepository {
    pool: SqlitePool,
}

impl TehnicalInfoRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Page through technical info records with their owning route or day.
    pub async fn search(
        &self,
        filters: &FilterSet,
        pagination: Option<&PaginationRequest>,
    ) -> Result<Paginated<TehnicalInfo>, QueryError> {
        let (data, total) = EntityQuery::<TehnicalInfo>::new()
            .add_relations(TEHNICAL_INFO_RELATIONS)?
            .add_filters(filters, TEHNICAL_INFO_RELATIONS)?
            .add_pagination(&to_offset_limit(pagination))
            .fetch_many_and_count(&self.pool)
            .await?;

        Ok(Paginated {
            data,
            pagination: to_meta(pagination, total),
        })
    }

    /// Point `owner` at technical info `id`, detaching it from any previous route or day.
    pub async fn attach(&self, id: i64, owner: TehnicalInfoOwner) -> Result<(), QueryError> {
        let mut tx = self.pool.begin().await?;
        for table in ["routes", "days"] {
            let sql = format!("UPDATE {} SET tehnical_info_id = NULL WHERE tehnical_info_id = ?", table);
            sqlx::query(&sql).bind(id).execute(&mut *tx).await?;
        }

        let sql = format!("UPDATE {} SET tehnical_info_id = ? WHERE id = ?", owner.table());
        sqlx::query(&sql)
            .bind(id)
            .bind(owner.id())
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        tracing::debug!(tehnical_info_id = id, owner = ?owner, "Attached technical info");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::db::Database;
    use crate::entities::{Day, Route};
    use crate::orm::{Changes, insert, update};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_search_by_route_resolves_has_one() {
        let db = Database::in_memory().await.unwrap();
        let pool = db.pool();

        let info = insert::<TehnicalInfo>(pool, Changes::new().set("length", 14))
            .await
            .unwrap();
        let route = insert::<Route>(
            pool,
            Changes::new()
                .set("title", "Via Alpina")
                .set("description", "Short description")
                .set("details", "Details that are at least twenty characters"),
        )
        .await
        .unwrap();
        update::<Route>(pool, route, Changes::new().set("tehnical_info_id", info))
            .await
            .unwrap();

        let day_info = insert::<TehnicalInfo>(pool, Changes::new().set("length", 3))
            .await
            .unwrap();
        insert::<Day>(
            pool,
            Changes::new()
                .set("title", "Warm-up day")
                .set("text", "A short walk around the village")
                .set("tehnical_info_id", day_info),
        )
        .await
        .unwrap();

        let filters = FilterSet::new().with("route", route);
        let page = db.tehnical_info().search(&filters, None).await.unwrap();

        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].length, Some(14));
        assert_eq!(page.data[0].route.as_ref().map(|r| r.id), Some(route));
        assert!(page.data[0].day.is_none());
    }

    #[tokio::test]
    async fn test_attach_moves_info_between_owners() {
        let db = Database::in_memory().await.unwrap();
        let pool = db.pool();
        let repo = db.tehnical_info();

        let info = insert::<TehnicalInfo>(pool, Changes::new().set("duration", 6))
            .await
            .unwrap();
        let route = insert::<Route>(
            pool,
            Changes::new()
                .set("title", "Julian Alps loop")
                .set("description", "Short description")
                .set("details", "Details that are at least twenty characters"),
        )
        .await
        .unwrap();
        let day = insert::<Day>(
            pool,
            Changes::new()
                .set("title", "Summit day")
                .set("text", "Up to the ridge and back down again"),
        )
        .await
        .unwrap();

        repo.attach(info, TehnicalInfoOwner::Route(route)).await.unwrap();
        repo.attach(info, TehnicalInfoOwner::Day(day)).await.unwrap();

        let filters = FilterSet::new().with("day", day);
        let page = repo.search(&filters, None).await.unwrap();
        assert_eq!(page.data.len(), 1);
        assert!(page.data[0].route.is_none());
        assert_eq!(page.data[0].day.as_ref().map(|d| d.id), Some(day));
    }
}
