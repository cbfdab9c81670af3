use super::prelude::*;

#[derive(Default)]
pub struct EventQueries;

#[Object]
impl EventQueries {
    /// Events with category, location and prices loaded
    async fn events(
        &self,
        ctx: &Context<'_>,
        filters: Option<EventFilterInput>,
        pagination: Option<PaginationRequest>,
    ) -> Result<EventPage> {
        let db = ctx.data_unchecked::<Database>();
        let page = db
            .events()
            .search(&filter_set(filters.as_ref()), pagination.as_ref())
            .await
            .map_err(ApiError::from)?;
        Ok(page.into())
    }

    async fn event(&self, ctx: &Context<'_>, id: i64) -> Result<Event> {
        let db = ctx.data_unchecked::<Database>();
        Ok(fetch_record::<Event>(db, id, EVENT_RELATIONS).await?)
    }
}
