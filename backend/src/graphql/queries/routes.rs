use super::prelude::*;

#[derive(Default)]
pub struct RouteQueries;

#[Object]
impl RouteQueries {
    /// Routes with location, categories, client, days and tour details loaded
    async fn routes(
        &self,
        ctx: &Context<'_>,
        filters: Option<RouteFilterInput>,
        pagination: Option<PaginationRequest>,
    ) -> Result<RoutePage> {
        let db = ctx.data_unchecked::<Database>();
        let page = db
            .routes()
            .search(&filter_set(filters.as_ref()), pagination.as_ref())
            .await
            .map_err(ApiError::from)?;
        Ok(page.into())
    }

    /// A single route, including its prices
    async fn route(&self, ctx: &Context<'_>, id: i64) -> Result<Route> {
        let db = ctx.data_unchecked::<Database>();
        Ok(fetch_record::<Route>(db, id, ROUTE_DETAIL_RELATIONS).await?)
    }
}
