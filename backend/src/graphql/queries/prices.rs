use super::prelude::*;

#[derive(Default)]
pub struct PriceQueries;

#[Object]
impl PriceQueries {
    /// Prices of one route or one event
    async fn prices(
        &self,
        ctx: &Context<'_>,
        filters: PriceFilterInput,
        pagination: Option<PaginationRequest>,
    ) -> Result<PricePage> {
        if !filters.has_owner() {
            return Err(ApiError::BadRequest("route OR event is mandatory".into()).into());
        }
        let db = ctx.data_unchecked::<Database>();
        let page = list_records::<Price>(
            db,
            PRICE_RELATIONS,
            &filters.to_filter_set(),
            pagination.as_ref(),
        )
        .await?;
        Ok(page.into())
    }

    async fn price(&self, ctx: &Context<'_>, id: i64) -> Result<Price> {
        let db = ctx.data_unchecked::<Database>();
        Ok(fetch_record::<Price>(db, id, PRICE_RELATIONS).await?)
    }
}
