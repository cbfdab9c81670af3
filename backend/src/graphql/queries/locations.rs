use super::prelude::*;

#[derive(Default)]
pub struct LocationQueries;

#[Object]
impl LocationQueries {
    async fn locations(
        &self,
        ctx: &Context<'_>,
        filters: Option<LocationFilterInput>,
        pagination: Option<PaginationRequest>,
    ) -> Result<LocationPage> {
        let db = ctx.data_unchecked::<Database>();
        let page = list_records::<Location>(
            db,
            LOCATION_RELATIONS,
            &filter_set(filters.as_ref()),
            pagination.as_ref(),
        )
        .await?;
        Ok(page.into())
    }

    /// A single location with its routes
    async fn location(&self, ctx: &Context<'_>, id: i64) -> Result<Location> {
        let db = ctx.data_unchecked::<Database>();
        Ok(fetch_record::<Location>(db, id, LOCATION_DETAIL_RELATIONS).await?)
    }
}
