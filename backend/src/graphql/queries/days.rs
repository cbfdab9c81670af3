use super::prelude::*;

#[derive(Default)]
pub struct DayQueries;

#[Object]
impl DayQueries {
    async fn days(
        &self,
        ctx: &Context<'_>,
        filters: Option<DayFilterInput>,
        pagination: Option<PaginationRequest>,
    ) -> Result<DayPage> {
        let db = ctx.data_unchecked::<Database>();
        let page = list_records::<Day>(
            db,
            DAY_RELATIONS,
            &filter_set(filters.as_ref()),
            pagination.as_ref(),
        )
        .await?;
        Ok(page.into())
    }

    async fn day(&self, ctx: &Context<'_>, id: i64) -> Result<Day> {
        let db = ctx.data_unchecked::<Database>();
        Ok(fetch_record::<Day>(db, id, DAY_RELATIONS).await?)
    }
}
