use super::prelude::*;

#[derive(Default)]
pub struct ReviewQueries;

#[Object]
impl ReviewQueries {
    async fn reviews(
        &self,
        ctx: &Context<'_>,
        filters: Option<ReviewFilterInput>,
        pagination: Option<PaginationRequest>,
    ) -> Result<ReviewPage> {
        let db = ctx.data_unchecked::<Database>();
        let page = list_records::<Review>(
            db,
            REVIEW_RELATIONS,
            &filter_set(filters.as_ref()),
            pagination.as_ref(),
        )
        .await?;
        Ok(page.into())
    }

    async fn review(&self, ctx: &Context<'_>, id: i64) -> Result<Review> {
        let db = ctx.data_unchecked::<Database>();
        Ok(fetch_record::<Review>(db, id, REVIEW_RELATIONS).await?)
    }
}
