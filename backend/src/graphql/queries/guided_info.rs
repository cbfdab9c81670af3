use super::prelude::*;

#[derive(Default)]
pub struct GuidedInfoQueries;

#[Object]
impl GuidedInfoQueries {
    async fn guided_infos(
        &self,
        ctx: &Context<'_>,
        filters: Option<GuidedInfoFilterInput>,
        pagination: Option<PaginationRequest>,
    ) -> Result<GuidedInfoPage> {
        let db = ctx.data_unchecked::<Database>();
        let page = list_records::<GuidedInfo>(
            db,
            GUIDED_INFO_RELATIONS,
            &filter_set(filters.as_ref()),
            pagination.as_ref(),
        )
        .await?;
        Ok(page.into())
    }

    async fn guided_info(&self, ctx: &Context<'_>, id: i64) -> Result<GuidedInfo> {
        let db = ctx.data_unchecked::<Database>();
        Ok(fetch_record::<GuidedInfo>(db, id, GUIDED_INFO_RELATIONS).await?)
    }
}
