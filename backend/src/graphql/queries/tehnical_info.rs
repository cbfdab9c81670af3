use super::prelude::*;

#[derive(Default)]
pub struct TehnicalInfoQueries;

#[Object]
impl TehnicalInfoQueries {
    /// Technical details with the route or day they describe
    async fn tehnical_infos(
        &self,
        ctx: &Context<'_>,
        filters: Option<TehnicalInfoFilterInput>,
        pagination: Option<PaginationRequest>,
    ) -> Result<TehnicalInfoPage> {
        let db = ctx.data_unchecked::<Database>();
        let page = db
            .tehnical_info()
            .search(&filter_set(filters.as_ref()), pagination.as_ref())
            .await
            .map_err(ApiError::from)?;
        Ok(page.into())
    }

    async fn tehnical_info(&self, ctx: &Context<'_>, id: i64) -> Result<TehnicalInfo> {
        let db = ctx.data_unchecked::<Database>();
        Ok(fetch_record::<TehnicalInfo>(db, id, TEHNICAL_INFO_RELATIONS).await?)
    }
}
