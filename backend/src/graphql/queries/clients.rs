use super::prelude::*;

#[derive(Default)]
pub struct ClientQueries;

#[Object]
impl ClientQueries {
    async fn clients(
        &self,
        ctx: &Context<'_>,
        filters: Option<ClientFilterInput>,
        pagination: Option<PaginationRequest>,
    ) -> Result<ClientPage> {
        let db = ctx.data_unchecked::<Database>();
        let page = list_records::<Client>(
            db,
            CLIENT_RELATIONS,
            &filter_set(filters.as_ref()),
            pagination.as_ref(),
        )
        .await?;
        Ok(page.into())
    }

    async fn client(&self, ctx: &Context<'_>, id: i64) -> Result<Client> {
        let db = ctx.data_unchecked::<Database>();
        Ok(fetch_record::<Client>(db, id, CLIENT_DETAIL_RELATIONS).await?)
    }
}
