use super::prelude::*;

#[derive(Default)]
pub struct CategoryQueries;

#[Object]
impl CategoryQueries {
    async fn categories(
        &self,
        ctx: &Context<'_>,
        filters: Option<CategoryFilterInput>,
        pagination: Option<PaginationRequest>,
    ) -> Result<CategoryPage> {
        let db = ctx.data_unchecked::<Database>();
        let page = list_records::<Category>(
            db,
            CATEGORY_RELATIONS,
            &filter_set(filters.as_ref()),
            pagination.as_ref(),
        )
        .await?;
        Ok(page.into())
    }

    /// A single category with its routes
    async fn category(&self, ctx: &Context<'_>, id: i64) -> Result<Category> {
        let db = ctx.data_unchecked::<Database>();
        Ok(fetch_record::<Category>(db, id, CATEGORY_DETAIL_RELATIONS).await?)
    }
}
