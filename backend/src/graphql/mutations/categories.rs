use super::prelude::*;

#[derive(Default)]
pub struct CategoryMutations;

#[Object]
impl CategoryMutations {
    #[graphql(guard = "RoleGuard::new(UserRole::Admin)")]
    async fn create_category(
        &self,
        ctx: &Context<'_>,
        params: CategoryCreateInput,
    ) -> Result<Category> {
        let db = ctx.data_unchecked::<Database>();
        ensure_valid(&params)?;
        let id = insert_record::<Category>(db, params.changes()).await?;
        Ok(fetch_record::<Category>(db, id, CATEGORY_RELATIONS).await?)
    }

    #[graphql(guard = "RoleGuard::new(UserRole::Admin)")]
    async fn update_category(
        &self,
        ctx: &Context<'_>,
        id: i64,
        params: CategoryUpdateInput,
    ) -> Result<Category> {
        let db = ctx.data_unchecked::<Database>();
        ensure_valid(&params)?;
        update_record::<Category>(db, id, params.changes()).await?;
        Ok(fetch_record::<Category>(db, id, CATEGORY_RELATIONS).await?)
    }

    /// Delete a category; its route links go with it
    #[graphql(guard = "RoleGuard::new(UserRole::Admin)")]
    async fn delete_category(&self, ctx: &Context<'_>, id: i64) -> Result<bool> {
        let db = ctx.data_unchecked::<Database>();
        Ok(delete_record::<Category>(db, id).await?)
    }
}
