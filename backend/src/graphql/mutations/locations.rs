use super::prelude::*;

#[derive(Default)]
pub struct LocationMutations;

#[Object]
impl LocationMutations {
    #[graphql(guard = "RoleGuard::new(UserRole::Admin)")]
    async fn create_location(
        &self,
        ctx: &Context<'_>,
        params: LocationCreateInput,
    ) -> Result<Location> {
        let db = ctx.data_unchecked::<Database>();
        ensure_valid(&params)?;
        let id = insert_record::<Location>(db, params.changes()).await?;
        Ok(fetch_record::<Location>(db, id, LOCATION_RELATIONS).await?)
    }

    #[graphql(guard = "RoleGuard::new(UserRole::Admin)")]
    async fn update_location(
        &self,
        ctx: &Context<'_>,
        id: i64,
        params: LocationUpdateInput,
    ) -> Result<Location> {
        let db = ctx.data_unchecked::<Database>();
        ensure_valid(&params)?;
        update_record::<Location>(db, id, params.changes()).await?;
        Ok(fetch_record::<Location>(db, id, LOCATION_RELATIONS).await?)
    }

    #[graphql(guard = "RoleGuard::new(UserRole::Admin)")]
    async fn delete_location(&self, ctx: &Context<'_>, id: i64) -> Result<bool> {
        let db = ctx.data_unchecked::<Database>();
        Ok(delete_record::<Location>(db, id).await?)
    }
}
