use super::prelude::*;

#[derive(Default)]
pub struct DayMutations;

#[Object]
impl DayMutations {
    #[graphql(guard = "RoleGuard::new(UserRole::Admin)")]
    async fn create_day(&self, ctx: &Context<'_>, params: DayCreateInput) -> Result<Day> {
        let db = ctx.data_unchecked::<Database>();
        ensure_valid(&params)?;
        ensure_reference::<Route>(db, "route_id", Some(params.route_id)).await?;
        let id = insert_record::<Day>(db, params.changes()).await?;
        Ok(fetch_record::<Day>(db, id, DAY_RELATIONS).await?)
    }

    #[graphql(guard = "RoleGuard::new(UserRole::Admin)")]
    async fn update_day(&self, ctx: &Context<'_>, id: i64, params: DayUpdateInput) -> Result<Day> {
        let db = ctx.data_unchecked::<Database>();
        ensure_valid(&params)?;
        ensure_reference::<Route>(db, "route_id", params.route_id).await?;
        update_record::<Day>(db, id, params.changes()).await?;
        Ok(fetch_record::<Day>(db, id, DAY_RELATIONS).await?)
    }

    #[graphql(guard = "RoleGuard::new(UserRole::Admin)")]
    async fn delete_day(&self, ctx: &Context<'_>, id: i64) -> Result<bool> {
        let db = ctx.data_unchecked::<Database>();
        Ok(delete_record::<Day>(db, id).await?)
    }
}
