use super::prelude::*;

#[derive(Default)]
pub struct EventMutations;

#[Object]
impl EventMutations {
    #[graphql(guard = "RoleGuard::new(UserRole::Admin)")]
    async fn create_event(&self, ctx: &Context<'_>, params: EventCreateInput) -> Result<Event> {
        let db = ctx.data_unchecked::<Database>();
        ensure_valid(&params)?;
        ensure_reference::<Category>(db, "category_id", Some(params.category_id)).await?;
        ensure_reference::<Location>(db, "location_id", Some(params.location_id)).await?;
        let id = insert_record::<Event>(db, params.changes()).await?;
        Ok(fetch_record::<Event>(db, id, EVENT_RELATIONS).await?)
    }

    #[graphql(guard = "RoleGuard::new(UserRole::Admin)")]
    async fn update_event(
        &self,
        ctx: &Context<'_>,
        id: i64,
        params: EventUpdateInput,
    ) -> Result<Event> {
        let db = ctx.data_unchecked::<Database>();
        ensure_valid(&params)?;
        ensure_reference::<Category>(db, "category_id", params.category_id).await?;
        ensure_reference::<Location>(db, "location_id", params.location_id).await?;
        update_record::<Event>(db, id, params.changes()).await?;
        Ok(fetch_record::<Event>(db, id, EVENT_RELATIONS).await?)
    }

    #[graphql(guard = "RoleGuard::new(UserRole::Admin)")]
    async fn delete_event(&self, ctx: &Context<'_>, id: i64) -> Result<bool> {
        let db = ctx.data_unchecked::<Database>();
        Ok(delete_record::<Event>(db, id).await?)
    }
}
