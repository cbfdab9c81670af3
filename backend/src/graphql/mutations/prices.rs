use super::prelude::*;

#[derive(Default)]
pub struct PriceMutations;

#[Object]
impl PriceMutations {
    #[graphql(guard = "RoleGuard::new(UserRole::Admin)")]
    async fn create_price(&self, ctx: &Context<'_>, params: PriceCreateInput) -> Result<Price> {
        let db = ctx.data_unchecked::<Database>();
        ensure_valid(&params)?;
        ensure_reference::<Route>(db, "route_id", params.route_id).await?;
        ensure_reference::<Event>(db, "event_id", params.event_id).await?;
        let id = insert_record::<Price>(db, params.changes()).await?;
        Ok(fetch_record::<Price>(db, id, PRICE_RELATIONS).await?)
    }

    #[graphql(guard = "RoleGuard::new(UserRole::Admin)")]
    async fn update_price(
        &self,
        ctx: &Context<'_>,
        id: i64,
        params: PriceUpdateInput,
    ) -> Result<Price> {
        let db = ctx.data_unchecked::<Database>();
        ensure_valid(&params)?;
        let current = fetch_record::<Price>(db, id, &[]).await?;

        // The group-size rule spans stored and incoming values
        let people_min = params.people_min.or(current.people_min);
        let people_max = params.people_max.unwrap_or(current.people_max);
        if people_min.is_some_and(|min| people_max <= min) {
            return Err(ApiError::Validation(vec![crate::validation::FieldError::new(
                "people_max",
                "people_max must be higher than people_min",
            )])
            .into());
        }

        update_record::<Price>(db, id, params.changes()).await?;
        Ok(fetch_record::<Price>(db, id, PRICE_RELATIONS).await?)
    }

    #[graphql(guard = "RoleGuard::new(UserRole::Admin)")]
    async fn delete_price(&self, ctx: &Context<'_>, id: i64) -> Result<bool> {
        let db = ctx.data_unchecked::<Database>();
        Ok(delete_record::<Price>(db, id).await?)
    }
}
