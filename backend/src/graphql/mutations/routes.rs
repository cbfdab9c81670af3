use super::prelude::*;
use crate::orm;

#[derive(Default)]
pub struct RouteMutations;

async fn set_category(db: &Database, route_id: i64, category_id: i64) -> Result<()> {
    orm::replace_links::<Route>(db.pool(), route_id, "categories", &[category_id])
        .await
        .map_err(ApiError::from)?;
    Ok(())
}

#[Object]
impl RouteMutations {
    #[graphql(guard = "RoleGuard::new(UserRole::Admin)")]
    async fn create_route(&self, ctx: &Context<'_>, params: RouteCreateInput) -> Result<Route> {
        let db = ctx.data_unchecked::<Database>();
        ensure_valid(&params)?;
        ensure_reference::<Location>(db, "location_id", Some(params.location_id)).await?;
        ensure_reference::<Client>(db, "client_id", params.client_id).await?;
        ensure_reference::<Category>(db, "category_id", params.category_id).await?;

        let id = insert_record::<Route>(db, params.changes()).await?;
        if let Some(category_id) = params.category_id {
            set_category(db, id, category_id).await?;
        }
        Ok(fetch_record::<Route>(db, id, ROUTE_DETAIL_RELATIONS).await?)
    }

    #[graphql(guard = "RoleGuard::new(UserRole::Admin)")]
    async fn update_route(
        &self,
        ctx: &Context<'_>,
        id: i64,
        params: RouteUpdateInput,
    ) -> Result<Route> {
        let db = ctx.data_unchecked::<Database>();
        ensure_valid(&params)?;
        ensure_reference::<Location>(db, "location_id", params.location_id).await?;
        ensure_reference::<Client>(db, "client_id", params.client_id).await?;
        ensure_reference::<Category>(db, "category_id", params.category_id).await?;

        update_record::<Route>(db, id, params.changes()).await?;
        if let Some(category_id) = params.category_id {
            set_category(db, id, category_id).await?;
        }
        Ok(fetch_record::<Route>(db, id, ROUTE_DETAIL_RELATIONS).await?)
    }

    #[graphql(guard = "RoleGuard::new(UserRole::Admin)")]
    async fn delete_route(&self, ctx: &Context<'_>, id: i64) -> Result<bool> {
        let db = ctx.data_unchecked::<Database>();
        Ok(delete_record::<Route>(db, id).await?)
    }
}
