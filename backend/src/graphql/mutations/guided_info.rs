use super::prelude::*;

#[derive(Default)]
pub struct GuidedInfoMutations;

#[Object]
impl GuidedInfoMutations {
    /// Create guided tour details and attach them to `params.routeId`
    #[graphql(guard = "RoleGuard::new(UserRole::Admin)")]
    async fn create_guided_info(
        &self,
        ctx: &Context<'_>,
        params: GuidedInfoInput,
    ) -> Result<GuidedInfo> {
        let db = ctx.data_unchecked::<Database>();
        let Some(route_id) = params.route_id else {
            return Err(ApiError::Validation(vec![crate::validation::FieldError::new(
                "route_id",
                "route_id is required",
            )])
            .into());
        };
        ensure_valid(&params)?;
        ensure_reference::<Route>(db, "route_id", Some(route_id)).await?;

        let id = insert_record::<GuidedInfo>(db, params.changes()).await?;
        db.routes()
            .attach_guided_info(route_id, id)
            .await
            .map_err(ApiError::from)?;
        Ok(fetch_record::<GuidedInfo>(db, id, GUIDED_INFO_RELATIONS).await?)
    }

    #[graphql(guard = "RoleGuard::new(UserRole::Admin)")]
    async fn update_guided_info(
        &self,
        ctx: &Context<'_>,
        id: i64,
        params: GuidedInfoInput,
    ) -> Result<GuidedInfo> {
        let db = ctx.data_unchecked::<Database>();
        ensure_valid(&params)?;
        ensure_reference::<Route>(db, "route_id", params.route_id).await?;

        update_record::<GuidedInfo>(db, id, params.changes()).await?;
        if let Some(route_id) = params.route_id {
            db.routes()
                .attach_guided_info(route_id, id)
                .await
                .map_err(ApiError::from)?;
        }
        Ok(fetch_record::<GuidedInfo>(db, id, GUIDED_INFO_RELATIONS).await?)
    }

    #[graphql(guard = "RoleGuard::new(UserRole::Admin)")]
    async fn delete_guided_info(&self, ctx: &Context<'_>, id: i64) -> Result<bool> {
        let db = ctx.data_unchecked::<Database>();
        Ok(delete_record::<GuidedInfo>(db, id).await?)
    }
}
