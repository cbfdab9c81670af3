use super::prelude::*;
use crate::db::TehnicalInfoOwner;

#[derive(Default)]
pub struct TehnicalInfoMutations;

/// Validate the input and resolve the single route or day it names
async fn owner_of(db: &Database, params: &TehnicalInfoInput) -> Result<TehnicalInfoOwner> {
    ensure_valid(params)?;
    let owner = match (params.route_id, params.day_id) {
        (Some(route_id), None) => {
            ensure_reference::<Route>(db, "route_id", Some(route_id)).await?;
            TehnicalInfoOwner::Route(route_id)
        }
        (None, Some(day_id)) => {
            ensure_reference::<Day>(db, "day_id", Some(day_id)).await?;
            TehnicalInfoOwner::Day(day_id)
        }
        _ => {
            return Err(ApiError::BadRequest(
                "Invalid tehnical info input. day_id or route_id must be specified".into(),
            )
            .into());
        }
    };
    Ok(owner)
}

#[Object]
impl TehnicalInfoMutations {
    /// Create technical details for exactly one route or day
    #[graphql(guard = "AuthGuard")]
    async fn create_tehnical_info(
        &self,
        ctx: &Context<'_>,
        params: TehnicalInfoInput,
    ) -> Result<TehnicalInfo> {
        let db = ctx.data_unchecked::<Database>();
        let owner = owner_of(db, &params).await?;

        let id = insert_record::<TehnicalInfo>(db, params.changes()).await?;
        db.tehnical_info()
            .attach(id, owner)
            .await
            .map_err(ApiError::from)?;
        Ok(fetch_record::<TehnicalInfo>(db, id, TEHNICAL_INFO_RELATIONS).await?)
    }

    #[graphql(guard = "RoleGuard::new(UserRole::Admin)")]
    async fn update_tehnical_info(
        &self,
        ctx: &Context<'_>,
        id: i64,
        params: TehnicalInfoInput,
    ) -> Result<TehnicalInfo> {
        let db = ctx.data_unchecked::<Database>();
        let owner = owner_of(db, &params).await?;

        update_record::<TehnicalInfo>(db, id, params.changes()).await?;
        db.tehnical_info()
            .attach(id, owner)
            .await
            .map_err(ApiError::from)?;
        Ok(fetch_record::<TehnicalInfo>(db, id, TEHNICAL_INFO_RELATIONS).await?)
    }

    #[graphql(guard = "RoleGuard::new(UserRole::Admin)")]
    async fn delete_tehnical_info(&self, ctx: &Context<'_>, id: i64) -> Result<bool> {
        let db = ctx.data_unchecked::<Database>();
        Ok(delete_record::<TehnicalInfo>(db, id).await?)
    }
}
