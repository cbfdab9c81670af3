use super::prelude::*;

#[derive(Default)]
pub struct ReviewMutations;

#[Object]
impl ReviewMutations {
    /// Review a route as the logged-in user
    #[graphql(guard = "AuthGuard")]
    async fn create_review(&self, ctx: &Context<'_>, params: ReviewCreateInput) -> Result<Review> {
        let auth = ctx.auth_user()?;
        let db = ctx.data_unchecked::<Database>();
        ensure_valid(&params)?;

        let author = db.users().get_by_id(auth.id).await.map_err(ApiError::from)?;
        if author.is_none_or(|user| user.is_deleted) {
            return Err(ApiError::BadRequest("User doesn't exist".into()).into());
        }
        ensure_reference::<Route>(db, "route_id", Some(params.route_id)).await?;

        let id = insert_record::<Review>(db, params.changes().set("user_id", auth.id)).await?;
        Ok(fetch_record::<Review>(db, id, REVIEW_RELATIONS).await?)
    }

    /// Edit a review; allowed for its author and admins
    #[graphql(guard = "AuthGuard")]
    async fn update_review(
        &self,
        ctx: &Context<'_>,
        id: i64,
        params: ReviewUpdateInput,
    ) -> Result<Review> {
        let db = ctx.data_unchecked::<Database>();
        let review = fetch_record::<Review>(db, id, &[]).await?;
        ctx.require_owner_or_admin(review.user_id)?;
        ensure_valid(&params)?;

        update_record::<Review>(db, id, params.changes()).await?;
        Ok(fetch_record::<Review>(db, id, REVIEW_RELATIONS).await?)
    }

    #[graphql(guard = "AuthGuard")]
    async fn delete_review(&self, ctx: &Context<'_>, id: i64) -> Result<bool> {
        let db = ctx.data_unchecked::<Database>();
        let review = fetch_record::<Review>(db, id, &[]).await?;
        ctx.require_owner_or_admin(review.user_id)?;
        Ok(delete_record::<Review>(db, id).await?)
    }
}
