use super::prelude::*;

#[derive(Default)]
pub struct UserQueries;

#[Object]
impl UserQueries {
    /// Get the current authenticated user
    #[graphql(guard = "AuthGuard")]
    async fn me(&self, ctx: &Context<'_>) -> Result<User> {
        let auth = ctx.auth_user()?;
        let db = ctx.data_unchecked::<Database>();
        Ok(fetch_record::<User>(db, auth.id, USER_RELATIONS).await?)
    }

    /// Users that have not been deleted (admin only)
    #[graphql(guard = "RoleGuard::new(UserRole::Admin)")]
    async fn users(
        &self,
        ctx: &Context<'_>,
        filters: Option<UserFilterInput>,
        pagination: Option<PaginationRequest>,
    ) -> Result<UserPage> {
        let db = ctx.data_unchecked::<Database>();
        let filters = filter_set(filters.as_ref()).with("is_deleted", false);
        let page = list_records::<User>(db, USER_RELATIONS, &filters, pagination.as_ref()).await?;
        Ok(page.into())
    }

    async fn user(&self, ctx: &Context<'_>, id: i64) -> Result<User> {
        let db = ctx.data_unchecked::<Database>();
        let user = fetch_record::<User>(db, id, USER_RELATIONS).await?;
        if user.is_deleted {
            return Err(ApiError::not_found("User").into());
        }
        Ok(user)
    }
}
