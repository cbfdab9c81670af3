use super::prelude::*;

#[derive(Default)]
pub struct UserMutations;

#[Object]
impl UserMutations {
    /// Update a user's profile, role or active flag (admin only)
    #[graphql(guard = "RoleGuard::new(UserRole::Admin)")]
    async fn update_user(
        &self,
        ctx: &Context<'_>,
        id: i64,
        params: UserUpdateInput,
    ) -> Result<User> {
        let db = ctx.data_unchecked::<Database>();
        ensure_valid(&params)?;
        let user = fetch_record::<User>(db, id, USER_RELATIONS).await?;
        if user.is_deleted {
            return Err(ApiError::not_found("User").into());
        }

        update_record::<User>(db, id, params.changes()).await?;
        Ok(fetch_record::<User>(db, id, USER_RELATIONS).await?)
    }

    /// Soft-delete a user and revoke their refresh tokens (admin only)
    #[graphql(guard = "RoleGuard::new(UserRole::Admin)")]
    async fn delete_user(&self, ctx: &Context<'_>, id: i64) -> Result<bool> {
        let db = ctx.data_unchecked::<Database>();
        let users = db.users();
        if !users.soft_delete(id).await.map_err(ApiError::from)? {
            return Err(ApiError::not_found("User").into());
        }
        let revoked = users
            .delete_user_refresh_tokens(id)
            .await
            .map_err(ApiError::from)?;
        tracing::info!(user_id = id, revoked, "User deleted");
        Ok(true)
    }
}
