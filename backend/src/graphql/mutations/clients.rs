use super::prelude::*;

#[derive(Default)]
pub struct ClientMutations;

#[Object]
impl ClientMutations {
    #[graphql(guard = "RoleGuard::new(UserRole::Admin)")]
    async fn create_client(&self, ctx: &Context<'_>, params: ClientCreateInput) -> Result<Client> {
        let db = ctx.data_unchecked::<Database>();
        ensure_valid(&params)?;
        let id = insert_record::<Client>(db, params.changes()).await?;
        Ok(fetch_record::<Client>(db, id, CLIENT_RELATIONS).await?)
    }

    #[graphql(guard = "RoleGuard::new(UserRole::Admin)")]
    async fn update_client(
        &self,
        ctx: &Context<'_>,
        id: i64,
        params: ClientUpdateInput,
    ) -> Result<Client> {
        let db = ctx.data_unchecked::<Database>();
        ensure_valid(&params)?;
        update_record::<Client>(db, id, params.changes()).await?;
        Ok(fetch_record::<Client>(db, id, CLIENT_RELATIONS).await?)
    }

    #[graphql(guard = "RoleGuard::new(UserRole::Admin)")]
    async fn delete_client(&self, ctx: &Context<'_>, id: i64) -> Result<bool> {
        let db = ctx.data_unchecked::<Database>();
        Ok(delete_record::<Client>(db, id).await?)
    }
}
