//! GraphQL output types that are not entities themselves

use async_graphql::SimpleObject;
use tourbook_macros::paginated_response;

use crate::entities::{
    Category, Client, Day, Event, GuidedInfo, Location, Price, Review, Route, TehnicalInfo, User,
};
use crate::services::LoginResult;

// ============================================================================
// Page envelopes
// ============================================================================

paginated_response!(RoutePage, Route);
paginated_response!(LocationPage, Location);
paginated_response!(CategoryPage, Category);
paginated_response!(ClientPage, Client);
paginated_response!(EventPage, Event);
paginated_response!(DayPage, Day);
paginated_response!(TehnicalInfoPage, TehnicalInfo);
paginated_response!(GuidedInfoPage, GuidedInfo);
paginated_response!(PricePage, Price);
paginated_response!(ReviewPage, Review);
paginated_response!(UserPage, User);

// ============================================================================
// Auth
// ============================================================================

/// Result of register, login and token refresh
#[derive(Debug, Clone, SimpleObject)]
pub struct AuthResponse {
    pub user: User,
    /// Short-lived access token (JWT)
    pub token: String,
    /// Opaque token to exchange for a new pair
    pub refresh_token: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
}

impl From<LoginResult> for AuthResponse {
    fn from(result: LoginResult) -> Self {
        Self {
            user: result.user,
            token: result.tokens.access_token,
            refresh_token: result.tokens.refresh_token,
            expires_in: result.tokens.expires_in,
        }
    }
}
