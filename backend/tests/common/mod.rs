//! Shared setup for the integration tests

#![allow(dead_code)]

use tourbook::AppState;
use tourbook::config::Config;
use tourbook::db::Database;
use tourbook::services::RegisterInput;

/// Fresh app state on a private in-memory database
pub async fn test_state() -> AppState {
    let db = Database::in_memory().await.expect("in-memory database");
    AppState::new(Config::for_tests(), db)
}

/// Register a user and return its access token. The first user registered on
/// a database becomes the admin.
pub async fn register(state: &AppState, username: &str) -> String {
    let result = state
        .auth
        .register(RegisterInput {
            username: username.to_string(),
            email: format!("{}@example.com", username),
            password: "correct horse".to_string(),
        })
        .await
        .expect("registration succeeds");
    result.tokens.access_token
}
