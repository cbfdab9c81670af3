//! Application services

pub mod auth;

pub use auth::{AuthConfig, AuthService, AuthTokens, AuthUser, LoginResult, RegisterInput};
