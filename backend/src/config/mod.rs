//! Application configuration management

use std::env;

use anyhow::{Context, Result};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngCore;

const DEFAULT_ACCESS_TOKEN_LIFETIME: i64 = 60 * 60;
const DEFAULT_REFRESH_TOKEN_LIFETIME: i64 = 7 * 24 * 60 * 60;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// SQLite database URL (e.g. sqlite:./data/tourbook.db)
    pub database_url: String,

    pub database_max_connections: u32,

    /// HS256 signing secret for access tokens
    pub jwt_secret: String,

    /// Access token lifetime in seconds
    pub access_token_lifetime: i64,

    /// Refresh token lifetime in seconds
    pub refresh_token_lifetime: i64,

    pub bcrypt_cost: u32,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let jwt_secret = match lookup("JWT_SECRET") {
            Some(secret) if !secret.is_empty() => secret,
            _ => {
                tracing::warn!(
                    "JWT_SECRET is not set, using a random secret; tokens will not survive a restart"
                );
                generate_secret()
            }
        };

        Ok(Self {
            port: parse_or(&lookup, "PORT", 3000)?,

            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| "sqlite:./data/tourbook.db".to_string()),

            database_max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 10)?,

            jwt_secret,

            access_token_lifetime: parse_or(
                &lookup,
                "ACCESS_TOKEN_LIFETIME",
                DEFAULT_ACCESS_TOKEN_LIFETIME,
            )?,

            refresh_token_lifetime: parse_or(
                &lookup,
                "REFRESH_TOKEN_LIFETIME",
                DEFAULT_REFRESH_TOKEN_LIFETIME,
            )?,

            bcrypt_cost: parse_or(&lookup, "BCRYPT_COST", bcrypt::DEFAULT_COST)?,
        })
    }

    /// Configuration for tests: fixed secret, in-memory database, cheap hashing
    pub fn for_tests() -> Self {
        Self {
            port: 0,
            database_url: "sqlite::memory:".to_string(),
            database_max_connections: 1,
            jwt_secret: "test-secret".to_string(),
            access_token_lifetime: DEFAULT_ACCESS_TOKEN_LIFETIME,
            refresh_token_lifetime: DEFAULT_REFRESH_TOKEN_LIFETIME,
            bcrypt_cost: 4,
        }
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .with_context(|| format!("Invalid {}", key)),
        None => Ok(default),
    }
}

/// 32 random bytes, base64 encoded
fn generate_secret() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[("JWT_SECRET", "s3cret")])).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.database_url, "sqlite:./data/tourbook.db");
        assert_eq!(config.database_max_connections, 10);
        assert_eq!(config.jwt_secret, "s3cret");
        assert_eq!(config.access_token_lifetime, 3600);
        assert_eq!(config.refresh_token_lifetime, 604_800);
        assert_eq!(config.bcrypt_cost, 12);
    }

    #[test]
    fn test_overrides_and_bad_values() {
        let config = Config::from_lookup(lookup_from(&[("PORT", "8080"), ("BCRYPT_COST", "6")]))
            .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.bcrypt_cost, 6);

        let err = Config::from_lookup(lookup_from(&[("PORT", "eighty")])).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_missing_secret_is_generated() {
        let a = Config::from_lookup(lookup_from(&[])).unwrap();
        let b = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(a.jwt_secret.len(), 43);
        assert_ne!(a.jwt_secret, b.jwt_secret);
    }
}
