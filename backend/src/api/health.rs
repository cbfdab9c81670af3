//! Liveness and readiness checks for the tourbook service

use axum::http::StatusCode;
use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::AppState;
use crate::entities::all_schemas;

#[derive(Serialize)]
pub struct LiveResponse {
    pub service: &'static str,
    pub version: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadyResponse {
    pub ready: bool,
    pub database: bool,
    /// Entity tables the schema sync has not created
    pub missing_tables: Vec<&'static str>,
}

async fn healthz() -> Json<LiveResponse> {
    Json(LiveResponse {
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Entity tables absent from `sqlite_master`
async fn missing_tables(pool: &SqlitePool) -> Result<Vec<&'static str>, sqlx::Error> {
    let existing: Vec<String> =
        sqlx::query_scalar("SELECT name FROM sqlite_master WHERE type = 'table'")
            .fetch_all(pool)
            .await?;

    Ok(all_schemas()
        .into_iter()
        .map(|schema| schema.table)
        .filter(|table| !existing.iter().any(|name| name == table))
        .collect())
}

/// 200 once the database answers and every entity table exists, 503 otherwise
async fn readyz(State(state): State<AppState>) -> (StatusCode, Json<ReadyResponse>) {
    let response = match missing_tables(state.db.pool()).await {
        Ok(missing) => ReadyResponse {
            ready: missing.is_empty(),
            database: true,
            missing_tables: missing,
        },
        Err(e) => {
            tracing::warn!(error = %e, "Database unreachable");
            ReadyResponse {
                ready: false,
                database: false,
                missing_tables: Vec::new(),
            }
        }
    };

    if !response.missing_tables.is_empty() {
        tracing::warn!(tables = ?response.missing_tables, "Schema incomplete");
    }

    let status = if response.ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(response))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    use crate::db::Database;

    #[tokio::test]
    async fn test_synced_database_has_every_table() {
        let db = Database::in_memory().await.unwrap();
        assert_eq!(missing_tables(db.pool()).await.unwrap(), Vec::<&str>::new());
    }

    #[tokio::test]
    async fn test_dropped_table_is_reported() {
        let db = Database::in_memory().await.unwrap();
        sqlx::query("DROP TABLE reviews")
            .execute(db.pool())
            .await
            .unwrap();
        assert_eq!(missing_tables(db.pool()).await.unwrap(), vec!["reviews"]);
    }
}
