//! Schema synchronization from entity descriptors
//!
//! - Creates missing entity tables from their [`EntitySchema`]
//! - Adds missing columns to existing tables
//! - Creates link and token tables that have no entity of their own
//!
//! Column renames and type changes are not handled.

use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use crate::entities::all_schemas;
use crate::orm::{ColumnDef, EntitySchema, quote_ident};

/// Result of a schema sync operation
#[derive(Debug, Default)]
pub struct SchemaSyncResult {
    pub tables_created: Vec<String>,
    pub columns_added: Vec<(String, String)>, // (table, column)
    pub errors: Vec<String>,
}

impl SchemaSyncResult {
    fn merge(&mut self, other: SchemaSyncResult) {
        self.tables_created.extend(other.tables_created);
        self.columns_added.extend(other.columns_added);
        self.errors.extend(other.errors);
    }
}

/// Check if a table exists in the database
async fn table_exists(pool: &SqlitePool, table_name: &str) -> Result<bool, sqlx::Error> {
    let result: Option<(String,)> =
        sqlx::query_as("SELECT name FROM sqlite_master WHERE type='table' AND name = ?")
            .bind(table_name)
            .fetch_optional(pool)
            .await?;

    Ok(result.is_some())
}

/// Get existing columns for a table
async fn get_table_columns(
    pool: &SqlitePool,
    table_name: &str,
) -> Result<Vec<String>, sqlx::Error> {
    let rows: Vec<(i32, String, String, i32, Option<String>, i32)> =
        sqlx::query_as(&format!("PRAGMA table_info({})", quote_ident(table_name)))
            .fetch_all(pool)
            .await?;

    Ok(rows.into_iter().map(|(_, name, _, _, _, _)| name).collect())
}

/// Sync a single entity's table to the database
pub async fn sync_entity(
    pool: &SqlitePool,
    schema: &EntitySchema,
) -> Result<SchemaSyncResult, sqlx::Error> {
    let mut result = SchemaSyncResult::default();
    let table_name = schema.table;

    if !table_exists(pool, table_name).await? {
        let create_sql = schema.create_table_sql();
        debug!("Creating table {}: {}", table_name, create_sql);

        match sqlx::query(&create_sql).execute(pool).await {
            Ok(_) => {
                info!("Created table: {}", table_name);
                result.tables_created.push(table_name.to_string());
            }
            Err(e) => {
                let msg = format!("Failed to create table {}: {}", table_name, e);
                warn!("{}", msg);
                result.errors.push(msg);
            }
        }
        return Ok(result);
    }

    let existing_columns = get_table_columns(pool, table_name).await?;
    for col_def in schema.columns {
        if existing_columns.iter().any(|c| c == col_def.name) {
            continue;
        }

        let alter_sql = generate_add_column_sql(table_name, col_def);
        debug!("Adding column to {}: {}", table_name, alter_sql);

        match sqlx::query(&alter_sql).execute(pool).await {
            Ok(_) => {
                info!("Added column {}.{}", table_name, col_def.name);
                result
                    .columns_added
                    .push((table_name.to_string(), col_def.name.to_string()));
            }
            Err(e) => {
                let msg = format!("Failed to add column {}.{}: {}", table_name, col_def.name, e);
                warn!("{}", msg);
                result.errors.push(msg);
            }
        }
    }

    Ok(result)
}

/// Generate ALTER TABLE ADD COLUMN SQL
///
/// SQLite cannot add PRIMARY KEY or UNIQUE columns, nor NOT NULL columns
/// without a default, so those constraints are relaxed here.
fn generate_add_column_sql(table_name: &str, col: &ColumnDef) -> String {
    let mut sql = format!(
        "ALTER TABLE {} ADD COLUMN {} {}",
        quote_ident(table_name),
        quote_ident(col.name),
        col.column_type.sql_type()
    );

    if let Some(default) = col.default {
        sql.push_str(&format!(" DEFAULT {}", default));
    } else if !col.nullable {
        let default_val = match col.column_type.sql_type() {
            "TEXT" => "''",
            "REAL" => "0.0",
            _ => "0",
        };
        sql.push_str(&format!(" NOT NULL DEFAULT {}", default_val));
    }

    sql
}

/// Tables that are not entities: the route/category link table and refresh tokens.
async fn run_static_migrations(pool: &SqlitePool) -> SchemaSyncResult {
    const STATIC_TABLES: &[(&str, &str)] = &[
        (
            "category_route",
            r#"CREATE TABLE IF NOT EXISTS "category_route" (
                "route_id" INTEGER NOT NULL,
                "category_id" INTEGER NOT NULL,
                PRIMARY KEY ("route_id", "category_id")
            )"#,
        ),
        (
            "user_tokens",
            r#"CREATE TABLE IF NOT EXISTS "user_tokens" (
                "id" INTEGER PRIMARY KEY AUTOINCREMENT,
                "user_id" INTEGER NOT NULL,
                "token_hash" TEXT NOT NULL UNIQUE,
                "expires_at" TEXT NOT NULL,
                "created_at" TEXT NOT NULL
            )"#,
        ),
    ];

    let mut result = SchemaSyncResult::default();
    for (table, sql) in STATIC_TABLES {
        let existed = table_exists(pool, table).await.unwrap_or(false);
        if let Err(e) = sqlx::query(sql).execute(pool).await {
            let msg = format!("Failed to run static migration ({}): {}", table, e);
            warn!("{}", msg);
            result.errors.push(msg);
        } else if !existed {
            result.tables_created.push(table.to_string());
        }
    }
    result
}

/// Sync all entity tables to the database.
///
/// Called at startup so every table and column exists before serving.
pub async fn sync_all_entity_schemas(pool: &SqlitePool) -> SchemaSyncResult {
    let mut total_result = SchemaSyncResult::default();

    for schema in all_schemas() {
        match sync_entity(pool, schema).await {
            Ok(result) => total_result.merge(result),
            Err(e) => total_result
                .errors
                .push(format!("Error syncing {}: {}", schema.name, e)),
        }
    }

    total_result.merge(run_static_migrations(pool).await);
    total_result
}
