//! Schema descriptors for the persistence layer
//!
//! Every entity exposes one static [`EntitySchema`] describing its table,
//! columns and relations. The query builder resolves relation paths and filter
//! fields against these descriptors instead of concatenating strings.

use serde::de::DeserializeOwned;
use sqlx::Sqlite;
use sqlx::query::{Query, QueryScalar};
use sqlx::sqlite::SqliteArguments;

/// Storage class of a column, used both for DDL and for decoding rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Real,
    Text,
    /// Stored as INTEGER 0/1
    Boolean,
}

impl ColumnType {
    pub const fn sql_type(self) -> &'static str {
        match self {
            ColumnType::Integer | ColumnType::Boolean => "INTEGER",
            ColumnType::Real => "REAL",
            ColumnType::Text => "TEXT",
        }
    }
}

/// Column definition for schema generation.
#[derive(Debug, Clone, Copy)]
pub struct ColumnDef {
    /// Column name in the database, also the serde field name on the entity
    pub name: &'static str,
    pub column_type: ColumnType,
    /// Whether the column can be NULL
    pub nullable: bool,
    /// Whether this is the primary key
    pub is_primary_key: bool,
    pub unique: bool,
    /// Default value expression (e.g., "1")
    pub default: Option<&'static str>,
}

impl ColumnDef {
    pub const fn new(name: &'static str, column_type: ColumnType) -> Self {
        Self {
            name,
            column_type,
            nullable: false,
            is_primary_key: false,
            unique: false,
            default: None,
        }
    }

    pub const fn primary_key(name: &'static str) -> Self {
        Self {
            name,
            column_type: ColumnType::Integer,
            nullable: false,
            is_primary_key: true,
            unique: false,
            default: None,
        }
    }

    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub const fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub const fn with_default(mut self, expr: &'static str) -> Self {
        self.default = Some(expr);
        self
    }

    /// Generate the column definition SQL
    pub fn to_sql(&self) -> String {
        let mut sql = format!("{} {}", quote_ident(self.name), self.column_type.sql_type());

        if self.is_primary_key {
            sql.push_str(" PRIMARY KEY AUTOINCREMENT");
        }

        if !self.nullable && !self.is_primary_key {
            sql.push_str(" NOT NULL");
        }

        if self.unique {
            sql.push_str(" UNIQUE");
        }

        if let Some(default) = self.default {
            sql.push_str(&format!(" DEFAULT {}", default));
        }

        sql
    }
}

/// How a relation is stored.
#[derive(Debug, Clone, Copy)]
pub enum RelationKind {
    /// The owning table holds `foreign_key` pointing at the target's id.
    BelongsTo { foreign_key: &'static str },
    /// The target table holds `foreign_key` pointing at the owner's id, at most one row.
    HasOne { foreign_key: &'static str },
    /// The target table holds `foreign_key` pointing at the owner's id.
    HasMany { foreign_key: &'static str },
    /// Rows of `join_table` link `owner_key` to `target_key`.
    ManyToMany {
        join_table: &'static str,
        owner_key: &'static str,
        target_key: &'static str,
    },
}

/// A named association on an entity.
#[derive(Debug, Clone, Copy)]
pub struct RelationDef {
    /// Relation name, also the serde field name the related records hydrate into
    pub name: &'static str,
    pub target: fn() -> &'static EntitySchema,
    pub kind: RelationKind,
}

impl RelationDef {
    pub fn target(&self) -> &'static EntitySchema {
        (self.target)()
    }

    /// Whether the relation hydrates into a list
    pub fn is_many(&self) -> bool {
        matches!(
            self.kind,
            RelationKind::HasMany { .. } | RelationKind::ManyToMany { .. }
        )
    }
}

/// Static description of one entity table.
#[derive(Debug)]
pub struct EntitySchema {
    /// Entity name used in error messages
    pub name: &'static str,
    /// The SQL table name (e.g., "routes")
    pub table: &'static str,
    /// Alias of the root table in generated queries (e.g., "route")
    pub alias: &'static str,
    /// The primary key column name
    pub primary_key: &'static str,
    pub columns: &'static [ColumnDef],
    pub relations: &'static [RelationDef],
    /// Whether the table carries created_at / updated_at stamps
    pub timestamps: bool,
}

impl EntitySchema {
    pub fn column(&self, name: &str) -> Option<&'static ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn relation(&self, name: &str) -> Option<&'static RelationDef> {
        self.relations.iter().find(|r| r.name == name)
    }

    /// Generate CREATE TABLE IF NOT EXISTS SQL
    pub fn create_table_sql(&self) -> String {
        let column_defs: Vec<String> = self.columns.iter().map(|c| c.to_sql()).collect();

        format!(
            "CREATE TABLE IF NOT EXISTS {} (\n  {}\n)",
            quote_ident(self.table),
            column_defs.join(",\n  ")
        )
    }
}

/// An entity that can be loaded through the query builder.
///
/// Records are hydrated as JSON objects keyed by column and relation name and
/// then deserialized, so the serde field names must match the schema.
pub trait DatabaseEntity: DeserializeOwned + Send + Sync + Unpin + 'static {
    fn schema() -> &'static EntitySchema;
}

/// Quote an SQL identifier. Aliases may contain dots ("days.tehnical_info").
pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Represents a SQL value that can be bound to a query.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl SqlValue {
    /// Bind this value to a sqlx query
    pub fn bind_to_query<'q>(
        &'q self,
        query: Query<'q, Sqlite, SqliteArguments<'q>>,
    ) -> Query<'q, Sqlite, SqliteArguments<'q>> {
        match self {
            SqlValue::String(s) => query.bind(s.as_str()),
            SqlValue::Int(i) => query.bind(*i),
            SqlValue::Float(f) => query.bind(*f),
            SqlValue::Bool(b) => query.bind(if *b { 1i32 } else { 0i32 }),
            SqlValue::Null => query.bind(None::<String>),
        }
    }

    /// Bind this value to a sqlx scalar query
    pub fn bind_to_scalar<'q, O: Send + Unpin>(
        &'q self,
        query: QueryScalar<'q, Sqlite, O, SqliteArguments<'q>>,
    ) -> QueryScalar<'q, Sqlite, O, SqliteArguments<'q>> {
        match self {
            SqlValue::String(s) => query.bind(s.as_str()),
            SqlValue::Int(i) => query.bind(*i),
            SqlValue::Float(f) => query.bind(*f),
            SqlValue::Bool(b) => query.bind(if *b { 1i32 } else { 0i32 }),
            SqlValue::Null => query.bind(None::<String>),
        }
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::String(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::String(value.to_string())
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Int(value)
    }
}

impl From<i32> for SqlValue {
    fn from(value: i32) -> Self {
        SqlValue::Int(value.into())
    }
}

impl From<f64> for SqlValue {
    fn from(value: f64) -> Self {
        SqlValue::Float(value)
    }
}

impl From<bool> for SqlValue {
    fn from(value: bool) -> Self {
        SqlValue::Bool(value)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(SqlValue::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static WIDGET_COLUMNS: &[ColumnDef] = &[
        ColumnDef::primary_key("id"),
        ColumnDef::new("title", ColumnType::Text).unique(),
        ColumnDef::new("note", ColumnType::Text).nullable(),
        ColumnDef::new("active", ColumnType::Boolean).with_default("1"),
    ];

    static WIDGET: EntitySchema = EntitySchema {
        name: "Widget",
        table: "widgets",
        alias: "widget",
        primary_key: "id",
        columns: WIDGET_COLUMNS,
        relations: &[],
        timestamps: false,
    };

    #[test]
    fn test_column_sql() {
        assert_eq!(
            WIDGET_COLUMNS[0].to_sql(),
            "\"id\" INTEGER PRIMARY KEY AUTOINCREMENT"
        );
        assert_eq!(WIDGET_COLUMNS[1].to_sql(), "\"title\" TEXT NOT NULL UNIQUE");
        assert_eq!(WIDGET_COLUMNS[2].to_sql(), "\"note\" TEXT");
        assert_eq!(
            WIDGET_COLUMNS[3].to_sql(),
            "\"active\" INTEGER NOT NULL DEFAULT 1"
        );
    }

    #[test]
    fn test_create_table_sql() {
        let sql = WIDGET.create_table_sql();
        assert!(sql.starts_with("CREATE TABLE IF NOT EXISTS \"widgets\" ("));
        assert!(sql.contains("\"title\" TEXT NOT NULL UNIQUE"));
    }

    #[test]
    fn test_quote_ident_keeps_dots() {
        assert_eq!(quote_ident("days.tehnical_info"), "\"days.tehnical_info\"");
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
    }

    #[test]
    fn test_sql_value_from_option() {
        assert_eq!(SqlValue::from(None::<i64>), SqlValue::Null);
        assert_eq!(SqlValue::from(Some("x")), SqlValue::String("x".into()));
    }
}
