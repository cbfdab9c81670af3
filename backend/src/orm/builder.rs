//! Query builder for entity list and detail queries
//!
//! An [`EntityQuery`] is narrowed in three steps that mirror how list
//! resolvers use it:
//!
//! ```rust,ignore
//! let (routes, total) = EntityQuery::<Route>::new()
//!     .add_relations(ROUTE_RELATIONS)?
//!     .add_filters(&filters, ROUTE_RELATIONS)?
//!     .add_pagination(&to_offset_limit(pagination.as_ref()))
//!     .fetch_many_and_count(&pool)
//!     .await?;
//! ```
//!
//! Execution runs in two phases so that LIMIT/OFFSET count root records
//! rather than joined rows: first the page of distinct root ids is selected
//! under the joins and predicates, then the joined rows for exactly those ids
//! are loaded and hydrated into nested records.

use std::marker::PhantomData;

use sqlx::SqlitePool;

use super::error::QueryError;
use super::filters::{FilterScalar, FilterSet, FilterValue};
use super::hydrate::Plan;
use super::pagination::OffsetLimit;
use super::traits::{
    DatabaseEntity, EntitySchema, RelationDef, RelationKind, SqlValue, quote_ident,
};

/// How successive filters combine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FilterMode {
    /// Every filter constrains the result (AND).
    #[default]
    Conjunction,
    /// Each filter replaces the previous one; only the last applied survives.
    ReplaceLast,
}

/// One LEFT JOIN produced by a relation path.
#[derive(Debug, Clone)]
pub struct Join {
    /// Alias of the joined table: the relation name, or the full dotted path
    pub alias: String,
    /// Alias of the table this join hangs off
    pub parent_alias: String,
    parent: &'static EntitySchema,
    pub relation: &'static RelationDef,
}

impl Join {
    pub fn target(&self) -> &'static EntitySchema {
        self.relation.target()
    }

    fn to_sql(&self) -> String {
        let target = self.target();
        let alias = quote_ident(&self.alias);
        let parent = quote_ident(&self.parent_alias);

        match self.relation.kind {
            RelationKind::BelongsTo { foreign_key } => format!(
                "LEFT JOIN {} AS {alias} ON {alias}.{} = {parent}.{}",
                quote_ident(target.table),
                quote_ident(target.primary_key),
                quote_ident(foreign_key),
            ),
            RelationKind::HasOne { foreign_key } | RelationKind::HasMany { foreign_key } => {
                format!(
                    "LEFT JOIN {} AS {alias} ON {alias}.{} = {parent}.{}",
                    quote_ident(target.table),
                    quote_ident(foreign_key),
                    quote_ident(self.parent.primary_key),
                )
            }
            RelationKind::ManyToMany {
                join_table,
                owner_key,
                target_key,
            } => {
                let link = quote_ident(&format!("{}__link", self.alias));
                format!(
                    "LEFT JOIN {} AS {link} ON {link}.{} = {parent}.{} \
                     LEFT JOIN {} AS {alias} ON {alias}.{} = {link}.{}",
                    quote_ident(join_table),
                    quote_ident(owner_key),
                    quote_ident(self.parent.primary_key),
                    quote_ident(target.table),
                    quote_ident(target.primary_key),
                    quote_ident(target_key),
                )
            }
        }
    }
}

/// A single WHERE condition. `target` is an already quoted column reference.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Equals { target: String, value: SqlValue },
    Like { target: String, pattern: String },
    In { target: String, values: Vec<SqlValue> },
}

impl Predicate {
    fn to_sql(&self) -> String {
        match self {
            Predicate::Equals { target, .. } => format!("{} = ?", target),
            Predicate::Like { target, .. } => format!("{} LIKE ?", target),
            // An empty IN list matches nothing
            Predicate::In { values, .. } if values.is_empty() => "1 = 0".to_string(),
            Predicate::In { target, values } => {
                let placeholders = vec!["?"; values.len()].join(", ");
                format!("{} IN ({})", target, placeholders)
            }
        }
    }

    /// Bind values in placeholder order
    fn values(&self) -> Vec<SqlValue> {
        match self {
            Predicate::Equals { value, .. } => vec![value.clone()],
            Predicate::Like { pattern, .. } => vec![SqlValue::String(pattern.clone())],
            Predicate::In { values, .. } => values.clone(),
        }
    }
}

fn column_ref(alias: &str, column: &str) -> String {
    format!("{}.{}", quote_ident(alias), quote_ident(column))
}

/// A query builder for one root entity.
pub struct EntityQuery<E: DatabaseEntity> {
    schema: &'static EntitySchema,
    joins: Vec<Join>,
    predicates: Vec<Predicate>,
    mode: FilterMode,
    limit: Option<i64>,
    offset: Option<i64>,
    _phantom: PhantomData<fn() -> E>,
}

impl<E: DatabaseEntity> Default for EntityQuery<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: DatabaseEntity> EntityQuery<E> {
    /// Create a new query builder for the entity type.
    pub fn new() -> Self {
        Self {
            schema: E::schema(),
            joins: Vec::new(),
            predicates: Vec::new(),
            mode: FilterMode::default(),
            limit: None,
            offset: None,
            _phantom: PhantomData,
        }
    }

    pub fn filter_mode(mut self, mode: FilterMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn joins(&self) -> &[Join] {
        &self.joins
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// The applied (limit, offset); `None` means the clause is absent.
    pub fn window(&self) -> (Option<i64>, Option<i64>) {
        (self.limit, self.offset)
    }

    // ========================================================================
    // Relations
    // ========================================================================

    /// Join every path in `relations`, in order.
    pub fn add_relations(mut self, relations: &[&str]) -> Result<Self, QueryError> {
        for path in relations {
            self.join_path(path)?;
        }
        Ok(self)
    }

    /// Join one relation path. A path that is already joined is left as is.
    pub fn add_relation(mut self, path: &str) -> Result<Self, QueryError> {
        self.join_path(path)?;
        Ok(self)
    }

    fn join_path(&mut self, path: &str) -> Result<(), QueryError> {
        if self.joins.iter().any(|j| j.alias == path) {
            return Ok(());
        }

        let (parent_alias, parent, name) = match path.rsplit_once('.') {
            None => (self.schema.alias.to_string(), self.schema, path),
            Some((parent_path, name)) => {
                // Nested paths hang off their prefix, which is joined first if needed
                self.join_path(parent_path)?;
                let parent = self
                    .joins
                    .iter()
                    .find(|j| j.alias == parent_path)
                    .map(|j| j.target())
                    .ok_or_else(|| QueryError::UnknownRelation {
                        entity: self.schema.name,
                        relation: parent_path.to_string(),
                    })?;
                (parent_path.to_string(), parent, name)
            }
        };

        let relation = parent
            .relation(name)
            .ok_or_else(|| QueryError::UnknownRelation {
                entity: parent.name,
                relation: path.to_string(),
            })?;

        self.joins.push(Join {
            alias: path.to_string(),
            parent_alias,
            parent,
            relation,
        });
        Ok(())
    }

    // ========================================================================
    // Filters
    // ========================================================================

    /// Apply every `(field, value)` of `filters` in order.
    ///
    /// A field named in `relations` targets the joined relation's id; any other
    /// field targets a root column, or the foreign key of a belongs-to relation.
    pub fn add_filters(
        mut self,
        filters: &FilterSet,
        relations: &[&str],
    ) -> Result<Self, QueryError> {
        for (field, value) in filters.iter() {
            let target = self.filter_target(field, relations)?;
            let predicate = match value {
                FilterValue::List(items) => Predicate::In {
                    target,
                    values: items.iter().map(SqlValue::from).collect(),
                },
                FilterValue::Scalar(scalar @ FilterScalar::String(s)) if scalar.is_wildcard() => {
                    Predicate::Like {
                        target,
                        pattern: s.clone(),
                    }
                }
                FilterValue::Scalar(scalar) => Predicate::Equals {
                    target,
                    value: SqlValue::from(scalar),
                },
            };
            self.push_predicate(predicate);
        }
        Ok(self)
    }

    /// Constrain the root primary key.
    pub fn where_id(mut self, id: i64) -> Self {
        self.predicates.push(Predicate::Equals {
            target: column_ref(self.schema.alias, self.schema.primary_key),
            value: SqlValue::Int(id),
        });
        self
    }

    fn push_predicate(&mut self, predicate: Predicate) {
        if self.mode == FilterMode::ReplaceLast {
            self.predicates.clear();
        }
        self.predicates.push(predicate);
    }

    fn filter_target(&self, field: &str, relations: &[&str]) -> Result<String, QueryError> {
        if relations.contains(&field) {
            let join = self
                .joins
                .iter()
                .find(|j| j.alias == field)
                .ok_or_else(|| QueryError::RelationNotJoined(field.to_string()))?;
            return Ok(column_ref(&join.alias, join.target().primary_key));
        }

        if let Some(column) = self.schema.column(field) {
            return Ok(column_ref(self.schema.alias, column.name));
        }

        if let Some(RelationDef {
            kind: RelationKind::BelongsTo { foreign_key },
            ..
        }) = self.schema.relation(field)
        {
            return Ok(column_ref(self.schema.alias, foreign_key));
        }

        Err(QueryError::UnknownField {
            entity: self.schema.name,
            field: field.to_string(),
        })
    }

    // ========================================================================
    // Pagination
    // ========================================================================

    /// Apply a storage window. Zero means unset for both halves.
    pub fn add_pagination(mut self, window: &OffsetLimit) -> Self {
        if window.take != 0 {
            self.limit = Some(window.take);
        }
        if window.skip != 0 {
            self.offset = Some(window.skip);
        }
        self
    }

    /// Set or clear the limit explicitly; `Some(0)` asks for zero rows.
    pub fn limit(mut self, limit: Option<i64>) -> Self {
        self.limit = limit;
        self
    }

    /// Set or clear the offset explicitly.
    pub fn offset(mut self, offset: Option<i64>) -> Self {
        self.offset = offset;
        self
    }

    // ========================================================================
    // SQL generation
    // ========================================================================

    fn root_id(&self) -> String {
        column_ref(self.schema.alias, self.schema.primary_key)
    }

    fn from_sql(&self) -> String {
        let mut sql = format!(
            "FROM {} AS {}",
            quote_ident(self.schema.table),
            quote_ident(self.schema.alias)
        );
        for join in &self.joins {
            sql.push(' ');
            sql.push_str(&join.to_sql());
        }
        sql
    }

    fn where_sql(&self) -> String {
        if self.predicates.is_empty() {
            return String::new();
        }
        let conditions: Vec<String> = self.predicates.iter().map(Predicate::to_sql).collect();
        format!(" WHERE {}", conditions.join(" AND "))
    }

    /// Bind values in placeholder order.
    fn ordered_values(&self) -> Vec<SqlValue> {
        self.predicates.iter().flat_map(Predicate::values).collect()
    }

    pub fn count_sql(&self) -> String {
        format!(
            "SELECT COUNT(DISTINCT {}) {}{}",
            self.root_id(),
            self.from_sql(),
            self.where_sql()
        )
    }

    pub fn ids_sql(&self) -> String {
        let root_id = self.root_id();
        let mut sql = format!(
            "SELECT DISTINCT {root_id} {}{} ORDER BY {root_id} ASC",
            self.from_sql(),
            self.where_sql()
        );

        match (self.limit, self.offset) {
            (Some(limit), Some(offset)) => {
                sql.push_str(&format!(" LIMIT {} OFFSET {}", limit, offset))
            }
            (Some(limit), None) => sql.push_str(&format!(" LIMIT {}", limit)),
            (None, Some(offset)) => sql.push_str(&format!(" LIMIT -1 OFFSET {}", offset)),
            (None, None) => {}
        }

        sql
    }

    fn load_sql(&self, plan: &Plan, id_count: usize) -> String {
        format!(
            "SELECT {} {} WHERE {} IN ({}) ORDER BY {}",
            plan.select_list().join(", "),
            self.from_sql(),
            self.root_id(),
            vec!["?"; id_count].join(", "),
            plan.order_list().join(", ")
        )
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Count distinct root records matching the predicates.
    pub async fn count(&self, pool: &SqlitePool) -> Result<i64, QueryError> {
        let sql = self.count_sql();
        tracing::debug!(sql = %sql, entity = self.schema.name, "Executing count query");

        let values = self.ordered_values();
        let mut query = sqlx::query_scalar::<_, i64>(&sql);
        for value in &values {
            query = value.bind_to_scalar(query);
        }
        Ok(query.fetch_one(pool).await?)
    }

    /// Select the page of root ids.
    pub async fn fetch_ids(&self, pool: &SqlitePool) -> Result<Vec<i64>, QueryError> {
        let sql = self.ids_sql();
        tracing::debug!(sql = %sql, entity = self.schema.name, "Executing id query");

        let values = self.ordered_values();
        let mut query = sqlx::query_scalar::<_, i64>(&sql);
        for value in &values {
            query = value.bind_to_scalar(query);
        }
        Ok(query.fetch_all(pool).await?)
    }

    async fn load(&self, pool: &SqlitePool, ids: &[i64]) -> Result<Vec<E>, QueryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let plan = Plan::new(self.schema, &self.joins);
        let sql = self.load_sql(&plan, ids.len());
        tracing::debug!(sql = %sql, entity = self.schema.name, ids = ids.len(), "Executing entity query");

        let mut query = sqlx::query(&sql);
        for id in ids {
            query = query.bind(*id);
        }
        let rows = query.fetch_all(pool).await?;

        plan.hydrate(&rows)?
            .into_iter()
            .map(|record| {
                serde_json::from_value(record).map_err(|source| QueryError::Decode {
                    entity: self.schema.name,
                    source,
                })
            })
            .collect()
    }

    /// Execute the query and return all matching entities.
    pub async fn fetch_all(self, pool: &SqlitePool) -> Result<Vec<E>, QueryError> {
        let ids = self.fetch_ids(pool).await?;
        self.load(pool, &ids).await
    }

    /// Execute the query and return the page together with the total match count.
    pub async fn fetch_many_and_count(
        self,
        pool: &SqlitePool,
    ) -> Result<(Vec<E>, i64), QueryError> {
        let total = self.count(pool).await?;
        let ids = self.fetch_ids(pool).await?;
        let data = self.load(pool, &ids).await?;
        Ok((data, total))
    }

    /// Execute the query and return a single entity.
    pub async fn fetch_one(self, pool: &SqlitePool) -> Result<Option<E>, QueryError> {
        let records = self.limit(Some(1)).fetch_all(pool).await?;
        Ok(records.into_iter().next())
    }
}
