use thiserror::Error;

/// Failures raised while building or running an entity query.
///
/// Descriptor misses are reported before any SQL reaches the database.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("unknown relation '{relation}' on {entity}")]
    UnknownRelation {
        entity: &'static str,
        relation: String,
    },

    #[error("unknown field '{field}' on {entity}")]
    UnknownField { entity: &'static str, field: String },

    #[error("relation '{0}' is used as a filter but was not joined")]
    RelationNotJoined(String),

    #[error("failed to decode {entity} record: {source}")]
    Decode {
        entity: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl QueryError {
    /// Whether the error came from a UNIQUE constraint
    pub fn is_unique_violation(&self) -> bool {
        match self {
            QueryError::Database(sqlx::Error::Database(db)) => db.is_unique_violation(),
            _ => false,
        }
    }
}
