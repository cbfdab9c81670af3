//! Sparse filter sets for list queries

use super::traits::SqlValue;

/// Marker that turns a string filter into a LIKE match when it leads or trails the value.
pub const WILDCARD: char = '%';

/// A single filter operand.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterScalar {
    Int(i64),
    Float(f64),
    Bool(bool),
    String(String),
}

impl FilterScalar {
    /// Whether this is a string starting or ending with the wildcard marker
    pub fn is_wildcard(&self) -> bool {
        match self {
            FilterScalar::String(s) => s.starts_with(WILDCARD) || s.ends_with(WILDCARD),
            _ => false,
        }
    }
}

impl From<&FilterScalar> for SqlValue {
    fn from(value: &FilterScalar) -> Self {
        match value {
            FilterScalar::Int(i) => SqlValue::Int(*i),
            FilterScalar::Float(f) => SqlValue::Float(*f),
            FilterScalar::Bool(b) => SqlValue::Bool(*b),
            FilterScalar::String(s) => SqlValue::String(s.clone()),
        }
    }
}

/// Value constraining one field.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Scalar(FilterScalar),
    List(Vec<FilterScalar>),
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Scalar(FilterScalar::Int(value))
    }
}

impl From<i32> for FilterValue {
    fn from(value: i32) -> Self {
        FilterValue::Scalar(FilterScalar::Int(value.into()))
    }
}

impl From<f64> for FilterValue {
    fn from(value: f64) -> Self {
        FilterValue::Scalar(FilterScalar::Float(value))
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::Scalar(FilterScalar::Bool(value))
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Scalar(FilterScalar::String(value))
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Scalar(FilterScalar::String(value.to_string()))
    }
}

impl From<Vec<i64>> for FilterValue {
    fn from(values: Vec<i64>) -> Self {
        FilterValue::List(values.into_iter().map(FilterScalar::Int).collect())
    }
}

impl From<Vec<String>> for FilterValue {
    fn from(values: Vec<String>) -> Self {
        FilterValue::List(values.into_iter().map(FilterScalar::String).collect())
    }
}

/// Field name to constraint, in insertion order. Absent fields are unconstrained.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSet {
    entries: Vec<(String, FilterValue)>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a constraint. Re-inserting a field replaces its value in place.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<FilterValue>) {
        let field = field.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(f, _)| *f == field) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((field, value)),
        }
    }

    /// Builder-style insert
    pub fn with(mut self, field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.insert(field, value);
        self
    }

    /// Insert only when the value is present
    pub fn insert_opt<V: Into<FilterValue>>(&mut self, field: &str, value: Option<V>) {
        if let Some(value) = value {
            self.insert(field, value);
        }
    }

    pub fn get(&self, field: &str) -> Option<&FilterValue> {
        self.entries.iter().find(|(f, _)| f == field).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.entries.iter().map(|(f, v)| (f.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_first_position() {
        let mut filters = FilterSet::new()
            .with("location", 3)
            .with("title", "Alps%");
        filters.insert("location", 4);

        let fields: Vec<&str> = filters.iter().map(|(f, _)| f).collect();
        assert_eq!(fields, vec!["location", "title"]);
        assert_eq!(filters.get("location"), Some(&FilterValue::from(4)));
    }

    #[test]
    fn test_insert_opt_skips_none() {
        let mut filters = FilterSet::new();
        filters.insert_opt::<i64>("location", None);
        filters.insert_opt("title", Some("x"));
        assert_eq!(filters.len(), 1);
    }

    #[test]
    fn test_wildcard_detection() {
        assert!(FilterScalar::String("%abc".into()).is_wildcard());
        assert!(FilterScalar::String("abc%".into()).is_wildcard());
        assert!(!FilterScalar::String("a%c".into()).is_wildcard());
        assert!(!FilterScalar::Int(5).is_wildcard());
    }
}
