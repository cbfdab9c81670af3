//! GraphQL filter input types for list queries
//!
//! Every list query takes an optional `filters` argument. Each input names the
//! fields a client may constrain and converts into a [`FilterSet`] keyed by
//! relation or column name, which the query builder resolves:
//! - a relation key (`location`) matches the related row's id
//! - a column key (`title`) matches the root row, `%` enables `LIKE`
//! - a list value matches any of its members

use async_graphql::InputObject;

use crate::entities::UserRole;
use crate::orm::FilterSet;

/// Conversion from a GraphQL filter input into query-builder filters
pub trait ToFilterSet {
    fn to_filter_set(&self) -> FilterSet;
}

/// Filters for an optional input; absent input means no constraint
pub fn filter_set<F: ToFilterSet>(filters: Option<&F>) -> FilterSet {
    filters.map(ToFilterSet::to_filter_set).unwrap_or_default()
}

/// Filter for route lists
#[derive(InputObject, Default, Clone, Debug)]
pub struct RouteFilterInput {
    /// Location id
    pub location: Option<i64>,
    /// Any of these category ids
    pub categories: Option<Vec<i64>>,
    /// Client id
    pub client: Option<i64>,
    /// Exact title, or a `%` pattern
    pub title: Option<String>,
    pub active: Option<bool>,
}

impl ToFilterSet for RouteFilterInput {
    fn to_filter_set(&self) -> FilterSet {
        let mut filters = FilterSet::new();
        filters.insert_opt("location", self.location);
        filters.insert_opt("categories", self.categories.clone());
        filters.insert_opt("client", self.client);
        filters.insert_opt("title", self.title.clone());
        filters.insert_opt("active", self.active);
        filters
    }
}

#[derive(InputObject, Default, Clone, Debug)]
pub struct LocationFilterInput {
    pub title: Option<String>,
}

impl ToFilterSet for LocationFilterInput {
    fn to_filter_set(&self) -> FilterSet {
        let mut filters = FilterSet::new();
        filters.insert_opt("title", self.title.clone());
        filters
    }
}

#[derive(InputObject, Default, Clone, Debug)]
pub struct CategoryFilterInput {
    pub title: Option<String>,
}

impl ToFilterSet for CategoryFilterInput {
    fn to_filter_set(&self) -> FilterSet {
        let mut filters = FilterSet::new();
        filters.insert_opt("title", self.title.clone());
        filters
    }
}

#[derive(InputObject, Default, Clone, Debug)]
pub struct ClientFilterInput {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl ToFilterSet for ClientFilterInput {
    fn to_filter_set(&self) -> FilterSet {
        let mut filters = FilterSet::new();
        filters.insert_opt("name", self.name.clone());
        filters.insert_opt("email", self.email.clone());
        filters
    }
}

/// Filter for event lists
#[derive(InputObject, Default, Clone, Debug)]
pub struct EventFilterInput {
    /// Category id
    pub category: Option<i64>,
    /// Location id
    pub location: Option<i64>,
    pub title: Option<String>,
}

impl ToFilterSet for EventFilterInput {
    fn to_filter_set(&self) -> FilterSet {
        let mut filters = FilterSet::new();
        filters.insert_opt("category", self.category);
        filters.insert_opt("location", self.location);
        filters.insert_opt("title", self.title.clone());
        filters
    }
}

#[derive(InputObject, Default, Clone, Debug)]
pub struct DayFilterInput {
    /// Route id
    pub route: Option<i64>,
    pub title: Option<String>,
}

impl ToFilterSet for DayFilterInput {
    fn to_filter_set(&self) -> FilterSet {
        let mut filters = FilterSet::new();
        filters.insert_opt("route", self.route);
        filters.insert_opt("title", self.title.clone());
        filters
    }
}

#[derive(InputObject, Default, Clone, Debug)]
pub struct TehnicalInfoFilterInput {
    /// Route id
    pub route: Option<i64>,
    /// Day id
    pub day: Option<i64>,
}

impl ToFilterSet for TehnicalInfoFilterInput {
    fn to_filter_set(&self) -> FilterSet {
        let mut filters = FilterSet::new();
        filters.insert_opt("route", self.route);
        filters.insert_opt("day", self.day);
        filters
    }
}

#[derive(InputObject, Default, Clone, Debug)]
pub struct GuidedInfoFilterInput {
    /// Route id
    pub route: Option<i64>,
}

impl ToFilterSet for GuidedInfoFilterInput {
    fn to_filter_set(&self) -> FilterSet {
        let mut filters = FilterSet::new();
        filters.insert_opt("route", self.route);
        filters
    }
}

/// Filter for price lists; one of `route` or `event` is mandatory
#[derive(InputObject, Default, Clone, Debug)]
pub struct PriceFilterInput {
    /// Route id
    pub route: Option<i64>,
    /// Event id
    pub event: Option<i64>,
}

impl PriceFilterInput {
    pub fn has_owner(&self) -> bool {
        self.route.is_some() || self.event.is_some()
    }
}

impl ToFilterSet for PriceFilterInput {
    fn to_filter_set(&self) -> FilterSet {
        let mut filters = FilterSet::new();
        filters.insert_opt("route", self.route);
        filters.insert_opt("event", self.event);
        filters
    }
}

#[derive(InputObject, Default, Clone, Debug)]
pub struct ReviewFilterInput {
    /// Route id
    pub route: Option<i64>,
    /// Author id
    pub user: Option<i64>,
    pub rate: Option<i64>,
}

impl ToFilterSet for ReviewFilterInput {
    fn to_filter_set(&self) -> FilterSet {
        let mut filters = FilterSet::new();
        filters.insert_opt("route", self.route);
        filters.insert_opt("user", self.user);
        filters.insert_opt("rate", self.rate);
        filters
    }
}

#[derive(InputObject, Default, Clone, Debug)]
pub struct UserFilterInput {
    pub username: Option<String>,
    pub email: Option<String>,
    pub role: Option<UserRole>,
    pub active: Option<bool>,
}

impl ToFilterSet for UserFilterInput {
    fn to_filter_set(&self) -> FilterSet {
        let mut filters = FilterSet::new();
        filters.insert_opt("username", self.username.clone());
        filters.insert_opt("email", self.email.clone());
        filters.insert_opt("role", self.role.map(UserRole::as_i64));
        filters.insert_opt("active", self.active);
        filters
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orm::FilterValue;

    #[test]
    fn test_absent_input_is_empty() {
        assert!(filter_set::<RouteFilterInput>(None).is_empty());
        assert!(RouteFilterInput::default().to_filter_set().is_empty());
    }

    #[test]
    fn test_route_filters_keep_declared_order() {
        let input = RouteFilterInput {
            title: Some("%ridge".into()),
            categories: Some(vec![2, 3]),
            location: Some(1),
            ..Default::default()
        };
        let filters = input.to_filter_set();
        let keys: Vec<&str> = filters.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["location", "categories", "title"]);
        assert!(matches!(filters.get("categories"), Some(FilterValue::List(_))));
    }

    #[test]
    fn test_price_filter_requires_owner() {
        assert!(!PriceFilterInput::default().has_owner());
        let input = PriceFilterInput {
            event: Some(4),
            ..Default::default()
        };
        assert!(input.has_owner());
    }

    #[test]
    fn test_user_role_filter_uses_stored_value() {
        let input = UserFilterInput {
            role: Some(UserRole::Admin),
            ..Default::default()
        };
        let filters = input.to_filter_set();
        assert!(filters.get("role").is_some());
    }
}
