//! GraphQL input types for create and update mutations
//!
//! Create inputs carry the required fields as non-null and add `required`
//! rules where a field is nullable in GraphQL but mandatory for the row.
//! Update inputs are all-optional; their rules only fire for present fields
//! and only present fields are written.

use async_graphql::InputObject;

use crate::entities::UserRole;
use crate::orm::Changes;
use crate::validation::{FieldError, Validate, Validator};

/// Input that maps onto the columns of one table
pub trait EntityInput: Validate {
    fn changes(&self) -> Changes;
}

const PEOPLE_MAX_MESSAGE: &str = "people_max must be higher than people_min";

fn people_max_above_min(people_min: Option<i64>, people_max: Option<i64>) -> bool {
    match (people_min, people_max) {
        (Some(min), Some(max)) => max > min,
        _ => true,
    }
}

// ============================================================================
// Location
// ============================================================================

#[derive(Debug, Clone, InputObject)]
pub struct LocationCreateInput {
    pub title: String,
    pub description: String,
}

impl Validate for LocationCreateInput {
    fn validate(&self) -> Vec<FieldError> {
        Validator::new()
            .length("title", Some(self.title.as_str()), 4, 45)
            .min_length("description", Some(self.description.as_str()), 20)
            .finish()
    }
}

impl EntityInput for LocationCreateInput {
    fn changes(&self) -> Changes {
        Changes::new()
            .set("title", self.title.clone())
            .set("description", self.description.clone())
    }
}

#[derive(Debug, Clone, Default, InputObject)]
pub struct LocationUpdateInput {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl Validate for LocationUpdateInput {
    fn validate(&self) -> Vec<FieldError> {
        Validator::new()
            .length("title", self.title.as_deref(), 4, 45)
            .min_length("description", self.description.as_deref(), 20)
            .finish()
    }
}

impl EntityInput for LocationUpdateInput {
    fn changes(&self) -> Changes {
        Changes::new()
            .set_opt("title", self.title.clone())
            .set_opt("description", self.description.clone())
    }
}

// ============================================================================
// Category
// ============================================================================

#[derive(Debug, Clone, InputObject)]
pub struct CategoryCreateInput {
    pub title: String,
}

impl Validate for CategoryCreateInput {
    fn validate(&self) -> Vec<FieldError> {
        Validator::new()
            .length("title", Some(self.title.as_str()), 4, 45)
            .finish()
    }
}

impl EntityInput for CategoryCreateInput {
    fn changes(&self) -> Changes {
        Changes::new().set("title", self.title.clone())
    }
}

#[derive(Debug, Clone, Default, InputObject)]
pub struct CategoryUpdateInput {
    pub title: Option<String>,
}

impl Validate for CategoryUpdateInput {
    fn validate(&self) -> Vec<FieldError> {
        Validator::new()
            .length("title", self.title.as_deref(), 4, 45)
            .finish()
    }
}

impl EntityInput for CategoryUpdateInput {
    fn changes(&self) -> Changes {
        Changes::new().set_opt("title", self.title.clone())
    }
}

// ============================================================================
// Client
// ============================================================================

#[derive(Debug, Clone, InputObject)]
pub struct ClientCreateInput {
    pub name: String,
    pub email: String,
    pub address: String,
}

impl Validate for ClientCreateInput {
    fn validate(&self) -> Vec<FieldError> {
        Validator::new()
            .length("name", Some(self.name.as_str()), 4, 45)
            .email("email", Some(self.email.as_str()))
            .length("address", Some(self.address.as_str()), 4, 255)
            .finish()
    }
}

impl EntityInput for ClientCreateInput {
    fn changes(&self) -> Changes {
        Changes::new()
            .set("name", self.name.clone())
            .set("email", self.email.clone())
            .set("address", self.address.clone())
    }
}

#[derive(Debug, Clone, Default, InputObject)]
pub struct ClientUpdateInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

impl Validate for ClientUpdateInput {
    fn validate(&self) -> Vec<FieldError> {
        Validator::new()
            .length("name", self.name.as_deref(), 4, 45)
            .email("email", self.email.as_deref())
            .length("address", self.address.as_deref(), 4, 255)
            .finish()
    }
}

impl EntityInput for ClientUpdateInput {
    fn changes(&self) -> Changes {
        Changes::new()
            .set_opt("name", self.name.clone())
            .set_opt("email", self.email.clone())
            .set_opt("address", self.address.clone())
    }
}

// ============================================================================
// Route
// ============================================================================

/// A new route; `category_id` links the route to one category
#[derive(Debug, Clone, InputObject)]
pub struct RouteCreateInput {
    pub title: String,
    pub description: String,
    pub details: String,
    pub fitness_level: Option<i64>,
    pub experience: Option<i64>,
    pub note: Option<String>,
    pub location_id: i64,
    pub client_id: Option<i64>,
    pub category_id: Option<i64>,
}

impl Validate for RouteCreateInput {
    fn validate(&self) -> Vec<FieldError> {
        Validator::new()
            .length("title", Some(self.title.as_str()), 4, 45)
            .length("description", Some(self.description.as_str()), 4, 100)
            .min_length("details", Some(self.details.as_str()), 20)
            .max("fitness_level", self.fitness_level, 5)
            .max("experience", self.experience, 5)
            .finish()
    }
}

impl EntityInput for RouteCreateInput {
    fn changes(&self) -> Changes {
        Changes::new()
            .set("title", self.title.clone())
            .set("description", self.description.clone())
            .set("details", self.details.clone())
            .set_opt("fitness_level", self.fitness_level)
            .set_opt("experience", self.experience)
            .set_opt("note", self.note.clone())
            .set("location_id", self.location_id)
            .set_opt("client_id", self.client_id)
    }
}

/// Route changes; a present `category_id` replaces the route's categories
#[derive(Debug, Clone, Default, InputObject)]
pub struct RouteUpdateInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub details: Option<String>,
    pub fitness_level: Option<i64>,
    pub experience: Option<i64>,
    pub note: Option<String>,
    pub active: Option<bool>,
    pub location_id: Option<i64>,
    pub client_id: Option<i64>,
    pub category_id: Option<i64>,
}

impl Validate for RouteUpdateInput {
    fn validate(&self) -> Vec<FieldError> {
        Validator::new()
            .length("title", self.title.as_deref(), 4, 45)
            .length("description", self.description.as_deref(), 4, 100)
            .min_length("details", self.details.as_deref(), 20)
            .max("fitness_level", self.fitness_level, 5)
            .max("experience", self.experience, 5)
            .finish()
    }
}

impl EntityInput for RouteUpdateInput {
    fn changes(&self) -> Changes {
        Changes::new()
            .set_opt("title", self.title.clone())
            .set_opt("description", self.description.clone())
            .set_opt("details", self.details.clone())
            .set_opt("fitness_level", self.fitness_level)
            .set_opt("experience", self.experience)
            .set_opt("note", self.note.clone())
            .set_opt("active", self.active)
            .set_opt("location_id", self.location_id)
            .set_opt("client_id", self.client_id)
    }
}

// ============================================================================
// Day
// ============================================================================

#[derive(Debug, Clone, InputObject)]
pub struct DayCreateInput {
    pub title: String,
    pub text: String,
    pub route_id: i64,
}

impl Validate for DayCreateInput {
    fn validate(&self) -> Vec<FieldError> {
        Validator::new()
            .length("title", Some(self.title.as_str()), 4, 45)
            .min_length("text", Some(self.text.as_str()), 20)
            .finish()
    }
}

impl EntityInput for DayCreateInput {
    fn changes(&self) -> Changes {
        Changes::new()
            .set("title", self.title.clone())
            .set("text", self.text.clone())
            .set("route_id", self.route_id)
    }
}

#[derive(Debug, Clone, Default, InputObject)]
pub struct DayUpdateInput {
    pub title: Option<String>,
    pub text: Option<String>,
    pub route_id: Option<i64>,
}

impl Validate for DayUpdateInput {
    fn validate(&self) -> Vec<FieldError> {
        Validator::new()
            .length("title", self.title.as_deref(), 4, 45)
            .min_length("text", self.text.as_deref(), 20)
            .finish()
    }
}

impl EntityInput for DayUpdateInput {
    fn changes(&self) -> Changes {
        Changes::new()
            .set_opt("title", self.title.clone())
            .set_opt("text", self.text.clone())
            .set_opt("route_id", self.route_id)
    }
}

// ============================================================================
// Event
// ============================================================================

#[derive(Debug, Clone, InputObject)]
pub struct EventCreateInput {
    pub title: String,
    pub text: String,
    pub category_id: i64,
    pub location_id: i64,
}

impl Validate for EventCreateInput {
    fn validate(&self) -> Vec<FieldError> {
        Validator::new()
            .length("title", Some(self.title.as_str()), 4, 45)
            .min_length("text", Some(self.text.as_str()), 20)
            .finish()
    }
}

impl EntityInput for EventCreateInput {
    fn changes(&self) -> Changes {
        Changes::new()
            .set("title", self.title.clone())
            .set("text", self.text.clone())
            .set("category_id", self.category_id)
            .set("location_id", self.location_id)
    }
}

#[derive(Debug, Clone, Default, InputObject)]
pub struct EventUpdateInput {
    pub title: Option<String>,
    pub text: Option<String>,
    pub category_id: Option<i64>,
    pub location_id: Option<i64>,
}

impl Validate for EventUpdateInput {
    fn validate(&self) -> Vec<FieldError> {
        Validator::new()
            .length("title", self.title.as_deref(), 4, 45)
            .min_length("text", self.text.as_deref(), 20)
            .finish()
    }
}

impl EntityInput for EventUpdateInput {
    fn changes(&self) -> Changes {
        Changes::new()
            .set_opt("title", self.title.clone())
            .set_opt("text", self.text.clone())
            .set_opt("category_id", self.category_id)
            .set_opt("location_id", self.location_id)
    }
}

// ============================================================================
// Price
// ============================================================================

/// A price for either a route or an event
#[derive(Debug, Clone, InputObject)]
pub struct PriceCreateInput {
    pub amount: f64,
    pub valid_from: Option<String>,
    pub valid_to: Option<String>,
    pub people_min: Option<i64>,
    pub people_max: i64,
    pub route_id: Option<i64>,
    pub event_id: Option<i64>,
}

impl Validate for PriceCreateInput {
    fn validate(&self) -> Vec<FieldError> {
        Validator::new()
            .check(
                self.route_id.is_some() || self.event_id.is_some(),
                "route_id",
                "route_id OR event_id is mandatory",
            )
            .check(
                people_max_above_min(self.people_min, Some(self.people_max)),
                "people_max",
                PEOPLE_MAX_MESSAGE,
            )
            .finish()
    }
}

impl EntityInput for PriceCreateInput {
    fn changes(&self) -> Changes {
        Changes::new()
            .set("amount", self.amount)
            .set_opt("valid_from", self.valid_from.clone())
            .set_opt("valid_to", self.valid_to.clone())
            .set_opt("people_min", self.people_min)
            .set("people_max", self.people_max)
            .set_opt("route_id", self.route_id)
            .set_opt("event_id", self.event_id)
    }
}

#[derive(Debug, Clone, Default, InputObject)]
pub struct PriceUpdateInput {
    pub amount: Option<f64>,
    pub valid_from: Option<String>,
    pub valid_to: Option<String>,
    pub people_min: Option<i64>,
    pub people_max: Option<i64>,
}

impl Validate for PriceUpdateInput {
    fn validate(&self) -> Vec<FieldError> {
        Validator::new()
            .check(
                people_max_above_min(self.people_min, self.people_max),
                "people_max",
                PEOPLE_MAX_MESSAGE,
            )
            .finish()
    }
}

impl EntityInput for PriceUpdateInput {
    fn changes(&self) -> Changes {
        Changes::new()
            .set_opt("amount", self.amount)
            .set_opt("valid_from", self.valid_from.clone())
            .set_opt("valid_to", self.valid_to.clone())
            .set_opt("people_min", self.people_min)
            .set_opt("people_max", self.people_max)
    }
}

// ============================================================================
// Guided info
// ============================================================================

/// Guided tour details. `route_id` is required on create and, when given on
/// update, moves the details to that route.
#[derive(Debug, Clone, Default, InputObject)]
pub struct GuidedInfoInput {
    pub age_min: Option<i64>,
    pub age_max: Option<i64>,
    pub people_min: Option<i64>,
    pub people_max: Option<i64>,
    pub starts_from: Option<String>,
    pub accommodation: Option<String>,
    pub meals: Option<String>,
    pub transfer: Option<String>,
    pub equipment: Option<String>,
    pub insurance: Option<String>,
    pub discount: Option<String>,
    pub cancelation_policy: Option<String>,
    pub not_include: Option<String>,
    pub additional_charge: Option<String>,
    pub availability_from: Option<String>,
    pub availability_to: Option<String>,
    pub route_id: Option<i64>,
}

impl Validate for GuidedInfoInput {
    fn validate(&self) -> Vec<FieldError> {
        let mut validator = Validator::new();
        validator
            .check(
                people_max_above_min(self.people_min, self.people_max),
                "people_max",
                PEOPLE_MAX_MESSAGE,
            )
            .length("starts_from", self.starts_from.as_deref(), 3, 255)
            .length("availability_from", self.availability_from.as_deref(), 3, 255)
            .length("availability_to", self.availability_to.as_deref(), 3, 255);

        let descriptions = [
            ("accommodation", &self.accommodation),
            ("meals", &self.meals),
            ("transfer", &self.transfer),
            ("equipment", &self.equipment),
            ("insurance", &self.insurance),
            ("discount", &self.discount),
            ("cancelation_policy", &self.cancelation_policy),
            ("not_include", &self.not_include),
            ("additional_charge", &self.additional_charge),
        ];
        for (field, value) in descriptions {
            validator.min_length(field, value.as_deref(), 10);
        }
        validator.finish()
    }
}

impl EntityInput for GuidedInfoInput {
    fn changes(&self) -> Changes {
        Changes::new()
            .set_opt("age_min", self.age_min)
            .set_opt("age_max", self.age_max)
            .set_opt("people_min", self.people_min)
            .set_opt("people_max", self.people_max)
            .set_opt("starts_from", self.starts_from.clone())
            .set_opt("accommodation", self.accommodation.clone())
            .set_opt("meals", self.meals.clone())
            .set_opt("transfer", self.transfer.clone())
            .set_opt("equipment", self.equipment.clone())
            .set_opt("insurance", self.insurance.clone())
            .set_opt("discount", self.discount.clone())
            .set_opt("cancelation_policy", self.cancelation_policy.clone())
            .set_opt("not_include", self.not_include.clone())
            .set_opt("additional_charge", self.additional_charge.clone())
            .set_opt("availability_from", self.availability_from.clone())
            .set_opt("availability_to", self.availability_to.clone())
    }
}

// ============================================================================
// Technical info
// ============================================================================

/// Technical details attached to exactly one of a route or a day
#[derive(Debug, Clone, Default, InputObject)]
pub struct TehnicalInfoInput {
    pub elevation_min: Option<i64>,
    pub elevation_max: Option<i64>,
    pub length: Option<i64>,
    pub duration: Option<i64>,
    pub route_id: Option<i64>,
    pub day_id: Option<i64>,
}

impl TehnicalInfoInput {
    /// Whether exactly one owner is named
    pub fn has_single_owner(&self) -> bool {
        self.route_id.is_some() != self.day_id.is_some()
    }
}

impl Validate for TehnicalInfoInput {
    fn validate(&self) -> Vec<FieldError> {
        Validator::new()
            .check(
                self.has_single_owner(),
                "route_id",
                "Invalid tehnical info input. day_id or route_id must be specified",
            )
            .finish()
    }
}

impl EntityInput for TehnicalInfoInput {
    fn changes(&self) -> Changes {
        Changes::new()
            .set_opt("elevation_min", self.elevation_min)
            .set_opt("elevation_max", self.elevation_max)
            .set_opt("length", self.length)
            .set_opt("duration", self.duration)
    }
}

// ============================================================================
// Review
// ============================================================================

#[derive(Debug, Clone, InputObject)]
pub struct ReviewCreateInput {
    pub title: String,
    pub text: Option<String>,
    pub rate: i64,
    pub route_id: i64,
}

impl Validate for ReviewCreateInput {
    fn validate(&self) -> Vec<FieldError> {
        Validator::new()
            .length("title", Some(self.title.as_str()), 4, 45)
            .range("rate", Some(self.rate), 1, 10)
            .finish()
    }
}

impl EntityInput for ReviewCreateInput {
    fn changes(&self) -> Changes {
        Changes::new()
            .set("title", self.title.clone())
            .set_opt("text", self.text.clone())
            .set("rate", self.rate)
            .set("route_id", self.route_id)
    }
}

#[derive(Debug, Clone, Default, InputObject)]
pub struct ReviewUpdateInput {
    pub title: Option<String>,
    pub text: Option<String>,
    pub rate: Option<i64>,
}

impl Validate for ReviewUpdateInput {
    fn validate(&self) -> Vec<FieldError> {
        Validator::new()
            .length("title", self.title.as_deref(), 4, 45)
            .range("rate", self.rate, 1, 10)
            .finish()
    }
}

impl EntityInput for ReviewUpdateInput {
    fn changes(&self) -> Changes {
        Changes::new()
            .set_opt("title", self.title.clone())
            .set_opt("text", self.text.clone())
            .set_opt("rate", self.rate)
    }
}

// ============================================================================
// User
// ============================================================================

#[derive(Debug, Clone, Default, InputObject)]
pub struct UserUpdateInput {
    pub username: Option<String>,
    pub email: Option<String>,
    pub active: Option<bool>,
    pub role: Option<UserRole>,
}

impl Validate for UserUpdateInput {
    fn validate(&self) -> Vec<FieldError> {
        Validator::new()
            .length("username", self.username.as_deref(), 4, 100)
            .email("email", self.email.as_deref())
            .finish()
    }
}

impl EntityInput for UserUpdateInput {
    fn changes(&self) -> Changes {
        Changes::new()
            .set_opt("username", self.username.clone())
            .set_opt("email", self.email.clone())
            .set_opt("active", self.active)
            .set_opt("role", self.role.map(UserRole::as_i64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fields(errors: Vec<FieldError>) -> Vec<String> {
        errors.into_iter().map(|e| e.field).collect()
    }

    #[test]
    fn test_route_create_rules() {
        let input = RouteCreateInput {
            title: "Via".into(),
            description: "Ridge walk".into(),
            details: "Too short".into(),
            fitness_level: Some(6),
            experience: Some(5),
            note: None,
            location_id: 1,
            client_id: None,
            category_id: None,
        };
        assert_eq!(fields(input.validate()), vec!["title", "details", "fitness_level"]);
    }

    #[test]
    fn test_update_checks_only_present_fields() {
        assert!(RouteUpdateInput::default().validate().is_empty());
        assert!(RouteUpdateInput::default().changes().is_empty());

        let input = LocationUpdateInput {
            title: Some("Bled".into()),
            description: None,
        };
        assert!(input.validate().is_empty());
        assert_eq!(input.changes(), Changes::new().set("title", "Bled"));
    }

    #[test]
    fn test_price_needs_owner_and_sane_group_size() {
        let input = PriceCreateInput {
            amount: 120.0,
            valid_from: None,
            valid_to: None,
            people_min: Some(4),
            people_max: 4,
            route_id: None,
            event_id: None,
        };
        assert_eq!(fields(input.validate()), vec!["route_id", "people_max"]);
    }

    #[test]
    fn test_guided_info_description_minimum() {
        let input = GuidedInfoInput {
            meals: Some("Lunch".into()),
            transfer: Some("Minibus from the airport".into()),
            starts_from: Some("Ljubljana".into()),
            ..Default::default()
        };
        assert_eq!(fields(input.validate()), vec!["meals"]);
    }

    #[test]
    fn test_tehnical_info_single_owner() {
        let both = TehnicalInfoInput {
            route_id: Some(1),
            day_id: Some(2),
            ..Default::default()
        };
        let neither = TehnicalInfoInput::default();
        let day = TehnicalInfoInput {
            day_id: Some(2),
            ..Default::default()
        };
        assert!(!both.has_single_owner());
        assert!(!neither.has_single_owner());
        assert!(day.has_single_owner());
        assert!(day.validate().is_empty());
    }

    #[test]
    fn test_review_rate_range() {
        let input = ReviewUpdateInput {
            rate: Some(0),
            ..Default::default()
        };
        assert_eq!(fields(input.validate()), vec!["rate"]);
    }
}
