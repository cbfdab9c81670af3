//! Input validation
//!
//! Inputs implement [`Validate`] by running a [`Validator`] over their fields.
//! Rules only fire for present values, so update inputs check just what they
//! carry while create inputs add explicit `required` rules.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::error::{ApiError, ApiResult};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid")
});

/// One rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

pub trait Validate {
    fn validate(&self) -> Vec<FieldError>;
}

/// Run `input`'s rules and fail with every rejected field at once.
pub fn ensure_valid(input: &impl Validate) -> ApiResult<()> {
    let errors = input.validate();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::Validation(errors))
    }
}

#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    fn reject(&mut self, field: &str, message: String) {
        self.errors.push(FieldError::new(field, message));
    }

    pub fn check(&mut self, ok: bool, field: &str, message: &str) -> &mut Self {
        if !ok {
            self.reject(field, message.to_string());
        }
        self
    }

    pub fn required<T>(&mut self, field: &str, value: Option<&T>) -> &mut Self {
        if value.is_none() {
            self.reject(field, format!("{} is required", field));
        }
        self
    }

    /// Character count within `min..=max`
    pub fn length(&mut self, field: &str, value: Option<&str>, min: usize, max: usize) -> &mut Self {
        if let Some(value) = value {
            let len = value.chars().count();
            if len < min || len > max {
                self.reject(
                    field,
                    format!("{} must be between {} and {} characters", field, min, max),
                );
            }
        }
        self
    }

    pub fn min_length(&mut self, field: &str, value: Option<&str>, min: usize) -> &mut Self {
        if let Some(value) = value {
            if value.chars().count() < min {
                self.reject(field, format!("{} must be at least {} characters", field, min));
            }
        }
        self
    }

    pub fn email(&mut self, field: &str, value: Option<&str>) -> &mut Self {
        if let Some(value) = value {
            if !EMAIL_RE.is_match(value) {
                self.reject(field, format!("{} must be a valid email address", field));
            }
        }
        self
    }

    pub fn max<T: PartialOrd + std::fmt::Display>(
        &mut self,
        field: &str,
        value: Option<T>,
        max: T,
    ) -> &mut Self {
        if let Some(value) = value {
            if value > max {
                self.reject(field, format!("{} must not be greater than {}", field, max));
            }
        }
        self
    }

    pub fn range<T: PartialOrd + std::fmt::Display>(
        &mut self,
        field: &str,
        value: Option<T>,
        min: T,
        max: T,
    ) -> &mut Self {
        if let Some(value) = value {
            if value < min || value > max {
                self.reject(field, format!("{} must be between {} and {}", field, min, max));
            }
        }
        self
    }

    pub fn finish(&mut self) -> Vec<FieldError> {
        std::mem::take(&mut self.errors)
    }
}
