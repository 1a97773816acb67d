//! Employee domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::config::{EMAIL_MAX_LENGTH, MOBILE_MAX_LENGTH, NAME_MAX_LENGTH};

/// Employee domain entity.
///
/// Every field is part of the public JSON shape, so the entity doubles
/// as the response body. `id` and `created_at` are assigned by storage
/// and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Employee {
    /// Unique employee identifier
    #[schema(example = 1)]
    pub id: i32,
    /// Given name
    #[schema(example = "Alice")]
    pub first_name: String,
    /// Family name
    #[schema(example = "Nguyen")]
    pub last_name: String,
    /// Unique email address (stored lowercase)
    #[schema(example = "alice@example.com")]
    pub email: String,
    /// Mobile number, at most 15 characters
    #[schema(example = "+15550100")]
    pub mobile: String,
    /// Job role
    #[schema(example = "engineer")]
    pub role: String,
    /// Record creation timestamp, default sort key (newest first)
    pub created_at: DateTime<Utc>,
}

impl Employee {
    /// Human-readable display name
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Employees per role, for the read-only reporting view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct RoleCount {
    #[schema(example = "engineer")]
    pub role: String,
    #[schema(example = 7)]
    pub count: i64,
}

/// Validated employee field set.
///
/// This is the immutable value the validator produces and the repository
/// consumes; it never checks uniqueness (storage enforces that). Missing
/// fields deserialize as empty strings and fail the blank check.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct EmployeeInput {
    /// Given name
    #[serde(default)]
    #[validate(custom(function = "validate_name"))]
    #[schema(example = "Alice")]
    pub first_name: String,
    /// Family name
    #[serde(default)]
    #[validate(custom(function = "validate_name"))]
    #[schema(example = "Nguyen")]
    pub last_name: String,
    /// Email address, lowercased before validation
    #[serde(default)]
    #[validate(
        email(message = "Enter a valid email address."),
        length(max = EMAIL_MAX_LENGTH, message = "Ensure this field has no more than 254 characters.")
    )]
    #[schema(example = "alice@example.com")]
    pub email: String,
    /// Mobile number, at most 15 characters
    #[serde(default)]
    #[validate(custom(function = "validate_mobile"))]
    #[schema(example = "+15550100")]
    pub mobile: String,
    /// Job role
    #[serde(default)]
    #[validate(custom(function = "validate_name"))]
    #[schema(example = "engineer")]
    pub role: String,
}

impl super::Normalize for EmployeeInput {
    /// Trim surrounding whitespace from every field and lowercase the email.
    ///
    /// Must run before `validate()` so the blank check sees trimmed values.
    fn normalize(&mut self) {
        self.first_name = self.first_name.trim().to_string();
        self.last_name = self.last_name.trim().to_string();
        self.email = self.email.trim().to_lowercase();
        self.mobile = self.mobile.trim().to_string();
        self.role = self.role.trim().to_string();
    }
}

fn field_error(message: &'static str) -> ValidationError {
    let mut err = ValidationError::new("invalid");
    err.message = Some(message.into());
    err
}

/// Non-blank, at most `NAME_MAX_LENGTH` characters
fn validate_name(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(field_error("This field may not be blank."));
    }
    if value.chars().count() > NAME_MAX_LENGTH as usize {
        return Err(field_error(
            "Ensure this field has no more than 120 characters.",
        ));
    }
    Ok(())
}

/// Non-blank, at most `MOBILE_MAX_LENGTH` characters
fn validate_mobile(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(field_error("This field may not be blank."));
    }
    if value.chars().count() > MOBILE_MAX_LENGTH {
        return Err(field_error(
            "Ensure this field has no more than 15 characters.",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Normalize;

    fn input(mobile: &str) -> EmployeeInput {
        EmployeeInput {
            first_name: "  Alice ".to_string(),
            last_name: "Nguyen".to_string(),
            email: " Alice@Example.COM ".to_string(),
            mobile: mobile.to_string(),
            role: "engineer".to_string(),
        }
    }

    #[test]
    fn normalize_trims_and_lowercases_email() {
        let mut value = input("+15550100");
        value.normalize();

        assert_eq!(value.first_name, "Alice");
        assert_eq!(value.email, "alice@example.com");
        assert!(value.validate().is_ok());
    }

    #[test]
    fn mobile_boundary_is_fifteen_characters() {
        let mut ok = input(&"5".repeat(15));
        ok.normalize();
        assert!(ok.validate().is_ok());

        let mut too_long = input(&"5".repeat(16));
        too_long.normalize();
        let errors = too_long.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("mobile"));
    }

    #[test]
    fn blank_fields_are_rejected_after_trimming() {
        let mut value = input("+15550100");
        value.role = "   ".to_string();
        value.normalize();

        let errors = value.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("role"));
    }
}
