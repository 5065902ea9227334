use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::auth::{AdminLevel, PharmacistRole, UserType};
use crate::entities::{admin, customer, pharmacist};

/// E.164, optionally prefixed with '+'
static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[1-9]\d{1,14}$").unwrap());

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterCustomerRequest {
    #[validate(email(message = "Email must be valid"))]
    pub email: String,

    #[validate(regex(path = "PHONE_REGEX", message = "Phone number must be valid"))]
    pub phone: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters long"))]
    pub password: String,

    #[validate(length(min = 2))]
    pub first_name: String,

    #[validate(length(min = 2))]
    pub last_name: String,

    pub date_of_birth: Option<NaiveDate>,

    #[validate(length(min = 1, message = "Emergency contact name is required"))]
    pub emergency_contact_name: String,

    #[validate(regex(path = "PHONE_REGEX", message = "Emergency contact phone must be valid"))]
    pub emergency_contact_phone: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterPharmacistRequest {
    #[validate(email(message = "Email must be valid"))]
    pub email: String,

    #[validate(regex(path = "PHONE_REGEX", message = "Phone number must be valid"))]
    pub phone: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters long"))]
    pub password: String,

    #[validate(length(min = 2))]
    pub first_name: String,

    #[validate(length(min = 2))]
    pub last_name: String,

    pub date_of_birth: Option<NaiveDate>,

    pub pharmacist_role: PharmacistRole,

    #[validate(length(min = 1, message = "License number is required"))]
    pub license_number: String,

    #[validate(length(min = 1, message = "License state is required"))]
    pub license_state: String,

    pub license_expiry_date: NaiveDate,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterAdminRequest {
    #[validate(email(message = "Email must be valid"))]
    pub email: String,

    #[validate(regex(path = "PHONE_REGEX", message = "Phone number must be valid"))]
    pub phone: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters long"))]
    pub password: String,

    #[validate(length(min = 2))]
    pub first_name: String,

    #[validate(length(min = 2))]
    pub last_name: String,

    /// Defaults to STANDARD
    pub admin_level: Option<AdminLevel>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Email must be valid"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,

    /// When present, only that role table is consulted; otherwise the
    /// tables are tried in order (customer, pharmacist, admin).
    pub user_type: Option<UserType>,
}

/// Public account profile, whichever table the account lives in.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserProfile {
    pub user_id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub user_type: UserType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pharmacist_role: Option<PharmacistRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_level: Option<AdminLevel>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&customer::Model> for UserProfile {
    fn from(m: &customer::Model) -> Self {
        Self {
            user_id: m.id,
            email: m.email.clone(),
            first_name: m.first_name.clone(),
            last_name: m.last_name.clone(),
            user_type: UserType::Customer,
            pharmacist_role: None,
            admin_level: None,
            is_active: m.is_active,
            created_at: m.created_at,
        }
    }
}

impl From<&pharmacist::Model> for UserProfile {
    fn from(m: &pharmacist::Model) -> Self {
        Self {
            user_id: m.id,
            email: m.email.clone(),
            first_name: m.first_name.clone(),
            last_name: m.last_name.clone(),
            user_type: UserType::Pharmacist,
            pharmacist_role: m.pharmacist_role.parse().ok(),
            admin_level: None,
            is_active: m.is_active,
            created_at: m.created_at,
        }
    }
}

impl From<&admin::Model> for UserProfile {
    fn from(m: &admin::Model) -> Self {
        Self {
            user_id: m.id,
            email: m.email.clone(),
            first_name: m.first_name.clone(),
            last_name: m.last_name.clone(),
            user_type: UserType::Admin,
            pharmacist_role: None,
            admin_level: m.admin_level.parse().ok(),
            is_active: m.is_active,
            created_at: m.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub user: UserProfile,
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("+14155552671", true; "e164 with plus")]
    #[test_case("4155552671", true; "bare digits")]
    #[test_case("0123", false; "leading zero")]
    #[test_case("not-a-phone", false; "letters")]
    #[test_case("+1", false; "too short")]
    fn phone_regex(input: &str, valid: bool) {
        assert_eq!(PHONE_REGEX.is_match(input), valid);
    }

    #[test]
    fn register_customer_validation() {
        let req = RegisterCustomerRequest {
            email: "jane@example.com".to_string(),
            phone: "+14155552671".to_string(),
            password: "long-enough-pw".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            date_of_birth: None,
            emergency_contact_name: "John Doe".to_string(),
            emergency_contact_phone: "+14155552672".to_string(),
        };
        assert!(req.validate().is_ok());

        let bad = RegisterCustomerRequest {
            password: "short".to_string(),
            ..req
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn login_user_type_is_optional() {
        let json = r#"{"email":"a@b.co","password":"pw"}"#;
        let req: LoginRequest = serde_json::from_str(json).unwrap();
        assert!(req.user_type.is_none());

        let json = r#"{"email":"a@b.co","password":"pw","user_type":"PHARMACIST"}"#;
        let req: LoginRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.user_type, Some(UserType::Pharmacist));
    }
}
