use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::validation::{PHONE_PATTERN, USERNAME_PATTERN};

#[derive(Deserialize, Validate, Debug, Clone)]
pub struct RegisterData {
    #[validate(
        length(min = 3, max = 20, message = "The username must be between 3 and 20 characters long"),
        regex(path = "USERNAME_PATTERN", message = "The username may only contain letters, digits and underscores")
    )]
    pub username: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub password: String,
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    #[validate(regex(path = "PHONE_PATTERN", message = "Invalid phone number"))]
    pub phone: String,
}

#[derive(Deserialize)]
pub struct LoginData {
    pub username: String,
    pub password: String,
}

/// Public profile, nested inside message payloads
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserSummary {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserDetail {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub join_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

/// Caller identity resolved from a valid token
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurrentUser(pub String);

#[derive(Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}
