use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Account role. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Customer,
    Admin,
}

/// Represents a registered user in the system.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub phone_no: String,
    pub address: String,
    pub dob: NaiveDate,
    pub city: String,
    pub state: String,
    pub zipcode: String,
}

/// Payload for creating a new user. The password is already hashed.
#[derive(Debug, Clone)]
pub struct UserCreate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub phone_no: String,
    pub address: String,
    pub dob: NaiveDate,
    pub city: String,
    pub state: String,
    pub zipcode: String,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Emails are compared and stored lower-cased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
