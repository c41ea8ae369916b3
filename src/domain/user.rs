use serde::{Deserialize, Serialize};

use crate::domain::document::Document;
use crate::domain::types::{UserId, UserRole};

/// A team member as listed by the admin dashboard.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub role: UserRole,
}

impl User {
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.username.to_lowercase().contains(&term) || self.email.to_lowercase().contains(&term)
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Successful sign-in payload.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
    pub email: String,
    pub role: UserRole,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub password: String,
    pub role: UserRole,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange {
    pub old_password: String,
    pub new_password: String,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ProfileUpdate {
    pub username: String,
    pub email: String,
}

/// Profile fields echoed back after an update.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct UserProfile {
    pub username: String,
    pub email: String,
}

/// Next-number settings for document numbering.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CounterUpdate {
    pub year_month: String,
    pub next_seq: String,
}

/// Figures shown on the overview dashboard.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(default)]
    pub total_revenue: f64,
    #[serde(default)]
    pub invoices_count: u64,
    #[serde(default)]
    pub users_count: u64,
    #[serde(default)]
    pub recent_invoices: Vec<Document>,
}
