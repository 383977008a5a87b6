//! Wire types exchanged with the directory API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A directory record as returned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Server-assigned identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Unique email address.
    pub email: String,
    /// Phone number.
    pub phone: String,
    /// Postal address.
    pub address: String,
    /// Free-form role label.
    pub role: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

/// One page of users with pagination counters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPage {
    /// Users on this page, newest first.
    pub users: Vec<User>,
    /// Page number the server answered for.
    pub current_page: u32,
    /// Number of pages available.
    pub total_pages: u32,
    /// Number of matching users.
    pub total_users: u64,
}

/// Form input sent on create and update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserInput {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Phone number.
    pub phone: String,
    /// Postal address.
    pub address: String,
    /// Role label.
    pub role: String,
}

impl From<&User> for UserInput {
    fn from(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            address: user.address.clone(),
            role: user.role.clone(),
        }
    }
}

/// Confirmation body returned by delete.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessageBody {
    /// Human-readable outcome.
    pub message: String,
}
