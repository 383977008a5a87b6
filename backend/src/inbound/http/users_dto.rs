//! Wire representations for the users API.
//!
//! Field names follow the JSON contract (`camelCase`); the domain types stay
//! serde-agnostic apart from their identifiers.

use chrono::{DateTime, Utc};
use pagination::{Page, PageRequest};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{User, UserFields};

/// A stored user as returned by every endpoint that yields one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(example = "+44 20 7946 0958")]
    pub phone: String,
    #[schema(example = "12 St James's Square, London")]
    pub address: String,
    #[schema(example = "Admin")]
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name,
            email: user.email,
            phone: user.phone,
            address: user.address,
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// One page of users plus pagination counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserPageDto {
    pub users: Vec<UserDto>,
    #[schema(example = 1)]
    pub current_page: u64,
    #[schema(example = 3)]
    pub total_pages: u64,
    #[schema(example = 25)]
    pub total_users: u64,
}

impl From<Page<User>> for UserPageDto {
    fn from(page: Page<User>) -> Self {
        let current_page = page.current_page();
        let total_pages = page.total_pages();
        let total_users = page.total_items();
        Self {
            users: page.into_items().into_iter().map(UserDto::from).collect(),
            current_page,
            total_pages,
            total_users,
        }
    }
}

/// Body of create and update requests.
///
/// Every field is optional at the wire level; creation requires all five and
/// updates change only those present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserPayload {
    #[schema(example = "Ada Lovelace")]
    pub name: Option<String>,
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    #[schema(example = "+44 20 7946 0958")]
    pub phone: Option<String>,
    #[schema(example = "12 St James's Square, London")]
    pub address: Option<String>,
    #[schema(example = "Admin")]
    pub role: Option<String>,
}

impl From<UserPayload> for UserFields {
    fn from(payload: UserPayload) -> Self {
        Self {
            name: payload.name,
            email: payload.email,
            phone: payload.phone,
            address: payload.address,
            role: payload.role,
        }
    }
}

/// Query string of `GET /users`.
///
/// Values stay raw strings so that non-numeric input falls back to defaults
/// instead of failing extraction.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// 1-based page number, default 1.
    pub page: Option<String>,
    /// Page size, default 10.
    pub limit: Option<String>,
}

impl ListParams {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::from_raw(self.page.as_deref(), self.limit.as_deref())
    }
}

/// Query string of `GET /users/search`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Case-insensitive pattern matched against every user field.
    pub query: Option<String>,
    /// 1-based page number, default 1.
    pub page: Option<String>,
    /// Page size, default 10.
    pub limit: Option<String>,
}

impl SearchParams {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::from_raw(self.page.as_deref(), self.limit.as_deref())
    }
}

/// Confirmation body returned by delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageDto {
    #[schema(example = "User deleted successfully")]
    pub message: String,
}
