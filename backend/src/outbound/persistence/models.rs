//! Internal Diesel row structs for the `users` table.
//!
//! These never leave the persistence layer; conversions into the domain
//! [`User`] live here so the store stays a thin translator.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{User, UserField, UserId, UserPatch};

use super::schema::users;

/// Row read from `users`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId::from_uuid(row.id),
            name: row.name,
            email: row.email,
            phone: row.phone,
            address: row.address,
            role: row.role,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Insertable form of a new user.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub address: &'a str,
    pub role: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> From<&'a User> for NewUserRow<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            id: *user.id.as_uuid(),
            name: &user.name,
            email: &user.email,
            phone: &user.phone,
            address: &user.address,
            role: &user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Changeset for a partial update. `None` columns are left out of the
/// `SET` clause; `updated_at` is always written.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserPatchChangeset<'a> {
    pub name: Option<&'a str>,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub address: Option<&'a str>,
    pub role: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> UserPatchChangeset<'a> {
    pub(crate) fn new(patch: &'a UserPatch, now: DateTime<Utc>) -> Self {
        Self {
            name: patch.value(UserField::Name),
            email: patch.value(UserField::Email),
            phone: patch.value(UserField::Phone),
            address: patch.value(UserField::Address),
            role: patch.value(UserField::Role),
            updated_at: now,
        }
    }
}
