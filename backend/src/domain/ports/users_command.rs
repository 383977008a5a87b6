//! Driving port for directory mutations.

use async_trait::async_trait;

use crate::domain::{Error, User, UserFields, UserId};

/// Write use-cases over the user directory.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Validate and store a new user.
    async fn create_user(&self, fields: UserFields) -> Result<User, Error>;

    /// Apply a partial update and return the updated record.
    async fn update_user(&self, id: &UserId, fields: UserFields) -> Result<User, Error>;

    /// Remove a user permanently.
    async fn delete_user(&self, id: &UserId) -> Result<(), Error>;
}
