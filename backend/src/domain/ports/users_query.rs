//! Driving port for read-only directory use-cases.
//!
//! Inbound adapters call this port without knowing which store backs it.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{Error, User, UserId};

/// A rendered export ready to be sent to a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserExport {
    /// Suggested download file name.
    pub file_name: &'static str,
    /// MIME type of `bytes`.
    pub content_type: &'static str,
    /// Encoded file content.
    pub bytes: Vec<u8>,
}

/// Read use-cases over the user directory.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// One page of users, newest first.
    async fn list_users(&self, request: PageRequest) -> Result<Page<User>, Error>;

    /// One page of users matching `query` in any field, newest first.
    async fn search_users(
        &self,
        query: Option<String>,
        request: PageRequest,
    ) -> Result<Page<User>, Error>;

    /// A single user.
    async fn get_user(&self, id: &UserId) -> Result<User, Error>;

    /// Every user encoded as a downloadable file.
    async fn export_users(&self) -> Result<UserExport, Error>;
}
