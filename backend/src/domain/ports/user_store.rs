//! Port abstraction for the user collection and its errors.
//!
//! The store is the only shared mutable state in the service. Adapters must
//! enforce email uniqueness themselves and report violations as
//! [`UserStoreError::DuplicateEmail`] so callers never have to inspect
//! backend-specific error codes. Writes hand back the record as the store
//! holds it, so callers never echo values the store did not keep.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::{Page, PageRequest};

use crate::domain::{SearchPattern, User, UserId, UserPatch};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user store adapters.
    pub enum UserStoreError {
        /// The store could not be reached.
        Connection { message: String } => "user store connection failed: {message}",
        /// A query or mutation failed during execution.
        Query { message: String } => "user store query failed: {message}",
        /// Another record already uses the email.
        DuplicateEmail => "email address is already registered",
    }
}

/// Which records a listing covers.
#[derive(Debug, Clone, PartialEq)]
pub enum UserFilter {
    /// Every record.
    All,
    /// Records where any user-supplied field matches the pattern.
    Matching(SearchPattern),
}

/// Persistence port for directory users.
///
/// Listings are always ordered newest first by `created_at`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Count the matching records and return the requested slice of them.
    async fn find_page(
        &self,
        filter: &UserFilter,
        request: PageRequest,
    ) -> Result<Page<User>, UserStoreError>;

    /// Every record, newest first.
    async fn find_all(&self) -> Result<Vec<User>, UserStoreError>;

    /// Fetch one record.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserStoreError>;

    /// Persist a new record and return it as stored.
    async fn insert(&self, user: &User) -> Result<User, UserStoreError>;

    /// Apply `patch` to one record in a single step, stamping `updated_at`
    /// with `now`. Only the fields present in the patch are written.
    /// Returns the stored result, or `None` when the record does not exist.
    async fn update(
        &self,
        id: &UserId,
        patch: &UserPatch,
        now: DateTime<Utc>,
    ) -> Result<Option<User>, UserStoreError>;

    /// Remove a record. Returns `false` when it did not exist.
    async fn delete(&self, id: &UserId) -> Result<bool, UserStoreError>;

    /// Whether the collection holds no records.
    async fn is_empty(&self) -> Result<bool, UserStoreError> {
        let probe = PageRequest::new(pagination::DEFAULT_PAGE, std::num::NonZeroU64::MIN);
        Ok(self.find_page(&UserFilter::All, probe).await?.total_items() == 0)
    }
}
