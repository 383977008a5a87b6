//! User directory use-cases.
//!
//! [`UserDirectoryService`] implements both driving ports on top of a
//! [`UserStore`] and a [`UserExportEncoder`]. It owns input validation, the
//! mapping of store failures onto the three error kinds clients see, and the
//! timestamps stamped on created and updated records.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use pagination::{Page, PageRequest};
use serde_json::json;
use tracing::{debug, info};

use super::ports::{
    UserExport, UserExportEncoder, UserExportError, UserFilter, UserStore, UserStoreError,
    UsersCommand, UsersQuery,
};
use super::{
    Error, SearchMode, SearchPattern, SearchPatternError, User, UserDraft, UserFields, UserId,
    UserPatch, UserValidationError,
};

/// Message returned when an id does not resolve to a user.
pub const USER_NOT_FOUND: &str = "User not found";

/// Message returned when a create or update collides on email.
pub const EMAIL_ALREADY_EXISTS: &str = "Email already exists";

/// Message returned when a delete succeeds.
pub const USER_DELETED: &str = "User deleted successfully";

fn map_store_error(error: UserStoreError) -> Error {
    match error {
        UserStoreError::DuplicateEmail => Error::invalid_request(EMAIL_ALREADY_EXISTS)
            .with_details(json!({ "field": "email", "code": "duplicate_email" })),
        other => Error::internal(other.to_string()),
    }
}

fn map_validation_error(error: &UserValidationError) -> Error {
    let fields: Vec<&str> = error.fields().iter().map(|field| field.as_str()).collect();
    Error::invalid_request(error.to_string()).with_details(json!({ "fields": fields }))
}

fn map_pattern_error(error: SearchPatternError) -> Error {
    match error {
        SearchPatternError::Empty => Error::invalid_request(error.to_string())
            .with_details(json!({ "field": "query", "code": "missing_field" })),
        SearchPatternError::Invalid { .. } => Error::internal(error.to_string()),
    }
}

fn map_export_error(error: UserExportError) -> Error {
    Error::internal(error.to_string())
}

/// Directory service wiring the store, the export encoder and a clock.
pub struct UserDirectoryService<S, E> {
    store: Arc<S>,
    encoder: Arc<E>,
    clock: Arc<dyn Clock>,
    search_mode: SearchMode,
}

impl<S, E> UserDirectoryService<S, E> {
    /// Build a service using regex search semantics.
    pub fn new(store: Arc<S>, encoder: Arc<E>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            encoder,
            clock,
            search_mode: SearchMode::default(),
        }
    }

    /// Choose how search queries are interpreted.
    #[must_use]
    pub fn with_search_mode(mut self, search_mode: SearchMode) -> Self {
        self.search_mode = search_mode;
        self
    }
}

impl<S, E> UserDirectoryService<S, E>
where
    S: UserStore,
{
    async fn load(&self, id: &UserId) -> Result<User, Error> {
        self.store
            .find_by_id(id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND))
    }
}

#[async_trait]
impl<S, E> UsersQuery for UserDirectoryService<S, E>
where
    S: UserStore,
    E: UserExportEncoder,
{
    async fn list_users(&self, request: PageRequest) -> Result<Page<User>, Error> {
        self.store
            .find_page(&UserFilter::All, request)
            .await
            .map_err(map_store_error)
    }

    async fn search_users(
        &self,
        query: Option<String>,
        request: PageRequest,
    ) -> Result<Page<User>, Error> {
        let pattern =
            SearchPattern::parse(query.as_deref(), self.search_mode).map_err(map_pattern_error)?;
        debug!(%pattern, page = request.page(), limit = request.limit(), "searching users");
        self.store
            .find_page(&UserFilter::Matching(pattern), request)
            .await
            .map_err(map_store_error)
    }

    async fn get_user(&self, id: &UserId) -> Result<User, Error> {
        self.load(id).await
    }

    async fn export_users(&self) -> Result<UserExport, Error> {
        let users = self.store.find_all().await.map_err(map_store_error)?;
        let bytes = self.encoder.encode(&users).map_err(map_export_error)?;
        info!(user_count = users.len(), "users exported");
        Ok(UserExport {
            file_name: self.encoder.file_name(),
            content_type: self.encoder.content_type(),
            bytes,
        })
    }
}

#[async_trait]
impl<S, E> UsersCommand for UserDirectoryService<S, E>
where
    S: UserStore,
    E: UserExportEncoder,
{
    async fn create_user(&self, fields: UserFields) -> Result<User, Error> {
        let draft =
            UserDraft::try_from_fields(fields).map_err(|err| map_validation_error(&err))?;
        let user = User::create(draft, self.clock.utc());
        let stored = self.store.insert(&user).await.map_err(map_store_error)?;
        info!(user_id = %stored.id, "user created");
        Ok(stored)
    }

    async fn update_user(&self, id: &UserId, fields: UserFields) -> Result<User, Error> {
        let patch = UserPatch::try_from_fields(fields).map_err(|err| map_validation_error(&err))?;
        let user = self
            .store
            .update(id, &patch, self.clock.utc())
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND))?;
        info!(user_id = %user.id, "user updated");
        Ok(user)
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), Error> {
        let deleted = self.store.delete(id).await.map_err(map_store_error)?;
        if !deleted {
            return Err(Error::not_found(USER_NOT_FOUND));
        }
        info!(user_id = %id, "user deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "user_directory_service_tests.rs"]
mod tests;
