//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{UsersCommand, UsersQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UsersQuery>,
    pub commands: Arc<dyn UsersCommand>,
}

impl HttpState {
    /// Bundle the read and write ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use directory_backend::domain::UserDirectoryService;
    /// use directory_backend::inbound::http::state::HttpState;
    /// use directory_backend::outbound::export::CsvUserExportEncoder;
    /// use directory_backend::outbound::memory::InMemoryUserStore;
    /// use mockable::DefaultClock;
    ///
    /// let service = Arc::new(UserDirectoryService::new(
    ///     Arc::new(InMemoryUserStore::new()),
    ///     Arc::new(CsvUserExportEncoder),
    ///     Arc::new(DefaultClock),
    /// ));
    /// let state = HttpState::new(service.clone(), service);
    /// let _users = state.users.clone();
    /// ```
    pub fn new(users: Arc<dyn UsersQuery>, commands: Arc<dyn UsersCommand>) -> Self {
        Self { users, commands }
    }
}
