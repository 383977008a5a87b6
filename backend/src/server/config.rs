//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use directory_backend::domain::SearchMode;
use directory_backend::outbound::memory::InMemoryUserStore;
use directory_backend::outbound::persistence::DbPool;

/// Where user records live.
#[derive(Clone)]
pub enum StoreBackend {
    /// PostgreSQL through the shared connection pool.
    Postgres(DbPool),
    /// Process-local storage; data is lost on exit.
    InMemory(InMemoryUserStore),
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) store: StoreBackend,
    pub(crate) search_mode: SearchMode,
}

impl ServerConfig {
    /// Configuration using regex search over `store`.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, store: StoreBackend) -> Self {
        Self {
            bind_addr,
            store,
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
