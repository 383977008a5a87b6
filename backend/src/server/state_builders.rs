//! Builders wiring the configured store into the directory service.

use std::sync::Arc;

use mockable::DefaultClock;

use directory_backend::domain::UserDirectoryService;
use directory_backend::domain::ports::UserStore;
use directory_backend::inbound::http::state::HttpState;
use directory_backend::outbound::export::CsvUserExportEncoder;
use directory_backend::outbound::persistence::DieselUserStore;

use super::{ServerConfig, StoreBackend};

/// Handler state plus direct store access for startup tasks such as seeding.
pub struct DirectoryPorts {
    pub http_state: HttpState,
    pub store: Arc<dyn UserStore>,
}

fn ports_for<S>(store: Arc<S>, config: &ServerConfig) -> DirectoryPorts
where
    S: UserStore + 'static,
{
    let service = Arc::new(
        UserDirectoryService::new(
            Arc::clone(&store),
            Arc::new(CsvUserExportEncoder),
            Arc::new(DefaultClock),
        )
        .with_search_mode(config.search_mode),
    );
    DirectoryPorts {
        http_state: HttpState::new(service.clone(), service),
        store,
    }
}

/// Build the ports for whichever store the configuration selects.
pub fn build_ports(config: &ServerConfig) -> DirectoryPorts {
    match &config.store {
        StoreBackend::Postgres(pool) => {
            ports_for(Arc::new(DieselUserStore::new(pool.clone())), config)
        }
        StoreBackend::InMemory(store) => ports_for(Arc::new(store.clone()), config),
    }
}
