//! Backend entry-point: loads settings, prepares the store and serves the
//! REST API with OpenAPI docs.

mod server;

use std::ffi::OsString;
use std::io;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use directory_backend::inbound::http::health::HealthState;
use directory_backend::outbound::memory::InMemoryUserStore;
use directory_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use directory_backend::settings::ServerSettings;
use server::{ServerConfig, StoreBackend, build_ports, create_server};

async fn connect_store(settings: &ServerSettings) -> io::Result<StoreBackend> {
    let Some(database_url) = settings.database_url() else {
        warn!("no database URL configured; users are kept in memory");
        return Ok(StoreBackend::InMemory(InMemoryUserStore::new()));
    };

    let applied = run_pending_migrations(database_url)
        .await
        .map_err(io::Error::other)?;
    info!(applied, "database schema up to date");

    let config = PoolConfig::new(database_url).with_max_size(settings.db_max_connections());
    let pool = DbPool::new(config).await.map_err(io::Error::other)?;
    Ok(StoreBackend::Postgres(pool))
}

#[cfg(feature = "example-data")]
async fn seed_store(ports: &server::DirectoryPorts) -> io::Result<()> {
    use directory_backend::example_data::{ExampleDataSettings, seed_example_data_on_startup};
    use mockable::DefaultClock;

    // Seeding is configured from the environment only.
    let settings = ExampleDataSettings::load_from_iter(std::env::args_os().take(1))
        .map_err(|err| io::Error::other(err.to_string()))?;
    seed_example_data_on_startup(&settings, ports.store.as_ref(), &DefaultClock)
        .await
        .map_err(io::Error::other)?;
    Ok(())
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args: Vec<OsString> = std::env::args_os().collect();
    let settings =
        ServerSettings::load_from_iter(args).map_err(|err| io::Error::other(err.to_string()))?;
    let bind_addr = settings.bind_addr().map_err(io::Error::other)?;
    let search_mode = settings.search_mode().map_err(io::Error::other)?;

    let store = connect_store(&settings).await?;
    let config = ServerConfig::new(bind_addr, store).with_search_mode(search_mode);
    let ports = build_ports(&config);

    #[cfg(feature = "example-data")]
    seed_store(&ports).await?;

    info!(%bind_addr, ?search_mode, "starting user directory server");
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), &config, ports.http_state)?;
    let result = server.await;
    health_state.mark_unhealthy();
    result
}
