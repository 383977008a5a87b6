//! Server configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `DIRECTORY_*` environment variables and
//! configuration files, in that order of precedence.

use std::net::{SocketAddr, ToSocketAddrs};

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::SearchMode;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Invalid configuration values.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Host and port do not resolve to a socket address.
    #[error("cannot bind to {host}:{port}: {source}")]
    BindAddress {
        host: String,
        port: u16,
        #[source]
        source: std::io::Error,
    },
    /// `search_mode` is neither `regex` nor `literal`.
    #[error("invalid search mode: {0}")]
    SearchMode(String),
}

/// Settings for the directory HTTP server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DIRECTORY")]
pub struct ServerSettings {
    /// Interface to bind; defaults to every IPv4 interface.
    pub host: Option<String>,
    /// TCP port; defaults to 5000.
    pub port: Option<u16>,
    /// PostgreSQL connection string. Without one the server keeps users in
    /// memory for the lifetime of the process.
    pub database_url: Option<String>,
    /// `regex` (default) or `literal`.
    pub search_mode: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
}

impl ServerSettings {
    pub fn host(&self) -> &str {
        self.host
            .as_deref()
            .map(str::trim)
            .filter(|host| !host.is_empty())
            .unwrap_or(DEFAULT_HOST)
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Resolve the listening address.
    ///
    /// # Errors
    /// [`SettingsError::BindAddress`] when the host does not resolve.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let host = self.host();
        let port = self.port();
        let bind_error = |source| SettingsError::BindAddress {
            host: host.to_owned(),
            port,
            source,
        };
        (host, port)
            .to_socket_addrs()
            .map_err(bind_error)?
            .next()
            .ok_or_else(|| {
                bind_error(std::io::Error::new(
                    std::io::ErrorKind::AddrNotAvailable,
                    "no addresses resolved",
                ))
            })
    }

    /// The configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// How search queries are interpreted.
    ///
    /// # Errors
    /// [`SettingsError::SearchMode`] for unknown values.
    pub fn search_mode(&self) -> Result<SearchMode, SettingsError> {
        self.search_mode
            .as_deref()
            .map_or(Ok(SearchMode::default()), str::parse)
            .map_err(SettingsError::SearchMode)
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }
}
