//! User directory backend: a REST service for listing, searching, editing
//! and exporting directory users.
//!
//! Layout follows a hexagonal split:
//! - [`domain`]: records, validation, ports and the directory service.
//! - [`inbound`]: Actix HTTP handlers over the driving ports.
//! - [`outbound`]: PostgreSQL, in-memory and CSV adapters.

pub mod doc;
pub mod domain;
#[cfg(feature = "example-data")]
pub mod example_data;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
