//! Terminal client for the user directory.
//!
//! The crate mirrors the directory's screens as view models: a paginated and
//! searchable list, a create/edit form and a read-only detail page. Views
//! talk to the server through the [`api::DirectoryApi`] port; the
//! [`api::HttpDirectoryApi`] adapter speaks the REST API with `reqwest`.
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use directory_client::api::{DEFAULT_API_URL, HttpDirectoryApi};
//! use directory_client::views::ListView;
//!
//! # async fn run() -> Result<(), directory_client::ClientError> {
//! let api = Arc::new(HttpDirectoryApi::new(DEFAULT_API_URL, Duration::from_secs(10))?);
//! let mut list = ListView::new(api);
//! list.load().await;
//! assert!(!list.state().loading);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod error;
pub mod model;
pub mod notice;
pub mod routes;
pub mod views;

pub use error::ClientError;
