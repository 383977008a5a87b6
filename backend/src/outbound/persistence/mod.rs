//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! This module provides the database-backed [`UserStore`] implementation,
//! using `diesel-async` for async queries and `bb8` for connection pooling.
//!
//! - **Thin adapters**: the store only translates between Diesel rows and
//!   domain types. No business logic resides here.
//! - **Internal models**: row structs (`models.rs`) and the table definition
//!   (`schema.rs`) never leave this module.
//! - **Strongly typed errors**: driver failures are mapped onto
//!   [`UserStoreError`].
//!
//! # Example
//!
//! ```ignore
//! use directory_backend::outbound::persistence::{DbPool, DieselUserStore, PoolConfig};
//!
//! let config = PoolConfig::new("postgres://localhost/directory");
//! let pool = DbPool::new(config).await?;
//! let store = DieselUserStore::new(pool);
//! ```
//!
//! [`UserStore`]: crate::domain::ports::UserStore
//! [`UserStoreError`]: crate::domain::ports::UserStoreError

mod diesel_user_store;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_user_store::DieselUserStore;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
