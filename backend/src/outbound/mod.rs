//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed store using Diesel ORM
//! - **memory**: process-local store used when no database is configured
//! - **export**: CSV encoding of the directory
//!
//! Adapters are thin translators between domain types and their
//! infrastructure representations. They contain no business logic.

pub mod export;
pub mod memory;
pub mod persistence;
