//! In-process adapters used when no external store is configured.

mod in_memory_user_store;

pub use in_memory_user_store::InMemoryUserStore;
