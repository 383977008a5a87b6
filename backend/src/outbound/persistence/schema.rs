//! Diesel table definitions for the PostgreSQL schema.
//!
//! Must match `backend/migrations` exactly; regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Directory users. `email` carries a unique constraint.
    users (id) {
        /// Primary key: UUID v4 assigned by the service.
        id -> Uuid,
        /// Full name.
        name -> Varchar,
        /// Contact email, unique across the table.
        email -> Varchar,
        /// Contact phone number.
        phone -> Varchar,
        /// Postal address.
        address -> Varchar,
        /// Free-text role label.
        role -> Varchar,
        /// Creation timestamp; listings sort on it descending.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}
