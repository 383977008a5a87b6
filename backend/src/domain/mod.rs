//! Domain primitives, ports, and use-cases for the user directory.
//!
//! Purpose: keep directory rules (validation, uniqueness, ordering, error
//! kinds) independent of HTTP and of the storage engine. Inbound adapters
//! talk to the driving ports in [`ports`]; outbound adapters implement the
//! driven ones.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic error payload.
//! - User, UserId, UserDraft, UserPatch, UserFields: the directory record and
//!   its validated inputs.
//! - SearchMode / SearchPattern: how search queries become patterns.
//! - UserDirectoryService: implementation of the driving ports.
//! - TraceId: request correlation identifier.

pub mod error;
pub mod ports;
pub mod search;
pub mod trace_id;
pub mod user;
pub mod user_directory_service;

pub use self::error::{Error, ErrorCode};
pub use self::search::{SearchMode, SearchPattern, SearchPatternError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{User, UserDraft, UserField, UserFields, UserId, UserPatch, UserValidationError};
pub use self::user_directory_service::{
    EMAIL_ALREADY_EXISTS, USER_DELETED, USER_NOT_FOUND, UserDirectoryService,
};

/// Convenient result alias for use-case outcomes.
pub type ApiResult<T> = Result<T, Error>;
