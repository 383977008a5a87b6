//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod health;
pub mod state;
pub mod users;
pub mod users_dto;
pub mod validation;

pub use error::ApiResult;
