//! Port for serialising users into a downloadable export.

use crate::domain::User;

use super::define_port_error;

define_port_error! {
    /// Errors raised while encoding an export.
    pub enum UserExportError {
        /// Writing or flushing the output failed.
        Write { message: String } => "failed to write export: {message}",
    }
}

/// Encodes an ordered list of users into file bytes.
#[cfg_attr(test, mockall::automock)]
pub trait UserExportEncoder: Send + Sync {
    /// File name offered to the client.
    fn file_name(&self) -> &'static str;

    /// MIME type of the encoded output.
    fn content_type(&self) -> &'static str;

    /// Encode `users`, preserving their order.
    fn encode(&self, users: &[User]) -> Result<Vec<u8>, UserExportError>;
}
