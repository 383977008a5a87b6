//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod user_export_encoder;
mod user_store;
mod users_command;
mod users_query;

#[cfg(test)]
pub use user_export_encoder::MockUserExportEncoder;
pub use user_export_encoder::{UserExportEncoder, UserExportError};
#[cfg(test)]
pub use user_store::MockUserStore;
pub use user_store::{UserFilter, UserStore, UserStoreError};
#[cfg(test)]
pub use users_command::MockUsersCommand;
pub use users_command::UsersCommand;
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::{UserExport, UsersQuery};
