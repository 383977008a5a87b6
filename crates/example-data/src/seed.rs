//! Generated user record.

use serde::{Deserialize, Serialize};

/// A generated example directory user.
///
/// # Example
///
/// ```
/// use example_data::ExampleUser;
///
/// let user = ExampleUser {
///     name: "Ada Lovelace".to_owned(),
///     email: "ada.lovelace@example.com".to_owned(),
///     phone: "+1 (555) 010-2030".to_owned(),
///     address: "12 Analytical Row, London".to_owned(),
///     role: "Admin".to_owned(),
/// };
///
/// assert_eq!(user.role, "Admin");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExampleUser {
    /// Full name.
    pub name: String,
    /// Contact email, unique within a generated batch.
    pub email: String,
    /// Phone number built from digits, spaces, `+`, `-` and parentheses.
    pub phone: String,
    /// Single-line postal address.
    pub address: String,
    /// One of [`crate::EXAMPLE_ROLES`].
    pub role: String,
}
