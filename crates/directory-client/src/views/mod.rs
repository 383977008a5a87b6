//! View models for the client screens.
//!
//! Views hold their own state and notices and return the route to move to
//! instead of navigating themselves; the shell decides what to show next.

pub mod detail;
pub mod form;
pub mod list;
pub mod table;

pub use detail::DetailView;
pub use form::{FormMode, FormView};
pub use list::{AssumeYes, ConfirmDelete, ListView, ListViewState};
