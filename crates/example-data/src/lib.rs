//! Deterministic example directory users for demonstrations.
//!
//! The generator is seeded, so the same `(seed, count)` pair always yields
//! the same users. Every generated record has all five fields populated,
//! satisfies the directory's email and phone formats, and carries an email
//! that is unique within the batch.
//!
//! The crate is independent of backend domain types; callers convert
//! [`ExampleUser`] into whatever input type their store expects.
//!
//! # Example
//!
//! ```
//! use example_data::{generate_example_users, is_valid_email, is_valid_phone};
//!
//! let users = generate_example_users(42, 5).expect("generation succeeds");
//! assert_eq!(users.len(), 5);
//! assert!(users.iter().all(|user| is_valid_email(&user.email)));
//! assert!(users.iter().all(|user| is_valid_phone(&user.phone)));
//! assert_eq!(users, generate_example_users(42, 5).expect("generation succeeds"));
//! ```

mod error;
mod generator;
mod seed;
mod validation;

pub use error::GenerationError;
pub use generator::{EXAMPLE_ROLES, generate_example_users};
pub use seed::ExampleUser;
pub use validation::{is_valid_email, is_valid_phone};
