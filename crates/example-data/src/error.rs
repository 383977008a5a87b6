//! Error types for example user generation.

use thiserror::Error;

/// Failures producing an example batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// No usable name came out of the faker within the retry budget.
    #[error("failed to generate a usable name after {max_attempts} attempts")]
    NameGenerationFailed {
        /// Attempts made before giving up.
        max_attempts: usize,
    },

    /// A unique email could not be derived within the retry budget.
    #[error("failed to generate a unique email after {max_attempts} attempts")]
    EmailGenerationFailed {
        /// Attempts made before giving up.
        max_attempts: usize,
    },
}
