//! Error types for the `juggler_pow` crate.
//!
//! The core has exactly two fallible entry points (spec §7): reading system
//! randomness for a new puzzle, and an invalid [`crate::params::Params`]
//! value. Everything else — in particular [`crate::verifier::check_solution`] —
//! returns a plain `bool`, never an `Err`: an invalid solution is not an
//! error condition, it's the expected outcome of checking untrusted input.

use thiserror::Error;

/// Canonical error for the crate's few fallible operations.
#[derive(Debug, Error)]
pub enum JugglerError {
    /// The OS random source could not be read (spec §4.5: fatal resource error).
    #[error("failed to read system randomness: {0}")]
    Randomness(#[from] rand::Error),

    /// A [`crate::params::Params`] value violates one of the structural
    /// invariants in spec §3 (e.g. `K · word_size >= 64` bytes).
    #[error("invalid parameters: {0}")]
    InvalidParams(&'static str),
}

/// Convenience alias for results that use [`JugglerError`].
pub type JugglerResult<T> = Result<T, JugglerError>;
