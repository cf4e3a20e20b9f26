//! error types for meshward-policy.
//!
//! only loading and validating a policy document can fail; compilation
//! never does.

use thiserror::Error;

/// errors that can occur while loading a policy.
#[derive(Debug, Error)]
pub enum Error {
    /// failed to parse json policy.
    #[error("failed to parse policy JSON: {0}")]
    ParseJson(#[from] serde_json::Error),

    /// the policy document exceeds the size limit.
    #[error("policy too large ({size} bytes, max {max})")]
    TooLarge {
        /// size of the rejected document in bytes.
        size: usize,
        /// the limit.
        max: usize,
    },

    /// an ssh rule failed validation.
    #[error("invalid ssh rule at index {index}: {cause}")]
    InvalidSshRule {
        /// the zero-based index of the invalid rule in the policy.
        index: usize,
        /// the specific validation error.
        cause: ValidationError,
    },

    /// a group key does not start with `group:`.
    #[error("invalid group name {0:?}: must start with 'group:'")]
    InvalidGroup(String),
}

/// validation errors for a single ssh rule.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// rule has no source aliases.
    #[error("src cannot be empty")]
    EmptySrc,

    /// rule has no destination aliases.
    #[error("dst cannot be empty")]
    EmptyDst,

    /// rule grants no login identities.
    #[error("users cannot be empty")]
    EmptySshUsers,

    /// check period is neither "always" nor a duration.
    #[error("invalid check period: {0:?}")]
    InvalidCheckPeriod(String),
}

/// result type for meshward-policy operations.
pub type Result<T> = std::result::Result<T, Error>;
