//! error types for meshward-types.

use thiserror::Error;

/// invariant violations in loaded domain values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// a node carries more tags than allowed.
    #[error("too many tags ({0}, max {max})", max = crate::tag::MAX_TAGS)]
    TooManyTags(usize),

    /// a node lists the same tag twice.
    #[error("duplicate tag {0:?}")]
    DuplicateTag(String),
}
