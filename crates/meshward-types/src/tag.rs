//! validated tag type.
//!
//! a tag is the identity of an automation node. tagged nodes are never
//! treated as belonging to the user who registered them.
//!
//! tags must:
//! - start with "tag:"
//! - have a name of 1-50 lowercase alphanumeric characters (hyphens/underscores allowed)

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// the prefix every tag carries.
pub const TAG_PREFIX: &str = "tag:";

/// maximum length for a tag name (after the "tag:" prefix).
pub const MAX_TAG_NAME_LEN: usize = 50;

/// maximum number of tags per node.
pub const MAX_TAGS: usize = 100;

/// a validated tag string.
///
/// # Example
/// ```
/// use meshward_types::Tag;
///
/// let tag: Tag = "tag:prod".parse().unwrap();
/// assert_eq!(tag.name(), "prod");
/// assert_eq!(tag, "tag:prod");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag(String);

impl Tag {
    /// create a new tag, validating the format.
    pub fn new(s: impl Into<String>) -> Result<Self, TagError> {
        let s = s.into();
        validate(&s)?;
        Ok(Self(s))
    }

    /// the full tag string, e.g. "tag:prod".
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// the name portion, e.g. "prod" for "tag:prod".
    pub fn name(&self) -> &str {
        &self.0[TAG_PREFIX.len()..]
    }
}

fn validate(s: &str) -> Result<(), TagError> {
    let name = s.strip_prefix(TAG_PREFIX).ok_or(TagError::MissingPrefix)?;

    if name.is_empty() {
        return Err(TagError::EmptyName);
    }
    if name.len() > MAX_TAG_NAME_LEN {
        return Err(TagError::NameTooLong(name.len()));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
    {
        return Err(TagError::InvalidCharacters);
    }

    Ok(())
}

impl AsRef<str> for Tag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Tag {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Tag {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Tag {
    type Err = TagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl<'de> Deserialize<'de> for Tag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Tag::new(s).map_err(serde::de::Error::custom)
    }
}

impl Serialize for Tag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

/// error type for tag validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagError {
    /// tag must start with "tag:".
    #[error("tag must start with 'tag:'")]
    MissingPrefix,
    /// tag name cannot be empty.
    #[error("tag name cannot be empty")]
    EmptyName,
    /// tag name exceeds maximum length.
    #[error("tag name too long ({0} chars, max {MAX_TAG_NAME_LEN})")]
    NameTooLong(usize),
    /// tag name contains invalid characters.
    #[error("tag name must be lowercase alphanumeric with hyphens or underscores")]
    InvalidCharacters,
}
