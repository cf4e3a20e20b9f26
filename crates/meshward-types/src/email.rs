//! validated email address type.
//!
//! user logins in policy documents are email addresses; validation is done
//! by the `email_address` crate.

use std::fmt;
use std::str::FromStr;

use email_address::EmailAddress;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// a validated email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(EmailAddress);

impl Email {
    /// parse and validate an email address.
    pub fn new(s: &str) -> Result<Self, EmailError> {
        EmailAddress::from_str(s)
            .map(Self)
            .map_err(|_| EmailError::Invalid(s.to_string()))
    }

    /// the address as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl<'de> Deserialize<'de> for Email {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Email::new(&s).map_err(serde::de::Error::custom)
    }
}

impl Serialize for Email {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// error type for email validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmailError {
    /// the string is not a valid address.
    #[error("invalid email format: {0:?}")]
    Invalid(String),
}
