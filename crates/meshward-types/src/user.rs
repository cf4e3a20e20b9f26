//! user type representing an identity that can own nodes.

use serde::{Deserialize, Serialize};

use crate::email::Email;

/// unique identifier for a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl From<u64> for UserId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// a meshward user.
///
/// users own untagged nodes. policy documents refer to a user by login,
/// which is the email when one is set and the name otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// unique identifier.
    pub id: UserId,

    /// username, used as the login when no email is set.
    pub name: String,

    /// email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<Email>,
}

impl User {
    /// create a new user with the given name.
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: None,
        }
    }

    /// set the email address.
    pub fn with_email(mut self, email: Email) -> Self {
        self.email = Some(email);
        self
    }

    /// the login used when matching policy aliases.
    ///
    /// priority: email > name.
    pub fn login(&self) -> &str {
        match &self.email {
            Some(email) => email.as_str(),
            None => &self.name,
        }
    }

    /// whether `login` names this user.
    pub fn is(&self, login: &str) -> bool {
        !login.is_empty() && self.login() == login
    }
}
