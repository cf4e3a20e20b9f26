//! core types for meshward - a self-hosted coordination server for a mesh overlay network.
//!
//! this crate provides the data structures shared by the policy compiler and the cli:
//! - [`Node`]: a member device of the tailnet
//! - [`User`]: an identity that can own nodes
//! - [`Tag`]: a validated `tag:<name>` identity for automation nodes
//! - [`Config`]: compiler configuration

mod config;
mod email;
mod error;
mod node;
mod tag;
pub mod test_utils;
mod user;

pub use config::{Config, SshConfig};
pub use email::{Email, EmailError};
pub use error::Error;
pub use node::{Node, NodeId};
pub use tag::{MAX_TAG_NAME_LEN, MAX_TAGS, Tag, TagError};
pub use user::{User, UserId};

/// result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;
