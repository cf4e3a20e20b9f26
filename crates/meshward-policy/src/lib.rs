//! acl policy handling and ssh policy compilation for meshward.
//!
//! an administrator writes an alias-based policy (users, groups, tags and
//! autogroups). this crate turns the `ssh` section of that policy into the
//! concrete per-node [`SshPolicy`](meshward_proto::SshPolicy) a destination
//! node uses to authorise incoming sessions.
//!
//! compilation is a pure function of the policy, the candidate source nodes
//! and the destination node. aliases that match nothing are not errors; they
//! simply contribute no principals.

#![warn(missing_docs)]

pub mod alias;
pub mod compiler;
pub mod error;
pub mod node;
pub mod policy;
pub mod recorder;
pub mod ssh;
pub mod string_set;
pub mod users;

pub use alias::Alias;
pub use compiler::SshPolicyCompiler;
pub use error::{Error, Result, ValidationError};
pub use node::{OwnedNode, SshNode, UserDirectory};
pub use policy::AclPolicy;
pub use ssh::{SshActionType, SshPolicyRule};
pub use string_set::StringSet;
