//! control protocol documents for meshward.
//!
//! this crate holds the serialisable shapes the control server hands to
//! nodes. field names follow the tailscale wire format so stock clients
//! can consume them.

#![warn(missing_docs)]

mod ssh;

pub use ssh::{SshAction, SshPolicy, SshPrincipal, SshRecorderFailureAction, SshRule};
