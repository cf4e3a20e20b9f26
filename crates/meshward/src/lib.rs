//! meshward library - cli commands and tailnet snapshot loading.
//!
//! - [`cli`]: command-line interface implementation
//! - [`config`]: config file discovery and loading
//! - [`snapshot`]: node and user snapshots fed to the ssh policy compiler

#![warn(missing_docs)]

pub mod cli;
pub mod config;
pub mod snapshot;

pub use snapshot::Snapshot;
