//! cli subcommands for meshward.
//!
//! - `meshward ssh-policy` - compile the ssh policy for one node
//! - `meshward policy check` - validate a policy file

pub mod policy;
pub mod ssh_policy;

pub use policy::PolicyCommand;
pub use ssh_policy::SshPolicyCommand;

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::Result;
use serde::Serialize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// meshward - self-hosted mesh network coordination
#[derive(Parser, Debug)]
#[command(name = "meshward")]
#[command(about = "Self-hosted mesh network coordination server tooling", long_about = None)]
#[command(version)]
pub struct Cli {
    /// log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "MESHWARD_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// the command to run
    #[command(subcommand)]
    pub command: Command,
}

/// top-level commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// compile the ssh policy delivered to a node
    SshPolicy(SshPolicyCommand),

    /// work with policy files
    #[command(subcommand)]
    Policy(PolicyCommand),
}

/// output format for documents printed to stdout
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// pretty-printed json
    #[default]
    Json,
    /// yaml
    Yaml,
}

impl OutputFormat {
    /// render `value` in this format.
    pub fn render<T: Serialize>(self, value: &T) -> Result<String> {
        Ok(match self {
            OutputFormat::Json => serde_json::to_string_pretty(value)?,
            OutputFormat::Yaml => serde_yaml::to_string(value)?,
        })
    }
}

/// parse a log level name; unknown names fall back to warn.
pub fn parse_log_level(level: Option<&str>) -> Level {
    match level.map(str::to_lowercase).as_deref() {
        Some("trace") => Level::TRACE,
        Some("debug") => Level::DEBUG,
        Some("info") => Level::INFO,
        Some("error") => Level::ERROR,
        _ => Level::WARN,
    }
}

/// install the global tracing subscriber.
///
/// logs go to stderr so stdout carries only command output.
pub fn init_logging(level: Option<&str>) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(parse_log_level(level))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
