//! the `ssh-policy` subcommand - compile the ssh policy for one node

use std::path::PathBuf;

use clap::Args;
use color_eyre::eyre::{Context, Result};
use meshward_policy::{AclPolicy, SshPolicyCompiler};
use meshward_types::Config;
use tracing::{debug, info};

use super::OutputFormat;
use crate::config::load_config;
use crate::snapshot::Snapshot;

/// compile the ssh policy delivered to a node
#[derive(Args, Debug)]
pub struct SshPolicyCommand {
    /// path to policy file (json)
    #[arg(long, env = "MESHWARD_POLICY_FILE")]
    policy: PathBuf,

    /// path to node/user snapshot (json)
    #[arg(long, env = "MESHWARD_NODES_FILE")]
    nodes: PathBuf,

    /// destination node id or hostname
    #[arg(long)]
    node: String,

    /// path to config file (toml format)
    #[arg(short, long, env = "MESHWARD_CONFIG")]
    config: Option<PathBuf>,

    /// output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    output: OutputFormat,

    /// port session recorders listen on
    #[arg(long, env = "MESHWARD_SSH_RECORDER_PORT")]
    recorder_port: Option<u16>,

    /// prefix of the hold-and-delegate url for check rules
    #[arg(long, env = "MESHWARD_SSH_CHECK_URL_PREFIX")]
    check_url_prefix: Option<String>,
}

impl SshPolicyCommand {
    /// merge defaults, the config file and cli flags.
    ///
    /// priority order: defaults -> config file -> cli flags
    fn config(&self) -> Result<Config> {
        let mut config = load_config(self.config.as_deref())?;

        if let Some(port) = self.recorder_port {
            config.ssh.recorder_port = port;
        }
        if let Some(prefix) = &self.check_url_prefix {
            config.ssh.check_url_prefix = prefix.clone();
        }

        Ok(config)
    }

    /// compile and render the policy without printing it.
    pub fn render(&self) -> Result<String> {
        let config = self.config()?;

        let policy_json = std::fs::read_to_string(&self.policy)
            .with_context(|| format!("failed to read policy file: {:?}", self.policy))?;
        let policy = AclPolicy::from_json(&policy_json)
            .with_context(|| format!("invalid policy file: {:?}", self.policy))?;
        debug!(
            ssh_rules = policy.ssh.len(),
            groups = policy.groups.len(),
            "loaded policy"
        );

        let snapshot = Snapshot::from_file(&self.nodes)?;
        let compiler = SshPolicyCompiler::with_config(policy, config.ssh);
        let ssh_policy = snapshot.compile_for(&compiler, &self.node)?;

        info!(
            node = %self.node,
            rules = ssh_policy.rules.len(),
            "compiled ssh policy"
        );
        self.output.render(&ssh_policy)
    }

    /// run the ssh-policy command
    pub fn run(self) -> Result<()> {
        println!("{}", self.render()?);
        Ok(())
    }
}
