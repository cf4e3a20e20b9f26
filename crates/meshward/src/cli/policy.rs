//! the `policy` subcommand - work with policy files

use std::path::PathBuf;

use clap::{Args, Subcommand};
use color_eyre::eyre::{Context, Result};
use meshward_policy::AclPolicy;

/// work with policy files
#[derive(Subcommand, Debug)]
pub enum PolicyCommand {
    /// validate a policy file
    Check(CheckArgs),
}

/// validate a policy file
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// path to policy file (json format)
    pub file: PathBuf,
}

impl PolicyCommand {
    /// run the policy command
    pub fn run(self) -> Result<()> {
        match self {
            PolicyCommand::Check(args) => {
                println!("{}", check_policy(&args)?);
                Ok(())
            }
        }
    }
}

/// validate the policy file and summarise it.
pub fn check_policy(args: &CheckArgs) -> Result<String> {
    let policy_json = std::fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read policy file: {:?}", args.file))?;
    let policy = AclPolicy::from_json(&policy_json)
        .with_context(|| format!("invalid policy file: {:?}", args.file))?;

    Ok(format!(
        "Policy is valid ({} ssh rules, {} groups)",
        policy.ssh.len(),
        policy.groups.len()
    ))
}
