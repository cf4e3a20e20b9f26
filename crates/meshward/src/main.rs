//! meshward - self-hosted coordination server tooling

use clap::Parser;
use color_eyre::eyre::Result;
use meshward::cli::{Cli, Command, init_logging};

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref())?;

    match cli.command {
        Command::SshPolicy(cmd) => cmd.run(),
        Command::Policy(cmd) => cmd.run(),
    }
}
