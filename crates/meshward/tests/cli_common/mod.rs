//! shared test utilities for cli tests

#![allow(dead_code)] // Test utilities may not all be used in every test file

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, bail};
use meshward::cli::{Cli, Command};
use meshward_proto::SshPolicy;
use tempfile::TempDir;

/// users and nodes shared by the cli tests.
///
/// alice owns `laptop` and `alice-desktop`, bob owns `bob-laptop`,
/// `prod-1` is tagged prod and `recorder-1` is tagged recorder.
pub const SNAPSHOT: &str = r#"{
    "users": [
        {"id": 1, "name": "alice", "email": "alice@example.com"},
        {"id": 2, "name": "bob", "email": "bob@example.com"}
    ],
    "nodes": [
        {"id": 1, "hostname": "laptop", "ipv4": "100.64.0.1", "user_id": 1},
        {"id": 2, "hostname": "bob-laptop", "ipv4": "100.64.0.2", "user_id": 2},
        {"id": 3, "hostname": "prod-1", "ipv4": "100.64.0.3", "tags": ["tag:prod"]},
        {"id": 4, "hostname": "recorder-1", "ipv4": "100.64.0.4", "tags": ["tag:recorder"]},
        {"id": 5, "hostname": "alice-desktop", "ipv4": "100.64.0.5", "user_id": 1}
    ]
}"#;

/// a policy with an accept rule, a check rule and an autogroup:self rule.
pub const POLICY: &str = r#"{
    "groups": {"group:eng": ["alice@example.com"]},
    "ssh": [
        {
            "action": "accept",
            "src": ["group:eng"],
            "dst": ["tag:prod"],
            "users": ["autogroup:nonroot"]
        },
        {
            "action": "check",
            "src": ["bob@example.com"],
            "dst": ["tag:prod"],
            "users": ["root"],
            "checkPeriod": "12h"
        },
        {
            "action": "accept",
            "src": ["autogroup:member"],
            "dst": ["autogroup:self"],
            "users": ["autogroup:nonroot", "root"]
        }
    ]
}"#;

/// a temp directory holding policy, snapshot and config files.
pub struct CliFixture {
    dir: TempDir,
}

impl CliFixture {
    /// create a fixture with the shared snapshot and an empty config.
    pub fn new(policy: &str) -> Self {
        let fixture = Self {
            dir: TempDir::new().unwrap(),
        };
        fixture.write("policy.json", policy);
        fixture.write("nodes.json", SNAPSHOT);
        fixture.write("config.toml", "");
        fixture
    }

    /// write a file into the fixture directory.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    /// path of a file in the fixture directory.
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// run `meshward ssh-policy` for `node` and return its output.
    pub fn ssh_policy(&self, node: &str, extra: &[&str]) -> Result<String> {
        let policy = self.path("policy.json");
        let nodes = self.path("nodes.json");
        let config = self.path("config.toml");

        let mut args: Vec<&str> = vec![
            "meshward",
            "ssh-policy",
            "--policy",
            policy.to_str().unwrap(),
            "--nodes",
            nodes.to_str().unwrap(),
            "--config",
            config.to_str().unwrap(),
            "--node",
            node,
        ];
        args.extend_from_slice(extra);

        match Cli::try_parse_from(args)?.command {
            Command::SshPolicy(cmd) => cmd.render(),
            other => bail!("unexpected command: {:?}", other),
        }
    }

    /// run `meshward ssh-policy` for `node` and parse the json output.
    pub fn compile(&self, node: &str) -> SshPolicy {
        let output = self.ssh_policy(node, &[]).unwrap();
        serde_json::from_str(&output).unwrap()
    }
}
