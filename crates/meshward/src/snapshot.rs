//! a point-in-time view of the tailnet's users and nodes.
//!
//! the control server hands the compiler the node list it already has
//! loaded; the cli reads the same shape from a json file.

use std::path::Path;

use color_eyre::eyre::{Context, Result, eyre};
use meshward_policy::{OwnedNode, SshPolicyCompiler, UserDirectory};
use meshward_proto::SshPolicy;
use meshward_types::{Node, User};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// users and nodes of a tailnet.
///
/// ```json
/// {
///   "users": [{"id": 1, "name": "alice", "email": "alice@example.com"}],
///   "nodes": [{"id": 1, "hostname": "laptop", "ipv4": "100.64.0.1", "user_id": 1}]
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    /// all users.
    #[serde(default)]
    pub users: Vec<User>,
    /// all nodes.
    #[serde(default)]
    pub nodes: Vec<Node>,
}

impl Snapshot {
    /// parse a snapshot from json and check every node.
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: Snapshot = serde_json::from_str(json).context("invalid snapshot JSON")?;
        for node in &snapshot.nodes {
            node.validate()
                .with_context(|| format!("invalid node {:?}", node.hostname()))?;
        }
        snapshot.warn_unknown_owners();
        Ok(snapshot)
    }

    /// read a snapshot file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read snapshot file: {:?}", path))?;
        Self::from_json(&json).with_context(|| format!("failed to load snapshot: {:?}", path))
    }

    fn warn_unknown_owners(&self) {
        for node in &self.nodes {
            if let Some(user_id) = node.user_id()
                && !self.users.iter().any(|u| u.id == user_id)
            {
                warn!(
                    node_id = %node.id(),
                    %user_id,
                    "node owner not found in snapshot, treating node as unowned"
                );
            }
        }
    }

    /// find a node by id or hostname.
    pub fn find_node(&self, selector: &str) -> Result<&Node> {
        let by_id = selector.parse::<u64>().ok();
        self.nodes
            .iter()
            .find(|n| Some(n.id().as_u64()) == by_id || n.hostname() == selector)
            .ok_or_else(|| eyre!("node not found: {}", selector))
    }

    /// compile the ssh policy for the node matching `selector`.
    ///
    /// every other node in the snapshot is a candidate source.
    pub fn compile_for(&self, compiler: &SshPolicyCompiler, selector: &str) -> Result<SshPolicy> {
        let dst = self.find_node(selector)?;
        let users = UserDirectory::new(self.users.iter().cloned());

        let srcs: Vec<OwnedNode<'_>> = self
            .nodes
            .iter()
            .filter(|n| n.id() != dst.id())
            .map(|n| users.owned(n))
            .collect();

        debug!(
            node_id = %dst.id(),
            sources = srcs.len(),
            rules = compiler.policy().ssh.len(),
            "compiling ssh policy"
        );
        Ok(compiler.compile(&srcs, &users.owned(dst)))
    }
}
