//! ssh policy documents delivered to destination nodes.
//!
//! the node evaluates `rules` top to bottom and acts on the first rule one
//! of whose principals matches the connecting address. only the fields the
//! policy compiler fills are modelled; everything is camelcase on the wire,
//! and unset flags and empty lists are left out.

use std::collections::BTreeMap;
use std::net::SocketAddr;

use serde::{Deserialize, Serialize};

/// the ssh policy of one destination node.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SshPolicy {
    /// rules in evaluation order.
    pub rules: Vec<SshRule>,
}

/// grants a set of source addresses some logins under one action.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SshRule {
    /// source addresses the rule applies to; never empty.
    pub principals: Vec<SshPrincipal>,

    /// requested login to granted login.
    ///
    /// `"*"` stands for any login and `"="` for "the requested name";
    /// an empty value refuses that login.
    pub ssh_users: BTreeMap<String, String>,

    /// what happens to a matching session.
    pub action: SshAction,
}

/// a source address allowed to use a rule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SshPrincipal {
    /// tailnet address of the source node.
    #[serde(rename = "nodeIP")]
    pub node_ip: String,
}

impl SshPrincipal {
    /// a principal matching a single source address.
    pub fn node_ip(ip: impl Into<String>) -> Self {
        Self { node_ip: ip.into() }
    }
}

/// outcome of a matching rule.
///
/// either `accept` is set or the session is held while `hold_and_delegate`
/// decides; the recording fields apply to both.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SshAction {
    /// start the session right away.
    #[serde(default, skip_serializing_if = "is_false")]
    pub accept: bool,

    /// allow `ssh -A`.
    #[serde(default, skip_serializing_if = "is_false")]
    pub allow_agent_forwarding: bool,

    /// allow `ssh -L`.
    #[serde(default, skip_serializing_if = "is_false")]
    pub allow_local_port_forwarding: bool,

    /// url the node asks for a verdict before the session starts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hold_and_delegate: Option<String>,

    /// banner shown to the connecting user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// endpoints the session transcript is streamed to.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recorders: Vec<SocketAddr>,

    /// set when recording is mandatory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_recording_failure: Option<SshRecorderFailureAction>,
}

fn is_false(flag: &bool) -> bool {
    !flag
}

impl SshAction {
    /// start the session immediately, with agent and local port forwarding.
    pub fn accept() -> Self {
        Self {
            accept: true,
            allow_agent_forwarding: true,
            allow_local_port_forwarding: true,
            ..Default::default()
        }
    }

    /// hold the session until `url` approves it.
    pub fn hold_and_delegate(url: impl Into<String>) -> Self {
        Self {
            hold_and_delegate: Some(url.into()),
            ..Default::default()
        }
    }
}

/// messages used to end a session whose mandatory recording failed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SshRecorderFailureAction {
    /// refuse the session with this message if recording cannot start.
    pub reject_session_with_message: String,

    /// end the session with this message if recording breaks mid-session.
    pub terminate_session_with_message: String,
}
