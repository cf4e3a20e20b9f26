//! configuration types for meshward

use serde::{Deserialize, Serialize};

/// main configuration for meshward.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// ssh policy compilation settings.
    pub ssh: SshConfig,
}

/// ssh policy compilation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SshConfig {
    /// port session recorders listen on.
    pub recorder_port: u16,

    /// prefix of the hold-and-delegate url used by "check" rules.
    ///
    /// the full url is `<prefix>/$SRC_NODE_ID/to/$DST_NODE_ID/<check period>`;
    /// the `$` placeholders are expanded by the client.
    pub check_url_prefix: String,

    /// banner shown to the user when a session is recorded.
    pub recording_message: String,

    /// shown when recording fails to start and enforcement is on.
    pub reject_message: String,

    /// shown when recording fails mid-session and enforcement is on.
    pub terminate_message: String,
}

impl Default for SshConfig {
    fn default() -> Self {
        Self {
            recorder_port: 80,
            check_url_prefix: "https://unused/machine/ssh/action".to_string(),
            recording_message: "# This session is being recorded.\n".to_string(),
            reject_message: "# Session rejected: failed to start session recording."
                .to_string(),
            terminate_message: "# Session terminated: failed to record session.".to_string(),
        }
    }
}

impl SshConfig {
    /// build the hold-and-delegate url for a check period.
    pub fn check_url(&self, period: &str) -> String {
        format!(
            "{}/$SRC_NODE_ID/to/$DST_NODE_ID/{}",
            self.check_url_prefix.trim_end_matches('/'),
            period
        )
    }
}
