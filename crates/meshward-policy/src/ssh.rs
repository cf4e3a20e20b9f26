//! ssh rule input types for policy json
//!
//! these types represent the `ssh` section in the policy file, which is
//! compiled into wire-format ssh policy for each destination node.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// check period used when a "check" rule does not set one.
pub const CHECK_PERIOD_ALWAYS: &str = "always";

/// an ssh rule in the policy file.
///
/// # Example
/// ```json
/// {
///   "action": "check",
///   "src": ["group:admins"],
///   "dst": ["tag:prod"],
///   "users": ["autogroup:nonroot"],
///   "recorder": ["tag:recorder"],
///   "enforceRecorder": true,
///   "checkPeriod": "12h"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SshPolicyRule {
    /// action to take: "accept" or "check". anything else is ignored.
    pub action: SshActionType,

    /// re-authentication period for "check" rules (e.g. "12h"), or "always".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_period: Option<String>,

    /// source aliases (who can initiate ssh).
    pub src: Vec<String>,

    /// destination aliases (which nodes can be ssh'd to).
    pub dst: Vec<String>,

    /// login identities allowed (usernames or "autogroup:nonroot").
    pub users: Vec<String>,

    /// tags of nodes that record sessions matched by this rule.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recorder: Vec<String>,

    /// refuse or end sessions when recording fails.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub enforce_recorder: bool,
}

impl SshPolicyRule {
    /// create a rule with no recorder and no check period.
    pub fn new(
        action: SshActionType,
        src: impl IntoIterator<Item = impl Into<String>>,
        dst: impl IntoIterator<Item = impl Into<String>>,
        users: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            action,
            check_period: None,
            src: src.into_iter().map(Into::into).collect(),
            dst: dst.into_iter().map(Into::into).collect(),
            users: users.into_iter().map(Into::into).collect(),
            recorder: Vec::new(),
            enforce_recorder: false,
        }
    }

    /// the check period placed in the hold-and-delegate url.
    pub fn check_period(&self) -> &str {
        match self.check_period.as_deref() {
            None | Some("") => CHECK_PERIOD_ALWAYS,
            Some(period) => period,
        }
    }

    /// validate the ssh rule.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.src.is_empty() {
            return Err(ValidationError::EmptySrc);
        }
        if self.dst.is_empty() {
            return Err(ValidationError::EmptyDst);
        }
        if self.users.is_empty() {
            return Err(ValidationError::EmptySshUsers);
        }
        let period = self.check_period();
        if period != CHECK_PERIOD_ALWAYS && humantime::parse_duration(period).is_err() {
            return Err(ValidationError::InvalidCheckPeriod(period.to_string()));
        }
        Ok(())
    }
}

/// ssh action type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SshActionType {
    /// accept the connection immediately.
    Accept,
    /// hold the connection until an external check approves it.
    Check,
    /// any other action; rules carrying it are skipped.
    #[serde(other)]
    Unknown,
}

impl SshActionType {
    /// whether rules with this action produce output.
    pub fn is_supported(self) -> bool {
        matches!(self, SshActionType::Accept | SshActionType::Check)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ssh_rule_accept() {
        let json = r#"{
            "action": "accept",
            "src": ["group:admins"],
            "dst": ["autogroup:self"],
            "users": ["autogroup:nonroot"]
        }"#;

        let rule: SshPolicyRule = serde_json::from_str(json).unwrap();
        assert_eq!(rule.action, SshActionType::Accept);
        assert_eq!(rule.src, vec!["group:admins"]);
        assert_eq!(rule.dst, vec!["autogroup:self"]);
        assert_eq!(rule.users, vec!["autogroup:nonroot"]);
        assert!(rule.recorder.is_empty());
        assert!(!rule.enforce_recorder);
        assert_eq!(rule.check_period(), "always");
        assert!(rule.validate().is_ok());
    }

    #[test]
    fn test_parse_ssh_rule_check_with_recorder() {
        let json = r#"{
            "action": "check",
            "checkPeriod": "12h",
            "src": ["alice@example.com"],
            "dst": ["tag:prod"],
            "users": ["root"],
            "recorder": ["tag:recorder"],
            "enforceRecorder": true
        }"#;

        let rule: SshPolicyRule = serde_json::from_str(json).unwrap();
        assert_eq!(rule.action, SshActionType::Check);
        assert_eq!(rule.check_period(), "12h");
        assert_eq!(rule.recorder, vec!["tag:recorder"]);
        assert!(rule.enforce_recorder);
        assert!(rule.validate().is_ok());
    }

    #[test]
    fn test_unknown_action_parses() {
        let json = r#"{"action": "deny", "src": ["*"], "dst": ["*"], "users": ["root"]}"#;
        let rule: SshPolicyRule = serde_json::from_str(json).unwrap();
        assert_eq!(rule.action, SshActionType::Unknown);
        assert!(!rule.action.is_supported());
    }

    #[test]
    fn test_empty_check_period_is_always() {
        let mut rule = SshPolicyRule::new(SshActionType::Check, ["a@b.c"], ["tag:x"], ["root"]);
        rule.check_period = Some(String::new());
        assert_eq!(rule.check_period(), CHECK_PERIOD_ALWAYS);
        assert!(rule.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_fields() {
        let rule = SshPolicyRule::new(SshActionType::Accept, Vec::<String>::new(), ["*"], ["u"]);
        assert_eq!(rule.validate(), Err(ValidationError::EmptySrc));

        let rule = SshPolicyRule::new(SshActionType::Accept, ["*"], Vec::<String>::new(), ["u"]);
        assert_eq!(rule.validate(), Err(ValidationError::EmptyDst));

        let rule = SshPolicyRule::new(SshActionType::Accept, ["*"], ["*"], Vec::<String>::new());
        assert_eq!(rule.validate(), Err(ValidationError::EmptySshUsers));
    }

    #[test]
    fn test_validate_check_period() {
        let mut rule = SshPolicyRule::new(SshActionType::Check, ["*"], ["*"], ["u"]);
        rule.check_period = Some("1h30m".to_string());
        assert!(rule.validate().is_ok());

        rule.check_period = Some("soon".to_string());
        assert_eq!(
            rule.validate(),
            Err(ValidationError::InvalidCheckPeriod("soon".to_string()))
        );
    }

    #[test]
    fn test_serialize_skips_defaults() {
        let rule = SshPolicyRule::new(SshActionType::Accept, ["*"], ["tag:x"], ["root"]);
        let json = serde_json::to_string(&rule).unwrap();
        assert!(!json.contains("recorder"));
        assert!(!json.contains("enforceRecorder"));
        assert!(!json.contains("checkPeriod"));
    }
}
