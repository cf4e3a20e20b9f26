//! acl policy document.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::ssh::SshPolicyRule;

/// prefix of group aliases and group keys.
pub const GROUP_PREFIX: &str = "group:";

/// maximum size for policy json in bytes (1MB).
pub const MAX_POLICY_SIZE: usize = 1024 * 1024;

/// the administrator-authored policy.
///
/// only the sections the ssh compiler needs are modelled; other top-level
/// keys (`acls`, `tagOwners`, ...) are accepted and ignored.
///
/// ```json
/// {
///   "groups": {
///     "group:eng": ["alice@example.com", "bob@example.com"]
///   },
///   "ssh": [
///     {"action": "accept", "src": ["group:eng"], "dst": ["tag:prod"], "users": ["ubuntu"]}
///   ]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AclPolicy {
    /// group definitions mapping `group:<name>` to member logins.
    #[serde(default)]
    pub groups: BTreeMap<String, Vec<String>>,

    /// ssh rules, in declaration order.
    #[serde(default)]
    pub ssh: Vec<SshPolicyRule>,
}

impl AclPolicy {
    /// create an empty policy (no ssh access at all).
    pub fn empty() -> Self {
        Self::default()
    }

    /// parse and validate a policy from a json string.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        if json.len() > MAX_POLICY_SIZE {
            return Err(Error::TooLarge {
                size: json.len(),
                max: MAX_POLICY_SIZE,
            });
        }
        let policy: AclPolicy = serde_json::from_str(json)?;
        policy.validate()?;
        Ok(policy)
    }

    /// validate group names and every ssh rule.
    pub fn validate(&self) -> Result<(), Error> {
        if let Some(name) = self.groups.keys().find(|g| !g.starts_with(GROUP_PREFIX)) {
            return Err(Error::InvalidGroup(name.clone()));
        }
        for (index, rule) in self.ssh.iter().enumerate() {
            rule.validate()
                .map_err(|cause| Error::InvalidSshRule { index, cause })?;
        }
        Ok(())
    }

    /// whether `login` is listed in `group` (full `group:<name>` form).
    ///
    /// unknown groups have no members.
    pub fn is_group_member(&self, group: &str, login: &str) -> bool {
        !login.is_empty()
            && self
                .groups
                .get(group)
                .is_some_and(|members| members.iter().any(|m| m == login))
    }
}
