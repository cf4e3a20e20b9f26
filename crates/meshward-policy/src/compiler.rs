//! compiles the policy's ssh rules into a destination node's ssh policy.

use std::collections::BTreeMap;
use std::sync::Arc;

use meshward_proto::{SshAction, SshPolicy, SshPrincipal, SshRecorderFailureAction, SshRule};
use meshward_types::{SshConfig, User};
use tracing::{debug, trace};

use crate::alias::{Alias, DestinationMatch, expand_source};
use crate::node::SshNode;
use crate::policy::AclPolicy;
use crate::recorder::resolve_recorders;
use crate::ssh::{SshActionType, SshPolicyRule};
use crate::string_set::StringSet;
use crate::users::build_ssh_users;

/// login identity mapping of a compiled rule.
pub type SshUsers = BTreeMap<String, String>;

/// the identity mappings one rule grants on one destination node.
///
/// owner ("self") access and tag-scoped ("other") access are kept apart:
/// they are granted to different sources and become separate rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityMappings {
    /// logins granted when the destination is reached as its owner's node.
    pub self_users: Option<SshUsers>,
    /// logins granted when the destination is reached through a tag.
    pub other_users: Option<SshUsers>,
}

impl IdentityMappings {
    /// match `rule`'s destinations against `dst`.
    ///
    /// a rule granting no logins produces no mapping.
    pub fn for_destination<N: SshNode + ?Sized>(rule: &SshPolicyRule, dst: &N) -> Self {
        let matched = DestinationMatch::evaluate(dst, &rule.dst);
        if !matched.owner && !matched.tagged {
            return Self::default();
        }

        let users = build_ssh_users(&rule.users);
        if users.is_empty() {
            return Self::default();
        }

        Self {
            self_users: matched.owner.then(|| users.clone()),
            other_users: matched.tagged.then_some(users),
        }
    }
}

/// ssh policy compiler.
///
/// wraps the policy in an arc for cheap cloning. compilation takes `&self`
/// and never mutates anything, so one compiler can serve concurrent
/// map requests.
#[derive(Debug, Clone)]
pub struct SshPolicyCompiler {
    policy: Arc<AclPolicy>,
    config: SshConfig,
}

impl SshPolicyCompiler {
    /// create a compiler with default settings.
    pub fn new(policy: AclPolicy) -> Self {
        Self::with_config(policy, SshConfig::default())
    }

    /// create a compiler with explicit settings.
    pub fn with_config(policy: AclPolicy, config: SshConfig) -> Self {
        Self {
            policy: Arc::new(policy),
            config,
        }
    }

    /// a compiler for an empty policy (no ssh access).
    pub fn empty() -> Self {
        Self::new(AclPolicy::empty())
    }

    /// swap in a new policy.
    pub fn update_policy(&mut self, policy: AclPolicy) {
        self.policy = Arc::new(policy);
    }

    /// the current policy.
    pub fn policy(&self) -> &AclPolicy {
        &self.policy
    }

    /// the compiler settings.
    pub fn config(&self) -> &SshConfig {
        &self.config
    }

    /// compile the ssh policy for `dst`, with `srcs` as candidate sources.
    ///
    /// rules are processed in declaration order and each may yield zero,
    /// one or two output rules. output rules always have principals.
    pub fn compile<N: SshNode>(&self, srcs: &[N], dst: &N) -> SshPolicy {
        let mut rules = Vec::new();

        for (index, rule) in self.policy.ssh.iter().enumerate() {
            if !rule.action.is_supported() {
                debug!(index, "skipping ssh rule with unsupported action");
                continue;
            }

            let mappings = IdentityMappings::for_destination(rule, dst);
            if mappings == IdentityMappings::default() {
                trace!(index, "ssh rule does not apply to destination");
                continue;
            }

            let action = self.build_action(rule, srcs, dst);

            if let (Some(ssh_users), Some(owner)) = (mappings.self_users, dst.owner()) {
                let principals = self.expand_sources(rule, srcs, Some(owner));
                self.emit(&mut rules, index, principals, ssh_users, &action);
            }

            if let Some(ssh_users) = mappings.other_users {
                let principals = self.expand_sources(rule, srcs, None);
                self.emit(&mut rules, index, principals, ssh_users, &action);
            }
        }

        SshPolicy { rules }
    }

    fn emit(
        &self,
        rules: &mut Vec<SshRule>,
        index: usize,
        principals: Vec<SshPrincipal>,
        ssh_users: SshUsers,
        action: &SshAction,
    ) {
        if principals.is_empty() {
            debug!(index, "dropping ssh rule with no matching sources");
            return;
        }

        trace!(index, principals = principals.len(), "emitting ssh rule");
        rules.push(SshRule {
            principals,
            ssh_users,
            action: action.clone(),
        });
    }

    fn build_action<N: SshNode>(&self, rule: &SshPolicyRule, srcs: &[N], dst: &N) -> SshAction {
        let mut action = match rule.action {
            SshActionType::Check => {
                SshAction::hold_and_delegate(self.config.check_url(rule.check_period()))
            }
            _ => SshAction::accept(),
        };

        if !rule.recorder.is_empty() {
            action.recorders =
                resolve_recorders(&rule.recorder, srcs, dst, self.config.recorder_port);
            action.message = Some(self.config.recording_message.clone());

            if rule.enforce_recorder {
                action.on_recording_failure = Some(SshRecorderFailureAction {
                    reject_session_with_message: self.config.reject_message.clone(),
                    terminate_session_with_message: self.config.terminate_message.clone(),
                });
            }
        }

        action
    }

    /// collect the addresses of every source node matched by any source
    /// alias, in alias order then node order.
    fn expand_sources<N: SshNode>(
        &self,
        rule: &SshPolicyRule,
        srcs: &[N],
        dst_user: Option<&User>,
    ) -> Vec<SshPrincipal> {
        let mut ips = StringSet::new();

        for alias in &rule.src {
            if !Alias::classify(alias).is_source_for(rule.action) {
                continue;
            }
            for src in srcs {
                ips.add(expand_source(&self.policy, src, alias, dst_user));
            }
        }

        ips.into_items()
            .into_iter()
            .map(SshPrincipal::node_ip)
            .collect()
    }
}
