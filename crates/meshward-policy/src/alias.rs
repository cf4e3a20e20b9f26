//! policy alias classification and node matching.
//!
//! an alias is a token from a rule's `src`, `dst` or `users` list. tokens
//! are classified once into an [`Alias`], then matched against nodes.
//! tokens that fit no known form classify as [`Alias::Unknown`] and match
//! nothing.

use meshward_types::User;

use crate::node::SshNode;
use crate::policy::{AclPolicy, GROUP_PREFIX};
use crate::ssh::SshActionType;

/// `autogroup:member`: every untagged node owned by a user.
pub const AUTOGROUP_MEMBER: &str = "autogroup:member";
/// legacy spelling of [`AUTOGROUP_MEMBER`].
pub const AUTOGROUP_MEMBERS: &str = "autogroup:members";
/// `autogroup:self`: the connecting user's own nodes (dst only).
pub const AUTOGROUP_SELF: &str = "autogroup:self";
/// `autogroup:nonroot`: every login except root (users only).
pub const AUTOGROUP_NONROOT: &str = "autogroup:nonroot";

const TAG_PREFIX: &str = "tag:";

/// a classified policy alias, borrowing the original token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alias<'a> {
    /// a user login, e.g. "alice@example.com".
    User(&'a str),
    /// a group, full "group:<name>" form.
    Group(&'a str),
    /// a tag, full "tag:<name>" form.
    Tag(&'a str),
    /// `autogroup:member` or `autogroup:members`.
    AutogroupMember,
    /// `autogroup:self`.
    AutogroupSelf,
    /// `autogroup:nonroot`.
    AutogroupNonRoot,
    /// anything else.
    Unknown(&'a str),
}

impl<'a> Alias<'a> {
    /// classify a token by its prefix or shape.
    pub fn classify(token: &'a str) -> Self {
        match token {
            AUTOGROUP_MEMBER | AUTOGROUP_MEMBERS => Alias::AutogroupMember,
            AUTOGROUP_SELF => Alias::AutogroupSelf,
            AUTOGROUP_NONROOT => Alias::AutogroupNonRoot,
            t if t.starts_with(TAG_PREFIX) => Alias::Tag(t),
            t if t.starts_with(GROUP_PREFIX) => Alias::Group(t),
            t if t.contains('@') => Alias::User(t),
            other => Alias::Unknown(other),
        }
    }

    /// whether this alias may contribute sources to a rule with `action`.
    ///
    /// tag sources are never eligible for "check" rules.
    pub fn is_source_for(&self, action: SshActionType) -> bool {
        !(matches!(self, Alias::Tag(_)) && action == SshActionType::Check)
    }

    /// whether `node` is a source for this alias.
    ///
    /// with `dst_user` set, only untagged nodes owned by that user can
    /// match, and group membership is checked for `dst_user`. without it,
    /// user-scoped aliases match untagged nodes by their owner and tags
    /// match any node carrying them.
    pub fn matches_source<N: SshNode + ?Sized>(
        &self,
        policy: &AclPolicy,
        node: &N,
        dst_user: Option<&User>,
    ) -> bool {
        match dst_user {
            Some(user) => {
                if node.is_tagged() || !node.has_user(user.login()) {
                    return false;
                }
                match *self {
                    Alias::AutogroupMember => true,
                    Alias::User(login) => node.has_user(login),
                    Alias::Group(group) => policy.is_group_member(group, user.login()),
                    _ => false,
                }
            }
            None => match *self {
                Alias::AutogroupMember => !node.is_tagged(),
                Alias::User(login) => !node.is_tagged() && node.has_user(login),
                Alias::Group(group) => {
                    !node.is_tagged()
                        && node
                            .owner()
                            .is_some_and(|owner| policy.is_group_member(group, owner.login()))
                }
                Alias::Tag(tag) => node.has_tag(tag),
                _ => false,
            },
        }
    }
}

/// expand one source alias against one node.
///
/// returns the node's addresses when it matches, otherwise nothing.
pub fn expand_source<N: SshNode + ?Sized>(
    policy: &AclPolicy,
    node: &N,
    alias: &str,
    dst_user: Option<&User>,
) -> Vec<String> {
    if Alias::classify(alias).matches_source(policy, node, dst_user) {
        node.ips().iter().map(|ip| ip.to_string()).collect()
    } else {
        Vec::new()
    }
}

/// how a destination node relates to a rule's `dst` list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DestinationMatch {
    /// the node is reachable as its owner's own node.
    pub owner: bool,
    /// the node is reachable through one of its tags.
    pub tagged: bool,
}

impl DestinationMatch {
    /// evaluate every destination alias against `node`.
    ///
    /// a tag alias matches if the node carries it. `autogroup:self`, or a
    /// token equal to the owner's login, matches if the node has an owner.
    pub fn evaluate<N: SshNode + ?Sized>(node: &N, destinations: &[String]) -> Self {
        let mut matched = Self::default();
        for dst in destinations {
            match Alias::classify(dst) {
                Alias::Tag(tag) if node.has_tag(tag) => matched.tagged = true,
                Alias::AutogroupSelf if node.owner().is_some() => matched.owner = true,
                _ if node.has_user(dst) => matched.owner = true,
                _ => {}
            }
        }
        matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{OwnedNode, UserDirectory};
    use meshward_types::test_utils::{TestNodeBuilder, test_user};
    use meshward_types::{Node, UserId};

    const ALICE: &str = "alice@example.com";
    const BOB: &str = "bob@example.com";

    fn fixture() -> (AclPolicy, UserDirectory) {
        let mut policy = AclPolicy::empty();
        policy
            .groups
            .insert("group:eng".to_string(), vec![ALICE.to_string()]);
        let users = UserDirectory::new([test_user(1, ALICE), test_user(2, BOB)]);
        (policy, users)
    }

    fn alice_laptop() -> Node {
        TestNodeBuilder::new(10).with_user_id(UserId(1)).build()
    }

    fn prod_owned_by_alice() -> Node {
        TestNodeBuilder::new(20)
            .with_tags(vec!["tag:prod".parse().unwrap()])
            .with_user_id(UserId(1))
            .build()
    }

    fn matches(policy: &AclPolicy, node: &OwnedNode<'_>, alias: &str, dst: Option<&User>) -> bool {
        Alias::classify(alias).matches_source(policy, node, dst)
    }

    #[test]
    fn test_classify() {
        assert_eq!(Alias::classify("autogroup:member"), Alias::AutogroupMember);
        assert_eq!(Alias::classify("autogroup:members"), Alias::AutogroupMember);
        assert_eq!(Alias::classify("autogroup:self"), Alias::AutogroupSelf);
        assert_eq!(Alias::classify("autogroup:nonroot"), Alias::AutogroupNonRoot);
        assert_eq!(Alias::classify("tag:prod"), Alias::Tag("tag:prod"));
        assert_eq!(Alias::classify("group:eng"), Alias::Group("group:eng"));
        assert_eq!(Alias::classify(ALICE), Alias::User(ALICE));
        assert_eq!(Alias::classify("autogroup:tagged"), Alias::Unknown("autogroup:tagged"));
        assert_eq!(Alias::classify("*"), Alias::Unknown("*"));
        assert_eq!(Alias::classify(""), Alias::Unknown(""));
    }

    #[test]
    fn test_tag_sources_not_eligible_for_check() {
        let tag = Alias::classify("tag:ci");
        assert!(tag.is_source_for(SshActionType::Accept));
        assert!(!tag.is_source_for(SshActionType::Check));
        assert!(Alias::classify("group:eng").is_source_for(SshActionType::Check));
    }

    #[test]
    fn test_owner_scoped_matches_own_untagged_node() {
        let (policy, users) = fixture();
        let laptop = alice_laptop();
        let node = users.owned(&laptop);
        let alice = users.get(UserId(1));

        assert!(matches(&policy, &node, ALICE, alice));
        assert!(matches(&policy, &node, "autogroup:member", alice));
        assert!(matches(&policy, &node, "autogroup:members", alice));
        assert!(matches(&policy, &node, "group:eng", alice));
        assert!(!matches(&policy, &node, BOB, alice));
        assert!(!matches(&policy, &node, "tag:prod", alice));
        assert!(!matches(&policy, &node, "autogroup:self", alice));
    }

    #[test]
    fn test_owner_scoped_rejects_other_owner() {
        let (policy, users) = fixture();
        let laptop = alice_laptop();
        let node = users.owned(&laptop);
        let bob = users.get(UserId(2));

        assert!(!matches(&policy, &node, ALICE, bob));
        assert!(!matches(&policy, &node, "autogroup:member", bob));
    }

    #[test]
    fn test_owner_scoped_never_matches_tagged_node() {
        let (policy, users) = fixture();
        let prod = prod_owned_by_alice();
        let node = users.owned(&prod);
        let alice = users.get(UserId(1));

        assert!(!matches(&policy, &node, ALICE, alice));
        assert!(!matches(&policy, &node, "autogroup:member", alice));
        assert!(!matches(&policy, &node, "group:eng", alice));
    }

    #[test]
    fn test_owner_scoped_group_checks_destination_user() {
        let (policy, users) = fixture();
        let bob_node = TestNodeBuilder::new(11).with_user_id(UserId(2)).build();
        let node = users.owned(&bob_node);
        let bob = users.get(UserId(2));

        // bob is not in group:eng, so his own node is not a source via the group
        assert!(!matches(&policy, &node, "group:eng", bob));
    }

    #[test]
    fn test_unscoped_matching() {
        let (policy, users) = fixture();
        let laptop = alice_laptop();
        let prod = prod_owned_by_alice();
        let laptop = users.owned(&laptop);
        let prod = users.owned(&prod);

        assert!(matches(&policy, &laptop, "autogroup:member", None));
        assert!(matches(&policy, &laptop, ALICE, None));
        assert!(matches(&policy, &laptop, "group:eng", None));
        assert!(!matches(&policy, &laptop, "tag:prod", None));

        // tagged nodes only match through their tags
        assert!(!matches(&policy, &prod, "autogroup:member", None));
        assert!(!matches(&policy, &prod, ALICE, None));
        assert!(!matches(&policy, &prod, "group:eng", None));
        assert!(matches(&policy, &prod, "tag:prod", None));
        assert!(!matches(&policy, &prod, "tag:dev", None));
    }

    #[test]
    fn test_unscoped_group_requires_owner() {
        let (policy, _) = fixture();
        let orphan = TestNodeBuilder::new(30).build();
        let node = OwnedNode::new(&orphan, None);
        assert!(!matches(&policy, &node, "group:eng", None));
        assert!(matches(&policy, &node, "autogroup:member", None));
    }

    #[test]
    fn test_unknown_aliases_match_nothing() {
        let (policy, users) = fixture();
        let laptop = alice_laptop();
        let node = users.owned(&laptop);
        for alias in ["*", "", "autogroup:tagged", "alice", "100.64.0.10"] {
            assert!(!matches(&policy, &node, alias, None), "{alias}");
            assert!(!matches(&policy, &node, alias, users.get(UserId(1))), "{alias}");
        }
    }

    #[test]
    fn test_expand_source_returns_all_ips() {
        let (policy, users) = fixture();
        let laptop = TestNodeBuilder::new(10)
            .with_user_id(UserId(1))
            .with_ipv6("fd7a:115c:a1e0::a".parse().unwrap())
            .build();
        let node = users.owned(&laptop);

        assert_eq!(
            expand_source(&policy, &node, ALICE, None),
            vec!["100.64.0.10".to_string(), "fd7a:115c:a1e0::a".to_string()]
        );
        assert!(expand_source(&policy, &node, BOB, None).is_empty());
    }

    #[test]
    fn test_destination_match() {
        let (_, users) = fixture();
        let laptop = alice_laptop();
        let prod = prod_owned_by_alice();
        let tagged_only = TestNodeBuilder::new(21)
            .with_tags(vec!["tag:prod".parse().unwrap()])
            .build();

        let dsts = |d: &[&str]| d.iter().map(|s| s.to_string()).collect::<Vec<_>>();

        let m = DestinationMatch::evaluate(&users.owned(&laptop), &dsts(&["autogroup:self"]));
        assert_eq!(m, DestinationMatch { owner: true, tagged: false });

        let m = DestinationMatch::evaluate(&users.owned(&laptop), &dsts(&[ALICE]));
        assert_eq!(m, DestinationMatch { owner: true, tagged: false });

        let m = DestinationMatch::evaluate(&users.owned(&laptop), &dsts(&[BOB, "tag:prod"]));
        assert_eq!(m, DestinationMatch::default());

        let m = DestinationMatch::evaluate(&users.owned(&prod), &dsts(&["autogroup:self", "tag:prod"]));
        assert_eq!(m, DestinationMatch { owner: true, tagged: true });

        let m = DestinationMatch::evaluate(&users.owned(&tagged_only), &dsts(&["autogroup:self", "tag:prod"]));
        assert_eq!(m, DestinationMatch { owner: false, tagged: true });
    }
}
