//! the narrow view of a node the ssh compiler works with.
//!
//! the compiler only needs addresses, tags and the owning user, so it is
//! written against [`SshNode`] rather than the full [`Node`] model. tests
//! and callers can plug in synthetic nodes.

use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr};

use meshward_types::{Node, User, UserId};

/// node capabilities required by the ssh compiler.
pub trait SshNode {
    /// all addresses of the node, ipv4 first.
    fn ips(&self) -> Vec<IpAddr>;

    /// the node's ipv4 address, used for recorder endpoints.
    fn ipv4(&self) -> Option<Ipv4Addr>;

    /// whether the node carries `tag` (full "tag:<name>" form).
    fn has_tag(&self, tag: &str) -> bool;

    /// whether the node carries any tag.
    fn is_tagged(&self) -> bool;

    /// the user that owns the node, if any.
    fn owner(&self) -> Option<&User>;

    /// whether the node's owner has login `login`.
    fn has_user(&self, login: &str) -> bool {
        self.owner().is_some_and(|u| u.is(login))
    }
}

/// a [`Node`] paired with its resolved owner.
#[derive(Debug, Clone, Copy)]
pub struct OwnedNode<'a> {
    node: &'a Node,
    owner: Option<&'a User>,
}

impl<'a> OwnedNode<'a> {
    /// pair `node` with `owner`.
    pub fn new(node: &'a Node, owner: Option<&'a User>) -> Self {
        Self { node, owner }
    }

    /// the underlying node.
    pub fn node(&self) -> &'a Node {
        self.node
    }
}

impl SshNode for OwnedNode<'_> {
    fn ips(&self) -> Vec<IpAddr> {
        self.node.ips().collect()
    }

    fn ipv4(&self) -> Option<Ipv4Addr> {
        self.node.ipv4()
    }

    fn has_tag(&self, tag: &str) -> bool {
        self.node.has_tag(tag)
    }

    fn is_tagged(&self) -> bool {
        self.node.is_tagged()
    }

    fn owner(&self) -> Option<&User> {
        self.owner
    }
}

/// in-memory user lookup used to resolve node owners.
///
/// built from the user list the caller already loaded.
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    users: HashMap<UserId, User>,
}

impl UserDirectory {
    /// create a directory from a list of users.
    pub fn new(users: impl IntoIterator<Item = User>) -> Self {
        let users = users.into_iter().map(|u| (u.id, u)).collect();
        Self { users }
    }

    /// look up a user by id.
    pub fn get(&self, id: UserId) -> Option<&User> {
        self.users.get(&id)
    }

    /// pair `node` with its owner. unknown owners resolve to none.
    pub fn owned<'a>(&'a self, node: &'a Node) -> OwnedNode<'a> {
        OwnedNode::new(node, node.user_id().and_then(|id| self.get(id)))
    }

    /// resolve the owners of every node, keeping the input order.
    pub fn resolve<'a>(&'a self, nodes: &'a [Node]) -> Vec<OwnedNode<'a>> {
        nodes.iter().map(|n| self.owned(n)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshward_types::test_utils::{TestNodeBuilder, test_user};

    #[test]
    fn test_owned_node_resolves_owner() {
        let users = UserDirectory::new([test_user(1, "alice@example.com")]);
        let node = TestNodeBuilder::new(1).with_user_id(UserId(1)).build();

        let owned = users.owned(&node);
        assert_eq!(owned.owner().map(|u| u.login()), Some("alice@example.com"));
        assert!(owned.has_user("alice@example.com"));
        assert!(!owned.has_user("bob@example.com"));
    }

    #[test]
    fn test_unknown_owner_is_none() {
        let users = UserDirectory::default();
        let node = TestNodeBuilder::new(5).build();
        let owned = users.owned(&node);
        assert!(owned.owner().is_none());
        assert!(!owned.has_user(""));
    }

    #[test]
    fn test_resolve_keeps_order() {
        let users = UserDirectory::new([test_user(1, "a@example.com"), test_user(2, "b@example.com")]);
        let nodes = vec![
            TestNodeBuilder::new(2).build(),
            TestNodeBuilder::new(1).build(),
        ];
        let owned = users.resolve(&nodes);
        let logins: Vec<_> = owned.iter().filter_map(|n| n.owner()).map(|u| u.login()).collect();
        assert_eq!(logins, vec!["b@example.com", "a@example.com"]);
    }
}
