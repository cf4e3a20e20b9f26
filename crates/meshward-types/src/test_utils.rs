//! test utilities for creating nodes and users.
//!
//! builders fill in every field the test does not care about.

use std::net::{Ipv4Addr, Ipv6Addr};

use crate::{Node, NodeId, Tag, User, UserId};

/// builder for creating test [`Node`] instances.
///
/// # example
/// ```
/// use meshward_types::test_utils::TestNodeBuilder;
///
/// let node = TestNodeBuilder::new(1).build();
/// assert_eq!(node.ipv4().unwrap().to_string(), "100.64.0.1");
///
/// let tagged = TestNodeBuilder::new(2)
///     .with_tags(vec!["tag:prod".parse().unwrap()])
///     .build();
/// assert!(tagged.is_tagged());
/// ```
#[derive(Debug, Clone)]
pub struct TestNodeBuilder {
    id: u64,
    tags: Vec<Tag>,
    user_id: Option<UserId>,
    hostname: Option<String>,
    ipv4: Option<Ipv4Addr>,
    ipv6: Option<Ipv6Addr>,
    no_ipv4: bool,
}

impl TestNodeBuilder {
    /// create a new builder with the given node id.
    pub fn new(id: u64) -> Self {
        Self {
            id,
            tags: vec![],
            user_id: None,
            hostname: None,
            ipv4: None,
            ipv6: None,
            no_ipv4: false,
        }
    }

    /// set tags for the node.
    ///
    /// tagged nodes get no owner unless one is set explicitly.
    pub fn with_tags(mut self, tags: Vec<Tag>) -> Self {
        self.tags = tags;
        self
    }

    /// set the owning user.
    pub fn with_user_id(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// set a custom hostname.
    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = Some(hostname.into());
        self
    }

    /// set ipv4 address.
    pub fn with_ipv4(mut self, ip: Ipv4Addr) -> Self {
        self.ipv4 = Some(ip);
        self
    }

    /// set ipv6 address.
    pub fn with_ipv6(mut self, ip: Ipv6Addr) -> Self {
        self.ipv6 = Some(ip);
        self
    }

    /// leave the node without an ipv4 address.
    pub fn without_ipv4(mut self) -> Self {
        self.no_ipv4 = true;
        self
    }

    /// build the [`Node`].
    ///
    /// untagged nodes default to being owned by `UserId(id)`; the default
    /// ipv4 address is derived from the id (`100.64.<hi>.<lo>`).
    pub fn build(self) -> Node {
        let hostname = self.hostname.unwrap_or_else(|| format!("node-{}", self.id));

        let user_id = match self.user_id {
            Some(id) => Some(id),
            None if self.tags.is_empty() => Some(UserId(self.id)),
            None => None,
        };

        let ipv4 = if self.no_ipv4 {
            None
        } else {
            self.ipv4.or_else(|| {
                Some(Ipv4Addr::new(100, 64, (self.id >> 8) as u8, self.id as u8))
            })
        };

        Node {
            id: NodeId::new(self.id),
            hostname,
            ipv4,
            ipv6: self.ipv6,
            user_id,
            tags: self.tags,
        }
    }
}

/// create a user whose login is `login`.
///
/// logins containing `@` are stored as the email, anything else as the name.
pub fn test_user(id: u64, login: &str) -> User {
    if login.contains('@') {
        let name = login.split('@').next().unwrap_or(login);
        let email = login.parse().expect("test login must be a valid email");
        User::new(UserId(id), name).with_email(email)
    } else {
        User::new(UserId(id), login)
    }
}
