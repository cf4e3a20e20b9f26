//! node type representing a member device of the tailnet.

use std::collections::HashSet;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::tag::{MAX_TAGS, Tag};
use crate::user::UserId;

/// unique identifier for a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(u64);

impl NodeId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// get the raw u64 value.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// a meshward node.
///
/// nodes can be either:
/// - **user-owned**: belong to a specific user, no tags
/// - **tagged**: identity defined by tags; any recorded owner is ignored
///   for owner-scoped policy matching
///
/// the address fields are family-typed, so an ipv6 address in `ipv4`
/// fails to deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub(crate) id: NodeId,
    pub(crate) hostname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) ipv4: Option<Ipv4Addr>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) ipv6: Option<Ipv6Addr>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) user_id: Option<UserId>,
    #[serde(default)]
    pub(crate) tags: Vec<Tag>,
}

impl Node {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn ipv4(&self) -> Option<Ipv4Addr> {
        self.ipv4
    }

    pub fn ipv6(&self) -> Option<Ipv6Addr> {
        self.ipv6
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.user_id
    }

    /// check invariants serde cannot express.
    ///
    /// a node carries at most [`MAX_TAGS`] tags, each at most once.
    pub fn validate(&self) -> Result<(), Error> {
        if self.tags.len() > MAX_TAGS {
            return Err(Error::TooManyTags(self.tags.len()));
        }
        let mut seen = HashSet::new();
        if let Some(dup) = self.tags.iter().find(|t| !seen.insert(t.as_str())) {
            return Err(Error::DuplicateTag(dup.to_string()));
        }
        Ok(())
    }

    /// returns whether this node carries at least one tag.
    pub fn is_tagged(&self) -> bool {
        !self.tags.is_empty()
    }

    /// returns whether the node carries `tag` (full "tag:<name>" form).
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// all assigned addresses, ipv4 first.
    pub fn ips(&self) -> impl Iterator<Item = IpAddr> + '_ {
        self.ipv4
            .map(IpAddr::V4)
            .into_iter()
            .chain(self.ipv6.map(IpAddr::V6))
    }
}
