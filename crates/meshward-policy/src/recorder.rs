//! session recorder resolution.

use std::net::{SocketAddr, SocketAddrV4};

use crate::node::SshNode;

/// resolve recorder aliases to recording endpoints.
///
/// every source node, then the destination, that carries one of the
/// `aliases` as a tag contributes `<ipv4>:<port>`.
///
/// the list is a set, not one entry per match: a recorder that is both a
/// source and the destination, or that matches several aliases, is listed
/// once. nodes without an ipv4 address are skipped rather than failing the
/// compile, so a rule can end up with no recorders at all.
pub fn resolve_recorders<N: SshNode>(
    aliases: &[String],
    srcs: &[N],
    dst: &N,
    port: u16,
) -> Vec<SocketAddr> {
    let mut endpoints = Vec::new();

    for alias in aliases {
        for node in srcs.iter().chain(std::iter::once(dst)) {
            if !node.has_tag(alias) {
                continue;
            }
            let Some(ip) = node.ipv4() else {
                continue;
            };
            let endpoint = SocketAddr::V4(SocketAddrV4::new(ip, port));
            if !endpoints.contains(&endpoint) {
                endpoints.push(endpoint);
            }
        }
    }

    endpoints
}
