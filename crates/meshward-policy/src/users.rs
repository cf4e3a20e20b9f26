//! login identity mapping for ssh rules.

use std::collections::BTreeMap;

use crate::alias::AUTOGROUP_NONROOT;

/// wildcard key: any requested login.
pub const WILDCARD_USER: &str = "*";
/// value meaning "log in as the requested name".
pub const SAME_USER: &str = "=";
/// the superuser login, never covered by the wildcard.
pub const ROOT_USER: &str = "root";

/// build the `sshUsers` map for a rule's `users` list.
///
/// plain logins map to themselves. `autogroup:nonroot` maps `*` to `=`,
/// and unless `root` is listed explicitly it also maps `root` to `""`,
/// which denies root.
pub fn build_ssh_users(users: &[String]) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    let mut nonroot = false;

    for user in users {
        if user == AUTOGROUP_NONROOT {
            map.insert(WILDCARD_USER.to_string(), SAME_USER.to_string());
            nonroot = true;
        } else {
            map.insert(user.clone(), user.clone());
        }
    }

    if nonroot {
        map.entry(ROOT_USER.to_string()).or_default();
    }

    map
}
