//! insertion-ordered set of strings.

use std::collections::HashSet;

/// a deduplicating list of strings that keeps first-seen order.
///
/// used to merge principal addresses from several aliases and source
/// nodes without repeating any of them.
#[derive(Debug, Clone, Default)]
pub struct StringSet {
    items: Vec<String>,
    seen: HashSet<String>,
}

impl StringSet {
    /// create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// append every item not already present.
    pub fn add<I, S>(&mut self, items: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for item in items {
            let item = item.into();
            if self.seen.insert(item.clone()) {
                self.items.push(item);
            }
        }
    }

    /// consume the set, returning the items in first-seen order.
    pub fn into_items(self) -> Vec<String> {
        self.items
    }
}
