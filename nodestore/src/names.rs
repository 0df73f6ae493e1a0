//! The name dictionary.
//!
//! Names are interned per [NodeKind] partition. Interning is idempotent for a
//! (name, partition) pair; every call bumps a reference count so removals can
//! later tell when a name is no longer used.
use std::collections::HashMap;

use crate::{NameKey, NodeKind};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct NameEntry {
    name: String,
    references: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct Partition {
    keys: HashMap<String, NameKey>,
    entries: HashMap<NameKey, NameEntry>,
    next_key: i32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NamePage {
    partitions: HashMap<NodeKind, Partition>,
}

impl NamePage {
    /// Interns `name` in the partition of `kind`, returning its key.
    ///
    /// Empty names map to [NameKey::ABSENT] without a dictionary entry.
    pub fn create_name_key(&mut self, name: &str, kind: NodeKind) -> NameKey {
        if name.is_empty() {
            return NameKey::ABSENT;
        }

        let partition = self.partitions.entry(kind).or_default();
        let key = match partition.keys.get(name) {
            Some(key) => *key,
            None => {
                let key = NameKey::new(partition.next_key);
                partition.next_key += 1;
                partition.keys.insert(name.to_owned(), key);
                partition.entries.insert(
                    key,
                    NameEntry {
                        name: name.to_owned(),
                        references: 0,
                    },
                );
                key
            }
        };

        if let Some(entry) = partition.entries.get_mut(&key) {
            entry.references += 1;
        }

        key
    }

    /// Looks up an already interned name without touching reference counts.
    pub fn name_key(&self, name: &str, kind: NodeKind) -> Option<NameKey> {
        self.partitions.get(&kind)?.keys.get(name).copied()
    }

    /// Resolves a key back to its name.
    pub fn name(&self, key: NameKey, kind: NodeKind) -> Option<&str> {
        self.partitions
            .get(&kind)?
            .entries
            .get(&key)
            .map(|e| e.name.as_str())
    }

    pub fn references(&self, key: NameKey, kind: NodeKind) -> u64 {
        self.partitions
            .get(&kind)
            .and_then(|p| p.entries.get(&key))
            .map(|e| e.references)
            .unwrap_or(0)
    }

    /// Drops one reference. The key itself stays reserved for the name.
    pub fn remove_name(&mut self, key: NameKey, kind: NodeKind) {
        if let Some(entry) = self
            .partitions
            .get_mut(&kind)
            .and_then(|p| p.entries.get_mut(&key))
        {
            entry.references = entry.references.saturating_sub(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::NamePage;
    use crate::NodeKind;

    #[test]
    fn interning_is_idempotent() {
        let mut names = NamePage::default();
        let a = names.create_name_key("a", NodeKind::Element);
        let b = names.create_name_key("b", NodeKind::Element);

        assert_eq!(a, names.create_name_key("a", NodeKind::Element));
        assert_ne!(a, b);
        assert_eq!(Some("b"), names.name(b, NodeKind::Element));
        assert_eq!(2, names.references(a, NodeKind::Element));
    }

    #[test]
    fn partitions_are_independent() {
        let mut names = NamePage::default();
        let el = names.create_name_key("x", NodeKind::Element);
        names.create_name_key("y", NodeKind::Attribute);
        let attr = names.create_name_key("x", NodeKind::Attribute);

        assert_eq!(Some(el), names.name_key("x", NodeKind::Element));
        assert_eq!(Some("x"), names.name(attr, NodeKind::Attribute));
        assert_eq!(None, names.name_key("y", NodeKind::Element));
        assert_eq!(1, names.references(attr, NodeKind::Attribute));
    }

    #[test]
    fn remove_keeps_key_reserved() {
        let mut names = NamePage::default();
        let key = names.create_name_key("a", NodeKind::Namespace);
        names.remove_name(key, NodeKind::Namespace);

        assert_eq!(0, names.references(key, NodeKind::Namespace));
        assert_eq!(key, names.create_name_key("a", NodeKind::Namespace));
    }
}
