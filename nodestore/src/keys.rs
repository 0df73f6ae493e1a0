//! Key and revision newtypes shared by all records.
use std::fmt;

/// Identifies a node inside one resource.
///
/// Keys are handed out densely and monotonically by the page store and are
/// never reused, not even after the node they name was removed.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeKey(u64);

impl NodeKey {
    /// Marks a missing parent, sibling or child link. Never allocated.
    pub const NULL: NodeKey = NodeKey(u64::MAX);

    /// Key of the document root (and of the path summary root in its own key space).
    pub const ROOT: NodeKey = NodeKey(0);

    pub const fn new(key: u64) -> Self {
        Self(key)
    }

    pub const fn get(self) -> u64 {
        self.0
    }

    pub const fn is_null(self) -> bool {
        self.0 == u64::MAX
    }

    /// The key following this one.
    pub(crate) fn successor(self) -> NodeKey {
        debug_assert!(!self.is_null());
        NodeKey(self.0 + 1)
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            f.write_str("null")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl fmt::Debug for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeKey({})", self)
    }
}

/// An interned name, valid within one [crate::NodeKind] partition of the
/// name dictionary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NameKey(i32);

impl NameKey {
    /// Stands for an empty or missing name component.
    pub const ABSENT: NameKey = NameKey(-1);

    pub(crate) const fn new(key: i32) -> Self {
        Self(key)
    }

    pub const fn get(self) -> i32 {
        self.0
    }

    pub const fn is_absent(self) -> bool {
        self.0 < 0
    }
}

impl Default for NameKey {
    fn default() -> Self {
        NameKey::ABSENT
    }
}

/// A committed (or in-construction) revision of a resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Revision(u64);

impl Revision {
    /// Reserved revision created with the resource. Never exposed to temporal axes.
    pub const BOOTSTRAP: Revision = Revision(0);

    /// The first revision holding user data.
    pub const FIRST: Revision = Revision(1);

    pub const fn new(revision: u64) -> Self {
        Self(revision)
    }

    pub const fn get(self) -> u64 {
        self.0
    }

    pub const fn next(self) -> Revision {
        Revision(self.0 + 1)
    }

    /// The preceding revision, unless this already is the bootstrap revision.
    pub fn previous(self) -> Option<Revision> {
        self.0.checked_sub(1).map(Revision)
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::{NameKey, NodeKey, Revision};

    #[test]
    fn null_key_is_not_a_valid_key() {
        assert!(NodeKey::NULL.is_null());
        assert!(!NodeKey::ROOT.is_null());
        assert_ne!(NodeKey::NULL, NodeKey::new(0));
        assert_eq!("null", NodeKey::NULL.to_string());
    }

    #[test]
    fn absent_name_key() {
        assert!(NameKey::ABSENT.is_absent());
        assert_eq!(-1, NameKey::default().get());
        assert!(!NameKey::new(0).is_absent());
    }

    #[test]
    fn revision_neighbours() {
        assert_eq!(None, Revision::BOOTSTRAP.previous());
        assert_eq!(Some(Revision::BOOTSTRAP), Revision::FIRST.previous());
        assert_eq!(Revision::new(2), Revision::FIRST.next());
    }
}
