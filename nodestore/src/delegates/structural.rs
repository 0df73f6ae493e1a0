use crate::NodeKey;

/// Child and sibling links of a structural node.
///
/// The counts are maintained by whoever mutates the tree; nothing here
/// recomputes them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StructNodeDelegate {
    first_child_key: NodeKey,
    left_sibling_key: NodeKey,
    right_sibling_key: NodeKey,
    child_count: u64,
    descendant_count: u64,
}

impl StructNodeDelegate {
    pub fn new(
        first_child_key: NodeKey,
        left_sibling_key: NodeKey,
        right_sibling_key: NodeKey,
        child_count: u64,
        descendant_count: u64,
    ) -> Self {
        Self {
            first_child_key,
            left_sibling_key,
            right_sibling_key,
            child_count,
            descendant_count,
        }
    }

    /// A freshly created leaf between the given siblings.
    pub fn leaf(left_sibling_key: NodeKey, right_sibling_key: NodeKey) -> Self {
        Self::new(NodeKey::NULL, left_sibling_key, right_sibling_key, 0, 0)
    }

    pub fn first_child_key(&self) -> NodeKey {
        self.first_child_key
    }

    pub fn set_first_child_key(&mut self, key: NodeKey) {
        self.first_child_key = key;
    }

    pub fn left_sibling_key(&self) -> NodeKey {
        self.left_sibling_key
    }

    pub fn set_left_sibling_key(&mut self, key: NodeKey) {
        self.left_sibling_key = key;
    }

    pub fn right_sibling_key(&self) -> NodeKey {
        self.right_sibling_key
    }

    pub fn set_right_sibling_key(&mut self, key: NodeKey) {
        self.right_sibling_key = key;
    }

    pub fn has_first_child(&self) -> bool {
        !self.first_child_key.is_null()
    }

    pub fn has_left_sibling(&self) -> bool {
        !self.left_sibling_key.is_null()
    }

    pub fn has_right_sibling(&self) -> bool {
        !self.right_sibling_key.is_null()
    }

    pub fn child_count(&self) -> u64 {
        self.child_count
    }

    pub fn increment_child_count(&mut self) {
        self.child_count += 1;
    }

    pub fn decrement_child_count(&mut self) {
        self.child_count = self.child_count.saturating_sub(1);
    }

    pub fn descendant_count(&self) -> u64 {
        self.descendant_count
    }

    pub fn increment_descendant_count(&mut self) {
        self.descendant_count += 1;
    }

    pub fn decrement_descendant_count(&mut self) {
        self.descendant_count = self.descendant_count.saturating_sub(1);
    }

    pub fn set_descendant_count(&mut self, count: u64) {
        self.descendant_count = count;
    }
}

#[cfg(test)]
mod tests {
    use super::StructNodeDelegate;
    use crate::NodeKey;

    #[test]
    fn leaf_uses_null_links() {
        let d = StructNodeDelegate::leaf(NodeKey::NULL, NodeKey::new(5));

        assert_eq!(NodeKey::NULL, d.first_child_key());
        assert_eq!(NodeKey::NULL, d.left_sibling_key());
        assert!(!d.has_left_sibling());
        assert!(d.has_right_sibling());
        assert_eq!(0, d.child_count());
    }

    #[test]
    fn counts_never_underflow() {
        let mut d = StructNodeDelegate::leaf(NodeKey::NULL, NodeKey::NULL);
        d.decrement_child_count();
        d.decrement_descendant_count();
        assert_eq!((0, 0), (d.child_count(), d.descendant_count()));

        d.increment_child_count();
        d.increment_descendant_count();
        d.increment_descendant_count();
        assert_eq!((1, 2), (d.child_count(), d.descendant_count()));
    }
}
