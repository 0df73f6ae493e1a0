//! Hierarchical position codes.
//!
//! A [DeweyId] orders nodes in document order without walking parent links.
//! Producing and interpreting the encoding is done elsewhere; here it is an
//! opaque, byte-wise comparable token.
use bstr::ByteSlice;
use bytes::Bytes;
use std::fmt;

#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeweyId(Bytes);

impl DeweyId {
    pub fn new(encoded: impl Into<Bytes>) -> Self {
        Self(encoded.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Whether `self` is an ancestor-or-self prefix of `other`.
    pub fn is_prefix_of(&self, other: &DeweyId) -> bool {
        other.0.starts_with(&self.0)
    }
}

impl fmt::Debug for DeweyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DeweyId({:?})", self.0.as_bstr())
    }
}

#[cfg(test)]
mod tests {
    use super::DeweyId;

    #[test]
    fn orders_bytewise() {
        let parent = DeweyId::new(&b"\x01\x03"[..]);
        let first = DeweyId::new(&b"\x01\x03\x01"[..]);
        let second = DeweyId::new(&b"\x01\x03\x05"[..]);

        assert!(first < second);
        assert!(parent < first);
        assert!(parent.is_prefix_of(&second));
        assert!(!first.is_prefix_of(&second));
    }
}
