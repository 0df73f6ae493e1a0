use bytes::Bytes;
use data_encoding::BASE64;

use crate::Error;

pub const B3_LEN: usize = 32;

/// Content hash of a node, as stored on its identity delegate.
///
/// Computing the hash is up to whoever maintains the subtree; the node layer
/// only carries the value around.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct B3Digest(Bytes);

impl B3Digest {
    /// Hashes the given bytes.
    pub fn of(data: &[u8]) -> Self {
        blake3::hash(data).into()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0[..]
    }
}

impl From<blake3::Hash> for B3Digest {
    fn from(value: blake3::Hash) -> Self {
        Self(Bytes::copy_from_slice(value.as_bytes()))
    }
}

impl From<&[u8; B3_LEN]> for B3Digest {
    fn from(value: &[u8; B3_LEN]) -> Self {
        Self(Bytes::copy_from_slice(value))
    }
}

impl TryFrom<Bytes> for B3Digest {
    type Error = Error;

    fn try_from(value: Bytes) -> Result<Self, Self::Error> {
        if value.len() != B3_LEN {
            return Err(Error::InvalidRequest(format!(
                "invalid digest length: {}",
                value.len()
            )));
        }
        Ok(Self(value))
    }
}

impl std::fmt::Display for B3Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "b3:{}", BASE64.encode(&self.0))
    }
}

impl std::fmt::Debug for B3Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self, f)
    }
}
