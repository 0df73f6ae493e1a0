use bytes::Bytes;

use crate::{compression, Error};

/// A byte payload, possibly compressed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValueNodeDelegate {
    value: Bytes,
    compressed: bool,
}

impl ValueNodeDelegate {
    /// `compressed` must only be set if `value` really is the codec's output.
    pub fn new(value: Bytes, compressed: bool) -> Self {
        Self { value, compressed }
    }

    /// The payload as stored.
    pub fn value(&self) -> &Bytes {
        &self.value
    }

    pub fn is_compressed(&self) -> bool {
        self.compressed
    }

    /// The payload as it was handed to the factory.
    pub fn raw_value(&self) -> Result<Bytes, Error> {
        if self.compressed {
            compression::decompress(&self.value)
        } else {
            Ok(self.value.clone())
        }
    }
}
