//! Value compression policy.
//!
//! Values are compressed only if the caller asks for it and the payload is
//! longer than [COMPRESSION_THRESHOLD] bytes. Below that the codec's framing
//! outweighs anything it could save.
use bytes::Bytes;

use crate::Error;

/// Payloads of at most this many bytes are stored verbatim.
pub const COMPRESSION_THRESHOLD: usize = 10;

const ZSTD_LEVEL: i32 = 3;

/// Applies the compression policy, returning the payload to store and
/// whether it was compressed.
pub fn maybe_compress(value: &[u8], requested: bool) -> Result<(Bytes, bool), Error> {
    if requested && value.len() > COMPRESSION_THRESHOLD {
        Ok((compress(value)?, true))
    } else {
        Ok((Bytes::copy_from_slice(value), false))
    }
}

pub fn compress(value: &[u8]) -> Result<Bytes, Error> {
    Ok(zstd::stream::encode_all(value, ZSTD_LEVEL)?.into())
}

pub fn decompress(value: &[u8]) -> Result<Bytes, Error> {
    Ok(zstd::stream::decode_all(value)?.into())
}

#[cfg(test)]
mod tests {
    use super::{decompress, maybe_compress};
    use rstest::rstest;

    #[rstest]
    #[case::empty(b"", true, false)]
    #[case::at_threshold(b"0123456789", true, false)]
    #[case::above_threshold_not_requested(b"0123456789a", false, false)]
    #[case::above_threshold(b"0123456789a", true, true)]
    #[case::long(b"aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa", true, true)]
    fn threshold(#[case] value: &[u8], #[case] requested: bool, #[case] exp_compressed: bool) {
        let (stored, compressed) = maybe_compress(value, requested).expect("must succeed");
        assert_eq!(exp_compressed, compressed);

        if compressed {
            assert_eq!(value, &decompress(&stored).expect("must decompress")[..]);
        } else {
            assert_eq!(value, &stored[..]);
        }
    }
}
