//! The two-pass encoding engine.
//!
//! TLV elements nest, and a parent's length field depends on the full size
//! of its already-encoded children. Rather than encode children into
//! temporary buffers and copy them under a header, every codec writes
//! through a [`Sink`] in *prepend* order: value first, then the length, then
//! the type. The same routine runs twice, first against a [`SizeEstimator`]
//! that only counts, then against a [`WireBuffer`] sized by that count.
//! This produces the finished element with a single allocation and no
//! copying or re-encoding, however deep the nesting.

use crate::block::Block;
use crate::error::Result;
use crate::varnum;

/// Destination for a prepend-oriented encoding pass.
///
/// Implementations must agree byte-for-byte: a codec routine generic over
/// `Sink` returns the same cumulative count whether it is estimating or
/// writing.
pub trait Sink {
    /// Prepends raw bytes, returning how many were consumed.
    fn prepend_bytes(&mut self, bytes: &[u8]) -> usize;

    /// Prepends one variable-width number, returning its encoded size.
    fn prepend_var_number(&mut self, n: u64) -> usize {
        let mut scratch = [0u8; varnum::MAX_SIZE];
        let len = varnum::write_tail(&mut scratch, n);
        self.prepend_bytes(&scratch[varnum::MAX_SIZE - len..])
    }
}

/// First pass: computes the byte count an encoding would produce.
///
/// Touches no storage; its cost is independent of the structure being
/// measured.
#[derive(Debug, Default)]
pub struct SizeEstimator {
    length: usize,
}

impl SizeEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total bytes the encoding would occupy.
    pub fn total(&self) -> usize {
        self.length
    }
}

impl Sink for SizeEstimator {
    fn prepend_bytes(&mut self, bytes: &[u8]) -> usize {
        self.length += bytes.len();
        bytes.len()
    }

    fn prepend_var_number(&mut self, n: u64) -> usize {
        let len = varnum::size(n);
        self.length += len;
        len
    }
}

/// Second pass: fills a fixed-capacity buffer from the end toward the front.
///
/// The buffer is allocated once, at the size the estimator reported, and
/// never grows. Writing past the front is a codec bug, not an input error.
#[derive(Debug)]
pub struct WireBuffer {
    buf: Vec<u8>,
    pos: usize,
}

impl WireBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            buf: vec![0; capacity],
            pos: capacity,
        }
    }

    /// Wraps the filled buffer as a block. The writing pass must have
    /// consumed the buffer exactly.
    pub fn into_block(self) -> Result<Block> {
        assert_eq!(
            self.pos, 0,
            "write pass produced fewer bytes than estimated"
        );
        Block::from_vec(self.buf)
    }
}

impl Sink for WireBuffer {
    fn prepend_bytes(&mut self, bytes: &[u8]) -> usize {
        assert!(
            bytes.len() <= self.pos,
            "write pass produced more bytes than estimated"
        );
        let start = self.pos - bytes.len();
        self.buf[start..self.pos].copy_from_slice(bytes);
        self.pos = start;
        bytes.len()
    }
}

/// Prepends a complete `type / length / value` element holding raw bytes.
pub fn prepend_byte_block<S: Sink>(sink: &mut S, tlv_type: u64, value: &[u8]) -> usize {
    let mut total = sink.prepend_bytes(value);
    total += sink.prepend_var_number(total as u64);
    total += sink.prepend_var_number(tlv_type);
    total
}

/// Prepends a complete element holding a shortest-width non-negative
/// integer.
pub fn prepend_nonneg_block<S: Sink>(sink: &mut S, tlv_type: u64, n: u64) -> usize {
    let mut scratch = [0u8; 8];
    let len = varnum::write_nonneg_tail(&mut scratch, n);
    let mut total = sink.prepend_bytes(&scratch[8 - len..]);
    total += sink.prepend_var_number(total as u64);
    total += sink.prepend_var_number(tlv_type);
    total
}

/// Re-emits an already-encoded element verbatim.
pub fn prepend_block<S: Sink>(sink: &mut S, block: &Block) -> usize {
    sink.prepend_bytes(block.wire())
}

/// Implements the cached `wire_encode` entry point for a codec type with a
/// `wire: Option<Block>` field and a two-pass `encode_into` routine.
macro_rules! impl_wire_encode {
    () => {
        /// Returns the encoded form of this value, producing it on first
        /// use.
        ///
        /// The result is cached: a repeat call on an unmodified value
        /// returns the same block without re-running the encoding passes.
        /// Setters drop the cache.
        pub fn wire_encode(&mut self) -> $crate::error::Result<&$crate::block::Block> {
            if self.wire.is_none() {
                let mut estimator = $crate::encode::SizeEstimator::new();
                self.encode_into(&mut estimator)?;
                let mut buffer = $crate::encode::WireBuffer::new(estimator.total());
                self.encode_into(&mut buffer)?;
                self.wire = Some(buffer.into_block()?);
            }
            Ok(self.wire.as_ref().unwrap())
        }
    };
}
pub(crate) use impl_wire_encode;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tlv;

    #[test]
    fn estimator_and_buffer_agree() {
        let payload = b"not found";
        let mut estimator = SizeEstimator::new();
        let counted = prepend_byte_block(&mut estimator, tlv::BYTES, payload);
        assert_eq!(counted, estimator.total());

        let mut buffer = WireBuffer::new(estimator.total());
        let written = prepend_byte_block(&mut buffer, tlv::BYTES, payload);
        assert_eq!(written, counted);

        let block = buffer.into_block().unwrap();
        assert_eq!(block.tlv_type(), tlv::BYTES);
        assert_eq!(block.value(), payload);
    }

    #[test]
    fn prepend_order_is_back_to_front() {
        let mut estimator = SizeEstimator::new();
        prepend_byte_block(&mut estimator, 1, b"b");
        prepend_byte_block(&mut estimator, 1, b"a");
        let mut buffer = WireBuffer::new(estimator.total());
        prepend_byte_block(&mut buffer, 1, b"b");
        prepend_byte_block(&mut buffer, 1, b"a");
        // Prepending "b" then "a" leaves "a" first on the wire.
        assert_eq!(buffer.buf, vec![1, 1, b'a', 1, 1, b'b']);
    }

    #[test]
    fn nonneg_block_uses_shortest_width() {
        let mut estimator = SizeEstimator::new();
        let counted = prepend_nonneg_block(&mut estimator, tlv::ERROR_CODE, 404);
        let mut buffer = WireBuffer::new(estimator.total());
        prepend_nonneg_block(&mut buffer, tlv::ERROR_CODE, 404);
        let block = buffer.into_block().unwrap();
        assert_eq!(counted, block.size());
        assert_eq!(block.value(), &[0x01, 0x94]);
    }

    #[test]
    #[should_panic(expected = "more bytes than estimated")]
    fn overrun_is_a_bug() {
        let mut buffer = WireBuffer::new(2);
        buffer.prepend_bytes(&[0, 1, 2]);
    }
}
