//! The parsed TLV element tree.
//!
//! A [`Block`] wraps one `type / length / value` element over a shared,
//! immutable backing buffer. Parsing is lazy: a freshly built block knows
//! its own type and value bounds but nothing about nested structure until
//! [`Block::parse`] scans the value into child blocks. Children share the
//! parent's backing storage, so cloning and slicing never copy wire bytes.

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::varnum;

/// One TLV element, with lazily parsed children.
///
/// Blocks are value types over immutable storage: every clone and every
/// child observes the same bytes, and nothing ever mutates them in place.
/// A codec that changes its fields drops its cached block instead of
/// editing it.
#[derive(Clone, Debug, Default)]
pub struct Block {
    // Arc around the Vec takes ownership without copying the bytes the
    // write pass produced.
    buffer: Arc<Vec<u8>>,
    // Bounds of this element and of its value within `buffer`.
    begin: usize,
    end: usize,
    value_begin: usize,
    value_end: usize,
    tlv_type: u64,
    // Child elements; None until `parse` runs.
    elements: Option<Vec<Block>>,
}

impl Block {
    /// Builds a block over `data`, which must hold exactly one element.
    pub fn from_vec(data: Vec<u8>) -> Result<Block> {
        let end = data.len();
        Self::from_region(Arc::new(data), 0, end)
    }

    /// Builds a block over a copy of `data`.
    pub fn from_slice(data: &[u8]) -> Result<Block> {
        Self::from_vec(data.to_vec())
    }

    /// Reads one element spanning `buffer[begin..end]` exactly; a length
    /// that disagrees with the span in either direction is an error.
    fn from_region(buffer: Arc<Vec<u8>>, begin: usize, end: usize) -> Result<Block> {
        let mut input = &buffer[begin..end];
        let tlv_type = varnum::read(&mut input)?;
        let length = varnum::read(&mut input)?;
        if length > input.len() as u64 {
            return Err(Error::LengthTooShort {
                step: "element value",
                expected: length,
                actual: input.len() as u64,
            });
        }
        if length < input.len() as u64 {
            return Err(Error::LengthTooLong {
                declared: length,
                actual: input.len() as u64,
            });
        }
        let value_begin = end - input.len();
        Ok(Block {
            buffer,
            begin,
            end,
            value_begin,
            value_end: end,
            tlv_type,
            elements: None,
        })
    }

    /// True when this block holds encoded bytes. A default-constructed
    /// block holds none and cannot be decoded from.
    pub fn has_wire(&self) -> bool {
        self.end > self.begin
    }

    pub fn tlv_type(&self) -> u64 {
        self.tlv_type
    }

    /// The full wire bytes of this element, header included.
    pub fn wire(&self) -> &[u8] {
        &self.buffer[self.begin..self.end]
    }

    /// Total encoded size, header included.
    pub fn size(&self) -> usize {
        self.end - self.begin
    }

    /// Raw value bytes, with no further interpretation.
    pub fn value(&self) -> &[u8] {
        &self.buffer[self.value_begin..self.value_end]
    }

    pub fn value_size(&self) -> usize {
        self.value_end - self.value_begin
    }

    /// Splits the value into its immediate child elements.
    ///
    /// Idempotent: a second call is free. Fails if any child's declared
    /// length runs past the bytes that remain.
    pub fn parse(&mut self) -> Result<()> {
        if self.elements.is_some() {
            return Ok(());
        }
        let mut elements = Vec::new();
        let mut offset = self.value_begin;
        while offset < self.value_end {
            let mut input = &self.buffer[offset..self.value_end];
            let before = input.len();
            let tlv_type = varnum::read(&mut input)?;
            let length = varnum::read(&mut input)?;
            if length > input.len() as u64 {
                return Err(Error::LengthTooShort {
                    step: "child element value",
                    expected: length,
                    actual: input.len() as u64,
                });
            }
            let value_begin = offset + (before - input.len());
            let end = value_begin + length as usize;
            elements.push(Block {
                buffer: self.buffer.clone(),
                begin: offset,
                end,
                value_begin,
                value_end: end,
                tlv_type,
                elements: None,
            });
            offset = end;
        }
        self.elements = Some(elements);
        Ok(())
    }

    /// Child elements in wire order; empty until [`Block::parse`] has run.
    pub fn elements(&self) -> &[Block] {
        self.elements.as_deref().unwrap_or(&[])
    }

    /// First parsed child with the given type, if any.
    pub fn find_element(&self, tlv_type: u64) -> Option<&Block> {
        self.elements().iter().find(|b| b.tlv_type() == tlv_type)
    }

    /// Reinterprets the whole value as a single nested element.
    pub fn block_from_value(&self) -> Result<Block> {
        if !self.has_wire() {
            return Err(Error::MissingWireBytes);
        }
        Self::from_region(self.buffer.clone(), self.value_begin, self.value_end)
    }
}

// Equality is over the wire bytes; parse state is irrelevant.
impl PartialEq for Block {
    fn eq(&self, other: &Block) -> bool {
        self.wire() == other.wire()
    }
}

impl Eq for Block {}
