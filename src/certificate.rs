//! The signed-data envelope that certificates travel in.
//!
//! Certificate semantics (validity, key usage, signatures) live above this
//! layer; here a certificate is one Data element whose bytes are carried
//! and re-emitted verbatim.

use crate::block::Block;
use crate::encode::Sink;
use crate::error::{Error, Result};
use crate::tlv;

/// A certificate as its raw Data element.
///
/// Default-constructed certificates hold no bytes; accessors and encoding
/// fail until one is decoded or assigned.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Certificate {
    wire: Block,
}

impl Certificate {
    /// Wraps an already-encoded certificate, validating the envelope.
    pub fn from_block(block: &Block) -> Result<Certificate> {
        let mut certificate = Certificate::default();
        certificate.wire_decode(block)?;
        Ok(certificate)
    }

    /// Parses a certificate from raw wire bytes.
    pub fn from_slice(data: &[u8]) -> Result<Certificate> {
        Self::from_block(&Block::from_slice(data)?)
    }

    pub fn is_set(&self) -> bool {
        self.wire.has_wire()
    }

    /// The full encoded certificate.
    pub fn as_bytes(&self) -> Result<&[u8]> {
        if self.wire.has_wire() {
            Ok(self.wire.wire())
        } else {
            Err(Error::NotSet("certificate"))
        }
    }

    pub fn as_block(&self) -> Result<&Block> {
        if self.wire.has_wire() {
            Ok(&self.wire)
        } else {
            Err(Error::NotSet("certificate"))
        }
    }

    /// Re-emits the certificate bytes into an enclosing encoding.
    pub fn encode_into<S: Sink>(&self, sink: &mut S) -> Result<usize> {
        Ok(sink.prepend_bytes(self.as_bytes()?))
    }

    /// The encoded form; a certificate's encoding is the block it wraps.
    pub fn wire_encode(&self) -> Result<&Block> {
        self.as_block()
    }

    /// Validates the Data envelope of `wire` and stores it.
    pub fn wire_decode(&mut self, wire: &Block) -> Result<()> {
        if !wire.has_wire() {
            return Err(Error::MissingWireBytes);
        }
        if wire.tlv_type() != tlv::DATA {
            return Err(Error::UnexpectedType {
                expected: tlv::DATA,
                actual: wire.tlv_type(),
            });
        }
        // The value must at least split into well-formed elements.
        let mut wire = wire.clone();
        wire.parse()?;
        self.wire = wire;
        Ok(())
    }
}
