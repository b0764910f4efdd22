//! Metadata describing how a packet was signed.
//!
//! Beyond the mandatory signature-type code and the optional key locator,
//! a SignatureInfo element may carry trailing elements this version knows
//! nothing about. Those are the one place the decoder accepts unrecognized
//! type codes: they are kept verbatim, in order, and re-emitted on encode,
//! so signature algorithms introduced later can attach their own metadata
//! without breaking older decoders.

use educe::Educe;

use crate::block::Block;
use crate::encode::{self, Sink};
use crate::error::{Error, Result};
use crate::key_locator::KeyLocator;
use crate::tlv;

/// Signature metadata: a type code, an optional key locator, and opaque
/// extension elements.
#[derive(Clone, Debug, Default, Educe)]
#[educe(PartialEq)]
pub struct SignatureInfo {
    signature_type: Option<u64>,
    key_locator: Option<KeyLocator>,
    extensions: Vec<Block>,
    #[educe(PartialEq(ignore))]
    wire: Option<Block>,
}

impl SignatureInfo {
    pub fn new(signature_type: u64) -> Self {
        Self {
            signature_type: Some(signature_type),
            ..Self::default()
        }
    }

    pub fn with_key_locator(signature_type: u64, key_locator: KeyLocator) -> Self {
        Self {
            signature_type: Some(signature_type),
            key_locator: Some(key_locator),
            ..Self::default()
        }
    }

    /// Decodes a received block.
    pub fn from_block(wire: &Block) -> Result<Self> {
        let mut info = Self::default();
        info.wire_decode(wire)?;
        Ok(info)
    }

    pub fn signature_type(&self) -> Result<u64> {
        self.signature_type.ok_or(Error::NotSet("signature type"))
    }

    pub fn set_signature_type(&mut self, signature_type: u64) {
        self.wire = None;
        self.signature_type = Some(signature_type);
    }

    pub fn has_key_locator(&self) -> bool {
        self.key_locator.is_some()
    }

    pub fn key_locator(&self) -> Result<&KeyLocator> {
        self.key_locator.as_ref().ok_or(Error::NotSet("key locator"))
    }

    pub fn set_key_locator(&mut self, key_locator: KeyLocator) {
        self.wire = None;
        self.key_locator = Some(key_locator);
    }

    pub fn unset_key_locator(&mut self) {
        self.wire = None;
        self.key_locator = None;
    }

    /// Appends an algorithm-specific element to the extension tail.
    pub fn append_extension(&mut self, block: Block) {
        self.wire = None;
        self.extensions.push(block);
    }

    /// First extension element with the given type, if any.
    pub fn extension(&self, tlv_type: u64) -> Option<&Block> {
        self.extensions.iter().find(|b| b.tlv_type() == tlv_type)
    }

    pub fn extensions(&self) -> &[Block] {
        &self.extensions
    }

    pub fn encode_into<S: Sink>(&self, sink: &mut S) -> Result<usize> {
        let signature_type = self.signature_type.ok_or(Error::NotSet("signature type"))?;
        let mut total = 0;
        for extension in self.extensions.iter().rev() {
            total += encode::prepend_block(sink, extension);
        }
        if let Some(ref key_locator) = self.key_locator {
            total += key_locator.encode_into(sink)?;
        }
        total += encode::prepend_nonneg_block(sink, tlv::SIGNATURE_TYPE, signature_type);
        total += sink.prepend_var_number(total as u64);
        total += sink.prepend_var_number(tlv::SIGNATURE_INFO);
        Ok(total)
    }

    encode::impl_wire_encode!();

    pub fn wire_decode(&mut self, wire: &Block) -> Result<()> {
        if !wire.has_wire() {
            return Err(Error::MissingWireBytes);
        }
        if wire.tlv_type() != tlv::SIGNATURE_INFO {
            return Err(Error::UnexpectedType {
                expected: tlv::SIGNATURE_INFO,
                actual: wire.tlv_type(),
            });
        }
        let mut wire = wire.clone();
        wire.parse()?;
        let mut elements = wire.elements().iter().peekable();

        // The first child must be the signature type.
        let signature_type = match elements.next() {
            Some(child) if child.tlv_type() == tlv::SIGNATURE_TYPE => {
                crate::varnum::read_nonneg(child.value())?
            }
            Some(_) => {
                return Err(Error::SubElementOutOfOrder {
                    inside: "SignatureInfo",
                    expected: "SignatureType",
                })
            }
            None => {
                return Err(Error::MissingSubElement {
                    inside: "SignatureInfo",
                    expected: "SignatureType",
                })
            }
        };

        // The second child is a key locator only if its type says so;
        // otherwise it opens the extension tail.
        let mut key_locator = None;
        if let Some(child) = elements.peek() {
            if child.tlv_type() == tlv::KEY_LOCATOR {
                let mut locator = KeyLocator::digest(Vec::new());
                locator.wire_decode(child)?;
                key_locator = Some(locator);
                elements.next();
            }
        }

        // Whatever remains is preserved untouched, whatever its types.
        let extensions: Vec<Block> = elements.cloned().collect();

        self.signature_type = Some(signature_type);
        self.key_locator = key_locator;
        self.extensions = extensions;
        self.wire = Some(wire);
        Ok(())
    }
}
