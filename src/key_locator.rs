//! Identifies which key produced a signature, either by name or by a digest
//! of the key bytes. This layer carries the locator; it never interprets
//! key material cryptographically.

use educe::Educe;

use crate::block::Block;
use crate::encode::{self, Sink};
use crate::error::{Error, Result};
use crate::name::Name;
use crate::tlv;

/// The two ways a key can be located.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyLocatorKind {
    /// The name under which the key is published.
    Name(Name),
    /// An opaque digest of the key bytes.
    Digest(Vec<u8>),
}

/// A KeyLocator element: a single nested Name or KeyDigest.
#[derive(Clone, Debug, Educe)]
#[educe(PartialEq)]
pub struct KeyLocator {
    kind: KeyLocatorKind,
    #[educe(PartialEq(ignore))]
    wire: Option<Block>,
}

impl KeyLocator {
    pub fn name(name: Name) -> Self {
        Self {
            kind: KeyLocatorKind::Name(name),
            wire: None,
        }
    }

    pub fn digest(digest: impl Into<Vec<u8>>) -> Self {
        Self {
            kind: KeyLocatorKind::Digest(digest.into()),
            wire: None,
        }
    }

    pub fn kind(&self) -> &KeyLocatorKind {
        &self.kind
    }

    pub fn set_kind(&mut self, kind: KeyLocatorKind) {
        self.wire = None;
        self.kind = kind;
    }

    pub fn encode_into<S: Sink>(&self, sink: &mut S) -> Result<usize> {
        let mut total = match self.kind {
            KeyLocatorKind::Name(ref name) => name.encode_into(sink)?,
            KeyLocatorKind::Digest(ref digest) => {
                encode::prepend_byte_block(sink, tlv::KEY_DIGEST, digest)
            }
        };
        total += sink.prepend_var_number(total as u64);
        total += sink.prepend_var_number(tlv::KEY_LOCATOR);
        Ok(total)
    }

    encode::impl_wire_encode!();

    pub fn wire_decode(&mut self, wire: &Block) -> Result<()> {
        if !wire.has_wire() {
            return Err(Error::MissingWireBytes);
        }
        if wire.tlv_type() != tlv::KEY_LOCATOR {
            return Err(Error::UnexpectedType {
                expected: tlv::KEY_LOCATOR,
                actual: wire.tlv_type(),
            });
        }
        let mut wire = wire.clone();
        wire.parse()?;
        let mut elements = wire.elements().iter();
        let kind = match elements.next() {
            Some(child) if child.tlv_type() == tlv::NAME => {
                let mut name = Name::new();
                name.wire_decode(child)?;
                KeyLocatorKind::Name(name)
            }
            Some(child) if child.tlv_type() == tlv::KEY_DIGEST => {
                KeyLocatorKind::Digest(child.value().to_vec())
            }
            Some(child) => {
                return Err(Error::UnexpectedType {
                    expected: tlv::NAME,
                    actual: child.tlv_type(),
                })
            }
            None => {
                return Err(Error::MissingSubElement {
                    inside: "KeyLocator",
                    expected: "Name or KeyDigest",
                })
            }
        };
        if elements.next().is_some() {
            return Err(Error::TooManySubElements {
                inside: "KeyLocator",
            });
        }
        self.kind = kind;
        self.wire = Some(wire);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_roundtrip() {
        let mut locator = KeyLocator::name(Name::from_uri("/alice/KEY/1").unwrap());
        let wire = locator.wire_encode().unwrap().clone();

        let mut decoded = KeyLocator::digest(vec![0u8]);
        decoded.wire_decode(&wire).unwrap();
        assert_eq!(decoded, locator);
    }

    #[test]
    fn digest_roundtrip() {
        let mut locator = KeyLocator::digest(vec![0xAB; 32]);
        let wire = locator.wire_encode().unwrap().clone();
        assert_eq!(wire.tlv_type(), tlv::KEY_LOCATOR);

        let mut decoded = KeyLocator::name(Name::new());
        decoded.wire_decode(&wire).unwrap();
        match decoded.kind() {
            KeyLocatorKind::Digest(d) => assert_eq!(d, &vec![0xAB; 32]),
            other => panic!("decoded wrong kind: {:?}", other),
        }
    }

    #[test]
    fn empty_value_rejected() {
        let block = Block::from_slice(&[0x1C, 0x00]).unwrap();
        let mut locator = KeyLocator::digest(vec![]);
        assert_eq!(
            locator.wire_decode(&block),
            Err(Error::MissingSubElement {
                inside: "KeyLocator",
                expected: "Name or KeyDigest",
            })
        );
    }

    #[test]
    fn unknown_payload_rejected() {
        // KeyLocator wrapping a Data element.
        let block = Block::from_slice(&[0x1C, 0x02, 0x06, 0x00]).unwrap();
        let mut locator = KeyLocator::digest(vec![]);
        assert!(locator.wire_decode(&block).is_err());
    }

    #[test]
    fn second_child_rejected() {
        // KeyDigest followed by a stray Name.
        let block = Block::from_slice(&[0x1C, 0x05, 0x1D, 0x01, 0xAA, 0x07, 0x00]).unwrap();
        let mut locator = KeyLocator::digest(vec![]);
        assert_eq!(
            locator.wire_decode(&block),
            Err(Error::TooManySubElements {
                inside: "KeyLocator",
            })
        );
    }

    #[test]
    fn set_kind_invalidates_cache() {
        let mut locator = KeyLocator::digest(vec![1, 2, 3]);
        let first = locator.wire_encode().unwrap().clone();
        locator.set_kind(KeyLocatorKind::Digest(vec![4, 5, 6]));
        let second = locator.wire_encode().unwrap();
        assert_ne!(first, *second);
        assert_eq!(second.value_size(), first.value_size());
    }
}
