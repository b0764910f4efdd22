use educe::Educe;

use crate::block::Block;
use crate::encode::{self, Sink};
use crate::error::{Error, Result};
use crate::name::Name;
use crate::tlv;

#[derive(Clone, Debug, PartialEq)]
struct KeyValue {
    key_name: Name,
    public_key: Vec<u8>,
}

/// A named public key.
///
/// The key bytes are opaque at this layer; whatever key encoding the crypto
/// layer produces goes over the wire untouched. A default-constructed
/// record is unset: its accessors fail until it is assigned or decoded.
#[derive(Clone, Debug, Default, Educe)]
#[educe(PartialEq)]
pub struct PublicKeyRecord {
    value: Option<KeyValue>,
    #[educe(PartialEq(ignore))]
    wire: Option<Block>,
}

impl PublicKeyRecord {
    pub fn new(key_name: Name, public_key: impl Into<Vec<u8>>) -> Self {
        Self {
            value: Some(KeyValue {
                key_name,
                public_key: public_key.into(),
            }),
            wire: None,
        }
    }

    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }

    pub fn key_name(&self) -> Result<&Name> {
        self.value
            .as_ref()
            .map(|v| &v.key_name)
            .ok_or(Error::NotSet("key name"))
    }

    pub fn public_key(&self) -> Result<&[u8]> {
        self.value
            .as_ref()
            .map(|v| v.public_key.as_slice())
            .ok_or(Error::NotSet("public key"))
    }

    pub fn set_key(&mut self, key_name: Name, public_key: impl Into<Vec<u8>>) {
        self.wire = None;
        self.value = Some(KeyValue {
            key_name,
            public_key: public_key.into(),
        });
    }

    pub fn encode_into<S: Sink>(&self, sink: &mut S) -> Result<usize> {
        let value = self.value.as_ref().ok_or(Error::NotSet("public key"))?;
        let mut total = encode::prepend_byte_block(sink, tlv::BYTES, &value.public_key);
        total += value.key_name.encode_into(sink)?;
        total += sink.prepend_var_number(total as u64);
        total += sink.prepend_var_number(tlv::PUBLIC_KEY);
        Ok(total)
    }

    encode::impl_wire_encode!();

    pub fn wire_decode(&mut self, wire: &Block) -> Result<()> {
        if !wire.has_wire() {
            return Err(Error::MissingWireBytes);
        }
        if wire.tlv_type() != tlv::PUBLIC_KEY {
            return Err(Error::UnexpectedType {
                expected: tlv::PUBLIC_KEY,
                actual: wire.tlv_type(),
            });
        }
        let mut wire = wire.clone();
        wire.parse()?;
        let mut elements = wire.elements().iter();

        let key_name = match elements.next() {
            Some(child) if child.tlv_type() == tlv::NAME => {
                let mut name = Name::new();
                name.wire_decode(child)?;
                name
            }
            Some(_) => {
                return Err(Error::SubElementOutOfOrder {
                    inside: "PublicKeyRecord",
                    expected: "Name",
                })
            }
            None => {
                return Err(Error::MissingSubElement {
                    inside: "PublicKeyRecord",
                    expected: "Name",
                })
            }
        };
        let public_key = match elements.next() {
            Some(child) if child.tlv_type() == tlv::BYTES => child.value().to_vec(),
            Some(_) => {
                return Err(Error::SubElementOutOfOrder {
                    inside: "PublicKeyRecord",
                    expected: "Bytes",
                })
            }
            None => {
                return Err(Error::MissingSubElement {
                    inside: "PublicKeyRecord",
                    expected: "Bytes",
                })
            }
        };
        if elements.next().is_some() {
            return Err(Error::TooManySubElements {
                inside: "PublicKeyRecord",
            });
        }

        self.value = Some(KeyValue {
            key_name,
            public_key,
        });
        self.wire = Some(wire);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::{SizeEstimator, WireBuffer};

    fn sample() -> PublicKeyRecord {
        PublicKeyRecord::new(
            Name::from_uri("/alice/KEY/1").unwrap(),
            vec![0x30, 0x82, 0x01, 0x0A],
        )
    }

    #[test]
    fn roundtrip() {
        let mut record = sample();
        let wire = record.wire_encode().unwrap().clone();

        let mut decoded = PublicKeyRecord::default();
        decoded.wire_decode(&wire).unwrap();
        assert_eq!(decoded, record);
        assert_eq!(decoded.key_name().unwrap().to_string(), "/alice/KEY/1");
        assert_eq!(decoded.public_key().unwrap(), &[0x30, 0x82, 0x01, 0x0A]);
    }

    #[test]
    fn unset_accessors_fail() {
        let record = PublicKeyRecord::default();
        assert!(!record.is_set());
        assert_eq!(record.key_name().err(), Some(Error::NotSet("key name")));
        assert_eq!(record.public_key().err(), Some(Error::NotSet("public key")));
    }

    #[test]
    fn unset_record_does_not_encode() {
        let mut record = PublicKeyRecord::default();
        assert_eq!(
            record.wire_encode().err(),
            Some(Error::NotSet("public key"))
        );
    }

    #[test]
    fn set_key_clears_cached_wire() {
        let mut record = sample();
        let first = record.wire_encode().unwrap().clone();
        record.set_key(Name::from_uri("/alice/KEY/2").unwrap(), vec![0xFF]);
        let second = record.wire_encode().unwrap();
        assert_ne!(first, *second);

        let mut decoded = PublicKeyRecord::default();
        decoded.wire_decode(&second.clone()).unwrap();
        assert_eq!(decoded.public_key().unwrap(), &[0xFF]);
    }

    #[test]
    fn swapped_children_rejected() {
        // Bytes first, Name second.
        let mut record = sample();
        let mut good = record.wire_encode().unwrap().clone();
        good.parse().unwrap();
        let children = good.elements();
        let mut swapped = vec![
            tlv::PUBLIC_KEY as u8,
            (children[0].size() + children[1].size()) as u8,
        ];
        swapped.extend_from_slice(children[1].wire());
        swapped.extend_from_slice(children[0].wire());
        let block = Block::from_vec(swapped).unwrap();

        let mut decoded = PublicKeyRecord::default();
        assert_eq!(
            decoded.wire_decode(&block),
            Err(Error::SubElementOutOfOrder {
                inside: "PublicKeyRecord",
                expected: "Name",
            })
        );
    }

    #[test]
    fn third_child_rejected() {
        let mut record = sample();
        let good = record.wire_encode().unwrap().clone();
        // Re-wrap the two children plus a stray empty Name.
        let mut value = good.value().to_vec();
        value.extend_from_slice(&[0x07, 0x00]);
        let mut wire = vec![tlv::PUBLIC_KEY as u8, value.len() as u8];
        wire.extend_from_slice(&value);
        let block = Block::from_vec(wire).unwrap();

        let mut decoded = PublicKeyRecord::default();
        assert_eq!(
            decoded.wire_decode(&block),
            Err(Error::TooManySubElements {
                inside: "PublicKeyRecord",
            })
        );
    }

    #[test]
    fn failed_decode_leaves_record_untouched() {
        let mut record = sample();
        let block = Block::from_slice(&[0x81, 0x02, 0x07, 0x00]).unwrap();
        assert!(record.wire_decode(&block).is_err());
        assert_eq!(record.key_name().unwrap().to_string(), "/alice/KEY/1");
    }

    #[test]
    fn random_key_sizes_roundtrip() {
        use rand::prelude::*;

        // Sweep the sizes where the length field changes width.
        let mut sizes: Vec<usize> = vec![0, 1];
        for i in 0..5 {
            sizes.push(250 + i);
            sizes.push(u16::MAX as usize - 2 + i);
        }

        let mut rng = thread_rng();
        for size in sizes {
            let mut key = vec![0u8; size];
            rng.fill_bytes(key.as_mut());
            let mut record =
                PublicKeyRecord::new(Name::from_uri("/alice/KEY/1").unwrap(), key.clone());
            let wire = record.wire_encode().unwrap().clone();

            let mut decoded = PublicKeyRecord::default();
            decoded.wire_decode(&wire).unwrap();
            assert_eq!(decoded.public_key().unwrap(), &key[..], "size {}", size);
        }
    }

    #[test]
    fn estimator_matches_written_size() {
        let record = sample();
        let mut estimator = SizeEstimator::new();
        record.encode_into(&mut estimator).unwrap();
        let mut buffer = WireBuffer::new(estimator.total());
        record.encode_into(&mut buffer).unwrap();
        let block = buffer.into_block().unwrap();
        assert_eq!(block.size(), estimator.total());
    }
}
