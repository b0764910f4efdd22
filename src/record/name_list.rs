use educe::Educe;

use crate::block::Block;
use crate::encode::{self, Sink};
use crate::error::{Error, Result};
use crate::name::Name;
use crate::tlv;

/// An ordered list of names, as returned by daemon list queries.
///
/// Encoding walks the list back to front so that the prepend-oriented
/// writer leaves the names in forward order on the wire.
#[derive(Clone, Debug, Default, Educe)]
#[educe(PartialEq)]
pub struct NameListRecord {
    names: Vec<Name>,
    #[educe(PartialEq(ignore))]
    wire: Option<Block>,
}

impl NameListRecord {
    pub fn new(names: Vec<Name>) -> Self {
        Self { names, wire: None }
    }

    pub fn names(&self) -> &[Name] {
        &self.names
    }

    pub fn push(&mut self, name: Name) {
        self.wire = None;
        self.names.push(name);
    }

    pub fn clear(&mut self) {
        self.wire = None;
        self.names.clear();
    }

    pub fn encode_into<S: Sink>(&self, sink: &mut S) -> Result<usize> {
        let mut total = 0;
        for name in self.names.iter().rev() {
            total += name.encode_into(sink)?;
        }
        total += sink.prepend_var_number(total as u64);
        total += sink.prepend_var_number(tlv::NAME_LIST);
        Ok(total)
    }

    encode::impl_wire_encode!();

    pub fn wire_decode(&mut self, wire: &Block) -> Result<()> {
        if !wire.has_wire() {
            return Err(Error::MissingWireBytes);
        }
        if wire.tlv_type() != tlv::NAME_LIST {
            return Err(Error::UnexpectedType {
                expected: tlv::NAME_LIST,
                actual: wire.tlv_type(),
            });
        }
        let mut wire = wire.clone();
        wire.parse()?;
        let mut names = Vec::new();
        // Children of other types are tolerated and skipped.
        for child in wire.elements() {
            if child.tlv_type() == tlv::NAME {
                let mut name = Name::new();
                name.wire_decode(child)?;
                names.push(name);
            }
        }
        self.names = names;
        self.wire = Some(wire);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_preserves_order() {
        let names: Vec<Name> = ["/alice", "/bob", "/carol/devices"]
            .iter()
            .map(|uri| Name::from_uri(uri).unwrap())
            .collect();
        let mut record = NameListRecord::new(names.clone());
        let wire = record.wire_encode().unwrap().clone();

        let mut decoded = NameListRecord::default();
        decoded.wire_decode(&wire).unwrap();
        assert_eq!(decoded.names(), &names[..]);
    }

    #[test]
    fn empty_list_roundtrip() {
        let mut record = NameListRecord::default();
        let wire = record.wire_encode().unwrap().clone();
        assert_eq!(wire.wire(), &[0x83, 0x00]);

        let mut decoded = NameListRecord::new(vec![Name::from_uri("/stale").unwrap()]);
        decoded.wire_decode(&wire).unwrap();
        assert!(decoded.names().is_empty());
    }

    #[test]
    fn non_name_children_skipped() {
        // Name, then a stray Bytes element, then another Name.
        let mut value = Vec::new();
        let mut first = Name::from_uri("/a").unwrap();
        value.extend_from_slice(first.wire_encode().unwrap().wire());
        value.extend_from_slice(&[0x87, 0x01, 0xFF]);
        let mut second = Name::from_uri("/b").unwrap();
        value.extend_from_slice(second.wire_encode().unwrap().wire());

        let mut wire = vec![0x83, value.len() as u8];
        wire.extend_from_slice(&value);
        let block = Block::from_vec(wire).unwrap();

        let mut decoded = NameListRecord::default();
        decoded.wire_decode(&block).unwrap();
        assert_eq!(decoded.names().len(), 2);
        assert_eq!(decoded.names()[0].to_string(), "/a");
        assert_eq!(decoded.names()[1].to_string(), "/b");
    }

    #[test]
    fn push_invalidates_cache() {
        let mut record = NameListRecord::default();
        let first = record.wire_encode().unwrap().clone();
        record.push(Name::from_uri("/alice").unwrap());
        let second = record.wire_encode().unwrap();
        assert_ne!(first, *second);

        let mut decoded = NameListRecord::default();
        decoded.wire_decode(&second.clone()).unwrap();
        assert_eq!(decoded.names().len(), 1);
    }
}
