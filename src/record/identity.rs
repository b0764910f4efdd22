use educe::Educe;

use crate::block::Block;
use crate::encode::{self, Sink};
use crate::error::{Error, Result};
use crate::name::Name;
use crate::tlv;

/// Names one identity known to the daemon.
#[derive(Clone, Debug, Default, Educe)]
#[educe(PartialEq)]
pub struct IdentityRecord {
    name: Name,
    #[educe(PartialEq(ignore))]
    wire: Option<Block>,
}

impl IdentityRecord {
    pub fn new(name: Name) -> Self {
        Self { name, wire: None }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn set_name(&mut self, name: Name) {
        self.wire = None;
        self.name = name;
    }

    pub fn encode_into<S: Sink>(&self, sink: &mut S) -> Result<usize> {
        let mut total = self.name.encode_into(sink)?;
        total += sink.prepend_var_number(total as u64);
        total += sink.prepend_var_number(tlv::IDENTITY);
        Ok(total)
    }

    encode::impl_wire_encode!();

    pub fn wire_decode(&mut self, wire: &Block) -> Result<()> {
        if !wire.has_wire() {
            return Err(Error::MissingWireBytes);
        }
        if wire.tlv_type() != tlv::IDENTITY {
            return Err(Error::UnexpectedType {
                expected: tlv::IDENTITY,
                actual: wire.tlv_type(),
            });
        }
        let mut name = Name::new();
        name.wire_decode(&wire.block_from_value()?)?;
        self.name = name;
        self.wire = Some(wire.clone());
        Ok(())
    }
}
