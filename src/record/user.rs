use educe::Educe;

use crate::block::Block;
use crate::certificate::Certificate;
use crate::encode::{self, Sink};
use crate::error::{Error, Result};
use crate::tlv;

/// Describes a daemon user by the management certificate that authorizes
/// changes to that user's records.
#[derive(Clone, Debug, Default, Educe)]
#[educe(PartialEq)]
pub struct UserRecord {
    mgmt_cert: Certificate,
    #[educe(PartialEq(ignore))]
    wire: Option<Block>,
}

impl UserRecord {
    pub fn new(mgmt_cert: Certificate) -> Self {
        Self {
            mgmt_cert,
            wire: None,
        }
    }

    pub fn mgmt_cert(&self) -> &Certificate {
        &self.mgmt_cert
    }

    pub fn set_mgmt_cert(&mut self, mgmt_cert: Certificate) {
        self.wire = None;
        self.mgmt_cert = mgmt_cert;
    }

    pub fn encode_into<S: Sink>(&self, sink: &mut S) -> Result<usize> {
        let mut total = self.mgmt_cert.encode_into(sink)?;
        total += sink.prepend_var_number(total as u64);
        total += sink.prepend_var_number(tlv::USER);
        Ok(total)
    }

    encode::impl_wire_encode!();

    pub fn wire_decode(&mut self, wire: &Block) -> Result<()> {
        if !wire.has_wire() {
            return Err(Error::MissingWireBytes);
        }
        if wire.tlv_type() != tlv::USER {
            return Err(Error::UnexpectedType {
                expected: tlv::USER,
                actual: wire.tlv_type(),
            });
        }
        let mut wire = wire.clone();
        wire.parse()?;
        let mut mgmt_cert = Certificate::default();
        match wire.elements().first() {
            Some(child) if child.tlv_type() == tlv::DATA => {
                mgmt_cert.wire_decode(child)?;
            }
            Some(_) => {
                return Err(Error::SubElementOutOfOrder {
                    inside: "UserRecord",
                    expected: "Data",
                })
            }
            None => {
                return Err(Error::MissingSubElement {
                    inside: "UserRecord",
                    expected: "Data",
                })
            }
        }
        self.mgmt_cert = mgmt_cert;
        self.wire = Some(wire);
        Ok(())
    }
}
