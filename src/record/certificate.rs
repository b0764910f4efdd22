use educe::Educe;

use crate::block::Block;
use crate::certificate::Certificate;
use crate::encode::{self, Sink};
use crate::error::{Error, Result};
use crate::tlv;

/// Wraps one certificate for transport to or from the daemon.
///
/// A default-constructed record is unset; the accessor fails until a
/// certificate is assigned or decoded.
#[derive(Clone, Debug, Default, Educe)]
#[educe(PartialEq)]
pub struct CertificateRecord {
    certificate: Option<Certificate>,
    #[educe(PartialEq(ignore))]
    wire: Option<Block>,
}

impl CertificateRecord {
    pub fn new(certificate: Certificate) -> Self {
        Self {
            certificate: Some(certificate),
            wire: None,
        }
    }

    pub fn is_set(&self) -> bool {
        self.certificate.is_some()
    }

    pub fn certificate(&self) -> Result<&Certificate> {
        self.certificate
            .as_ref()
            .ok_or(Error::NotSet("certificate"))
    }

    pub fn set_certificate(&mut self, certificate: Certificate) {
        self.wire = None;
        self.certificate = Some(certificate);
    }

    pub fn encode_into<S: Sink>(&self, sink: &mut S) -> Result<usize> {
        let certificate = self
            .certificate
            .as_ref()
            .ok_or(Error::NotSet("certificate"))?;
        let mut total = certificate.encode_into(sink)?;
        total += sink.prepend_var_number(total as u64);
        total += sink.prepend_var_number(tlv::CERTIFICATE);
        Ok(total)
    }

    encode::impl_wire_encode!();

    pub fn wire_decode(&mut self, wire: &Block) -> Result<()> {
        if !wire.has_wire() {
            return Err(Error::MissingWireBytes);
        }
        if wire.tlv_type() != tlv::CERTIFICATE {
            return Err(Error::UnexpectedType {
                expected: tlv::CERTIFICATE,
                actual: wire.tlv_type(),
            });
        }
        let mut certificate = Certificate::default();
        certificate.wire_decode(&wire.block_from_value()?)?;
        self.certificate = Some(certificate);
        self.wire = Some(wire.clone());
        Ok(())
    }
}
