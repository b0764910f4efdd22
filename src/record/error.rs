use std::borrow::Cow;

use educe::Educe;

use crate::block::Block;
use crate::encode::{self, Sink};
use crate::error::{Error, Result};
use crate::tlv;
use crate::varnum;

/// A daemon response carrying a numeric code and a diagnostic message.
///
/// The message travels as raw bytes. Peers written in other languages may
/// send text in any encoding, so nothing here validates UTF-8; use
/// [`ErrorRecord::message`] for a lossy text view.
#[derive(Clone, Debug, Default, Educe)]
#[educe(PartialEq)]
pub struct ErrorRecord {
    code: u64,
    message: Vec<u8>,
    #[educe(PartialEq(ignore))]
    wire: Option<Block>,
}

impl ErrorRecord {
    /// Code reported when an operation succeeded.
    pub const SUCCESS: u64 = 0;

    pub fn new(code: u64, message: impl Into<Vec<u8>>) -> Self {
        Self {
            code,
            message: message.into(),
            wire: None,
        }
    }

    pub fn code(&self) -> u64 {
        self.code
    }

    pub fn message_bytes(&self) -> &[u8] {
        &self.message
    }

    /// The message as text, with invalid UTF-8 replaced.
    pub fn message(&self) -> Cow<str> {
        String::from_utf8_lossy(&self.message)
    }

    pub fn set_code(&mut self, code: u64) {
        self.wire = None;
        self.code = code;
    }

    pub fn set_message(&mut self, message: impl Into<Vec<u8>>) {
        self.wire = None;
        self.message = message.into();
    }

    pub fn encode_into<S: Sink>(&self, sink: &mut S) -> Result<usize> {
        let mut total = encode::prepend_byte_block(sink, tlv::BYTES, &self.message);
        total += encode::prepend_nonneg_block(sink, tlv::ERROR_CODE, self.code);
        total += sink.prepend_var_number(total as u64);
        total += sink.prepend_var_number(tlv::ERROR);
        Ok(total)
    }

    encode::impl_wire_encode!();

    pub fn wire_decode(&mut self, wire: &Block) -> Result<()> {
        if !wire.has_wire() {
            return Err(Error::MissingWireBytes);
        }
        if wire.tlv_type() != tlv::ERROR {
            return Err(Error::UnexpectedType {
                expected: tlv::ERROR,
                actual: wire.tlv_type(),
            });
        }
        let mut wire = wire.clone();
        wire.parse()?;
        let mut elements = wire.elements().iter();

        let code = match elements.next() {
            Some(child) if child.tlv_type() == tlv::ERROR_CODE => {
                varnum::read_nonneg(child.value())?
            }
            Some(_) => {
                return Err(Error::SubElementOutOfOrder {
                    inside: "ErrorRecord",
                    expected: "ErrorCode",
                })
            }
            None => {
                return Err(Error::MissingSubElement {
                    inside: "ErrorRecord",
                    expected: "ErrorCode",
                })
            }
        };
        let message = match elements.next() {
            Some(child) if child.tlv_type() == tlv::BYTES => child.value().to_vec(),
            Some(_) => {
                return Err(Error::SubElementOutOfOrder {
                    inside: "ErrorRecord",
                    expected: "Bytes",
                })
            }
            None => {
                return Err(Error::MissingSubElement {
                    inside: "ErrorRecord",
                    expected: "Bytes",
                })
            }
        };

        self.code = code;
        self.message = message;
        self.wire = Some(wire);
        Ok(())
    }
}
