//! ndn-wire implements the Type-Length-Value wire format that carries
//! identity, key, certificate, and signature metadata between a named-data
//! security daemon and its peers. It covers the encoding layer only: the
//! variable-width integers behind every type and length field, a two-pass
//! encoding engine that sizes a buffer exactly before filling it back to
//! front, a lazily parsed immutable element tree, and the family of record
//! codecs built on top of them.
//!
//! The pieces fit together like this:
//!
//! - Records are built in memory and encoded on demand. `wire_encode` first
//!   runs a counting pass over the same routine that later writes, so the
//!   output buffer is allocated once at its exact size and filled by
//!   prepending, innermost value first. The result is cached on the record
//!   until a setter changes a field.
//! - Received bytes are wrapped in a [`Block`], which knows its outer type
//!   and value bounds immediately and splits out child elements only when
//!   [`Block::parse`] is called. Blocks share one immutable backing buffer,
//!   so walking the tree never copies wire bytes.
//! - `wire_decode` on a record validates the outer type and each child's
//!   type and position, failing fast on anything malformed, truncated, or
//!   out of order. The one deliberate leniency is [`SignatureInfo`]'s
//!   extension tail, which preserves unrecognized trailing elements so
//!   newer signature algorithms can ship metadata past older decoders.
//!
//! ```
//! use ndn_wire::{Block, ErrorRecord};
//!
//! let mut record = ErrorRecord::new(404, "not found");
//! let wire = record.wire_encode()?.clone();
//!
//! let mut decoded = ErrorRecord::default();
//! decoded.wire_decode(&wire)?;
//! assert_eq!(decoded.code(), 404);
//! assert_eq!(decoded.message(), "not found");
//!
//! // The same bytes can be inspected without a record codec.
//! let mut block = Block::from_slice(wire.wire())?;
//! block.parse()?;
//! assert_eq!(block.elements().len(), 2);
//! # Ok::<(), ndn_wire::Error>(())
//! ```
//!
//! Nothing here interprets key or certificate bytes cryptographically, and
//! nothing performs I/O; transports hand complete elements in and take
//! complete elements out.

mod block;
mod certificate;
mod encode;
mod error;
mod key_locator;
mod name;
mod record;
mod signature_info;

pub mod tlv;
pub mod varnum;

pub use self::block::Block;
pub use self::certificate::Certificate;
pub use self::encode::{
    prepend_block, prepend_byte_block, prepend_nonneg_block, SizeEstimator, Sink, WireBuffer,
};
pub use self::error::{Error, Result};
pub use self::key_locator::{KeyLocator, KeyLocatorKind};
pub use self::name::Name;
pub use self::record::{
    CertificateRecord, ErrorRecord, IdentityRecord, NameListRecord, PublicKeyRecord, UserRecord,
};
pub use self::signature_info::SignatureInfo;
