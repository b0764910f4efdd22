//! Variable-width unsigned integers, as used for every TLV type and length
//! field, plus the fixed-width non-negative integer bodies carried inside
//! ErrorCode and SignatureType elements.
//!
//! A number below 253 occupies a single byte. Larger numbers start with a
//! discriminator byte (253, 254, or 255) followed by a big-endian u16, u32,
//! or u64. Each number has exactly one valid encoding: a decoder rejects any
//! value written with a wider form than it needs.

use byteorder::{BigEndian, ByteOrder, ReadBytesExt};

use crate::error::{Error, Result};

/// Widest possible encoding: discriminator plus a u64.
pub const MAX_SIZE: usize = 9;

/// Number of bytes `encode`/`write_tail` will use for `n`.
pub fn size(n: u64) -> usize {
    if n < 253 {
        1
    } else if n <= 0xFFFF {
        3
    } else if n <= 0xFFFF_FFFF {
        5
    } else {
        9
    }
}

/// Encodes `n` into the tail of `scratch`, returning the encoded length.
/// The bytes land in `scratch[MAX_SIZE - len..]`, ready to be prepended.
pub fn write_tail(scratch: &mut [u8; MAX_SIZE], n: u64) -> usize {
    if n < 253 {
        scratch[MAX_SIZE - 1] = n as u8;
        1
    } else if n <= 0xFFFF {
        scratch[MAX_SIZE - 3] = 253;
        BigEndian::write_u16(&mut scratch[MAX_SIZE - 2..], n as u16);
        3
    } else if n <= 0xFFFF_FFFF {
        scratch[MAX_SIZE - 5] = 254;
        BigEndian::write_u32(&mut scratch[MAX_SIZE - 4..], n as u32);
        5
    } else {
        scratch[MAX_SIZE - 9] = 255;
        BigEndian::write_u64(&mut scratch[MAX_SIZE - 8..], n);
        9
    }
}

/// Reads one number from the front of `input`, advancing the slice past it.
pub fn read(input: &mut &[u8]) -> Result<u64> {
    let first = input
        .read_u8()
        .map_err(|_| Error::BadVarNumber("input is empty"))?;
    match first {
        0..=252 => Ok(u64::from(first)),
        253 => {
            let n = input
                .read_u16::<BigEndian>()
                .map_err(|_| Error::BadVarNumber("truncated 2-byte form"))?;
            if n < 253 {
                return Err(Error::BadVarNumber("2-byte form used for a 1-byte value"));
            }
            Ok(u64::from(n))
        }
        254 => {
            let n = input
                .read_u32::<BigEndian>()
                .map_err(|_| Error::BadVarNumber("truncated 4-byte form"))?;
            if n <= 0xFFFF {
                return Err(Error::BadVarNumber("4-byte form used for a smaller value"));
            }
            Ok(u64::from(n))
        }
        255 => {
            let n = input
                .read_u64::<BigEndian>()
                .map_err(|_| Error::BadVarNumber("truncated 8-byte form"))?;
            if n <= 0xFFFF_FFFF {
                return Err(Error::BadVarNumber("8-byte form used for a smaller value"));
            }
            Ok(n)
        }
    }
}

/// Byte width of the shortest fixed-width body holding `n`.
pub fn nonneg_size(n: u64) -> usize {
    if n <= 0xFF {
        1
    } else if n <= 0xFFFF {
        2
    } else if n <= 0xFFFF_FFFF {
        4
    } else {
        8
    }
}

/// Encodes `n` big-endian into the tail of `scratch` at its shortest width,
/// returning the width used.
pub fn write_nonneg_tail(scratch: &mut [u8; 8], n: u64) -> usize {
    if n <= 0xFF {
        scratch[7] = n as u8;
        1
    } else if n <= 0xFFFF {
        BigEndian::write_u16(&mut scratch[6..], n as u16);
        2
    } else if n <= 0xFFFF_FFFF {
        BigEndian::write_u32(&mut scratch[4..], n as u32);
        4
    } else {
        BigEndian::write_u64(&mut scratch[..], n);
        8
    }
}

/// Decodes a fixed-width non-negative integer body. The whole of `value`
/// must be the integer; widths other than 1, 2, 4, or 8 are rejected.
pub fn read_nonneg(value: &[u8]) -> Result<u64> {
    match value.len() {
        1 => Ok(u64::from(value[0])),
        2 => Ok(u64::from(BigEndian::read_u16(value))),
        4 => Ok(u64::from(BigEndian::read_u32(value))),
        8 => Ok(BigEndian::read_u64(value)),
        width => Err(Error::BadNonNegativeInteger(width)),
    }
}
