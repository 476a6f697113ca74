use std::io::{self, Read};

use bytes::{Buf, BufMut};
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::error::{invalid_width_error, limit_error, malformed_error, Error, Result};

/// Payload bits of the octet holding the marker: everything after the
/// marker bit itself.
#[inline]
fn payload_mask(width: usize) -> u8 {
    (1u8 << (7 - width % 8)) - 1
}

/// Shifts one more octet into the value, rejecting payloads that do not
/// fit in 64 bits instead of truncating them.
#[inline]
fn push_octet(value: u64, octet: u8) -> Result<u64> {
    if value >> 56 != 0 {
        return limit_error("vint payload exceeds 64 bits");
    }
    Ok((value << 8) | u64::from(octet))
}

fn stream_octet_err(err: io::Error) -> Error {
    if err.kind() == io::ErrorKind::UnexpectedEof {
        Error::Malformed("stream ended mid-vint")
    } else {
        Error::IoError(err)
    }
}

fn read_octet<R: Read>(reader: &mut R) -> Result<u8> {
    let mut octet = [0u8; 1];
    reader.read_exact(&mut octet).map_err(stream_octet_err)?;
    Ok(octet[0])
}

/// Returns the width `w` of the vint starting at the front of `buf`: the
/// number of continuation octets after the first one, so the whole vint
/// occupies `w + 1` octets.
///
/// Every all-zero octet contributes 8 to the width; the first nonzero
/// octet contributes its leading-zero count and holds the marker bit.
/// Fails with [`Error::Malformed`] if no marker bit is found before the
/// buffer runs out.
pub fn vint_width(buf: &[u8]) -> Result<usize> {
    let mut width = 0;
    for &octet in buf {
        if octet == 0 {
            width += 8;
        } else {
            return Ok(width + octet.leading_zeros() as usize);
        }
    }
    malformed_error("no marker bit in buffer")
}

/// Returns the minimal number of octets a vint for `value` occupies.
///
/// Each octet carries 7 payload bits, so this is the base-128 digit
/// count of `value` (1 for zero).
pub fn min_octets(value: u64) -> usize {
    let mut octets = 1;
    let mut remaining = value >> 7;
    while remaining != 0 {
        octets += 1;
        remaining >>= 7;
    }
    octets
}

fn encode_into(value: u64, octet_length: usize) -> Vec<u8> {
    // Serialize the payload big-endian into the low end of the buffer.
    let mut buf = vec![0u8; octet_length];
    let mut remaining = value;
    for slot in buf.iter_mut().rev() {
        *slot = remaining as u8;
        remaining >>= 8;
        if remaining == 0 {
            break;
        }
    }
    // The marker bit sits `octet_length` bit positions down from the top
    // of the buffer. The minimality precondition keeps it clear of the
    // payload bits, so OR is enough.
    buf[(octet_length - 1) / 8] |= 0x80 >> ((octet_length + 7) % 8);
    buf
}

/// Encodes `value` as a minimal-width vint.
///
/// # Examples
///
/// ```
/// assert_eq!(vint::encode_vint(2), [0x82]);
/// assert_eq!(vint::encode_vint(172351395), [0x1a, 0x45, 0xdf, 0xa3]);
/// ```
pub fn encode_vint(value: u64) -> Vec<u8> {
    encode_into(value, min_octets(value))
}

/// Encodes `value` as a vint of exactly `octet_length` octets.
///
/// Fails with [`Error::InvalidWidth`] when `octet_length` is smaller than
/// the minimal width for `value` (which also rejects a length of zero).
/// No partial output is produced on failure.
pub fn encode_vint_with_width(value: u64, octet_length: usize) -> Result<Vec<u8>> {
    let required = min_octets(value);
    if octet_length < required {
        return invalid_width_error(octet_length, required);
    }
    Ok(encode_into(value, octet_length))
}

/// Appends a minimal-width vint for `value` to `buf`.
pub fn put_vint<B: BufMut>(buf: &mut B, value: u64) {
    buf.put_slice(&encode_into(value, min_octets(value)));
}

/// Decodes a buffer holding exactly one vint and nothing else.
///
/// The buffer length must equal `vint_width(buf) + 1`; anything shorter
/// (truncation) or longer (trailing garbage) fails with
/// [`Error::Malformed`].
pub fn decode_vint(buf: &[u8]) -> Result<u64> {
    let width = vint_width(buf)?;
    if buf.len() != width + 1 {
        return malformed_error("buffer length does not match encoded width");
    }
    // The first `width / 8` octets are all zero and already counted; the
    // next octet holds the marker.
    let zeros = width / 8;
    let mut value = u64::from(buf[zeros] & payload_mask(width));
    for &octet in &buf[zeros + 1..] {
        value = push_octet(value, octet)?;
    }
    Ok(value)
}

/// Parses a vint from a blocking byte stream.
///
/// Reads one octet at a time until the octet holding the marker bit
/// appears, then reads exactly the continuation octets that belong to the
/// vint. The reader is left positioned on the first byte after the vint;
/// nothing beyond it is consumed.
///
/// # Arguments
/// * `reader`: A reader to pull bytes from.
///
/// # Returns
/// A `Result` containing the parsed `u64` value. End of input before the
/// vint is complete is reported as [`Error::Malformed`]; any other stream
/// failure as [`Error::IoError`].
pub fn read_vint<R: Read>(reader: &mut R) -> Result<u64> {
    // 1. Scan for the octet holding the marker bit. Each all-zero octet
    //    adds 8 to the width.
    let mut width = 0;
    let head = loop {
        let octet = read_octet(reader)?;
        if octet != 0 {
            break octet;
        }
        width += 8;
    };
    width += head.leading_zeros() as usize;

    // 2. Clear the marker bit; the low bits of the head octet are the
    //    first payload bits.
    let mut value = u64::from(head & payload_mask(width));

    // 3. The zero octets consumed in step 1 count toward the width but
    //    were already read, so `width - width / 8` octets remain.
    for _ in 0..(width - width / 8) {
        let octet = read_octet(reader)?;
        value = push_octet(value, octet)?;
    }

    Ok(value)
}

/// Parses a vint from an async byte stream.
///
/// Same contract as [`read_vint`], over a `tokio` reader.
pub async fn read_vint_async<R: AsyncRead + Unpin>(reader: &mut R) -> Result<u64> {
    let mut width = 0;
    let head = loop {
        let octet = reader.read_u8().await.map_err(stream_octet_err)?;
        if octet != 0 {
            break octet;
        }
        width += 8;
    };
    width += head.leading_zeros() as usize;

    let mut value = u64::from(head & payload_mask(width));
    for _ in 0..(width - width / 8) {
        let octet = reader.read_u8().await.map_err(stream_octet_err)?;
        value = push_octet(value, octet)?;
    }

    Ok(value)
}

/// Parses a vint from the front of a [`Buf`], advancing the cursor
/// exactly past it.
pub fn get_vint<B: Buf>(buf: &mut B) -> Result<u64> {
    let mut width = 0;
    let head = loop {
        if !buf.has_remaining() {
            return malformed_error("input ended before the marker bit");
        }
        let octet = buf.get_u8();
        if octet != 0 {
            break octet;
        }
        width += 8;
    };
    width += head.leading_zeros() as usize;

    let mut value = u64::from(head & payload_mask(width));
    for _ in 0..(width - width / 8) {
        if !buf.has_remaining() {
            return malformed_error("input ended mid-vint");
        }
        value = push_octet(value, buf.get_u8())?;
    }

    Ok(value)
}
