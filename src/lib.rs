//! EBML-style variable-size integer (VINT) codec.
//!
//! A vint stores its own length: the first octet carries a run of `w`
//! zero bits followed by a single marker bit, and `w` continuation octets
//! follow. All bits after the marker, big-endian, form the value.
//!
//! ```text
//! octet 1:        [0]*w [1] [payload bits...]
//! octets 2..w+1:  [payload bits...]
//! ```
//!
//! Encoding picks the minimal width unless the caller asks for a wider
//! one; decoding works on exact buffers ([`decode_vint`]), blocking
//! streams ([`read_vint`]), async streams ([`read_vint_async`]) and
//! [`bytes::Buf`] cursors ([`get_vint`]). The stream forms consume
//! exactly the vint's bytes and nothing after it.
//!
//! ```
//! use vint::{decode_vint, encode_vint};
//!
//! let bytes = encode_vint(172351395);
//! assert_eq!(bytes, [0x1a, 0x45, 0xdf, 0xa3]);
//! assert_eq!(decode_vint(&bytes).unwrap(), 172351395);
//! ```
//!
//! Every operation is a pure, single-pass transformation over the
//! caller's buffer or stream; the codec keeps no state between calls.

mod error;
mod vint;

pub use error::{Error, Result};
pub use vint::{
    decode_vint, encode_vint, encode_vint_with_width, get_vint, min_octets, put_vint, read_vint,
    read_vint_async, vint_width,
};
