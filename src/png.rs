#![forbid(unsafe_code)]

//! Module for writing PNG data.
//!
//! * [Portable Network Graphics Specification (Second Edition)][png-spec]
//!
//! [png-spec]: https://www.w3.org/TR/2003/REC-PNG-20031110/
//!
//! A PNG is an 8 byte signature followed by a series of "chunks". Every chunk
//! is laid out the same way:
//!
//! * 4 bytes, big-endian: the length of the chunk's data.
//! * 4 bytes: the chunk type, four ascii letters.
//! * `length` bytes: the data.
//! * 4 bytes, big-endian: CRC-32 of the chunk type and data.
//!
//! This module only has what's needed to *write* the chunks of a packed
//! script, plus a strict chunk reader that's handy for looking at the output.
//! The [`write_chunk`] function can deliberately break the chunk rules (short
//! length fields, missing CRCs) because browsers don't care, and those bytes
//! add up.

mod chunk;
pub use chunk::*;

mod crc32;
pub use crc32::*;

mod ihdr;
pub use ihdr::*;

mod raw_chunk;
pub use raw_chunk::*;

/// The 8 bytes that every PNG data stream starts with.
pub const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Checks if the PNG signature is correct.
///
/// * If this is the case, the rest of the bytes are very likely PNG data.
/// * If this is *not* the case, the rest of the bytes are very likely *not* PNG
///   data.
#[inline]
#[must_use]
pub const fn is_png_signature_correct(bytes: &[u8]) -> bool {
  matches!(bytes, [137, 80, 78, 71, 13, 10, 26, 10, ..])
}
