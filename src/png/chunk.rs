use super::*;

use core::fmt::{Debug, Write as _};
use std::io::Write;

use crate::error::{PnginatorError, PnginatorResult};

/// A PNG chunk type, four ascii letters.
///
/// The case of each letter is a property bit. Most importantly, a lowercase
/// first letter marks the chunk as ancillary, which lets a decoder skip it if
/// it doesn't know the type.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct ChunkType(pub [u8; 4]);
#[allow(nonstandard_style)]
impl ChunkType {
  /// Image header
  pub const IHDR: Self = Self(*b"IHDR");
  /// Image data
  pub const IDAT: Self = Self(*b"IDAT");
  /// Image end
  pub const IEND: Self = Self(*b"IEND");
  /// Holds the unpacking bootstrap. Not a registered type.
  pub const jawh: Self = Self(*b"jawh");
}
impl Debug for ChunkType {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_char(self.0[0] as char)?;
    f.write_char(self.0[1] as char)?;
    f.write_char(self.0[2] as char)?;
    f.write_char(self.0[3] as char)?;
    Ok(())
  }
}
impl ChunkType {
  /// If a decoder is allowed to skip this chunk when it doesn't know it.
  #[inline]
  #[must_use]
  pub const fn is_ancillary(self) -> bool {
    (self.0[0] & 0x20) != 0
  }
}

/// Ways that [`write_chunk`] may break the chunk format.
///
/// The default is to follow the format exactly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ChunkOptions {
  /// Skip the 4 CRC bytes after the data.
  pub omit_crc: bool,
  /// Declare a length 4 less than the data really is.
  ///
  /// A strict reader then takes the last 4 data bytes as the CRC, and the
  /// real CRC (if any) as the start of the next chunk.
  pub truncate_length_by_4: bool,
}

/// Writes one chunk, returning how many bytes were written.
///
/// The CRC, when written, is always computed over the full data, even if the
/// length field is shortened.
///
/// ## Failure
/// * The data is too long for the length field (or too short to be
///   shortened).
/// * Any write error.
pub fn write_chunk<W: Write>(
  out: &mut W, chunk_type: ChunkType, data: &[u8], options: ChunkOptions,
) -> PnginatorResult<usize> {
  let declared_len = if options.truncate_length_by_4 { data.len().checked_sub(4) } else { Some(data.len()) }
    .and_then(|len| u32::try_from(len).ok())
    .ok_or(PnginatorError::ChunkLength { chunk_type, len: data.len() })?;
  out.write_all(&declared_len.to_be_bytes())?;
  out.write_all(&chunk_type.0)?;
  out.write_all(data)?;
  let mut written = 8 + data.len();
  if !options.omit_crc {
    out.write_all(&png_crc(chunk_type, data).to_be_bytes())?;
    written += 4;
  }
  log::trace!(
    "wrote {chunk_type:?} chunk: {} data bytes, length field {declared_len}, {written} bytes total",
    data.len()
  );
  Ok(written)
}

#[test]
fn test_chunk_type_properties() {
  assert!(!ChunkType::IHDR.is_ancillary());
  assert!(!ChunkType::IDAT.is_ancillary());
  assert!(ChunkType::jawh.is_ancillary());
  assert_eq!(format!("{:?}", ChunkType::jawh), "jawh");
}

#[test]
fn test_write_chunk_strict() {
  let mut out = Vec::new();
  let n = write_chunk(&mut out, ChunkType::IEND, &[], ChunkOptions::default()).unwrap();
  assert_eq!(n, 12);
  assert_eq!(out, [0, 0, 0, 0, b'I', b'E', b'N', b'D', 0xAE, 0x42, 0x60, 0x82]);
}

#[test]
fn test_write_chunk_hacks() {
  let data = b"abcdefgh";
  let crc = png_crc(ChunkType::jawh, data).to_be_bytes();

  let mut out = Vec::new();
  let options = ChunkOptions { omit_crc: false, truncate_length_by_4: true };
  assert_eq!(write_chunk(&mut out, ChunkType::jawh, data, options).unwrap(), 20);
  assert_eq!(&out[..4], &4_u32.to_be_bytes());
  assert_eq!(&out[8..16], data);
  assert_eq!(&out[16..], &crc);

  let mut out = Vec::new();
  let options = ChunkOptions { omit_crc: true, truncate_length_by_4: true };
  assert_eq!(write_chunk(&mut out, ChunkType::jawh, data, options).unwrap(), 16);
  assert_eq!(out.len(), 16);

  let mut out = Vec::new();
  let options = ChunkOptions { omit_crc: true, truncate_length_by_4: false };
  assert_eq!(write_chunk(&mut out, ChunkType::IDAT, data, options).unwrap(), 16);
  assert_eq!(&out[..4], &8_u32.to_be_bytes());
}

#[test]
fn test_write_chunk_too_short_to_truncate() {
  let options = ChunkOptions { omit_crc: false, truncate_length_by_4: true };
  let err = write_chunk(&mut Vec::<u8>::new(), ChunkType::jawh, b"abc", options).unwrap_err();
  assert!(matches!(err, PnginatorError::ChunkLength { len: 3, .. }));
}
