use super::*;

use core::fmt::Debug;

/// A chunk as a strict reader sees it.
///
/// This is whatever the length field says, with no checking of the CRC. For a
/// chunk written with a shortened length the `declared_crc` will actually be
/// the last 4 bytes of the data that was written.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PngRawChunk<'b> {
  /// the chunk type
  pub chunk_type: ChunkType,
  /// as many bytes as the length field claims
  pub data: &'b [u8],
  /// the 4 bytes after the data
  pub declared_crc: u32,
}
impl Debug for PngRawChunk<'_> {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("PngRawChunk")
      .field("chunk_type", &self.chunk_type)
      .field("data", &(&self.data[..self.data.len().min(12)], self.data.len()))
      .field("declared_crc", &self.declared_crc)
      .finish()
  }
}
impl PngRawChunk<'_> {
  /// The CRC that the type and data actually have.
  #[inline]
  #[must_use]
  pub fn actual_crc(&self) -> u32 {
    png_crc(self.chunk_type, self.data)
  }

  /// If the declared CRC is the actual CRC.
  #[inline]
  #[must_use]
  pub fn is_crc_correct(&self) -> bool {
    self.declared_crc == self.actual_crc()
  }
}

/// An iterator that produces successive raw chunks from PNG bytes.
///
/// Iteration ends at the first chunk that runs past the end of the bytes.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct PngRawChunkIter<'b>(&'b [u8]);
impl<'b> PngRawChunkIter<'b> {
  /// Pass the full PNG bytes, it will remove the PNG signature automatically.
  #[inline]
  pub const fn new(bytes: &'b [u8]) -> Self {
    match bytes {
      [_, _, _, _, _, _, _, _, rest @ ..] => Self(rest),
      _ => Self(&[]),
    }
  }

  /// The bytes that haven't been iterated yet.
  #[inline]
  #[must_use]
  pub const fn remaining(&self) -> &'b [u8] {
    self.0
  }

  fn pull_u32(&mut self) -> Option<[u8; 4]> {
    match self.0 {
      [a, b, c, d, rest @ ..] => {
        self.0 = rest;
        Some([*a, *b, *c, *d])
      }
      _ => None,
    }
  }
}
impl<'b> Iterator for PngRawChunkIter<'b> {
  type Item = PngRawChunk<'b>;
  #[inline]
  fn next(&mut self) -> Option<Self::Item> {
    let chunk_len = u32::from_be_bytes(self.pull_u32()?) as usize;
    let chunk_type = ChunkType(self.pull_u32()?);
    let data: &'b [u8] = if self.0.len() >= chunk_len {
      let (data, rest) = self.0.split_at(chunk_len);
      self.0 = rest;
      data
    } else {
      return None;
    };
    let declared_crc = u32::from_be_bytes(self.pull_u32()?);
    Some(PngRawChunk { chunk_type, data, declared_crc })
  }
}
