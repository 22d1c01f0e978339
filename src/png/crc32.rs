use super::*;

const CRC_TABLE: [u32; 256] = make_crc_table();

const fn make_crc_table() -> [u32; 256] {
  let mut out = [0; 256];
  let mut n = 0;
  while n < 256 {
    let mut c = n as u32;
    let mut k = 0;
    while k < 8 {
      if (c & 1) != 0 {
        c = 0xEDB8_8320_u32 ^ (c >> 1);
      } else {
        c >>= 1;
      }
      //
      k += 1;
    }
    out[n] = c;
    //
    n += 1;
  }
  out
}

/// A running CRC-32, the flavor that PNG chunks use.
///
/// Feed it bytes with [`update`](Self::update) as many times as you like, then
/// call [`finish`](Self::finish) for the final value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Crc32(u32);
impl Default for Crc32 {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}
impl Crc32 {
  /// A fresh CRC with nothing fed into it yet.
  #[inline]
  #[must_use]
  pub const fn new() -> Self {
    Self(u32::MAX)
  }

  /// Feeds more bytes into the CRC.
  #[inline]
  pub fn update(&mut self, bytes: &[u8]) {
    let mut crc = self.0;
    for byte in bytes.iter().copied() {
      let i = (crc ^ u32::from(byte)) as u8 as usize;
      crc = CRC_TABLE[i] ^ (crc >> 8);
    }
    self.0 = crc;
  }

  /// The CRC of all bytes fed in so far.
  #[inline]
  #[must_use]
  pub const fn finish(self) -> u32 {
    self.0 ^ u32::MAX
  }
}

/// The CRC that a chunk of the given type and data should carry.
///
/// PNG's CRC covers the chunk type and the data, but not the length.
#[inline]
#[must_use]
pub fn png_crc(chunk_type: ChunkType, data: &[u8]) -> u32 {
  let mut crc = Crc32::new();
  crc.update(&chunk_type.0);
  crc.update(data);
  crc.finish()
}

#[test]
fn test_png_crc_known_values() {
  // every PNG's IEND chunk ends with these bytes
  assert_eq!(png_crc(ChunkType::IEND, &[]), 0xAE42_6082);
  assert_eq!(Crc32::new().finish(), 0);
  let mut crc = Crc32::new();
  crc.update(b"123456789");
  assert_eq!(crc.finish(), 0xCBF4_3926);
}
