/// Image Header
///
/// Always the first chunk. The data is 13 bytes, with the two dimensions
/// stored big-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IHDR {
  /// width in pixels
  pub width: u32,
  /// height in pixels
  pub height: u32,
  /// bits per channel
  pub bit_depth: u8,
  /// pixel color type, 0 is greyscale
  pub color_type: u8,
  /// always 0 (zlib)
  pub compression_method: u8,
  /// always 0 (adaptive filtering, five filter types)
  pub filter_method: u8,
  /// 0 for no interlacing, 1 for Adam7
  pub interlace_method: u8,
}
impl IHDR {
  /// Byte length of the chunk data.
  pub const DATA_LEN: usize = 13;

  /// Header for an 8-bit greyscale, non-interlaced image.
  #[inline]
  #[must_use]
  pub const fn greyscale8(width: u32, height: u32) -> Self {
    Self {
      width,
      height,
      bit_depth: 8,
      color_type: 0,
      compression_method: 0,
      filter_method: 0,
      interlace_method: 0,
    }
  }

  /// The chunk data, one field at a time.
  #[inline]
  #[must_use]
  pub const fn to_bytes(&self) -> [u8; Self::DATA_LEN] {
    let [w0, w1, w2, w3] = self.width.to_be_bytes();
    let [h0, h1, h2, h3] = self.height.to_be_bytes();
    [
      w0,
      w1,
      w2,
      w3,
      h0,
      h1,
      h2,
      h3,
      self.bit_depth,
      self.color_type,
      self.compression_method,
      self.filter_method,
      self.interlace_method,
    ]
  }
}
impl TryFrom<&[u8]> for IHDR {
  type Error = ();
  fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
    match value {
      [w0, w1, w2, w3, h0, h1, h2, h3, bit_depth, color_type, compression_method, filter_method, interlace_method] => {
        Ok(Self {
          width: u32::from_be_bytes([*w0, *w1, *w2, *w3]),
          height: u32::from_be_bytes([*h0, *h1, *h2, *h3]),
          bit_depth: *bit_depth,
          color_type: *color_type,
          compression_method: *compression_method,
          filter_method: *filter_method,
          interlace_method: *interlace_method,
        })
      }
      _ => Err(()),
    }
  }
}

#[test]
fn test_ihdr_to_bytes() {
  let ihdr = IHDR::greyscale8(4096, 3);
  assert_eq!(ihdr.to_bytes(), [0, 0, 0x10, 0, 0, 0, 0, 3, 8, 0, 0, 0, 0]);
  assert_eq!(IHDR::try_from(&ihdr.to_bytes()[..]), Ok(ihdr));
  assert_eq!(IHDR::try_from(&[0_u8; 12][..]), Err(()));
}
