//! Places script bytes into the pixels of an 8-bit grayscale image.
//!
//! The unpacking bootstrap reads pixel values back out of a canvas one at a
//! time and stops at the first zero value, so the layout has to make sure a
//! zero byte follows the script. Short scripts go on a single row with one
//! extra zero pixel at the end. Longer scripts are wrapped onto rows of
//! [`MAX_ROW_WIDTH`] pixels, with one reserved zero pixel at the very start
//! (the multi-row bootstrap pre-increments its read cursor) and the unused
//! tail of the final row left as zero.

use core::fmt::Debug;

/// The widest row the bootstraps are written for.
///
/// The multi-row bootstrap hard codes this as its canvas width.
pub const MAX_ROW_WIDTH: usize = 4096;

/// Which of the two layouts an image uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LayoutMode {
  /// One row, script followed by a single zero sentinel pixel.
  SingleRow,
  /// Rows of [`MAX_ROW_WIDTH`] pixels, with a reserved leading pixel.
  MultiRow,
}

/// The pixel buffer of a packed script.
///
/// The data is stored *filtered*, which is to say each row of pixels is
/// preceded by a filter type byte (always "None" here). That's the exact form
/// a PNG encoder hands to the zlib compressor.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PixelImage {
  width: u32,
  height: u32,
  data: Vec<u8>,
}
impl Debug for PixelImage {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("PixelImage")
      .field("width", &self.width)
      .field("height", &self.height)
      .field("data", &(&self.data[..self.data.len().min(12)], self.data.len()))
      .finish()
  }
}
impl PixelImage {
  /// Width in pixels.
  #[inline]
  #[must_use]
  pub const fn width(&self) -> u32 {
    self.width
  }

  /// Height in pixels.
  #[inline]
  #[must_use]
  pub const fn height(&self) -> u32 {
    self.height
  }

  /// The layout that produced this image.
  #[inline]
  #[must_use]
  pub const fn mode(&self) -> LayoutMode {
    if self.height == 1 {
      LayoutMode::SingleRow
    } else {
      LayoutMode::MultiRow
    }
  }

  /// Bytes per row including the leading filter byte.
  #[inline]
  #[must_use]
  pub const fn stride(&self) -> usize {
    1 + self.width as usize
  }

  /// All rows, filter bytes included, as one slice.
  #[inline]
  #[must_use]
  pub fn as_filtered_bytes(&self) -> &[u8] {
    &self.data
  }

  /// Iterates the rows. Each row is the filter byte followed by `width`
  /// pixels.
  #[inline]
  pub fn rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
    self.data.chunks_exact(self.stride())
  }

  /// Reads the script back out of the pixels the same way the bootstrap
  /// does.
  ///
  /// Filter bytes are skipped, as is the reserved first pixel of a multi-row
  /// image, and reading stops at the first zero pixel.
  #[must_use]
  pub fn extract_script(&self) -> Vec<u8> {
    let reserved = match self.mode() {
      LayoutMode::SingleRow => 0,
      LayoutMode::MultiRow => 1,
    };
    self
      .rows()
      .flat_map(|row| row[1..].iter().copied())
      .skip(reserved)
      .take_while(|&pixel| pixel != 0)
      .collect()
  }
}

/// Lays a script out into pixels.
///
/// * If `script.len() + 1` is less than [`MAX_ROW_WIDTH`] the image is a
///   single row exactly that wide.
/// * Otherwise the image is [`MAX_ROW_WIDTH`] wide and
///   `ceil((script.len() + 1) / MAX_ROW_WIDTH)` rows tall, but never less
///   than 2 rows, so that the multi-row bootstrap is the one that gets used.
///
/// This never fails. A script that contains a zero byte still gets laid out,
/// but it won't read back past that zero.
#[must_use]
pub fn layout(script: &[u8]) -> PixelImage {
  let encoded_len = script.len() + 1;
  let image = if encoded_len < MAX_ROW_WIDTH {
    let width = encoded_len;
    let mut data = zeroed_rows(width, 1);
    // the sentinel after the script is already zero
    data[1..encoded_len].copy_from_slice(script);
    PixelImage { width: width as u32, height: 1, data }
  } else {
    let width = MAX_ROW_WIDTH;
    let height = ((encoded_len + width - 1) / width).max(2);
    let mut data = zeroed_rows(width, height);
    let mut rest = script;
    for (y, row) in data.chunks_exact_mut(1 + width).enumerate() {
      let pixels = &mut row[1..];
      let target = if y == 0 { &mut pixels[1..] } else { pixels };
      let count = target.len().min(rest.len());
      let (now, later) = rest.split_at(count);
      target[..count].copy_from_slice(now);
      rest = later;
      if rest.is_empty() {
        break;
      }
    }
    PixelImage { width: width as u32, height: height as u32, data }
  };
  log::debug!(
    "laid out {} script bytes as {:?}, {}x{}",
    script.len(),
    image.mode(),
    image.width,
    image.height
  );
  image
}

/// A zero filled buffer for `height` rows of `width` pixels plus their
/// filter bytes.
///
/// Zero is also filter type "None", so every row is already marked as
/// unfiltered.
#[inline]
#[must_use]
fn zeroed_rows(width: usize, height: usize) -> Vec<u8> {
  vec![0_u8; (1 + width) * height]
}

#[test]
fn test_layout_single_row_shape() {
  let image = layout(b"alert(1);");
  assert_eq!(image.mode(), LayoutMode::SingleRow);
  assert_eq!((image.width(), image.height()), (10, 1));
  assert_eq!(image.as_filtered_bytes(), b"\0alert(1);\0");
}

#[test]
fn test_layout_empty_script() {
  let image = layout(b"");
  assert_eq!((image.width(), image.height()), (1, 1));
  assert_eq!(image.as_filtered_bytes(), &[0_u8, 0]);
  assert!(image.extract_script().is_empty());
}

#[test]
fn test_layout_mode_boundary() {
  for len in [4093, 4094] {
    let image = layout(&vec![b'a'; len]);
    assert_eq!(image.height(), 1, "len: {len}");
    assert_eq!(image.width() as usize, len + 1, "len: {len}");
  }
  for len in [4095, 4096, 8190, 8191, 8192] {
    let image = layout(&vec![b'a'; len]);
    assert!(image.height() > 1, "len: {len}");
    assert_eq!(image.width() as usize, MAX_ROW_WIDTH, "len: {len}");
  }
}

#[test]
fn test_layout_multi_row_height() {
  for (len, expected) in [(4096, 2), (8191, 2), (8192, 3), (12287, 3), (12288, 4)] {
    assert_eq!(layout(&vec![b'x'; len]).height(), expected, "len: {len}");
  }
}

#[test]
fn test_layout_multi_row_placement() {
  let script: Vec<u8> = (0..5000_u32).map(|i| b'!' + (i % 90) as u8).collect();
  let image = layout(&script);
  assert_eq!((image.width(), image.height()), (4096, 2));
  let rows: Vec<&[u8]> = image.rows().collect();
  assert_eq!(rows.len(), 2);
  // filter byte, reserved pixel, then the first 4095 script bytes
  assert_eq!(rows[0][0], 0);
  assert_eq!(rows[0][1], 0);
  assert_eq!(&rows[0][2..], &script[..4095]);
  assert_eq!(rows[1][0], 0);
  assert_eq!(&rows[1][1..1 + 905], &script[4095..]);
  assert!(rows[1][1 + 905..].iter().all(|&b| b == 0));
  assert_eq!(image.extract_script(), script);
}

#[test]
fn test_extract_stops_at_embedded_zero() {
  let image = layout(b"abc\0def");
  assert_eq!(image.extract_script(), b"abc");
}
