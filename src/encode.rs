//! Writes a laid out, compressed image as a PNG that's also an HTML page.
//!
//! The chunks go out in this order:
//!
//! 1. `IHDR` with the image dimensions, 8-bit greyscale.
//! 2. `jawh`, a private chunk that holds the [bootstrap](crate::bootstrap).
//! 3. `IDAT` with the compressed pixel rows.
//! 4. `IEND`, unless format hacks are on.
//!
//! ## Format hacks
//!
//! Browsers only need the image to decode, they don't check the chunk
//! bookkeeping. With [`FormatOptions::apply_format_hacks`] set:
//!
//! * The `jawh` length field is 4 less than the real length, so a strict
//!   reader takes the last 4 bytes of the bootstrap as its CRC. All of the
//!   bootstrap is still written, so this alone saves nothing.
//! * `jawh` has no CRC of its own. (-4 bytes)
//! * `IDAT` has no CRC. (-4 bytes)
//! * There's no `IEND` chunk, the end of the file ends the image. (-12 bytes)
//!
//! That's 20 bytes saved compared to a valid PNG of the same content.

use std::io::Write;

use crate::{
  bootstrap::bootstrap_for_height,
  error::PnginatorResult,
  layout::PixelImage,
  png::{write_chunk, ChunkOptions, ChunkType, IHDR, PNG_SIGNATURE},
};

/// How strictly to follow the PNG format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FormatOptions {
  /// Break the chunk rules where browsers don't mind, to save 20 bytes.
  pub apply_format_hacks: bool,
}
impl Default for FormatOptions {
  #[inline]
  fn default() -> Self {
    Self { apply_format_hacks: true }
  }
}
impl FormatOptions {
  /// Number of bytes the hacks remove from the output: the `jawh` CRC, the
  /// `IDAT` CRC and the whole `IEND` chunk.
  pub const HACK_SAVINGS: usize = 4 + 4 + 12;

  #[inline]
  #[must_use]
  const fn bootstrap_chunk(self) -> ChunkOptions {
    ChunkOptions {
      omit_crc: self.apply_format_hacks,
      truncate_length_by_4: self.apply_format_hacks,
    }
  }

  #[inline]
  #[must_use]
  const fn idat_chunk(self) -> ChunkOptions {
    ChunkOptions { omit_crc: self.apply_format_hacks, truncate_length_by_4: false }
  }
}

/// Writes the full output file, returning how many bytes were written.
///
/// `compressed` must be the zlib compressed form of
/// [`image.as_filtered_bytes()`](PixelImage::as_filtered_bytes).
///
/// ## Failure
/// Any write error stops the encoding right there. Whatever was already
/// written stays written.
pub fn encode<W: Write>(
  image: &PixelImage, compressed: &[u8], options: FormatOptions, out: &mut W,
) -> PnginatorResult<usize> {
  out.write_all(&PNG_SIGNATURE)?;
  let mut written = PNG_SIGNATURE.len();

  let ihdr = IHDR::greyscale8(image.width(), image.height());
  written += write_chunk(out, ChunkType::IHDR, &ihdr.to_bytes(), ChunkOptions::default())?;

  let bootstrap = bootstrap_for_height(image.height());
  written += write_chunk(out, ChunkType::jawh, bootstrap.as_bytes(), options.bootstrap_chunk())?;

  written += write_chunk(out, ChunkType::IDAT, compressed, options.idat_chunk())?;

  if !options.apply_format_hacks {
    written += write_chunk(out, ChunkType::IEND, &[], ChunkOptions::default())?;
  }

  log::debug!(
    "encoded {}x{} image, {} compressed bytes, hacks: {}, {written} bytes total",
    image.width(),
    image.height(),
    compressed.len(),
    options.apply_format_hacks
  );
  Ok(written)
}
