#![cfg_attr(docs_rs, feature(doc_cfg))]
#![warn(missing_docs)]

//! Packs a script into a PNG file that runs itself when opened as HTML.
//!
//! The script's bytes become the pixels of an 8-bit greyscale image. A private
//! chunk placed before the image data holds some HTML: a `<canvas>` and an
//! `<img>` that loads the file itself. When the file is opened in a browser,
//! the `onload` handler paints the image, reads the pixels back out as text,
//! and evaluates it. Since the image data is deflate compressed, this is a way
//! to get a compressed script that needs no separate decompressor.
//!
//! The work happens in a single pass:
//!
//! 1. [`layout`] puts the script into a [`PixelImage`].
//! 2. [`Compression::compress`] turns the filtered rows into a zlib stream.
//! 3. [`encode`] writes the PNG chunks around it.
//!
//! [`pack_script`] and [`pack_file`] do all of that for you.
//!
//! ```no_run
//! let stats = pnginator::pack_file("demo.js", "demo.png.html", &Default::default())?;
//! println!("{stats}");
//! # Ok::<(), pnginator::PnginatorError>(())
//! ```

#[cfg(not(any(feature = "miniz_oxide", feature = "zopfli")))]
compile_error!("pnginator needs at least one of the `miniz_oxide` or `zopfli` features!");

use std::{
  fs::File,
  io::{BufWriter, Write},
  path::Path,
};

pub mod bootstrap;

mod compress;
pub use compress::*;

mod encode;
pub use encode::*;

mod error;
pub use error::*;

pub mod layout;
pub use layout::{layout, LayoutMode, PixelImage};

pub mod png;

mod stats;
pub use stats::*;

/// All the settings for one packing run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PackOptions {
  /// how to compress the pixels
  pub compression: Compression,
  /// how strictly to follow the PNG format
  pub format: FormatOptions,
}

/// Checks that a script will survive the trip through the pixels.
///
/// ## Failure
/// * [`PnginatorError::ScriptContainsNul`] if there's a zero byte anywhere,
///   since the bootstrap stops reading at the first zero pixel.
#[inline]
pub fn validate_script(script: &[u8]) -> PnginatorResult<()> {
  match script.iter().position(|&b| b == 0) {
    Some(offset) => Err(PnginatorError::ScriptContainsNul { offset }),
    None => Ok(()),
  }
}

/// Packs a script, writing the PNG to `out`.
///
/// ## Failure
/// * The script contains a zero byte (nothing is written).
/// * The compressor fails (nothing is written).
/// * Writing fails (the output is left partially written).
pub fn pack_script<W: Write>(
  script: &[u8], options: &PackOptions, out: &mut W,
) -> PnginatorResult<CompressionStatistics> {
  validate_script(script)?;
  let image = layout(script);
  let compressed = options.compression.compress(image.as_filtered_bytes())?;
  let png_size = encode(&image, &compressed, options.format, out)?;
  Ok(CompressionStatistics { script_size: script.len(), png_size, mode: image.mode() })
}

/// Packs the script file at `script_path` into a new file at `png_path`.
///
/// The script is read fully before the output file is created. The output
/// file is truncated if it already exists.
///
/// ## Failure
/// * [`PnginatorError::ReadScript`] if the script file can't be read.
/// * Anything [`pack_script`] can fail with. A write failure leaves a partial
///   output file behind.
pub fn pack_file(
  script_path: impl AsRef<Path>, png_path: impl AsRef<Path>, options: &PackOptions,
) -> PnginatorResult<CompressionStatistics> {
  let script_path = script_path.as_ref();
  let script = std::fs::read(script_path)
    .map_err(|source| PnginatorError::ReadScript { path: script_path.to_path_buf(), source })?;
  log::debug!("read {} bytes from `{}`", script.len(), script_path.display());
  validate_script(&script)?;
  let mut out = BufWriter::new(File::create(png_path.as_ref())?);
  let stats = pack_script(&script, options, &mut out)?;
  out.flush()?;
  Ok(stats)
}
