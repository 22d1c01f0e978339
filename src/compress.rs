//! The zlib compressors that can squeeze the image data.
//!
//! PNG image data is a zlib stream. Either compressor here produces one, the
//! difference is only in how hard they try.

use core::num::NonZeroU64;

use crate::error::PnginatorResult;

/// Zlib compression level used by [`Compression::Deflate`] by default.
pub const DEFAULT_DEFLATE_LEVEL: u8 = 9;

/// Zopfli iteration count used by [`Compression::Zopfli`] by default.
pub const DEFAULT_ZOPFLI_ITERATIONS: NonZeroU64 = match NonZeroU64::new(10) {
  Some(n) => n,
  None => unreachable!(),
};

/// Which compressor to use for the image data, and its settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Compression {
  /// Standard deflate, via `miniz_oxide`.
  ///
  /// Fast, but leaves bytes on the table.
  #[cfg(feature = "miniz_oxide")]
  #[cfg_attr(docs_rs, doc(cfg(feature = "miniz_oxide")))]
  Deflate {
    /// 0 to 10, higher is smaller output. Values above 10 are treated as 10.
    level: u8,
  },
  /// Zopfli's exhaustive deflate, via the `zopfli` crate.
  ///
  /// Much slower, usually a few percent smaller.
  #[cfg(feature = "zopfli")]
  #[cfg_attr(docs_rs, doc(cfg(feature = "zopfli")))]
  Zopfli {
    /// More iterations take more time but can give slightly better results.
    iterations: NonZeroU64,
    /// Let zopfli split the data into several deflate blocks.
    block_splitting: bool,
  },
}
impl Default for Compression {
  #[inline]
  fn default() -> Self {
    #[cfg(feature = "zopfli")]
    {
      Self::Zopfli { iterations: DEFAULT_ZOPFLI_ITERATIONS, block_splitting: true }
    }
    #[cfg(not(feature = "zopfli"))]
    {
      Self::Deflate { level: DEFAULT_DEFLATE_LEVEL }
    }
  }
}
impl Compression {
  /// Compresses `data` into a zlib stream.
  ///
  /// The output only depends on `data` and the settings.
  pub fn compress(&self, data: &[u8]) -> PnginatorResult<Vec<u8>> {
    let compressed = match *self {
      #[cfg(feature = "miniz_oxide")]
      Self::Deflate { level } => miniz_oxide::deflate::compress_to_vec_zlib(data, level.min(10)),
      #[cfg(feature = "zopfli")]
      Self::Zopfli { iterations, block_splitting } => {
        let mut options = zopfli::Options::default();
        options.iteration_count = iterations;
        // a limit of one block means no splitting at all
        if !block_splitting {
          options.maximum_block_splits = 1;
        }
        let mut out = Vec::new();
        zopfli::compress(options, zopfli::Format::Zlib, data, &mut out)
          .map_err(|e| crate::PnginatorError::Compression(e.to_string()))?;
        out
      }
    };
    log::debug!("{self:?} compressed {} bytes to {}", data.len(), compressed.len());
    Ok(compressed)
  }
}

#[cfg(all(test, feature = "miniz_oxide"))]
fn inflate(zlib: &[u8]) -> Vec<u8> {
  miniz_oxide::inflate::decompress_to_vec_zlib(zlib).unwrap()
}

#[test]
#[cfg(feature = "miniz_oxide")]
fn test_deflate_is_zlib_and_deterministic() {
  let data = b"\0for(i=0;i<9;i++)console.log(i);\0".repeat(20);
  let compression = Compression::Deflate { level: DEFAULT_DEFLATE_LEVEL };
  let a = compression.compress(&data).unwrap();
  let b = compression.compress(&data).unwrap();
  assert_eq!(a, b);
  assert!(a.len() < data.len());
  assert_eq!(inflate(&a), data);
}

#[test]
#[cfg(all(feature = "zopfli", feature = "miniz_oxide"))]
fn test_zopfli_is_zlib() {
  let data = b"\0var a=1,b=2;alert(a+b);\0".repeat(30);
  for block_splitting in [true, false] {
    let compression = Compression::Zopfli { iterations: NonZeroU64::new(3).unwrap(), block_splitting };
    let out = compression.compress(&data).unwrap();
    assert_eq!(inflate(&out), data);
  }
}
