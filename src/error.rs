use core::fmt;
use std::{io, path::PathBuf};

use crate::png::ChunkType;

/// Shorthand for results with a [`PnginatorError`].
pub type PnginatorResult<T> = Result<T, PnginatorError>;

/// An error from the `pnginator` crate.
#[derive(Debug)]
#[non_exhaustive]
pub enum PnginatorError {
  /// The script file couldn't be read.
  ReadScript {
    /// the file that was being read
    path: PathBuf,
    /// what went wrong
    source: io::Error,
  },

  /// The script has a zero byte in it.
  ///
  /// The bootstrap stops reading at the first zero pixel, so the script would
  /// be silently cut short at `offset`.
  ScriptContainsNul {
    /// position of the first zero byte
    offset: usize,
  },

  /// The compressor gave up.
  Compression(String),

  /// A chunk's data can't be described by its length field.
  ///
  /// Either it's longer than `u32::MAX`, or the length is being shortened by
  /// 4 and there aren't 4 bytes to take away.
  ChunkLength {
    /// the chunk being written
    chunk_type: ChunkType,
    /// the actual data length
    len: usize,
  },

  /// Writing the output failed.
  Io(io::Error),
}
impl fmt::Display for PnginatorError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::ReadScript { path, .. } => write!(f, "failed to read script file `{}`", path.display()),
      Self::ScriptContainsNul { offset } => {
        write!(f, "script contains a zero byte at offset {offset}, it would be truncated there")
      }
      Self::Compression(msg) => write!(f, "failed to compress image data: {msg}"),
      Self::ChunkLength { chunk_type, len } => {
        write!(f, "{chunk_type:?} chunk data of {len} bytes doesn't fit the length field")
      }
      Self::Io(_) => write!(f, "failed to write png data"),
    }
  }
}
impl std::error::Error for PnginatorError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      Self::ReadScript { source, .. } => Some(source),
      Self::Io(e) => Some(e),
      _ => None,
    }
  }
}
impl From<io::Error> for PnginatorError {
  #[inline]
  fn from(e: io::Error) -> Self {
    Self::Io(e)
  }
}
