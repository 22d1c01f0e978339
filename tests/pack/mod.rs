use std::num::NonZeroU64;

use pnginator::{
  pack_file, pack_script,
  png::{ChunkType, PngRawChunkIter},
  Compression, FormatOptions, LayoutMode, PackOptions, PnginatorError, DEFAULT_DEFLATE_LEVEL,
};

fn deflate_options(apply_format_hacks: bool) -> PackOptions {
  PackOptions {
    compression: Compression::Deflate { level: DEFAULT_DEFLATE_LEVEL },
    format: FormatOptions { apply_format_hacks },
  }
}

#[test]
fn test_pack_options_default() {
  let options = PackOptions::default();
  assert!(options.format.apply_format_hacks);
  assert_eq!(
    options.compression,
    Compression::Zopfli { iterations: NonZeroU64::new(10).unwrap(), block_splitting: true }
  );
}

#[test]
fn test_pack_script_statistics() {
  for (len, mode) in [(50, LayoutMode::SingleRow), (6000, LayoutMode::MultiRow)] {
    let script = super::rand_script(len);
    let mut out = Vec::new();
    let stats = pack_script(&script, &deflate_options(true), &mut out).unwrap();
    assert_eq!(stats.script_size, len);
    assert_eq!(stats.png_size, out.len());
    assert_eq!(stats.mode, mode);
  }
}

#[test]
fn test_pack_script_rejects_zero_bytes() {
  let mut out = Vec::new();
  let err = pack_script(b"alert(1)\0;", &deflate_options(true), &mut out).unwrap_err();
  assert!(matches!(err, PnginatorError::ScriptContainsNul { offset: 8 }), "{err:?}");
  assert!(out.is_empty());
}

#[test]
fn test_pack_script_compressors_agree_on_pixels() {
  let script = b"for(i=0;i<99;i++)document.body.innerHTML+=i+' ';".repeat(10);
  let zopfli = PackOptions {
    compression: Compression::Zopfli { iterations: NonZeroU64::new(2).unwrap(), block_splitting: false },
    format: FormatOptions { apply_format_hacks: false },
  };
  let mut pixels = Vec::new();
  for options in [deflate_options(false), zopfli] {
    let mut out = Vec::new();
    pack_script(&script, &options, &mut out).unwrap();
    let idat = PngRawChunkIter::new(&out).find(|c| c.chunk_type == ChunkType::IDAT).unwrap();
    pixels.push(super::inflate(idat.data));
  }
  assert_eq!(pixels[0], pixels[1]);
  assert_eq!(&pixels[0][1..1 + script.len()], &script[..]);
}

#[test]
fn test_pack_file() {
  let dir = tempfile::tempdir().unwrap();
  let script_path = dir.path().join("demo.js");
  let png_path = dir.path().join("demo.png.html");
  let script = super::rand_script(700);
  std::fs::write(&script_path, &script).unwrap();

  let mut expected = Vec::new();
  pack_script(&script, &deflate_options(true), &mut expected).unwrap();

  let stats = pack_file(&script_path, &png_path, &deflate_options(true)).unwrap();
  let written = std::fs::read(&png_path).unwrap();
  assert_eq!(written, expected);
  assert_eq!(stats.png_size, written.len());
}

#[test]
fn test_pack_file_missing_script() {
  let dir = tempfile::tempdir().unwrap();
  let png_path = dir.path().join("out.png.html");
  let err = pack_file(dir.path().join("nope.js"), &png_path, &deflate_options(true)).unwrap_err();
  assert!(matches!(err, PnginatorError::ReadScript { .. }), "{err:?}");
  assert!(!png_path.exists());
}

#[test]
fn test_pack_file_zero_byte_script_writes_nothing() {
  let dir = tempfile::tempdir().unwrap();
  let script_path = dir.path().join("bad.js");
  let png_path = dir.path().join("bad.png.html");
  std::fs::write(&script_path, b"\0").unwrap();
  let err = pack_file(&script_path, &png_path, &deflate_options(true)).unwrap_err();
  assert!(matches!(err, PnginatorError::ScriptContainsNul { offset: 0 }));
  assert!(!png_path.exists());
}
