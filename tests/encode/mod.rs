use std::io::{self, Write};

use pnginator::{
  bootstrap::{bootstrap_for_height, SINGLE_ROW_BOOTSTRAP},
  encode, layout,
  png::{is_png_signature_correct, ChunkType, PngRawChunkIter, IHDR, PNG_SIGNATURE},
  Compression, FormatOptions, PixelImage, PnginatorError, DEFAULT_DEFLATE_LEVEL,
};

const STRICT: FormatOptions = FormatOptions { apply_format_hacks: false };
const HACKED: FormatOptions = FormatOptions { apply_format_hacks: true };

fn compressed(image: &PixelImage) -> Vec<u8> {
  Compression::Deflate { level: DEFAULT_DEFLATE_LEVEL }.compress(image.as_filtered_bytes()).unwrap()
}

fn encode_to_vec(image: &PixelImage, zlib: &[u8], options: FormatOptions) -> Vec<u8> {
  let mut out = Vec::new();
  let written = encode(image, zlib, options, &mut out).unwrap();
  assert_eq!(written, out.len());
  out
}

#[test]
fn test_encode_strict_size_accounting() {
  for len in [10, 4000, 5000, 9000] {
    let image = layout(&super::rand_script(len));
    let zlib = compressed(&image);
    let png = encode_to_vec(&image, &zlib, STRICT);
    let bootstrap_len = bootstrap_for_height(image.height()).len();
    let expected = 8 + (12 + 13) + (12 + bootstrap_len) + (12 + zlib.len()) + 12;
    assert_eq!(png.len(), expected, "len: {len}");
  }
}

#[test]
fn test_encode_format_hack_savings() {
  for len in [10, 5000] {
    let image = layout(&super::rand_script(len));
    let zlib = compressed(&image);
    let strict = encode_to_vec(&image, &zlib, STRICT);
    let hacked = encode_to_vec(&image, &zlib, HACKED);
    // the shortened jawh length field doesn't remove any bytes, only the two
    // crcs and the IEND chunk do
    assert_eq!(strict.len() - hacked.len(), 20, "len: {len}");
    assert_eq!(strict.len() - hacked.len(), FormatOptions::HACK_SAVINGS, "len: {len}");
  }
}

#[test]
fn test_encode_strict_is_a_valid_png() {
  let script = super::rand_script(5000);
  let image = layout(&script);
  let zlib = compressed(&image);
  let png = encode_to_vec(&image, &zlib, STRICT);
  assert!(is_png_signature_correct(&png));

  let chunks: Vec<_> = PngRawChunkIter::new(&png).collect();
  let types: Vec<ChunkType> = chunks.iter().map(|c| c.chunk_type).collect();
  assert_eq!(types, [ChunkType::IHDR, ChunkType::jawh, ChunkType::IDAT, ChunkType::IEND]);
  for chunk in chunks.iter() {
    assert!(chunk.is_crc_correct(), "{chunk:?}");
    // cross check against an independent CRC
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(&chunk.chunk_type.0);
    hasher.update(chunk.data);
    assert_eq!(hasher.finalize(), chunk.declared_crc);
  }
  assert_eq!(IHDR::try_from(chunks[0].data), Ok(IHDR::greyscale8(4096, 2)));
  assert_eq!(chunks[1].data, bootstrap_for_height(2).as_bytes());
  let pixels = super::inflate(chunks[2].data);
  assert_eq!(pixels, image.as_filtered_bytes());
}

#[test]
fn test_encode_hacked_layout() {
  let script = super::rand_script(10);
  let image = layout(&script);
  let zlib = compressed(&image);
  let png = encode_to_vec(&image, &zlib, HACKED);

  assert_eq!(&png[..8], &PNG_SIGNATURE);
  // IHDR is untouched
  assert_eq!(&png[8..12], &13_u32.to_be_bytes());
  assert_eq!(&png[12..16], b"IHDR");
  assert_eq!(&png[16..20], &11_u32.to_be_bytes());
  assert_eq!(&png[20..24], &1_u32.to_be_bytes());
  let rest = &png[8 + 12 + 13..];

  // the bootstrap's length is 4 short and there's no crc after it
  let boot = SINGLE_ROW_BOOTSTRAP.as_bytes();
  assert_eq!(&rest[..4], &(boot.len() as u32 - 4).to_be_bytes());
  assert_eq!(&rest[4..8], b"jawh");
  assert_eq!(&rest[8..8 + boot.len()], boot);
  let rest = &rest[8 + boot.len()..];

  // IDAT has its real length but no crc, and nothing follows it
  assert_eq!(&rest[..4], &(zlib.len() as u32).to_be_bytes());
  assert_eq!(&rest[4..8], b"IDAT");
  assert_eq!(&rest[8..], &zlib[..]);

  // a strict reader takes the bootstrap tail as the crc
  let mut it = PngRawChunkIter::new(&png);
  it.next().unwrap();
  let jawh = it.next().unwrap();
  assert_eq!(jawh.data, &boot[..boot.len() - 4]);
  let tail: [u8; 4] = boot[boot.len() - 4..].try_into().unwrap();
  assert_eq!(jawh.declared_crc, u32::from_be_bytes(tail));
}

#[test]
fn test_encode_picks_bootstrap_by_height() {
  for (len, height) in [(100, 1), (5000, 2), (9000, 3)] {
    let image = layout(&super::rand_script(len));
    assert_eq!(image.height(), height);
    let png = encode_to_vec(&image, &compressed(&image), STRICT);
    let jawh = PngRawChunkIter::new(&png).nth(1).unwrap();
    assert_eq!(jawh.chunk_type, ChunkType::jawh);
    if height == 1 {
      assert_eq!(jawh.data, SINGLE_ROW_BOOTSTRAP.as_bytes());
    } else {
      let text = std::str::from_utf8(jawh.data).unwrap();
      assert!(text.contains(&format!("getImageData(0,0,w,{height}).data")), "{text}");
    }
  }
}

/// Accepts `limit` bytes, then fails every write.
struct FailAfter {
  limit: usize,
  written: usize,
}
impl Write for FailAfter {
  fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
    if self.written + buf.len() > self.limit {
      return Err(io::Error::new(io::ErrorKind::Other, "disk full"));
    }
    self.written += buf.len();
    Ok(buf.len())
  }
  fn flush(&mut self) -> io::Result<()> {
    Ok(())
  }
}

#[test]
fn test_encode_write_failure_is_reported() {
  let image = layout(b"console.log(1)");
  let zlib = compressed(&image);
  for limit in [0, 8, 20, 40, 200] {
    let mut out = FailAfter { limit, written: 0 };
    let err = encode(&image, &zlib, STRICT, &mut out).unwrap_err();
    assert!(matches!(err, PnginatorError::Io(_)), "limit: {limit}, {err:?}");
  }
}
