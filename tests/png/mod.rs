use pnggrep::{
  png::{PngChunkReader, PngChunkType, PngColorType, PngImage, PNG_SIGNATURE},
  PngError,
};

/// A 1x1 transparent RGBA image, as written by a real encoder.
const TINY_PNG: &[u8] = &[
  0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, // signature
  0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52, // IHDR
  0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, //
  0x1F, 0x15, 0xC4, 0x89, //
  0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, // IDAT
  0x78, 0x9C, 0x63, 0x00, 0x01, 0x00, 0x00, 0x05, 0x00, 0x01, //
  0x0D, 0x0A, 0x2D, 0xB4, //
  0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, // IEND
  0xAE, 0x42, 0x60, 0x82,
];

/// `TINY_PNG` with a `tEXt` chunk spliced in before the `IEND`.
fn tiny_png_with_text(text: &[u8]) -> Vec<u8> {
  let iend_at = TINY_PNG.len() - 12;
  let mut out = TINY_PNG[..iend_at].to_vec();
  out.extend_from_slice(&(text.len() as u32).to_be_bytes());
  out.extend_from_slice(b"tEXt");
  out.extend_from_slice(text);
  out.extend_from_slice(&[0; 4]);
  out.extend_from_slice(&TINY_PNG[iend_at..]);
  out
}

#[test]
fn test_tiny_png() {
  let image = PngImage::from_bytes(TINY_PNG).unwrap();
  assert_eq!((image.width(), image.height()), (1, 1));
  assert_eq!(image.color_type(), PngColorType::RGBA);
  assert_eq!(image.bit_depth(), 8);
  assert_eq!(image.chunk_count(), 3);
  assert_eq!(image.chunks()[0].declared_crc(), 0x1F15_C489);
  assert_eq!(image.chunks()[2].chunk_ty(), PngChunkType::IEND);
  assert!(image.text_chunks().is_empty());
}

#[test]
fn test_open_file() {
  let path = std::env::temp_dir().join(format!("pnggrep-open-{}.png", std::process::id()));
  std::fs::write(&path, tiny_png_with_text(b"Author\0Jane")).unwrap();
  let result = PngImage::open(&path);
  std::fs::remove_file(&path).unwrap();
  let image = result.unwrap();
  assert_eq!(image.chunk_count(), 4);
  assert_eq!(image.text_chunks(), vec![String::from("Author\0Jane")]);
}

#[test]
fn test_open_missing_file() {
  let path = std::env::temp_dir().join("pnggrep-this-file-does-not-exist.png");
  match PngImage::open(path) {
    Err(PngError::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
    other => panic!("{other:?}"),
  }
}

#[test]
fn test_every_truncation_is_an_error() {
  let full = tiny_png_with_text(b"Comment\0hi");
  // cutting at a chunk boundary is still a valid stream, anywhere else isn't.
  let boundaries = [8, 33, 55, 77, full.len()];
  for cut in 0..=full.len() {
    let result = PngImage::from_bytes(&full[..cut]);
    if cut > 8 && boundaries.contains(&cut) {
      assert!(result.is_ok(), "cut at {cut}: {result:?}");
    } else {
      assert!(result.is_err(), "cut at {cut}");
    }
  }
}

#[test]
fn test_PngChunkReader_no_panics() {
  // even totally random data should never panic the reader or the decoder!
  for _ in 0..10 {
    let v = super::rand_bytes(1024);
    for _ in PngChunkReader::new(&v[..]) {
      //
    }
    let _ = PngImage::from_bytes(&v);
    let mut with_signature = PNG_SIGNATURE.to_vec();
    with_signature.extend_from_slice(&v);
    let _ = PngImage::from_bytes(&with_signature);
  }
}
