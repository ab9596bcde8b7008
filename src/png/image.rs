use std::{
  fs::File,
  io::{BufReader, Read},
  path::Path,
};

use log::debug;

use super::*;
use crate::{PngError, PngResult};

/// A fully read and validated PNG.
///
/// You can only get one of these by decoding, and decoding either checks
/// everything or gives an error, so the header fields here are always legal.
///
/// The `IHDR` chunk is decoded into the header fields, but it also stays in
/// [`chunks`](Self::chunks) as the first chunk.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PngImage {
  header: IHDR,
  chunks: Vec<PngChunk>,
}
impl PngImage {
  /// Reads an entire PNG stream.
  ///
  /// The source is read until it's exhausted. Nothing is returned until every
  /// chunk is in memory and the header has been checked.
  pub fn decode<R: Read>(mut source: R) -> PngResult<Self> {
    let mut signature = [0_u8; PNG_SIGNATURE.len()];
    let got = read_full(&mut source, &mut signature)?;
    if !is_png_signature_correct(&signature[..got]) {
      return Err(PngError::bad_signature(&signature[..got]));
    }
    let chunks = PngChunkReader::new(source).collect::<PngResult<Vec<PngChunk>>>()?;
    let header = IHDR::try_from(chunks.first().ok_or(PngError::MissingHeaderChunk)?)?;
    debug!(
      "decoded {}x{} PNG, color type {:?} at {} bits, {} chunks",
      header.width,
      header.height,
      header.color_type,
      header.bit_depth,
      chunks.len()
    );
    Ok(Self { header, chunks })
  }

  /// Decodes PNG data that's already in memory.
  #[inline]
  pub fn from_bytes(bytes: &[u8]) -> PngResult<Self> {
    Self::decode(bytes)
  }

  /// Opens and decodes a PNG file.
  pub fn open<P: AsRef<Path>>(path: P) -> PngResult<Self> {
    let file = File::open(path)?;
    Self::decode(BufReader::new(file))
  }

  /// The validated `IHDR` data.
  #[inline]
  #[must_use]
  pub const fn header(&self) -> &IHDR {
    &self.header
  }
  #[inline]
  #[must_use]
  pub const fn width(&self) -> u32 {
    self.header.width
  }
  #[inline]
  #[must_use]
  pub const fn height(&self) -> u32 {
    self.header.height
  }
  #[inline]
  #[must_use]
  pub const fn bit_depth(&self) -> u8 {
    self.header.bit_depth
  }
  #[inline]
  #[must_use]
  pub const fn color_type(&self) -> PngColorType {
    self.header.color_type
  }
  #[inline]
  #[must_use]
  pub const fn compression_method(&self) -> u8 {
    self.header.compression_method
  }
  #[inline]
  #[must_use]
  pub const fn filter_method(&self) -> u8 {
    self.header.filter_method
  }
  #[inline]
  #[must_use]
  pub const fn interlace_method(&self) -> u8 {
    self.header.interlace_method
  }

  /// All chunks, in the order they appeared in the stream.
  #[inline]
  #[must_use]
  pub fn chunks(&self) -> &[PngChunk] {
    &self.chunks
  }
  #[inline]
  #[must_use]
  pub fn chunk_count(&self) -> usize {
    self.chunks.len()
  }
}
