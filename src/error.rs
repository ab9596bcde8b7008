use core::fmt;

use thiserror::Error;

use crate::png::{PngChunkType, PngColorType, PNG_SIGNATURE};

/// Shorthand for results from this crate.
pub type PngResult<T> = Result<T, PngError>;

/// An error from decoding PNG data.
///
/// Every error is terminal for the decode that produced it. There's no
/// partially decoded image to fall back on.
#[derive(Debug, Error)]
pub enum PngError {
  /// The underlying source failed for a reason other than running out of
  /// bytes.
  #[error(transparent)]
  Io(#[from] std::io::Error),

  /// The stream ended partway through a chunk.
  #[error("short read of chunk {field}: expected {expected} bytes, got {actual}")]
  ShortRead { field: ChunkField, expected: usize, actual: usize },

  /// The first 8 bytes aren't the PNG signature (or there weren't 8 bytes).
  #[error("wrong PNG header: got {:02X?}, expected {:02X?}", .received, .expected)]
  BadSignature { received: Vec<u8>, expected: [u8; 8] },

  /// The stream had a signature but no chunks at all.
  #[error("missing IHDR chunk: no chunks present")]
  MissingHeaderChunk,

  /// The chunk used as the header isn't an `IHDR` chunk.
  #[error("expected IHDR as the first chunk, found {found}")]
  NotHeaderChunk { found: PngChunkType },

  /// The IHDR chunk declared the wrong payload length.
  #[error("invalid IHDR length: got {actual}, expected {expected}")]
  HeaderLength { expected: usize, actual: usize },

  /// Width or height is zero or too large.
  #[error("invalid {field} in IHDR: expected 0 < {field} <= 2^31, got {value}")]
  InvalidDimension { field: HeaderField, value: u32 },

  #[error("invalid color type: expected one of [0, 2, 3, 4, 6], got {0}")]
  InvalidColorType(u8),

  /// The bit depth isn't allowed for the color type.
  #[error("color type {color_type:?} can't use bit depth {bit_depth}: expected one of {allowed:?}")]
  InvalidBitDepth { color_type: PngColorType, bit_depth: u8, allowed: &'static [u8] },

  #[error("invalid compression method: expected 0, got {0}")]
  InvalidCompressionMethod(u8),

  #[error("invalid filter method: expected 0, got {0}")]
  InvalidFilterMethod(u8),

  #[error("invalid interlace method: expected 0 or 1, got {0}")]
  InvalidInterlaceMethod(u8),
}
impl PngError {
  #[inline]
  #[must_use]
  pub(crate) fn bad_signature(received: &[u8]) -> Self {
    Self::BadSignature { received: received.to_vec(), expected: PNG_SIGNATURE }
  }
}

/// The four parts of a chunk record, in stream order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChunkField {
  Length,
  Type,
  Data,
  Checksum,
}
impl fmt::Display for ChunkField {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::Length => "length",
      Self::Type => "type",
      Self::Data => "data",
      Self::Checksum => "checksum",
    })
  }
}

/// IHDR fields that can be reported in an [`PngError::InvalidDimension`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderField {
  Width,
  Height,
}
impl fmt::Display for HeaderField {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::Width => "width",
      Self::Height => "height",
    })
  }
}
