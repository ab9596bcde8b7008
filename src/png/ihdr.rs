use core::mem::size_of;

use bytemuck::{pod_read_unaligned, Pod, Zeroable};
use pack1::U32BE;

use super::*;
use crate::{HeaderField, PngError, PngResult};

/// The exact payload length of an `IHDR` chunk.
pub const IHDR_LENGTH: usize = size_of::<IhdrPayload>();

/// Largest width or height that's accepted (inclusive).
///
/// Note that this is `2^31`, one more than the `2^31 - 1` limit PNG puts on
/// its four-byte integers. Files at exactly `2^31` have always been accepted,
/// so they still are.
pub const MAX_DIMENSION: u32 = 2 << 30;

/// The `IHDR` payload exactly as it's laid out in the stream.
#[derive(Clone, Copy, Zeroable, Pod)]
#[repr(C)]
struct IhdrPayload {
  width: U32BE,
  height: U32BE,
  bit_depth: u8,
  color_type: u8,
  compression_method: u8,
  filter_method: u8,
  interlace_method: u8,
}

/// The types of color that PNG supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum PngColorType {
  /// Greyscale
  Y = 0,
  /// Red, Green, Blue
  RGB = 2,
  /// Index into a palette.
  Index = 3,
  /// Greyscale + Alpha
  YA = 4,
  /// Red, Green, Blue, Alpha
  RGBA = 6,
}
impl PngColorType {
  /// The bit depths this color type is allowed to use.
  #[inline]
  #[must_use]
  pub const fn allowed_bit_depths(self) -> &'static [u8] {
    match self {
      Self::Y => &[1, 2, 4, 8, 16],
      Self::RGB => &[8, 16],
      Self::Index => &[1, 2, 4, 8],
      Self::YA => &[8, 16],
      Self::RGBA => &[8, 16],
    }
  }

  /// The number of channels in this type of color.
  #[inline]
  #[must_use]
  pub const fn channel_count(self) -> usize {
    match self {
      Self::Y => 1,
      Self::RGB => 3,
      Self::Index => 1,
      Self::YA => 2,
      Self::RGBA => 4,
    }
  }
}
impl TryFrom<u8> for PngColorType {
  type Error = PngError;
  #[inline]
  fn try_from(value: u8) -> Result<Self, Self::Error> {
    Ok(match value {
      0 => PngColorType::Y,
      2 => PngColorType::RGB,
      3 => PngColorType::Index,
      4 => PngColorType::YA,
      6 => PngColorType::RGBA,
      _ => return Err(PngError::InvalidColorType(value)),
    })
  }
}
impl From<PngColorType> for u8 {
  #[inline]
  fn from(color_type: PngColorType) -> Self {
    color_type as u8
  }
}

/// Image Header
///
/// Spec: [IHDR](https://www.w3.org/TR/png/#11IHDR)
///
/// A value of this type has passed every field check, so all the fields are
/// legal for PNG.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(nonstandard_style)]
pub struct IHDR {
  /// width in pixels
  pub width: u32,
  /// height in pixels
  pub height: u32,
  /// bits per channel
  pub bit_depth: u8,
  /// pixel color type
  pub color_type: PngColorType,
  /// always 0 (zlib deflate)
  pub compression_method: u8,
  /// always 0 (adaptive filtering)
  pub filter_method: u8,
  /// 0 for none, 1 for Adam7
  pub interlace_method: u8,
}
impl IHDR {
  /// Validates an `IHDR` payload.
  ///
  /// Fields are checked in stream order and the first bad one is the error you
  /// get back.
  pub fn try_from_payload(data: &[u8]) -> PngResult<Self> {
    if data.len() != IHDR_LENGTH {
      return Err(PngError::HeaderLength { expected: IHDR_LENGTH, actual: data.len() });
    }
    let raw: IhdrPayload = pod_read_unaligned(data);
    let width = checked_dimension(HeaderField::Width, raw.width.get())?;
    let height = checked_dimension(HeaderField::Height, raw.height.get())?;
    let color_type = PngColorType::try_from(raw.color_type)?;
    let allowed = color_type.allowed_bit_depths();
    if !allowed.contains(&raw.bit_depth) {
      return Err(PngError::InvalidBitDepth { color_type, bit_depth: raw.bit_depth, allowed });
    }
    if raw.compression_method != 0 {
      return Err(PngError::InvalidCompressionMethod(raw.compression_method));
    }
    if raw.filter_method != 0 {
      return Err(PngError::InvalidFilterMethod(raw.filter_method));
    }
    if raw.interlace_method > 1 {
      return Err(PngError::InvalidInterlaceMethod(raw.interlace_method));
    }
    Ok(Self {
      width,
      height,
      bit_depth: raw.bit_depth,
      color_type,
      compression_method: raw.compression_method,
      filter_method: raw.filter_method,
      interlace_method: raw.interlace_method,
    })
  }

  /// If the image data is stored interlaced (Adam7).
  #[inline]
  #[must_use]
  pub const fn is_interlaced(&self) -> bool {
    self.interlace_method == 1
  }
}
impl TryFrom<&PngChunk> for IHDR {
  type Error = PngError;
  /// Checks the chunk's type tag, then validates the payload.
  #[inline]
  fn try_from(chunk: &PngChunk) -> Result<Self, Self::Error> {
    if chunk.chunk_ty() != PngChunkType::IHDR {
      return Err(PngError::NotHeaderChunk { found: chunk.chunk_ty() });
    }
    Self::try_from_payload(chunk.data())
  }
}

#[inline]
fn checked_dimension(field: HeaderField, value: u32) -> PngResult<u32> {
  if value == 0 || value > MAX_DIMENSION {
    Err(PngError::InvalidDimension { field, value })
  } else {
    Ok(value)
  }
}
