use core::fmt::{self, Debug, Display, Write};

/// The 4 byte type tag of a chunk.
///
/// Tags are supposed to be ASCII letters, but nothing enforces that. The
/// `Debug` and `Display` impls just `as` cast each byte into a `char`, which is
/// what you'd expect for real tags and still harmless for garbage.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct PngChunkType(pub [u8; 4]);
#[allow(nonstandard_style)]
impl PngChunkType {
  /// Image Header
  pub const IHDR: Self = Self(*b"IHDR");
  /// Textual data
  pub const tEXt: Self = Self(*b"tEXt");
  /// Image End
  pub const IEND: Self = Self(*b"IEND");

  /// The tag bytes.
  #[inline]
  #[must_use]
  pub const fn as_bytes(&self) -> &[u8; 4] {
    &self.0
  }
}
impl Debug for PngChunkType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_char('"')?;
    Display::fmt(self, f)?;
    f.write_char('"')
  }
}
impl Display for PngChunkType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for ch in self.0.iter().copied().map(|u| u as char) {
      f.write_char(ch)?;
    }
    Ok(())
  }
}
impl From<[u8; 4]> for PngChunkType {
  #[inline]
  fn from(bytes: [u8; 4]) -> Self {
    Self(bytes)
  }
}
