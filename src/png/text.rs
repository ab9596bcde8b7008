use super::*;

/// A `tEXt` chunk split into its two parts.
///
/// Spec: [tEXt](https://www.w3.org/TR/png/#11tEXt)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextEntry {
  /// Normally 1-79 bytes, like `Title` or `Author`.
  pub keyword: String,
  pub text: String,
}
impl From<&[u8]> for TextEntry {
  /// Splits at the first null byte. Without one, it's all keyword.
  #[inline]
  fn from(data: &[u8]) -> Self {
    let (keyword, text) = match data.iter().position(|&b| b == 0) {
      Some(i) => (&data[..i], &data[i + 1..]),
      None => (data, &[][..]),
    };
    Self { keyword: latin1_to_string(keyword), text: latin1_to_string(text) }
  }
}

/// Converts Latin-1 bytes to a `String`.
///
/// Every Latin-1 byte value is also the Unicode code point of that character,
/// so this can't fail and loses nothing.
#[inline]
#[must_use]
pub fn latin1_to_string(bytes: &[u8]) -> String {
  bytes.iter().copied().map(char::from).collect()
}

impl PngImage {
  /// The raw payload of each `tEXt` chunk, in file order.
  ///
  /// Nothing is decoded, so this is the one to use when the bytes might not
  /// really be Latin-1 (plenty of files put UTF-8 in there).
  pub fn text_chunk_bytes(&self) -> impl Iterator<Item = &[u8]> + '_ {
    self
      .chunks()
      .iter()
      .filter(|chunk| chunk.chunk_ty() == PngChunkType::tEXt)
      .map(PngChunk::data)
  }

  /// The full payload of each `tEXt` chunk, in file order.
  ///
  /// The keyword and text stay joined by their null byte, so
  /// `"Author\0Jane"` comes out as exactly that.
  #[must_use]
  pub fn text_chunks(&self) -> Vec<String> {
    self.text_chunk_bytes().map(latin1_to_string).collect()
  }

  /// Each `tEXt` chunk split into keyword and text, in file order.
  pub fn text_entries(&self) -> impl Iterator<Item = TextEntry> + '_ {
    self.text_chunk_bytes().map(TextEntry::from)
  }
}
