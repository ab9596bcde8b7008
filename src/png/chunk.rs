use core::{
  fmt::{self, Debug},
  iter::FusedIterator,
};
use std::io::{self, Read};

use log::trace;

use super::*;
use crate::{ChunkField, PngError, PngResult};

/// One chunk record from a PNG stream.
///
/// The declared CRC is kept exactly as it appeared in the stream. It's never
/// checked against the data.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PngChunk {
  chunk_ty: PngChunkType,
  data: Vec<u8>,
  declared_crc: u32,
}
impl PngChunk {
  /// The declared payload length.
  ///
  /// This always equals `self.data().len()`.
  #[inline]
  #[must_use]
  pub fn length(&self) -> u32 {
    // the data was read using a u32 length, so it always fits.
    self.data.len() as u32
  }
  #[inline]
  #[must_use]
  pub const fn chunk_ty(&self) -> PngChunkType {
    self.chunk_ty
  }
  #[inline]
  #[must_use]
  pub fn data(&self) -> &[u8] {
    &self.data
  }
  #[inline]
  #[must_use]
  pub const fn declared_crc(&self) -> u32 {
    self.declared_crc
  }
}
impl Debug for PngChunk {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("PngChunk")
      .field("chunk_ty", &self.chunk_ty)
      .field("data", &(&self.data[..self.data.len().min(12)], self.data.len()))
      .field("declared_crc", &self.declared_crc)
      .finish()
  }
}

/// Reads until `buf` is full or the source runs dry.
///
/// Returns how many bytes were actually placed into `buf`.
pub(crate) fn read_full<R: Read>(source: &mut R, buf: &mut [u8]) -> io::Result<usize> {
  let mut filled = 0;
  while filled < buf.len() {
    match source.read(&mut buf[filled..]) {
      Ok(0) => break,
      Ok(n) => filled += n,
      Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
      Err(e) => return Err(e),
    }
  }
  Ok(filled)
}

#[inline]
fn read_field<const N: usize, R: Read>(source: &mut R, field: ChunkField) -> PngResult<[u8; N]> {
  let mut buf = [0_u8; N];
  match read_full(source, &mut buf)? {
    actual if actual == N => Ok(buf),
    actual => Err(PngError::ShortRead { field, expected: N, actual }),
  }
}

/// Reads one chunk record from the source.
///
/// * `Ok(Some(chunk))` when a full chunk was read. The source has advanced
///   `12 + length` bytes.
/// * `Ok(None)` when the source was already empty, which is the normal end of
///   a PNG stream.
/// * `Err(ShortRead)` when the source ran out partway through a chunk.
/// * `Err(Io)` for any other failure of the source.
pub fn read_chunk<R: Read>(source: &mut R) -> PngResult<Option<PngChunk>> {
  let mut len_bytes = [0_u8; 4];
  let chunk_len = match read_full(source, &mut len_bytes)? {
    0 => return Ok(None),
    4 => u32::from_be_bytes(len_bytes),
    actual => {
      return Err(PngError::ShortRead { field: ChunkField::Length, expected: 4, actual })
    }
  };
  let chunk_ty = PngChunkType(read_field(source, ChunkField::Type)?);
  // The buffer grows as bytes show up, so a bogus huge length on a short
  // stream can't make us allocate the whole declared size up front.
  let mut data = Vec::new();
  let actual = source.by_ref().take(u64::from(chunk_len)).read_to_end(&mut data)?;
  let expected = chunk_len as usize;
  if actual != expected {
    return Err(PngError::ShortRead { field: ChunkField::Data, expected, actual });
  }
  let declared_crc = u32::from_be_bytes(read_field(source, ChunkField::Checksum)?);
  trace!("read chunk {chunk_ty} with {chunk_len} bytes of data");
  Ok(Some(PngChunk { chunk_ty, data, declared_crc }))
}

/// An iterator that produces successive chunks from a PNG stream.
///
/// The source should be positioned just after the PNG signature. Each step
/// calls [`read_chunk`]. Iteration stops at the end of the stream, or after
/// yielding the first error.
#[derive(Debug)]
pub struct PngChunkReader<R> {
  source: R,
  done: bool,
}
impl<R: Read> PngChunkReader<R> {
  #[inline]
  #[must_use]
  pub const fn new(source: R) -> Self {
    Self { source, done: false }
  }
  /// Gives back the source, wherever it was left.
  #[inline]
  #[must_use]
  pub fn into_inner(self) -> R {
    self.source
  }
}
impl<R: Read> Iterator for PngChunkReader<R> {
  type Item = PngResult<PngChunk>;
  #[inline]
  fn next(&mut self) -> Option<Self::Item> {
    if self.done {
      return None;
    }
    match read_chunk(&mut self.source) {
      Ok(Some(chunk)) => Some(Ok(chunk)),
      Ok(None) => {
        self.done = true;
        None
      }
      Err(e) => {
        self.done = true;
        Some(Err(e))
      }
    }
  }
}
impl<R: Read> FusedIterator for PngChunkReader<R> {}
