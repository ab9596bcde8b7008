//! Holds all the tools for reading PNG data.
//!
//! * [Portable Network Graphics Specification (Third Edition)][png-spec]
//!
//! [png-spec]: https://www.w3.org/TR/png/
//!
//! ## Decoding
//!
//! Call [`PngImage::decode`] with any [`Read`](std::io::Read) source (or
//! [`PngImage::from_bytes`] / [`PngImage::open`] for the common cases). The
//! whole stream is read before you get anything back:
//!
//! * The 8 byte signature must be present and correct.
//! * Every chunk up to the end of the stream is read and kept, in file order.
//! * The first chunk must be the `IHDR` chunk, and its fields must be legal.
//!
//! If any of that fails you get a [`PngError`](crate::PngError) and no image.
//!
//! ```no_run
//! use pnggrep::png::PngImage;
//! let image = PngImage::open("example.png")?;
//! println!("{}x{}", image.width(), image.height());
//! for text in image.text_chunks() {
//!   println!("{text:?}");
//! }
//! # Ok::<(), pnggrep::PngError>(())
//! ```
//!
//! ## Reading Chunks Yourself
//!
//! If you only want the raw chunk records (without any header checks) you can
//! use [`read_chunk`] or the [`PngChunkReader`] iterator directly on a source
//! positioned just after the signature.
//!
//! ## What's Not Checked
//!
//! * The CRC32 of each chunk is kept but never verified.
//! * Chunk ordering rules beyond "IHDR comes first" are ignored, as is any
//!   chunk type other than `IHDR` and `tEXt`.
//! * Pixel data is never decompressed.

mod chunk;
mod chunk_type;
mod ihdr;
mod image;
mod text;

pub use chunk::*;
pub use chunk_type::*;
pub use ihdr::*;
pub use image::*;
pub use text::*;


/// The first eight bytes of a PNG datastream should match these bytes.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// Checks if the PNG's initial 8 bytes are correct.
///
/// * If this is the case, the rest of the bytes are very likely PNG data.
/// * If this is *not* the case, the rest of the bytes are very likely *not* PNG
///   data.
#[inline]
#[must_use]
pub const fn is_png_signature_correct(bytes: &[u8]) -> bool {
  matches!(bytes, [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, ..])
}
