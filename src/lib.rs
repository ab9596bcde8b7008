#![forbid(unsafe_code)]

//! A crate for finding text inside of PNG files.
//!
//! The [`png`] module reads a PNG stream into a [`PngImage`]: the validated
//! header fields plus every chunk of the file, in order. From there you can
//! pull out the `tEXt` metadata with [`PngImage::text_chunks`].
//!
//! With the `cli` feature (on by default) this also builds the `pnggrep`
//! binary, which searches the text chunks of PNG files with a regex.

#[cfg(target_pointer_width = "16")]
compile_error!("this crate assumes 32-bit or bigger pointers!");

mod error;
pub use error::*;

pub mod png;
pub use png::PngImage;
