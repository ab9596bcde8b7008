//! Searches for a regex in the text (`tEXt`) chunks of PNG images. If a match
//! is found, prints the file name.
//!
//! The regex runs over the raw bytes of each chunk, keyword and null separator
//! included. Bytes that form valid UTF-8 match as the characters they encode,
//! so `Jörg` finds a UTF-8 `Jörg`. Other bytes can still be matched with
//! escapes like `\xE9`.
//!
//! Exit status:
//! * `0`: at least one file matched and no file had an error.
//! * `1`: nothing matched and no file had an error.
//! * `2`: the regex was invalid, a file couldn't be opened or decoded, or
//!   output couldn't be written. Files after a bad one are still searched.
//!   Bad command line arguments also exit with `2`, after clap prints the
//!   usage.

use std::{
  io::{self, Write},
  path::{Path, PathBuf},
  process::ExitCode,
};

use clap::Parser;
use log::error;
use pnggrep::{PngImage, PngResult};
use regex::bytes::{Regex, RegexBuilder};

const EXIT_MATCH: u8 = 0;
const EXIT_NO_MATCH: u8 = 1;
/// Exit status when some file couldn't be searched, or the regex is bad.
const EXIT_TROUBLE: u8 = 2;

/// Search the text chunks of PNG images.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
  /// Make the regex case-insensitive
  #[arg(short = 'i')]
  ignore_case: bool,

  /// Show matching text chunks, quoted like a Rust string (`"Author\0Jane"`),
  /// with bytes that aren't UTF-8 shown as `\xNN`
  #[arg(short = 'w')]
  show_matches: bool,

  /// The regex to search for
  regex: String,

  /// The PNG files to search
  #[arg(required = true)]
  files: Vec<PathBuf>,
}

/// The text chunks of `image` that match, in file order.
fn grep_png<'i>(image: &'i PngImage, rx: &Regex) -> Vec<&'i [u8]> {
  image.text_chunk_bytes().filter(|text| rx.is_match(text)).collect()
}

fn grep_one_file(path: &Path, rx: &Regex) -> PngResult<Vec<Vec<u8>>> {
  let image = PngImage::open(path)?;
  Ok(grep_png(&image, rx).into_iter().map(<[u8]>::to_vec).collect())
}

/// Quotes `bytes` the way `Debug` quotes a `str`, except that bytes which
/// aren't part of valid UTF-8 come out as `\xNN`.
fn quote_bytes(mut bytes: &[u8]) -> String {
  let mut out = String::from("\"");
  loop {
    match std::str::from_utf8(bytes) {
      Ok(s) => {
        out.extend(s.chars().flat_map(char::escape_debug));
        break;
      }
      Err(e) => {
        let (good, rest) = bytes.split_at(e.valid_up_to());
        let good = std::str::from_utf8(good).unwrap_or_default();
        out.extend(good.chars().flat_map(char::escape_debug));
        let bad_len = e.error_len().unwrap_or(rest.len());
        for b in &rest[..bad_len] {
          out.push_str(&format!("\\x{b:02x}"));
        }
        bytes = &rest[bad_len..];
      }
    }
  }
  out.push('"');
  out
}

fn print_matches<W: Write>(
  out: &mut W, path: &Path, matches: &[Vec<u8>], show_matches: bool,
) -> io::Result<()> {
  writeln!(out, "{}", path.display())?;
  if show_matches {
    for text in matches {
      writeln!(out, "{}", quote_bytes(text))?;
    }
  }
  Ok(())
}

/// Searches every file named in `args`, writing results to `out`.
///
/// Returns the process exit status.
fn run<W: Write>(args: &Args, out: &mut W) -> u8 {
  let rx = match RegexBuilder::new(&args.regex).case_insensitive(args.ignore_case).build() {
    Ok(rx) => rx,
    Err(e) => {
      error!("Invalid regex '{}': {e}", args.regex);
      return EXIT_TROUBLE;
    }
  };

  let mut found_any = false;
  let mut failed_any = false;
  for path in &args.files {
    match grep_one_file(path, &rx) {
      Ok(matches) if matches.is_empty() => (),
      Ok(matches) => {
        found_any = true;
        if let Err(e) = print_matches(out, path, &matches, args.show_matches) {
          error!("Can't write output: {e}");
          return EXIT_TROUBLE;
        }
      }
      Err(e) => {
        // a bad file doesn't stop the search, but it does change the exit code.
        failed_any = true;
        error!("{}: {e}", path.display());
      }
    }
  }

  if failed_any {
    EXIT_TROUBLE
  } else if found_any {
    EXIT_MATCH
  } else {
    EXIT_NO_MATCH
  }
}

fn main() -> ExitCode {
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
  let args = Args::parse();
  let status = run(&args, &mut io::stdout().lock());
  ExitCode::from(status)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn chunk(ty: &[u8; 4], data: &[u8]) -> Vec<u8> {
    let mut out = (data.len() as u32).to_be_bytes().to_vec();
    out.extend_from_slice(ty);
    out.extend_from_slice(data);
    out.extend_from_slice(&[0; 4]);
    out
  }

  fn png_with_text(texts: &[&[u8]]) -> Vec<u8> {
    let mut bytes = pnggrep::png::PNG_SIGNATURE.to_vec();
    bytes.extend(chunk(b"IHDR", &[0, 0, 0, 1, 0, 0, 0, 1, 8, 2, 0, 0, 0]));
    for text in texts {
      bytes.extend(chunk(b"tEXt", text));
    }
    bytes.extend(chunk(b"IEND", &[]));
    bytes
  }

  fn image_with_text(texts: &[&[u8]]) -> PngImage {
    PngImage::from_bytes(&png_with_text(texts)).unwrap()
  }

  fn args(regex: &str, files: Vec<PathBuf>) -> Args {
    Args { ignore_case: false, show_matches: true, regex: regex.to_string(), files }
  }

  /// A fresh directory holding `bad.png` (not a PNG at all) and `good.png`.
  fn scratch_dir(name: &str) -> (PathBuf, PathBuf, PathBuf) {
    let dir = std::env::temp_dir().join(format!("pnggrep-{name}-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let bad = dir.join("bad.png");
    let good = dir.join("good.png");
    std::fs::write(&bad, b"this is not a png").unwrap();
    std::fs::write(&good, png_with_text(&[b"Author\0Jane"])).unwrap();
    (dir, bad, good)
  }

  #[test]
  fn test_grep_png() {
    let image = image_with_text(&[b"Author\0Jane", b"Comment\0made by hand", b"Title\0JANE's cat"]);
    let rx = Regex::new("Jane").unwrap();
    assert_eq!(grep_png(&image, &rx), vec![&b"Author\0Jane"[..]]);

    let rx = RegexBuilder::new("jane").case_insensitive(true).build().unwrap();
    assert_eq!(grep_png(&image, &rx), vec![&b"Author\0Jane"[..], &b"Title\0JANE's cat"[..]]);

    let rx = Regex::new(r"^Comment\x00").unwrap();
    assert_eq!(grep_png(&image, &rx).len(), 1);
  }

  #[test]
  fn test_grep_png_no_text() {
    let image = image_with_text(&[]);
    assert!(grep_png(&image, &Regex::new(".*").unwrap()).is_empty());
  }

  #[test]
  fn test_grep_png_utf8_text() {
    let image = image_with_text(&[b"Author\0J\xc3\xb6rg", b"Title\0Caf\xe9"]);
    let rx = Regex::new("Jörg").unwrap();
    assert_eq!(grep_png(&image, &rx), vec![&b"Author\0J\xc3\xb6rg"[..]]);
    let rx = RegexBuilder::new("JÖRG").case_insensitive(true).build().unwrap();
    assert_eq!(grep_png(&image, &rx).len(), 1);
    // bytes that aren't UTF-8 don't stop the rest of the chunk from matching.
    assert_eq!(grep_png(&image, &Regex::new("Caf").unwrap()), vec![&b"Title\0Caf\xe9"[..]]);
    assert_eq!(grep_png(&image, &Regex::new(r"(?-u)\xE9").unwrap()).len(), 1);
  }

  #[test]
  fn test_quote_bytes() {
    assert_eq!(quote_bytes(b"Author\0Jane"), r#""Author\0Jane""#);
    assert_eq!(quote_bytes(b"Author\0J\xc3\xb6rg"), "\"Author\\0J\u{f6}rg\"");
    assert_eq!(quote_bytes(b"Caf\xe9 \"x\""), r#""Caf\xe9 \"x\"""#);
    assert_eq!(quote_bytes(b"\xc3"), r#""\xc3""#);
    assert_eq!(quote_bytes(b""), r#""""#);
  }

  #[test]
  fn test_run_bad_file_does_not_stop_search() {
    let (dir, bad, good) = scratch_dir("bad-then-good");
    let mut out = Vec::new();
    let status = run(&args("Author", vec![bad.clone(), good.clone()]), &mut out);
    assert_eq!(status, EXIT_TROUBLE);
    let expected = format!("{}\n\"Author\\0Jane\"\n", good.display());
    assert_eq!(String::from_utf8(out).unwrap(), expected);

    let mut out = Vec::new();
    assert_eq!(run(&args("Nobody", vec![good.clone(), bad]), &mut out), EXIT_TROUBLE);
    assert!(out.is_empty());

    let missing = dir.join("missing.png");
    assert_eq!(run(&args("Author", vec![missing, good]), &mut Vec::new()), EXIT_TROUBLE);
    std::fs::remove_dir_all(&dir).unwrap();
  }

  #[test]
  fn test_run_match_and_no_match() {
    let (dir, _bad, good) = scratch_dir("match");
    let mut out = Vec::new();
    let mut a = args("jane", vec![good.clone(), good.clone()]);
    assert_eq!(run(&a, &mut out), EXIT_NO_MATCH);
    assert!(out.is_empty());

    a.ignore_case = true;
    a.show_matches = false;
    assert_eq!(run(&a, &mut out), EXIT_MATCH);
    let expected = format!("{0}\n{0}\n", good.display());
    assert_eq!(String::from_utf8(out).unwrap(), expected);
    std::fs::remove_dir_all(&dir).unwrap();
  }

  #[test]
  fn test_run_invalid_regex() {
    let (dir, _bad, good) = scratch_dir("invalid-regex");
    let mut out = Vec::new();
    assert_eq!(run(&args("(", vec![good]), &mut out), EXIT_TROUBLE);
    assert!(out.is_empty());
    std::fs::remove_dir_all(&dir).unwrap();
  }

  #[test]
  fn test_args() {
    let args = Args::try_parse_from(["pnggrep", "-i", "-w", "au.hor", "a.png", "b.png"]).unwrap();
    assert!(args.ignore_case);
    assert!(args.show_matches);
    assert_eq!(args.regex, "au.hor");
    assert_eq!(args.files, [PathBuf::from("a.png"), PathBuf::from("b.png")]);
    assert!(Args::try_parse_from(["pnggrep", "needle"]).is_err());
  }
}
