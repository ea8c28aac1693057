//! Program Image Loader.
//!
//! This module reads machine-code images into a `Program`. It performs:
//! 1. **Parsing:** One decimal word per line, in address order starting at 0.
//! 2. **Validation:** Rejects lines without a leading integer, values that do
//!    not fit 32 bits, and images larger than instruction memory.
//!
//! Each line is read the way a C `scanf("%d")` would: leading whitespace is
//! skipped, an optional sign and a run of digits form the word, and anything
//! after the digits is ignored. Values in `2^31..2^32` are accepted and
//! reinterpreted as two's complement so images written as unsigned words load.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::common::constants::NUM_MEMORY;
use crate::common::error::LoadError;

/// A loaded machine-code image.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Program {
    words: Vec<i32>,
}

impl Program {
    /// Parses an image from text.
    ///
    /// # Arguments
    ///
    /// * `text` - Image contents, one word per line.
    ///
    /// # Errors
    ///
    /// `LoadError::Parse` naming the first bad line's address, or
    /// `LoadError::TooLarge` when the image exceeds instruction memory.
    pub fn parse(text: &str) -> Result<Self, LoadError> {
        let mut words = Vec::new();
        for (line, raw) in text.lines().enumerate() {
            if line >= NUM_MEMORY {
                return Err(LoadError::TooLarge {
                    count: text.lines().count(),
                    capacity: NUM_MEMORY,
                });
            }
            let word = parse_word(raw).ok_or_else(|| LoadError::Parse {
                line,
                text: raw.to_owned(),
            })?;
            words.push(word);
        }
        debug!(words = words.len(), "program parsed");
        Ok(Self { words })
    }

    /// Reads and parses an image file.
    ///
    /// Bytes that are not valid UTF-8 are replaced before parsing, so they
    /// only matter where they would end a line's leading integer.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the machine-code file.
    ///
    /// # Errors
    ///
    /// `LoadError::Io` if the file cannot be read, otherwise as [`Program::parse`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&String::from_utf8_lossy(&bytes))
    }

    /// Builds a program from already-encoded words.
    ///
    /// # Errors
    ///
    /// `LoadError::TooLarge` when `words` exceeds instruction memory.
    pub fn from_words(words: Vec<i32>) -> Result<Self, LoadError> {
        if words.len() > NUM_MEMORY {
            return Err(LoadError::TooLarge {
                count: words.len(),
                capacity: NUM_MEMORY,
            });
        }
        Ok(Self { words })
    }

    /// The program words, address 0 first.
    pub fn words(&self) -> &[i32] {
        &self.words
    }

    /// Number of loaded words.
    pub const fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the image is empty.
    pub const fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Parses the leading signed decimal integer of `line`.
fn parse_word(line: &str) -> Option<i32> {
    let trimmed = line.trim_start();
    let sign_len = usize::from(trimmed.starts_with(['+', '-']));
    let digits = trimmed[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits == 0 {
        return None;
    }
    let value: i64 = trimmed[..sign_len + digits].parse().ok()?;
    if let Ok(word) = i32::try_from(value) {
        return Some(word);
    }
    u32::try_from(value).ok().map(|w| w as i32)
}
