//! Token normalization.
//!
//! Tokens arrive already split on whitespace. Normalization keeps ASCII
//! letters only and lowercases them, so `"The"`, `"the,"` and `"(THE)"` all
//! index as `"the"`.
//!
//! A token made entirely of punctuation (`"..."`, `"--"`, `"42"`) normalizes
//! to the empty string. Whether that empty word is indexed is controlled by
//! [`EmptyWordPolicy`]; it never reaches an output file either way, because
//! it has no first letter to be partitioned by.

use serde::Serialize;
use std::io::{self, BufRead};

/// What to do with tokens that normalize to `""`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyWordPolicy {
    /// Index the empty word like any other word.
    #[default]
    Index,
    /// Drop it.
    Skip,
}

impl EmptyWordPolicy {
    #[inline]
    pub fn keeps(self, word: &str) -> bool {
        !word.is_empty() || self == EmptyWordPolicy::Index
    }
}

/// Canonicalize a raw token: drop every non-alphabetic character, lowercase
/// the rest.
pub fn normalize_token(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Feed every whitespace-delimited token of `reader` to `emit`.
///
/// Only ASCII whitespace separates tokens (space, `\t`, `\n`, `\v`, `\f`,
/// `\r`). Non-ASCII spaces such as U+00A0 stay inside the token and are
/// dropped by [`normalize_token`], so `"caf\u{a0}bar"` indexes as `"cafbar"`.
///
/// Bytes are decoded lossily, so invalid UTF-8 only loses the offending
/// characters (they are not letters anyway).
pub fn for_each_token<R, F>(mut reader: R, mut emit: F) -> io::Result<()>
where
    R: BufRead,
    F: FnMut(&str),
{
    let mut line = Vec::new();
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            return Ok(());
        }
        String::from_utf8_lossy(&line)
            .split(is_separator)
            .filter(|token| !token.is_empty())
            .for_each(&mut emit);
    }
}

/// C-locale `isspace`. `char::is_ascii_whitespace` leaves out `\v`.
#[inline]
fn is_separator(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}
