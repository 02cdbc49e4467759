//! Locating the tabular header inside a raw export.
//!
//! Triodos puts a free-form preamble (account metadata, date range, blank
//! lines) above the actual CSV table. Nothing before the header line is
//! tabular, so the file cannot be handed to a CSV reader as-is.

use regex::Regex;

use crate::error::Result;

/// Signature of the real header line: optional leading whitespace, an
/// optional single or double quote, the literal `Buchungstag`, an optional
/// closing quote, then the `;` field delimiter.
const HEADER_SIGNATURE: &str = r#"^\s*['"]?Buchungstag['"]?\s*;"#;

/// Finds the start of the tabular region in a decoded export.
pub struct HeaderLocator {
    signature: Regex,
}

impl HeaderLocator {
    pub fn new() -> Result<Self> {
        Ok(HeaderLocator {
            signature: Regex::new(HEADER_SIGNATURE)?,
        })
    }

    /// Returns the slice of `text` starting at the first line matching the
    /// header signature. The header line itself is retained; it defines the
    /// field names for every row after it.
    ///
    /// Returns `None` when no line matches. That is not an error: the caller
    /// degrades to producing zero data rows.
    pub fn locate<'a>(&self, text: &'a str) -> Option<&'a str> {
        let mut offset = 0;
        for line in text.split_inclusive('\n') {
            if self.signature.is_match(line) {
                return Some(&text[offset..]);
            }
            offset += line.len();
        }
        None
    }
}
