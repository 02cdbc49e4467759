//! ISO-8859-1 text decoding.
//!
//! Triodos exports are encoded as ISO-8859-1, where every byte maps directly
//! to the Unicode code point of the same value. Decoding is therefore a total
//! function: it cannot fail on any input.

/// Decodes ISO-8859-1 bytes into an owned `String`.
pub fn decode(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}
