//! Hex text codec for method body blobs.
//!
//! This module converts between the textual hex-dump form of a method body and its raw
//! bytes. The text form is what users paste into tooling: bytes as hex digit pairs,
//! separated by arbitrary whitespace, with `//` line comments allowed anywhere.
//!
//! # Key Components
//!
//! - [`crate::file::hex::parse`] - Decode hex text into raw bytes
//! - [`crate::file::hex::format`] - Render raw bytes as grouped hex text
//!
//! # Usage Examples
//!
//! ```rust
//! use methodscope::hex;
//!
//! let bytes = hex::parse("0A 2A // stloc.0, ret").unwrap();
//! assert_eq!(bytes, vec![0x0A, 0x2A]);
//!
//! assert_eq!(hex::format(&bytes), "0A 2A");
//! ```
//!
//! # Integration
//!
//! This module integrates with:
//! - [`crate::metadata::method::MethodData`] - Parsed bytes feed the method body parser
//! - [`crate::formatter`] - Listings are produced from the parsed bytes

use std::fmt::Write;

/// Decode hex text into raw bytes.
///
/// The decoder is deliberately forgiving about layout: hex digits may be packed or
/// spread across lines, any whitespace separates them, and `//` starts a comment that
/// runs to the end of the line. Nibbles pair up high-first, and a trailing unpaired
/// nibble becomes the high nibble of a final byte.
///
/// # Arguments
/// * `text` - The hex text to decode
///
/// # Returns
///
/// Returns the decoded bytes, or `None` if the text contains anything other than hex
/// digits, whitespace and comments. Empty input decodes to an empty vector.
///
/// # Examples
///
/// ```rust
/// use methodscope::hex;
///
/// assert_eq!(hex::parse("02 17 58 2A").unwrap(), vec![0x02, 0x17, 0x58, 0x2A]);
/// assert_eq!(hex::parse("0217\n582A").unwrap(), vec![0x02, 0x17, 0x58, 0x2A]);
/// assert_eq!(hex::parse("2A // ret\n").unwrap(), vec![0x2A]);
/// assert!(hex::parse("2A ret").is_none());
/// ```
#[must_use]
pub fn parse(text: &str) -> Option<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut half_byte = false;
    let mut reading_comment = false;
    let mut tmp = 0_u8;

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        let x = match c {
            '\r' | '\n' => {
                reading_comment = false;
                continue;
            }
            _ if reading_comment || c.is_whitespace() => continue,
            '0'..='9' => c as u8 - b'0',
            'a'..='f' => c as u8 - b'a' + 10,
            'A'..='F' => c as u8 - b'A' + 10,
            '/' if chars.peek() == Some(&'/') => {
                reading_comment = true;
                chars.next();
                continue;
            }
            _ => return None,
        };

        if half_byte {
            buffer.push(tmp | x);
            half_byte = false;
        } else {
            tmp = x << 4;
            half_byte = true;
        }
    }

    if half_byte {
        buffer.push(tmp);
    }

    Some(buffer)
}

/// Render raw bytes as grouped hex text.
///
/// Bytes are written as uppercase hex pairs, 16 per line, with a double space between
/// each group of 4. The output carries no trailing newline.
///
/// # Arguments
/// * `blob` - The bytes to render
///
/// # Examples
///
/// ```rust
/// use methodscope::hex;
///
/// assert_eq!(hex::format(&[0x02, 0x17, 0x58, 0x2A]), "02 17 58 2A");
/// assert_eq!(hex::format(&[0x00, 0x01, 0x02, 0x03, 0x04]), "00 01 02 03  04");
/// ```
#[must_use]
pub fn format(blob: &[u8]) -> String {
    let mut builder = String::new();

    for (i, byte) in blob.iter().enumerate() {
        if i > 0 {
            if (i & 0xF) == 0 {
                builder.push('\n');
            } else if (i & 0x3) == 0 {
                builder.push_str("  ");
            } else {
                builder.push(' ');
            }
        }

        let _ = write!(builder, "{byte:02X}");
    }

    builder
}
