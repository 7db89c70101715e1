//! Byte-level input handling for method body buffers.
//!
//! This module provides the low-level plumbing the rest of the crate parses with. The
//! input to this library is a bare byte buffer (often transcribed from a hex dump), so
//! there is no file abstraction here, just the utilities to get from loosely formatted
//! text to bytes and from bytes to typed values.
//!
//! # Key Components
//!
//! - [`crate::file::hex`] - Codec between hex dump text and byte buffers
//! - [`crate::file::parser::Parser`] - Forward-only cursor over a byte slice with
//!   bounds-checked typed reads
//! - [`crate::file::io`] - Little-endian primitive reads used by the parser and the
//!   instruction decoder
//!
//! # Examples
//!
//! ```rust
//! use methodscope::{hex, Parser};
//!
//! let bytes = hex::parse("1F 2A // some comment").unwrap();
//! let mut parser = Parser::new(&bytes);
//! assert_eq!(parser.read_le::<u16>().unwrap(), 0x2A1F);
//! ```
//!
//! # Integration
//!
//! This module integrates with:
//! - [`crate::metadata::method`] - Uses [`parser::Parser`] for header and section parsing
//! - [`crate::disassembler`] - Uses [`io`] reads for instruction operands
//!
//! # References
//!
//! - ECMA-335 6th Edition, Partition II - all multi-byte values are little-endian

pub mod hex;
pub mod io;
pub mod parser;
