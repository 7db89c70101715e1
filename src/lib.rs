// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]

//! # methodscope
//!
//! [![Crates.io](https://img.shields.io/crates/v/methodscope.svg)](https://crates.io/crates/methodscope)
//! [![Documentation](https://docs.rs/methodscope/badge.svg)](https://docs.rs/methodscope)
//! [![License](https://img.shields.io/badge/license-Apache--2.0-blue.svg)](https://github.com/BinFlip/methodscope/blob/main/LICENSE-APACHE)
//!
//! A tolerant decoder, structurer and formatter for raw CIL (Common Intermediate Language)
//! method bodies. Built in pure Rust, `methodscope` takes the bytes of a single ECMA-335
//! method body, for example captured from a debugger or carved out of a dump, and turns them
//! into decoded instructions, exception-handler tables and a properly nested
//! try/catch/filter/finally section tree. No Windows, no .NET runtime, and no surrounding PE
//! file required.
//!
//! ## Features
//!
//! - **🔍 Tolerant disassembly** - Every byte of the buffer becomes part of an instruction;
//!   truncated or undefined encodings yield explicit `??` markers instead of errors
//! - **📦 Tiny & Fat headers** - Both ECMA-335 method body formats, including auxiliary
//!   exception-handler sections in small and fat clause encodings
//! - **🧱 Section reconstruction** - The flat exception-handler table is rebuilt into a
//!   nested lexical tree, with structural validation naming the violated invariant
//! - **📜 Listing renderer** - Flat and braced pseudo-assembly listings with jump-target
//!   labels, mnemonic alignment and branch-delta annotations
//! - **🔧 Hex round trip** - Loosely formatted hex dumps (comments, stray whitespace) in,
//!   canonical dumps out
//! - **🛡️ Memory safe** - Pure safe Rust; hostile input produces `None` or an error value,
//!   never a panic
//!
//! ## Quick Start
//!
//! Add `methodscope` to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! methodscope = "0.1"
//! ```
//!
//! ### Using the Prelude
//!
//! For convenient access to the most commonly used types, import the prelude:
//!
//! ```rust
//! use methodscope::prelude::*;
//!
//! // Tiny header (code size 2) followed by ldc.i4.4, ret
//! let bytes = hex::parse("0A 1A 2A").expect("valid hex");
//! let method = MethodData::from_body(&bytes).expect("valid body");
//!
//! assert_eq!(method.max_stack, 8);
//! assert_eq!(method.instructions.len(), 2);
//! ```
//!
//! ### Basic Usage
//!
//! ```rust
//! use methodscope::formatter;
//! use methodscope::metadata::method::MethodData;
//!
//! // Parse a method body and render it as pseudo-assembly
//! let body = [0x0A, 0x1A, 0x2A];
//! if let Some(method) = MethodData::from_body(&body) {
//!     let listing = formatter::format(&method);
//!     assert!(listing.contains(".maxstack 8"));
//!     assert!(listing.contains("ldc.i4.4"));
//! }
//! ```
//!
//! ### Disassembly Example
//!
//! The disassembler module decodes raw code bytes without any header:
//!
//! ```rust
//! use methodscope::disassembler::decode;
//!
//! let instructions = decode(&[0x00, 0x2A]); // nop, ret
//! assert_eq!(instructions.len(), 2);
//! assert_eq!(instructions[0].to_string(), "IL_0000: nop");
//! ```
//!
//! ## Architecture
//!
//! `methodscope` is organized into several key modules:
//!
//! - [`prelude`] - Convenient re-exports of commonly used types and functions
//! - [`disassembler`] - Tolerant CIL instruction decoding
//! - [`metadata`] - Method body parsing, exception handlers and section reconstruction
//! - [`formatter`] - Flat and braced listing renderers
//! - [`hex`] - The hex dump text codec
//! - [`Error`], [`StructuralError`] and [`Result`] - Error handling
//!
//! ### Processing Pipeline
//!
//! Data flows through the crate in one direction:
//!
//! 1. [`hex::parse`] converts loosely formatted hex text into a byte buffer.
//! 2. [`MethodData::from_body`] classifies the Tiny/Fat header, slices out the code
//!    bytes, decodes them via the [`disassembler`], and collects the flat
//!    exception-handler tables from the auxiliary data sections. The raw-IL variant
//!    [`MethodData::from_il`] skips the header and treats the whole buffer as code.
//! 3. [`metadata::method::reconstruct`] optionally folds the flat handler table into a
//!    nested [`metadata::method::Section`] tree.
//! 4. [`formatter::format`] or [`formatter::format_structured`] renders the result as
//!    a pseudo-assembly listing.
//!
//! ## Standards Compliance
//!
//! `methodscope` implements the method body format of the **ECMA-335 specification**
//! (6th edition) for the Common Language Infrastructure: Tiny and Fat headers, the
//! small and fat exception-clause encodings, and the full one- and two-byte opcode
//! space.
//!
//! ### References
//!
//! - [ECMA-335 Standard](https://ecma-international.org/wp-content/uploads/ECMA-335_6th_edition_june_2012.pdf) - Official CLI specification
//! - [.NET Runtime](https://github.com/dotnet/runtime) - Microsoft's reference implementation
//!
//! ## Error Handling
//!
//! The crate distinguishes two failure tiers. The instruction decoder never fails:
//! damaged encodings decode to instructions that say so. Everything above it is
//! all-or-nothing: the body parser returns an [`Option`], and the section
//! reconstructor reports which invariant a hostile handler table violated:
//!
//! ```rust
//! use methodscope::metadata::method::MethodData;
//!
//! // A fat header on a buffer too short to hold one
//! assert!(MethodData::from_body(&[0x03, 0x30]).is_none());
//! ```
//!
//! ## Development and Testing
//!
//! The crate includes fuzzing support for robustness against hostile method bodies:
//!
//! ### Fuzzing
//!
//! ```bash
//! # Install fuzzing tools
//! cargo install cargo-fuzz
//!
//! # Fuzz the body parser
//! cargo +nightly fuzz run method_body --release
//!
//! # Fuzz the hex codec
//! cargo +nightly fuzz run hex --release
//! ```
//!
//! ### Testing
//!
//! The test suite covers crafted method bodies, golden listings and edge cases:
//!
//! ```bash
//! cargo test
//! cargo bench  # criterion benchmarks for the decode pipeline
//! ```
#[macro_use]
pub(crate) mod error;
pub(crate) mod file;

/// Shared functionality which is used in unit- and integration-tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
///
/// This module provides a curated selection of the most frequently used types
/// from across the methodscope library, allowing for convenient glob imports.
///
/// # Example
///
/// ```rust
/// use methodscope::prelude::*;
///
/// let method = MethodData::from_il(&[0x00, 0x2A]); // nop, ret
/// assert_eq!(method.instructions.len(), 2);
/// ```
pub mod prelude;

/// Instruction decoding for the CIL opcode space, based on ECMA-335
///
/// This module provides tolerant CIL (Common Intermediate Language) instruction decoding:
/// every byte of the input ends up covered by exactly one decoded instruction, and damaged
/// input is represented explicitly rather than reported as an error.
///
/// # Key Types
///
/// - [`disassembler::Instruction`] - A decoded instruction with its exact byte range
/// - [`disassembler::OpCode`] - Static opcode descriptor (mnemonic, operand shape, flow)
/// - [`disassembler::Operand`] - Decoded operand values, including the `Incomplete` marker
/// - [`disassembler::FlowType`] - How an instruction affects control flow
///
/// # Main Functions
///
/// - [`disassembler::decode`] - Decode a whole buffer into a `Vec<Instruction>`
/// - [`disassembler::Decoder`] - The underlying pull-based instruction iterator
///
/// # Examples
///
/// ```rust
/// use methodscope::disassembler::Decoder;
///
/// let bytecode = &[0x16, 0x0A, 0x2A]; // ldc.i4.0, stloc.0, ret
/// for instruction in Decoder::new(bytecode) {
///     println!("{}", instruction);
/// }
/// ```
pub mod disassembler;

/// Listing renderers producing human-readable pseudo-assembly
///
/// Two rendering modes over a parsed [`MethodData`]:
///
/// - [`formatter::format`] - flat mode: header block, instruction lines, then the raw
///   exception-handler table as `.try` lines in on-disk order
/// - [`formatter::format_structured`] - braced mode: the reconstructed section tree
///   rendered as nested `.try { } catch { }` blocks, falling back to flat mode when the
///   handler table cannot be nested
///
/// # Examples
///
/// ```rust
/// use methodscope::{formatter, metadata::method::MethodData};
///
/// let method = MethodData::from_il(&[0x00, 0x2A]); // nop, ret
/// let listing = formatter::format(&method);
/// assert!(listing.contains("  nop"));
/// ```
pub mod formatter;

/// Method body structures and parsing based on ECMA-335
///
/// This module implements the method body layer: value primitives, header parsing and
/// the exception-handler structure model.
///
/// # Key Components
///
/// ## Value Primitives
/// - [`metadata::label::Label`] - A byte offset into the code, displayed as `IL_XXXX`
/// - [`metadata::label::CodeRange`] - A half-open byte range with containment/overlap tests
/// - [`metadata::token::Token`] - An opaque metadata token (8 hex digit rendering)
///
/// ## Method Bodies
/// - [`metadata::method::MethodData`] - Parsed method body: header fields, decoded
///   instructions and exception-handler sections
/// - [`metadata::method::ExceptionHandler`] - One flat try/handler clause
/// - [`metadata::method::HandlerKind`] - Catch, Filter, Finally or Fault
///
/// ## Section Reconstruction
/// - [`metadata::method::reconstruct`] - Flat handler table to nested section tree
/// - [`metadata::method::Section`] - Plain code, sequence, or try block with handlers
/// - [`metadata::method::HandlerBlock`] - One handler attached to a try block
///
/// # Examples
///
/// ```rust
/// use methodscope::metadata::method::MethodData;
///
/// // Tiny body: ldarg.0, ret
/// let method = MethodData::from_body(&[0x0A, 0x02, 0x2A]).unwrap();
/// assert_eq!(method.code_size, 2);
/// assert!(method.data_sections.is_empty());
/// ```
pub mod metadata;

/// `methodscope` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
/// This is used consistently throughout the crate for all fallible operations.
///
/// # Examples
///
/// ```rust
/// use methodscope::{Parser, Result};
///
/// fn read_header_byte(data: &[u8]) -> Result<u8> {
///     let mut parser = Parser::new(data);
///     parser.read_le::<u8>()
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// `methodscope` Error type
///
/// The main error type for all operations in this crate. Provides detailed error
/// information for buffer parsing and section reconstruction.
///
/// # Examples
///
/// ```rust
/// use methodscope::{Error, Parser};
///
/// let mut parser = Parser::new(&[0x01]);
/// match parser.read_le::<u32>() {
///     Err(Error::OutOfBounds) => {} // only one byte available
///     other => panic!("expected OutOfBounds, got {:?}", other),
/// }
/// ```
pub use error::Error;

/// Invariant violations reported by the section reconstructor.
///
/// See [`metadata::method::reconstruct`] for the operation that produces these.
///
/// # Example
///
/// ```rust
/// use methodscope::{metadata::method::reconstruct, StructuralError};
/// use methodscope::metadata::label::CodeRange;
///
/// let tree = reconstruct(CodeRange::new(0.into(), 4), &[]);
/// assert!(tree.is_ok()); // no handlers, the whole range is plain code
/// ```
pub use error::StructuralError;

/// Main entry point for working with raw method bodies.
///
/// See [`metadata::method::MethodData`] for parsing and the renderer-facing
/// facilities (jump targets, instruction lookup).
///
/// # Example
///
/// ```rust
/// use methodscope::MethodData;
///
/// let method = MethodData::from_body(&[0x06, 0x2A]).unwrap(); // tiny header, ret
/// assert_eq!(method.max_stack, 8);
/// ```
pub use metadata::method::MethodData;

/// Provides access to low-level parsing utilities and the hex dump codec.
///
/// The [`Parser`] type is a forward-only cursor over a byte slice; [`hex`] converts
/// between hex dump text and byte buffers.
///
/// # Example
///
/// ```rust
/// use methodscope::hex;
///
/// let bytes = hex::parse("00 2A // nop, ret").unwrap();
/// assert_eq!(bytes, [0x00, 0x2A]);
/// ```
pub use file::{hex, parser::Parser};
