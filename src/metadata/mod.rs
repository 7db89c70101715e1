//! Metadata-side representation of CIL method bodies.
//!
//! This module contains the data model that the rest of the library produces and
//! consumes: IL offsets and ranges, metadata tokens, and the parsed method body
//! with its exception handler structure. Everything here follows the layout rules
//! of ECMA-335 II.25.4 (method headers) and II.23 (metadata tokens).
//!
//! # Key Components
//!
//! - [`label`] - IL offsets ([`label::Label`]) and byte ranges ([`label::CodeRange`])
//! - [`token`] - Metadata table row references used throughout .NET
//! - [`method`] - Parsed method bodies, exception handlers, and nested section trees
//!
//! # Examples
//!
//! ```rust
//! use methodscope::metadata::method::MethodData;
//!
//! // Tiny header: 2 instructions, 1 byte header
//! let body = [0x0A, 0x02, 0x2A];
//! let data = MethodData::from_body(&body).unwrap();
//!
//! assert_eq!(data.max_stack, 8);
//! assert_eq!(data.instructions.len(), 2);
//! ```

/// Value types for IL offsets and code ranges
pub mod label;
/// Implementation of the MethodHeader of CIL
pub mod method;
/// Commonly used metadata token type
pub mod token;
