//! CIL method bodies: header parsing, exception handlers and section trees.
//!
//! The types here form the middle of the crate's pipeline. [`MethodData`]
//! carries a parsed body (header fields, decoded instructions, flat handler
//! tables); [`reconstruct`] lifts the flat tables into a nested [`Section`]
//! tree for structured rendering.
//!
//! # Key Components
//!
//! - [`MethodData`] - Parsed method body and the renderer-facing lookups
//! - [`ExceptionHandler`] / [`HandlerKind`] - One flat handler clause
//! - [`reconstruct`] / [`Section`] / [`HandlerBlock`] - The nested tree
//!
//! # Examples
//!
//! ```rust
//! use methodscope::metadata::method::{reconstruct, MethodData, Section};
//!
//! // Tiny body with no handlers: the whole code range is plain
//! let method = MethodData::from_body(&[0x0A, 0x00, 0x2A]).unwrap();
//! let handlers: Vec<_> = method.handlers().copied().collect();
//! let tree = reconstruct(method.code_range(), &handlers).unwrap();
//! assert!(matches!(tree, Section::Plain(_)));
//! ```

/// Parsing of the Tiny and Fat method body formats
mod body;
/// Flat exception handler clauses
mod exceptions;
/// Reconstruction of the nested section tree
mod sections;

pub use body::{MethodData, MethodDataFlags, MethodDataSection};
pub use exceptions::{ExceptionHandler, HandlerKind};
pub use sections::{reconstruct, HandlerBlock, Section};
