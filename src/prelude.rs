//! # methodscope Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and
//! functions from the methodscope library. Import this module to get quick access to
//! the essential types for method body analysis.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all methodscope operations
pub use crate::Error;

/// The result type used throughout methodscope
pub use crate::Result;

/// Invariant violations reported by the section reconstructor
pub use crate::StructuralError;

// ================================================================================================
// Main Entry Points
// ================================================================================================

/// Parsed method body and renderer-facing lookups
pub use crate::MethodData;

/// Low-level byte cursor used by the parsing layer
pub use crate::Parser;

/// Hex dump text codec
pub use crate::hex;

/// Flat and braced listing renderers
pub use crate::formatter;

// ================================================================================================
// Value Primitives
// ================================================================================================

/// Byte offset and half-open byte range within a method body
pub use crate::metadata::label::{CodeRange, Label};

/// Opaque metadata token (8 hex digit rendering, zero = absent)
pub use crate::metadata::token::Token;

// ================================================================================================
// Method Body Model
// ================================================================================================

/// Exception handler clauses and body-level flags
pub use crate::metadata::method::{
    ExceptionHandler, HandlerKind, MethodDataFlags, MethodDataSection,
};

/// Nested section tree and its reconstruction from the flat handler table
pub use crate::metadata::method::{reconstruct, HandlerBlock, Section};

// ================================================================================================
// Disassembler
// ================================================================================================

/// CIL instruction decoding and the decoded instruction model
pub use crate::disassembler::{
    decode, Decoder, FlowType, Instruction, OpCode, Operand, OperandType, MAX_MNEMONIC_LENGTH,
};
