//! CIL (Common Intermediate Language) instruction decoding engine.
//!
//! This module provides support for decoding raw CIL bytecode into structured
//! instruction sequences. The decoder is tolerant of malformed input and keeps
//! going where stricter disassemblers would stop, which makes it usable on
//! truncated, corrupted, or deliberately hostile method bodies.
//!
//! # Key Types
//! - [`Instruction`] - Represents a decoded CIL instruction
//! - [`Decoder`] - Lazy iterator over the instructions of a code block
//! - [`Operand`] - Instruction operands (immediates, tokens, branch targets)
//! - [`FlowType`] - How instructions affect control flow
//!
//! # Main Functions
//! - [`decode`] - Decode a complete code block into instructions
//!
//! # Example
//! ```rust
//! use methodscope::disassembler::decode;
//!
//! let bytecode = [0x00, 0x2A]; // nop, ret
//! let instructions = decode(&bytecode);
//! for instruction in &instructions {
//!     println!("{instruction}");
//! }
//! ```

mod decoder;
mod instruction;
mod instructions;

pub use decoder::{decode, Decoder};
pub use instruction::{FlowType, Instruction, OpCode, Operand, OperandType};
pub use instructions::MAX_MNEMONIC_LENGTH;
pub(crate) use instructions::{INSTRUCTIONS, INSTRUCTIONS_FE};
