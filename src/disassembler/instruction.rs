//! CIL instruction representation, operand types, and decoding metadata.
//!
//! This module defines the type system for decoded CIL instructions. It provides
//! strongly-typed representations for operands and control flow behavior, plus the
//! static per-opcode metadata ([`crate::disassembler::OpCode`]) that drives decoding.
//!
//! # Architecture
//!
//! The module is organized around the central [`crate::disassembler::Instruction`] struct.
//! An instruction is a byte range paired with the opcode metadata it decoded to and the
//! operand that followed. Unrecognized encodings still produce an instruction, just one
//! without opcode metadata, so a decoded sequence always accounts for every input byte.
//!
//! # Key Components
//!
//! - [`crate::disassembler::Instruction`] - Complete decoded instruction representation
//! - [`crate::disassembler::OpCode`] - Static decode metadata for one opcode
//! - [`crate::disassembler::Operand`] - Type-safe operand representation
//! - [`crate::disassembler::OperandType`] - Encoding of the operand bytes after an opcode
//! - [`crate::disassembler::FlowType`] - Control flow behavior classification
//!
//! # Usage Examples
//!
//! ```rust
//! use methodscope::disassembler::decode;
//!
//! let code = [0x16, 0x0A, 0x2A]; // ldc.i4.0, stloc.0, ret
//! let instructions = decode(&code);
//!
//! assert_eq!(instructions.len(), 3);
//! assert_eq!(instructions[0].to_string(), "IL_0000: ldc.i4.0");
//! assert_eq!(instructions[2].to_string(), "IL_0002: ret");
//! ```
//!
//! # Integration
//!
//! This module integrates with:
//! - [`crate::disassembler::Decoder`] - Produces these types during instruction decoding
//! - [`crate::metadata::method::MethodData`] - Carries the decoded instruction sequence
//! - [`crate::formatter`] - Renders instructions into listings

use crate::metadata::{
    label::{CodeRange, Label},
    token::Token,
};
use std::fmt;

/// Types of operands for CIL instructions.
///
/// This enum describes the operand bytes that follow an opcode in the instruction
/// stream. Each variant corresponds to a specific encoding defined by ECMA-335
/// III.1.9, and determines both how many bytes the decoder consumes and how it
/// interprets them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandType {
    /// No operand bytes follow the opcode
    None,
    /// Signed 8-bit immediate (1 byte)
    Int8,
    /// Unsigned 8-bit local or argument slot (1 byte)
    UInt8,
    /// Unsigned 16-bit local or argument slot (2 bytes)
    UInt16,
    /// Signed 32-bit immediate (4 bytes)
    Int32,
    /// Signed 64-bit immediate (8 bytes)
    Int64,
    /// 32-bit floating point immediate (4 bytes)
    Float32,
    /// 64-bit floating point immediate (8 bytes)
    Float64,
    /// Metadata token reference (4 bytes)
    Token,
    /// Signed 8-bit branch displacement from the end of the instruction (1 byte)
    ShortBranchTarget,
    /// Signed 32-bit branch displacement from the end of the instruction (4 bytes)
    BranchTarget,
    /// Count-prefixed table of signed 32-bit branch displacements (4 + count * 4 bytes)
    Switch,
}

/// A decoded instruction operand.
///
/// This enum provides a high-level representation of instruction operands after
/// decoding. Branch displacements are already resolved into absolute
/// [`crate::metadata::label::Label`]s, and narrow immediates (`ldc.i4.s`) are
/// widened into the value they push. The [`Operand::Incomplete`] variant marks an
/// operand whose bytes run past the end of the code block.
///
/// # Examples
///
/// ```rust
/// use methodscope::disassembler::Operand;
/// use methodscope::metadata::label::Label;
///
/// assert_eq!(Operand::Int32(-3).to_string(), "-3");
/// assert_eq!(Operand::Target(Label(0x10)).to_string(), "IL_0010");
/// assert_eq!(Operand::Incomplete.to_string(), "??");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// No operand present
    None,
    /// Signed 32-bit value (also carries widened 8-bit immediates)
    Int32(i32),
    /// Signed 64-bit value
    Int64(i64),
    /// 32-bit floating point value
    Float32(f32),
    /// 64-bit floating point value
    Float64(f64),
    /// Unsigned 8-bit local or argument slot
    UInt8(u8),
    /// Unsigned 16-bit local or argument slot
    UInt16(u16),
    /// Metadata token reference
    Token(Token),
    /// Resolved branch target
    Target(Label),
    /// Resolved switch table targets
    Switch(Vec<Label>),
    /// Operand bytes run past the end of the code block
    Incomplete,
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::None => Ok(()),
            Operand::Int32(value) => write!(f, "{value}"),
            Operand::Int64(value) => write!(f, "{value}"),
            Operand::Float32(value) => write!(f, "{value}"),
            Operand::Float64(value) => write!(f, "{value}"),
            Operand::UInt8(value) => write!(f, "{value}"),
            Operand::UInt16(value) => write!(f, "{value}"),
            Operand::Token(token) => write!(f, "{token}"),
            Operand::Target(label) => write!(f, "{label}"),
            Operand::Switch(targets) => {
                f.write_str("{")?;
                for target in targets {
                    write!(f, " {target}")?;
                }
                f.write_str(" }")
            }
            Operand::Incomplete => f.write_str("??"),
        }
    }
}

/// How an instruction affects control flow.
///
/// This enum categorizes instructions based on their control flow behavior. The
/// listing renderers use it to insert visual breaks after instructions that never
/// fall through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowType {
    /// Normal execution continues to next instruction
    Sequential,
    /// Call to another method, execution resumes afterwards
    Call,
    /// Conditional branch to another location
    ConditionalBranch,
    /// Always branches to another location
    UnconditionalBranch,
    /// Returns from the current method or handler region
    Return,
    /// Exception throwing
    Throw,
}

/// Static decode metadata for a single CIL opcode.
///
/// One `OpCode` exists per defined encoding, held in the instruction tables and
/// referenced by every [`crate::disassembler::Instruction`] decoded from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpCode {
    /// Human-readable instruction mnemonic (e.g. "add", "ldloc.s", "ret")
    pub mnemonic: &'static str,
    /// Size of the opcode encoding itself in bytes (2 for `0xFE` prefixed opcodes)
    pub size: u8,
    /// The operand bytes that follow the opcode
    pub operand_type: OperandType,
    /// How this instruction affects control flow
    pub flow_type: FlowType,
}

/// A decoded CIL instruction.
///
/// An instruction couples the byte range it occupies with the opcode metadata it
/// decoded to and its operand. Decoding is total: bytes that do not form a valid
/// instruction still become an `Instruction`, with `opcode` set to `None` and the
/// range covering the unrecognized encoding. The ranges of a decoded sequence
/// tile the code block without gaps.
///
/// # Examples
///
/// ```rust
/// use methodscope::disassembler::{decode, Operand};
///
/// let code = [0x1F, 0x2C, 0x2A]; // ldc.i4.s 44, ret
/// let instructions = decode(&code);
///
/// assert_eq!(instructions[0].to_string(), "IL_0000: ldc.i4.s 44");
/// assert_eq!(instructions[0].operand, Operand::Int32(44));
/// assert_eq!(instructions[1].range.offset, methodscope::metadata::label::Label(2));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    /// The bytes this instruction occupies within the code block
    pub range: CodeRange,
    /// Decode metadata, or `None` for an unrecognized encoding
    pub opcode: Option<&'static OpCode>,
    /// The decoded operand
    pub operand: Operand,
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.range.offset)?;
        match self.opcode {
            Some(opcode) => {
                f.write_str(opcode.mnemonic)?;
                if self.operand != Operand::None {
                    write!(f, " {}", self.operand)?;
                }
                Ok(())
            }
            None => f.write_str("??"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static RET: OpCode = OpCode {
        mnemonic: "ret",
        size: 1,
        operand_type: OperandType::None,
        flow_type: FlowType::Return,
    };

    static LDC_I4: OpCode = OpCode {
        mnemonic: "ldc.i4",
        size: 1,
        operand_type: OperandType::Int32,
        flow_type: FlowType::Sequential,
    };

    fn range(offset: i32, length: i32) -> CodeRange {
        CodeRange::new(Label(offset), length)
    }

    #[test]
    fn test_operand_display() {
        assert_eq!(Operand::None.to_string(), "");
        assert_eq!(Operand::Int32(42).to_string(), "42");
        assert_eq!(Operand::Int32(-1).to_string(), "-1");
        assert_eq!(Operand::Int64(1 << 40).to_string(), "1099511627776");
        assert_eq!(Operand::Float32(1.5).to_string(), "1.5");
        assert_eq!(Operand::Float64(-0.25).to_string(), "-0.25");
        assert_eq!(Operand::UInt8(7).to_string(), "7");
        assert_eq!(Operand::UInt16(300).to_string(), "300");
        assert_eq!(Operand::Token(Token::new(0x0A000007)).to_string(), "0A000007");
        assert_eq!(Operand::Target(Label(0x1C)).to_string(), "IL_001C");
        assert_eq!(Operand::Incomplete.to_string(), "??");
    }

    #[test]
    fn test_switch_operand_display() {
        assert_eq!(Operand::Switch(Vec::new()).to_string(), "{ }");
        assert_eq!(
            Operand::Switch(vec![Label(5), Label(0x10)]).to_string(),
            "{ IL_0005 IL_0010 }"
        );
    }

    #[test]
    fn test_instruction_display() {
        let plain = Instruction {
            range: range(0, 1),
            opcode: Some(&RET),
            operand: Operand::None,
        };
        assert_eq!(plain.to_string(), "IL_0000: ret");

        let with_operand = Instruction {
            range: range(5, 5),
            opcode: Some(&LDC_I4),
            operand: Operand::Int32(42),
        };
        assert_eq!(with_operand.to_string(), "IL_0005: ldc.i4 42");

        let truncated = Instruction {
            range: range(1, 2),
            opcode: Some(&LDC_I4),
            operand: Operand::Incomplete,
        };
        assert_eq!(truncated.to_string(), "IL_0001: ldc.i4 ??");

        let invalid = Instruction {
            range: range(3, 1),
            opcode: None,
            operand: Operand::None,
        };
        assert_eq!(invalid.to_string(), "IL_0003: ??");
    }
}
