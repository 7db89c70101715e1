//! Tolerant CIL instruction decoding.
//!
//! This module decodes raw CIL bytecode into [`Instruction`] sequences. Decoding
//! is total: unrecognized opcodes and truncated operands become instructions that
//! carry the problem instead of aborting the pass, so the decoded ranges always
//! tile the input without gaps. That makes the decoder safe to point at damaged
//! or hostile method bodies.
//!
//! # Example: Decoding a Code Block
//!
//! ```rust
//! use methodscope::disassembler::decode;
//!
//! let code = [0x00, 0x2A]; // nop, ret
//! let instructions = decode(&code);
//!
//! assert_eq!(instructions.len(), 2);
//! assert_eq!(instructions[0].to_string(), "IL_0000: nop");
//! assert_eq!(instructions[1].to_string(), "IL_0001: ret");
//! ```
//!
//! # Example: Iterating Lazily
//!
//! ```rust
//! use methodscope::disassembler::Decoder;
//!
//! let code = [0x16, 0x0A, 0x2A]; // ldc.i4.0, stloc.0, ret
//! let mut decoder = Decoder::new(&code);
//!
//! let first = decoder.next().unwrap();
//! assert_eq!(first.to_string(), "IL_0000: ldc.i4.0");
//! ```

use crate::{
    disassembler::{Instruction, Operand, OperandType, INSTRUCTIONS, INSTRUCTIONS_FE},
    file::io::read_le_at,
    metadata::{
        label::{CodeRange, Label},
        token::Token,
    },
    Error::OutOfBounds,
    Result,
};

/// A lazy decoder over a CIL code block.
///
/// The decoder walks the block front to back, yielding one [`Instruction`] per
/// encoding. It never fails: bytes that do not decode become instructions
/// without opcode metadata, and an operand cut off by the end of the block
/// becomes [`Operand::Incomplete`] with the instruction absorbing the rest of
/// the input. Use [`decode`] to collect the whole block in one call.
pub struct Decoder<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> Decoder<'a> {
    /// Create a decoder positioned at the start of `data`.
    #[must_use]
    pub fn new(data: &'a [u8]) -> Decoder<'a> {
        Decoder { data, offset: 0 }
    }
}

impl Iterator for Decoder<'_> {
    type Item = Instruction;

    fn next(&mut self) -> Option<Instruction> {
        if self.offset >= self.data.len() {
            return None;
        }

        let start = self.offset;
        let mut pos = start;

        let first_byte = self.data[pos];
        pos += 1;

        let opcode = if first_byte == 0xFE {
            match self.data.get(pos) {
                Some(&second_byte) => {
                    pos += 1;
                    INSTRUCTIONS_FE
                        .get(usize::from(second_byte))
                        .and_then(Option::as_ref)
                }
                // Prefix cut off by the end of the block
                None => None,
            }
        } else {
            INSTRUCTIONS[usize::from(first_byte)].as_ref()
        };

        let Some(opcode) = opcode else {
            self.offset = pos;
            return Some(Instruction {
                range: code_range(start, pos),
                opcode: None,
                operand: Operand::None,
            });
        };

        let (operand, end) = match read_operand(self.data, opcode.operand_type, pos) {
            Ok((operand, end)) => (operand, end),
            Err(_) => (Operand::Incomplete, self.data.len()),
        };

        self.offset = end;
        Some(Instruction {
            range: code_range(start, end),
            opcode: Some(opcode),
            operand,
        })
    }
}

/// Decodes a complete CIL code block into an instruction sequence.
///
/// The returned instructions tile `data` without gaps, in encoding order. See
/// [`Decoder`] for the tolerance rules applied to malformed input.
///
/// # Examples
///
/// ```rust
/// use methodscope::disassembler::decode;
///
/// let code = [0x2B, 0x00, 0x2A]; // br.s IL_0002, ret
/// let instructions = decode(&code);
///
/// assert_eq!(instructions.len(), 2);
/// assert_eq!(instructions[0].to_string(), "IL_0000: br.s IL_0002");
/// ```
#[must_use]
pub fn decode(data: &[u8]) -> Vec<Instruction> {
    Decoder::new(data).collect()
}

/// Reads the operand that follows an opcode, returning it together with the
/// position after the operand bytes.
fn read_operand(data: &[u8], operand_type: OperandType, pos: usize) -> Result<(Operand, usize)> {
    let mut cursor = pos;

    let operand = match operand_type {
        OperandType::None => Operand::None,
        OperandType::Int8 => Operand::Int32(i32::from(read_le_at::<i8>(data, &mut cursor)?)),
        OperandType::UInt8 => Operand::UInt8(read_le_at::<u8>(data, &mut cursor)?),
        OperandType::UInt16 => Operand::UInt16(read_le_at::<u16>(data, &mut cursor)?),
        OperandType::Int32 => Operand::Int32(read_le_at::<i32>(data, &mut cursor)?),
        OperandType::Int64 => Operand::Int64(read_le_at::<i64>(data, &mut cursor)?),
        OperandType::Float32 => Operand::Float32(read_le_at::<f32>(data, &mut cursor)?),
        OperandType::Float64 => Operand::Float64(read_le_at::<f64>(data, &mut cursor)?),
        OperandType::Token => Operand::Token(Token::new(read_le_at::<u32>(data, &mut cursor)?)),
        OperandType::ShortBranchTarget => {
            let delta = i32::from(read_le_at::<i8>(data, &mut cursor)?);
            Operand::Target(branch_target(cursor, delta))
        }
        OperandType::BranchTarget => {
            let delta = read_le_at::<i32>(data, &mut cursor)?;
            Operand::Target(branch_target(cursor, delta))
        }
        OperandType::Switch => {
            let case_count = read_le_at::<u32>(data, &mut cursor)?;

            let Some(table_len) = (case_count as usize).checked_mul(4) else {
                return Err(OutOfBounds);
            };
            let Some(end) = cursor.checked_add(table_len) else {
                return Err(OutOfBounds);
            };
            if end > data.len() {
                return Err(OutOfBounds);
            }

            // Displacements are relative to the end of the whole switch table
            let mut targets = Vec::with_capacity(case_count as usize);
            for _ in 0..case_count {
                let delta = read_le_at::<i32>(data, &mut cursor)?;
                targets.push(branch_target(end, delta));
            }

            Operand::Switch(targets)
        }
    };

    Ok((operand, cursor))
}

#[allow(clippy::cast_possible_truncation)]
fn branch_target(end: usize, delta: i32) -> Label {
    Label((end as i32).wrapping_add(delta))
}

#[allow(clippy::cast_possible_truncation)]
fn code_range(start: usize, end: usize) -> CodeRange {
    CodeRange::new(Label(start as i32), (end - start) as i32)
}
