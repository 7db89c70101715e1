//! Method body parsing for the Tiny and Fat header formats.
//!
//! A CIL method body starts with a header whose low two bits of the first byte
//! select the format. Tiny bodies pack the code size into the remaining six
//! bits and carry nothing else. Fat bodies have a 12-byte header with stack
//! depth, code size and locals signature, optionally followed by 4-byte
//! aligned auxiliary data sections holding the exception handler table in a
//! small or fat clause encoding (ECMA-335 II.25.4).
//!
//! # Architecture
//!
//! [`MethodData::from_body`] is all-or-nothing: every structural inconsistency
//! in the header or the data sections makes the whole body unparseable and
//! yields `None`. This is stricter than the instruction decoder underneath
//! it, which tolerates damage byte by byte; a body whose framing cannot be
//! trusted has no meaningful partial interpretation.
//!
//! # Key Components
//!
//! - [`MethodData`] - The parsed body with header fields, instructions and sections
//! - [`MethodDataFlags`] - Header flags surfaced to callers (currently `INIT_LOCALS`)
//! - [`MethodDataSection`] - One auxiliary data section with its handler clauses
//!
//! # Examples
//!
//! ```rust
//! use methodscope::metadata::method::MethodData;
//!
//! // Tiny header: code size 2, then ldarg.0, ret
//! let method = MethodData::from_body(&[0x0A, 0x02, 0x2A]).unwrap();
//! assert_eq!(method.max_stack, 8);
//! assert_eq!(method.instructions.len(), 2);
//! ```

use crate::{
    disassembler::{decode, Instruction, Operand},
    file::parser::Parser,
    metadata::{
        label::{CodeRange, Label},
        method::{ExceptionHandler, HandlerKind},
        token::Token,
    },
    Error, Result,
};
use bitflags::bitflags;
use std::collections::HashSet;

/// Format tag for a tiny header, in the low two bits of the first byte
const TINY_FORMAT: u8 = 0x02;
/// Format tag for a fat header, in the low two bits of the first byte
const FAT_FORMAT: u8 = 0x03;
/// Fixed portion of a fat header, in bytes
const FAT_HEADER_SIZE: usize = 12;
/// Fat header flag: auxiliary data sections follow the code
const FAT_MORE_SECTS: u16 = 0x08;
/// Fat header flag: the runtime zero-initializes locals before entry
const FAT_INIT_LOCALS: u16 = 0x10;

/// Section kind byte for an exception handler table in the small encoding
const SECTION_EH_TABLE: u8 = 0x01;
/// Section kind byte for an exception handler table in the fat encoding
const SECTION_EH_TABLE_FAT: u8 = 0x41;
/// Section flag selecting the fat encoding
const SECTION_FAT_FORMAT: u8 = 0x40;
/// Section flag: another section follows this one
const SECTION_MORE_SECTS: u8 = 0x80;
/// Every section starts with a 4-byte header included in its declared size
const SECTION_HEADER_SIZE: usize = 4;

/// Bytes per clause in the small encoding
const SMALL_CLAUSE_SIZE: usize = 12;
/// Bytes per clause in the fat encoding
const FAT_CLAUSE_SIZE: usize = 24;

bitflags! {
    /// Method body flags surfaced from the fat header.
    ///
    /// Tiny bodies have no flags. The header carries more bits than these
    /// (the format tag, the section marker), but those describe the encoding
    /// rather than the method and are consumed during parsing.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct MethodDataFlags: u32 {
        /// The runtime zero-initializes all locals before the method runs
        const INIT_LOCALS = 1 << 0;
    }
}

/// One auxiliary data section of a fat method body.
///
/// Well-formed bodies use sections only for exception handler tables; a
/// section of any other kind parses to an empty handler list but is kept so
/// the section count of the original body stays visible.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MethodDataSection {
    /// The handler clauses of this section, in on-disk order
    pub handlers: Vec<ExceptionHandler>,
}

/// A parsed method body.
///
/// The root aggregate of the crate: header fields, the decoded instruction
/// sequence and the flat exception handler tables, immutable once built.
/// Instructions appear in strictly ascending offset order and tile the code
/// range without gaps, which is what makes [`MethodData::instruction_at`] and
/// [`MethodData::instructions_in`] simple binary searches.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodData {
    /// Token of the locals signature, zero when the method has no locals
    pub locals_token: Token,
    /// Operand stack depth the method declares; tiny bodies imply 8
    pub max_stack: i32,
    /// Declared size of the code region in bytes
    pub code_size: i32,
    /// Flags surfaced from the header
    pub flags: MethodDataFlags,
    /// The decoded code region
    pub instructions: Vec<Instruction>,
    /// Auxiliary data sections, in on-disk order
    pub data_sections: Vec<MethodDataSection>,
}

impl MethodData {
    /// Parses a full on-disk method body, header included.
    ///
    /// Returns `None` for anything that is not a consistent Tiny or Fat
    /// body: an empty buffer, an unknown format tag, a header or section
    /// that runs past the end of the buffer, a negative code size, or an
    /// exception clause of unknown kind. Damage *inside* the code region
    /// does not count; the instruction decoder absorbs it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use methodscope::metadata::method::MethodData;
    ///
    /// assert!(MethodData::from_body(&[]).is_none());
    /// assert!(MethodData::from_body(&[0x0A, 0x02, 0x2A]).is_some());
    /// ```
    #[must_use]
    pub fn from_body(data: &[u8]) -> Option<MethodData> {
        parse_body(data).ok()
    }

    /// Wraps a bare code region with no header around it.
    ///
    /// Everything except the instructions is left at its zero value, so the
    /// listing renderer prints no header block for such a method.
    #[must_use]
    pub fn from_il(data: &[u8]) -> MethodData {
        MethodData {
            locals_token: Token::new(0),
            max_stack: 0,
            code_size: 0,
            flags: MethodDataFlags::empty(),
            instructions: decode(data),
            data_sections: Vec::new(),
        }
    }

    /// Iterates over all handler clauses of all data sections, in on-disk order
    pub fn handlers(&self) -> impl Iterator<Item = &ExceptionHandler> {
        self.data_sections
            .iter()
            .flat_map(|section| section.handlers.iter())
    }

    /// Collects every label that some construct jumps to or bounds.
    ///
    /// The set contains the target of every branch and switch operand plus,
    /// for each handler clause, the start and end of its try and handler
    /// ranges and the filter start of filter clauses. Listing renderers mark
    /// these offsets with a label line.
    #[must_use]
    pub fn jump_targets(&self) -> HashSet<Label> {
        let mut targets = HashSet::new();

        for instruction in &self.instructions {
            match &instruction.operand {
                Operand::Target(label) => {
                    targets.insert(*label);
                }
                Operand::Switch(labels) => targets.extend(labels.iter().copied()),
                _ => {}
            }
        }

        for handler in self.handlers() {
            targets.insert(handler.try_range.offset);
            targets.insert(handler.try_range.end());
            targets.insert(handler.handler_range.offset);
            targets.insert(handler.handler_range.end());

            if handler.kind == HandlerKind::Filter {
                targets.insert(Label(handler.filter_or_type));
            }
        }

        targets
    }

    /// Finds the instruction that starts exactly at `label`.
    ///
    /// Returns `None` when the label points between instructions, past the
    /// code, or before it.
    #[must_use]
    pub fn instruction_at(&self, label: Label) -> Option<&Instruction> {
        self.instructions
            .binary_search_by(|instruction| instruction.range.offset.cmp(&label))
            .ok()
            .map(|index| &self.instructions[index])
    }

    /// Returns the instructions covering exactly `range`.
    ///
    /// `None` when either boundary of the range falls inside an instruction;
    /// a handler table can legally split the code at offsets the instruction
    /// stream does not, and such a range has no instruction rendering.
    #[must_use]
    pub fn instructions_in(&self, range: CodeRange) -> Option<&[Instruction]> {
        let start = self
            .instructions
            .partition_point(|instruction| instruction.range.offset < range.offset);
        let end = self
            .instructions
            .partition_point(|instruction| instruction.range.offset < range.end());
        let slice = &self.instructions[start..end];

        let aligned = match (slice.first(), slice.last()) {
            (Some(first), Some(last)) => {
                first.range.offset == range.offset && last.range.end() == range.end()
            }
            _ => range.length == 0,
        };

        aligned.then_some(slice)
    }

    /// Returns the range the decoded instructions cover, starting at zero
    #[must_use]
    pub fn code_range(&self) -> CodeRange {
        let length = self
            .instructions
            .last()
            .map_or(0, |instruction| i32::from(instruction.range.end()));
        CodeRange::new(Label(0), length)
    }
}

fn parse_body(data: &[u8]) -> Result<MethodData> {
    let mut parser = Parser::new(data);
    let first_byte = parser.peek_byte().map_err(|_| Error::Empty)?;

    match first_byte & 0x03 {
        TINY_FORMAT => parse_tiny(&mut parser),
        FAT_FORMAT => parse_fat(&mut parser),
        _ => Err(Error::NotSupported),
    }
}

fn parse_tiny(parser: &mut Parser) -> Result<MethodData> {
    let first_byte = parser.read_le::<u8>()?;
    let code_size = first_byte >> 2;
    let code = parser.read_bytes(usize::from(code_size))?;

    Ok(MethodData {
        locals_token: Token::new(0),
        max_stack: 8,
        code_size: i32::from(code_size),
        flags: MethodDataFlags::empty(),
        instructions: decode(code),
        data_sections: Vec::new(),
    })
}

fn parse_fat(parser: &mut Parser) -> Result<MethodData> {
    if parser.len() < FAT_HEADER_SIZE {
        return Err(out_of_bounds_error!());
    }

    let flags_and_size = parser.read_le::<u16>()?;
    let max_stack = i32::from(parser.read_le::<u16>()?);
    let code_size = parser.read_le::<i32>()?;
    let locals_token = Token::new(parser.read_le::<u32>()?);

    // The header length nibble counts 4-byte units. Values other than 3 are
    // unusual but consistent bodies exist with them, and the code region
    // begins wherever the nibble says, even inside the fixed header.
    let header_length = usize::from((parser.data()[1] >> 2) & 0x3C);
    if header_length < FAT_HEADER_SIZE {
        parser.seek(header_length)?;
    } else {
        parser.advance_by(header_length - FAT_HEADER_SIZE)?;
    }

    let Ok(code_length) = usize::try_from(code_size) else {
        return Err(malformed_error!("Negative code size: {}", code_size));
    };
    let code = parser.read_bytes(code_length)?;

    let mut data_sections = Vec::new();
    if flags_and_size & FAT_MORE_SECTS != 0 {
        parser.align(4)?;

        loop {
            let (section, next) = parse_section(parser)?;
            data_sections.push(section);

            match next {
                Some(next) if next < parser.len() => parser.seek(next)?,
                _ => break,
            }
        }
    }

    let mut flags = MethodDataFlags::empty();
    if flags_and_size & FAT_INIT_LOCALS != 0 {
        flags |= MethodDataFlags::INIT_LOCALS;
    }

    Ok(MethodData {
        locals_token,
        max_stack,
        code_size,
        flags,
        instructions: decode(code),
        data_sections,
    })
}

/// Parses one data section at the current position.
///
/// The second half of the return value is the absolute offset of the next
/// section, present only when this section's more-sections flag is set. A
/// chain whose last section ends exactly at the end of the buffer terminates
/// normally even with the flag set.
fn parse_section(parser: &mut Parser) -> Result<(MethodDataSection, Option<usize>)> {
    let section_start = parser.pos();
    let flags = parser.read_le::<u8>()?;

    let data_size = if flags & SECTION_FAT_FORMAT != 0 {
        // Fat sections store the size in the upper 24 bits of the first word
        parser.seek(section_start)?;
        (parser.read_le::<u32>()? >> 8) as usize
    } else {
        usize::from(parser.read_le::<u8>()?)
    };

    // The declared size covers the section header itself. Anything smaller
    // cannot advance the section chain and would loop forever.
    if data_size < SECTION_HEADER_SIZE {
        return Err(malformed_error!("Data section size {} too small", data_size));
    }

    let Some(section_end) = section_start.checked_add(data_size) else {
        return Err(out_of_bounds_error!());
    };
    if section_end > parser.len() {
        return Err(out_of_bounds_error!());
    }

    if flags & SECTION_FAT_FORMAT == 0 {
        // Reserved padding after the small size byte
        parser.advance_by(2)?;
    }

    let clause_data = parser.read_bytes(data_size - SECTION_HEADER_SIZE)?;

    let handlers = match flags & !SECTION_MORE_SECTS {
        SECTION_EH_TABLE_FAT => parse_fat_clauses(clause_data)?,
        SECTION_EH_TABLE => parse_small_clauses(clause_data)?,
        _ => Vec::new(),
    };

    let next = (flags & SECTION_MORE_SECTS != 0).then_some(section_end);
    Ok((MethodDataSection { handlers }, next))
}

/// Decodes small-encoding clauses: 2-byte offsets, 1-byte lengths.
///
/// Trailing bytes that do not fill a whole clause are ignored.
fn parse_small_clauses(data: &[u8]) -> Result<Vec<ExceptionHandler>> {
    let count = data.len() / SMALL_CLAUSE_SIZE;
    let mut handlers = Vec::with_capacity(count);
    let mut parser = Parser::new(data);

    for _ in 0..count {
        let flags = parser.read_le::<u16>()?;
        let try_offset = parser.read_le::<u16>()?;
        let try_length = parser.read_le::<u8>()?;
        let handler_offset = parser.read_le::<u16>()?;
        let handler_length = parser.read_le::<u8>()?;
        let filter_or_type = parser.read_le::<i32>()?;

        handlers.push(ExceptionHandler::new(
            handler_kind(u32::from(flags))?,
            CodeRange::new(Label(i32::from(try_offset)), i32::from(try_length)),
            CodeRange::new(Label(i32::from(handler_offset)), i32::from(handler_length)),
            filter_or_type,
        ));
    }

    Ok(handlers)
}

/// Decodes fat-encoding clauses: 4-byte fields throughout.
///
/// Trailing bytes that do not fill a whole clause are ignored.
fn parse_fat_clauses(data: &[u8]) -> Result<Vec<ExceptionHandler>> {
    let count = data.len() / FAT_CLAUSE_SIZE;
    let mut handlers = Vec::with_capacity(count);
    let mut parser = Parser::new(data);

    for _ in 0..count {
        let flags = parser.read_le::<u32>()?;
        let try_offset = parser.read_le::<i32>()?;
        let try_length = parser.read_le::<i32>()?;
        let handler_offset = parser.read_le::<i32>()?;
        let handler_length = parser.read_le::<i32>()?;
        let filter_or_type = parser.read_le::<i32>()?;

        handlers.push(ExceptionHandler::new(
            handler_kind(flags)?,
            CodeRange::new(Label(try_offset), try_length),
            CodeRange::new(Label(handler_offset), handler_length),
            filter_or_type,
        ));
    }

    Ok(handlers)
}

fn handler_kind(flags: u32) -> Result<HandlerKind> {
    HandlerKind::from_repr(flags)
        .ok_or_else(|| malformed_error!("Unknown exception clause kind: {:#X}", flags))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::{fat_body, small_clause, small_eh_section};

    #[test]
    fn parse_tiny_basic() {
        let method = MethodData::from_body(&[0x0A, 0x02, 0x2A]).unwrap();

        assert_eq!(method.locals_token, Token::new(0));
        assert_eq!(method.max_stack, 8);
        assert_eq!(method.code_size, 2);
        assert_eq!(method.flags, MethodDataFlags::empty());
        assert_eq!(method.instructions.len(), 2);
        assert!(method.data_sections.is_empty());
    }

    #[test]
    fn parse_tiny_empty_code() {
        let method = MethodData::from_body(&[0x02]).unwrap();

        assert_eq!(method.code_size, 0);
        assert!(method.instructions.is_empty());
    }

    #[test]
    fn parse_tiny_truncated_code() {
        // Declares 2 code bytes but carries only 1
        assert!(MethodData::from_body(&[0x0A, 0x02]).is_none());
    }

    #[test]
    fn parse_rejects_empty_buffer() {
        assert!(MethodData::from_body(&[]).is_none());
    }

    #[test]
    fn parse_rejects_unknown_format() {
        assert!(MethodData::from_body(&[0x00]).is_none());
        assert!(MethodData::from_body(&[0x01]).is_none());
        assert!(MethodData::from_body(&[0xFC, 0x2A]).is_none());
    }

    #[test]
    fn parse_fat_basic() {
        // ldc.i4.0, stloc.0, ret
        let body = fat_body(2, 0x1100_0001, false, &[0x16, 0x0A, 0x2A], &[]);
        let method = MethodData::from_body(&body).unwrap();

        assert_eq!(method.locals_token, Token::new(0x1100_0001));
        assert_eq!(method.max_stack, 2);
        assert_eq!(method.code_size, 3);
        assert_eq!(method.flags, MethodDataFlags::empty());
        assert_eq!(method.instructions.len(), 3);
        assert!(method.data_sections.is_empty());
    }

    #[test]
    fn parse_fat_init_locals() {
        let body = fat_body(1, 0x1100_0001, true, &[0x2A], &[]);
        let method = MethodData::from_body(&body).unwrap();

        assert!(method.flags.contains(MethodDataFlags::INIT_LOCALS));
    }

    #[test]
    fn parse_fat_rejects_short_header() {
        assert!(MethodData::from_body(&[0x03, 0x30]).is_none());
        assert!(MethodData::from_body(&[0x03, 0x30, 0x00, 0x00, 0x01, 0x00]).is_none());
    }

    #[test]
    fn parse_fat_rejects_negative_code_size() {
        let mut body = fat_body(1, 0, false, &[0x2A], &[]);
        body[4..8].copy_from_slice(&(-1i32).to_le_bytes());

        assert!(MethodData::from_body(&body).is_none());
    }

    #[test]
    fn parse_fat_rejects_truncated_code() {
        let mut body = fat_body(1, 0, false, &[0x2A], &[]);
        body[4..8].copy_from_slice(&2i32.to_le_bytes());

        assert!(MethodData::from_body(&body).is_none());
    }

    #[test]
    fn parse_fat_rejects_header_length_past_buffer() {
        let mut body = fat_body(1, 0, false, &[0x2A], &[]);
        body[1] = 0xF0; // header length 60

        assert!(MethodData::from_body(&body).is_none());
    }

    #[test]
    fn parse_fat_code_overlapping_header() {
        // Header length nibble 2 starts the code at offset 8, on top of the
        // locals token field. Degenerate, but consistent, so it parses.
        let body = [
            0x03, 0x20, 0x00, 0x00, 0x04, 0x00, 0x00, 0x00, 0x2A, 0x2A, 0x2A, 0x2A,
        ];
        let method = MethodData::from_body(&body).unwrap();

        assert_eq!(method.code_size, 4);
        assert_eq!(method.locals_token, Token::new(0x2A2A_2A2A));
        assert_eq!(method.instructions.len(), 4);
    }

    #[test]
    fn parse_fat_small_eh_section() {
        let section = small_eh_section(&small_clause(0, 0, 6, 6, 4, 0x0200_0010));
        let body = fat_body(2, 0, false, &[0x00; 10], &section);
        let method = MethodData::from_body(&body).unwrap();

        assert_eq!(method.data_sections.len(), 1);
        let handler = &method.data_sections[0].handlers[0];
        assert_eq!(handler.kind, HandlerKind::Catch);
        assert_eq!(handler.try_range, CodeRange::new(Label(0), 6));
        assert_eq!(handler.handler_range, CodeRange::new(Label(6), 4));
        assert_eq!(handler.filter_or_type, 0x0200_0010);
    }

    #[test]
    fn parse_fat_small_section_multiple_clauses() {
        let mut clauses = small_clause(2, 0, 4, 4, 2, 0);
        clauses.extend_from_slice(&small_clause(1, 6, 1, 8, 2, 7));
        let section = small_eh_section(&clauses);
        let body = fat_body(2, 0, false, &[0x00; 10], &section);
        let method = MethodData::from_body(&body).unwrap();

        let handlers = &method.data_sections[0].handlers;
        assert_eq!(handlers.len(), 2);
        assert_eq!(handlers[0].kind, HandlerKind::Finally);
        assert_eq!(handlers[1].kind, HandlerKind::Filter);
        assert_eq!(handlers[1].filter_or_type, 7);
    }

    #[test]
    fn parse_fat_eh_section_fat_encoding() {
        let mut section = vec![0x41, 0x00, 0x00, 0x00];
        section[1] = 4 + 24; // size lives in the upper 24 bits
        section.extend_from_slice(&2u32.to_le_bytes()); // finally
        section.extend_from_slice(&0i32.to_le_bytes());
        section.extend_from_slice(&6i32.to_le_bytes());
        section.extend_from_slice(&6i32.to_le_bytes());
        section.extend_from_slice(&4i32.to_le_bytes());
        section.extend_from_slice(&0i32.to_le_bytes());

        let body = fat_body(2, 0, false, &[0x00; 10], &section);
        let method = MethodData::from_body(&body).unwrap();

        let handler = &method.data_sections[0].handlers[0];
        assert_eq!(handler.kind, HandlerKind::Finally);
        assert_eq!(handler.try_range, CodeRange::new(Label(0), 6));
        assert_eq!(handler.handler_range, CodeRange::new(Label(6), 4));
    }

    #[test]
    fn parse_fat_chained_sections() {
        // First section links to the second; the second ends exactly at the
        // end of the buffer with its continuation flag still set.
        let mut sections = Vec::new();
        sections.extend_from_slice(&small_eh_section(&small_clause(0, 0, 2, 2, 2, 0x0200_0011)));
        sections[0] |= 0x80;
        sections.extend_from_slice(&small_eh_section(&small_clause(2, 0, 4, 4, 2, 0)));
        let flag_offset = sections.len() - 16;
        sections[flag_offset] |= 0x80;

        let body = fat_body(2, 0, false, &[0x00; 8], &sections);
        let method = MethodData::from_body(&body).unwrap();

        assert_eq!(method.data_sections.len(), 2);
        assert_eq!(method.data_sections[0].handlers[0].kind, HandlerKind::Catch);
        assert_eq!(
            method.data_sections[1].handlers[0].kind,
            HandlerKind::Finally
        );
    }

    #[test]
    fn parse_fat_non_eh_section() {
        // Kind byte without the EH bit: the section parses but carries nothing
        let section = [0x00, 0x08, 0x00, 0x00, 0xAA, 0xBB, 0xCC, 0xDD];
        let body = fat_body(2, 0, false, &[0x2A, 0x2A], &section);
        let method = MethodData::from_body(&body).unwrap();

        assert_eq!(method.data_sections.len(), 1);
        assert!(method.data_sections[0].handlers.is_empty());
    }

    #[test]
    fn parse_fat_clause_count_floors() {
        // 12 clause bytes plus 5 stray bytes decode to exactly one clause
        let mut clauses = small_clause(0, 0, 2, 2, 2, 0x0200_0010);
        clauses.extend_from_slice(&[0xFF; 5]);
        let section = small_eh_section(&clauses);
        let body = fat_body(2, 0, false, &[0x00; 4], &section);
        let method = MethodData::from_body(&body).unwrap();

        assert_eq!(method.data_sections[0].handlers.len(), 1);
    }

    #[test]
    fn parse_fat_rejects_unknown_clause_kind() {
        let section = small_eh_section(&small_clause(3, 0, 2, 2, 2, 0));
        let body = fat_body(2, 0, false, &[0x00; 4], &section);

        assert!(MethodData::from_body(&body).is_none());
    }

    #[test]
    fn parse_fat_rejects_section_past_buffer() {
        // Declared section size runs past the end of the buffer
        let section = [0x01, 0x40, 0x00, 0x00];
        let body = fat_body(2, 0, false, &[0x00; 4], &section);

        assert!(MethodData::from_body(&body).is_none());
    }

    #[test]
    fn parse_fat_rejects_undersized_section() {
        // A zero-size section could never advance the section chain
        let section = [0x81, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00];
        let body = fat_body(2, 0, false, &[0x00; 4], &section);

        assert!(MethodData::from_body(&body).is_none());
    }

    #[test]
    fn parse_fat_rejects_missing_section() {
        // More-sections flag set, but the buffer ends after the code
        let mut body = fat_body(2, 0, false, &[0x00; 4], &[]);
        body[0] |= 0x08;

        assert!(MethodData::from_body(&body).is_none());
    }

    #[test]
    fn from_il_wraps_bare_code() {
        let method = MethodData::from_il(&[0x00, 0x2A]);

        assert_eq!(method.locals_token, Token::new(0));
        assert_eq!(method.max_stack, 0);
        assert_eq!(method.code_size, 0);
        assert_eq!(method.instructions.len(), 2);
        assert!(method.data_sections.is_empty());
    }

    #[test]
    fn jump_targets_from_branches_and_handlers() {
        // br.s +0 to the ret at offset 2, with a filter clause over it
        let section = small_eh_section(&small_clause(1, 0, 1, 2, 1, 1));
        let body = fat_body(1, 0, false, &[0x2B, 0x00, 0x2A], &section);
        let method = MethodData::from_body(&body).unwrap();

        let targets = method.jump_targets();
        // Branch target 2; try 0..1, handler 2..3, filter start 1
        assert!(targets.contains(&Label(0)));
        assert!(targets.contains(&Label(1)));
        assert!(targets.contains(&Label(2)));
        assert!(targets.contains(&Label(3)));
        assert_eq!(targets.len(), 4);
    }

    #[test]
    fn instruction_lookup_by_label() {
        let method = MethodData::from_il(&[0x00, 0x20, 0x01, 0x00, 0x00, 0x00, 0x2A]);

        assert_eq!(
            method.instruction_at(Label(1)).map(|i| i.range.length),
            Some(5)
        );
        assert_eq!(
            method.instruction_at(Label(6)).map(|i| i.range.length),
            Some(1)
        );
        assert!(method.instruction_at(Label(2)).is_none()); // mid-instruction
        assert!(method.instruction_at(Label(7)).is_none()); // past the end
    }

    #[test]
    fn instruction_slice_by_range() {
        let method = MethodData::from_il(&[0x00, 0x00, 0x20, 0x01, 0x00, 0x00, 0x00, 0x2A]);

        let slice = method.instructions_in(CodeRange::new(Label(0), 2)).unwrap();
        assert_eq!(slice.len(), 2);

        let slice = method.instructions_in(CodeRange::new(Label(2), 6)).unwrap();
        assert_eq!(slice.len(), 2);

        // Boundaries inside the ldc.i4 operand are not renderable
        assert!(method.instructions_in(CodeRange::new(Label(2), 3)).is_none());
        assert!(method.instructions_in(CodeRange::new(Label(3), 5)).is_none());

        let empty = method.instructions_in(CodeRange::new(Label(2), 0)).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn code_range_spans_instructions() {
        let method = MethodData::from_il(&[0x00, 0x2A]);
        assert_eq!(method.code_range(), CodeRange::new(Label(0), 2));

        let empty = MethodData::from_il(&[]);
        assert_eq!(empty.code_range(), CodeRange::new(Label(0), 0));
    }
}
