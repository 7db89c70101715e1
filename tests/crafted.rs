//! Integration tests for hostile and truncated method bodies.
//!
//! The parser is the first layer untrusted bytes reach. Every test here feeds
//! it input that is wrong in one specific way and checks for a clean rejection
//! or a tolerant decode. None of these inputs may panic, hang, or allocate
//! wildly.

use methodscope::prelude::*;

fn fat_body(max_stack: u16, code: &[u8], sections: &[u8]) -> Vec<u8> {
    let mut flags: u16 = 0x3003;
    if !sections.is_empty() {
        flags |= 0x08;
    }

    let mut body = Vec::new();
    body.extend_from_slice(&flags.to_le_bytes());
    body.extend_from_slice(&max_stack.to_le_bytes());
    body.extend_from_slice(&(i32::try_from(code.len()).unwrap()).to_le_bytes());
    body.extend_from_slice(&0_u32.to_le_bytes());
    body.extend_from_slice(code);

    while body.len() % 4 != 0 {
        body.push(0);
    }
    body.extend_from_slice(sections);
    body
}

fn fat_clause(flags: u32, ranges: [i32; 4], filter_or_type: i32) -> Vec<u8> {
    let mut clause = Vec::with_capacity(24);
    clause.extend_from_slice(&flags.to_le_bytes());
    for field in ranges {
        clause.extend_from_slice(&field.to_le_bytes());
    }
    clause.extend_from_slice(&filter_or_type.to_le_bytes());
    clause
}

fn fat_eh_section(clauses: &[u8]) -> Vec<u8> {
    let data_size = u32::try_from(clauses.len()).unwrap() + 4;
    let mut section = (data_size << 8 | 0x41).to_le_bytes().to_vec();
    section.extend_from_slice(clauses);
    section
}

/// Decoded instructions must tile the code exactly: back to back ranges,
/// no gaps, no overlap, ending at the buffer end.
fn assert_tiles(method: &MethodData, len: i32) {
    let mut offset = 0;
    for instruction in &method.instructions {
        assert_eq!(instruction.range.offset, Label(offset));
        assert!(instruction.range.length > 0);
        offset += instruction.range.length;
    }
    assert_eq!(offset, len);
}

/// Every prefix of a well-formed body must either parse or be rejected,
/// and whatever parses must render in both modes.
#[test]
fn test_every_body_prefix_is_safe() {
    let body = hex::parse(
        "1B 30 02 00 07 00 00 00 01 00 00 11
         00 DE 03 26 DE 00 2A 00
         01 10 00 00
         00 00 00 00 03 03 00 03 10 00 00 02",
    )
    .unwrap();

    for len in 0..=body.len() {
        if let Some(method) = MethodData::from_body(&body[..len]) {
            let _ = formatter::format(&method);
            let _ = formatter::format_structured(&method);
        }
    }
}

/// Raw IL decoding is total: every prefix of a stream that mixes valid
/// opcodes, a two byte opcode, a switch, and junk still tiles its input.
#[test]
fn test_every_il_prefix_tiles() {
    let code = hex::parse(
        "00 FE 09 01 00 20 AA BB CC DD
         45 02 00 00 00 01 00 00 00 FB FF FF FF
         C4 FE 2A DE 05 2A",
    )
    .unwrap();

    for len in 0..=code.len() {
        let method = MethodData::from_il(&code[..len]);
        assert_tiles(&method, i32::try_from(len).unwrap());
    }
}

/// A switch whose case count promises gigabytes of table must not allocate;
/// the instruction degrades to an incomplete operand spanning the rest.
#[test]
fn test_hostile_switch_count() {
    let code = hex::parse("45 FF FF FF 7F").unwrap();
    let method = MethodData::from_il(&code);

    assert_eq!(method.instructions.len(), 1);
    assert_eq!(method.instructions[0].operand, Operand::Incomplete);
    assert_tiles(&method, 5);
}

/// Declared code sizes far beyond the buffer are rejected, not trusted.
#[test]
fn test_declared_code_size_beyond_buffer() {
    let huge = hex::parse("03 30 01 00 FF FF FF 7F 00 00 00 00 2A").unwrap();
    assert!(MethodData::from_body(&huge).is_none());

    // Tiny header promising 63 bytes of code on a 1 byte buffer.
    assert!(MethodData::from_body(&[0xFE]).is_none());
}

/// A section whose 24 bit length runs past the buffer is rejected.
#[test]
fn test_section_length_beyond_buffer() {
    let body = fat_body(1, &[0x2A], &hex::parse("41 FF FF FF").unwrap());
    assert!(MethodData::from_body(&body).is_none());
}

/// Bodies whose first byte matches neither the tiny nor the fat format
/// tag parse as nothing.
#[test]
fn test_unknown_format_tags() {
    assert!(MethodData::from_body(&[]).is_none());
    assert!(MethodData::from_body(&[0x00, 0x2A]).is_none());
    assert!(MethodData::from_body(&[0x01, 0x2A]).is_none());
}

/// Fifty finally clauses wrapped around the same code nest cleanly and the
/// braced renderer walks the full depth.
#[test]
fn test_deeply_nested_handlers() {
    let depth = 50;
    let mut code = vec![0x00; depth];
    code.push(0x2A);

    let mut clauses = Vec::new();
    for level in 0..depth {
        let level = i32::try_from(level).unwrap();
        clauses.extend_from_slice(&fat_clause(2, [0, level + 1, level + 1, 1], 0));
    }

    let body = fat_body(1, &code, &fat_eh_section(&clauses));
    let method = MethodData::from_body(&body).unwrap();
    assert_eq!(method.handlers().count(), depth);

    let listing = formatter::format_structured(&method);
    let braces = listing.lines().filter(|line| line.trim() == "{").count();
    assert_eq!(braces, depth * 2);
    assert_ne!(listing, formatter::format(&method));
}

/// Handler tables that overlap or tear instructions never break rendering;
/// the flat listing is the worst case outcome.
#[test]
fn test_torn_handler_boundaries_still_render() {
    // Catch handler boundary lands inside the 5 byte ldc.i4.
    let clause = fat_clause(0, [0, 3, 3, 4], 0x0200_0010);
    let body = fat_body(
        1,
        &hex::parse("00 20 01 00 00 00 2A").unwrap(),
        &fat_eh_section(&clause),
    );

    let method = MethodData::from_body(&body).unwrap();
    assert_eq!(formatter::format_structured(&method), formatter::format(&method));
}

/// Reconstruction rejects handler tables whose try blocks overlap without
/// nesting, and reports which invariant broke.
#[test]
fn test_overlapping_tries_reject() {
    let handlers = [
        ExceptionHandler::new(
            HandlerKind::Catch,
            CodeRange::new(Label(0), 4),
            CodeRange::new(Label(4), 4),
            0x0200_0010,
        ),
        ExceptionHandler::new(
            HandlerKind::Catch,
            CodeRange::new(Label(2), 4),
            CodeRange::new(Label(6), 2),
            0x0200_0011,
        ),
    ];

    assert_eq!(
        reconstruct(CodeRange::new(Label(0), 10), &handlers),
        Err(StructuralError::Overlap)
    );
}
