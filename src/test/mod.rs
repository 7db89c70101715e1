//! Builders for crafting method body buffers in tests.
//!
//! Hand-writing fat headers and clause tables as byte arrays buries the
//! interesting part of a test under framing arithmetic; these helpers keep
//! the framing correct so tests only spell out what they actually exercise.

/// Assembles a fat-format method body.
///
/// The header length is the standard 12 bytes and the code size is taken
/// from `code`. When `sections` is non-empty it is appended after 4-byte
/// alignment padding and the more-sections flag is set; the bytes must
/// already form a valid section chain.
pub(crate) fn fat_body(
    max_stack: u16,
    locals_token: u32,
    init_locals: bool,
    code: &[u8],
    sections: &[u8],
) -> Vec<u8> {
    let mut flags: u16 = 0x3003;
    if init_locals {
        flags |= 0x10;
    }
    if !sections.is_empty() {
        flags |= 0x08;
    }

    let mut body = Vec::new();
    body.extend_from_slice(&flags.to_le_bytes());
    body.extend_from_slice(&max_stack.to_le_bytes());
    body.extend_from_slice(&(code.len() as i32).to_le_bytes());
    body.extend_from_slice(&locals_token.to_le_bytes());
    body.extend_from_slice(code);

    if !sections.is_empty() {
        while body.len() % 4 != 0 {
            body.push(0);
        }
        body.extend_from_slice(sections);
    }

    body
}

/// Wraps clause bytes in a small-encoding exception handler section.
///
/// The more-sections flag is left clear; chain tests set it on the returned
/// bytes themselves.
pub(crate) fn small_eh_section(clauses: &[u8]) -> Vec<u8> {
    let mut section = vec![0x01, (4 + clauses.len()) as u8, 0x00, 0x00];
    section.extend_from_slice(clauses);
    section
}

/// Encodes one small-format exception clause.
pub(crate) fn small_clause(
    flags: u16,
    try_offset: u16,
    try_length: u8,
    handler_offset: u16,
    handler_length: u8,
    filter_or_type: i32,
) -> Vec<u8> {
    let mut clause = Vec::with_capacity(12);
    clause.extend_from_slice(&flags.to_le_bytes());
    clause.extend_from_slice(&try_offset.to_le_bytes());
    clause.push(try_length);
    clause.extend_from_slice(&handler_offset.to_le_bytes());
    clause.push(handler_length);
    clause.extend_from_slice(&filter_or_type.to_le_bytes());
    clause
}
