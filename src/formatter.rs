//! Text listings for decoded method bodies.
//!
//! Two renderings are available. [`format`] produces a flat listing: a
//! header, one line per instruction with jump-target labels interleaved,
//! and the exception handler table appended as `.try` directives. When a
//! method has handlers, [`format_structured`] instead nests the protected
//! regions in braces the way `ildasm` presents them, using the section
//! tree recovered by [`reconstruct`]. If the handler table cannot be
//! nested, or a handler boundary cuts through an instruction, the
//! structured rendering falls back to the flat one so a listing is always
//! produced.
//!
//! # Examples
//!
//! ```rust
//! use methodscope::{formatter, metadata::method::MethodData};
//!
//! let method = MethodData::from_il(&[0x00, 0x2A]);
//! assert_eq!(formatter::format(&method), "  nop\n  ret\n\n");
//! ```

use std::collections::HashSet;
use std::fmt::Write;

use crate::{
    disassembler::{FlowType, Instruction, Operand, MAX_MNEMONIC_LENGTH},
    metadata::{
        label::Label,
        method::{reconstruct, HandlerKind, MethodData, MethodDataFlags, Section},
    },
};

/// Renders a flat listing of `data`.
///
/// The listing starts with the header directives (`.maxstack`, `.locals`
/// and the code size), followed by the instruction stream. Every jump
/// target gets a bare `IL_XXXX` label line in front of the instruction it
/// refers to, and a blank line follows each unconditional transfer so the
/// basic blocks stand apart. Exception handlers are listed at the end,
/// one `.try` line per clause.
#[must_use]
pub fn format(data: &MethodData) -> String {
    let mut out = String::new();
    let targets = data.jump_targets();

    write_header(data, &mut out);

    for instruction in &data.instructions {
        write_instruction(&mut out, instruction, &targets, 0);
    }

    write_handler_table(data, &mut out);
    out
}

/// Renders `data` with exception handlers nested in braces.
///
/// The flat handler table is first rebuilt into a section tree. Each
/// try block becomes a `.try { .. }` region followed by its handlers,
/// indented two columns per nesting level. Methods without handlers
/// come out identical to [`format`] minus the handler table.
///
/// Falls back to [`format`] when the handler table is structurally
/// invalid or its boundaries do not line up with instruction starts.
#[must_use]
pub fn format_structured(data: &MethodData) -> String {
    let handlers: Vec<_> = data.handlers().copied().collect();

    let Ok(tree) = reconstruct(data.code_range(), &handlers) else {
        return format(data);
    };

    match braced_body(data, &tree) {
        Some(body) => {
            let mut out = String::new();
            write_header(data, &mut out);
            out.push_str(&body);
            out
        }
        None => format(data),
    }
}

fn write_header(data: &MethodData, out: &mut String) {
    if data.max_stack != 0 {
        let _ = writeln!(out, ".maxstack {}", data.max_stack);
    }

    if !data.locals_token.is_null() {
        let init = if data.flags.contains(MethodDataFlags::INIT_LOCALS) {
            "init "
        } else {
            ""
        };
        let _ = writeln!(out, ".locals {init}{}", data.locals_token);
    }

    if data.code_size != 0 {
        let _ = writeln!(out, "// code size: {}", data.code_size);
    }
}

fn write_instruction(
    out: &mut String,
    instruction: &Instruction,
    targets: &HashSet<Label>,
    indent: usize,
) {
    if targets.contains(&instruction.range.offset) {
        let _ = writeln!(out, "{:indent$}{}", "", instruction.range.offset);
    }

    let _ = write!(out, "{:indent$}  ", "");

    match instruction.opcode {
        Some(opcode) => {
            out.push_str(opcode.mnemonic);

            if instruction.operand != Operand::None {
                let padding = MAX_MNEMONIC_LENGTH + 2 - opcode.mnemonic.len();
                let _ = write!(out, "{:padding$}", "");
                write_operand(out, instruction);
            }
        }
        None => out.push_str("??"),
    }

    out.push('\n');

    if let Some(opcode) = instruction.opcode {
        if matches!(
            opcode.flow_type,
            FlowType::UnconditionalBranch | FlowType::Return | FlowType::Throw
        ) {
            out.push('\n');
        }
    }
}

fn write_operand(out: &mut String, instruction: &Instruction) {
    match &instruction.operand {
        // Branch targets carry the relative distance from the end of the
        // instruction, which is what the raw operand bytes encode.
        Operand::Target(label) => {
            let delta = *label - instruction.range.end();
            let sign = if delta >= 0 { "+" } else { "" };
            let _ = write!(out, "{label} // {sign}{delta}");
        }
        operand => {
            let _ = write!(out, "{operand}");
        }
    }
}

fn write_handler_table(data: &MethodData, out: &mut String) {
    for handler in data.handlers() {
        let _ = write!(
            out,
            ".try {} to {}",
            handler.try_range.offset,
            handler.try_range.end()
        );

        match handler.kind {
            HandlerKind::Catch => {
                let _ = write!(out, " catch {} ", handler.type_token());
            }
            HandlerKind::Filter => {
                let _ = write!(out, " filter {} ", Label(handler.filter_or_type));
            }
            HandlerKind::Finally => out.push_str(" finally "),
            HandlerKind::Fault => out.push_str(" fault "),
        }

        let _ = writeln!(
            out,
            "{} to {}",
            handler.handler_range.offset,
            handler.handler_range.end()
        );
    }
}

fn braced_body(data: &MethodData, tree: &Section) -> Option<String> {
    let mut out = String::new();
    let targets = data.jump_targets();
    write_section(&mut out, data, tree, &targets, 0)?;
    Some(out)
}

fn write_section(
    out: &mut String,
    data: &MethodData,
    section: &Section,
    targets: &HashSet<Label>,
    depth: usize,
) -> Option<()> {
    match section {
        Section::Plain(range) => {
            for instruction in data.instructions_in(*range)? {
                write_instruction(out, instruction, targets, depth * 2);
            }
        }
        Section::Sequence(_, children) => {
            for child in children {
                write_section(out, data, child, targets, depth)?;
            }
        }
        Section::TryBlock(_, body, handlers) => {
            write_line(out, depth, ".try");
            write_line(out, depth, "{");
            write_section(out, data, body, targets, depth + 1)?;
            write_line(out, depth, "}");

            for handler in handlers {
                if let Some(filter) = &handler.filter {
                    write_line(out, depth, &handler.kind.to_string());
                    write_line(out, depth, "{");
                    write_section(out, data, filter, targets, depth + 1)?;
                    write_line(out, depth, "}");
                } else if handler.kind == HandlerKind::Catch {
                    let catch = format!("catch {}", handler.exception_type);
                    write_line(out, depth, &catch);
                } else {
                    write_line(out, depth, &handler.kind.to_string());
                }

                write_line(out, depth, "{");
                write_section(out, data, &handler.body, targets, depth + 1)?;
                write_line(out, depth, "}");
            }
        }
    }

    Some(())
}

fn write_line(out: &mut String, depth: usize, line: &str) {
    let indent = depth * 2;
    let _ = writeln!(out, "{:indent$}{line}", "");
}
