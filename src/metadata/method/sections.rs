//! Reconstruction of the lexical section tree from the flat handler table.
//!
//! The exception handler table of a method body is flat: each clause names a
//! try range and a handler range, and nesting is implied by containment
//! rather than written down. This module rebuilds the nesting as a tree of
//! [`Section`] values, validating on the way that the table describes
//! something a structured language could actually have produced.
//!
//! # Architecture
//!
//! Handler tables are emitted inner-before-outer: by the time an outer try
//! or handler range appears, every construct strictly nested inside it has
//! already been listed. [`reconstruct`] exploits this with a single worklist
//! of open try builders. Visiting a clause first resolves its handler body
//! (and filter body) against the worklist, folding any already-complete
//! nested try blocks into it, then files the resulting handler block under
//! the builder with the clause's exact try range. A final resolution over
//! the whole code range must consume every remaining builder.
//!
//! The worklist lives entirely inside one `reconstruct` call; the operation
//! is a pure function of its inputs.
//!
//! # Key Components
//!
//! - [`Section`] - Plain code, a sequence of siblings, or a try block
//! - [`HandlerBlock`] - One handler attached to a try block
//! - [`reconstruct`] - The flat table to tree conversion
//!
//! # Examples
//!
//! ```rust
//! use methodscope::metadata::label::CodeRange;
//! use methodscope::metadata::method::{reconstruct, ExceptionHandler, HandlerKind, Section};
//!
//! let handlers = [ExceptionHandler::new(
//!     HandlerKind::Catch,
//!     CodeRange::new(0.into(), 6),
//!     CodeRange::new(6.into(), 4),
//!     0x0200_0010,
//! )];
//!
//! let tree = reconstruct(CodeRange::new(0.into(), 10), &handlers).unwrap();
//! assert!(matches!(tree, Section::TryBlock(..)));
//! assert_eq!(tree.range(), CodeRange::new(0.into(), 10));
//! ```

use crate::{
    metadata::{
        label::CodeRange,
        method::{ExceptionHandler, HandlerKind},
        token::Token,
    },
    StructuralError,
};

/// A node of the reconstructed lexical section tree.
///
/// Exactly three shapes exist and consumers are expected to match on all of
/// them. Every node knows its byte range; a parent's children always tile
/// the parent's range exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Section {
    /// An uninterrupted run of instructions with no handler structure
    Plain(CodeRange),
    /// Adjacent siblings tiling the range in ascending order, gaps filled
    /// with synthesized [`Section::Plain`] nodes
    Sequence(CodeRange, Vec<Section>),
    /// A protected region followed by its contiguous handler blocks; the
    /// range runs from the start of the protected code to the end of the
    /// last handler
    TryBlock(CodeRange, Box<Section>, Vec<HandlerBlock>),
}

impl Section {
    /// Returns the byte range this section covers
    #[must_use]
    pub fn range(&self) -> CodeRange {
        match self {
            Section::Plain(range)
            | Section::Sequence(range, _)
            | Section::TryBlock(range, _, _) => *range,
        }
    }
}

/// One handler attached to a reconstructed try block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerBlock {
    /// The clause kind this block was built from
    pub kind: HandlerKind,
    /// The filter expression body, present exactly for filter handlers
    pub filter: Option<Section>,
    /// The caught exception type; zero for everything but catch handlers
    pub exception_type: Token,
    /// The handler body
    pub body: Section,
}

/// An open try range collecting its handler blocks until some enclosing
/// range resolves it.
struct TryBuilder {
    try_range: CodeRange,
    try_section: Section,
    blocks: Vec<HandlerBlock>,
}

impl TryBuilder {
    fn new(try_range: CodeRange, try_section: Section) -> Self {
        TryBuilder {
            try_range,
            try_section,
            blocks: Vec::new(),
        }
    }

    /// Freezes the builder into a try block section.
    ///
    /// The protected code, each filter body and each handler body must form
    /// one gapless chain in ascending offset order; the resulting range runs
    /// from the try start to the end of the chain.
    fn complete(mut self) -> Result<Section, StructuralError> {
        self.blocks.sort_by_key(|block| block.body.range().offset);

        let mut end = self.try_section.range().end();
        for block in &self.blocks {
            if let Some(filter) = &block.filter {
                if filter.range().offset != end {
                    return Err(StructuralError::NonContiguousHandlers);
                }
                end = filter.range().end();
            }

            if block.body.range().offset != end {
                return Err(StructuralError::NonContiguousHandlers);
            }
            end = block.body.range().end();
        }

        let range = CodeRange::new(self.try_range.offset, end - self.try_range.offset);
        Ok(Section::TryBlock(range, Box::new(self.try_section), self.blocks))
    }
}

/// Rebuilds the nested section tree for `range` from a flat handler table.
///
/// `handlers` must be in on-disk table order; the inner-before-outer order
/// the encoding guarantees is what lets a single pass work. Multiple
/// handlers naming the identical try range merge into one try block with
/// several handler blocks.
///
/// # Errors
///
/// Returns the first [`StructuralError`] a hostile or reordered table runs
/// into; no partial tree is produced.
///
/// # Examples
///
/// ```rust
/// use methodscope::metadata::label::CodeRange;
/// use methodscope::metadata::method::{reconstruct, Section};
///
/// // No handlers: the whole range is one plain section.
/// let tree = reconstruct(CodeRange::new(0.into(), 4), &[]).unwrap();
/// assert_eq!(tree, Section::Plain(CodeRange::new(0.into(), 4)));
/// ```
pub fn reconstruct(
    range: CodeRange,
    handlers: &[ExceptionHandler],
) -> Result<Section, StructuralError> {
    let mut builders: Vec<TryBuilder> = Vec::new();

    for handler in handlers {
        let block = handler_block(&mut builders, handler)?;

        let index = match builders
            .iter()
            .position(|builder| builder.try_range == handler.try_range)
        {
            Some(index) => index,
            None => {
                let try_section = resolve_section(&mut builders, handler.try_range)?;
                builders.push(TryBuilder::new(handler.try_range, try_section));
                builders.len() - 1
            }
        };

        builders[index].blocks.push(block);
    }

    let section = resolve_section(&mut builders, range)?;
    if builders.is_empty() {
        Ok(section)
    } else {
        Err(StructuralError::LeftoverBuilders)
    }
}

/// Builds the handler block of one clause, resolving its body and filter
/// body against the worklist first.
fn handler_block(
    builders: &mut Vec<TryBuilder>,
    handler: &ExceptionHandler,
) -> Result<HandlerBlock, StructuralError> {
    let body = resolve_section(builders, handler.handler_range)?;

    let (filter, exception_type) = match handler.filter_range() {
        Some(filter_range) => (
            Some(resolve_section(builders, filter_range)?),
            Token::new(0),
        ),
        None => (None, handler.type_token()),
    };

    Ok(HandlerBlock {
        kind: handler.kind,
        filter,
        exception_type,
        body,
    })
}

/// Extracts and finalizes every open builder contained in `range`, then
/// combines the results into a single section covering exactly `range`.
fn resolve_section(
    builders: &mut Vec<TryBuilder>,
    range: CodeRange,
) -> Result<Section, StructuralError> {
    let mut resolved: Vec<Section> = Vec::new();
    let mut index = 0;

    while index < builders.len() {
        if range.contains(builders[index].try_range) {
            let section = builders.remove(index).complete()?;

            if !range.contains(section.range()) {
                return Err(StructuralError::NotContained);
            }
            if resolved
                .iter()
                .any(|other| section.range().overlaps(other.range()))
            {
                return Err(StructuralError::Overlap);
            }

            resolved.push(section);
        } else {
            index += 1;
        }
    }

    if resolved.is_empty() {
        return Ok(Section::Plain(range));
    }
    if resolved.len() == 1 && resolved[0].range() == range {
        return Ok(resolved.swap_remove(0));
    }

    resolved.sort_by_key(|section| section.range().offset);
    Ok(sequence_section(range, resolved))
}

/// Lays the sorted sections out as a sequence, synthesizing plain sections
/// for the gaps between and around them.
fn sequence_section(range: CodeRange, sections: Vec<Section>) -> Section {
    let mut children = Vec::with_capacity(sections.len() * 2 + 1);
    let mut offset = range.offset;

    for section in sections {
        let start = section.range().offset;
        if start > offset {
            children.push(Section::Plain(CodeRange::new(offset, start - offset)));
        }

        offset = section.range().end();
        children.push(section);
    }

    if offset < range.end() {
        children.push(Section::Plain(CodeRange::new(offset, range.end() - offset)));
    }

    Section::Sequence(range, children)
}
