//! Exception handler clauses of CIL method bodies.
//!
//! A method body protects code through a flat table of clauses rather than
//! through nesting markers in the instruction stream. Each clause pairs a
//! protected range with a handler range and a kind; the lexical nesting that
//! the source language expressed is recovered separately by
//! [`crate::metadata::method::reconstruct`].
//!
//! # Key Components
//!
//! - [`HandlerKind`] - The four clause kinds of ECMA-335 II.25.4.6
//! - [`ExceptionHandler`] - One flat clause with its ranges and extra field
//!
//! # Examples
//!
//! ```rust
//! use methodscope::metadata::label::CodeRange;
//! use methodscope::metadata::method::{ExceptionHandler, HandlerKind};
//!
//! let handler = ExceptionHandler::new(
//!     HandlerKind::Filter,
//!     CodeRange::new(0.into(), 3),
//!     CodeRange::new(7.into(), 5),
//!     3,
//! );
//!
//! // The filter expression runs from its start offset up to the handler body.
//! let filter = handler.filter_range().unwrap();
//! assert_eq!(filter, CodeRange::new(3.into(), 4));
//! ```

use crate::metadata::{
    label::{CodeRange, Label},
    token::Token,
};
use strum::{Display, FromRepr};

/// The kind of an exception handler clause.
///
/// The discriminants are the on-disk flag values of ECMA-335 II.25.4.6. The
/// encoding leaves gaps (there is no kind `3`), so a clause with any other
/// value makes the whole method body unparseable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, FromRepr)]
#[strum(serialize_all = "lowercase")]
#[repr(u32)]
pub enum HandlerKind {
    /// Runs when an exception of the clause's type token is thrown
    Catch = 0,
    /// Runs a filter expression first to decide whether the handler applies
    Filter = 1,
    /// Runs on every exit from the protected range
    Finally = 2,
    /// Runs only when the protected range exits through an exception
    Fault = 4,
}

/// One clause of a method's flat exception handler table.
///
/// The meaning of [`filter_or_type`](ExceptionHandler::filter_or_type) depends
/// on the kind: for [`HandlerKind::Catch`] it is a metadata token naming the
/// caught exception type, for [`HandlerKind::Filter`] it is the byte offset
/// where the filter expression begins, and for the remaining kinds it is
/// unused and zero in well-formed bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExceptionHandler {
    /// What the handler does when control reaches it
    pub kind: HandlerKind,
    /// The protected code range
    pub try_range: CodeRange,
    /// The handler body range
    pub handler_range: CodeRange,
    /// Catch type token, filter start offset, or zero
    pub filter_or_type: i32,
}

impl ExceptionHandler {
    /// Creates a handler clause from its four on-disk fields
    #[must_use]
    pub fn new(
        kind: HandlerKind,
        try_range: CodeRange,
        handler_range: CodeRange,
        filter_or_type: i32,
    ) -> Self {
        ExceptionHandler {
            kind,
            try_range,
            handler_range,
            filter_or_type,
        }
    }

    /// Returns the filter expression range, for filter clauses.
    ///
    /// The table stores only where the filter expression starts; it always
    /// runs up to the start of the handler body, so the range is implicit.
    #[must_use]
    pub fn filter_range(&self) -> Option<CodeRange> {
        if self.kind != HandlerKind::Filter {
            return None;
        }

        let start = Label(self.filter_or_type);
        Some(CodeRange::new(start, self.handler_range.offset - start))
    }

    /// Returns the clause's extra field reinterpreted as a metadata token.
    ///
    /// Only meaningful for catch clauses; filter clauses reuse the field for
    /// the filter start offset.
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub fn type_token(&self) -> Token {
        Token::new(self.filter_or_type as u32)
    }
}
