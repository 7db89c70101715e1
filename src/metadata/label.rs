use std::fmt;
use std::ops::{Add, Sub};

/// An IL offset within a method body, rendered as `IL_XXXX`.
///
/// Labels identify instruction boundaries: a label is a byte offset from the
/// start of the code block, not an instruction index. Branch operands, handler
/// boundaries and listing line prefixes all speak in labels.
///
/// Arithmetic on labels wraps on overflow. Branch deltas in malformed bodies
/// can be arbitrary, and a wrapped label is still printable and comparable.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Label(pub i32);

impl Label {
    /// Creates a new label from a raw byte offset
    #[must_use]
    pub fn new(offset: i32) -> Self {
        Label(offset)
    }
}

impl From<i32> for Label {
    fn from(offset: i32) -> Self {
        Label(offset)
    }
}

impl From<Label> for i32 {
    fn from(label: Label) -> Self {
        label.0
    }
}

impl Add<i32> for Label {
    type Output = Label;

    fn add(self, offset: i32) -> Label {
        Label(self.0.wrapping_add(offset))
    }
}

impl Sub<i32> for Label {
    type Output = Label;

    fn sub(self, offset: i32) -> Label {
        Label(self.0.wrapping_sub(offset))
    }
}

impl Sub<Label> for Label {
    type Output = i32;

    fn sub(self, rhs: Label) -> i32 {
        self.0.wrapping_sub(rhs.0)
    }
}

impl fmt::Debug for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Label({self})")
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IL_{:04X}", self.0)
    }
}

/// A contiguous byte range within a method body, as an offset and length.
///
/// Ranges describe instruction extents, try blocks, handler blocks and the
/// code block itself. Containment and overlap are half-open: a range covers
/// `[offset, offset + length)`, so two ranges that merely touch do not
/// overlap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CodeRange {
    /// Offset of the first byte of the range
    pub offset: Label,
    /// Number of bytes covered by the range
    pub length: i32,
}

impl CodeRange {
    /// Creates a new range from an offset and length
    #[must_use]
    pub fn new(offset: Label, length: i32) -> Self {
        CodeRange { offset, length }
    }

    /// Returns the label one past the last byte of the range
    #[must_use]
    pub fn end(&self) -> Label {
        self.offset + self.length
    }

    /// Returns true if `range` lies entirely within this range.
    ///
    /// A range contains itself and any empty range positioned inside it.
    #[must_use]
    pub fn contains(&self, range: CodeRange) -> bool {
        range.offset >= self.offset && (range.offset + range.length) - self.offset <= self.length
    }

    /// Returns true if `range` shares at least one byte with this range.
    ///
    /// Adjacent ranges do not overlap.
    #[must_use]
    pub fn overlaps(&self, range: CodeRange) -> bool {
        range.offset < self.end() && self.offset < range.end()
    }
}

impl fmt::Display for CodeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.offset, self.length)
    }
}
