use thiserror::Error;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

macro_rules! out_of_bounds_error {
    () => {
        crate::Error::OutOfBounds
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// This enum covers all possible error conditions that can occur while parsing a raw CIL
/// method body. Each variant provides specific context about the failure mode to enable
/// appropriate error handling.
///
/// Note that the public parse entry points ([`crate::metadata::method::MethodData::from_body`])
/// deliberately collapse these into `None`: a damaged buffer is an expected input for this
/// library, not an exceptional one. The variants below carry the detail for internal
/// diagnostics and for callers that work through [`crate::Result`] directly.
///
/// # Error Categories
///
/// ## Buffer Parsing Errors
/// - [`Error::Malformed`] - Corrupted or inconsistent method body structure
/// - [`Error::OutOfBounds`] - Attempted to read beyond the buffer
/// - [`Error::NotSupported`] - Unknown method header format tag
/// - [`Error::Empty`] - Empty input provided
///
/// ## Reconstruction Errors
/// - [`Error::Structural`] - The flat exception-handler table cannot form a valid
///   nested section tree (see [`StructuralError`])
///
/// # Examples
///
/// ```rust
/// use methodscope::{Error, metadata::method::MethodData};
///
/// // 0x01 is neither the Tiny nor the Fat format tag
/// assert!(MethodData::from_body(&[0x01]).is_none());
///
/// let err = Error::Empty;
/// match err {
///     Error::Malformed { message, file, line } => {
///         eprintln!("Malformed body: {} ({}:{})", message, file, line);
///     }
///     e => {
///         eprintln!("Other error: {}", e);
///     }
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The method body is damaged and could not be parsed.
    ///
    /// This error indicates that the buffer does not hold a consistent Tiny or Fat
    /// method body. The error includes the source location where the malformation
    /// was detected for debugging purposes.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of what was malformed
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// An out of bound access was attempted while parsing the buffer.
    ///
    /// This error occurs when trying to read data beyond the end of the method body.
    /// It's a safety check to prevent buffer overruns during parsing.
    #[error("Out of Bound read would have occurred!")]
    OutOfBounds,

    /// The method header format is not supported.
    ///
    /// The low two bits of the first header byte select the format; anything other
    /// than the Tiny (`0x02`) or Fat (`0x03`) tag ends up here.
    #[error("The method header format is not supported")]
    NotSupported,

    /// Provided input was empty.
    ///
    /// This error occurs when an empty buffer is provided where an actual method
    /// body was expected.
    #[error("Provided input was empty")]
    Empty,

    /// The flat exception-handler table cannot be arranged into a nested section tree.
    ///
    /// Wraps the specific invariant violation detected by the section reconstructor,
    /// see [`StructuralError`] for the taxonomy.
    #[error("{0}")]
    Structural(#[from] StructuralError),
}

/// Invariant violations detected while reconstructing the nested section tree.
///
/// [`crate::metadata::method::reconstruct`] turns the flat exception-handler table of a
/// method body into a tree of lexically nested try/handler sections. The encoding allows
/// tables that no lexical nesting can satisfy; each variant below names the first
/// invariant such a table violates.
///
/// The reconstructor is all-or-nothing: on any of these errors no partial tree is
/// produced, and callers (such as the structured listing renderer) are expected to fall
/// back to the flat representation.
///
/// # Examples
///
/// ```rust
/// use methodscope::{
///     metadata::{
///         label::CodeRange,
///         method::{reconstruct, ExceptionHandler, HandlerKind},
///     },
///     StructuralError,
/// };
///
/// // A try block that lies outside the code range can never be placed in the tree.
/// let handlers = [ExceptionHandler::new(
///     HandlerKind::Catch,
///     CodeRange::new(10.into(), 2),
///     CodeRange::new(12.into(), 2),
///     0x0200_0010,
/// )];
///
/// let result = reconstruct(CodeRange::new(0.into(), 10), &handlers);
/// assert_eq!(result.unwrap_err(), StructuralError::LeftoverBuilders);
/// ```
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructuralError {
    /// A finalized try block extends beyond the range being reconstructed.
    ///
    /// The try range itself may fit, but once its handlers are appended the
    /// resulting block spills past the requested range.
    #[error("A try block extends beyond the range being reconstructed")]
    NotContained,

    /// Two finalized try blocks within the same range overlap without nesting.
    ///
    /// Several handlers may legally share one identical try range; two blocks
    /// with merely intersecting extents can not both be placed.
    #[error("Two try blocks within the same range overlap without nesting")]
    Overlap,

    /// A handler block does not start exactly where the previous block ends.
    ///
    /// Within one try block the protected code, an optional filter body and each
    /// handler body must form a gapless chain in ascending offset order.
    #[error("A handler block is not contiguous with the blocks before it")]
    NonContiguousHandlers,

    /// Handlers referenced a try range that no enclosing range picked up.
    ///
    /// After the whole code range has been processed every open try block must
    /// have found its place in the tree; this is the remainder.
    #[error("Unresolved try blocks remain after reconstruction")]
    LeftoverBuilders,
}
